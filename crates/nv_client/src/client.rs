use std::fmt;

use async_trait::async_trait;
use nv_core::types::{AnalyzeResponse, ErrorBody};
use nv_core::{AnalysisRequest, AnalysisResult, Analyzer, ApiFailure, Result};
use reqwest::Client;

use crate::failure::{unknown_failure, AttemptFailure};
use crate::logging::Logger;
use crate::retry::{retry_decision, RetryDecision};
use crate::{ClientConfig, MAX_ATTEMPTS};

/// HTTP client for the analysis backend.
///
/// Cloning is cheap and clones share one connection pool. No other state is kept
/// between calls, so any number of `analyze` calls may run concurrently.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    config: ClientConfig,
    logger: Logger,
}

impl AnalysisClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        let logger = Logger::new().with_prefix(format!("[{}]", config.base_url));
        Ok(Self {
            client,
            config,
            logger,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits `url` for analysis, retrying transient failures with backoff.
    ///
    /// Client errors (4xx) fail on the first attempt. Timeouts, connection
    /// failures, server errors and undecodable bodies are retried up to
    /// [`MAX_ATTEMPTS`] times. The url is sent as given.
    pub async fn analyze(&self, url: &str) -> std::result::Result<AnalysisResult, ApiFailure> {
        for attempt in 1..=MAX_ATTEMPTS {
            let failure = match self.attempt(url).await {
                Ok(result) => {
                    self.logger.debug(&format!(
                        "Analysis of {} succeeded on attempt {}/{}",
                        url, attempt, MAX_ATTEMPTS
                    ));
                    return Ok(result);
                }
                Err(failure) => failure,
            };

            match retry_decision(attempt, failure.kind()) {
                RetryDecision::Retry { delay } => {
                    self.logger.warn(&format!(
                        "Request failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempt,
                        MAX_ATTEMPTS,
                        failure,
                        delay.as_millis()
                    ));
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp => {
                    self.logger.error(&format!(
                        "Analysis of {} failed after {} attempt(s): {}",
                        url, attempt, failure
                    ));
                    return Err(failure.into_api_failure());
                }
            }
        }

        Err(unknown_failure())
    }

    /// `true` when `GET /health` answers 2xx within the health timeout.
    pub async fn check_health(&self) -> bool {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .timeout(self.config.health_timeout)
            .send()
            .await;

        match response {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                self.logger.debug(&format!("Health check failed: {}", e));
                false
            }
        }
    }

    async fn attempt(&self, url: &str) -> std::result::Result<AnalysisResult, AttemptFailure> {
        let response = self
            .client
            .post(self.endpoint("/api/analyze"))
            .timeout(self.config.analyze_timeout)
            .json(&AnalysisRequest::new(url))
            .send()
            .await
            .map_err(AttemptFailure::from_transport)?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<AnalyzeResponse>()
                .await
                .map_err(AttemptFailure::from_transport)?;
            return Ok(body.into_result(url));
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(AttemptFailure::from_status(status.as_u16(), body))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

impl fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, url: &str) -> std::result::Result<AnalysisResult, ApiFailure> {
        AnalysisClient::analyze(self, url).await
    }

    async fn check_health(&self) -> bool {
        AnalysisClient::check_health(self).await
    }
}

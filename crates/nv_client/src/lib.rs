use std::time::Duration;

pub mod client;
pub mod failure;
pub mod logging;
pub mod retry;
pub mod session;

/// Environment variable consulted once at startup for the backend address.
pub const BASE_URL_ENV: &str = "NEURO_VERIFY_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const ANALYZE_TIMEOUT: Duration = Duration::from_millis(60_000);
pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(5_000);
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub analyze_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analyze_timeout: ANALYZE_TIMEOUT,
            health_timeout: HEALTH_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::default().with_base_url(resolve_base_url(std::env::var(BASE_URL_ENV).ok()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub use client::AnalysisClient;
pub use retry::{backoff_delay, retry_decision, RetryDecision};
pub use session::AnalysisSession;

pub mod prelude {
    pub use super::{AnalysisClient, AnalysisSession, ClientConfig};
    pub use nv_core::{Analyzer, AnalysisResult, AnalysisState, ApiFailure, Error, Result};
}

use async_trait::async_trait;
use crate::error::ApiFailure;
use crate::types::AnalysisResult;

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Submit a url for analysis. Retries, if any, are the implementor's business.
    async fn analyze(&self, url: &str) -> std::result::Result<AnalysisResult, ApiFailure>;

    /// Whether the backend is reachable. Never fails.
    async fn check_health(&self) -> bool;
}

use crate::error::{ApiFailure, Error};
use crate::types::AnalysisResult;
use crate::Result;

/// View state of one analysis panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading { url: String },
    Success(Box<AnalysisResult>),
    Error(ApiFailure),
}

impl AnalysisState {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Loading { .. } => "loading",
            AnalysisState::Success(_) => "success",
            AnalysisState::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }

    /// Starts a new submission. Any previous result or failure is discarded.
    pub fn begin(&mut self, url: impl Into<String>) -> Result<()> {
        if self.is_loading() {
            return Err(self.rejected("begin"));
        }
        *self = AnalysisState::Loading { url: url.into() };
        Ok(())
    }

    pub fn resolve(&mut self, outcome: std::result::Result<AnalysisResult, ApiFailure>) -> Result<()> {
        if !self.is_loading() {
            return Err(self.rejected("resolve"));
        }
        *self = match outcome {
            Ok(result) => AnalysisState::Success(Box::new(result)),
            Err(failure) => AnalysisState::Error(failure),
        };
        Ok(())
    }

    /// Closes a shown result or failure and returns to idle.
    pub fn dismiss(&mut self) -> Result<()> {
        match self {
            AnalysisState::Success(_) | AnalysisState::Error(_) => {
                *self = AnalysisState::Idle;
                Ok(())
            }
            _ => Err(self.rejected("dismiss")),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            AnalysisState::Error(failure) => Some(failure),
            _ => None,
        }
    }

    fn rejected(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            url: "https://example.com/article".to_string(),
            title: None,
            snippet: None,
            publish_date: None,
            author: None,
            claim_reviews: vec![],
            checkworthy_sentences: vec![],
            domain_reputation: None,
            source_reputation: None,
            trust_score: 82,
            explanation: "ok".to_string(),
        }
    }

    #[test]
    fn test_success_cycle() {
        let mut state = AnalysisState::default();
        assert_eq!(state.name(), "idle");

        state.begin("https://example.com/article").unwrap();
        assert!(state.is_loading());

        state.resolve(Ok(sample_result())).unwrap();
        assert_eq!(state.result().unwrap().trust_score, 82);
        assert!(state.failure().is_none());

        state.dismiss().unwrap();
        assert_eq!(state, AnalysisState::Idle);
    }

    #[test]
    fn test_error_cycle_and_resubmit() {
        let mut state = AnalysisState::default();
        state.begin("https://example.com").unwrap();
        state
            .resolve(Err(ApiFailure::new("Network error").with_code("NETWORK_ERROR")))
            .unwrap();
        assert_eq!(state.failure().unwrap().code(), Some("NETWORK_ERROR"));

        // a new submission replaces the failure directly
        state.begin("https://example.com").unwrap();
        assert!(state.is_loading());
    }

    #[test]
    fn test_invalid_transitions_leave_state_untouched() {
        let mut state = AnalysisState::default();
        assert!(state.resolve(Ok(sample_result())).is_err());
        assert!(state.dismiss().is_err());
        assert_eq!(state, AnalysisState::Idle);

        state.begin("https://example.com").unwrap();
        let err = state.begin("https://other.example").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state transition: cannot begin while loading"
        );
        assert_eq!(
            state,
            AnalysisState::Loading { url: "https://example.com".to_string() }
        );
        assert!(state.dismiss().is_err());
    }
}

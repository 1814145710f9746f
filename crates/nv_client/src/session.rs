use nv_core::{AnalysisState, Analyzer, Result};
use tracing::info;

/// Drives an [`AnalysisState`] with the outcomes of an [`Analyzer`].
pub struct AnalysisSession<A: Analyzer> {
    analyzer: A,
    state: AnalysisState,
}

impl<A: Analyzer> AnalysisSession<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Runs one analysis to completion. Fails only if a submission is already
    /// in flight; analysis failures end up in the `Error` state.
    pub async fn submit(&mut self, url: &str) -> Result<&AnalysisState> {
        self.state.begin(url)?;
        info!("🔎 Analyzing {}", url);

        let outcome = self.analyzer.analyze(url).await;
        self.state.resolve(outcome)?;
        info!("Analysis of {} finished: {}", url, self.state.name());
        Ok(&self.state)
    }

    pub fn dismiss(&mut self) -> Result<()> {
        self.state.dismiss()
    }
}

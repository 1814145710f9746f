pub mod analyzer;
pub mod error;
pub mod state;
pub mod types;

pub use analyzer::Analyzer;
pub use error::{ApiFailure, Error, Result};
pub use state::AnalysisState;
pub use types::{
    AnalysisRequest, AnalysisResult, CheckworthySentence, ClaimReview, Priority, Publisher,
    ReputationRating, SourceReputation, Verdict, VirusTotalSummary,
};

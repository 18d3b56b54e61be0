use thiserror::Error;

use crate::args::AnalysisError;

/// A plan broke one of its invariants. Each variant names the missing piece.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("an environment is required to delegate with environment injection")]
    MissingEnvironment,

    #[error("base URL is required (environment '{environment}')")]
    MissingBaseUrl { environment: String },

    #[error("API key is required (environment '{environment}')")]
    MissingApiKey { environment: String },

    #[error("environment variable {name} is set but blank")]
    EmptyVariable { name: String },
}

/// Errors surfaced by the delegation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelegationError {
    #[error("argument analysis failed: {0}")]
    ArgumentAnalysisFailed(#[from] AnalysisError),

    #[error("plan validation failed: {0}")]
    PlanValidationFailed(#[from] ValidationError),
}

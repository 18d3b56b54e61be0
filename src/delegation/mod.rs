//! Delegation: decide how an invocation runs and build the plan for it.
//!
//! ```text
//! ArgumentAnalysis → choose_strategy → EnvSet → DelegationPlan → validate_plan
//! ```
//!
//! Pure, synchronous, in-memory. No I/O besides reading the current directory.

mod engine;
mod env_builder;
mod error;
mod plan;
mod strategy;

pub use engine::DelegationEngine;
pub use env_builder::{EnvSet, API_KEY_VAR, BASE_URL_VAR, HEADER_VAR_PREFIX, MODEL_VAR};
pub use error::{DelegationError, ValidationError};
pub use plan::{validate_plan, DelegationPlan, PlanMetadata, RedactedPlan};
pub use strategy::Strategy;

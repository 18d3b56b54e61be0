use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::{mask_api_key, Environment};
use crate::delegation::env_builder::{API_KEY_VAR, BASE_URL_VAR};
use crate::delegation::error::ValidationError;
use crate::delegation::strategy::Strategy;

/// Fixed metadata attached to every plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanMetadata {
    /// Correlates log lines for one invocation.
    pub plan_id: Uuid,
    pub original_args: Vec<String>,
    pub strategy: Strategy,
    pub reason: &'static str,
    pub created_at: DateTime<Utc>,
    pub estimated_overhead: Duration,
}

/// Everything the executor needs for one invocation. Built, validated,
/// executed, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationPlan {
    pub strategy: Strategy,
    pub environment: Option<Environment>,
    /// Arguments for the forwarded command, verbatim.
    pub claude_args: Vec<String>,
    /// Merged over the inherited process environment by the executor.
    pub env_vars: BTreeMap<String, String>,
    /// Empty when the current directory could not be resolved.
    pub working_dir: PathBuf,
    pub metadata: PlanMetadata,
}

impl DelegationPlan {
    /// Serializable view with the API key masked, for `--dry-run`.
    pub fn redacted(&self) -> RedactedPlan<'_> {
        let env_vars = self
            .env_vars
            .iter()
            .map(|(name, value)| {
                let shown = if name == API_KEY_VAR {
                    mask_api_key(value)
                } else {
                    value.clone()
                };
                (name.as_str(), shown)
            })
            .collect();

        RedactedPlan {
            plan_id: self.metadata.plan_id,
            strategy: self.strategy,
            reason: self.metadata.reason,
            environment: self.environment.as_ref().map(|e| e.name.as_str()),
            claude_args: &self.claude_args,
            env_vars,
            working_dir: self.working_dir.display().to_string(),
            original_args: &self.metadata.original_args,
            created_at: self.metadata.created_at,
            estimated_overhead_ms: self.metadata.estimated_overhead.as_millis(),
        }
    }
}

/// See [`DelegationPlan::redacted`].
#[derive(Debug, Serialize)]
pub struct RedactedPlan<'a> {
    pub plan_id: Uuid,
    pub strategy: Strategy,
    pub reason: &'static str,
    pub environment: Option<&'a str>,
    pub claude_args: &'a [String],
    pub env_vars: BTreeMap<&'a str, String>,
    pub working_dir: String,
    pub original_args: &'a [String],
    pub created_at: DateTime<Utc>,
    pub estimated_overhead_ms: u128,
}

/// Check a plan before it reaches the executor.
///
/// Injection requires an environment with a base URL and API key. Independently,
/// `ANTHROPIC_BASE_URL` / `ANTHROPIC_API_KEY` may never be injected blank.
/// Whitespace-only counts as blank everywhere.
pub fn validate_plan(plan: &DelegationPlan) -> Result<(), ValidationError> {
    if plan.strategy.requires_environment() {
        let env = plan
            .environment
            .as_ref()
            .ok_or(ValidationError::MissingEnvironment)?;

        if is_blank(&env.base_url) {
            return Err(ValidationError::MissingBaseUrl {
                environment: env.name.clone(),
            });
        }
        if is_blank(&env.api_key) {
            return Err(ValidationError::MissingApiKey {
                environment: env.name.clone(),
            });
        }
    }

    for name in [BASE_URL_VAR, API_KEY_VAR] {
        if plan.env_vars.get(name).is_some_and(|v| is_blank(v)) {
            return Err(ValidationError::EmptyVariable {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

//! Environment builder: all injected variables in one place.

use std::collections::BTreeMap;

use crate::config::Environment;

pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const MODEL_VAR: &str = "ANTHROPIC_MODEL";
pub const HEADER_VAR_PREFIX: &str = "ANTHROPIC_HEADER_";

/// Builder for environment variables passed to the forwarded process.
#[derive(Debug, Clone, Default)]
pub struct EnvSet {
    vars: BTreeMap<String, String>,
}

impl EnvSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL, API key, model (only when non-empty) and one
    /// `ANTHROPIC_HEADER_<name>` per header, name taken verbatim.
    pub fn with_environment(mut self, env: &Environment) -> Self {
        self.vars.insert(BASE_URL_VAR.into(), env.base_url.clone());
        self.vars.insert(API_KEY_VAR.into(), env.api_key.clone());
        if let Some(model) = env.model() {
            self.vars.insert(MODEL_VAR.into(), model.to_string());
        }
        for (name, value) in &env.headers {
            self.vars
                .insert(format!("{HEADER_VAR_PREFIX}{name}"), value.clone());
        }
        self
    }

    pub fn build(self) -> BTreeMap<String, String> {
        self.vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_omitted_when_empty() {
        let env = Environment::new("e", "https://x", "k").with_model("");
        let vars = EnvSet::new().with_environment(&env).build();
        assert!(!vars.contains_key(MODEL_VAR));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn header_names_are_not_rewritten() {
        let env = Environment::new("e", "https://x", "k").with_header("x-lower.Case", "v");
        let vars = EnvSet::new().with_environment(&env).build();
        assert_eq!(
            vars.get("ANTHROPIC_HEADER_x-lower.Case").map(String::as_str),
            Some("v")
        );
    }
}

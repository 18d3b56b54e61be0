use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// Default settings for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Name of the environment used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    /// Forwarded command (default: "claude").
    #[serde(default = "default_command")]
    pub command: String,
}

fn default_command() -> String {
    "claude".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            active: None,
            command: default_command(),
        }
    }
}

/// A named API endpoint configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier (e.g., "work", "openrouter").
    pub name: String,
    /// Base URL for the API (e.g., "https://api.anthropic.com").
    pub base_url: String,
    /// API key sent as `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Model override sent as `ANTHROPIC_MODEL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Extra headers, each sent as `ANTHROPIC_HEADER_<name>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Environment {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Model if set and non-empty.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }
}

// Keep the API key out of debug output.
impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &super::mask_api_key(&self.api_key))
            .field("model", &self.model)
            .field("headers", &self.headers)
            .finish()
    }
}

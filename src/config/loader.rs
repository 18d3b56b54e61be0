use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::{Config, Environment};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CCENV_CONFIG";
/// Overrides `defaults.command`.
pub const COMMAND_ENV: &str = "CCENV_COMMAND";

/// Errors that can occur when loading, saving or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Environment '{name}' not found in config")]
    EnvironmentNotFound { name: String },

    #[error("Environment '{name}' already exists")]
    DuplicateEnvironment { name: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `$CCENV_CONFIG` if set, otherwise `<config_dir>/ccenv/config.toml`
    /// (falls back to the current directory if there is no config dir).
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("ccenv").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    /// On Unix the file is restricted to the owner since it holds API keys.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Every environment has a non-empty, unique name
    /// - The active environment, if set, exists
    ///
    /// Endpoint completeness is checked per invocation when a plan is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for env in &self.environments {
            if env.name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Environment names must not be empty".to_string(),
                });
            }
            if !seen.insert(env.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Environment '{}' is defined more than once", env.name),
                });
            }
        }

        if let Some(active) = &self.defaults.active {
            if self.environment(active).is_none() {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Active environment '{}' not found in configured environments",
                        active
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    pub fn active(&self) -> Option<&Environment> {
        self.defaults
            .active
            .as_deref()
            .and_then(|name| self.environment(name))
    }

    pub fn add_environment(&mut self, env: Environment) -> Result<(), ConfigError> {
        if self.environment(&env.name).is_some() {
            return Err(ConfigError::DuplicateEnvironment { name: env.name });
        }
        self.environments.push(env);
        Ok(())
    }

    /// Removes an environment, clearing the default if it pointed at it.
    pub fn remove_environment(&mut self, name: &str) -> Result<Environment, ConfigError> {
        let index = self
            .environments
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| ConfigError::EnvironmentNotFound {
                name: name.to_string(),
            })?;

        if self.defaults.active.as_deref() == Some(name) {
            self.defaults.active = None;
        }
        Ok(self.environments.remove(index))
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), ConfigError> {
        if self.environment(name).is_none() {
            return Err(ConfigError::EnvironmentNotFound {
                name: name.to_string(),
            });
        }
        self.defaults.active = Some(name.to_string());
        Ok(())
    }

    /// Resolve the environment for an invocation without prompting.
    ///
    /// An explicit name must exist. Without one: the default, else the only
    /// configured environment, else none.
    pub fn resolve_environment(&self, name: Option<&str>) -> Result<Option<&Environment>, ConfigError> {
        if let Some(name) = name {
            return self
                .environment(name)
                .map(Some)
                .ok_or_else(|| ConfigError::EnvironmentNotFound {
                    name: name.to_string(),
                });
        }

        if let Some(active) = self.active() {
            return Ok(Some(active));
        }

        match self.environments.as_slice() {
            [only] => Ok(Some(only)),
            _ => Ok(None),
        }
    }

    /// Forwarded command, honoring `$CCENV_COMMAND`.
    pub fn command(&self) -> String {
        std::env::var(COMMAND_ENV)
            .ok()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.defaults.command.clone())
    }
}

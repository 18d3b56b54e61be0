//! Configuration: named environments stored as TOML.

mod credentials;
mod loader;
mod types;

pub use credentials::mask_api_key;
pub use loader::{ConfigError, COMMAND_ENV, CONFIG_PATH_ENV};
pub use types::{Config, Defaults, Environment};

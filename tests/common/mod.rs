//! Shared test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Order-preserving, no token altered.
pub fn is_subsequence(residual: &[String], original: &[String]) -> bool {
    let mut rest = original.iter();
    residual
        .iter()
        .all(|token| rest.any(|candidate| candidate == token))
}

/// Write `content` as config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub const TWO_ENVIRONMENTS: &str = r#"
[defaults]
active = "work"

[[environments]]
name = "work"
base_url = "https://api.anthropic.com"
api_key = "sk-ant-work-0123456789"
model = "claude-sonnet-4"

[environments.headers]
X-Team = "platform"

[[environments]]
name = "proxy"
base_url = "http://127.0.0.1:4000"
api_key = "sk-proxy-0123456789"
"#;

/// The ccenv binary with its config pointed at `config_path`.
pub fn ccenv_cmd(config_path: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ccenv"));
    cmd.env("CCENV_CONFIG", config_path)
        .env_remove("CCENV_LOG")
        .env_remove("CCENV_COMMAND")
        .env_remove("ANTHROPIC_BASE_URL")
        .env_remove("ANTHROPIC_API_KEY");
    cmd
}

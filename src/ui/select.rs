//! Terminal prompts: environment picker and text/secret input.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use thiserror::Error;

use crate::config::{mask_api_key, Environment};

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no environments configured; add one with `ccenv add <name>`")]
    NoEnvironments,

    #[error("selection cancelled")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Choose one environment out of several.
pub trait EnvironmentSelector {
    fn select<'a>(&self, environments: &'a [Environment]) -> Result<&'a Environment, SelectError>;
}

/// Arrow-key picker on the terminal.
#[derive(Debug, Default)]
pub struct DialogSelector;

impl EnvironmentSelector for DialogSelector {
    fn select<'a>(&self, environments: &'a [Environment]) -> Result<&'a Environment, SelectError> {
        if environments.is_empty() {
            return Err(SelectError::NoEnvironments);
        }

        let labels: Vec<String> = environments.iter().map(selection_label).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select an environment")
            .items(&labels)
            .default(0)
            .interact_opt()?
            .ok_or(SelectError::Cancelled)?;

        environments.get(index).ok_or(SelectError::Cancelled)
    }
}

/// `work  https://api.anthropic.com  [claude-sonnet-4]`
pub fn selection_label(env: &Environment) -> String {
    match env.model() {
        Some(model) => format!("{}  {}  [{}]", env.name, env.base_url, model),
        None => format!("{}  {}", env.name, env.base_url),
    }
}

/// One line per environment for `ccenv list`; the key is masked.
pub fn list_line(env: &Environment, is_default: bool) -> String {
    let marker = if is_default { "*" } else { " " };
    let mut line = format!(
        "{marker} {}\t{}\tkey={}",
        env.name,
        env.base_url,
        mask_api_key(&env.api_key)
    );
    if let Some(model) = env.model() {
        line.push_str(&format!("\tmodel={model}"));
    }
    if !env.headers.is_empty() {
        let names: Vec<&str> = env.headers.keys().map(String::as_str).collect();
        line.push_str(&format!("\theaders={}", names.join(",")));
    }
    line
}

/// Whether prompts can be shown at all.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

pub fn prompt_text(prompt: &str) -> Result<String, SelectError> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

pub fn prompt_secret(prompt: &str) -> Result<String, SelectError> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_line_masks_key_and_marks_default() {
        let env = Environment::new("work", "https://api.anthropic.com", "sk-ant-abcdef123456")
            .with_model("opus")
            .with_header("X-Team", "platform");
        let line = list_line(&env, true);
        assert!(line.starts_with("* work"));
        assert!(!line.contains("sk-ant-abcdef123456"));
        assert!(line.contains("model=opus"));
        assert!(line.contains("headers=X-Team"));
        assert!(!line.contains("platform"));
    }

    #[test]
    fn selection_label_includes_model_when_set() {
        let env = Environment::new("work", "https://x", "k");
        assert_eq!(selection_label(&env), "work  https://x");
        assert_eq!(selection_label(&env.with_model("m1")), "work  https://x  [m1]");
    }
}

//! Handlers for ccenv's own subcommands.

use anyhow::{bail, Context, Result};

use crate::cli::Commands;
use crate::config::{Config, Environment};
use crate::ui::{is_interactive, list_line, prompt_secret, prompt_text};

/// `NAME=VALUE` → (`NAME`, `VALUE`). The name is kept verbatim.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

pub(crate) fn dispatch(command: Commands) -> Result<i32> {
    let path = Config::config_path();
    let mut config = Config::load_from(&path).context("failed to load configuration")?;

    match command {
        Commands::List => {
            if config.environments().is_empty() {
                println!("No environments configured. Add one with `ccenv add <name>`.");
                return Ok(0);
            }
            let active = config.defaults.active.as_deref();
            for env in config.environments() {
                println!("{}", list_line(env, active == Some(env.name.as_str())));
            }
            return Ok(0);
        }
        Commands::Add {
            name,
            base_url,
            api_key,
            model,
            headers,
            default,
        } => {
            let base_url = match base_url {
                Some(url) => url,
                None => required_input("--base-url", || prompt_text("Base URL"))?,
            };
            let api_key = match api_key {
                Some(key) => key,
                None => required_input("--api-key", || prompt_secret("API key"))?,
            };
            check_endpoint(&base_url, &api_key)?;

            let mut env = Environment::new(name.clone(), base_url, api_key);
            env.model = model.filter(|m| !m.is_empty());
            env.headers.extend(headers);

            config.add_environment(env)?;
            if default || config.defaults.active.is_none() {
                config.set_active(&name)?;
            }
            println!("Added environment '{name}'");
        }
        Commands::Remove { name } => {
            config.remove_environment(&name)?;
            println!("Removed environment '{name}'");
        }
        Commands::Use { name } => {
            config.set_active(&name)?;
            println!("Default environment is now '{name}'");
        }
    }

    config
        .save_to(&path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    tracing::debug!("Saved config to {}", path.display());
    Ok(0)
}

fn required_input<F>(flag: &str, prompt: F) -> Result<String>
where
    F: FnOnce() -> Result<String, crate::ui::SelectError>,
{
    if !is_interactive() {
        bail!("{flag} is required when not running interactively");
    }
    Ok(prompt()?)
}

fn check_endpoint(base_url: &str, api_key: &str) -> Result<()> {
    let url = base_url.trim();
    if url.is_empty() {
        bail!("base URL is required");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("base URL must start with http:// or https://, got '{url}'");
    }
    if api_key.trim().is_empty() {
        bail!("API key is required");
    }
    Ok(())
}

//! Routes one invocation to the strategy the delegation engine picked.

use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::FromArgMatches;

use crate::args::{
    collect_args, flag_registry, FlagRegistry, WrapperFlags, DRY_RUN_FLAG, ENV_FLAG,
    NO_INTERACTIVE_FLAG, WRAPPER_DEBUG_FLAG,
};
use crate::cli::help::render_wrapper_help;
use crate::cli::{command, commands, is_subcommand, Cli};
use crate::config::{Config, Environment};
use crate::delegation::{DelegationEngine, DelegationPlan, Strategy};
use crate::executor::{ExecError, Executor, ProcessExecutor};
use crate::logging::init_tracing;
use crate::ui::{is_interactive, DialogSelector, EnvironmentSelector, SelectError};

/// Wrapper flag values the router acts on.
#[derive(Debug, Default)]
struct Options<'a> {
    env: Option<&'a str>,
    no_interactive: bool,
    dry_run: bool,
}

impl<'a> Options<'a> {
    fn from_flags(flags: &'a WrapperFlags) -> Self {
        Self {
            env: flags.get(ENV_FLAG).filter(|name| !name.is_empty()),
            no_interactive: flags.contains(NO_INTERACTIVE_FLAG),
            dry_run: flags.contains(DRY_RUN_FLAG),
        }
    }
}

/// Entry point for the binary. Returns the process exit code.
pub fn run() -> Result<i32> {
    let raw: Vec<OsString> = std::env::args_os().skip(1).collect();

    let args = match collect_args(raw.clone()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            return run_clap(raw);
        }
    };

    if args.first().is_some_and(|first| is_subcommand(first)) {
        init_tracing(false);
        return run_clap(args.into_iter().map(OsString::from).collect());
    }

    let registry = Arc::new(flag_registry());
    let engine = DelegationEngine::new(Arc::clone(&registry));
    let analysis = engine.analyze(&args);
    init_tracing(analysis.wrapper_flags.contains(WRAPPER_DEBUG_FLAG));

    for warning in &analysis.warnings {
        tracing::warn!("{warning}");
    }

    let strategy = engine.choose_strategy(&analysis);
    tracing::debug!(%strategy, forwarded = analysis.forwarded_args.len(), "{}", strategy.reason());

    let options = Options::from_flags(&analysis.wrapper_flags);

    match strategy {
        Strategy::ShowCombinedHelp => show_combined_help(&registry),
        Strategy::ShowVersion => {
            println!("ccenv {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Strategy::HandleInternally => {
            let config = Config::load().context("failed to load configuration")?;
            let env = select_environment(&config, &options)?;
            let plan = engine.build_launch_plan(env, &args)?;
            finish(&config, &plan, &options)
        }
        Strategy::DelegateWithEnvironment | Strategy::DelegateDirectly => {
            let config = Config::load().context("failed to load configuration")?;
            let env = config.resolve_environment(options.env)?;
            let plan = match engine.build_plan(env, &args) {
                Ok(plan) => plan,
                Err(e) if env.is_none() && config.environments().is_empty() => {
                    return Err(e)
                        .context("no environments configured; add one with `ccenv add <name>`");
                }
                Err(e) if env.is_none() => {
                    return Err(e).context(
                        "several environments are configured and none is the default; \
                         pass --env <name> or run `ccenv use <name>`",
                    );
                }
                Err(e) => return Err(e.into()),
            };
            finish(&config, &plan, &options)
        }
    }
}

/// Plain clap handling: subcommands, and the fallback when argv could not be analyzed.
fn run_clap(args: Vec<OsString>) -> Result<i32> {
    let argv = std::iter::once(OsString::from("ccenv")).chain(args);
    let matches = command().get_matches_from(argv);
    let cli = Cli::from_arg_matches(&matches)?;

    match cli.command {
        Some(subcommand) => commands::dispatch(subcommand),
        None => bail!("arguments could not be analyzed"),
    }
}

/// Explicit `--env`, the default, the only environment, or an interactive pick.
fn select_environment<'c>(config: &'c Config, options: &Options<'_>) -> Result<&'c Environment> {
    if let Some(env) = config.resolve_environment(options.env)? {
        return Ok(env);
    }
    if config.environments().is_empty() {
        return Err(SelectError::NoEnvironments.into());
    }
    if options.no_interactive || !is_interactive() {
        bail!("no environment selected; pass --env <name> or set a default with `ccenv use <name>`");
    }
    Ok(DialogSelector.select(config.environments())?)
}

fn finish(config: &Config, plan: &DelegationPlan, options: &Options<'_>) -> Result<i32> {
    if options.dry_run {
        let json = serde_json::to_string_pretty(&plan.redacted())?;
        println!("{json}");
        return Ok(0);
    }

    if let Some(env) = &plan.environment {
        tracing::info!(plan_id = %plan.metadata.plan_id, "Using environment '{}'", env.name);
    }
    let executor = ProcessExecutor::new(config.command());
    Ok(executor.execute(plan)?)
}

/// ccenv's help, then the forwarded command's own `--help`.
fn show_combined_help(registry: &FlagRegistry) -> Result<i32> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", render_wrapper_help(registry))?;

    let forwarded = Config::load()
        .map(|config| config.command())
        .unwrap_or_else(|_| Config::default().command());
    writeln!(stdout, "\n--- {forwarded} --help ---\n")?;
    stdout.flush()?;

    match ProcessExecutor::new(forwarded).run_plain(&["--help"]) {
        Ok(_) => Ok(0),
        Err(e @ ExecError::CommandNotFound { .. }) => {
            eprintln!("{e}");
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

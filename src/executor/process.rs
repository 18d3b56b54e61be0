use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::delegation::DelegationPlan;
use crate::executor::signals::SignalRelay;

/// Errors starting the forwarded command. Once it runs, its exit code is
/// reported as success of `execute`.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("'{command}' not found on PATH; is it installed?")]
    CommandNotFound { command: String },

    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Runs a finished plan and reports the child's exit code.
pub trait Executor {
    fn execute(&self, plan: &DelegationPlan) -> Result<i32, ExecError>;
}

/// Spawns the forwarded command as a child process and waits for it.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    command: String,
}

impl ProcessExecutor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Run the command with `args` and the inherited environment only.
    pub fn run_plain(&self, args: &[&str]) -> Result<i32, ExecError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(args);
        self.wait(cmd)
    }

    fn wait(&self, mut cmd: Command) -> Result<i32, ExecError> {
        let mut child = cmd.spawn().map_err(|source| self.spawn_error(source))?;

        let relay = SignalRelay::start(child.id());
        let status = child.wait();
        if let Some(relay) = relay {
            relay.stop();
        }

        let status = status.map_err(|source| ExecError::Spawn {
            command: self.command.clone(),
            source,
        })?;
        Ok(exit_code(status))
    }

    fn spawn_error(&self, source: io::Error) -> ExecError {
        if source.kind() == io::ErrorKind::NotFound {
            ExecError::CommandNotFound {
                command: self.command.clone(),
            }
        } else {
            ExecError::Spawn {
                command: self.command.clone(),
                source,
            }
        }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, plan: &DelegationPlan) -> Result<i32, ExecError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&plan.claude_args);
        // Merged over the inherited environment, not replacing it.
        cmd.envs(&plan.env_vars);
        if !plan.working_dir.as_os_str().is_empty() {
            cmd.current_dir(&plan.working_dir);
        }

        tracing::debug!(
            plan_id = %plan.metadata.plan_id,
            command = %self.command,
            args = plan.claude_args.len(),
            vars = plan.env_vars.len(),
            "Spawning forwarded command"
        );

        self.wait(cmd)
    }
}

/// Exit code of a finished child; 128+signal if it was killed on Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::args::flag_registry;
    use crate::config::Environment;
    use crate::delegation::DelegationEngine;

    fn plan_for(args: &[&str]) -> DelegationPlan {
        let env = Environment::new("test", "https://example.test", "sk-test");
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        DelegationEngine::new(std::sync::Arc::new(flag_registry()))
            .build_plan(Some(&env), &args)
            .unwrap()
    }

    #[test]
    fn propagates_exit_code() {
        let plan = plan_for(&["-c", "exit 7"]);
        let code = ProcessExecutor::new("sh").execute(&plan).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    fn injects_plan_variables() {
        let mut plan = plan_for(&["-c", "test \"$ANTHROPIC_BASE_URL\" = https://example.test"]);
        plan.working_dir = PathBuf::new();
        assert_eq!(ProcessExecutor::new("sh").execute(&plan).unwrap(), 0);

        plan.env_vars = BTreeMap::new();
        assert_ne!(ProcessExecutor::new("sh").execute(&plan).unwrap(), 0);
    }

    #[test]
    fn missing_command_reported() {
        let err = ProcessExecutor::new("ccenv-definitely-not-installed")
            .run_plain(&["--help"])
            .unwrap_err();
        assert!(matches!(err, ExecError::CommandNotFound { .. }));
    }
}

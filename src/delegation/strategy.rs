use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// How one invocation is executed. Exactly one is chosen per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// ccenv handles the invocation itself (interactive selection, wrapper-only flags).
    HandleInternally,
    /// Forward to the command with the environment's variables injected.
    DelegateWithEnvironment,
    /// Forward without injection. Defined but not produced by `choose_strategy`:
    /// an available environment is always injected. Kept for an explicit opt-out.
    DelegateDirectly,
    ShowCombinedHelp,
    ShowVersion,
}

impl Strategy {
    /// One-line justification, logged at debug level.
    pub fn reason(self) -> &'static str {
        match self {
            Strategy::HandleInternally => {
                "wrapper-specific flags detected or interactive mode requested"
            }
            Strategy::DelegateWithEnvironment => {
                "forwarded-command flags detected, delegating with environment injection"
            }
            Strategy::DelegateDirectly => "no environment configuration needed, delegating directly",
            Strategy::ShowCombinedHelp => {
                "help requested, showing combined wrapper and forwarded-command help"
            }
            Strategy::ShowVersion => "version requested, showing wrapper version information",
        }
    }

    /// Advisory overhead estimate for observability. Not enforced.
    pub fn estimated_overhead(self) -> Duration {
        match self {
            Strategy::HandleInternally => Duration::ZERO,
            Strategy::DelegateDirectly => Duration::from_millis(10),
            Strategy::DelegateWithEnvironment => Duration::from_millis(15),
            Strategy::ShowCombinedHelp => Duration::from_millis(50),
            Strategy::ShowVersion => Duration::from_millis(1),
        }
    }

    pub fn requires_environment(self) -> bool {
        matches!(self, Strategy::DelegateWithEnvironment)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::HandleInternally => "handle-internally",
            Strategy::DelegateWithEnvironment => "delegate-with-environment",
            Strategy::DelegateDirectly => "delegate-directly",
            Strategy::ShowCombinedHelp => "show-combined-help",
            Strategy::ShowVersion => "show-version",
        };
        f.write_str(name)
    }
}

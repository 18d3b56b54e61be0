//! Running the forwarded command.
//!
//! The child inherits stdio, so interactive sessions behave exactly as if the
//! command had been started directly.

mod process;
mod signals;

pub use process::{exit_code, ExecError, Executor, ProcessExecutor};

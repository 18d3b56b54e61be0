//! ccenv: run Claude Code against a named API environment.
//!
//! ```text
//! argv → args (registry + analyzer) → delegation (strategy + plan) → executor
//! ```
//!
//! Anything ccenv does not recognise is forwarded to claude byte-for-byte.

pub mod args;
pub mod cli;
pub mod config;
pub mod delegation;
pub mod executor;
pub mod logging;
pub mod ui;

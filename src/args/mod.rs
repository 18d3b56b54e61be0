//! Argument handling for ccenv.
//!
//! ```text
//! raw argv → collect_args → ArgumentAnalyzer (FlagRegistry) → ArgumentAnalysis
//! ```
//!
//! The registry decides who owns a flag; the analyzer splits argv into
//! wrapper flag values and a verbatim residual for the forwarded command.

mod analyzer;
mod registry;

pub use analyzer::{collect_args, AnalysisError, ArgumentAnalysis, ArgumentAnalyzer, WrapperFlags};
pub use registry::{
    flag_registry, ConflictResolution, ConflictRule, FlagAlias, FlagCategory, FlagClass,
    FlagInfo, FlagRegistry, DRY_RUN_FLAG, ENV_FLAG, HELP_FLAG, NO_INTERACTIVE_FLAG,
    VERSION_FLAG, WRAPPER_DEBUG_FLAG,
};

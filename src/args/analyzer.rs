//! Argument analyzer: raw argv → wrapper flags + forwarded residual.
//!
//! One left-to-right pass. Forwarded tokens are copied verbatim and in order,
//! so the residual is always a sub-sequence of the input.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::sync::Arc;

use thiserror::Error;

use crate::args::registry::{ConflictResolution, FlagClass, FlagRegistry};

/// Raw arguments could not be turned into an analyzable string sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid arguments: argument {index} is not valid UTF-8")]
    InvalidArguments { index: usize },
}

/// Convert raw process arguments into strings.
pub fn collect_args<I>(raw: I) -> Result<Vec<String>, AnalysisError>
where
    I: IntoIterator<Item = OsString>,
{
    raw.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            arg.into_string()
                .map_err(|_| AnalysisError::InvalidArguments { index })
        })
        .collect()
}

/// Values of wrapper flags seen on the command line, keyed by canonical
/// name without leading dashes (`--env` → `env`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperFlags(BTreeMap<String, String>);

impl WrapperFlags {
    fn insert(&mut self, canonical: &str, value: String) {
        self.0
            .insert(canonical.trim_start_matches('-').to_string(), value);
    }

    /// Value for a flag. Boolean flags map to an empty string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name.trim_start_matches('-'))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name.trim_start_matches('-'))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Result of analyzing one invocation's arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentAnalysis {
    /// The argument list was empty.
    pub empty: bool,
    pub has_wrapper_flags: bool,
    /// Known or unknown tokens destined for the forwarded command were seen.
    pub has_forwarded_flags: bool,
    pub help_requested: bool,
    pub version_requested: bool,
    /// Residual is non-empty and nothing else claimed the invocation.
    pub requires_passthrough: bool,
    pub wrapper_flags: WrapperFlags,
    /// Tokens for the forwarded command, verbatim and in original order.
    pub forwarded_args: Vec<String>,
    /// Notes produced during the scan (missing values, conflict notices).
    pub warnings: Vec<String>,
}

/// Splits argv using a shared [`FlagRegistry`].
#[derive(Debug, Clone)]
pub struct ArgumentAnalyzer {
    registry: Arc<FlagRegistry>,
}

impl ArgumentAnalyzer {
    pub fn new(registry: Arc<FlagRegistry>) -> Self {
        Self { registry }
    }

    /// Analyze arguments (program name already stripped). Total over any
    /// string slice.
    pub fn analyze(&self, args: &[String]) -> ArgumentAnalysis {
        let registry = &*self.registry;
        let mut analysis = ArgumentAnalysis {
            empty: args.is_empty(),
            ..ArgumentAnalysis::default()
        };

        let mut i = 0;
        while let Some(token) = args.get(i) {
            if registry.is_help(token) {
                analysis.help_requested = true;
                i += 1;
                continue;
            }
            if registry.is_version(token) {
                analysis.version_requested = true;
                i += 1;
                continue;
            }

            let (name, inline_value) = split_inline_value(registry, token);

            match registry.classify(name) {
                FlagClass::Wrapper => {
                    analysis.has_wrapper_flags = true;
                    let canonical = registry.normalize(name);

                    let value = if let Some(value) = inline_value {
                        i += 1;
                        value.to_string()
                    } else if registry.takes_value(name) {
                        match args.get(i + 1) {
                            Some(next) => {
                                i += 2;
                                next.clone()
                            }
                            None => {
                                analysis
                                    .warnings
                                    .push(format!("{canonical}: missing required value"));
                                i += 1;
                                String::new()
                            }
                        }
                    } else {
                        i += 1;
                        String::new()
                    };

                    analysis.wrapper_flags.insert(canonical, value);
                }
                FlagClass::Forwarded | FlagClass::Unknown => {
                    analysis.has_forwarded_flags = true;
                    if let Some(rule) = registry.conflict_for(name) {
                        if rule.resolution != ConflictResolution::WrapperTakesPrecedence {
                            analysis.warnings.push(rule.message.clone());
                        }
                    }

                    analysis.forwarded_args.push(token.clone());
                    let consumes_next = inline_value.is_none() && registry.takes_value(name);
                    match args.get(i + 1) {
                        Some(next) if consumes_next => {
                            analysis.forwarded_args.push(next.clone());
                            i += 2;
                        }
                        _ => i += 1,
                    }
                }
            }
        }

        analysis.requires_passthrough = !analysis.forwarded_args.is_empty()
            && !analysis.has_wrapper_flags
            && !analysis.help_requested
            && !analysis.version_requested;

        analysis
    }

    /// Wrapper flag values and the forwarded residual, without the rest of the analysis.
    pub fn extract_wrapper_flags(&self, args: &[String]) -> (WrapperFlags, Vec<String>) {
        let analysis = self.analyze(args);
        (analysis.wrapper_flags, analysis.forwarded_args)
    }
}

/// `--name=value` for a known value-taking flag → (`--name`, Some(`value`)).
/// Any other token is returned whole.
fn split_inline_value<'a>(registry: &FlagRegistry, token: &'a str) -> (&'a str, Option<&'a str>) {
    if token.starts_with("--") {
        if let Some((name, value)) = token.split_once('=') {
            if registry.takes_value(name) {
                return (name, Some(value));
            }
        }
    }
    (token, None)
}

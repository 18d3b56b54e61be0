//! Delegation engine: analysis → strategy → validated plan.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::args::{collect_args, ArgumentAnalysis, ArgumentAnalyzer, FlagRegistry};
use crate::config::Environment;
use crate::delegation::env_builder::EnvSet;
use crate::delegation::error::DelegationError;
use crate::delegation::plan::{validate_plan, DelegationPlan, PlanMetadata};
use crate::delegation::strategy::Strategy;

type WorkingDirResolver = fn() -> io::Result<PathBuf>;

/// Stateless between calls; share freely.
#[derive(Debug, Clone)]
pub struct DelegationEngine {
    analyzer: ArgumentAnalyzer,
    resolve_working_dir: WorkingDirResolver,
}

impl DelegationEngine {
    pub fn new(registry: Arc<FlagRegistry>) -> Self {
        Self {
            analyzer: ArgumentAnalyzer::new(registry),
            resolve_working_dir: std::env::current_dir,
        }
    }

    /// Replace how the working directory is resolved.
    pub fn with_working_dir_resolver(mut self, resolver: WorkingDirResolver) -> Self {
        self.resolve_working_dir = resolver;
        self
    }

    pub fn analyze(&self, args: &[String]) -> ArgumentAnalysis {
        self.analyzer.analyze(args)
    }

    /// Pick exactly one strategy. Help beats version beats everything else.
    pub fn choose_strategy(&self, analysis: &ArgumentAnalysis) -> Strategy {
        if analysis.help_requested {
            Strategy::ShowCombinedHelp
        } else if analysis.version_requested {
            Strategy::ShowVersion
        } else if analysis.empty {
            Strategy::HandleInternally
        } else if analysis.has_forwarded_flags || analysis.requires_passthrough {
            // A resolved environment is always injected; DelegateDirectly is
            // never chosen here.
            Strategy::DelegateWithEnvironment
        } else {
            Strategy::HandleInternally
        }
    }

    /// Analyze `args`, choose a strategy and build a validated plan.
    pub fn build_plan(
        &self,
        environment: Option<&Environment>,
        args: &[String],
    ) -> Result<DelegationPlan, DelegationError> {
        let analysis = self.analyze(args);
        let strategy = self.choose_strategy(&analysis);
        self.assemble(strategy, environment, args, analysis.forwarded_args)
    }

    /// [`build_plan`](Self::build_plan) over raw OS arguments.
    pub fn build_plan_os<I>(
        &self,
        environment: Option<&Environment>,
        raw: I,
    ) -> Result<DelegationPlan, DelegationError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = collect_args(raw)?;
        self.build_plan(environment, &args)
    }

    /// Plan for launching the forwarded command after ccenv handled the
    /// invocation itself (e.g. picked an environment interactively).
    pub fn build_launch_plan(
        &self,
        environment: &Environment,
        args: &[String],
    ) -> Result<DelegationPlan, DelegationError> {
        let forwarded = self.analyze(args).forwarded_args;
        self.assemble(
            Strategy::DelegateWithEnvironment,
            Some(environment),
            args,
            forwarded,
        )
    }

    fn assemble(
        &self,
        strategy: Strategy,
        environment: Option<&Environment>,
        args: &[String],
        claude_args: Vec<String>,
    ) -> Result<DelegationPlan, DelegationError> {
        let env_vars = match environment {
            Some(env) if strategy.requires_environment() => {
                EnvSet::new().with_environment(env).build()
            }
            _ => BTreeMap::new(),
        };

        let working_dir = match (self.resolve_working_dir)() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!("Working directory unavailable, continuing without: {e}");
                PathBuf::new()
            }
        };

        let plan = DelegationPlan {
            strategy,
            environment: environment.cloned(),
            claude_args,
            env_vars,
            working_dir,
            metadata: PlanMetadata {
                plan_id: Uuid::new_v4(),
                original_args: args.to_vec(),
                strategy,
                reason: strategy.reason(),
                created_at: Utc::now(),
                estimated_overhead: strategy.estimated_overhead(),
            },
        };

        tracing::debug!(
            plan_id = %plan.metadata.plan_id,
            strategy = %strategy,
            overhead_ms = strategy.estimated_overhead().as_millis() as u64,
            "{}",
            strategy.reason()
        );

        validate_plan(&plan)?;
        Ok(plan)
    }
}

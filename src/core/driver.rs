use crate::config::BenchConfig;
use crate::core::locator::ProblemLocator;
use crate::core::metrics;
use crate::domain::model::{
    DomainCorpus, Invocation, InvocationStatus, ProblemInstance, ResultRow, ResultTable, RunStatus,
    SolverKind, SolverRun,
};
use crate::domain::ports::SolverInvoker;
use crate::utils::error::{BenchError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PassSummary {
    pub started_at: DateTime<Utc>,
    pub domains: usize,
    pub problems: usize,
    pub runs: usize,
    pub failed_runs: usize,
    pub empty_plans: usize,
    pub wall_time: Duration,
}

#[derive(Debug, Clone)]
pub struct BenchmarkPass {
    pub table: ResultTable,
    pub summary: PassSummary,
}

/// Runs every configured solver on every selected problem, one process at a
/// time, and collects the rows in enumeration order.
pub struct BenchmarkDriver<I: SolverInvoker> {
    config: BenchConfig,
    locator: ProblemLocator,
    invoker: I,
}

impl<I: SolverInvoker> BenchmarkDriver<I> {
    pub fn new(config: BenchConfig, invoker: I) -> Self {
        let locator = ProblemLocator::from_config(&config);
        Self {
            config,
            locator,
            invoker,
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Resolves every domain up front so a broken corpus aborts the pass
    /// before any solver is launched.
    pub fn locate_all(&self) -> Result<Vec<DomainCorpus>> {
        let mut seen = HashSet::new();
        let mut corpora = Vec::with_capacity(self.config.domains.len());

        for domain in &self.config.domains {
            if !seen.insert(domain.as_str()) {
                return Err(BenchError::InvalidConfigValueError {
                    field: "domains".to_string(),
                    value: domain.clone(),
                    reason: "Duplicate entry".to_string(),
                });
            }
            let corpus = self.locator.locate(domain)?;
            tracing::info!(
                "📂 {}: {} problem(s) selected",
                domain,
                corpus.problems.len()
            );
            corpora.push(corpus);
        }

        Ok(corpora)
    }

    pub async fn run(&self) -> Result<BenchmarkPass> {
        let corpora = self.locate_all()?;
        Ok(self.run_corpora(&corpora).await)
    }

    pub async fn run_corpora(&self, corpora: &[DomainCorpus]) -> BenchmarkPass {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut table = ResultTable::new();
        let mut failed_runs = 0;
        let mut empty_plans = 0;

        for corpus in corpora {
            for problem in &corpus.problems {
                let sat = self
                    .run_solver(SolverKind::Sat, &corpus.domain.description_file, problem)
                    .await;
                let hsp = self
                    .run_solver(SolverKind::Hsp, &corpus.domain.description_file, problem)
                    .await;

                for run in [&sat, &hsp] {
                    if run.is_failed() {
                        failed_runs += 1;
                    } else if run.makespan == 0 {
                        empty_plans += 1;
                    }
                }

                table.push(ResultRow {
                    domain: corpus.domain.name.clone(),
                    problem: problem.file_name(),
                    sat,
                    hsp,
                });
            }
        }

        let summary = PassSummary {
            started_at,
            domains: corpora.len(),
            problems: table.len(),
            runs: table.len() * SolverKind::ALL.len(),
            failed_runs,
            empty_plans,
            wall_time: start.elapsed(),
        };

        BenchmarkPass { table, summary }
    }

    async fn run_solver(
        &self,
        solver: SolverKind,
        domain_file: &Path,
        problem: &ProblemInstance,
    ) -> SolverRun {
        let invocation = self
            .invoker
            .invoke(solver, domain_file, &problem.path)
            .await;
        let run = solver_run_from(&invocation);

        match &invocation.status {
            InvocationStatus::LaunchFailed { reason } => {
                tracing::warn!(
                    "⚠️ {} could not run {}/{}: {}",
                    solver,
                    problem.domain,
                    problem.file_name(),
                    reason
                );
            }
            InvocationStatus::Exited { code } if *code != Some(0) => {
                tracing::warn!(
                    "⚠️ {} exited with {:?} on {}/{}",
                    solver,
                    code,
                    problem.domain,
                    problem.file_name()
                );
                if !invocation.stderr.trim().is_empty() {
                    tracing::debug!("{} stderr: {}", solver, invocation.stderr.trim());
                }
            }
            InvocationStatus::Exited { .. } => {}
        }

        tracing::info!(
            "{} {}/{}: makespan={} time={:.3}s",
            solver,
            problem.domain,
            problem.file_name(),
            run.makespan,
            run.time_secs()
        );
        tracing::debug!("{} plan: {:?}", solver, metrics::plan_steps(&invocation.stdout));

        run
    }
}

/// Reduces a raw invocation to its measured outcome.
///
/// A process that could not be launched is `Failed` with makespan 0; a
/// process that ran is `Completed` regardless of its exit code.
pub fn solver_run_from(invocation: &Invocation) -> SolverRun {
    match invocation.status {
        InvocationStatus::Exited { .. } => SolverRun {
            elapsed: invocation.elapsed,
            makespan: metrics::makespan(&invocation.stdout),
            status: RunStatus::Completed,
        },
        InvocationStatus::LaunchFailed { .. } => SolverRun {
            elapsed: invocation.elapsed,
            makespan: 0,
            status: RunStatus::Failed,
        },
    }
}

use crate::config::{BenchConfig, SolverSpec};
use crate::domain::model::{Invocation, SolverKind};
use crate::domain::ports::SolverInvoker;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Launches each solver as a fresh child process and waits for it to exit.
///
/// No timeout is applied: a solver that never exits blocks the pass.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    specs: HashMap<SolverKind, SolverSpec>,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        let specs = SolverKind::ALL
            .into_iter()
            .filter_map(|kind| config.solver(kind).map(|spec| (kind, spec.clone())))
            .collect();
        Self { specs }
    }

    pub fn with_solver(mut self, solver: SolverKind, spec: SolverSpec) -> Self {
        self.specs.insert(solver, spec);
        self
    }

    fn command_for(spec: &SolverSpec, domain_file: &Path, problem_file: &Path) -> Command {
        let mut command = Command::new(&spec.program);
        command
            .args(spec.render_args(domain_file, problem_file))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

#[async_trait]
impl SolverInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        solver: SolverKind,
        domain_file: &Path,
        problem_file: &Path,
    ) -> Invocation {
        let Some(spec) = self.specs.get(&solver) else {
            return Invocation::launch_failed(
                Duration::ZERO,
                format!("no launch command configured for {}", solver),
            );
        };

        let mut command = Self::command_for(spec, domain_file, problem_file);
        tracing::debug!("Launching {}: {:?}", solver, command.as_std());

        let start = Instant::now();
        match command.output().await {
            Ok(output) => Invocation::exited(
                start.elapsed(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
                output.status.code(),
            ),
            Err(e) => Invocation::launch_failed(
                start.elapsed(),
                format!("failed to launch '{}': {}", spec.program, e),
            ),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A planning domain and its `domain.pddl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub description_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    pub domain: String,
    pub path: PathBuf,
}

impl ProblemInstance {
    /// 檔名（例如 `p01.pddl`），寫入結果表時使用
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A domain together with the problems selected for it.
#[derive(Debug, Clone)]
pub struct DomainCorpus {
    pub domain: Domain,
    pub problems: Vec<ProblemInstance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Sat,
    Hsp,
}

impl SolverKind {
    /// Fixed run order within a row.
    pub const ALL: [SolverKind; 2] = [SolverKind::Sat, SolverKind::Hsp];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Sat => "SAT",
            SolverKind::Hsp => "HSP",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStatus {
    Exited { code: Option<i32> },
    LaunchFailed { reason: String },
}

/// Raw outcome of one solver process.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub elapsed: Duration,
    pub stdout: String,
    pub stderr: String,
    pub status: InvocationStatus,
}

impl Invocation {
    pub fn exited(elapsed: Duration, stdout: String, stderr: String, code: Option<i32>) -> Self {
        Self {
            elapsed,
            stdout,
            stderr,
            status: InvocationStatus::Exited { code },
        }
    }

    pub fn launch_failed(elapsed: Duration, reason: impl Into<String>) -> Self {
        Self {
            elapsed,
            stdout: String::new(),
            stderr: String::new(),
            status: InvocationStatus::LaunchFailed {
                reason: reason.into(),
            },
        }
    }

    pub fn launched(&self) -> bool {
        matches!(self.status, InvocationStatus::Exited { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverRun {
    pub elapsed: Duration,
    pub makespan: u32,
    pub status: RunStatus,
}

impl SolverRun {
    /// Elapsed seconds rounded to millisecond precision.
    pub fn time_secs(&self) -> f64 {
        round_millis(self.elapsed.as_secs_f64())
    }

    pub fn is_failed(&self) -> bool {
        self.status == RunStatus::Failed
    }
}

pub fn round_millis(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub domain: String,
    pub problem: String,
    pub sat: SolverRun,
    pub hsp: SolverRun,
}

impl ResultRow {
    pub fn run(&self, solver: SolverKind) -> &SolverRun {
        match solver {
            SolverKind::Sat => &self.sat,
            SolverKind::Hsp => &self.hsp,
        }
    }

    pub fn to_record(&self) -> ComparisonRecord {
        ComparisonRecord {
            domain: self.domain.clone(),
            problem: self.problem.clone(),
            sat_makespan: self.sat.makespan,
            sat_time: self.sat.time_secs(),
            hsp_makespan: self.hsp.makespan,
            hsp_time: self.hsp.time_secs(),
        }
    }
}

/// One line of the comparison CSV. Field order is the header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub domain: String,
    pub problem: String,
    pub sat_makespan: u32,
    pub sat_time: f64,
    pub hsp_makespan: u32,
    pub hsp_time: f64,
}

pub const RESULT_HEADER: [&str; 6] = [
    "domain",
    "problem",
    "sat_makespan",
    "sat_time",
    "hsp_makespan",
    "hsp_time",
];

#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = ComparisonRecord> + '_ {
        self.rows.iter().map(ResultRow::to_record)
    }
}

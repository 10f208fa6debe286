//! Reading side of the comparison CSV.
//!
//! The chart renderer consumes the same file the benchmark pass writes. This
//! module parses it the way the renderer does (whitespace around fields is
//! ignored), groups rows per domain, and describes the two charts expected
//! for each domain.

use crate::domain::model::{round_millis, ComparisonRecord};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

pub fn read_results<R: std::io::Read>(reader: R) -> Result<Vec<ComparisonRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in reader.deserialize() {
        let record: ComparisonRecord = record?;
        records.push(record);
    }
    Ok(records)
}

/// Reads a results table through the same storage the benchmark pass writes with.
pub async fn read_results_from<S: Storage>(
    storage: &S,
    path: &Path,
) -> Result<Vec<ComparisonRecord>> {
    let data = storage.read_file(&path.to_string_lossy()).await?;
    read_results(data.as_slice())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Time,
    Makespan,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Time, ChartKind::Makespan];

    fn file_suffix(&self) -> &'static str {
        match self {
            ChartKind::Time => "time_comparison",
            ChartKind::Makespan => "makespan_comparison",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::Time => "Time (seconds)",
            ChartKind::Makespan => "Plan size (makespan)",
        }
    }

    pub fn title(&self, domain: &str) -> String {
        match self {
            ChartKind::Time => format!("{} - Execution time (SAT vs HSP)", capitalize(domain)),
            ChartKind::Makespan => {
                format!("{} - Plan size (makespan SAT vs HSP)", capitalize(domain))
            }
        }
    }
}

pub fn chart_file_name(domain: &str, kind: ChartKind) -> String {
    format!("{}_{}.png", domain, kind.file_suffix())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Grouped-bar chart data: one bar pair per problem.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub file_name: String,
    pub y_label: String,
    pub problems: Vec<String>,
    pub sat: Vec<f64>,
    pub hsp: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct DomainResults {
    pub domain: String,
    pub records: Vec<ComparisonRecord>,
}

/// Groups rows by domain, keeping first-appearance order for domains and
/// file order for rows.
pub fn group_by_domain(records: Vec<ComparisonRecord>) -> Vec<DomainResults> {
    let mut groups: Vec<DomainResults> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.domain == record.domain) {
            Some(group) => group.records.push(record),
            None => groups.push(DomainResults {
                domain: record.domain.clone(),
                records: vec![record],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverSummary {
    pub total_time: f64,
    pub mean_time: f64,
    pub total_makespan: u64,
    pub mean_makespan: f64,
    pub no_plan: usize,
}

impl SolverSummary {
    fn from_pairs(pairs: impl Iterator<Item = (u32, f64)>) -> Self {
        let mut count = 0usize;
        let mut total_time = 0.0;
        let mut total_makespan = 0u64;
        let mut no_plan = 0;
        for (makespan, time) in pairs {
            count += 1;
            total_time += time;
            total_makespan += u64::from(makespan);
            if makespan == 0 {
                no_plan += 1;
            }
        }

        let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };
        Self {
            total_time: round_millis(total_time),
            mean_time: round_millis(mean(total_time)),
            total_makespan,
            mean_makespan: round_millis(mean(total_makespan as f64)),
            no_plan,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub problems: usize,
    pub sat: SolverSummary,
    pub hsp: SolverSummary,
    pub charts: Vec<String>,
}

impl DomainResults {
    pub fn chart(&self, kind: ChartKind) -> ChartSpec {
        let (sat, hsp): (Vec<f64>, Vec<f64>) = match kind {
            ChartKind::Time => (
                self.records.iter().map(|r| r.sat_time).collect(),
                self.records.iter().map(|r| r.hsp_time).collect(),
            ),
            ChartKind::Makespan => (
                self.records.iter().map(|r| f64::from(r.sat_makespan)).collect(),
                self.records.iter().map(|r| f64::from(r.hsp_makespan)).collect(),
            ),
        };

        ChartSpec {
            kind,
            title: kind.title(&self.domain),
            file_name: chart_file_name(&self.domain, kind),
            y_label: kind.y_label().to_string(),
            problems: self.records.iter().map(|r| r.problem.clone()).collect(),
            sat,
            hsp,
        }
    }

    pub fn summary(&self) -> DomainSummary {
        DomainSummary {
            domain: self.domain.clone(),
            problems: self.records.len(),
            sat: SolverSummary::from_pairs(self.records.iter().map(|r| (r.sat_makespan, r.sat_time))),
            hsp: SolverSummary::from_pairs(self.records.iter().map(|r| (r.hsp_makespan, r.hsp_time))),
            charts: ChartKind::ALL
                .iter()
                .map(|kind| chart_file_name(&self.domain, *kind))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub domains: Vec<DomainSummary>,
}

impl Report {
    pub fn from_records(source: impl Into<String>, records: Vec<ComparisonRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            domains: group_by_domain(records)
                .iter()
                .map(DomainResults::summary)
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<14} {:>8} {:>10} {:>10} {:>9} {:>9} {:>7} {:>7}",
            "domain", "problems", "sat_time", "hsp_time", "sat_plan", "hsp_plan", "sat_0", "hsp_0"
        );
        for summary in &self.domains {
            let _ = writeln!(
                out,
                "{:<14} {:>8} {:>10.3} {:>10.3} {:>9.1} {:>9.1} {:>7} {:>7}",
                summary.domain,
                summary.problems,
                summary.sat.mean_time,
                summary.hsp.mean_time,
                summary.sat.mean_makespan,
                summary.hsp.mean_makespan,
                summary.sat.no_plan,
                summary.hsp.no_plan
            );
        }
        out
    }
}

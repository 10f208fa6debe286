use crate::core::driver::{BenchmarkDriver, BenchmarkPass};
use crate::core::writer::CsvResultWriter;
use crate::domain::model::DomainCorpus;
use crate::domain::ports::{SolverInvoker, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct BenchEngine<I: SolverInvoker, S: Storage> {
    driver: BenchmarkDriver<I>,
    writer: CsvResultWriter<S>,
}

impl<I: SolverInvoker, S: Storage> BenchEngine<I, S> {
    pub fn new(driver: BenchmarkDriver<I>, storage: S) -> Self {
        Self {
            driver,
            writer: CsvResultWriter::new(storage),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.driver.config().output_path
    }

    /// Problems a pass would run, without launching anything.
    pub fn plan(&self) -> Result<Vec<DomainCorpus>> {
        self.driver.locate_all()
    }

    pub async fn run(&self) -> Result<BenchmarkPass> {
        tracing::info!("🚀 Starting benchmark pass");

        // Locate
        let corpora = self.driver.locate_all()?;
        let total: usize = corpora.iter().map(|c| c.problems.len()).sum();
        tracing::info!(
            "Selected {} problem(s) across {} domain(s)",
            total,
            corpora.len()
        );

        // Run
        let pass = self.driver.run_corpora(&corpora).await;

        // Write
        self.writer.write(&pass.table, self.output_path()).await?;

        let summary = &pass.summary;
        tracing::info!(
            "📊 {} row(s), {} run(s), {} launch failure(s), {} empty plan(s), wall time {:.3}s",
            summary.problems,
            summary.runs,
            summary.failed_runs,
            summary.empty_plans,
            summary.wall_time.as_secs_f64()
        );
        tracing::info!("📁 Results saved to: {}", self.output_path().display());

        Ok(pass)
    }
}

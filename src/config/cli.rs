use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "planner-bench")]
#[command(about = "Benchmark the SAT and HSP planners over a PDDL corpus")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every solver on every selected problem and write the comparison CSV
    Run(RunArgs),
    /// Summarise a comparison CSV per domain
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "planner-bench.toml")]
    pub config: PathBuf,

    /// Override `output_path` from the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the selected problems without launching any solver
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Comparison CSV produced by `run`
    #[arg(short, long, default_value = "comparison_results.csv")]
    pub input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

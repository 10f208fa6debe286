pub mod bench_config;
#[cfg(feature = "cli")]
pub mod cli;

pub use bench_config::{BenchConfig, SolverSpec};
#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, ProcessInvoker};
pub use config::{BenchConfig, SolverSpec};
pub use self::core::{driver::BenchmarkDriver, engine::BenchEngine};
pub use utils::error::{BenchError, Result};

#[cfg(feature = "cli")]
pub use config::CliConfig;

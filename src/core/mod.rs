pub mod driver;
pub mod engine;
pub mod locator;
pub mod metrics;
pub mod report;
pub mod writer;

pub use crate::domain::model::{ResultRow, ResultTable, SolverKind, SolverRun};
pub use crate::domain::ports::{SolverInvoker, Storage};
pub use crate::utils::error::Result;

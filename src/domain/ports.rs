use crate::domain::model::{Invocation, SolverKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Runs one solver on one (domain, problem) pair.
///
/// Implementations never fail: launch problems are reported through
/// [`Invocation::status`] together with the time spent so far.
#[async_trait]
pub trait SolverInvoker: Send + Sync {
    async fn invoke(&self, solver: SolverKind, domain_file: &Path, problem_file: &Path)
        -> Invocation;
}

use crate::domain::model::{ResultTable, RESULT_HEADER};
use crate::domain::ports::Storage;
use crate::utils::error::{BenchError, Result};
use std::path::Path;

/// Encodes the table as CSV. The header is written even for an empty table.
pub fn encode_table(table: &ResultTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(RESULT_HEADER)?;
    for record in table.records() {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| BenchError::ResultTableError {
            message: format!("failed to flush CSV buffer: {}", e),
        })
}

pub struct CsvResultWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvResultWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Replaces whatever is at `path` with the full table.
    pub async fn write(&self, table: &ResultTable, path: &Path) -> Result<()> {
        let data = encode_table(table)?;
        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            table.len(),
            data.len(),
            path.display()
        );
        self.storage.write_file(&path.to_string_lossy(), &data).await
    }
}

//! Reading exported story rows from disk

use anyhow::{Context, Result};
use insight_model::{load_records, LoadedRecords};
use std::fs;
use std::path::Path;

/// Read and normalise one JSON export
///
/// Rows that fail to decode are logged and left in
/// [`LoadedRecords::rejected`]; they never fail the load.
///
/// # Errors
/// Fails when the file cannot be read or is not a JSON array.
pub fn read_records(path: &Path) -> Result<LoadedRecords> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading input {}", path.display()))?;
    let loaded =
        load_records(&raw).with_context(|| format!("decoding input {}", path.display()))?;

    for rejected in &loaded.rejected {
        tracing::warn!(input = %path.display(), "skipping {rejected}");
    }
    tracing::info!(
        input = %path.display(),
        records = loaded.records.len(),
        rejected = loaded.rejected.len(),
        undated = loaded.undated_count(),
        "loaded story rows"
    );
    Ok(loaded)
}

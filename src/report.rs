use std::path::Path;

use crate::error::AppResult;
use crate::probe::ResultLog;

/// Renders the aggregated run report as indented JSON.
///
/// Top-level keys come out lexicographically sorted because the log is
/// keyed by a `BTreeMap`.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render(log: &ResultLog) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(log)?)
}

/// Writes an already-rendered report to a file.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn write_report<P: AsRef<Path>>(path: P, report: &str) -> AppResult<()> {
    std::fs::write(path, report)?;
    Ok(())
}

use std::path::Path;

use crate::error::Result;

use super::model::Table;

/// Default file name offered for the exported comparison.
pub const EXPORT_FILE_NAME: &str = "comparison_results.csv";

/// MIME type of the export artifact.
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Serialize `table` as comma-separated UTF-8 with a header row.
///
/// Quoting follows the `csv` crate defaults (RFC 4180); nothing is dropped.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| e.into_error().into())
}

/// Write `table` as CSV to `path`.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let bytes = to_csv(table)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "Exported {} rows ({EXPORT_MIME_TYPE}) to {}",
        table.len(),
        path.display()
    );
    Ok(())
}

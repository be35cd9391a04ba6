//! CSV export of a result table, for the CLI's `--output-table` path.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::engine::{CellValue, ResultRow};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write result rows as CSV with a header derived from the first row.
///
/// All rows produced by one intent share the same columns, so the first
/// row's column order defines the file layout.
pub fn write_csv(path: impl AsRef<Path>, rows: &[ResultRow]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(&path)?;

    if let Some(first) = rows.first() {
        writer.write_record(first.column_names())?;
    }

    for row in rows {
        let record: Vec<String> = row.columns().map(|(_, value)| cell_text(value)).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    info!(
        "Wrote {} result rows to {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => format!("{f:.2}"),
        CellValue::Text(s) => s.clone(),
    }
}

//! Data loaders: normalize raw tabular input (Excel workbook or CSV pair)
//! into the in-memory Daily/Monthly tables the engine queries.

pub mod csv_loader;
pub mod excel_loader;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Missing column '{column}' in sheet {sheet}")]
    MissingColumn { sheet: String, column: String },

    #[error("Invalid data at row {row}, col {col}: {msg}")]
    InvalidData { row: usize, col: usize, msg: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Loader for the weather Excel workbook.
//!
//! # Expected Workbook Structure
//!
//! ```text
//! Sheet "Daily":   Date | State | District | Daily Precipitation
//! Sheet "Monthly": Year | Month | State | District | Monthly Precipitation
//! ```
//!
//! Row 1 of each sheet is the header; column positions are resolved by
//! header name, not index. Rows with an unparseable precipitation value are
//! skipped with a warning rather than coerced to zero.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::LoadError;
use crate::tables::{DailyRecord, MonthlyRecord, WeatherTables};

pub const DAILY_SHEET: &str = "Daily";
pub const MONTHLY_SHEET: &str = "Monthly";

/// Load both tables from a workbook on disk.
///
/// Parsing is synchronous; async callers should use `spawn_blocking`.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<WeatherTables, LoadError> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| LoadError::WorkbookOpen(e.to_string()))?;
    tables_from_workbook(&mut workbook)
}

/// Load both tables from an in-memory workbook (e.g. an HTTP upload).
pub fn load_workbook_bytes(bytes: Vec<u8>) -> Result<WeatherTables, LoadError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| LoadError::WorkbookOpen(e.to_string()))?;
    tables_from_workbook(&mut workbook)
}

fn tables_from_workbook<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
) -> Result<WeatherTables, LoadError> {
    let daily_range = workbook
        .worksheet_range(DAILY_SHEET)
        .map_err(|_| LoadError::SheetNotFound(DAILY_SHEET.to_string()))?;
    let monthly_range = workbook
        .worksheet_range(MONTHLY_SHEET)
        .map_err(|_| LoadError::SheetNotFound(MONTHLY_SHEET.to_string()))?;

    let daily = parse_daily_sheet(&daily_range)?;
    let monthly = parse_monthly_sheet(&monthly_range)?;

    info!(
        "Loaded workbook: {} daily rows, {} monthly rows",
        daily.len(),
        monthly.len()
    );

    Ok(WeatherTables::new(daily, monthly))
}

fn parse_daily_sheet(range: &Range<Data>) -> Result<Vec<DailyRecord>, LoadError> {
    let date_col = column_index(range, DAILY_SHEET, "Date")?;
    let state_col = column_index(range, DAILY_SHEET, "State")?;
    let district_col = column_index(range, DAILY_SHEET, "District")?;
    let precip_col = column_index(range, DAILY_SHEET, "Daily Precipitation")?;

    let mut records = Vec::new();

    for row_idx in 1..range.height() {
        let date = match parse_date(range, row_idx, date_col)? {
            Some(d) => d,
            None => {
                debug!("Skipping daily row {} without a date", row_idx);
                continue;
            }
        };
        let (Some(state), Some(district)) = (
            parse_text(range, row_idx, state_col),
            parse_text(range, row_idx, district_col),
        ) else {
            warn!("Skipping daily row {} with missing state/district", row_idx);
            continue;
        };
        let Some(precipitation) = parse_precipitation(range, row_idx, precip_col)? else {
            warn!("Skipping daily row {} with missing precipitation", row_idx);
            continue;
        };

        records.push(DailyRecord {
            date,
            state,
            district,
            precipitation,
        });
    }

    Ok(records)
}

fn parse_monthly_sheet(range: &Range<Data>) -> Result<Vec<MonthlyRecord>, LoadError> {
    let year_col = column_index(range, MONTHLY_SHEET, "Year")?;
    let month_col = column_index(range, MONTHLY_SHEET, "Month")?;
    let state_col = column_index(range, MONTHLY_SHEET, "State")?;
    let district_col = column_index(range, MONTHLY_SHEET, "District")?;
    let precip_col = column_index(range, MONTHLY_SHEET, "Monthly Precipitation")?;

    let mut records = Vec::new();

    for row_idx in 1..range.height() {
        let (Some(year), Some(month)) = (
            parse_integer(range, row_idx, year_col)?,
            parse_integer(range, row_idx, month_col)?,
        ) else {
            debug!("Skipping monthly row {} without year/month", row_idx);
            continue;
        };
        let (Some(state), Some(district)) = (
            parse_text(range, row_idx, state_col),
            parse_text(range, row_idx, district_col),
        ) else {
            warn!(
                "Skipping monthly row {} with missing state/district",
                row_idx
            );
            continue;
        };
        let Some(precipitation) = parse_precipitation(range, row_idx, precip_col)? else {
            warn!(
                "Skipping monthly row {} with missing precipitation",
                row_idx
            );
            continue;
        };

        records.push(MonthlyRecord {
            year: year as i32,
            month: month as u32,
            state,
            district,
            precipitation,
        });
    }

    Ok(records)
}

/// Resolve a column by header name (row 1, case-insensitive).
fn column_index(range: &Range<Data>, sheet: &str, header: &str) -> Result<usize, LoadError> {
    for col in 0..range.width() {
        if let Some(Data::String(s)) = range.get((0, col)) {
            if s.trim().eq_ignore_ascii_case(header) {
                return Ok(col);
            }
        }
    }
    Err(LoadError::MissingColumn {
        sheet: sheet.to_string(),
        column: header.to_string(),
    })
}

/// Parse a date cell (ISO string, Excel datetime, or Excel date serial).
fn parse_date(
    range: &Range<Data>,
    row: usize,
    col: usize,
) -> Result<Option<NaiveDate>, LoadError> {
    match range.get((row, col)) {
        Some(Data::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| LoadError::InvalidDate(s.clone())),
        Some(Data::DateTime(excel_date)) => {
            let timestamp = excel_date.as_datetime();
            Ok(timestamp.map(|dt| dt.date()))
        }
        Some(Data::Float(f)) => {
            // Excel date serial number
            let days = *f as i64;
            let base_date = NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch");
            Ok(Some(base_date + chrono::Duration::days(days)))
        }
        Some(Data::Int(i)) => {
            let base_date = NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch");
            Ok(Some(base_date + chrono::Duration::days(*i)))
        }
        Some(Data::Empty) | None => Ok(None),
        other => Err(LoadError::InvalidData {
            row,
            col,
            msg: format!("Expected date, got: {other:?}"),
        }),
    }
}

fn parse_precipitation(
    range: &Range<Data>,
    row: usize,
    col: usize,
) -> Result<Option<f64>, LoadError> {
    match range.get((row, col)) {
        Some(Data::Float(f)) => Ok(Some(*f)),
        Some(Data::Int(i)) => Ok(Some(*i as f64)),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
                Ok(None)
            } else {
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| LoadError::InvalidData {
                        row,
                        col,
                        msg: format!("Cannot parse precipitation value: {s}"),
                    })
            }
        }
        Some(Data::Empty) | None => Ok(None),
        other => Err(LoadError::InvalidData {
            row,
            col,
            msg: format!("Expected number, got: {other:?}"),
        }),
    }
}

fn parse_integer(range: &Range<Data>, row: usize, col: usize) -> Result<Option<i64>, LoadError> {
    match range.get((row, col)) {
        Some(Data::Int(i)) => Ok(Some(*i)),
        Some(Data::Float(f)) => Ok(Some(*f as i64)),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| LoadError::InvalidData {
                        row,
                        col,
                        msg: format!("Cannot parse integer value: {s}"),
                    })
            }
        }
        Some(Data::Empty) | None => Ok(None),
        other => Err(LoadError::InvalidData {
            row,
            col,
            msg: format!("Expected integer, got: {other:?}"),
        }),
    }
}

fn parse_text(range: &Range<Data>, row: usize, col: usize) -> Option<String> {
    match range.get((row, col)) {
        Some(Data::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Data::Int(i)) => Some(i.to_string()),
        Some(Data::Float(f)) => Some(format!("{f}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_workbook_is_open_error() {
        let result = load_workbook("/nonexistent/weather.xlsx");
        assert!(matches!(result, Err(LoadError::WorkbookOpen(_))));
    }

    #[test]
    fn test_garbage_bytes_are_open_error() {
        let result = load_workbook_bytes(b"not an xlsx file".to_vec());
        assert!(matches!(result, Err(LoadError::WorkbookOpen(_))));
    }
}

//! Loader for the CSV pair produced by `generate-mock-data` (and any other
//! tool emitting the documented schema).
//!
//! `daily.csv`:   Date,State,District,Daily Precipitation
//! `monthly.csv`: Year,Month,State,District,Monthly Precipitation

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::LoadError;
use crate::tables::{DailyRecord, MonthlyRecord, WeatherTables};

#[derive(Debug, Deserialize)]
struct DailyCsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Daily Precipitation")]
    precipitation: f64,
}

#[derive(Debug, Deserialize)]
struct MonthlyCsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Monthly Precipitation")]
    precipitation: f64,
}

/// Load both tables from a pair of CSV files on disk.
pub fn load_csv_pair(
    daily_path: impl AsRef<Path>,
    monthly_path: impl AsRef<Path>,
) -> Result<WeatherTables, LoadError> {
    let daily = read_daily(csv::Reader::from_path(daily_path)?)?;
    let monthly = read_monthly(csv::Reader::from_path(monthly_path)?)?;

    info!(
        "Loaded CSV pair: {} daily rows, {} monthly rows",
        daily.len(),
        monthly.len()
    );

    Ok(WeatherTables::new(daily, monthly))
}

/// Load both tables from in-memory CSV contents (e.g. HTTP uploads).
pub fn load_csv_pair_bytes(daily: &[u8], monthly: &[u8]) -> Result<WeatherTables, LoadError> {
    Ok(WeatherTables::new(
        read_daily(csv::Reader::from_reader(daily))?,
        read_monthly(csv::Reader::from_reader(monthly))?,
    ))
}

fn read_daily<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<DailyRecord>, LoadError> {
    let mut records = Vec::new();
    for row in reader.deserialize::<DailyCsvRow>() {
        let row = row?;
        records.push(DailyRecord {
            date: row.date,
            state: row.state.trim().to_string(),
            district: row.district.trim().to_string(),
            precipitation: row.precipitation,
        });
    }
    Ok(records)
}

fn read_monthly<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<MonthlyRecord>, LoadError> {
    let mut records = Vec::new();
    for row in reader.deserialize::<MonthlyCsvRow>() {
        let row = row?;
        records.push(MonthlyRecord {
            year: row.year,
            month: row.month,
            state: row.state.trim().to_string(),
            district: row.district.trim().to_string(),
            precipitation: row.precipitation,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY_CSV: &str = "\
Date,State,District,Daily Precipitation
2025-11-08,Uttar Pradesh,Lucknow,3.0
2025-11-09,Maharashtra, Mumbai ,8.0
";

    const MONTHLY_CSV: &str = "\
Year,Month,State,District,Monthly Precipitation
2001,8,Maharashtra,Pune,210.0
";

    #[test]
    fn test_load_csv_pair_bytes() {
        let tables = load_csv_pair_bytes(DAILY_CSV.as_bytes(), MONTHLY_CSV.as_bytes()).unwrap();

        assert_eq!(tables.daily.len(), 2);
        assert_eq!(tables.monthly.len(), 1);
        assert_eq!(tables.daily[0].date, "2025-11-08".parse().unwrap());
        // Whitespace around names is trimmed during normalization
        assert_eq!(tables.daily[1].district, "Mumbai");
        assert_eq!(tables.monthly[0].precipitation, 210.0);
    }

    #[test]
    fn test_load_csv_pair_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let daily_path = dir.path().join("daily.csv");
        let monthly_path = dir.path().join("monthly.csv");
        std::fs::write(&daily_path, DAILY_CSV).unwrap();
        std::fs::write(&monthly_path, MONTHLY_CSV).unwrap();

        let tables = load_csv_pair(&daily_path, &monthly_path).unwrap();
        assert_eq!(tables.daily.len(), 2);
        assert_eq!(tables.monthly.len(), 1);
    }

    #[test]
    fn test_malformed_precipitation_is_error() {
        let bad = "Date,State,District,Daily Precipitation\n2025-11-08,UP,Lucknow,wet\n";
        let result = load_csv_pair_bytes(bad.as_bytes(), MONTHLY_CSV.as_bytes());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }
}

//! Query planner: executes a parsed `Intent` against the loaded tables and
//! produces ordered result rows.
//!
//! Aggregation is always computed from the rows, never passed through, so
//! output is deterministic regardless of incidental table row order.

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::intent::Intent;
use crate::tables::WeatherTables;

/// A single cell in a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One result row: ordered (column, value) pairs, serialized as a JSON
/// object. Column order is part of the output contract, so this is a list
/// rather than a map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRow {
    columns: Vec<(String, CellValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.columns.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &(String, CellValue)> {
        self.columns.iter()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Execute an intent against the tables.
///
/// Every requested unit (year x month, or state) produces exactly one row,
/// zero-valued when no data matches, so downstream consumers never have to
/// guess which periods were skipped.
pub fn run(intent: &Intent, tables: &WeatherTables) -> Vec<ResultRow> {
    match intent {
        Intent::MonthlyAggregateByDistrict {
            district,
            months,
            start_year,
            end_year,
        } => run_monthly_aggregate(tables, district, months, *start_year, *end_year),
        Intent::WeeklyCompareByState {
            states,
            year,
            month,
            week_index,
        } => run_weekly_compare(tables, states, *year, *month, *week_index),
        Intent::ParseFailure { .. } => Vec::new(),
    }
}

fn run_monthly_aggregate(
    tables: &WeatherTables,
    district: &str,
    months: &[u32],
    start_year: i32,
    end_year: i32,
) -> Vec<ResultRow> {
    let mut rows = Vec::new();

    for year in start_year..=end_year {
        // Months stay in the order the question phrased them
        for &month in months {
            let total = monthly_total(tables, district, year, month);

            let mut row = ResultRow::new();
            row.push("Year", CellValue::Int(year as i64));
            row.push("Month", CellValue::Text(month_name(month).to_string()));
            row.push("District", CellValue::Text(district.to_string()));
            row.push("Precipitation", CellValue::Float(total));
            rows.push(row);
        }
    }

    rows
}

/// Monthly total for one (district, year, month).
///
/// Prefers the Monthly table; when no monthly row exists for the period, the
/// total is recomputed by summing Daily records instead of omitting the
/// period. Missing/NaN precipitation values are excluded from sums.
fn monthly_total(tables: &WeatherTables, district: &str, year: i32, month: u32) -> f64 {
    let mut found_monthly = false;
    let mut total = 0.0;

    for record in &tables.monthly {
        if record.year == year
            && record.month == month
            && record.district.eq_ignore_ascii_case(district)
        {
            found_monthly = true;
            if !record.precipitation.is_nan() {
                total += record.precipitation;
            }
        }
    }

    if found_monthly {
        return total;
    }

    debug!(
        "No monthly row for ({}, {}, {}), falling back to daily aggregation",
        district, year, month
    );

    tables
        .daily
        .iter()
        .filter(|r| {
            r.date.year() == year
                && r.date.month() == month
                && r.district.eq_ignore_ascii_case(district)
        })
        .map(|r| r.precipitation)
        .filter(|p| !p.is_nan())
        .sum()
}

fn run_weekly_compare(
    tables: &WeatherTables,
    states: &[String; 2],
    year: i32,
    month: u32,
    week_index: u32,
) -> Vec<ResultRow> {
    let (week_start, week_end) = week_window(year, month, week_index);

    states
        .iter()
        .map(|state| {
            let total: f64 = tables
                .daily
                .iter()
                .filter(|r| {
                    r.date >= week_start
                        && r.date <= week_end
                        && r.state.eq_ignore_ascii_case(state)
                })
                .map(|r| r.precipitation)
                .filter(|p| !p.is_nan())
                .sum();

            let mut row = ResultRow::new();
            row.push("State", CellValue::Text(state.clone()));
            row.push("Week Start", CellValue::Text(week_start.to_string()));
            row.push("Week End", CellValue::Text(week_end.to_string()));
            row.push("Total Precipitation", CellValue::Float(total));
            row
        })
        .collect()
}

/// Inclusive calendar window for the 1-based week of a month: week N covers
/// days (N-1)*7+1 through N*7, capped at the month's last day.
pub fn week_window(year: i32, month: u32, week_index: u32) -> (NaiveDate, NaiveDate) {
    let last_day = days_in_month(year, month);
    let start_day = ((week_index - 1) * 7 + 1).min(last_day);
    let end_day = (week_index * 7).min(last_day);

    // Day numbers are clamped to the month, so construction cannot fail
    let start = NaiveDate::from_ymd_opt(year, month, start_day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start"));
    let end = NaiveDate::from_ymd_opt(year, month, end_day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start"));

    (start, end)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

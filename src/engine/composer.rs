//! Answer composer: pure formatting over already-computed result rows.

use super::intent::Intent;
use super::planner::{month_name, CellValue, ResultRow};

/// Per-period values are spelled out only for short result tables; longer
/// ones get a grand total plus the table itself.
const MAX_SPELLED_OUT_PERIODS: usize = 4;

/// Fixed guidance shown for unrecognized questions.
pub const PARSE_FAILURE_MESSAGE: &str = "Sorry, I could not understand that question. Two \
    question patterns are supported: the monthly total for one district over a year range \
    (e.g. \"What is the total precipitation amount of district Pune in each August and \
    September from year 2001 to 2005?\") and a weekly comparison of two states (e.g. \
    \"Compare the precipitation amount of state Uttar Pradesh and state Maharashtra in \
    the second week of Nov 2025\").";

/// Render the summary sentence for an intent and its result rows.
pub fn compose(intent: &Intent, rows: &[ResultRow]) -> String {
    match intent {
        Intent::MonthlyAggregateByDistrict {
            district,
            months,
            start_year,
            end_year,
        } => compose_monthly_aggregate(rows, district, months, *start_year, *end_year),
        Intent::WeeklyCompareByState {
            states,
            year,
            month,
            week_index,
        } => compose_weekly_compare(rows, states, *year, *month, *week_index),
        Intent::ParseFailure { .. } => PARSE_FAILURE_MESSAGE.to_string(),
    }
}

fn compose_monthly_aggregate(
    rows: &[ResultRow],
    district: &str,
    months: &[u32],
    start_year: i32,
    end_year: i32,
) -> String {
    let month_list = join_names(&months.iter().map(|&m| month_name(m)).collect::<Vec<_>>());
    let range = if start_year == end_year {
        format!("in {start_year}")
    } else {
        format!("from {start_year} to {end_year}")
    };

    if rows.len() <= MAX_SPELLED_OUT_PERIODS {
        let periods: Vec<String> = rows
            .iter()
            .map(|row| {
                format!(
                    "{:.2} in {} {}",
                    float_cell(row, "Precipitation"),
                    text_cell(row, "Month"),
                    int_cell(row, "Year"),
                )
            })
            .collect();
        return format!(
            "District {district} recorded {} ({month_list} {range}).",
            join_names(&periods.iter().map(String::as_str).collect::<Vec<_>>())
        );
    }

    let total: f64 = rows.iter().map(|row| float_cell(row, "Precipitation")).sum();
    format!(
        "District {district} recorded a total of {total:.2} across {month_list} {range}. \
         See the result table for the per-period breakdown."
    )
}

fn compose_weekly_compare(
    rows: &[ResultRow],
    states: &[String; 2],
    year: i32,
    month: u32,
    week_index: u32,
) -> String {
    let window = match rows.first() {
        Some(row) => format!(
            " ({} to {})",
            text_cell(row, "Week Start"),
            text_cell(row, "Week End")
        ),
        None => String::new(),
    };

    let totals: Vec<f64> = rows
        .iter()
        .map(|row| float_cell(row, "Total Precipitation"))
        .collect();
    let (total_a, total_b) = (
        totals.first().copied().unwrap_or(0.0),
        totals.get(1).copied().unwrap_or(0.0),
    );

    let verdict = if total_a > total_b {
        format!("{} had the higher total", states[0])
    } else if total_b > total_a {
        format!("{} had the higher total", states[1])
    } else {
        "both states were equal".to_string()
    };

    format!(
        "In the {} week of {} {}{}, {} recorded {:.2} and {} recorded {:.2}; {}.",
        ordinal_name(week_index),
        month_name(month),
        year,
        window,
        states[0],
        total_a,
        states[1],
        total_b,
        verdict,
    )
}

fn ordinal_name(index: u32) -> &'static str {
    match index {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        _ => "requested",
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

fn float_cell(row: &ResultRow, column: &str) -> f64 {
    match row.get(column) {
        Some(CellValue::Float(f)) => *f,
        Some(CellValue::Int(i)) => *i as f64,
        _ => 0.0,
    }
}

fn int_cell(row: &ResultRow, column: &str) -> i64 {
    match row.get(column) {
        Some(CellValue::Int(i)) => *i,
        _ => 0,
    }
}

fn text_cell<'a>(row: &'a ResultRow, column: &str) -> &'a str {
    match row.get(column) {
        Some(CellValue::Text(s)) => s.as_str(),
        _ => "",
    }
}

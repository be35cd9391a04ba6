// End-to-end tests for the question-answering engine: question text in,
// answer text plus result table out.

mod common;

use common::fixture_tables;
use precip_qa_service::engine::{self, composer, CellValue};

fn float(row: &precip_qa_service::engine::ResultRow, column: &str) -> f64 {
    match row.get(column) {
        Some(CellValue::Float(f)) => *f,
        other => panic!("Expected float in {column}, got {other:?}"),
    }
}

#[test]
fn test_aggregate_question_produces_one_row_per_period() {
    let tables = fixture_tables();
    let result = engine::answer(
        "What is the total precipitation amount of district Pune in each August and \
         September from year 2001 to 2005?",
        &tables,
    );

    // 5 years x 2 months, zero-data periods included
    assert_eq!(result.table.len(), 10);
    assert!(result.text.contains("Pune"));
    assert!(result.text.contains("from 2001 to 2005"));

    // Row order is (year asc, months in phrasing order)
    assert_eq!(
        result.table[0].get("Year"),
        Some(&CellValue::Int(2001))
    );
    assert_eq!(
        result.table[0].get("Month"),
        Some(&CellValue::Text("August".to_string()))
    );
    assert_eq!(float(&result.table[0], "Precipitation"), 154.0);
}

#[test]
fn test_aggregate_question_uses_daily_fallback_for_missing_month() {
    let tables = fixture_tables();
    let result = engine::answer(
        "What is the total precipitation amount of district Pune in each August and \
         September from year 2001 to 2005?",
        &tables,
    );

    // (2003, August) has no monthly row; the three daily rows sum to 42.0
    let row_2003_aug = &result.table[4];
    assert_eq!(row_2003_aug.get("Year"), Some(&CellValue::Int(2003)));
    assert_eq!(
        row_2003_aug.get("Month"),
        Some(&CellValue::Text("August".to_string()))
    );
    assert_eq!(float(row_2003_aug, "Precipitation"), 42.0);
}

#[test]
fn test_compare_question_computes_week_window_and_winner() {
    let tables = fixture_tables();
    let result = engine::answer(
        "Compare the precipitation amount of state Uttar Pradesh and state Maharashtra \
         in the second week of Nov 2025 in a table format.",
        &tables,
    );

    assert_eq!(result.table.len(), 2);
    assert_eq!(
        result.table[0].get("Week Start"),
        Some(&CellValue::Text("2025-11-08".to_string()))
    );
    assert_eq!(
        result.table[0].get("Week End"),
        Some(&CellValue::Text("2025-11-14".to_string()))
    );

    // Uttar Pradesh: 3.0 + 4.0; Maharashtra: 8.0 + 2.5
    assert_eq!(float(&result.table[0], "Total Precipitation"), 7.0);
    assert_eq!(float(&result.table[1], "Total Precipitation"), 10.5);
    assert!(result.text.contains("Maharashtra had the higher total"));
}

#[test]
fn test_unrecognized_question_gets_fixed_guidance() {
    let tables = fixture_tables();
    let result = engine::answer("asdkjasd random text", &tables);

    assert_eq!(result.text, composer::PARSE_FAILURE_MESSAGE);
    assert!(result.table.is_empty());
}

#[test]
fn test_unknown_district_yields_zero_rows_not_failure() {
    let tables = fixture_tables();
    let result = engine::answer(
        "What is the total precipitation amount of district Nagpur in each August from \
         year 2001 to 2002?",
        &tables,
    );

    assert_eq!(result.table.len(), 2);
    for row in &result.table {
        assert_eq!(float(row, "Precipitation"), 0.0);
    }
    assert_ne!(result.text, composer::PARSE_FAILURE_MESSAGE);
}

#[test]
fn test_answers_are_deterministic() {
    let tables = fixture_tables();
    let question = "What is the total precipitation amount of district Pune in each August \
                    and September from year 2001 to 2005?";

    let first = engine::answer(question, &tables);
    let second = engine::answer(question, &tables);

    assert_eq!(first.text, second.text);
    assert_eq!(first.table, second.table);
}

//! Question-answering engine: parse a precipitation question, run the
//! matching query against the loaded tables, compose a textual answer.

pub mod composer;
pub mod intent;
pub mod parser;
pub mod planner;

pub use intent::{Intent, KnownEntities};
pub use planner::{CellValue, ResultRow};

use tracing::{debug, info};

use crate::tables::WeatherTables;

/// Complete answer to one question: a short summary sentence plus the full
/// result table the sentence was computed from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Answer {
    pub text: String,
    pub table: Vec<ResultRow>,
}

/// Engine entry point: one question in, one answer out.
///
/// Pure and synchronous. The tables are read-only for the duration of the
/// call; repeated calls with identical inputs return identical output.
pub fn answer(question: &str, tables: &WeatherTables) -> Answer {
    let entities = KnownEntities::from_tables(tables);
    let intent = parser::parse(question, &entities);
    debug!("Parsed intent: {:?}", intent);

    let table = planner::run(&intent, tables);
    let text = composer::compose(&intent, &table);

    info!(
        "Answered question ({} result rows): {:?}",
        table.len(),
        question
    );

    Answer { text, table }
}

use crate::tables::WeatherTables;

/// Structured outcome of parsing a question: which query to run, with what
/// parameters. Parse failure is a representable variant, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Sum precipitation for one district across a set of months and an
    /// inclusive year range. Months keep the order they appeared in the
    /// question.
    MonthlyAggregateByDistrict {
        district: String,
        months: Vec<u32>,
        start_year: i32,
        end_year: i32,
    },
    /// Contrast weekly precipitation totals for two states, in the order
    /// they appeared in the question.
    WeeklyCompareByState {
        states: [String; 2],
        year: i32,
        month: u32,
        week_index: u32,
    },
    /// Neither supported pattern matched.
    ParseFailure { raw_text: String },
}

/// Distinct district/state names present in the loaded tables.
///
/// Passed into the parser explicitly so entity matching stays a pure
/// function of (question, data) rather than depending on hidden state.
#[derive(Debug, Clone, Default)]
pub struct KnownEntities {
    pub districts: Vec<String>,
    pub states: Vec<String>,
}

impl KnownEntities {
    pub fn from_tables(tables: &WeatherTables) -> Self {
        Self {
            districts: tables.district_names(),
            states: tables.state_names(),
        }
    }
}

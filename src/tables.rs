use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily precipitation observation for a district.
///
/// The source data is trusted to be pre-deduplicated on
/// (state, district, date); the engine only reads these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub state: String,
    pub district: String,
    pub precipitation: f64,
}

/// One monthly precipitation total for a district, keyed by
/// (state, district, year, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year: i32,
    pub month: u32,
    pub state: String,
    pub district: String,
    pub precipitation: f64,
}

/// Read-only snapshot of the two loaded precipitation tables.
///
/// A snapshot is built once by a loader and never mutated afterwards, so it
/// can be shared behind an `Arc` across concurrent requests without locking.
#[derive(Debug, Clone, Default)]
pub struct WeatherTables {
    pub daily: Vec<DailyRecord>,
    pub monthly: Vec<MonthlyRecord>,
}

impl WeatherTables {
    pub fn new(daily: Vec<DailyRecord>, monthly: Vec<MonthlyRecord>) -> Self {
        Self { daily, monthly }
    }

    /// Distinct district names present in either table, sorted for
    /// deterministic matching behavior.
    pub fn district_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .daily
            .iter()
            .map(|r| r.district.clone())
            .chain(self.monthly.iter().map(|r| r.district.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Distinct state names present in either table, sorted.
    pub fn state_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .daily
            .iter()
            .map(|r| r.state.clone())
            .chain(self.monthly.iter().map(|r| r.state.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.monthly.is_empty()
    }
}

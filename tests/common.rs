use precip_qa_service::tables::{DailyRecord, MonthlyRecord, WeatherTables};

/// In-memory equivalent of the generate-mock-data dataset.
pub fn fixture_tables() -> WeatherTables {
    let daily = vec![
        daily("2000-08-05", "Uttar Pradesh", "Lucknow", 10.0),
        daily("2000-08-06", "Uttar Pradesh", "Lucknow", 12.5),
        // August 2003 in Pune: daily rows only, no monthly total
        daily("2003-08-01", "Maharashtra", "Pune", 12.0),
        daily("2003-08-15", "Maharashtra", "Pune", 20.0),
        daily("2003-08-30", "Maharashtra", "Pune", 10.0),
        // Second week of November 2025
        daily("2025-11-08", "Uttar Pradesh", "Lucknow", 3.0),
        daily("2025-11-09", "Maharashtra", "Mumbai", 8.0),
        daily("2025-11-10", "Uttar Pradesh", "Kanpur", 4.0),
        daily("2025-11-12", "Maharashtra", "Pune", 2.5),
        // Outside that window
        daily("2025-11-07", "Uttar Pradesh", "Lucknow", 50.0),
        daily("2025-11-15", "Maharashtra", "Mumbai", 50.0),
    ];

    let monthly = vec![
        monthly_row(2001, 8, "Maharashtra", "Pune", 154.0),
        monthly_row(2001, 9, "Maharashtra", "Pune", 140.0),
        monthly_row(2002, 8, "Maharashtra", "Pune", 160.0),
        monthly_row(2002, 9, "Maharashtra", "Pune", 150.0),
        // (Pune, 2003, August) deliberately absent
        monthly_row(2003, 9, "Maharashtra", "Pune", 148.0),
        monthly_row(2004, 8, "Maharashtra", "Pune", 170.0),
        monthly_row(2004, 9, "Maharashtra", "Pune", 160.0),
        monthly_row(2005, 8, "Maharashtra", "Pune", 175.0),
        monthly_row(2005, 9, "Maharashtra", "Pune", 165.0),
    ];

    WeatherTables::new(daily, monthly)
}

fn daily(date: &str, state: &str, district: &str, precipitation: f64) -> DailyRecord {
    DailyRecord {
        date: date.parse().expect("valid fixture date"),
        state: state.to_string(),
        district: district.to_string(),
        precipitation,
    }
}

fn monthly_row(year: i32, month: u32, state: &str, district: &str, precipitation: f64) -> MonthlyRecord {
    MonthlyRecord {
        year,
        month,
        state: state.to_string(),
        district: district.to_string(),
        precipitation,
    }
}

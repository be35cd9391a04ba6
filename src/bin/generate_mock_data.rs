use std::path::PathBuf;

use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "generate-mock-data")]
#[command(about = "Write a small deterministic mock weather dataset as CSV", long_about = None)]
struct Cli {
    /// Directory to write daily.csv and monthly.csv into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

// Date, State, District, Daily Precipitation
const DAILY_ROWS: &[(&str, &str, &str, f64)] = &[
    ("2000-01-01", "Uttar Pradesh", "Lucknow", 2.40),
    ("2000-01-01", "Uttar Pradesh", "Kanpur", 2.35),
    ("2000-01-01", "Maharashtra", "Mumbai", 1.87),
    ("2000-01-01", "Maharashtra", "Pune", 6.52),
    ("2000-08-05", "Uttar Pradesh", "Lucknow", 10.0),
    ("2000-08-06", "Uttar Pradesh", "Lucknow", 12.5),
    ("2000-09-10", "Uttar Pradesh", "Lucknow", 5.0),
    // August 2003 in Pune has daily rows but no monthly total, so the
    // fallback aggregation path has data to work with
    ("2003-08-01", "Maharashtra", "Pune", 12.0),
    ("2003-08-15", "Maharashtra", "Pune", 20.0),
    ("2003-08-30", "Maharashtra", "Pune", 10.0),
    ("2025-11-08", "Uttar Pradesh", "Lucknow", 3.0),
    ("2025-11-09", "Maharashtra", "Mumbai", 8.0),
    ("2025-11-10", "Uttar Pradesh", "Kanpur", 4.0),
    ("2025-11-12", "Maharashtra", "Pune", 2.5),
];

// Year, Month, State, District, Monthly Precipitation
const MONTHLY_ROWS: &[(i32, u32, &str, &str, f64)] = &[
    (2000, 1, "Uttar Pradesh", "Lucknow", 138.47),
    (2000, 1, "Uttar Pradesh", "Kanpur", 127.21),
    (2000, 1, "Maharashtra", "Mumbai", 192.72),
    (2000, 1, "Maharashtra", "Pune", 154.38),
    (2001, 8, "Uttar Pradesh", "Lucknow", 210.0),
    (2001, 9, "Uttar Pradesh", "Lucknow", 180.0),
    (2002, 8, "Uttar Pradesh", "Lucknow", 220.0),
    (2002, 9, "Uttar Pradesh", "Lucknow", 190.0),
    (2003, 8, "Uttar Pradesh", "Lucknow", 230.0),
    (2003, 9, "Uttar Pradesh", "Lucknow", 200.0),
    (2004, 8, "Uttar Pradesh", "Lucknow", 240.0),
    (2004, 9, "Uttar Pradesh", "Lucknow", 210.0),
    (2005, 8, "Uttar Pradesh", "Lucknow", 250.0),
    (2005, 9, "Uttar Pradesh", "Lucknow", 220.0),
    (2001, 8, "Maharashtra", "Pune", 154.0),
    (2001, 9, "Maharashtra", "Pune", 140.0),
    (2002, 8, "Maharashtra", "Pune", 160.0),
    (2002, 9, "Maharashtra", "Pune", 150.0),
    // (Pune, 2003, August) is deliberately absent; see the daily rows
    (2003, 9, "Maharashtra", "Pune", 148.0),
    (2004, 8, "Maharashtra", "Pune", 170.0),
    (2004, 9, "Maharashtra", "Pune", 160.0),
    (2005, 8, "Maharashtra", "Pune", 175.0),
    (2005, 9, "Maharashtra", "Pune", 165.0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.out_dir)?;

    let daily_path = cli.out_dir.join("daily.csv");
    let monthly_path = cli.out_dir.join("monthly.csv");

    let mut daily = csv::Writer::from_path(&daily_path)?;
    daily.write_record(["Date", "State", "District", "Daily Precipitation"])?;
    for (date, state, district, precip) in DAILY_ROWS {
        daily.write_record([
            date.to_string(),
            state.to_string(),
            district.to_string(),
            precip.to_string(),
        ])?;
    }
    daily.flush()?;
    info!("Wrote {} daily rows to {}", DAILY_ROWS.len(), daily_path.display());

    let mut monthly = csv::Writer::from_path(&monthly_path)?;
    monthly.write_record(["Year", "Month", "State", "District", "Monthly Precipitation"])?;
    for (year, month, state, district, precip) in MONTHLY_ROWS {
        monthly.write_record([
            year.to_string(),
            month.to_string(),
            state.to_string(),
            district.to_string(),
            precip.to_string(),
        ])?;
    }
    monthly.flush()?;
    info!(
        "Wrote {} monthly rows to {}",
        MONTHLY_ROWS.len(),
        monthly_path.display()
    );

    println!("Mock dataset written:");
    println!("  {}", daily_path.display());
    println!("  {}", monthly_path.display());

    Ok(())
}

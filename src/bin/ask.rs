use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use precip_qa_service::engine::{self, CellValue, ResultRow};
use precip_qa_service::export;
use precip_qa_service::loader::{csv_loader, excel_loader};
use precip_qa_service::tables::WeatherTables;

#[derive(Parser)]
#[command(name = "ask")]
#[command(about = "Answer precipitation questions against a weather dataset", long_about = None)]
struct Cli {
    /// Excel workbook with Daily and Monthly sheets
    #[arg(short, long, env = "WORKBOOK_PATH")]
    workbook: Option<PathBuf>,

    /// Daily CSV table (use together with --monthly instead of --workbook)
    #[arg(long)]
    daily: Option<PathBuf>,

    /// Monthly CSV table (use together with --daily instead of --workbook)
    #[arg(long)]
    monthly: Option<PathBuf>,

    /// Question in natural language; prompts interactively if omitted
    #[arg(short, long)]
    question: Option<String>,

    /// Optional path to save the full answer table as CSV
    #[arg(short, long)]
    output_table: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let tables = load_tables(&cli)?;
    info!(
        "Loaded {} daily rows, {} monthly rows",
        tables.daily.len(),
        tables.monthly.len()
    );

    let question = match cli.question {
        Some(q) => q,
        None => {
            println!("Enter your precipitation question:");
            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        }
    };

    let result = engine::answer(&question, &tables);

    println!("\nAnswer:");
    println!("{}", result.text);

    if !result.table.is_empty() {
        println!("\nTable preview (first 10 rows):");
        print_table(&result.table, 10);

        if let Some(path) = &cli.output_table {
            export::write_csv(path, &result.table)?;
            println!("\nFull table written to: {}", path.display());
        }
    }

    Ok(())
}

fn load_tables(cli: &Cli) -> Result<WeatherTables, Box<dyn std::error::Error>> {
    match (&cli.workbook, &cli.daily, &cli.monthly) {
        (Some(workbook), None, None) => Ok(excel_loader::load_workbook(workbook)?),
        (None, Some(daily), Some(monthly)) => Ok(csv_loader::load_csv_pair(daily, monthly)?),
        _ => Err("Provide either --workbook, or both --daily and --monthly".into()),
    }
}

/// Print an aligned plain-text preview of the result table.
fn print_table(rows: &[ResultRow], limit: usize) {
    let Some(first) = rows.first() else {
        return;
    };

    let headers = first.column_names();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    let rendered: Vec<Vec<String>> = rows
        .iter()
        .take(limit)
        .map(|row| {
            row.columns()
                .enumerate()
                .map(|(i, (_, value))| {
                    let text = cell_text(value);
                    if i < widths.len() && text.len() > widths[i] {
                        widths[i] = text.len();
                    }
                    text
                })
                .collect()
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in rendered {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }

    if rows.len() > limit {
        println!("... {} more rows", rows.len() - limit);
    }
}

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => format!("{f:.2}"),
        CellValue::Text(s) => s.clone(),
    }
}

//! Example: Count rows per day in a delimited export with Sieve.
//!
//! Usage:
//!   cargo run --example aggregate -- <file_path> [start] [end]
//!
//! Example:
//!   cargo run --example aggregate -- downloads.csv 2021-01-01 2021-12-31

use std::env;
use std::error::Error;

use sieve::{DateRange, Sieve};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example aggregate -- <file_path> [start] [end]");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let text = std::fs::read_to_string(file_path)?;
    let range = DateRange::parse(args.get(2).map(String::as_str), args.get(3).map(String::as_str))?;

    let report = Sieve::new().with_range(range).aggregate(&text)?;

    let separator = "=".repeat(40);
    println!("{}", separator);
    println!("Sieve Aggregation: {}", file_path);
    println!("{}", separator);
    println!();

    println!("## Source");
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.source.row_count);
    println!("  Hash: {}", report.source.hash);
    println!();

    println!("## Layout");
    println!(
        "  Date column: {} {:?}",
        report.layout.date_column, report.layout.date_header
    );
    println!(
        "  Convention: {} ({:?}, {} day-first / {} month-first votes)",
        report.layout.convention,
        report.layout.convention_source,
        report.layout.votes.day_first,
        report.layout.votes.month_first
    );
    println!();

    println!("## Daily counts ({} days)", report.summary.total_days);
    for record in &report.records {
        println!("  {}  {:>6}", record.date, record.count);
    }
    println!();

    println!("## Summary");
    println!("  Total rows counted: {}", report.summary.total_count);
    println!("  Unreadable dates: {}", report.summary.rows_unparsed);
    println!("  Outside range: {}", report.summary.rows_out_of_range);
    println!("{}", separator);

    Ok(())
}

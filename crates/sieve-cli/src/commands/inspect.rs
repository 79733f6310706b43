//! Inspect command - show how a delimited export would be read.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use sieve::{ConventionSource, Sieve, SieveConfig, SourceMetadata, TableLayout};

use super::{CommandResult, Outcome, read_input};

#[derive(Serialize)]
struct InspectReport {
    source: SourceMetadata,
    layout: TableLayout,
}

pub fn run(
    file: PathBuf,
    delimiter: Option<char>,
    json: bool,
    mut config: SieveConfig,
) -> CommandResult {
    if delimiter.is_some() {
        config.tokenizer.delimiter = delimiter;
    }
    config.validate()?;

    let text = read_input(&file)?;
    let (source, layout) = Sieve::with_config(config).inspect(&text)?;

    if json {
        let report = InspectReport { source, layout };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(Outcome::Done);
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    println!();
    println!("  {:14} {} ({:?})", "Format:", source.format, source.delimiter);
    println!("  {:14} {}", "Rows:", source.row_count);
    println!("  {:14} {}", "Columns:", source.column_count);
    println!("  {:14} {}", "Hash:", source.hash);
    println!(
        "  {:14} {}",
        "Header row:",
        if layout.has_header { "yes" } else { "no" }
    );
    println!(
        "  {:14} {}{}",
        "Date column:",
        layout.date_column + 1,
        layout
            .date_header
            .as_ref()
            .map(|h| format!(" ({})", h))
            .unwrap_or_default()
    );

    let source_note = match layout.convention_source {
        ConventionSource::Override => "set explicitly".to_string(),
        ConventionSource::Vote => format!(
            "vote {}-{}",
            layout.votes.day_first, layout.votes.month_first
        ),
        ConventionSource::Default => format!(
            "default; vote tied {}-{}",
            layout.votes.day_first, layout.votes.month_first
        ),
    };
    println!(
        "  {:14} {} ({})",
        "Convention:",
        layout.convention.to_string().green().bold(),
        source_note
    );

    Ok(Outcome::Done)
}

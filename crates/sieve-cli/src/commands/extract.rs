//! Extract command - pull one indicator section out of a text document.

use std::path::PathBuf;

use colored::Colorize;
use sieve::sections::list_indicators;
use sieve::{IndicatorRecord, MetadataValue, ParagraphSource, PlainText, Sieve};

use super::{CommandResult, Outcome, read_input};

pub fn run(
    file: PathBuf,
    id: Option<String>,
    list: bool,
    json: bool,
    verbose: bool,
) -> CommandResult {
    let text = read_input(&file)?;
    let source = PlainText(&text);

    if list {
        let ids = list_indicators(&source.paragraphs()?);
        if json {
            println!("{}", serde_json::to_string_pretty(&ids)?);
        } else {
            for id in &ids {
                println!("{}", id);
            }
        }
        return Ok(if ids.is_empty() {
            Outcome::NotFound
        } else {
            Outcome::Done
        });
    }

    let id = id.ok_or("an indicator id is required")?;
    match Sieve::new().extract_from(&source, &id)? {
        Some(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record, verbose);
            }
            Ok(Outcome::Done)
        }
        None => {
            eprintln!(
                "{} indicator {} not found in {}",
                "Not found:".yellow().bold(),
                id,
                file.display()
            );
            Ok(Outcome::NotFound)
        }
    }
}

fn print_record(record: &IndicatorRecord, verbose: bool) {
    println!(
        "{} {}",
        record.id.cyan().bold(),
        record.name.as_deref().unwrap_or("").white().bold()
    );
    if let Some(status) = &record.status {
        println!("{} {}", "Status:".yellow(), status);
    }

    if !record.narrative.is_empty() {
        println!();
        println!("{}", record.narrative);
    }

    for (key, value) in &record.metadata_blocks {
        println!();
        println!("{}", format!("[{}]", key).blue().bold());
        match value {
            MetadataValue::Text(text) => println!("{}", text),
            MetadataValue::Links(links) => {
                for link in links {
                    println!("  {}", link);
                }
            }
        }
    }

    if verbose {
        println!();
        println!("{}", "Raw section:".yellow().bold());
        println!("{}", record.raw_section);
    }
}

//! Aggregate command - count rows per day in a delimited export.

use std::path::PathBuf;

use colored::Colorize;
use sieve::{AggregateReport, DateConvention, DateRange, Sieve, SieveConfig};

use super::{CommandResult, Outcome, read_input};
use crate::cli::OutputFormat;

pub struct AggregateArgs {
    pub file: PathBuf,
    pub start: Option<String>,
    pub end: Option<String>,
    pub convention: Option<DateConvention>,
    pub default_convention: Option<DateConvention>,
    pub delimiter: Option<char>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub fill_gaps: bool,
}

pub fn run(args: AggregateArgs, mut config: SieveConfig, verbose: bool) -> CommandResult {
    apply_overrides(&mut config, &args)?;

    let text = read_input(&args.file)?;
    let report = Sieve::with_config(config).aggregate(&text)?;

    let rendered = match args.format {
        OutputFormat::Json => report.to_json()? + "\n",
        OutputFormat::Csv => report.to_csv(args.fill_gaps)?,
        OutputFormat::Table => render_table(&report, args.fill_gaps, verbose),
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            eprintln!(
                "{} {} days ({} rows) to {}",
                "Wrote".green().bold(),
                report.summary.total_days,
                report.summary.total_count,
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(Outcome::Done)
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(
    config: &mut SieveConfig,
    args: &AggregateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.start.is_some() || args.end.is_some() {
        let parsed = DateRange::parse(args.start.as_deref(), args.end.as_deref())?;
        config.range = DateRange::new(
            parsed.start.or(config.range.start),
            parsed.end.or(config.range.end),
        )?;
    }
    if let Some(convention) = args.convention {
        config.inference.convention_override = Some(convention);
    }
    if let Some(convention) = args.default_convention {
        config.inference.default_convention = convention;
    }
    if args.delimiter.is_some() {
        config.tokenizer.delimiter = args.delimiter;
    }
    config.validate()?;
    Ok(())
}

fn render_table(report: &AggregateReport, fill_gaps: bool, verbose: bool) -> String {
    let mut out = String::new();
    let layout = &report.layout;

    let column = match &layout.date_header {
        Some(header) => format!("{} (column {})", header, layout.date_column + 1),
        None => format!("column {}", layout.date_column + 1),
    };
    out.push_str(&format!(
        "{} {}  {} {}\n",
        "Date column:".cyan().bold(),
        column,
        "Convention:".cyan().bold(),
        layout.convention
    ));

    if verbose {
        out.push_str(&format!(
            "  format={} rows={} votes: day-first={} month-first={} ({:?})\n",
            report.source.format,
            report.source.row_count,
            layout.votes.day_first,
            layout.votes.month_first,
            layout.convention_source
        ));
    }
    out.push('\n');

    let records = if fill_gaps {
        report.dense_records()
    } else {
        report.records.clone()
    };
    for record in &records {
        out.push_str(&format!("  {}  {:>8}\n", record.date, record.count));
    }

    let summary = &report.summary;
    let range = match (summary.range_start, summary.range_end) {
        (Some(start), Some(end)) => format!("{} to {}", start, end),
        _ => "no dates".to_string(),
    };
    out.push('\n');
    out.push_str(&format!(
        "{} days, {} rows ({})\n",
        summary.total_days.to_string().white().bold(),
        summary.total_count.to_string().white().bold(),
        range
    ));

    if summary.rows_unparsed > 0 || summary.rows_out_of_range > 0 {
        out.push_str(&format!(
            "Skipped {} unreadable and {} out-of-range rows\n",
            summary.rows_unparsed.to_string().yellow(),
            summary.rows_out_of_range.to_string().yellow()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AggregateArgs {
        AggregateArgs {
            file: PathBuf::from("unused.csv"),
            start: None,
            end: None,
            convention: None,
            default_convention: None,
            delimiter: None,
            format: OutputFormat::Table,
            output: None,
            fill_gaps: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = SieveConfig::default();
        config.range = DateRange::parse(Some("2021-01-01"), Some("2021-12-31")).unwrap();

        let mut a = args();
        a.end = Some("2021-06-30".into());
        a.convention = Some(DateConvention::MonthFirst);
        a.delimiter = Some(';');
        apply_overrides(&mut config, &a).unwrap();

        assert_eq!(config.range.start.map(|d| d.to_string()).as_deref(), Some("2021-01-01"));
        assert_eq!(config.range.end.map(|d| d.to_string()).as_deref(), Some("2021-06-30"));
        assert_eq!(config.inference.convention_override, Some(DateConvention::MonthFirst));
        assert_eq!(config.tokenizer.delimiter, Some(';'));
    }

    #[test]
    fn test_bad_bound_is_error() {
        let mut a = args();
        a.start = Some("yesterday-ish".into());
        assert!(apply_overrides(&mut SieveConfig::default(), &a).is_err());
    }

    #[test]
    fn test_render_table_lists_days() {
        colored::control::set_override(false);
        let report = Sieve::new()
            .aggregate("date\n2021-01-01\n2021-01-03\nnope\n")
            .unwrap();
        let out = render_table(&report, true, false);
        assert!(out.contains(&format!("  2021-01-02  {:>8}", 0)));
        assert!(out.contains("2 days, 2 rows (2021-01-01 to 2021-01-03)"));
        assert!(out.contains("Skipped 1 unreadable"));
    }
}

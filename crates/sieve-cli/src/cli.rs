//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sieve::DateConvention;

/// Sieve: normalize delimited exports and indicator documents
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count rows per day in a delimited export
    Aggregate {
        /// Path to the delimited file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// First day to include (inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Last day to include (inclusive)
        #[arg(long)]
        end: Option<String>,

        /// Read ambiguous dates with this convention instead of voting
        #[arg(long)]
        convention: Option<DateConvention>,

        /// Convention used when the vote is tied
        #[arg(long)]
        default_convention: Option<DateConvention>,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include zero-count days between the first and last day
        #[arg(long)]
        fill_gaps: bool,
    },

    /// Show how a delimited export would be read
    Inspect {
        /// Path to the delimited file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract an indicator section from a text document
    Extract {
        /// Path to the document (paragraphs separated by blank lines)
        #[arg(value_name = "DOCUMENT")]
        file: PathBuf,

        /// Indicator identifier, e.g. X-FIN-85
        #[arg(long, required_unless_present = "list", conflicts_with = "list")]
        id: Option<String>,

        /// List every indicator identifier in the document
        #[arg(long)]
        list: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aggregate_flags() {
        let cli = Cli::parse_from([
            "sieve",
            "aggregate",
            "downloads.csv",
            "--start",
            "2021-01-01",
            "--convention",
            "month-first",
            "--format",
            "csv",
            "--fill-gaps",
        ]);
        match cli.command {
            Commands::Aggregate {
                start,
                convention,
                format,
                fill_gaps,
                ..
            } => {
                assert_eq!(start.as_deref(), Some("2021-01-01"));
                assert_eq!(convention, Some(DateConvention::MonthFirst));
                assert_eq!(format, OutputFormat::Csv);
                assert!(fill_gaps);
            }
            _ => panic!("expected aggregate"),
        }
    }

    #[test]
    fn test_extract_requires_id_or_list() {
        assert!(Cli::try_parse_from(["sieve", "extract", "doc.txt"]).is_err());
        assert!(Cli::try_parse_from(["sieve", "extract", "doc.txt", "--list"]).is_ok());
        assert!(Cli::try_parse_from(["sieve", "extract", "doc.txt", "--id", "FW-134"]).is_ok());
    }
}

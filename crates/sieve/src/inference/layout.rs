//! Date column, header row and convention detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vote::ConventionVotes;
use crate::dates::{DateConvention, normalize_date};
use crate::error::{Result, SieveError};
use crate::input::Table;

/// Header fragments that mark a date column.
const DATE_HEADER_HINTS: &[&str] = &["date", "time", "timestamp"];

/// Inference configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Convention used when the vote is tied or empty.
    pub default_convention: DateConvention,
    /// Skip the vote and use this convention.
    pub convention_override: Option<DateConvention>,
    /// Number of rows after row 0 sampled for the vote.
    pub sample_rows: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            default_convention: DateConvention::DayFirst,
            convention_override: None,
            sample_rows: 50,
        }
    }
}

/// How the column convention was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionSource {
    /// Supplied by the caller.
    Override,
    /// One convention won the vote outright.
    Vote,
    /// Tie or no decisive votes; the default applied.
    Default,
}

/// How dates are laid out in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Zero-based index of the date column.
    pub date_column: usize,
    /// Header text of the date column, when row 0 is a header.
    pub date_header: Option<String>,
    /// Whether row 0 is a header.
    pub has_header: bool,
    /// Index of the first data row (1 with a header, otherwise 0).
    pub data_start: usize,
    /// Convention applied to ambiguous cells of the date column.
    pub convention: DateConvention,
    /// Where `convention` came from.
    pub convention_source: ConventionSource,
    /// Sampled votes (empty when overridden).
    pub votes: ConventionVotes,
}

/// Detects the [`TableLayout`] of a tokenized table.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    config: InferenceConfig,
}

impl LayoutAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Locate the date column and infer its convention.
    ///
    /// Fails only when the table is empty or no column looks like dates.
    pub fn analyze(&self, table: &Table) -> Result<TableLayout> {
        if table.is_empty() {
            return Err(SieveError::EmptyData("No rows found".to_string()));
        }

        let has_header = has_header_row(table);
        let date_column = find_date_column(table, self.config.default_convention).ok_or(
            SieveError::NoDateColumn {
                columns: table.column_count(),
            },
        )?;

        let date_header = if has_header {
            table.get(0, date_column).map(|s| s.trim().to_string())
        } else {
            None
        };

        let (convention, convention_source, votes) = match self.config.convention_override {
            Some(convention) => (convention, ConventionSource::Override, ConventionVotes::default()),
            None => {
                let votes = ConventionVotes::tally(table, date_column, self.config.sample_rows);
                match votes.winner() {
                    Some(winner) => (winner, ConventionSource::Vote, votes),
                    None => (self.config.default_convention, ConventionSource::Default, votes),
                }
            }
        };

        debug!(
            date_column,
            has_header,
            %convention,
            source = ?convention_source,
            day_first_votes = votes.day_first,
            month_first_votes = votes.month_first,
            "inferred table layout"
        );

        Ok(TableLayout {
            date_column,
            date_header,
            has_header,
            data_start: if has_header { 1 } else { 0 },
            convention,
            convention_source,
            votes,
        })
    }
}

/// Row 0 is a header when any of its cells contains a letter.
pub fn has_header_row(table: &Table) -> bool {
    table
        .row(0)
        .is_some_and(|row| row.iter().any(|cell| cell.chars().any(char::is_alphabetic)))
}

/// Find the date column: first by header text in row 0, then by probing row 1.
pub fn find_date_column(table: &Table, convention: DateConvention) -> Option<usize> {
    let by_header = table.row(0).and_then(|header| {
        header.iter().position(|cell| {
            let lower = cell.to_lowercase();
            DATE_HEADER_HINTS.iter().any(|hint| lower.contains(hint))
        })
    });

    by_header.or_else(|| {
        table.row(1).and_then(|probe| {
            probe
                .iter()
                .position(|cell| normalize_date(cell, convention).is_some())
        })
    })
}

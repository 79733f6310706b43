//! Column-wide day-first/month-first vote.

use serde::{Deserialize, Serialize};

use crate::dates::{DateConvention, slash_components, unambiguous_convention};
use crate::input::Table;

/// Votes cast by sampled `a/b/YYYY` cells whose values force an ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionVotes {
    /// Cells whose first component exceeds 12.
    pub day_first: usize,
    /// Cells whose second component exceeds 12.
    pub month_first: usize,
    /// Cells that matched `a/b/YYYY` but were ambiguous.
    pub abstained: usize,
}

impl ConventionVotes {
    /// Tally votes over rows `1..min(row_count, sample_rows + 1)` of `column`.
    ///
    /// Row 0 is never sampled, whether or not it is a header.
    pub fn tally(table: &Table, column: usize, sample_rows: usize) -> Self {
        let end = table.row_count().min(sample_rows.saturating_add(1));
        let mut votes = Self::default();

        for row in 1..end {
            let Some(cell) = table.get(row, column) else {
                continue;
            };
            votes.record(cell);
        }

        votes
    }

    /// Count one cell.
    pub fn record(&mut self, cell: &str) {
        let Some((first, second)) = slash_components(cell) else {
            return;
        };
        match unambiguous_convention(first, second) {
            Some(DateConvention::DayFirst) => self.day_first += 1,
            Some(DateConvention::MonthFirst) => self.month_first += 1,
            None => self.abstained += 1,
        }
    }

    /// The convention with strictly more votes, if any.
    pub fn winner(&self) -> Option<DateConvention> {
        if self.day_first > self.month_first {
            Some(DateConvention::DayFirst)
        } else if self.month_first > self.day_first {
            Some(DateConvention::MonthFirst)
        } else {
            None
        }
    }

    /// The winner, or `default` on a tie (including no votes at all).
    pub fn decide(&self, default: DateConvention) -> DateConvention {
        self.winner().unwrap_or(default)
    }

    /// Total decisive votes.
    pub fn total(&self) -> usize {
        self.day_first + self.month_first
    }
}

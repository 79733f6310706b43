//! Per-day occurrence counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::range::DateRange;
use crate::dates::{CanonicalDate, normalize_date};
use crate::inference::TableLayout;
use crate::input::Table;

/// Number of rows that fell on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: CanonicalDate,
    pub count: u64,
}

/// Summary of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Distinct days with at least one row.
    pub total_days: usize,
    /// Sum of all daily counts.
    pub total_count: u64,
    /// Lower bound when given, otherwise the earliest observed day.
    pub range_start: Option<CanonicalDate>,
    /// Upper bound when given, otherwise the latest observed day.
    pub range_end: Option<CanonicalDate>,
    /// Data rows examined (header excluded).
    pub rows_scanned: usize,
    /// Rows whose date cell could not be read.
    pub rows_unparsed: usize,
    /// Rows with a readable date outside the bounds.
    pub rows_out_of_range: usize,
}

/// Daily counts sorted ascending by date, plus summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub records: Vec<DailyCount>,
    pub summary: AggregateSummary,
}

impl DailyAggregate {
    /// Count for a given day (0 when absent).
    pub fn count_on(&self, date: CanonicalDate) -> u64 {
        self.records
            .binary_search_by(|r| r.date.cmp(&date))
            .map(|i| self.records[i].count)
            .unwrap_or(0)
    }

    /// Every day from `range_start` to `range_end`, with 0 for missing days.
    pub fn with_zero_days(&self) -> Vec<DailyCount> {
        let (Some(start), Some(end)) = (self.summary.range_start, self.summary.range_end) else {
            return Vec::new();
        };

        let mut series = Vec::new();
        let mut observed = self.records.iter().peekable();
        let mut day = Some(start);

        while let Some(current) = day.filter(|d| *d <= end) {
            let count = match observed.peek() {
                Some(r) if r.date == current => {
                    let count = r.count;
                    observed.next();
                    count
                }
                _ => 0,
            };
            series.push(DailyCount {
                date: current,
                count,
            });
            day = current.next_day();
        }

        series
    }
}

/// Count rows per day in the layout's date column, clipped to `range`.
///
/// Rows whose date does not normalize, or that fall outside the range, are
/// skipped and counted in the summary; they never fail the run.
pub fn aggregate_daily(table: &Table, layout: &TableLayout, range: &DateRange) -> DailyAggregate {
    let mut buckets: BTreeMap<CanonicalDate, u64> = BTreeMap::new();
    let mut summary = AggregateSummary::default();

    for row in table.rows.iter().skip(layout.data_start) {
        summary.rows_scanned += 1;

        let Some(date) = row
            .get(layout.date_column)
            .and_then(|cell| normalize_date(cell, layout.convention))
        else {
            summary.rows_unparsed += 1;
            continue;
        };

        if !range.contains(date) {
            summary.rows_out_of_range += 1;
            continue;
        }

        *buckets.entry(date).or_insert(0) += 1;
    }

    let records: Vec<DailyCount> = buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();

    summary.total_days = records.len();
    summary.total_count = records.iter().map(|r| r.count).sum();
    summary.range_start = range.start.or_else(|| records.first().map(|r| r.date));
    summary.range_end = range.end.or_else(|| records.last().map(|r| r.date));

    debug!(
        rows_scanned = summary.rows_scanned,
        rows_unparsed = summary.rows_unparsed,
        rows_out_of_range = summary.rows_out_of_range,
        total_days = summary.total_days,
        total_count = summary.total_count,
        "aggregated daily counts"
    );

    DailyAggregate { records, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::LayoutAnalyzer;
    use crate::input::Tokenizer;

    fn run(text: &str, range: DateRange) -> DailyAggregate {
        let table = Tokenizer::new().tokenize_with(text, ',');
        let layout = LayoutAnalyzer::new().analyze(&table).unwrap();
        aggregate_daily(&table, &layout, &range)
    }

    fn date(s: &str) -> CanonicalDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_counts_rows_not_values() {
        let agg = run(
            "Date,Downloads\n2021-01-05,3\n2021-01-05,2\n13/07/2021,1\n",
            DateRange::unbounded(),
        );
        assert_eq!(
            agg.records,
            vec![
                DailyCount { date: date("2021-01-05"), count: 2 },
                DailyCount { date: date("2021-07-13"), count: 1 },
            ]
        );
        assert_eq!(agg.summary.total_count, 3);
        assert_eq!(agg.summary.total_days, 2);
        assert_eq!(agg.summary.range_start, Some(date("2021-01-05")));
        assert_eq!(agg.summary.range_end, Some(date("2021-07-13")));
    }

    #[test]
    fn test_unparsed_rows_skipped() {
        let agg = run("date,x\n2021-01-01,1\nnot a date,2\n,3\n", DateRange::unbounded());
        assert_eq!(agg.summary.total_count, 1);
        assert_eq!(agg.summary.rows_scanned, 3);
        assert_eq!(agg.summary.rows_unparsed, 2);
    }

    #[test]
    fn test_short_row_counts_as_unparsed() {
        let agg = run("id,date\n1,2021-01-01\n2\n", DateRange::unbounded());
        assert_eq!(agg.summary.total_count, 1);
        assert_eq!(agg.summary.rows_unparsed, 1);
    }

    #[test]
    fn test_bounds_clip_and_set_effective_range() {
        let range = DateRange::new(Some(date("2021-01-02")), Some(date("2021-01-10"))).unwrap();
        let agg = run(
            "date\n2021-01-01\n2021-01-02\n2021-01-05\n2021-01-11\n",
            range,
        );
        assert_eq!(agg.summary.total_count, 2);
        assert_eq!(agg.summary.rows_out_of_range, 2);
        assert_eq!(agg.summary.range_start, Some(date("2021-01-02")));
        assert_eq!(agg.summary.range_end, Some(date("2021-01-10")));
    }

    #[test]
    fn test_headerless_table_counts_first_row() {
        let agg = run("1,2021-01-01\n2,2021-01-02", DateRange::unbounded());
        assert_eq!(agg.summary.total_count, 2);
        assert_eq!(agg.summary.rows_scanned, 2);
    }

    #[test]
    fn test_empty_result_has_no_range() {
        let agg = run("date\nnope\n", DateRange::unbounded());
        assert!(agg.records.is_empty());
        assert_eq!(agg.summary.range_start, None);
        assert!(agg.with_zero_days().is_empty());
    }

    #[test]
    fn test_with_zero_days_fills_gaps() {
        let agg = run("date\n2021-01-01\n2021-01-03\n2021-01-03\n", DateRange::unbounded());
        let series = agg.with_zero_days();
        let counts: Vec<u64> = series.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![1, 0, 2]);
        assert_eq!(series[1].date, date("2021-01-02"));
    }

    #[test]
    fn test_count_on() {
        let agg = run("date\n2021-01-01\n2021-01-01\n", DateRange::unbounded());
        assert_eq!(agg.count_on(date("2021-01-01")), 2);
        assert_eq!(agg.count_on(date("2021-01-02")), 0);
    }
}

//! Main Sieve struct and public API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{AggregateSummary, DailyAggregate, DailyCount, DateRange, aggregate_daily};
use crate::dates::DateConvention;
use crate::error::Result;
use crate::inference::{InferenceConfig, LayoutAnalyzer, TableLayout};
use crate::input::{SourceMetadata, Table, Tokenizer, TokenizerConfig};
use crate::sections::{IndicatorRecord, ParagraphSource, extract_from, extract_indicator};

/// Configuration for a Sieve pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// Tokenizer configuration.
    pub tokenizer: TokenizerConfig,
    /// Date column and convention inference configuration.
    pub inference: InferenceConfig,
    /// Inclusive date window applied when aggregating.
    pub range: DateRange,
}

impl SieveConfig {
    /// Check settings that cannot be enforced by their types.
    pub fn validate(&self) -> Result<()> {
        let quote = self.tokenizer.quote;
        if !quote.is_ascii() || matches!(quote, '\r' | '\n') {
            return Err(crate::SieveError::Config(format!(
                "quote {:?} must be an ASCII character other than a line break",
                quote
            )));
        }
        if let Some(delimiter) = self.tokenizer.delimiter {
            if !delimiter.is_ascii() || delimiter == quote || matches!(delimiter, '\r' | '\n') {
                return Err(crate::SieveError::Config(format!(
                    "delimiter {:?} cannot be used",
                    delimiter
                )));
            }
        }
        self.range.validate()
    }
}

/// Result of aggregating a delimited-text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Fingerprint of the payload.
    pub source: SourceMetadata,
    /// How the date column was found and read.
    pub layout: TableLayout,
    /// Daily counts, ascending.
    pub records: Vec<DailyCount>,
    /// Totals and skipped-row counters.
    pub summary: AggregateSummary,
}

impl AggregateReport {
    fn new(source: SourceMetadata, layout: TableLayout, aggregate: DailyAggregate) -> Self {
        Self {
            source,
            layout,
            records: aggregate.records,
            summary: aggregate.summary,
        }
    }

    /// Daily series with zero-count days filled in across the effective range.
    pub fn dense_records(&self) -> Vec<DailyCount> {
        DailyAggregate {
            records: self.records.clone(),
            summary: self.summary.clone(),
        }
        .with_zero_days()
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `date,count` rows (with header) as CSV.
    pub fn to_csv(&self, fill_gaps: bool) -> Result<String> {
        let records = if fill_gaps {
            self.dense_records()
        } else {
            self.records.clone()
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.write_record(["date", "count"])?;
        for record in &records {
            wtr.serialize(record)?;
        }
        wtr.flush().map_err(csv::Error::from)?;

        let bytes = wtr
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)).into()
        })
    }
}

/// The normalization pipeline.
///
/// Tokenizes delimited text, infers the date column and its convention,
/// and aggregates rows per day. Also extracts indicator sections from
/// paragraph sequences. No method performs I/O.
#[derive(Debug, Clone, Default)]
pub struct Sieve {
    config: SieveConfig,
    tokenizer: Tokenizer,
    analyzer: LayoutAnalyzer,
}

impl Sieve {
    /// Create a new Sieve with default configuration.
    pub fn new() -> Self {
        Self::with_config(SieveConfig::default())
    }

    /// Create a Sieve with custom configuration.
    pub fn with_config(config: SieveConfig) -> Self {
        let tokenizer = Tokenizer::with_config(config.tokenizer.clone());
        let analyzer = LayoutAnalyzer::with_config(config.inference.clone());

        Self {
            config,
            tokenizer,
            analyzer,
        }
    }

    /// Restrict aggregation to an inclusive date window.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.config.range = range;
        self
    }

    /// Force a convention instead of voting.
    pub fn with_convention(mut self, convention: DateConvention) -> Self {
        self.config.inference.convention_override = Some(convention);
        self.analyzer = LayoutAnalyzer::with_config(self.config.inference.clone());
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Tokenize `text` and fingerprint it.
    pub fn tokenize(&self, text: &str) -> (Table, SourceMetadata) {
        let delimiter = self.tokenizer.delimiter_for(text);
        let table = self.tokenizer.tokenize_with(text, delimiter);
        let source = SourceMetadata::describe(text, &table, delimiter);
        (table, source)
    }

    /// Report how `text` would be read without aggregating it.
    pub fn inspect(&self, text: &str) -> Result<(SourceMetadata, TableLayout)> {
        let (table, source) = self.tokenize(text);
        let layout = self.analyzer.analyze(&table)?;
        Ok((source, layout))
    }

    /// Aggregate `text` into daily counts.
    ///
    /// Fails only when no date column can be found (or the input has no
    /// rows); unreadable or out-of-range rows are counted and skipped.
    pub fn aggregate(&self, text: &str) -> Result<AggregateReport> {
        let (table, source) = self.tokenize(text);
        let layout = self.analyzer.analyze(&table)?;
        let aggregate = aggregate_daily(&table, &layout, &self.config.range);

        debug!(
            format = %source.format,
            rows = source.row_count,
            days = aggregate.summary.total_days,
            "aggregation complete"
        );

        Ok(AggregateReport::new(source, layout, aggregate))
    }

    /// Extract one indicator section from a paragraph sequence.
    pub fn extract_indicator<P: AsRef<str>>(
        &self,
        paragraphs: &[P],
        id: &str,
    ) -> Option<IndicatorRecord> {
        extract_indicator(paragraphs, id)
    }

    /// Extract one indicator section from a paragraph source.
    pub fn extract_from<S: ParagraphSource + ?Sized>(
        &self,
        source: &S,
        id: &str,
    ) -> Result<Option<IndicatorRecord>> {
        extract_from(source, id)
    }
}

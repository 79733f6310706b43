//! Sieve: normalization pipeline for heterogeneous analytics exports.
//!
//! Sieve turns inconsistently formatted inputs into clean, typed,
//! date-indexed records. It never performs I/O: callers hand it text that
//! has already been fetched or read, and get structured values back.
//!
//! # Components
//!
//! - **Tokenizer**: quote-aware splitting of delimited text into rows
//! - **Date normalizer**: one token to a canonical `YYYY-MM-DD` date
//! - **Layout inference**: finds the date column and votes on day-first vs month-first
//! - **Daily aggregation**: per-day row counts clipped to an optional window
//! - **Section extraction**: pulls one identified indicator out of a narrative document
//!
//! # Example
//!
//! ```
//! use sieve::Sieve;
//!
//! let report = Sieve::new()
//!     .aggregate("Date,Downloads\n2021-01-05,3\n2021-01-05,2\n13/07/2021,1\n")
//!     .unwrap();
//!
//! assert_eq!(report.summary.total_days, 2);
//! assert_eq!(report.summary.total_count, 3);
//! assert_eq!(report.records[1].date.to_string(), "2021-07-13");
//! ```

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod inference;
pub mod input;
pub mod sections;

mod sieve;

pub use crate::sieve::{AggregateReport, Sieve, SieveConfig};
pub use aggregate::{AggregateSummary, DailyAggregate, DailyCount, DateRange};
pub use dates::{CanonicalDate, DateConvention, normalize_date};
pub use error::{Result, SieveError};
pub use inference::{ConventionSource, ConventionVotes, InferenceConfig, TableLayout};
pub use input::{SourceMetadata, Table, Tokenizer, TokenizerConfig};
pub use sections::{
    IndicatorRecord, MetadataValue, ParagraphSource, PlainText, extract_indicator,
    split_paragraphs,
};

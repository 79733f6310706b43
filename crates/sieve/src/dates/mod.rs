//! Date normalization and day/month convention handling.

mod convention;
mod normalizer;

pub use convention::{DateConvention, resolve_day_month, unambiguous_convention};
pub use normalizer::{CanonicalDate, normalize_date, slash_components};

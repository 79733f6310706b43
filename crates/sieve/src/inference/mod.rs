//! Layout inference: which column holds dates and how to read them.

mod layout;
mod vote;

pub use layout::{
    ConventionSource, InferenceConfig, LayoutAnalyzer, TableLayout, find_date_column,
    has_header_row,
};
pub use vote::ConventionVotes;

//! Indicator section extraction from narrative documents.

mod extractor;
mod identifier;
mod metadata;
mod source;

pub use extractor::{IndicatorRecord, Title, extract_indicator, list_indicators, parse_title};
pub use identifier::leading_identifier;
pub use metadata::{
    CATEGORY_HEADERS, CategoryHeader, HeaderSpan, METADATA_MARKERS, MetadataValue, URLS_KEY,
    extract_metadata_blocks, extract_urls, find_header_spans, is_metadata_marker,
};
pub use source::{ParagraphSource, PlainText, extract_from, split_paragraphs};

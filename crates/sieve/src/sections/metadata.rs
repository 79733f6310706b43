//! Categorized metadata blocks inside an indicator section.
//!
//! A metadata sub-section is cut into blocks by locating a fixed, ordered
//! list of category headers, sorting the headers found by their offset and
//! slicing the text between consecutive headers.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Key under which URLs found in the metadata sub-section are stored.
pub const URLS_KEY: &str = "urls";

/// Paragraph fragments (lowercase) that open the metadata sub-section.
pub const METADATA_MARKERS: &[&str] = &["metadata", "key terms", "historical data methodology"];

/// A recognized metadata category: the header text and the key it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryHeader {
    pub key: &'static str,
    pub header: &'static str,
}

/// Supported category headers, in recognition order.
pub const CATEGORY_HEADERS: &[CategoryHeader] = &[
    CategoryHeader { key: "definition", header: "Definition" },
    CategoryHeader { key: "key_terms", header: "Key Terms" },
    CategoryHeader { key: "calculation", header: "Calculation" },
    CategoryHeader { key: "historical_data_methodology", header: "Historical Data Methodology" },
    CategoryHeader { key: "methodology", header: "Methodology" },
    CategoryHeader { key: "data_source", header: "Data Source" },
    CategoryHeader { key: "frequency", header: "Frequency" },
    CategoryHeader { key: "baseline", header: "Baseline" },
    CategoryHeader { key: "target", header: "Target" },
    CategoryHeader { key: "owner", header: "Owner" },
    CategoryHeader { key: "unit_of_measure", header: "Unit of Measure" },
    CategoryHeader { key: "limitations", header: "Limitations" },
    CategoryHeader { key: "notes", header: "Notes" },
];

/// One recognizer per category: header at a line start, any case, optional colon.
static RECOGNIZERS: Lazy<Vec<(CategoryHeader, Regex)>> = Lazy::new(|| {
    CATEGORY_HEADERS
        .iter()
        .map(|category| {
            let header = regex::escape(category.header).replace(' ', r"[ \t]+");
            let pattern = format!(r"(?im)^[ \t]*{header}\b[ \t]*:?");
            (*category, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static URL_AFTER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(?:url|website|link|source)s?\b[^\S\n]*[:=\-]?[^\S\n]*\(?(?P<url>(?:https?://|www\.)[^\s<>"'()\[\]]+)"#,
    )
    .unwrap()
});

/// Value of a metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Free text of a category block.
    Text(String),
    /// URLs collected under [`URLS_KEY`].
    Links(Vec<String>),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Links(_) => None,
        }
    }

    pub fn as_links(&self) -> Option<&[String]> {
        match self {
            MetadataValue::Links(links) => Some(links),
            MetadataValue::Text(_) => None,
        }
    }
}

/// A category header located in the metadata text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
    pub category: CategoryHeader,
    /// Byte offset where the header starts.
    pub start: usize,
    /// Byte offset just past the header and its colon.
    pub end: usize,
}

/// Whether a paragraph opens the metadata sub-section.
pub fn is_metadata_marker(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    METADATA_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// First occurrence of each category header, sorted by offset.
///
/// When two headers start at the same offset the longer one wins, so
/// "Historical Data Methodology" is never read as "Methodology".
pub fn find_header_spans(text: &str) -> Vec<HeaderSpan> {
    let mut spans: Vec<HeaderSpan> = RECOGNIZERS
        .iter()
        .filter_map(|(category, regex)| {
            regex.find(text).map(|m| HeaderSpan {
                category: *category,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();

    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    spans.dedup_by_key(|span| span.start);
    spans
}

/// Split metadata text into category blocks plus the collected URLs.
pub fn extract_metadata_blocks(text: &str) -> IndexMap<String, MetadataValue> {
    let spans = find_header_spans(text);
    let mut blocks = IndexMap::new();

    for (i, span) in spans.iter().enumerate() {
        let content_end = spans.get(i + 1).map_or(text.len(), |next| next.start);
        let content = clean_block(&text[span.end..content_end]);
        if content.is_empty() {
            continue;
        }
        blocks
            .entry(span.category.key.to_string())
            .or_insert(MetadataValue::Text(content.to_string()));
    }

    let urls = extract_urls(text);
    if !urls.is_empty() {
        blocks.insert(URLS_KEY.to_string(), MetadataValue::Links(urls));
    }

    blocks
}

/// URLs that follow a url/website/link/source label, first-seen order, no duplicates.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for caps in URL_AFTER_LABEL.captures_iter(text) {
        let url = caps["url"].trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if !url.is_empty() && !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

fn clean_block(raw: &str) -> &str {
    let content = raw.trim();
    let content = content.strip_prefix(':').unwrap_or(content).trim();
    if content == ":" { "" } else { content }
}

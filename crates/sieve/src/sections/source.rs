//! Paragraph sources: the seam between native documents and the extractor.

use crate::error::Result;

use super::extractor::{IndicatorRecord, extract_indicator};

/// Anything that can be turned into an ordered paragraph sequence.
///
/// Implementations that read or convert documents report their failures
/// as [`crate::SieveError::Source`], which callers can tell apart from an
/// indicator that simply is not in the document.
pub trait ParagraphSource {
    fn paragraphs(&self) -> Result<Vec<String>>;
}

impl ParagraphSource for [String] {
    fn paragraphs(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

impl ParagraphSource for Vec<String> {
    fn paragraphs(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Plain text whose paragraphs are separated by blank lines.
#[derive(Debug, Clone, Copy)]
pub struct PlainText<'a>(pub &'a str);

impl ParagraphSource for PlainText<'_> {
    fn paragraphs(&self) -> Result<Vec<String>> {
        Ok(split_paragraphs(self.0))
    }
}

/// Split text on blank lines. Paragraphs are trimmed; empty ones are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }

    paragraphs
}

/// Pull paragraphs from `source` and extract `target`.
///
/// `Err` means the source failed; `Ok(None)` means the indicator is absent.
pub fn extract_from<S: ParagraphSource + ?Sized>(
    source: &S,
    target: &str,
) -> Result<Option<IndicatorRecord>> {
    let paragraphs = source.paragraphs()?;
    Ok(extract_indicator(&paragraphs, target))
}

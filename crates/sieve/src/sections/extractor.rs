//! Locate one indicator section in a paragraph sequence and split it up.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::identifier::{IDENTIFIER_PATTERN, leading_identifier, same_identifier};
use super::metadata::{MetadataValue, extract_metadata_blocks, is_metadata_marker};

/// `ID - Name [- [[Status]]]`, on the first line of the title paragraph.
static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<id>{IDENTIFIER_PATTERN})\b\s*(?:[-–—]\s*(?P<name>.*?))?\s*(?:-\s*\[\[(?P<status>[^\]]*)\]\])?\s*$"
    ))
    .unwrap()
});

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One indicator section pulled out of a narrative document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    /// Identifier as written in the document.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Paragraphs between the title and the metadata sub-section.
    pub narrative: String,
    /// Category key to block text, in document order, plus collected URLs.
    pub metadata_blocks: IndexMap<String, MetadataValue>,
    /// Every paragraph of the section, title included.
    pub raw_section: String,
}

/// Title fields parsed from a section's first paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Title {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Extract the section for `target` from `paragraphs`.
///
/// The section starts at the first paragraph whose leading identifier equals
/// `target` (ignoring case) and ends before the next paragraph that leads
/// with a different identifier. Returns `None` when `target` never leads a
/// paragraph.
pub fn extract_indicator<P: AsRef<str>>(paragraphs: &[P], target: &str) -> Option<IndicatorRecord> {
    let leads_with_target =
        |p: &P| leading_identifier(p.as_ref()).is_some_and(|id| same_identifier(id, target));

    let Some(start) = paragraphs.iter().position(leads_with_target) else {
        debug!(target_id = target, paragraphs = paragraphs.len(), "indicator not found");
        return None;
    };

    let end = paragraphs[start + 1..]
        .iter()
        .position(|p| leading_identifier(p.as_ref()).is_some_and(|id| !same_identifier(id, target)))
        .map_or(paragraphs.len(), |offset| start + 1 + offset);

    let section: Vec<&str> = paragraphs[start..end].iter().map(AsRef::as_ref).collect();
    let title_paragraph = section[0].trim();
    let id = leading_identifier(title_paragraph)?.to_string();

    let (title_line, title_rest) = match title_paragraph.split_once('\n') {
        Some((line, rest)) => (line, Some(rest.trim())),
        None => (title_paragraph, None),
    };
    let title = parse_title(title_line);

    let mut body: Vec<&str> = Vec::with_capacity(section.len());
    body.extend(title_rest.filter(|rest| !rest.is_empty()));
    body.extend(section[1..].iter().map(|p| p.trim()).filter(|p| !p.is_empty()));

    let marker = body.iter().position(|p| is_metadata_marker(p));
    let (narrative_part, metadata_part) = match marker {
        Some(index) => body.split_at(index),
        None => (&body[..], &[][..]),
    };

    let metadata_blocks = if metadata_part.is_empty() {
        IndexMap::new()
    } else {
        extract_metadata_blocks(&metadata_part.join(PARAGRAPH_SEPARATOR))
    };

    debug!(
        id = %id,
        paragraphs = section.len(),
        narrative_paragraphs = narrative_part.len(),
        metadata_blocks = metadata_blocks.len(),
        "extracted indicator section"
    );

    Some(IndicatorRecord {
        id,
        name: title.name,
        status: title.status,
        narrative: narrative_part.join(PARAGRAPH_SEPARATOR),
        metadata_blocks,
        raw_section: section.join(PARAGRAPH_SEPARATOR),
    })
}

/// Parse `ID - Name [- [[Status]]]`. Missing parts are `None`.
pub fn parse_title(line: &str) -> Title {
    let Some(caps) = TITLE.captures(line.trim()) else {
        return Title::default();
    };

    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let name = field("name");
    let status = field("status");

    // `ID - [[Status]]` has no name; the separator dash was taken by the name group.
    let bare_status = name
        .as_deref()
        .and_then(|n| n.strip_prefix("[["))
        .and_then(|n| n.strip_suffix("]]"))
        .map(|n| n.trim().to_string());

    match (bare_status, status) {
        (Some(bare), None) => Title {
            name: None,
            status: Some(bare).filter(|s| !s.is_empty()),
        },
        (_, status) => Title { name, status },
    }
}

/// Identifiers that start a section, in document order, without repeats.
pub fn list_indicators<P: AsRef<str>>(paragraphs: &[P]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for paragraph in paragraphs {
        if let Some(id) = leading_identifier(paragraph.as_ref()) {
            if !ids.iter().any(|seen| same_identifier(seen, id)) {
                ids.push(id.to_string());
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &[&str] = &[
        "Intro text",
        "X-FIN-85 - Capital investment - [[On Track]]",
        "Some narrative.",
        "Key Terms: defines X.",
        "X-FIN-86 - Next indicator",
    ];

    #[test]
    fn test_parse_title_full() {
        let title = parse_title("X-FIN-85 - Capital investment - [[On Track]]");
        assert_eq!(title.name.as_deref(), Some("Capital investment"));
        assert_eq!(title.status.as_deref(), Some("On Track"));
    }

    #[test]
    fn test_parse_title_without_status() {
        let title = parse_title("FW-134 - Staff turnover");
        assert_eq!(title.name.as_deref(), Some("Staff turnover"));
        assert_eq!(title.status, None);
    }

    #[test]
    fn test_parse_title_name_with_dashes() {
        let title = parse_title("FW-134 - Year-on-year growth - [[At Risk]]");
        assert_eq!(title.name.as_deref(), Some("Year-on-year growth"));
        assert_eq!(title.status.as_deref(), Some("At Risk"));
    }

    #[test]
    fn test_parse_title_status_without_name() {
        let title = parse_title("FW-134 - [[On Track]]");
        assert_eq!(title.name, None);
        assert_eq!(title.status.as_deref(), Some("On Track"));
    }

    #[test]
    fn test_parse_title_identifier_only() {
        assert_eq!(parse_title("FW-134"), Title::default());
    }

    #[test]
    fn test_extract_full_record() {
        let record = extract_indicator(DOCUMENT, "X-FIN-85").unwrap();
        assert_eq!(record.id, "X-FIN-85");
        assert_eq!(record.name.as_deref(), Some("Capital investment"));
        assert_eq!(record.status.as_deref(), Some("On Track"));
        assert_eq!(record.narrative, "Some narrative.");
        assert_eq!(record.metadata_blocks.len(), 1);
        assert_eq!(
            record.metadata_blocks.get("key_terms"),
            Some(&MetadataValue::Text("defines X.".into()))
        );
        assert_eq!(
            record.raw_section,
            "X-FIN-85 - Capital investment - [[On Track]]\n\nSome narrative.\n\nKey Terms: defines X."
        );
    }

    #[test]
    fn test_target_is_case_insensitive() {
        let record = extract_indicator(DOCUMENT, "x-fin-85").unwrap();
        assert_eq!(record.id, "X-FIN-85");
    }

    #[test]
    fn test_missing_target_is_none() {
        assert_eq!(extract_indicator(DOCUMENT, "X-FIN-99"), None);
        assert_eq!(extract_indicator::<&str>(&[], "X-FIN-85"), None);
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let record = extract_indicator(DOCUMENT, "X-FIN-86").unwrap();
        assert_eq!(record.name.as_deref(), Some("Next indicator"));
        assert_eq!(record.narrative, "");
        assert!(record.metadata_blocks.is_empty());
    }

    #[test]
    fn test_repeated_identifier_stays_in_section() {
        let doc = [
            "FW-134 - Turnover",
            "First part.",
            "FW-134 continued on the next page.",
            "FW-135 - Other",
        ];
        let record = extract_indicator(&doc, "FW-134").unwrap();
        assert_eq!(record.narrative, "First part.\n\nFW-134 continued on the next page.");
    }

    #[test]
    fn test_no_marker_means_all_narrative() {
        let doc = ["FW-134 - Turnover", "Para one.", "Definition: plain prose here."];
        let record = extract_indicator(&doc, "FW-134").unwrap();
        assert_eq!(record.narrative, "Para one.\n\nDefinition: plain prose here.");
        assert!(record.metadata_blocks.is_empty());
    }

    #[test]
    fn test_metadata_heading_paragraph() {
        let doc = [
            "FW-134 - Turnover - [[Off Track]]",
            "Narrative one.",
            "Narrative two.",
            "Metadata",
            "Definition: leavers / headcount",
            "Frequency: monthly",
            "Source: https://hr.example/turnover",
        ];
        let record = extract_indicator(&doc, "FW-134").unwrap();
        assert_eq!(record.narrative, "Narrative one.\n\nNarrative two.");
        let keys: Vec<&str> = record.metadata_blocks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["definition", "frequency", "urls"]);
        assert_eq!(
            record.metadata_blocks["frequency"].as_text(),
            Some("monthly\n\nSource: https://hr.example/turnover")
        );
    }

    #[test]
    fn test_multiline_title_paragraph() {
        let doc = ["FW-134 - Turnover\nRolling twelve months.", "More text."];
        let record = extract_indicator(&doc, "FW-134").unwrap();
        assert_eq!(record.name.as_deref(), Some("Turnover"));
        assert_eq!(record.narrative, "Rolling twelve months.\n\nMore text.");
    }

    #[test]
    fn test_list_indicators() {
        let doc = ["Intro", "FW-134 - A", "FW-134 again", "X-FIN-85 - B"];
        assert_eq!(list_indicators(&doc), vec!["FW-134", "X-FIN-85"]);
    }

    #[test]
    fn test_record_serializes_without_absent_fields() {
        let record = extract_indicator(&["FW-134", "Text."], "FW-134").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("status").is_none());
        assert_eq!(json["narrative"], "Text.");
    }
}

//! Single-token date normalization.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::convention::{DateConvention, resolve_day_month};
use crate::error::{Result, SieveError};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Tried in order; the first shape that matches and forms a real date wins.

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());

static YEAR_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap());

/// `a?b?YYYY` with `/`, `-` and `.` separators, in that order.
static YEAR_LAST: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap(),
        Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap(),
        Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap(),
    ]
});

static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap());

/// Timestamp layouts tried against the first token.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Month-name layouts tried against the first token.
const TOKEN_FORMATS: &[&str] = &["%d-%B-%Y", "%B-%d-%Y"];

/// Month-name layouts tried against the whole value (commas removed).
const PROSE_FORMATS: &[&str] = &["%d %B %Y", "%B %d %Y", "%a %d %B %Y", "%a %B %d %Y"];

/// A calendar date with no time component, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Build from year, month and day; `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day.
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for CanonicalDate {
    type Err = SieveError;

    /// Accepts only canonical `YYYY-MM-DD` input.
    fn from_str(s: &str) -> Result<Self> {
        let caps = ISO_DATE
            .captures(s.trim())
            .ok_or_else(|| SieveError::InvalidDate(s.to_string()))?;
        ymd_from_captures(&caps, 1, 2, 3)
            .ok_or_else(|| SieveError::InvalidDate(s.to_string()))
    }
}

/// Normalize one date-like value to a [`CanonicalDate`].
///
/// Only the first whitespace-delimited token is read, so a trailing
/// time-of-day is ignored. `convention` is consulted only for `a/b/YYYY`
/// shapes where both `a` and `b` are 12 or less. Returns `None` when no
/// recognized shape yields a real calendar date.
pub fn normalize_date(value: &str, convention: DateConvention) -> Option<CanonicalDate> {
    let value = strip_wrapping_quotes(value.trim());
    let token = value.split_whitespace().next()?;

    if let Some(caps) = ISO_DATE.captures(token) {
        if let Some(date) = ymd_from_captures(&caps, 1, 2, 3) {
            return Some(date);
        }
    }

    if let Some(caps) = YEAR_SLASH.captures(token) {
        if let Some(date) = ymd_from_captures(&caps, 1, 2, 3) {
            return Some(date);
        }
    }

    for pattern in YEAR_LAST.iter() {
        if let Some(caps) = pattern.captures(token) {
            if let Some(date) = year_last_from_captures(&caps, convention) {
                return Some(date);
            }
        }
    }

    parse_generic(token, value)
}

/// Parse the leading components of a `a/b/YYYY` token, if it has that shape.
///
/// Returns `(first, second)` for the slash form only; used when sampling
/// a column for its convention.
pub fn slash_components(value: &str) -> Option<(u32, u32)> {
    let value = strip_wrapping_quotes(value.trim());
    let token = value.split_whitespace().next()?;
    let caps = YEAR_LAST[0].captures(token)?;
    let first = caps[1].parse().ok()?;
    let second = caps[2].parse().ok()?;
    Some((first, second))
}

fn strip_wrapping_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(value)
}

fn ymd_from_captures(
    caps: &regex::Captures<'_>,
    year: usize,
    month: usize,
    day: usize,
) -> Option<CanonicalDate> {
    let y: i32 = caps[year].parse().ok()?;
    let m: u32 = caps[month].parse().ok()?;
    let d: u32 = caps[day].parse().ok()?;
    CanonicalDate::from_ymd(y, m, d)
}

fn year_last_from_captures(
    caps: &regex::Captures<'_>,
    convention: DateConvention,
) -> Option<CanonicalDate> {
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let (day, month) = resolve_day_month(first, second, convention);
    CanonicalDate::from_ymd(year, month, day)
}

/// Calendar-string fallback for timestamps and month-name forms.
fn parse_generic(token: &str, value: &str) -> Option<CanonicalDate> {
    let date = parse_token_fallback(token).or_else(|| parse_prose(value))?;

    // Years are literal four-digit years, never two-digit shorthand
    if (1000..=9999).contains(&date.year()) {
        Some(CanonicalDate(date))
    } else {
        None
    }
}

fn parse_token_fallback(token: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.date_naive());
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Some(dt.date());
        }
    }

    if let Some(caps) = COMPACT_DATE.captures(token) {
        return ymd_from_captures(&caps, 1, 2, 3).map(|d| d.naive());
    }

    TOKEN_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

fn parse_prose(value: &str) -> Option<NaiveDate> {
    // Month names are needed; bare numbers are never dates here
    if !value.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let cleaned = value
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for fmt in PROSE_FORMATS {
        if let Ok((date, rest)) = NaiveDate::parse_and_remainder(&cleaned, fmt) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(date);
            }
        }
    }

    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.date_naive())
}

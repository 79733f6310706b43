//! Inclusive date window.

use serde::{Deserialize, Serialize};

use crate::dates::{CanonicalDate, DateConvention, normalize_date};
use crate::error::{Result, SieveError};

/// Optional inclusive `[start, end]` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start: Option<CanonicalDate>,
    pub end: Option<CanonicalDate>,
}

impl DateRange {
    /// An unbounded range.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a range, rejecting `start > end`.
    pub fn new(start: Option<CanonicalDate>, end: Option<CanonicalDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(SieveError::InvalidRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Build a range from caller-supplied strings, read with the date normalizer.
    ///
    /// Bounds are read day-first when ambiguous; unreadable bounds are an error.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Self::new(parse_bound(start)?, parse_bound(end)?)
    }

    /// Whether `date` lies inside the window.
    pub fn contains(&self, date: CanonicalDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check a deserialized range the same way [`DateRange::new`] does.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.start, self.end).map(|_| ())
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<CanonicalDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => normalize_date(v, DateConvention::DayFirst)
            .map(Some)
            .ok_or_else(|| SieveError::InvalidDate(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CanonicalDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_contains_inclusive() {
        let range = DateRange::new(Some(date("2021-01-01")), Some(date("2021-01-31"))).unwrap();
        assert!(range.contains(date("2021-01-01")));
        assert!(range.contains(date("2021-01-31")));
        assert!(!range.contains(date("2020-12-31")));
        assert!(!range.contains(date("2021-02-01")));
    }

    #[test]
    fn test_half_open_ranges() {
        let from = DateRange::new(Some(date("2021-01-10")), None).unwrap();
        assert!(from.contains(date("2030-01-01")));
        assert!(!from.contains(date("2021-01-09")));

        let until = DateRange::new(None, Some(date("2021-01-10"))).unwrap();
        assert!(until.contains(date("1999-01-01")));
        assert!(!until.contains(date("2021-01-11")));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(Some(date("2021-02-01")), Some(date("2021-01-01"))).unwrap_err();
        assert!(matches!(err, SieveError::InvalidRange { .. }));
    }

    #[test]
    fn test_parse_bounds() {
        let range = DateRange::parse(Some("2021-01-01"), Some("31/01/2021")).unwrap();
        assert_eq!(range.end, Some(date("2021-01-31")));
        assert!(DateRange::parse(Some("soon"), None).is_err());
        assert!(DateRange::parse(Some(""), None).unwrap().is_unbounded());
    }
}

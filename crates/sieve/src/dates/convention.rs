//! Day/month ordering for ambiguous numeric dates.

use serde::{Deserialize, Serialize};

/// Whether an ambiguous `a/b/YYYY` date reads as day/month or month/day.
///
/// A convention belongs to a whole column: it is inferred once and applied
/// to every cell whose two leading components are both 12 or less.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateConvention {
    /// 13/07/2021
    #[default]
    DayFirst,
    /// 07/13/2021
    MonthFirst,
}

impl std::str::FromStr for DateConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "day-first" | "dayfirst" | "dmy" | "eu" => Ok(DateConvention::DayFirst),
            "month-first" | "monthfirst" | "mdy" | "us" => Ok(DateConvention::MonthFirst),
            _ => Err(format!(
                "Unknown date convention: {}. Use day-first or month-first.",
                s
            )),
        }
    }
}

impl std::fmt::Display for DateConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateConvention::DayFirst => write!(f, "day-first"),
            DateConvention::MonthFirst => write!(f, "month-first"),
        }
    }
}

/// The ordering forced by the values themselves, if any.
///
/// A leading component above 12 can only be a day; so can a second
/// component above 12. Returns `None` when both are 12 or less.
pub fn unambiguous_convention(first: u32, second: u32) -> Option<DateConvention> {
    if first > 12 {
        Some(DateConvention::DayFirst)
    } else if second > 12 {
        Some(DateConvention::MonthFirst)
    } else {
        None
    }
}

/// Split the two leading components of a date into `(day, month)`.
///
/// The values win over `convention` whenever they are unambiguous.
pub fn resolve_day_month(first: u32, second: u32, convention: DateConvention) -> (u32, u32) {
    match unambiguous_convention(first, second).unwrap_or(convention) {
        DateConvention::DayFirst => (first, second),
        DateConvention::MonthFirst => (second, first),
    }
}

//! Fuzz target for date normalization.
//!
//! This fuzzer tests that the normalizer:
//! 1. Never panics on any input value
//! 2. Always emits a date that reads back to itself
//! 3. Regex-based shape matching doesn't choke on pathological input

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{CanonicalDate, DateConvention, normalize_date};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(value) = std::str::from_utf8(data) {
        for convention in [DateConvention::DayFirst, DateConvention::MonthFirst] {
            if let Some(date) = normalize_date(value, convention) {
                let canonical = date.to_string();
                assert_eq!(canonical.parse::<CanonicalDate>().ok(), Some(date));
            }
        }
    }
});

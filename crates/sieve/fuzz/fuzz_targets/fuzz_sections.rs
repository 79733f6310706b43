//! Fuzz target for indicator section extraction.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{extract_indicator, split_paragraphs};

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let paragraphs = split_paragraphs(text);
        for target in ["X-FIN-85", "OPS-1"] {
            if let Some(record) = extract_indicator(&paragraphs, target) {
                assert!(record.id.eq_ignore_ascii_case(target));
            }
        }
    }
});

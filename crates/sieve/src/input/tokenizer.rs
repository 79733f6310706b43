//! Quote-aware delimited-text tokenizer with delimiter detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::source::{Row, Table};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[char] = &['\t', ',', ';', '|'];

/// Tokenizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Quote character.
    pub quote: char,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: '"',
        }
    }
}

/// Splits raw delimited text into a [`Table`].
///
/// Tokenizing never fails: a stray quote inside an unquoted field is kept
/// literally and an unterminated quoted field runs to the end of the input.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with custom configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// The delimiter that will be used for `text`.
    pub fn delimiter_for(&self, text: &str) -> char {
        self.config
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text, self.config.quote))
    }

    /// Tokenize `text`, detecting the delimiter if none is configured.
    pub fn tokenize(&self, text: &str) -> Table {
        let delimiter = self.delimiter_for(text);
        self.tokenize_with(text, delimiter)
    }

    /// Tokenize `text` with an explicit delimiter.
    ///
    /// Delimiter and quote must be ASCII; anything else falls back to `,`
    /// and `"` respectively.
    pub fn tokenize_with(&self, text: &str, delimiter: char) -> Table {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(ascii_byte(delimiter, b','))
            .quote(ascii_byte(self.config.quote, b'"'))
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        // Reading from a str cannot hit an I/O error; anything else ends the input.
        let rows: Vec<Row> = reader
            .records()
            .map_while(|record| record.ok())
            .map(|record| record.iter().map(str::to_string).collect::<Row>())
            .filter(keep_row)
            .collect();

        debug!(
            rows = rows.len(),
            delimiter = ?delimiter,
            "tokenized delimited text"
        );

        Table::new(rows)
    }
}

/// Keep every row with two or more fields; keep a one-field row only when
/// that field is non-empty (drops blank-line artifacts).
fn keep_row(row: &Row) -> bool {
    match row.as_slice() {
        [] => false,
        [only] => !only.is_empty(),
        _ => true,
    }
}

fn ascii_byte(ch: char, fallback: u8) -> u8 {
    if ch.is_ascii() { ch as u8 } else { fallback }
}

/// Pick the delimiter from the first few non-blank lines.
///
/// Candidates that never appear on the first line are ignored. Among the
/// rest, a delimiter found the same number of times on every sampled line
/// beats one that varies; after that, more agreeing lines, then more fields
/// on the first line, then tab. Falls back to a comma.
pub fn detect_delimiter(text: &str, quote: char) -> char {
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .collect();

    let mut best: Option<(char, (bool, usize, usize, bool))> = None;

    for &candidate in DELIMITERS {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| unquoted_occurrences(line, candidate, quote))
            .collect();

        let Some(&expected) = counts.first().filter(|&&n| n > 0) else {
            continue;
        };
        let agreeing = counts.iter().filter(|&&n| n == expected).count();
        let rank = (agreeing == counts.len(), agreeing, expected, candidate == '\t');

        if best.is_none_or(|(_, top)| rank > top) {
            best = Some((candidate, rank));
        }
    }

    best.map_or(',', |(delimiter, _)| delimiter)
}

/// Occurrences of `delimiter` on one line that sit outside `quote` pairs.
fn unquoted_occurrences(line: &str, delimiter: char, quote: char) -> usize {
    line.chars()
        .scan(false, |quoted, ch| {
            if ch == quote {
                *quoted = !*quoted;
            }
            Some(ch == delimiter && !*quoted)
        })
        .filter(|&hit| hit)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(text: &str) -> Vec<Vec<String>> {
        Tokenizer::new().tokenize_with(text, ',').rows
    }

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n4,5,6", '"'), ',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n4\t5\t6", '"'), '\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        assert_eq!(detect_delimiter("a;b\n\"1,5\";2\n\"3,5\";4", '"'), ';');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("", '"'), ',');
        assert_eq!(detect_delimiter("just words\nmore words", '"'), ',');
    }

    #[test]
    fn test_detect_delimiter_uses_configured_quote() {
        let text = "a,x|b\n'1,5'|2\n'3,5'|4";
        assert_eq!(detect_delimiter(text, '\''), '|');
        assert_eq!(detect_delimiter(text, '"'), ',');
    }

    #[test]
    fn test_detect_delimiter_prefers_consistent_counts() {
        // Commas vary with the free-text column; semicolons do not.
        let text = "id;note, remarks\n1;a, b\n2;d\n3;e, f";
        assert_eq!(detect_delimiter(text, '"'), ';');
    }

    #[test]
    fn test_simple_rows() {
        assert_eq!(csv("a,b\n1,2\n"), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_quoted_field_with_delimiter_and_newline() {
        let rows = csv("name,note\n\"Smith, J\",\"line one\nline two\"\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Smith, J", "line one\nline two"]);
    }

    #[test]
    fn test_doubled_quote_escape() {
        let rows = csv("\"say \"\"hi\"\"\",x");
        assert_eq!(rows, vec![vec!["say \"hi\"", "x"]]);
    }

    #[test]
    fn test_crlf_is_single_terminator() {
        let rows = csv("a,b\r\n1,2\r\n3,4");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_bare_cr_terminates_row() {
        let rows = csv("a,b\r1,2");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_trailing_blank_lines_dropped() {
        let rows = csv("a,b\n1,2\n\n\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_single_field_rows_kept_when_non_empty() {
        let rows = csv("header\nvalue\n\nother\n");
        assert_eq!(rows, vec![vec!["header"], vec!["value"], vec!["other"]]);
    }

    #[test]
    fn test_empty_multi_field_row_kept() {
        let rows = csv("a,b\n,\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["", ""]]);
    }

    #[test]
    fn test_stray_quote_is_literal() {
        let rows = csv("5\" screen,ok\n");
        assert_eq!(rows, vec![vec!["5\" screen", "ok"]]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let rows = csv("a,\"open field\nstill open");
        assert_eq!(rows, vec![vec!["a", "open field\nstill open"]]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let rows = csv("\u{feff}Date,Count\n2021-01-01,1");
        assert_eq!(rows[0][0], "Date");
    }

    #[test]
    fn test_tokenize_auto_detects() {
        let table = Tokenizer::new().tokenize("a|b|c\n1|2|3");
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_non_ascii_delimiter_falls_back_to_comma() {
        let table = Tokenizer::new().tokenize_with("a,b\n1,2", '§');
        assert_eq!(table.rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_configured_quote_character() {
        let tokenizer = Tokenizer::with_config(TokenizerConfig {
            delimiter: Some(','),
            quote: '\'',
        });
        let table = tokenizer.tokenize("'a,b',c");
        assert_eq!(table.rows, vec![vec!["a,b", "c"]]);
    }
}

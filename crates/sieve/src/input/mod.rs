//! Delimited-text input: tokenizing and table access.

mod source;
mod tokenizer;

pub use source::{Row, SourceMetadata, Table};
pub use tokenizer::{Tokenizer, TokenizerConfig, detect_delimiter};

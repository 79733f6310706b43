//! CLI command implementations.

use std::path::Path;

pub mod aggregate;
pub mod extract;
pub mod inspect;

/// How a command finished, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The requested item is not in the input.
    NotFound,
}

pub type CommandResult = Result<Outcome, Box<dyn std::error::Error>>;

/// Read an input file as UTF-8 text.
pub fn read_input(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let bytes = std::fs::read(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

//! Configuration file loading.

use std::path::Path;

use sieve::SieveConfig;

/// Load a [`SieveConfig`] from a TOML file, or defaults when no path is given.
///
/// ```toml
/// [tokenizer]
/// delimiter = ";"
///
/// [inference]
/// default_convention = "month-first"
/// sample_rows = 100
///
/// [range]
/// start = "2021-01-01"
/// ```
pub fn load(path: Option<&Path>) -> Result<SieveConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SieveConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    let config = parse(&contents)
        .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn parse(contents: &str) -> Result<SieveConfig, Box<dyn std::error::Error>> {
    let config: SieveConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve::DateConvention;

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
            [tokenizer]
            delimiter = ";"

            [inference]
            default_convention = "month-first"
            sample_rows = 100

            [range]
            start = "2021-01-01"
            end = "2021-12-31"
            "#,
        )
        .unwrap();

        assert_eq!(config.tokenizer.delimiter, Some(';'));
        assert_eq!(config.inference.default_convention, DateConvention::MonthFirst);
        assert_eq!(config.inference.sample_rows, 100);
        assert_eq!(config.range.end.map(|d| d.to_string()).as_deref(), Some("2021-12-31"));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse("").unwrap(), SieveConfig::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = parse(
            r#"
            [range]
            start = "2021-02-01"
            end = "2021-01-01"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_defaults() {
        assert_eq!(load(None).unwrap(), SieveConfig::default());
    }
}

//! rsuite Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Every section is optional; an empty file is a valid configuration.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use rsuite_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[api]\ncompany_id = \"exampleco0\"").unwrap();
//! assert_eq!(config.api.endpoint, "https://analytics.adobe.io/api/");
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [api]
//! api_key = "0123456789abcdef"
//! company_id = "exampleco0"
//! token = "eyJ..."
//!
//! [log]
//! level = "debug"
//!
//! [query]
//! suite_id = "examplersid"
//! limit = 50
//! ```

mod api;
mod error;
mod logging;
mod query;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use api::{ApiConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use query::QueryDefaults;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials and endpoint
    pub api: ApiConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Defaults for CLI queries
    pub query: QueryDefaults,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        validation::validate_config(&config)?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.query.suite_id.is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[api]
api_key = "0123456789abcdef"
company_id = "exampleco0"
token = "eyJhbGciOi"
timeout_secs = 10

[log]
level = "debug"
format = "json"

[query]
suite_id = "examplersid"
limit = 50
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.api.company_id, "exampleco0");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.api.validate_credentials().is_ok());
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.query.suite_id.as_deref(), Some("examplersid"));
        assert_eq!(config.query.limit, Some(50));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ncompany_id = \"fromfile0\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.company_id, "fromfile0");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}

//! Configuration validation
//!
//! Checks values that parse but cannot be used:
//! - API endpoint must be an http(s) URL ending with `/`
//! - Timeout must be positive
//! - A default suite id, when given, must not be empty
//!
//! Credentials are not checked here; commands that talk to the API call
//! [`crate::ApiConfig::validate_credentials`] themselves.

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.api.validate()?;
    validate_query(config)?;
    Ok(())
}

fn validate_query(config: &Config) -> Result<()> {
    if let Some(suite_id) = &config.query.suite_id
        && suite_id.trim().is_empty()
    {
        return Err(ConfigError::invalid_value(
            "query",
            "suite_id",
            "must not be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_default_suite() {
        let result = Config::from_str("[query]\nsuite_id = \"\"");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                section: "query",
                field: "suite_id",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_endpoint() {
        let result = Config::from_str("[api]\nendpoint = \"ftp://example.com/\"");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "endpoint",
                ..
            })
        ));
    }
}

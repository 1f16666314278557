//! API configuration
//!
//! Credentials and endpoint of the analytics reporting API.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Default reporting API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://analytics.adobe.io/api/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client configuration
///
/// # Example
///
/// ```toml
/// [api]
/// api_key = "0123456789abcdef"
/// company_id = "exampleco0"
/// token = "eyJ..."
/// endpoint = "https://analytics.adobe.io/api/"
/// timeout_secs = 30
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Client id sent as `x-api-key`
    pub api_key: String,

    /// Global company id, part of every request URL
    pub company_id: String,

    /// OAuth bearer token
    pub token: String,

    /// Base URL; requests go to `endpoint + company_id + resource`
    /// Default: "https://analytics.adobe.io/api/"
    pub endpoint: String,

    /// Request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            company_id: String::new(),
            token: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace credentials with values given on the command line or environment
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        company_id: Option<String>,
        token: Option<String>,
    ) -> Self {
        if let Some(api_key) = api_key {
            self.api_key = api_key;
        }
        if let Some(company_id) = company_id {
            self.company_id = company_id;
        }
        if let Some(token) = token {
            self.token = token;
        }
        self
    }

    /// Check that every credential needed for a request is set
    pub fn validate_credentials(&self) -> Result<()> {
        for (field, value) in [
            ("api_key", &self.api_key),
            ("company_id", &self.company_id),
            ("token", &self.token),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::missing_field("api", field));
            }
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "api",
                "timeout_secs",
                "must be greater than 0",
            ));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::invalid_value(
                "api",
                "endpoint",
                format!("'{}' is not an http(s) URL", self.endpoint),
            ));
        }
        if !self.endpoint.ends_with('/') {
            return Err(ConfigError::invalid_value(
                "api",
                "endpoint",
                "must end with '/'",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("company_id", &self.company_id)
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApiConfig {
        ApiConfig {
            api_key: "key".to_string(),
            company_id: "exampleco0".to_string(),
            token: "token".to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint, "https://analytics.adobe.io/api/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_custom_values() {
        let toml = r#"
api_key = "abc"
company_id = "exampleco0"
token = "t0k3n"
endpoint = "http://localhost:8080/api/"
timeout_secs = 5
"#;
        let config: ApiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.company_id, "exampleco0");
        assert_eq!(config.endpoint, "http://localhost:8080/api/");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validate_credentials() {
        assert!(complete().validate_credentials().is_ok());

        let missing_token = ApiConfig {
            token: " ".to_string(),
            ..complete()
        };
        let err = missing_token.validate_credentials().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "api",
                field: "token"
            }
        ));
    }

    #[test]
    fn test_overrides_win() {
        let config = complete().with_overrides(Some("other".to_string()), None, None);
        assert_eq!(config.api_key, "other");
        assert_eq!(config.company_id, "exampleco0");
        assert_eq!(config.token, "token");
    }

    #[test]
    fn test_validate_endpoint() {
        let config = ApiConfig {
            endpoint: "analytics.adobe.io/api/".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            endpoint: "https://analytics.adobe.io/api".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", complete());

        assert!(!debug.contains("\"key\""));
        assert!(!debug.contains("\"token\""));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("exampleco0"));
    }
}

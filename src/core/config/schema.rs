//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! units_file = "~/.qalculate/definitions/units.xml"
//! timeout_secs = 30
//!
//! [endpoints]
//! average = "https://api.bitcoinaverage.com/ticker/EUR/24h_avg"
//! last = "https://api.bitcoinaverage.com/ticker/EUR/last"
//! ```
//!
//! # Validation
//!
//! Endpoint URLs are validated while parsing (see
//! [`EndpointUrl`](crate::core::types::EndpointUrl)). Other values are
//! checked by [`FileConfig::validate`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::EndpointUrl;

/// Settings read from the config file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Units file path; `~` is expanded.
    pub units_file: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Rate endpoint overrides.
    pub endpoints: Option<EndpointsConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".into(),
            ));
        }

        if let Some(path) = &self.units_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "units_file cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Endpoint overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointsConfig {
    /// 24-hour average endpoint.
    pub average: Option<EndpointUrl>,

    /// Last trade endpoint.
    pub last: Option<EndpointUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            units_file = "~/units.xml"
            timeout_secs = 5

            [endpoints]
            average = "https://example.com/avg"
            last = "http://localhost:9000/last"
            "#,
        )
        .unwrap();

        assert_eq!(config.units_file, Some(PathBuf::from("~/units.xml")));
        assert_eq!(config.timeout_secs, Some(5));
        let endpoints = config.endpoints.unwrap();
        assert_eq!(
            endpoints.average.map(String::from).as_deref(),
            Some("https://example.com/avg")
        );
        assert_eq!(
            endpoints.last.map(String::from).as_deref(),
            Some("http://localhost:9000/last")
        );
    }

    #[test]
    fn empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<FileConfig>("currency = \"USD\"").is_err());
        assert!(toml::from_str::<FileConfig>("[endpoints]\nmedian = \"https://x\"").is_err());
    }

    #[test]
    fn invalid_endpoint_rejected() {
        assert!(toml::from_str::<FileConfig>("[endpoints]\nlast = \"not a url\"").is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = FileConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}

//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Rate`] - Exact decimal exchange rate
//! - [`EndpointUrl`] - Validated HTTP(S) URL of a rate endpoint
//!
//! # Validation
//!
//! These types enforce validity at construction time. A [`Rate`] is never
//! a float, so the text written to the units file is exactly what the
//! endpoint returned.
//!
//! # Examples
//!
//! ```
//! use qalc_btc::core::types::{EndpointUrl, Rate};
//!
//! let rate: Rate = "433.21987654".parse().unwrap();
//! assert_eq!(rate.to_string(), "433.21987654");
//!
//! assert!(EndpointUrl::new("https://example.com/rate").is_ok());
//! assert!(EndpointUrl::new("ftp://example.com/rate").is_err());
//! ```

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest decimal exponent a [`Rate`] may carry, in either direction.
///
/// Plain notation is written digit by digit, so `1e999999999` would
/// render as a billion characters.
pub const MAX_RATE_EXPONENT: i64 = 1000;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty rate")]
    EmptyRate,

    #[error("invalid rate '{0}': not a decimal number")]
    InvalidRate(String),

    #[error("invalid rate '{0}': exponent out of range")]
    RateOutOfRange(String),

    #[error("invalid endpoint URL '{0}': must start with http:// or https://")]
    InvalidUrl(String),
}

/// An exchange rate as an exact, arbitrary-precision decimal.
///
/// Parsing keeps the scale of the input, so `"1.50"` displays as `"1.50"`.
/// There is no precision limit. Scientific notation is accepted and
/// displayed in plain notation.
///
/// # Example
///
/// ```
/// use qalc_btc::core::types::Rate;
///
/// assert_eq!("1.50".parse::<Rate>().unwrap().to_string(), "1.50");
/// assert_eq!("4.3e2".parse::<Rate>().unwrap().to_string(), "430");
/// assert_eq!(" 12.5\n".parse::<Rate>().unwrap().to_string(), "12.5");
/// assert!("12,5".parse::<Rate>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rate(BigDecimal);

impl Rate {
    /// The underlying decimal value.
    pub fn value(&self) -> &BigDecimal {
        &self.0
    }
}

impl FromStr for Rate {
    type Err = TypeError;

    /// Parse a rate, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyRate);
        }

        let value = BigDecimal::from_str(trimmed)
            .map_err(|_| TypeError::InvalidRate(trimmed.to_string()))?;

        let (_, scale) = value.as_bigint_and_exponent();
        if scale.abs() > MAX_RATE_EXPONENT {
            return Err(TypeError::RateOutOfRange(trimmed.to_string()));
        }

        Ok(Self(value))
    }
}

impl From<BigDecimal> for Rate {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

/// URL of an endpoint that answers a GET with a plain-text rate.
///
/// Only the scheme is checked here; everything else is left to the HTTP
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Create a validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidUrl` unless the URL is http or https.
    pub fn new(url: impl Into<String>) -> Result<Self, TypeError> {
        let url = url.into();
        let lower = url.to_ascii_lowercase();
        let rest = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() => Ok(Self(url)),
            _ => Err(TypeError::InvalidUrl(url)),
        }
    }

    /// Wrap a built-in URL constant without validation.
    pub(crate) fn from_static(url: &'static str) -> Self {
        debug_assert!(Self::new(url).is_ok(), "built-in endpoint must be http(s)");
        Self(url.to_string())
    }

    /// Get the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EndpointUrl {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EndpointUrl> for String {
    fn from(url: EndpointUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rate {
        use super::*;

        #[test]
        fn keeps_all_fraction_digits() {
            let rate: Rate = "433.21987654".parse().unwrap();
            assert_eq!(rate.to_string(), "433.21987654");
        }

        #[test]
        fn keeps_trailing_zeros() {
            let rate: Rate = "250.000".parse().unwrap();
            assert_eq!(rate.to_string(), "250.000");
        }

        #[test]
        fn integer_rate() {
            let rate: Rate = "40000".parse().unwrap();
            assert_eq!(rate.value(), &BigDecimal::from(40000));
            assert_eq!(rate.to_string(), "40000");
        }

        #[test]
        fn scientific_notation_becomes_plain() {
            let rate: Rate = "1.25E3".parse().unwrap();
            assert_eq!(rate.to_string(), "1250");
        }

        #[test]
        fn empty_is_rejected() {
            assert_eq!("".parse::<Rate>(), Err(TypeError::EmptyRate));
            assert_eq!(" \n".parse::<Rate>(), Err(TypeError::EmptyRate));
        }

        #[test]
        fn garbage_is_rejected() {
            assert!(matches!(
                "{\"rate\": 1}".parse::<Rate>(),
                Err(TypeError::InvalidRate(_))
            ));
            assert!("NaN".parse::<Rate>().is_err());
            assert!("12.5 EUR".parse::<Rate>().is_err());
        }

        #[test]
        fn long_fractions_are_exact() {
            let tiny = "0.000000000000000000000000000012345";
            assert_eq!(tiny.parse::<Rate>().unwrap().to_string(), tiny);

            let wide = "12345678901234567890.123456789012";
            assert_eq!(wide.parse::<Rate>().unwrap().to_string(), wide);

            let forty = format!("0.{}", "1".repeat(40));
            assert_eq!(forty.parse::<Rate>().unwrap().to_string(), forty);
        }

        #[test]
        fn huge_exponent_is_rejected() {
            assert_eq!(
                "1e999999999".parse::<Rate>(),
                Err(TypeError::RateOutOfRange("1e999999999".into()))
            );
            assert!("1e-5000".parse::<Rate>().is_err());
            assert!("1e999".parse::<Rate>().is_ok());
        }
    }

    mod endpoint_url {
        use super::*;

        #[test]
        fn accepts_http_and_https() {
            assert!(EndpointUrl::new("http://localhost:8080/last").is_ok());
            assert!(EndpointUrl::new("HTTPS://example.com").is_ok());
        }

        #[test]
        fn rejects_other_schemes() {
            assert!(EndpointUrl::new("file:///etc/passwd").is_err());
            assert!(EndpointUrl::new("example.com/rate").is_err());
            assert!(EndpointUrl::new("https://").is_err());
        }

        #[test]
        fn deserializes_with_validation() {
            #[derive(Deserialize)]
            struct Holder {
                url: EndpointUrl,
            }

            let ok: Holder = toml::from_str("url = \"https://example.com\"").unwrap();
            assert_eq!(ok.url.as_str(), "https://example.com");

            assert!(toml::from_str::<Holder>("url = \"gopher://x\"").is_err());
        }
    }
}

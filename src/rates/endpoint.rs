//! rates::endpoint
//!
//! Built-in rate endpoints and the URL selection policy.
//!
//! # Selection
//!
//! 1. A custom URL wins over everything
//! 2. Otherwise the last-trade endpoint if requested
//! 3. Otherwise the 24-hour average endpoint
//!
//! # Example
//!
//! ```
//! use qalc_btc::rates::{Endpoints, RateSelection, DEFAULT_LAST_URL};
//!
//! let endpoints = Endpoints::default();
//! let selection = RateSelection::from_flags(None, true);
//! assert_eq!(selection.resolve(&endpoints), DEFAULT_LAST_URL);
//!
//! let custom = RateSelection::from_flags(Some("http://localhost/rate".into()), true);
//! assert_eq!(custom.resolve(&endpoints), "http://localhost/rate");
//! ```

use crate::core::types::EndpointUrl;

/// 24-hour average EUR/BTC price.
pub const DEFAULT_AVERAGE_URL: &str = "https://api.bitcoinaverage.com/ticker/EUR/24h_avg";

/// Last trade EUR/BTC price.
pub const DEFAULT_LAST_URL: &str = "https://api.bitcoinaverage.com/ticker/EUR/last";

/// The two named endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Trailing 24-hour average.
    pub average: EndpointUrl,
    /// Most recent trade.
    pub last: EndpointUrl,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            average: EndpointUrl::from_static(DEFAULT_AVERAGE_URL),
            last: EndpointUrl::from_static(DEFAULT_LAST_URL),
        }
    }
}

/// Which rate the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RateSelection {
    /// The 24-hour average endpoint.
    #[default]
    Average,
    /// The last-trade endpoint.
    LastTrade,
    /// A user-supplied URL returning a plain-text rate.
    Custom(String),
}

impl RateSelection {
    /// Build a selection from the `--url` and `--last` flags.
    pub fn from_flags(url: Option<String>, last: bool) -> Self {
        match url {
            Some(url) => RateSelection::Custom(url),
            None if last => RateSelection::LastTrade,
            None => RateSelection::Average,
        }
    }

    /// The URL to fetch.
    pub fn resolve<'a>(&'a self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            RateSelection::Custom(url) => url,
            RateSelection::LastTrade => endpoints.last.as_str(),
            RateSelection::Average => endpoints.average.as_str(),
        }
    }
}

//! rates
//!
//! Fetching the EUR/BTC exchange rate.
//!
//! # Architecture
//!
//! The [`RateSource`] trait is the seam between the engine and the network.
//! The engine never builds HTTP requests itself; it is handed a source.
//!
//! # Modules
//!
//! - `endpoint`: Built-in endpoints and URL selection
//! - [`http`]: reqwest implementation against a plain-text endpoint
//! - [`mock`]: In-memory implementation for deterministic testing
//!
//! # Failure Semantics
//!
//! A fetch is attempted exactly once. Network failures, timeouts, non-2xx
//! responses and bodies that are not a decimal all end the run.

mod endpoint;
pub mod http;
pub mod mock;

pub use endpoint::{
    Endpoints, RateSelection, DEFAULT_AVERAGE_URL, DEFAULT_LAST_URL,
};
pub use http::HttpRateSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Rate, TypeError};

/// Errors from fetching a rate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateError {
    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    NetworkError(String),

    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not UTF-8 text.
    #[error("response body is not valid UTF-8")]
    InvalidEncoding,

    /// The response body was not a decimal number.
    #[error("response body is not a rate")]
    InvalidRate(#[from] TypeError),

    /// The HTTP client could not be set up.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// A place the current rate can be read from.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the rate from `url`.
    async fn fetch(&self, url: &str) -> Result<Rate, RateError>;
}

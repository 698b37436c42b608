//! rates::http
//!
//! [`RateSource`] over HTTP using reqwest.
//!
//! # Protocol
//!
//! One `GET` to the endpoint. A 2xx response body, decoded as UTF-8 and
//! stripped of surrounding whitespace, must be a plain decimal number.
//! Anything else is a [`RateError`]. There is no retry.
//!
//! # Example
//!
//! ```no_run
//! use qalc_btc::rates::{HttpRateSource, RateSource, DEFAULT_AVERAGE_URL};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let source = HttpRateSource::new(Duration::from_secs(30)).unwrap();
//! let rate = source.fetch(DEFAULT_AVERAGE_URL).await.unwrap();
//! println!("1 BTC = {} EUR", rate);
//! # });
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use super::{RateError, RateSource};
use crate::core::types::Rate;

/// User-Agent header value for rate requests.
const USER_AGENT_VALUE: &str = concat!("qalc-btc/", env!("CARGO_PKG_VERSION"));

/// HTTP rate source.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    /// HTTP client for making requests
    client: Client,
}

impl HttpRateSource {
    /// Create a source whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Client` if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, RateError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .default_headers(headers)
            .build()
            .map_err(|e| RateError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a source around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self, url: &str) -> Result<Rate, RateError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_request_error)?;
        let text = std::str::from_utf8(&body).map_err(|_| RateError::InvalidEncoding)?;

        Ok(text.parse::<Rate>()?)
    }
}

fn map_request_error(error: reqwest::Error) -> RateError {
    if error.is_timeout() {
        RateError::Timeout
    } else if error.is_builder() {
        RateError::Client(error.to_string())
    } else {
        RateError::NetworkError(error.to_string())
    }
}

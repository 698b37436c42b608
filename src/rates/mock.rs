//! rates::mock
//!
//! Mock rate source for deterministic testing.
//!
//! # Example
//!
//! ```
//! use qalc_btc::rates::mock::MockRateSource;
//! use qalc_btc::rates::RateSource;
//!
//! # tokio_test::block_on(async {
//! let source = MockRateSource::with_rate("433.21987654".parse().unwrap());
//!
//! let rate = source.fetch("http://example.invalid/rate").await.unwrap();
//! assert_eq!(rate.to_string(), "433.21987654");
//! assert_eq!(source.requests(), vec!["http://example.invalid/rate".to_string()]);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{RateError, RateSource};
use crate::core::types::Rate;

/// Mock rate source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockRateSource {
    inner: Arc<Mutex<MockRateSourceInner>>,
}

#[derive(Debug)]
struct MockRateSourceInner {
    /// What every fetch returns.
    response: Result<Rate, RateError>,
    /// URLs fetched, in order.
    requests: Vec<String>,
}

impl MockRateSource {
    /// A source that always returns `rate`.
    pub fn with_rate(rate: Rate) -> Self {
        Self::with_response(Ok(rate))
    }

    /// A source that always fails with `error`.
    pub fn failing(error: RateError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<Rate, RateError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockRateSourceInner {
                response,
                requests: Vec::new(),
            })),
        }
    }

    /// Change the rate returned by later fetches.
    pub fn set_rate(&self, rate: Rate) {
        let mut inner = self.inner.lock().unwrap();
        inner.response = Ok(rate);
    }

    /// URLs fetched so far.
    pub fn requests(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    async fn fetch(&self, url: &str) -> Result<Rate, RateError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(url.to_string());
        inner.response.clone()
    }
}

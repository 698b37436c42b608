//! engine
//!
//! Runs one update: Load -> Locate -> Fetch -> Write -> Serialize.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read the units file, or start from an empty `QALCULATE` root
//!    if it does not exist
//! 2. **Locate**: Find the Bitcoin unit, creating it and its category if
//!    needed
//! 3. **Fetch**: Ask the [`RateSource`](crate::rates::RateSource) for the rate
//! 4. **Write**: Set the relation of the located unit
//! 5. **Serialize**: Render the document and replace the file
//!
//! Each step runs only if the previous one succeeded. A consistency error in
//! Locate therefore means no request is made and the file is not touched.
//!
//! # Concurrency
//!
//! The file is read and later replaced with no lock held in between. Two
//! runs against the same file at once can lose one of the updates.
//!
//! # Example
//!
//! ```
//! use qalc_btc::engine::{run_update, Context, UpdateRequest};
//! use qalc_btc::rates::mock::MockRateSource;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let request = UpdateRequest {
//!     units_file: dir.path().join("units.xml"),
//!     url: "http://example.invalid/rate".to_string(),
//! };
//! let source = MockRateSource::with_rate("433.21987654".parse().unwrap());
//!
//! let outcome = tokio_test::block_on(run_update(&Context::default(), &request, &source)).unwrap();
//! assert!(outcome.created_unit);
//!
//! let written = std::fs::read_to_string(&request.units_file).unwrap();
//! assert!(written.contains("<relation>433.21987654</relation>"));
//! ```

pub mod runner;

pub use runner::{load_document, run_update, write_document, UpdateOutcome, UpdateRequest};

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::rates::RateError;
use crate::ui::output::{self, Verbosity};
use crate::units::LocateError;

/// Execution context for a run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// How much progress output to print.
    pub verbosity: Verbosity,
    /// Render the updated document without writing it.
    pub dry_run: bool,
}

impl Context {
    /// Print a progress message.
    ///
    /// A dry run prints the document on stdout, so progress goes to stderr.
    pub fn progress(&self, message: impl Display) {
        if self.dry_run {
            output::info_stderr(message, self.verbosity);
        } else {
            output::info(message, self.verbosity);
        }
    }
}

/// Errors from a run, one variant per failing step.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read units file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse units file '{path}'")]
    ParseError {
        path: PathBuf,
        source: DocumentError,
    },

    #[error("inconsistent units file '{path}'")]
    Consistency {
        path: PathBuf,
        source: LocateError,
    },

    #[error("failed to fetch rate from '{url}'")]
    FetchError { url: String, source: RateError },

    #[error("failed to write units file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

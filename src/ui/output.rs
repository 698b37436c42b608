//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! A normal run is silent. `--verbose` adds progress messages on stdout
//! (stderr on a dry run, where stdout holds the document); `--debug` adds
//! `[debug]` diagnostics on stderr as well.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Normal mode - errors only
    #[default]
    Normal,
    /// Verbose mode - progress messages
    Verbose,
    /// Debug mode - progress messages and diagnostics
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// True if progress messages should be shown.
    pub fn shows_progress(self) -> bool {
        self >= Verbosity::Verbose
    }
}

/// Print a progress message (verbose and debug modes).
pub fn info(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        println!("{}", message);
    }
}

/// Print a progress message on stderr (verbose and debug modes).
///
/// Used when stdout carries data, such as the document under `--dry-run`.
pub fn info_stderr(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        eprintln!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

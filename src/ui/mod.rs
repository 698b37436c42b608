//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing messages go through this module so verbosity is handled
//! in one place. Progress messages go to stdout; diagnostics and errors go
//! to stderr.

pub mod output;

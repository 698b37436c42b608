//! cli::commands
//!
//! Command handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Turns flags and settings into an engine request
//! 2. Calls the engine to execute it
//! 3. Formats and displays output
//!
//! # Async
//!
//! The rate fetch is async because it involves network I/O. The update
//! handler drives it on a current-thread tokio runtime, so the command as
//! a whole is blocking.

mod completion;
mod update;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use update::{update, update_with_source};

//! core
//!
//! Core domain types, configuration and path routing.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Rate, EndpointUrl
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for the units and config files
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Defaults are explicit settings handed to the engine, never globals
//!   read deep inside it

pub mod config;
pub mod paths;
pub mod types;

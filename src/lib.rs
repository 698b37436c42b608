//! qalc-btc - Keep the Bitcoin rate in Qalculate's units file current
//!
//! Qalculate reads user-defined units from
//! `~/.qalculate/definitions/units.xml`. This crate maintains one entry in
//! that file: a "Bitcoin" alias of the euro in the Currency category. Each
//! run fetches the current EUR/BTC rate and writes it into the unit's
//! relation, leaving every other part of the file as it was.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs Load -> Locate -> Fetch -> Write -> Serialize
//! - [`core`] - Domain types, configuration and paths
//! - [`document`] - Mutable XML tree with faithful round-tripping
//! - [`units`] - The units-file schema and the maintained unit
//! - [`rates`] - Rate sources (HTTP and mock)
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Content unrelated to the maintained unit is written back unchanged
//! 2. A second run never duplicates the unit or its category
//! 3. Ambiguous files are rejected before any request or write
//! 4. Rates are exact decimals from fetch to file

pub mod cli;
pub mod core;
pub mod document;
pub mod engine;
pub mod rates;
pub mod ui;
pub mod units;

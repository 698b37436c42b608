//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Merge CLI flags over the loaded configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. The units file is only touched by the
//! engine.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::core::config::{Config, ConfigError, FileConfig, Settings};
use crate::engine;
use crate::ui::output;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        return commands::completion(shell);
    }

    let ctx = engine::Context {
        verbosity: cli.verbosity(),
        dry_run: cli.dry_run,
    };

    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        output::debug(format!("loaded config from {}", path.display()), ctx.verbosity);
    }
    let settings = resolve_settings(&config.file, &cli, dirs::home_dir().as_deref())?;

    commands::update(&ctx, &settings, &cli.rate_selection())
}

/// Merge CLI flags over the config file, then resolve settings.
///
/// CLI flags always take precedence. An explicit `--file` is applied before
/// the default units file is resolved, so an absolute path works without a
/// home directory.
pub fn resolve_settings(
    file: &FileConfig,
    cli: &Cli,
    home: Option<&Path>,
) -> Result<Settings, ConfigError> {
    let mut merged = file.clone();
    if let Some(path) = &cli.file {
        merged.units_file = Some(path.clone());
    }

    let mut settings = Settings::resolve(&merged, home)?;
    if let Some(secs) = cli.timeout {
        settings.timeout = Duration::from_secs(secs);
    }
    Ok(settings)
}

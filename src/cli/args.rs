//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--last` / `-l`: Use the last-trade endpoint
//! - `--url <URL>` / `-u <URL>`: Use a custom endpoint (conflicts with `--last`)
//! - `--file <PATH>` / `-f <PATH>`: Units file to update
//! - `--verbose` / `-v`: Progress messages on stdout
//! - `--debug`: Diagnostics on stderr
//! - `--dry-run`: Print the updated file instead of writing it
//! - `--timeout <SECONDS>`: HTTP request timeout
//! - `--completions <SHELL>`: Print a shell completion script and exit

use clap::Parser;
use std::path::PathBuf;

use crate::rates::RateSelection;
use crate::ui::output::Verbosity;

/// Update the EUR/BTC rate in Qalculate's units file.
///
/// Finds (or creates) the "Bitcoin" alias unit in the Currency category,
/// fetches the current rate and writes it back, leaving the rest of the
/// file untouched.
#[derive(Parser, Debug)]
#[command(name = "qalc-btc")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Update with the 24h average (default)
    qalc-btc

    # Use the last trade price and show progress
    qalc-btc --last --verbose

    # Use your own endpoint returning a plain-text rate
    qalc-btc --url https://rates.example.com/eur-btc

    # Preview the result without touching the file
    qalc-btc --dry-run --file ~/units.xml")]
pub struct Cli {
    /// Use last trade instead of the 24h average value
    #[arg(short, long, conflicts_with = "url")]
    pub last: bool,

    /// Custom URL which returns the EUR/BTC rate in plain text
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Qalculate units definition file [default: ~/.qalculate/definitions/units.xml]
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print the updated file to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Output verbosity from `--verbose` and `--debug`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.debug)
    }

    /// Which endpoint the flags ask for.
    pub fn rate_selection(&self) -> RateSelection {
        RateSelection::from_flags(self.url.clone(), self.last)
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

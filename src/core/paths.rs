//! core::paths
//!
//! Centralized path routing for the units file and the config file.
//!
//! # Locations
//!
//! - Units file: `~/.qalculate/definitions/units.xml` unless overridden
//! - Config file, first found of:
//!   1. `$QALC_BTC_CONFIG`
//!   2. `$XDG_CONFIG_HOME/qalc-btc/config.toml`
//!   3. `~/.qalc-btc/config.toml`
//!
//! Paths given by the user (flag or config) go through [`expand_tilde_with`].
//!
//! # Example
//!
//! ```
//! use qalc_btc::core::paths::expand_tilde_with;
//! use std::path::{Path, PathBuf};
//!
//! let home = Some(PathBuf::from("/home/satoshi"));
//! assert_eq!(
//!     expand_tilde_with(Path::new("~/units.xml"), home.clone()),
//!     Some(PathBuf::from("/home/satoshi/units.xml"))
//! );
//! assert_eq!(
//!     expand_tilde_with(Path::new("/tmp/units.xml"), home),
//!     Some(PathBuf::from("/tmp/units.xml"))
//! );
//! ```

use std::path::{Component, Path, PathBuf};

/// Units file location relative to the home directory.
pub const UNITS_FILE_IN_HOME: &str = ".qalculate/definitions/units.xml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "QALC_BTC_CONFIG";

/// Config file location relative to `$XDG_CONFIG_HOME`.
const CONFIG_IN_XDG: &str = "qalc-btc/config.toml";

/// Config file location relative to the home directory.
const CONFIG_IN_HOME: &str = ".qalc-btc/config.toml";

/// Expand a leading `~` to `home`.
///
/// Returns `None` if the path starts with `~` and no home directory is known.
/// Only a bare `~` component is expanded; `~user` forms are left as-is.
pub fn expand_tilde_with(path: &Path, home: Option<PathBuf>) -> Option<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let mut expanded = home?;
            let rest = components.as_path();
            if !rest.as_os_str().is_empty() {
                expanded.push(rest);
            }
            Some(expanded)
        }
        _ => Some(path.to_path_buf()),
    }
}

/// Default units file under the given home directory.
pub fn default_units_file(home: &Path) -> PathBuf {
    home.join(UNITS_FILE_IN_HOME)
}

/// Config file candidates in search order.
///
/// `env` looks up an environment variable; it is a parameter so the search
/// order can be tested without touching the process environment.
pub fn config_candidates<F>(env: F, home: Option<&Path>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let mut candidates = Vec::new();

    if let Some(explicit) = env(CONFIG_ENV).filter(|v| !v.is_empty()) {
        candidates.push(PathBuf::from(explicit));
    }

    if let Some(xdg_home) = env("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        candidates.push(PathBuf::from(xdg_home).join(CONFIG_IN_XDG));
    }

    if let Some(home) = home {
        candidates.push(home.join(CONFIG_IN_HOME));
    }

    candidates
}

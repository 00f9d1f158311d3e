//! Path resolution for the application home and its derived locations.
//!
//! The home directory holds the persisted configuration and the managed
//! link directory.  Resolution order: explicit override (`--home`), the
//! `SLM_HOME` environment variable, then `$HOME/.slm` (`USERPROFILE` on
//! Windows).

use std::path::{Path, PathBuf};

/// Name of the subdirectory holding the live managed symlinks.
const APP_DIRECTORY: &str = "app";

/// File name of the persisted configuration within the home directory.
const CONFIG_FILE: &str = "configuration.json";

/// Resolve the application home directory.
///
/// `override_home` wins when given; otherwise `SLM_HOME`, then
/// `$HOME/.slm`.  Falls back to `./.slm` when no home variable is set.
#[must_use]
pub fn app_home(override_home: Option<&Path>) -> PathBuf {
    if let Some(home) = override_home {
        return home.to_path_buf();
    }
    if let Ok(home) = std::env::var("SLM_HOME") {
        return PathBuf::from(home);
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
        .join(".slm")
}

/// Path of the persisted configuration file under `home`.
#[must_use]
pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

/// Path of the managed directory under `home`, one live symlink per
/// declared name.
#[must_use]
pub fn managed_dir(home: &Path) -> PathBuf {
    home.join(APP_DIRECTORY)
}

//! Where blocktint keeps its files
//!
//! ```text
//! <config dir>/blocktint/
//!     config.yaml      engine settings
//!     themes/*.yaml    user themes, shadowing the built-ins
//!     logs/            daily log files
//! ```
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` or `~/.config` on Unix and macOS, and
//! `%APPDATA%` on Windows.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "blocktint";

/// `blocktint/` under the platform config directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = unix_config_base(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir());

    base.map(|dir| dir.join(APP_DIR))
}

/// XDG base if set and non-empty, else `~/.config`. `dirs::config_dir` is not
/// used since it points into `Library/Application Support` on macOS.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn unix_config_base(xdg: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| home.join(".config")))
}

pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

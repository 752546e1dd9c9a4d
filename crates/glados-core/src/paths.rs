//! Filesystem locations for user configuration.

use std::path::PathBuf;

use crate::settings::SettingsError;

/// Name of the application's directory under the platform config dir.
pub const APP_DIR_NAME: &str = "glados";

/// `<config dir>/glados`, e.g. `~/.config/glados` on Linux.
///
/// # Errors
///
/// Returns [`SettingsError::NoConfigDir`] when the platform has no
/// configuration directory for the current user.
pub fn config_root() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(SettingsError::NoConfigDir)
}

/// Default location of `settings.json`.
///
/// # Errors
///
/// See [`config_root`].
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    Ok(config_root()?.join("settings.json"))
}

/// Location of the user-level `.env` file.
///
/// # Errors
///
/// See [`config_root`].
pub fn env_file_path() -> Result<PathBuf, SettingsError> {
    Ok(config_root()?.join(".env"))
}

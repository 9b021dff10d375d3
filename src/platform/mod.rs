// Linkshelf platform paths
// Resolves where the config file and the link document live on each OS.
//
// Per-OS submodules are selected at compile time with `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory name used on case-sensitive, lowercase-convention systems.
pub const APP_DIR: &str = "linkshelf";

/// Directory name used on macOS and Windows.
pub const APP_DIR_TITLE: &str = "Linkshelf";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/linkshelf` or `~/.config/linkshelf`
/// - **macOS**: `~/Library/Application Support/Linkshelf`
/// - **Windows**: `%APPDATA%/Linkshelf`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory holding `dataStore.json`.
///
/// - **Linux**: `$XDG_DATA_HOME/linkshelf` or `~/.local/share/linkshelf`
/// - **macOS**: `~/Library/Application Support/Linkshelf`
/// - **Windows**: `%APPDATA%/Linkshelf`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

//! Configuration for the bridge.
//!
//! Every value has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable.

use std::path::PathBuf;

/// Extension appended to save paths that have none.
pub const DEFAULT_SAVE_EXTENSION: &str = "save";

/// Capacity of a bridge handle's command channel.
pub const DEFAULT_COMMAND_BUFFER: usize = 32;

const DEFAULT_CONFIG_DIR: &str = ".config/chessio/saves";
const DEV_SAVE_DIR: &str = "./saves";

/// Get the default save-file extension (without the leading dot).
///
/// Priority:
/// 1. `CHESSIO_SAVE_EXTENSION` env variable if set and non-empty
/// 2. `save` as fallback
pub fn get_save_extension() -> String {
    match std::env::var("CHESSIO_SAVE_EXTENSION") {
        Ok(ext) if !ext.trim_start_matches('.').is_empty() => {
            ext.trim_start_matches('.').to_string()
        }
        _ => DEFAULT_SAVE_EXTENSION.to_string(),
    }
}

/// Get the directory relative save paths are resolved against.
///
/// Priority:
/// 1. `CHESSIO_SAVE_DIR` env variable if set
/// 2. `$HOME/.config/chessio/saves` if HOME is set
/// 3. `./saves` as fallback
pub fn get_save_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHESSIO_SAVE_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_SAVE_DIR)
}

/// Get the command channel capacity for spawned bridges.
///
/// Priority:
/// 1. `CHESSIO_COMMAND_BUFFER` env variable if set (falls back to default
///    if the value cannot be parsed as a non-zero `usize`)
/// 2. `32` as fallback
pub fn get_command_buffer() -> usize {
    std::env::var("CHESSIO_COMMAND_BUFFER")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(DEFAULT_COMMAND_BUFFER)
}

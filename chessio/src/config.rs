//! Configuration for the terminal host.
//!
//! Bridge-level settings (save directory, extension, channel size) live in
//! `chess_io::config`; this module only adds what the binary itself needs.

use std::path::PathBuf;

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix of the daily log file names.
pub const LOG_FILE_PREFIX: &str = "chessio";

/// Get the directory log files are written to.
///
/// Priority:
/// 1. `CHESSIO_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHESSIO_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("CHESSIO_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

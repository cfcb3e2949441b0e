//! Error types for the bridge.
//!
//! Serializers and the persistence gateway return [`FileOperationError`]
//! values. Host-facing bridge operations wrap them in [`BridgeError`].

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum FileOperationError {
    #[error("{}", describe_missing(path))]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Could not parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Could not load {}: {message}", path.display())]
    Loading { path: PathBuf, message: String },

    #[error("File operation on {} failed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileOperationError {
    /// Classify an IO error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path,
                source: Some(err),
            }
        } else {
            Self::Io { path, source: err }
        }
    }

    /// An empty save path with no earlier save to fall back to.
    pub fn no_save_path() -> Self {
        Self::not_found(PathBuf::new())
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound {
            path: path.into(),
            source: None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path, .. }
            | Self::Parse { path, .. }
            | Self::Loading { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

fn describe_missing(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "No previous save path; give a file name".to_string()
    } else {
        format!("File not found: {}", path.display())
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    File(#[from] FileOperationError),

    #[error("{operation} is not supported by this bridge")]
    Unsupported { operation: &'static str },

    #[error("Bridge actor closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = FileOperationError::from_io("a.save", err);
        assert!(matches!(e, FileOperationError::FileNotFound { .. }));
        assert_eq!(e.path(), std::path::Path::new("a.save"));
    }

    #[test]
    fn test_from_io_keeps_other_kinds_generic() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e = FileOperationError::from_io("a.save", err);
        assert!(matches!(e, FileOperationError::Io { .. }));
    }

    #[test]
    fn test_bridge_error_is_transparent_over_file_errors() {
        let e: BridgeError = FileOperationError::not_found("x.save").into();
        assert_eq!(e.to_string(), "File not found: x.save");
        let u = BridgeError::Unsupported { operation: "load" };
        assert_eq!(u.to_string(), "load is not supported by this bridge");
    }

    #[test]
    fn test_missing_save_path_has_its_own_message() {
        let e = FileOperationError::no_save_path();
        assert!(matches!(e, FileOperationError::FileNotFound { .. }));
        assert_eq!(e.to_string(), "No previous save path; give a file name");
    }
}

//! Save/load gateway between a bridge and its serializer.

use std::path::{Path, PathBuf};

use crate::config;
use crate::error::FileOperationError;
use crate::traits::Serializer;

/// Which persistence operations a gateway offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceMode {
    #[default]
    ReadWrite,
    SaveOnly,
}

/// Wraps a serializer with path normalization.
pub struct PersistenceGateway<B> {
    serializer: Box<dyn Serializer<B>>,
    extension: String,
    mode: PersistenceMode,
}

impl<B> PersistenceGateway<B> {
    /// Read-write gateway using the configured default extension.
    pub fn new<S>(serializer: S) -> Self
    where
        S: Serializer<B> + 'static,
    {
        Self {
            serializer: Box::new(serializer),
            extension: config::get_save_extension(),
            mode: PersistenceMode::ReadWrite,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PersistenceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Append the default extension when the file name has none.
    pub fn normalize(&self, path: &Path) -> PathBuf {
        normalize_path(path, &self.extension)
    }

    /// Save `board` to the normalized `path`. Returns the path written.
    pub fn save(&self, board: &B, path: &Path) -> Result<PathBuf, FileOperationError> {
        let path = self.normalize(path);
        tracing::debug!("Saving board to {}", path.display());
        self.serializer.save(board, &path)?;
        Ok(path)
    }

    pub fn supports_load(&self) -> bool {
        self.mode == PersistenceMode::ReadWrite
    }

    /// Load a board from the normalized `path`.
    pub fn load(&self, path: &Path) -> Result<B, FileOperationError> {
        let path = self.normalize(path);
        tracing::debug!("Loading board from {}", path.display());
        self.serializer.load(&path)
    }
}

impl<B> std::fmt::Debug for PersistenceGateway<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("extension", &self.extension)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Append `.{extension}` to `path` if its file name carries no extension.
/// Any existing extension is kept as is. A trailing dot counts as no
/// extension, so `game.` becomes `game.save`.
pub fn normalize_path(path: &Path, extension: &str) -> PathBuf {
    let has_extension = path.extension().is_some_and(|ext| !ext.is_empty());
    if has_extension || path.file_name().is_none() || extension.is_empty() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    if path.extension().is_none() {
        name.push(".");
    }
    name.push(extension);
    PathBuf::from(name)
}

//! Scripted engine and in-memory serializer for testing hosts and the bridge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::FileOperationError;
use crate::events::{IOEvent, Output};
use crate::input::Input;
use crate::traits::{Engine, Serializer};
use crate::types::{PieceColor, Square};

/// Board of the [`MockEngine`]: a ply counter plus an optional checked king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MockBoard {
    pub ply: u32,
    pub checked: Option<Square>,
}

impl MockBoard {
    pub fn in_check(ply: u32, square: Square) -> Self {
        Self {
            ply,
            checked: Some(square),
        }
    }
}

/// Engine that accepts only the inputs it was scripted with.
///
/// Each accepted input advances the ply and emits the scripted events.
/// Every `receive` call is recorded, accepted or not.
#[derive(Debug, Default)]
pub struct MockEngine {
    responses: HashMap<&'static str, Vec<IOEvent>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept inputs named `input` (see [`Input::name`]) and emit `events`.
    #[must_use]
    pub fn accept(mut self, input: &'static str, events: impl IntoIterator<Item = IOEvent>) -> Self {
        self.responses.insert(input, events.into_iter().collect());
        self
    }

    /// Accept inputs named `input` without emitting events.
    #[must_use]
    pub fn accept_quietly(self, input: &'static str) -> Self {
        self.accept(input, Vec::new())
    }

    /// Shared log of input names passed to `receive`.
    pub fn calls(&self) -> Arc<Mutex<Vec<&'static str>>> {
        self.calls.clone()
    }
}

impl Engine for MockEngine {
    type Board = MockBoard;

    fn classical_board(&self) -> MockBoard {
        MockBoard::default()
    }

    fn receive(&self, board: &MockBoard, input: &Input) -> Option<Output<MockBoard>> {
        self.calls.lock().unwrap().push(input.name());
        let events = self.responses.get(input.name())?;
        let next = MockBoard {
            ply: board.ply + 1,
            checked: None,
        };
        Some(Output::new(next, events.iter().cloned()))
    }

    fn turn(&self, board: &MockBoard) -> PieceColor {
        if board.ply % 2 == 0 {
            PieceColor::White
        } else {
            PieceColor::Black
        }
    }

    fn checked_king(&self, board: &MockBoard, side: PieceColor) -> Option<Square> {
        if side == self.turn(board) {
            board.checked
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
enum Entry<B> {
    Board(B),
    Corrupt,
}

/// Serializer keeping boards in a shared map. Clones share storage.
#[derive(Debug)]
pub struct MemorySerializer<B> {
    files: Arc<Mutex<HashMap<PathBuf, Entry<B>>>>,
    unwritable: Arc<Mutex<Vec<PathBuf>>>,
}

impl<B> Clone for MemorySerializer<B> {
    fn clone(&self) -> Self {
        Self {
            files: self.files.clone(),
            unwritable: self.unwritable.clone(),
        }
    }
}

impl<B> Default for MemorySerializer<B> {
    fn default() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            unwritable: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<B: Clone> MemorySerializer<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, board: B) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), Entry::Board(board));
    }

    /// Store an entry that fails to parse on load.
    pub fn corrupt(&self, path: impl Into<PathBuf>) {
        self.files.lock().unwrap().insert(path.into(), Entry::Corrupt);
    }

    /// Make saves to `path` fail with `FileNotFound`.
    pub fn forbid(&self, path: impl Into<PathBuf>) {
        self.unwritable.lock().unwrap().push(path.into());
    }

    pub fn stored(&self, path: &Path) -> Option<B> {
        match self.files.lock().unwrap().get(path) {
            Some(Entry::Board(board)) => Some(board.clone()),
            _ => None,
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl<B: Clone + Send> Serializer<B> for MemorySerializer<B> {
    fn save(&self, board: &B, path: &Path) -> Result<(), FileOperationError> {
        if self.unwritable.lock().unwrap().iter().any(|p| p == path) {
            return Err(FileOperationError::not_found(path));
        }
        self.insert(path, board.clone());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<B, FileOperationError> {
        match self.files.lock().unwrap().get(path) {
            Some(Entry::Board(board)) => Ok(board.clone()),
            Some(Entry::Corrupt) => Err(FileOperationError::Parse {
                path: path.to_path_buf(),
                message: "corrupt entry".to_string(),
            }),
            None => Err(FileOperationError::not_found(path)),
        }
    }
}

//! Collaborator interfaces consumed by the bridge.
//!
//! The bridge never looks inside a board. Everything it needs to know about
//! one (what an input does to it, whose turn it is, whether that side is in
//! check) comes from an [`Engine`]. Persistence goes through a [`Serializer`].

use std::path::Path;

use crate::error::FileOperationError;
use crate::events::Output;
use crate::input::Input;
use crate::types::{PieceColor, Square};

/// A game-rules engine owning the board representation.
pub trait Engine {
    /// Opaque position snapshot. Replaced wholesale, never mutated by the bridge.
    type Board: Clone;

    /// The standard starting position.
    fn classical_board(&self) -> Self::Board;

    /// Apply one input. `None` means the input is illegal or inapplicable.
    fn receive(&self, board: &Self::Board, input: &Input) -> Option<Output<Self::Board>>;

    /// The side to move.
    fn turn(&self, board: &Self::Board) -> PieceColor;

    /// The square of `side`'s king if that side is in check.
    fn checked_king(&self, board: &Self::Board, side: PieceColor) -> Option<Square>;
}

/// Reads and writes boards. Errors are returned, never raised.
pub trait Serializer<B>: Send {
    fn save(&self, board: &B, path: &Path) -> Result<(), FileOperationError>;
    fn load(&self, path: &Path) -> Result<B, FileOperationError>;
}


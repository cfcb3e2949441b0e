use std::path::{Path, PathBuf};

use crate::error::{BridgeError, BridgeResult, FileOperationError};
use crate::events::IOEvent;
use crate::input::Input;
use crate::persistence::PersistenceGateway;
use crate::reactions::{Reaction, ReactionRegistry};
use crate::traits::Engine;

/// Host hook invoked after every accepted board change.
///
/// Receives the new board. There is no event for a check ending, so the hook
/// must clear any check indicator the host is showing.
pub type UpdateHook<B> = Box<dyn FnMut(&B) + Send>;

/// Owns the current board and mediates every host/engine interaction.
///
/// Each operation is one synchronous transaction: engine call, board swap,
/// update hook, event dispatch. Nothing is observable in between.
pub struct Bridge<E: Engine> {
    engine: E,
    board: E::Board,
    reactions: ReactionRegistry,
    update: UpdateHook<E::Board>,
    persistence: Option<PersistenceGateway<E::Board>>,
    last_save_path: Option<PathBuf>,
}

impl<E: Engine> Bridge<E> {
    /// Start from the engine's standard position.
    pub fn new<F>(engine: E, update: F) -> Self
    where
        F: FnMut(&E::Board) + Send + 'static,
    {
        let board = engine.classical_board();
        Self::with_board(engine, board, update)
    }

    /// Start from a board built by the host.
    pub fn with_board<F>(engine: E, board: E::Board, update: F) -> Self
    where
        F: FnMut(&E::Board) + Send + 'static,
    {
        Self {
            engine,
            board,
            reactions: ReactionRegistry::new(),
            update: Box::new(update),
            persistence: None,
            last_save_path: None,
        }
    }

    #[must_use]
    pub fn with_persistence(mut self, gateway: PersistenceGateway<E::Board>) -> Self {
        self.persistence = Some(gateway);
        self
    }

    pub fn board(&self) -> &E::Board {
        &self.board
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn reactions(&self) -> &ReactionRegistry {
        &self.reactions
    }

    pub fn persistence(&self) -> Option<&PersistenceGateway<E::Board>> {
        self.persistence.as_ref()
    }

    pub fn last_save_path(&self) -> Option<&Path> {
        self.last_save_path.as_deref()
    }

    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.add(reaction);
    }

    /// Hand one input to the engine and apply the resulting transition.
    ///
    /// An input the engine rejects has no effect at all.
    pub fn submit(&mut self, input: Input) {
        let Some(output) = self.engine.receive(&self.board, &input) else {
            tracing::debug!("Engine ignored {} input", input.name());
            return;
        };
        tracing::debug!(
            "Engine accepted {} input with {} event(s)",
            input.name(),
            output.events.len()
        );
        self.replace_board(output.board);
        self.reactions.dispatch_all(&output.events);
    }

    /// Save the current board.
    ///
    /// A non-empty `path` becomes the remembered save path. An empty one
    /// saves to the remembered path again.
    pub fn save(&mut self, path: impl AsRef<Path>) -> BridgeResult<()> {
        let gateway = self
            .persistence
            .as_ref()
            .ok_or(BridgeError::Unsupported { operation: "save" })?;

        let path = path.as_ref();
        let target = if path.as_os_str().is_empty() {
            self.last_save_path
                .clone()
                .ok_or_else(FileOperationError::no_save_path)?
        } else {
            gateway.normalize(path)
        };

        let written = gateway.save(&self.board, &target)?;
        tracing::info!("Saved game to {}", written.display());
        self.last_save_path = Some(written);
        Ok(())
    }

    /// Replace the board with one read from `path`.
    ///
    /// On success the update hook runs once and, if the side to move is
    /// already in check, one `ShowCheck` is dispatched. On failure the board
    /// is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> BridgeResult<()> {
        let gateway = match &self.persistence {
            Some(gateway) if gateway.supports_load() => gateway,
            _ => return Err(BridgeError::Unsupported { operation: "load" }),
        };

        let board = gateway.load(path.as_ref())?;
        tracing::info!("Loaded game from {}", path.as_ref().display());
        self.replace_board(board);

        let turn = self.engine.turn(&self.board);
        if let Some(square) = self.engine.checked_king(&self.board, turn) {
            self.reactions.dispatch(&IOEvent::ShowCheck { square });
        }
        Ok(())
    }

    fn replace_board(&mut self, board: E::Board) {
        self.board = board;
        (self.update)(&self.board);
    }
}

impl<E: Engine + std::fmt::Debug> std::fmt::Debug for Bridge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("engine", &self.engine)
            .field("reactions", &self.reactions.len())
            .field("persistence", &self.persistence)
            .field("last_save_path", &self.last_save_path)
            .finish_non_exhaustive()
    }
}

//! Typed command/event bridge between a chess rules engine and a host.
//!
//! The host submits [`Input`]s; the [`Bridge`] hands each one to the
//! [`Engine`], swaps in the board it returns, calls the host's update hook
//! and dispatches the emitted [`IOEvent`]s to registered [`Reaction`]s.
//! Boards are opaque here: legality, check detection and file formats
//! belong to the engine and its [`Serializer`].
//!
//! # Example
//!
//! ```ignore
//! use chess_io::{Bridge, Input, Reaction};
//!
//! let mut bridge = Bridge::new(engine, |board| view.refresh(board));
//! bridge.add_reaction(Reaction::on_check(|square| view.flash(square)));
//! bridge.submit(Input::mv("e2".parse()?, "e4".parse()?));
//! ```

pub mod actor;
pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod persistence;
pub mod reactions;
pub mod traits;
pub mod types;

pub use actor::{spawn, BridgeHandle};
pub use bridge::{Bridge, UpdateHook};
pub use error::{BridgeError, BridgeResult, FileOperationError};
pub use events::{DrawReason, EventBatch, EventKind, GameResult, IOEvent, Output, WinReason};
pub use input::{Input, PieceGenerator};
pub use persistence::{normalize_path, PersistenceGateway, PersistenceMode};
pub use reactions::{Reaction, ReactionRegistry};
pub use traits::{Engine, Serializer};
pub use types::{PieceColor, PieceKind, Square, SquareParseError};

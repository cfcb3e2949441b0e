//! Standard chess rules and save files for the `chess-io` bridge.

pub mod board;
pub mod board_display;
pub mod converters;
pub mod fen;
pub mod rules;
pub mod save_file;
pub mod uci;

pub use board::{ChessBoard, PendingPromotion};
pub use board_display::{DisplayBoard, DisplayBoardError};
pub use fen::{FenError, STARTING_FEN};
pub use rules::ChessRules;
pub use save_file::JsonSaveFile;
pub use uci::{format_uci_move, parse_uci_move, resolve_castling};

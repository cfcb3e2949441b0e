use cozy_chess::Board;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board.
///
/// Shredder-FEN castling fields are accepted as well.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fen = fen.trim();
    let fields = fen.split_whitespace().count();
    if fields != 6 {
        return Err(FenError::FieldCount(fields));
    }

    fen.parse::<Board>()
        .map_err(|e| FenError::InvalidPosition(format!("{:?}", e)))
}

/// Format a Board as a FEN string.
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("FEN must have 6 fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid FEN position: {0}")]
    InvalidPosition(String),
}

//! UCI move notation.
//!
//! cozy-chess encodes castling as king-takes-own-rook (e1h1). UCI and most
//! hosts use the king's two-square step (e1g1). Both directions are handled
//! here so save files and host input stay in standard notation.

use cozy_chess::{Board, File, Move, Piece, Rank, Square};

use crate::converters::format_piece;

/// Convert UCI castling notation to cozy-chess notation.
///
/// Returns `mv` unchanged unless it is a king step from the e-file to the
/// g- or c-file on the back rank whose king-to-rook form is legal.
pub fn convert_uci_castling_to_cozy(mv: Move, legal_moves: &[Move]) -> Move {
    let back_rank = matches!(mv.from.rank(), Rank::First | Rank::Eighth);
    if !back_rank || mv.from.file() != File::E || mv.promotion.is_some() {
        return mv;
    }

    let rook_file = match mv.to.file() {
        File::G => File::H,
        File::C => File::A,
        _ => return mv,
    };
    let converted = Move {
        from: mv.from,
        to: Square::new(rook_file, mv.from.rank()),
        promotion: None,
    };

    if legal_moves.contains(&converted) {
        converted
    } else {
        mv
    }
}

/// Format a move played on `board` in UCI notation (e.g. "e2e4", "e7e8q",
/// "e1g1").
pub fn format_uci_move(board: &Board, mv: Move) -> String {
    let to = if is_cozy_castling(board, mv) {
        let file = if mv.to.file() as usize > mv.from.file() as usize {
            File::G
        } else {
            File::C
        };
        Square::new(file, mv.from.rank())
    } else {
        mv.to
    };

    let mut s = format!("{}{}", mv.from, to);
    if let Some(promo) = mv.promotion {
        s.push(format_piece(promo));
    }
    s
}

/// Parse a UCI move and resolve it against the legal moves of `board`.
pub fn parse_uci_move(board: &Board, uci: &str) -> Option<Move> {
    let mv: Move = uci.trim().parse().ok()?;
    let mv = resolve_castling(board, mv);
    board.is_legal(mv).then_some(mv)
}

/// Rewrite a king's two-square step into cozy-chess castling notation.
/// Moves by any other piece are returned unchanged.
pub fn resolve_castling(board: &Board, mv: Move) -> Move {
    if board.piece_on(mv.from) == Some(Piece::King) {
        convert_uci_castling_to_cozy(mv, &legal_moves(board))
    } else {
        mv
    }
}

pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|mvs| {
        moves.extend(mvs);
        false
    });
    moves
}

fn is_cozy_castling(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(Piece::King)
        && board.piece_on(mv.to) == Some(Piece::Rook)
        && board.color_on(mv.from) == board.color_on(mv.to)
}

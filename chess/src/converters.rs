//! Conversions between the bridge's protocol types and cozy-chess types.
//! cozy-chess types stay inside this crate.

use chess_io::{PieceColor, PieceKind, Square};

pub fn to_cozy_square(square: Square) -> cozy_chess::Square {
    cozy_chess::Square::new(
        cozy_chess::File::index(square.file() as usize),
        cozy_chess::Rank::index(square.rank() as usize),
    )
}

pub fn from_cozy_square(square: cozy_chess::Square) -> Option<Square> {
    Square::new(square.file() as u8, square.rank() as u8)
}

pub fn from_cozy_piece(piece: cozy_chess::Piece) -> PieceKind {
    match piece {
        cozy_chess::Piece::Pawn => PieceKind::Pawn,
        cozy_chess::Piece::Knight => PieceKind::Knight,
        cozy_chess::Piece::Bishop => PieceKind::Bishop,
        cozy_chess::Piece::Rook => PieceKind::Rook,
        cozy_chess::Piece::Queen => PieceKind::Queen,
        cozy_chess::Piece::King => PieceKind::King,
    }
}

pub fn to_cozy_piece(kind: PieceKind) -> cozy_chess::Piece {
    match kind {
        PieceKind::Pawn => cozy_chess::Piece::Pawn,
        PieceKind::Knight => cozy_chess::Piece::Knight,
        PieceKind::Bishop => cozy_chess::Piece::Bishop,
        PieceKind::Rook => cozy_chess::Piece::Rook,
        PieceKind::Queen => cozy_chess::Piece::Queen,
        PieceKind::King => cozy_chess::Piece::King,
    }
}

pub fn from_cozy_color(color: cozy_chess::Color) -> PieceColor {
    match color {
        cozy_chess::Color::White => PieceColor::White,
        cozy_chess::Color::Black => PieceColor::Black,
    }
}

pub fn to_cozy_color(color: PieceColor) -> cozy_chess::Color {
    match color {
        PieceColor::White => cozy_chess::Color::White,
        PieceColor::Black => cozy_chess::Color::Black,
    }
}

/// Lowercase UCI piece letter.
pub fn format_piece(piece: cozy_chess::Piece) -> char {
    from_cozy_piece(piece).to_char_lower()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_conversion_covers_board() {
        for file in 0..8 {
            for rank in 0..8 {
                let sq = Square::new(file, rank).unwrap();
                let cozy = to_cozy_square(sq);
                assert_eq!(cozy.to_string(), sq.to_string());
                assert_eq!(from_cozy_square(cozy), Some(sq));
            }
        }
    }

    #[test]
    fn test_piece_letters() {
        assert_eq!(format_piece(cozy_chess::Piece::Knight), 'n');
        assert_eq!(to_cozy_piece(PieceKind::Queen), cozy_chess::Piece::Queen);
        assert_eq!(
            from_cozy_color(!to_cozy_color(PieceColor::White)),
            PieceColor::Black
        );
    }
}

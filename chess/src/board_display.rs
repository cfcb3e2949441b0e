//! Plain-text board rendering from FEN.

use chess_io::{PieceColor, PieceKind, Square};

/// An 8x8 board for display purposes only.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    squares: [[Option<(PieceKind, PieceColor)>; 8]; 8],
}

impl DisplayBoard {
    /// Parse the board placement from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayBoardError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(DisplayBoardError::InvalidFen)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(DisplayBoardError::InvalidFen);
        }

        let mut squares = [[None; 8]; 8];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                if file > 7 {
                    return Err(DisplayBoardError::InvalidFen);
                }
                let color = if c.is_uppercase() {
                    PieceColor::White
                } else {
                    PieceColor::Black
                };
                let kind = PieceKind::from_char(c).ok_or(DisplayBoardError::InvalidPiece(c))?;
                squares[rank][file] = Some((kind, color));
                file += 1;
            }
            if file != 8 {
                return Err(DisplayBoardError::InvalidFen);
            }
        }

        Ok(DisplayBoard { squares })
    }

    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Render with rank 8 on top. The `highlight` square, if any, is
    /// bracketed.
    pub fn render(&self, highlight: Option<Square>) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push((b'1' + rank) as char);
            out.push(' ');
            for file in 0..8u8 {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                let glyph = match self.piece_at(square) {
                    Some((kind, PieceColor::White)) => kind.to_char_upper(),
                    Some((kind, PieceColor::Black)) => kind.to_char_lower(),
                    None => '.',
                };
                if highlight == Some(square) {
                    out.push('[');
                    out.push(glyph);
                    out.push(']');
                } else {
                    out.push(' ');
                    out.push(glyph);
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayBoardError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::STARTING_FEN;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = DisplayBoard::from_fen(STARTING_FEN).unwrap();
        assert_eq!(
            board.piece_at(sq("a1")),
            Some((PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            board.piece_at(sq("e1")),
            Some((PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some((PieceKind::Queen, PieceColor::Black))
        );
        assert_eq!(board.piece_at(sq("e5")), None);
    }

    #[test]
    fn test_render_highlights_square() {
        let board = DisplayBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let text = board.render(Some(sq("e1")));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  .  .  .  .  k  .  .  . ");
        assert_eq!(lines[7], "1  .  .  .  . [K] .  .  . ");
    }

    #[test]
    fn test_rejects_short_rank() {
        assert!(matches!(
            DisplayBoard::from_fen("8/8/8/8/8/8/8/7 w - - 0 1"),
            Err(DisplayBoardError::InvalidFen)
        ));
        assert!(matches!(
            DisplayBoard::from_fen("8/8/8/8/8/8/8/7x w - - 0 1"),
            Err(DisplayBoardError::InvalidPiece('x'))
        ));
    }
}

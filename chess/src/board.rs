use chess_io::{GameResult, PieceColor, Square};
use cozy_chess::{Board, Move, Piece, Rank};
use serde::{Deserialize, Serialize};

use crate::converters::{from_cozy_color, from_cozy_square, to_cozy_square};
use crate::fen::{format_fen, parse_fen, FenError};
use crate::uci::legal_moves;

/// A pawn that reached the last rank and is waiting for its new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// Immutable game snapshot handed across the bridge.
///
/// Carries the position plus everything the rules need beyond it: the start
/// position and move list (takebacks, saves), a pending promotion, open
/// offers and the result once the game is over.
#[derive(Debug, Clone)]
pub struct ChessBoard {
    pub(crate) start: Board,
    pub(crate) position: Board,
    pub(crate) moves: Vec<Move>,
    pub(crate) pending_promotion: Option<PendingPromotion>,
    pub(crate) draw_offer: Option<PieceColor>,
    pub(crate) takeback: Option<PieceColor>,
    pub(crate) result: Option<GameResult>,
}

impl ChessBoard {
    /// The standard starting position.
    pub fn classical() -> Self {
        Self::from_position(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(parse_fen(fen)?))
    }

    fn from_position(position: Board) -> Self {
        Self {
            start: position.clone(),
            position,
            moves: Vec::new(),
            pending_promotion: None,
            draw_offer: None,
            takeback: None,
            result: None,
        }
    }

    pub fn fen(&self) -> String {
        format_fen(&self.position)
    }

    pub fn start_fen(&self) -> String {
        format_fen(&self.start)
    }

    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn side_to_move(&self) -> PieceColor {
        from_cozy_color(self.position.side_to_move())
    }

    /// Half-moves played since the start position.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// The side that offered a draw, if an offer is open.
    pub fn draw_offer(&self) -> Option<PieceColor> {
        self.draw_offer
    }

    /// The side that proposed a takeback, if a proposal is open.
    pub fn takeback(&self) -> Option<PieceColor> {
        self.takeback
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// The king square of the side to move, if that side is in check.
    pub fn checked_king(&self) -> Option<Square> {
        if self.position.checkers().is_empty() {
            None
        } else {
            let king = self.position.king(self.position.side_to_move());
            from_cozy_square(king)
        }
    }

    pub fn has_legal_moves(&self) -> bool {
        !legal_moves(&self.position).is_empty()
    }

    /// Whether `from`-`to` is a legal pawn move onto the mover's last rank.
    pub(crate) fn is_promotion_move(position: &Board, from: Square, to: Square) -> bool {
        let from = to_cozy_square(from);
        let to = to_cozy_square(to);
        let last_rank = match position.side_to_move() {
            cozy_chess::Color::White => Rank::Eighth,
            cozy_chess::Color::Black => Rank::First,
        };
        position.piece_on(from) == Some(Piece::Pawn)
            && position.color_on(from) == Some(position.side_to_move())
            && to.rank() == last_rank
            && position.is_legal(Move {
                from,
                to,
                promotion: Some(Piece::Queen),
            })
    }

    /// Replay `moves` on `start`, stopping at the first illegal one.
    pub(crate) fn replay(start: Board, moves: &[Move]) -> Result<Board, Move> {
        let mut position = start;
        for &mv in moves {
            if !position.is_legal(mv) {
                return Err(mv);
            }
            position.play_unchecked(mv);
        }
        Ok(position)
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::classical()
    }
}

impl PartialEq for ChessBoard {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
            && self.start_fen() == other.start_fen()
            && self.moves == other.moves
            && self.pending_promotion == other.pending_promotion
            && self.draw_offer == other.draw_offer
            && self.takeback == other.takeback
            && self.result == other.result
    }
}

impl std::fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen())
    }
}

//! Standard chess rules behind the bridge's [`Engine`] interface.

use chess_io::{
    DrawReason, Engine, GameResult, IOEvent, Input, Output, PieceColor, PieceGenerator, Square,
    WinReason,
};
use cozy_chess::Move;

use crate::board::{ChessBoard, PendingPromotion};
use crate::converters::{to_cozy_color, to_cozy_piece, to_cozy_square};
use crate::uci::resolve_castling;

/// Rules engine for [`ChessBoard`].
///
/// Stateless: every decision is a function of the board and the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl ChessRules {
    pub fn new() -> Self {
        Self
    }

    fn handle_move(&self, board: &ChessBoard, from: Square, to: Square) -> Option<Output<ChessBoard>> {
        if board.pending_promotion.is_some() {
            return None;
        }

        let position = &board.position;
        let mover = position.side_to_move();
        let from_sq = to_cozy_square(from);
        let to_sq = to_cozy_square(to);
        if position.color_on(from_sq) != Some(mover) {
            return None;
        }

        if ChessBoard::is_promotion_move(position, from, to) {
            let mut next = board.clone();
            next.pending_promotion = Some(PendingPromotion { from, to });
            return Some(Output::new(next, [IOEvent::ShowPromotion { square: to }]));
        }

        let mv = Move {
            from: from_sq,
            to: to_sq,
            promotion: None,
        };
        let mv = resolve_castling(position, mv);
        if !position.is_legal(mv) {
            return None;
        }

        Some(self.play(board.clone(), mv, Vec::new()))
    }

    fn handle_promotion(&self, board: &ChessBoard, generator: &PieceGenerator) -> Option<Output<ChessBoard>> {
        let pending = board.pending_promotion?;
        let kind = generator.generate(board.side_to_move(), pending.to);
        if !kind.is_promotion_target() {
            tracing::debug!("Rejected promotion to {:?}", kind);
            return None;
        }

        let mv = Move {
            from: to_cozy_square(pending.from),
            to: to_cozy_square(pending.to),
            promotion: Some(to_cozy_piece(kind)),
        };
        if !board.position.is_legal(mv) {
            return None;
        }

        let mut next = board.clone();
        next.pending_promotion = None;
        Some(self.play(next, mv, vec![IOEvent::RemovePromotion]))
    }

    /// Play a legal move and append the post-move events to `events`.
    fn play(&self, mut next: ChessBoard, mv: Move, mut events: Vec<IOEvent>) -> Output<ChessBoard> {
        next.position.play_unchecked(mv);
        next.moves.push(mv);

        if next.draw_offer.take().is_some() {
            events.push(IOEvent::RemoveDrawOffer);
        }
        if next.takeback.take().is_some() {
            events.push(IOEvent::RemoveTakeback);
        }

        let checked = next.checked_king();
        if let Some(square) = checked {
            events.push(IOEvent::ShowCheck { square });
        }

        let result = if !next.has_legal_moves() {
            Some(match checked {
                Some(_) => GameResult::Win {
                    winner: next.side_to_move().opponent(),
                    reason: WinReason::Checkmate,
                },
                None => GameResult::Draw {
                    reason: DrawReason::Stalemate,
                },
            })
        } else if next.position.halfmove_clock() >= 100 {
            Some(GameResult::Draw {
                reason: DrawReason::FiftyMoveRule,
            })
        } else {
            None
        };

        if let Some(result) = result {
            tracing::info!("Game over: {}", result);
            next.result = Some(result);
            events.push(IOEvent::ShowEnded { result });
        }

        Output::new(next, events)
    }

    fn handle_takeback(&self, board: &ChessBoard) -> Option<Output<ChessBoard>> {
        board.takeback?;
        if board.pending_promotion.is_some() {
            return None;
        }
        let (_, kept) = board.moves.split_last()?;

        let position = match ChessBoard::replay(board.start.clone(), kept) {
            Ok(position) => position,
            Err(mv) => {
                tracing::warn!("Move history no longer replays at {}", mv);
                return None;
            }
        };

        let mut next = board.clone();
        next.position = position;
        next.moves.pop();
        next.takeback = None;

        let mut events = vec![IOEvent::RemoveTakeback];
        if let Some(square) = next.checked_king() {
            events.push(IOEvent::ShowCheck { square });
        }
        Some(Output::new(next, events))
    }
}

impl Engine for ChessRules {
    type Board = ChessBoard;

    fn classical_board(&self) -> ChessBoard {
        ChessBoard::classical()
    }

    fn receive(&self, board: &ChessBoard, input: &Input) -> Option<Output<ChessBoard>> {
        if board.is_finished() {
            return None;
        }

        match input {
            Input::Move { from, to } => self.handle_move(board, *from, *to),
            Input::Promotion(generator) => self.handle_promotion(board, generator),
            Input::Resign => {
                let result = GameResult::Win {
                    winner: board.side_to_move().opponent(),
                    reason: WinReason::Resignation,
                };
                let mut next = board.clone();
                next.result = Some(result);
                Some(Output::new(next, [IOEvent::ShowEnded { result }]))
            }
            Input::DrawOffer => {
                if board.draw_offer.is_some() {
                    return None;
                }
                let mut next = board.clone();
                next.draw_offer = Some(board.side_to_move());
                Some(Output::new(next, [IOEvent::ShowDrawOffer]))
            }
            Input::DrawAcceptance => {
                board.draw_offer?;
                let result = GameResult::Draw {
                    reason: DrawReason::Agreement,
                };
                let mut next = board.clone();
                next.draw_offer = None;
                next.result = Some(result);
                Some(Output::new(
                    next,
                    [IOEvent::RemoveDrawOffer, IOEvent::ShowEnded { result }],
                ))
            }
            Input::DrawReject => {
                board.draw_offer?;
                let mut next = board.clone();
                next.draw_offer = None;
                Some(Output::new(next, [IOEvent::RemoveDrawOffer]))
            }
            Input::TakebackProposal => {
                if board.moves.is_empty()
                    || board.takeback.is_some()
                    || board.pending_promotion.is_some()
                {
                    return None;
                }
                let mut next = board.clone();
                next.takeback = Some(board.side_to_move());
                Some(Output::new(next, [IOEvent::ShowTakeback]))
            }
            Input::TakebackAcceptance => self.handle_takeback(board),
            Input::TakebackReject => {
                board.takeback?;
                let mut next = board.clone();
                next.takeback = None;
                Some(Output::new(next, [IOEvent::RemoveTakeback]))
            }
        }
    }

    fn turn(&self, board: &ChessBoard) -> PieceColor {
        board.side_to_move()
    }

    fn checked_king(&self, board: &ChessBoard, side: PieceColor) -> Option<Square> {
        if board.position.side_to_move() == to_cozy_color(side) {
            board.checked_king()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_io::PieceKind;
    use cozy_chess::Piece;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn play(board: &ChessBoard, from: &str, to: &str) -> Output<ChessBoard> {
        ChessRules
            .receive(board, &Input::mv(sq(from), sq(to)))
            .unwrap_or_else(|| panic!("{}{} rejected", from, to))
    }

    fn events(output: &Output<ChessBoard>) -> Vec<IOEvent> {
        output.events.to_vec()
    }

    #[test]
    fn test_opening_move_is_quiet() {
        let out = play(&ChessBoard::classical(), "e2", "e4");
        assert!(out.events.is_empty());
        assert_eq!(out.board.side_to_move(), PieceColor::Black);
        assert_eq!(out.board.ply(), 1);
    }

    #[test]
    fn test_illegal_and_out_of_turn_moves_rejected() {
        let board = ChessBoard::classical();
        assert!(ChessRules.receive(&board, &Input::mv(sq("e2"), sq("e5"))).is_none());
        assert!(ChessRules.receive(&board, &Input::mv(sq("e7"), sq("e5"))).is_none());
        assert!(ChessRules.receive(&board, &Input::mv(sq("e4"), sq("e5"))).is_none());
    }

    #[test]
    fn test_fools_mate() {
        let mut board = ChessBoard::classical();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            board = play(&board, from, to).board;
        }
        let out = play(&board, "d8", "h4");
        let result = GameResult::Win {
            winner: PieceColor::Black,
            reason: WinReason::Checkmate,
        };
        assert_eq!(
            events(&out),
            vec![
                IOEvent::ShowCheck { square: sq("e1") },
                IOEvent::ShowEnded { result },
            ]
        );
        assert_eq!(out.board.result(), Some(result));
        assert!(ChessRules.receive(&out.board, &Input::Resign).is_none());
    }

    #[test]
    fn test_stalemate_ends_in_draw() {
        let board = ChessBoard::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
        let out = play(&board, "f1", "f7");
        assert_eq!(
            events(&out),
            vec![IOEvent::ShowEnded {
                result: GameResult::Draw {
                    reason: DrawReason::Stalemate
                }
            }]
        );
    }

    #[test]
    fn test_fifty_move_rule() {
        let board = ChessBoard::from_fen("7k/8/8/8/8/8/8/R6K w - - 99 80").unwrap();
        let out = play(&board, "a1", "a2");
        assert_eq!(
            out.board.result(),
            Some(GameResult::Draw {
                reason: DrawReason::FiftyMoveRule
            })
        );
    }

    #[test]
    fn test_castling_accepts_both_notations() {
        let board = ChessBoard::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let two_step = play(&board, "e1", "g1");
        let king_rook = play(&board, "e1", "h1");
        assert_eq!(two_step.board.fen(), king_rook.board.fen());
        assert_eq!(
            two_step.board.position().piece_on(cozy_chess::Square::G1),
            Some(Piece::King)
        );
    }

    #[test]
    fn test_promotion_flow() {
        let board = ChessBoard::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let out = play(&board, "e7", "e8");
        assert_eq!(events(&out), vec![IOEvent::ShowPromotion { square: sq("e8") }]);
        let pending = out.board;
        assert_eq!(pending.side_to_move(), PieceColor::White);
        assert!(ChessRules.receive(&pending, &Input::mv(sq("e1"), sq("d1"))).is_none());
        assert!(ChessRules.receive(&pending, &Input::TakebackProposal).is_none());
        assert!(ChessRules
            .receive(&pending, &Input::promote_to(PieceKind::King))
            .is_none());

        let out = ChessRules
            .receive(&pending, &Input::promote_to(PieceKind::Rook))
            .unwrap();
        assert_eq!(events(&out), vec![IOEvent::RemovePromotion]);
        assert_eq!(
            out.board.position().piece_on(cozy_chess::Square::E8),
            Some(Piece::Rook)
        );
        assert!(out.board.pending_promotion().is_none());
        assert_eq!(out.board.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn test_promotion_generator_sees_mover_and_square() {
        let board = ChessBoard::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
        let pending = play(&board, "a2", "a1").board;
        let generator = PieceGenerator::new(|color, square| {
            assert_eq!(color, PieceColor::Black);
            assert_eq!(square.to_string(), "a1");
            PieceKind::Knight
        });
        let out = ChessRules
            .receive(&pending, &Input::Promotion(generator))
            .unwrap();
        assert_eq!(
            out.board.position().piece_on(cozy_chess::Square::A1),
            Some(Piece::Knight)
        );
    }

    #[test]
    fn test_promotion_without_pending_pawn_is_ignored() {
        let board = ChessBoard::classical();
        assert!(ChessRules
            .receive(&board, &Input::promote_to(PieceKind::Queen))
            .is_none());
    }

    #[test]
    fn test_resign() {
        let out = ChessRules
            .receive(&ChessBoard::classical(), &Input::Resign)
            .unwrap();
        assert_eq!(
            events(&out),
            vec![IOEvent::ShowEnded {
                result: GameResult::Win {
                    winner: PieceColor::Black,
                    reason: WinReason::Resignation
                }
            }]
        );
    }

    #[test]
    fn test_draw_offer_lifecycle() {
        let board = ChessBoard::classical();
        assert!(ChessRules.receive(&board, &Input::DrawAcceptance).is_none());
        assert!(ChessRules.receive(&board, &Input::DrawReject).is_none());

        let offered = ChessRules.receive(&board, &Input::DrawOffer).unwrap();
        assert_eq!(events(&offered), vec![IOEvent::ShowDrawOffer]);
        assert_eq!(offered.board.draw_offer(), Some(PieceColor::White));
        assert!(ChessRules.receive(&offered.board, &Input::DrawOffer).is_none());

        let rejected = ChessRules.receive(&offered.board, &Input::DrawReject).unwrap();
        assert_eq!(events(&rejected), vec![IOEvent::RemoveDrawOffer]);
        assert!(rejected.board.draw_offer().is_none());

        let accepted = ChessRules
            .receive(&offered.board, &Input::DrawAcceptance)
            .unwrap();
        let result = GameResult::Draw {
            reason: DrawReason::Agreement,
        };
        assert_eq!(
            events(&accepted),
            vec![IOEvent::RemoveDrawOffer, IOEvent::ShowEnded { result }]
        );
    }

    #[test]
    fn test_move_lapses_open_offers() {
        let board = play(&ChessBoard::classical(), "e2", "e4").board;
        let board = ChessRules.receive(&board, &Input::DrawOffer).unwrap().board;
        let board = ChessRules
            .receive(&board, &Input::TakebackProposal)
            .unwrap()
            .board;
        let out = play(&board, "e7", "e5");
        assert_eq!(
            events(&out),
            vec![IOEvent::RemoveDrawOffer, IOEvent::RemoveTakeback]
        );
    }

    #[test]
    fn test_offers_lapse_when_promotion_completes() {
        let board = ChessBoard::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let board = ChessRules.receive(&board, &Input::DrawOffer).unwrap().board;

        let pending = play(&board, "e7", "e8");
        assert_eq!(events(&pending), vec![IOEvent::ShowPromotion { square: sq("e8") }]);
        assert_eq!(pending.board.draw_offer(), Some(PieceColor::White));

        let out = ChessRules
            .receive(&pending.board, &Input::promote_to(PieceKind::Queen))
            .unwrap();
        assert_eq!(
            events(&out),
            vec![
                IOEvent::RemovePromotion,
                IOEvent::RemoveDrawOffer,
                IOEvent::ShowCheck { square: sq("a8") },
            ]
        );
        assert!(out.board.draw_offer().is_none());
    }

    #[test]
    fn test_takeback_lifecycle() {
        let start = ChessBoard::classical();
        assert!(ChessRules.receive(&start, &Input::TakebackProposal).is_none());

        let moved = play(&start, "e2", "e4").board;
        let proposed = ChessRules
            .receive(&moved, &Input::TakebackProposal)
            .unwrap();
        assert_eq!(events(&proposed), vec![IOEvent::ShowTakeback]);
        assert!(ChessRules
            .receive(&proposed.board, &Input::TakebackProposal)
            .is_none());

        let rejected = ChessRules
            .receive(&proposed.board, &Input::TakebackReject)
            .unwrap();
        assert_eq!(events(&rejected), vec![IOEvent::RemoveTakeback]);
        assert_eq!(rejected.board.ply(), 1);

        let accepted = ChessRules
            .receive(&proposed.board, &Input::TakebackAcceptance)
            .unwrap();
        assert_eq!(events(&accepted), vec![IOEvent::RemoveTakeback]);
        assert_eq!(accepted.board, start);
    }

    #[test]
    fn test_takeback_restores_check() {
        let board = ChessBoard::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        let board = play(&board, "e1", "e2").board;
        let board = ChessRules
            .receive(&board, &Input::TakebackProposal)
            .unwrap()
            .board;
        let out = ChessRules
            .receive(&board, &Input::TakebackAcceptance)
            .unwrap();
        assert_eq!(
            events(&out),
            vec![
                IOEvent::RemoveTakeback,
                IOEvent::ShowCheck { square: sq("e1") }
            ]
        );
    }

    #[test]
    fn test_checked_king_only_for_requested_side() {
        let board = ChessBoard::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert_eq!(
            ChessRules.checked_king(&board, PieceColor::White),
            Some(sq("e1"))
        );
        assert_eq!(ChessRules.checked_king(&board, PieceColor::Black), None);
        assert_eq!(ChessRules.turn(&board), PieceColor::White);
    }
}

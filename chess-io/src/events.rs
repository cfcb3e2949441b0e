use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{PieceColor, Square};

/// Notifications the engine emits while applying an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IOEvent {
    ShowCheck { square: Square },
    ShowPromotion { square: Square },
    RemovePromotion,
    ShowDrawOffer,
    RemoveDrawOffer,
    ShowTakeback,
    RemoveTakeback,
    ShowEnded { result: GameResult },
    /// Structural filler. No type-specific reaction ever matches it.
    NoEvent,
}

/// Payload-free tag of an [`IOEvent`], used by type-specific reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ShowCheck,
    ShowPromotion,
    RemovePromotion,
    ShowDrawOffer,
    RemoveDrawOffer,
    ShowTakeback,
    RemoveTakeback,
    ShowEnded,
    NoEvent,
}

impl IOEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ShowCheck { .. } => EventKind::ShowCheck,
            Self::ShowPromotion { .. } => EventKind::ShowPromotion,
            Self::RemovePromotion => EventKind::RemovePromotion,
            Self::ShowDrawOffer => EventKind::ShowDrawOffer,
            Self::RemoveDrawOffer => EventKind::RemoveDrawOffer,
            Self::ShowTakeback => EventKind::ShowTakeback,
            Self::RemoveTakeback => EventKind::RemoveTakeback,
            Self::ShowEnded { .. } => EventKind::ShowEnded,
            Self::NoEvent => EventKind::NoEvent,
        }
    }

    pub fn is_no_event(&self) -> bool {
        matches!(self, Self::NoEvent)
    }
}

/// How a game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win { winner: PieceColor, reason: WinReason },
    Draw { reason: DrawReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Checkmate,
    Resignation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
    Agreement,
    FiftyMoveRule,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win { winner, reason } => {
                let how = match reason {
                    WinReason::Checkmate => "checkmate",
                    WinReason::Resignation => "resignation",
                };
                write!(f, "{} wins by {}", winner, how)
            }
            Self::Draw { reason } => {
                let how = match reason {
                    DrawReason::Stalemate => "stalemate",
                    DrawReason::Agreement => "agreement",
                    DrawReason::FiftyMoveRule => "the fifty-move rule",
                };
                write!(f, "Draw by {}", how)
            }
        }
    }
}

/// Events of one transition, in emission order.
pub type EventBatch = SmallVec<[IOEvent; 4]>;

/// The result of an accepted input: the replacement board and its events.
#[derive(Debug, Clone)]
pub struct Output<B> {
    pub board: B,
    pub events: EventBatch,
}

impl<B> Output<B> {
    /// A transition with no notifications.
    pub fn quiet(board: B) -> Self {
        Self {
            board,
            events: EventBatch::new(),
        }
    }

    pub fn new(board: B, events: impl IntoIterator<Item = IOEvent>) -> Self {
        Self {
            board,
            events: events.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let sq: Square = "e8".parse().unwrap();
        assert_eq!(IOEvent::ShowCheck { square: sq }.kind(), EventKind::ShowCheck);
        assert_eq!(IOEvent::NoEvent.kind(), EventKind::NoEvent);
        assert!(IOEvent::NoEvent.is_no_event());
        assert!(!IOEvent::RemoveTakeback.is_no_event());
    }

    #[test]
    fn test_output_preserves_order() {
        let out = Output::new(
            (),
            [IOEvent::RemoveDrawOffer, IOEvent::NoEvent, IOEvent::ShowTakeback],
        );
        let kinds: Vec<_> = out.events.iter().map(IOEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::RemoveDrawOffer, EventKind::NoEvent, EventKind::ShowTakeback]
        );
    }

    #[test]
    fn test_result_display() {
        let r = GameResult::Win {
            winner: PieceColor::Black,
            reason: WinReason::Checkmate,
        };
        assert_eq!(r.to_string(), "black wins by checkmate");
        let d = GameResult::Draw {
            reason: DrawReason::Agreement,
        };
        assert_eq!(d.to_string(), "Draw by agreement");
    }
}

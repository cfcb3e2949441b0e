use std::sync::Arc;

use crate::types::{PieceColor, PieceKind, Square};

/// Commands a host submits to the bridge, one per user action.
#[derive(Debug, Clone)]
pub enum Input {
    Move { from: Square, to: Square },
    Promotion(PieceGenerator),
    Resign,
    DrawOffer,
    DrawReject,
    DrawAcceptance,
    TakebackProposal,
    TakebackAcceptance,
    TakebackReject,
}

impl Input {
    pub fn mv(from: Square, to: Square) -> Self {
        Self::Move { from, to }
    }

    /// Promote to a fixed piece regardless of color or square.
    pub fn promote_to(kind: PieceKind) -> Self {
        Self::Promotion(PieceGenerator::always(kind))
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "Move",
            Self::Promotion(_) => "Promotion",
            Self::Resign => "Resign",
            Self::DrawOffer => "DrawOffer",
            Self::DrawReject => "DrawReject",
            Self::DrawAcceptance => "DrawAcceptance",
            Self::TakebackProposal => "TakebackProposal",
            Self::TakebackAcceptance => "TakebackAcceptance",
            Self::TakebackReject => "TakebackReject",
        }
    }
}

type GeneratorFn = dyn Fn(PieceColor, Square) -> PieceKind + Send + Sync;

/// Chooses the piece a pawn becomes, given the promoting side and the
/// promotion square. The engine decides whether the choice is acceptable.
#[derive(Clone)]
pub struct PieceGenerator(Arc<GeneratorFn>);

impl PieceGenerator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(PieceColor, Square) -> PieceKind + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn always(kind: PieceKind) -> Self {
        Self::new(move |_, _| kind)
    }

    pub fn generate(&self, color: PieceColor, square: Square) -> PieceKind {
        (self.0)(color, square)
    }
}

impl std::fmt::Debug for PieceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PieceGenerator(..)")
    }
}

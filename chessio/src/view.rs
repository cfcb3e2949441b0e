//! Text view of the game, fed by the bridge's update hook and reactions.
//!
//! Hooks run on the bridge actor's task and only record state. The main
//! loop calls [`TerminalView::present`] once a command has been applied,
//! so the repainted board already carries the check highlight emitted by
//! the same transition.
//!
//! The board itself can also carry open state, such as a pending promotion
//! or a finished game restored by a load. Whatever the events of a
//! transition did not announce is reported from the board.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use chess::{ChessBoard, DisplayBoard};
use chess_io::{EventKind, GameResult, Reaction, Square};

const DRAW_OFFERED: &str = "Draw offered: `draw accept` or `draw reject`.";
const TAKEBACK_PROPOSED: &str = "Takeback proposed: `takeback accept` or `takeback reject`.";

fn promotion_notice(square: Square) -> String {
    format!("Pawn on {} awaits promotion: enter `promote q|r|b|n`.", square)
}

fn ended_notice(result: GameResult) -> String {
    format!("Game over: {}.", result)
}

/// Open state read off the latest board.
#[derive(Debug, Default)]
struct BoardStatus {
    promotion: Option<Square>,
    draw_offer: bool,
    takeback: bool,
    result: Option<GameResult>,
}

impl BoardStatus {
    fn of(board: &ChessBoard) -> Self {
        Self {
            promotion: board.pending_promotion().map(|p| p.to),
            draw_offer: board.draw_offer().is_some(),
            takeback: board.takeback().is_some(),
            result: board.result(),
        }
    }

    /// Notices for the parts of this status no event in `announced` covered.
    fn unannounced(&self, announced: &[EventKind]) -> Vec<String> {
        let missing = |kind| !announced.contains(&kind);
        let mut notices = Vec::new();
        if let Some(square) = self.promotion.filter(|_| missing(EventKind::ShowPromotion)) {
            notices.push(promotion_notice(square));
        }
        if self.draw_offer && missing(EventKind::ShowDrawOffer) {
            notices.push(DRAW_OFFERED.to_string());
        }
        if self.takeback && missing(EventKind::ShowTakeback) {
            notices.push(TAKEBACK_PROPOSED.to_string());
        }
        if let Some(result) = self.result.filter(|_| missing(EventKind::ShowEnded)) {
            notices.push(ended_notice(result));
        }
        notices
    }
}

struct ViewState {
    out: Box<dyn Write + Send>,
    fen: Option<String>,
    check: Option<Square>,
    status: BoardStatus,
    announced: Vec<EventKind>,
    dirty: bool,
    notices: Vec<String>,
}

impl ViewState {
    fn announce(&mut self, kind: EventKind, text: String) {
        self.announced.push(kind);
        self.notices.push(text);
    }
}

#[derive(Clone)]
pub struct TerminalView {
    state: Arc<Mutex<ViewState>>,
}

impl TerminalView {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState {
                out: Box::new(out),
                fen: None,
                check: None,
                status: BoardStatus::default(),
                announced: Vec::new(),
                dirty: false,
                notices: Vec::new(),
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // A panicking reaction must not take the whole view down with it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The bridge's update hook. There is no event that clears a check, so
    /// every new board drops the previous indicator here. The board's open
    /// state is recorded so that [`present`](Self::present) can report what
    /// the following events leave unsaid.
    pub fn update_hook(&self) -> impl FnMut(&ChessBoard) + Send + 'static {
        let view = self.clone();
        move |board: &ChessBoard| {
            let mut state = view.lock();
            state.fen = Some(board.fen());
            state.check = None;
            state.status = BoardStatus::of(board);
            state.announced.clear();
            state.dirty = true;
        }
    }

    /// Reactions that turn bridge events into on-screen notices.
    pub fn reactions(&self) -> Vec<Reaction> {
        let mut reactions = Vec::new();

        reactions.push(Reaction::all(|event| {
            tracing::debug!(kind = ?event.kind(), "IO event: {:?}", event)
        }));

        let view = self.clone();
        reactions.push(Reaction::on_check(move |square| {
            let mut state = view.lock();
            state.check = Some(square);
            state.notices.push(format!("Check! King on {} is attacked.", square));
        }));

        let view = self.clone();
        reactions.push(Reaction::on_promotion(move |square| {
            view.lock()
                .announce(EventKind::ShowPromotion, promotion_notice(square))
        }));

        let view = self.clone();
        reactions.push(Reaction::on_ended(move |result| {
            view.lock().announce(EventKind::ShowEnded, ended_notice(*result))
        }));

        for (kind, text) in [
            (EventKind::ShowDrawOffer, DRAW_OFFERED),
            (EventKind::RemoveDrawOffer, "Draw offer closed."),
            (EventKind::ShowTakeback, TAKEBACK_PROPOSED),
            (EventKind::RemoveTakeback, "Takeback proposal closed."),
        ] {
            let view = self.clone();
            reactions.push(Reaction::on(kind, move |_| {
                view.lock().announce(kind, text.to_string())
            }));
        }

        reactions
    }

    pub fn notice(&self, text: impl Into<String>) {
        self.lock().notices.push(text.into());
    }

    /// Repaint the board if it changed, then flush pending notices.
    /// Returns whether the board changed since the last call.
    pub fn present(&self) -> bool {
        let mut state = self.lock();
        let changed = std::mem::take(&mut state.dirty);
        let mut notices = std::mem::take(&mut state.notices);
        if changed {
            notices.extend(state.status.unannounced(&state.announced));
        }
        let board = match (&state.fen, changed) {
            (Some(fen), true) => match DisplayBoard::from_fen(fen) {
                Ok(board) => Some(board.render(state.check)),
                Err(e) => {
                    tracing::warn!("Cannot render board: {}", e);
                    None
                }
            },
            _ => None,
        };

        if let Err(e) = write_frame(&mut state.out, board.as_deref(), &notices) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }

        changed
    }

    pub fn prompt(&self) {
        let mut state = self.lock();
        let _ = write!(state.out, "> ").and_then(|_| state.out.flush());
    }
}

fn write_frame(out: &mut dyn Write, board: Option<&str>, notices: &[String]) -> std::io::Result<()> {
    if let Some(board) = board {
        writeln!(out, "\n{}", board)?;
    }
    for notice in notices {
        writeln!(out, "{}", notice)?;
    }
    out.flush()
}

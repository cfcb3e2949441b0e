//! Parsing of the line-oriented command language read from stdin.

use std::path::{Path, PathBuf};

use chess_io::{Input, PieceKind, Square};

#[derive(Debug)]
pub enum Command {
    Submit(Input),
    /// `None` re-saves to the last path used.
    Save(Option<PathBuf>),
    Load(PathBuf),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),
    #[error("Invalid square: {0}")]
    Square(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Cannot promote to {0:?}: choose q, r, b or n")]
    Promotion(String),
}

pub const HELP: &str = "\
Commands:
  e2e4 | move e2 e4               move a piece (castle with e1g1 or e1h1)
  promote q|r|b|n                 choose the piece for a waiting pawn
  resign
  draw offer|accept|reject
  takeback propose|accept|reject
  save [path]                     save; no path re-saves to the last file
  load <path>
  help
  quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(Command::Empty);
    };

    match (head.to_ascii_lowercase().as_str(), rest) {
        ("quit" | "exit", []) => Ok(Command::Quit),
        ("help" | "?", []) => Ok(Command::Help),
        ("resign", []) => Ok(Command::Submit(Input::Resign)),
        ("move", [from, to]) => Ok(Command::Submit(Input::mv(square(from)?, square(to)?))),
        ("move", _) => Err(CommandError::Usage("move <from> <to>")),
        ("promote", [piece]) => promotion(piece).map(Command::Submit),
        ("promote", _) => Err(CommandError::Usage("promote q|r|b|n")),
        ("draw", [action]) => match action.to_ascii_lowercase().as_str() {
            "offer" => Ok(Command::Submit(Input::DrawOffer)),
            "accept" => Ok(Command::Submit(Input::DrawAcceptance)),
            "reject" => Ok(Command::Submit(Input::DrawReject)),
            _ => Err(CommandError::Usage("draw offer|accept|reject")),
        },
        ("draw", _) => Err(CommandError::Usage("draw offer|accept|reject")),
        ("takeback", [action]) => match action.to_ascii_lowercase().as_str() {
            "propose" => Ok(Command::Submit(Input::TakebackProposal)),
            "accept" => Ok(Command::Submit(Input::TakebackAcceptance)),
            "reject" => Ok(Command::Submit(Input::TakebackReject)),
            _ => Err(CommandError::Usage("takeback propose|accept|reject")),
        },
        ("takeback", _) => Err(CommandError::Usage("takeback propose|accept|reject")),
        ("save", []) => Ok(Command::Save(None)),
        ("save", [path]) => Ok(Command::Save(Some(PathBuf::from(path)))),
        ("save", _) => Err(CommandError::Usage("save [path]")),
        ("load", [path]) => Ok(Command::Load(PathBuf::from(path))),
        ("load", _) => Err(CommandError::Usage("load <path>")),
        (word, []) if word.len() == 4 && word.is_ascii() => {
            Ok(Command::Submit(Input::mv(square(&word[..2])?, square(&word[2..])?)))
        }
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

/// Relative paths are resolved against `save_dir`.
pub fn resolve_save_path(path: &Path, save_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        save_dir.join(path)
    }
}

fn square(s: &str) -> Result<Square, CommandError> {
    s.parse().map_err(|_| CommandError::Square(s.to_string()))
}

fn promotion(piece: &str) -> Result<Input, CommandError> {
    let mut chars = piece.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_char(c),
        _ => match piece.to_ascii_lowercase().as_str() {
            "queen" => Some(PieceKind::Queen),
            "rook" => Some(PieceKind::Rook),
            "bishop" => Some(PieceKind::Bishop),
            "knight" => Some(PieceKind::Knight),
            _ => None,
        },
    };

    match kind {
        Some(kind) if kind.is_promotion_target() => Ok(Input::promote_to(kind)),
        _ => Err(CommandError::Promotion(piece.to_string())),
    }
}

//! JSON save files for [`ChessBoard`].
//!
//! A save records the start position and the moves in UCI notation rather
//! than just the final FEN, so takebacks keep working after a load. The
//! recorded FEN is checked against the replayed position on load.

use std::path::Path;

use chess_io::{FileOperationError, GameResult, PieceColor, Serializer};
use serde::{Deserialize, Serialize};

use crate::board::{ChessBoard, PendingPromotion};
use crate::fen::{format_fen, parse_fen};
use crate::uci::{format_uci_move, parse_uci_move};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SaveRecord {
    version: u32,
    start_fen: String,
    moves: Vec<String>,
    fen: String,
    #[serde(default)]
    pending_promotion: Option<PendingPromotion>,
    #[serde(default)]
    draw_offer: Option<PieceColor>,
    #[serde(default)]
    takeback: Option<PieceColor>,
    #[serde(default)]
    result: Option<GameResult>,
}

impl SaveRecord {
    fn from_board(board: &ChessBoard) -> Self {
        let mut position = board.start.clone();
        let moves = board
            .moves
            .iter()
            .map(|&mv| {
                let uci = format_uci_move(&position, mv);
                position.play_unchecked(mv);
                uci
            })
            .collect();

        Self {
            version: FORMAT_VERSION,
            start_fen: format_fen(&board.start),
            moves,
            fen: board.fen(),
            pending_promotion: board.pending_promotion,
            draw_offer: board.draw_offer,
            takeback: board.takeback,
            result: board.result,
        }
    }

    fn into_board(self, path: &Path) -> Result<ChessBoard, FileOperationError> {
        let loading = |message: String| FileOperationError::Loading {
            path: path.to_path_buf(),
            message,
        };

        if self.version != FORMAT_VERSION {
            return Err(loading(format!("unsupported save version {}", self.version)));
        }

        let start = parse_fen(&self.start_fen).map_err(|e| loading(e.to_string()))?;
        let mut position = start.clone();
        let mut moves = Vec::with_capacity(self.moves.len());
        for (ply, uci) in self.moves.iter().enumerate() {
            let mv = parse_uci_move(&position, uci)
                .ok_or_else(|| loading(format!("illegal move {:?} at ply {}", uci, ply + 1)))?;
            position.play_unchecked(mv);
            moves.push(mv);
        }

        if format_fen(&position) != self.fen {
            return Err(loading(format!(
                "moves lead to {:?}, file records {:?}",
                format_fen(&position),
                self.fen
            )));
        }

        if let Some(pending) = self.pending_promotion {
            if self.result.is_some()
                || !ChessBoard::is_promotion_move(&position, pending.from, pending.to)
            {
                return Err(loading(format!(
                    "no pawn can promote from {} to {}",
                    pending.from, pending.to
                )));
            }
        }

        Ok(ChessBoard {
            start,
            position,
            moves,
            pending_promotion: self.pending_promotion,
            draw_offer: self.draw_offer,
            takeback: self.takeback,
            result: self.result,
        })
    }
}

/// Reads and writes [`ChessBoard`]s as pretty-printed JSON.
///
/// The output holds no timestamps or paths, so equal boards always produce
/// byte-identical files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSaveFile;

impl JsonSaveFile {
    pub fn new() -> Self {
        Self
    }

    pub fn to_json(&self, board: &ChessBoard) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SaveRecord::from_board(board))
    }
}

impl Serializer<ChessBoard> for JsonSaveFile {
    fn save(&self, board: &ChessBoard, path: &Path) -> Result<(), FileOperationError> {
        let json = self.to_json(board).map_err(|e| FileOperationError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(path, json).map_err(|e| FileOperationError::from_io(path, e))?;
        tracing::debug!("Saved {} plies to {:?}", board.ply(), path);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ChessBoard, FileOperationError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FileOperationError::from_io(path, e))?;
        let record: SaveRecord =
            serde_json::from_str(&contents).map_err(|e| FileOperationError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let board = record.into_board(path)?;
        tracing::debug!("Loaded {} plies from {:?}", board.ply(), path);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ChessRules;
    use chess_io::{Engine, Input, Square};
    use tempfile::TempDir;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn after(moves: &[(&str, &str)]) -> ChessBoard {
        let mut board = ChessBoard::classical();
        for (from, to) in moves {
            board = ChessRules
                .receive(&board, &Input::mv(sq(from), sq(to)))
                .unwrap()
                .board;
        }
        board
    }

    #[test]
    fn test_save_then_load_restores_board() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("game.save");
        let board = after(&[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);
        let board = ChessRules.receive(&board, &Input::DrawOffer).unwrap().board;

        JsonSaveFile.save(&board, &path).unwrap();
        let loaded = JsonSaveFile.load(&path).unwrap();

        assert_eq!(loaded, board);
        assert_eq!(loaded.draw_offer(), Some(PieceColor::Black));
    }

    fn awaiting_promotion() -> ChessBoard {
        let board = ChessBoard::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        ChessRules
            .receive(&board, &Input::mv(sq("e7"), sq("e8")))
            .unwrap()
            .board
    }

    #[test]
    fn test_pending_promotion_survives_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("promoting.save");
        let board = awaiting_promotion();

        JsonSaveFile.save(&board, &path).unwrap();
        let loaded = JsonSaveFile.load(&path).unwrap();
        assert_eq!(loaded, board);
        assert!(ChessRules
            .receive(&loaded, &Input::promote_to(chess_io::PieceKind::Queen))
            .is_some());
    }

    #[test]
    fn test_impossible_pending_promotion_is_loading_error() {
        let tmp = TempDir::new().unwrap();
        let json = JsonSaveFile.to_json(&awaiting_promotion()).unwrap();
        assert!(json.contains("\"from\": \"e7\""), "{}", json);

        for (name, from) in [("empty.save", "a1"), ("king.save", "e1")] {
            let path = tmp.path().join(name);
            let tampered = json.replace("\"from\": \"e7\"", &format!("\"from\": \"{}\"", from));
            std::fs::write(&path, tampered).unwrap();

            let err = JsonSaveFile.load(&path).unwrap_err();
            assert!(matches!(err, FileOperationError::Loading { .. }), "{}", from);
        }
    }

    #[test]
    fn test_castling_is_saved_in_standard_notation() {
        let board = after(&[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("e1", "g1"),
        ]);
        let json = JsonSaveFile.to_json(&board).unwrap();
        assert!(json.contains("\"e1g1\""), "{}", json);

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("castled.save");
        std::fs::write(&path, &json).unwrap();
        assert_eq!(JsonSaveFile.load(&path).unwrap(), board);
    }

    #[test]
    fn test_equal_boards_give_identical_bytes() {
        let a = after(&[("d2", "d4")]);
        let b = after(&[("d2", "d4")]);
        assert_eq!(
            JsonSaveFile.to_json(&a).unwrap(),
            JsonSaveFile.to_json(&b).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = JsonSaveFile.load(&tmp.path().join("absent.save")).unwrap_err();
        assert!(matches!(err, FileOperationError::FileNotFound { .. }));

        let err = JsonSaveFile
            .save(&ChessBoard::classical(), &tmp.path().join("no/such/dir.save"))
            .unwrap_err();
        assert!(matches!(err, FileOperationError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.save");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonSaveFile.load(&path).unwrap_err();
        assert!(matches!(err, FileOperationError::Parse { .. }));
    }

    #[test]
    fn test_inconsistent_record_is_loading_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tampered.save");
        let json = JsonSaveFile
            .to_json(&after(&[("e2", "e4")]))
            .unwrap()
            .replace("e2e4", "d2d4");
        std::fs::write(&path, json).unwrap();

        let err = JsonSaveFile.load(&path).unwrap_err();
        assert!(matches!(err, FileOperationError::Loading { .. }));
    }

    #[test]
    fn test_illegal_recorded_move_is_loading_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("illegal.save");
        let json = JsonSaveFile
            .to_json(&after(&[("e2", "e4")]))
            .unwrap()
            .replace("e2e4", "e2e5");
        std::fs::write(&path, json).unwrap();

        let err = JsonSaveFile.load(&path).unwrap_err();
        assert!(matches!(err, FileOperationError::Loading { .. }));
    }
}

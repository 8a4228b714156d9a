//! Command handlers.

pub mod analyze;
pub mod config;
pub mod export;
pub mod generate;

use moodboard_core::{Board, Config};
use std::path::Path;

/// Read a board previously written with `generate --format json`.
pub(crate) fn load_board(path: &Path) -> anyhow::Result<Board> {
    let path = Config::expand_path(path);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        anyhow::anyhow!(
            "Cannot read board file {}: {e}\n\n  Hint: Save one with `moodboard generate <keywords> --format json -o board.json`.",
            path.display()
        )
    })?;
    serde_json::from_str(&content).map_err(|e| {
        anyhow::anyhow!(
            "{} is not a JSON board: {e}\n\n  Hint: JSON Lines and HTML output cannot be read back.",
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodboard_core::ImageRecord;

    #[test]
    fn test_load_board_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        let board = Board::new("sunset", vec![ImageRecord::new("a", "https://a/1.jpg", "Pexels")]);
        std::fs::write(&path, serde_json::to_string(&board).unwrap()).unwrap();

        let loaded = load_board(&path).unwrap();
        assert_eq!(loaded.keywords, "sunset");
        assert_eq!(loaded.images, board.images);
    }

    #[test]
    fn test_load_board_rejects_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.jsonl");
        std::fs::write(&path, "{\"id\":\"a\"}\n{\"id\":\"b\"}\n").unwrap();
        let err = load_board(&path).unwrap_err();
        assert!(err.to_string().contains("is not a JSON board"));
    }
}

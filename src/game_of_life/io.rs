//! Text state files for boards
//!
//! Format: one line per row, each line holding space separated `alive` /
//! `dead` tokens, one per column. There is no header; the size is inferred
//! from the line and token counts.

use super::{Board, Status};
use crate::error::{BoardError, BoardResult};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;
use tracing::{debug, info};

/// Rows of statuses read from a state file. Rows may have different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedState {
    pub rows: Vec<Vec<Status>>,
}

impl ParsedState {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Convert a board to its text representation
pub fn serialize_board(board: &Board) -> String {
    let mut result = String::with_capacity(board.side() * board.side() * 6);
    for row in board.status_matrix() {
        result.push_str(&row.iter().map(|status| status.as_str()).join(" "));
        result.push('\n');
    }
    result
}

/// Parse the text representation. Blank lines are kept as empty rows.
/// Any token other than `alive` or `dead` rejects the whole input.
pub fn parse_state(content: &str) -> BoardResult<ParsedState> {
    let mut rows = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(col_idx, token)| {
                token.parse::<Status>().map_err(|_| BoardError::Parse {
                    line: line_idx + 1,
                    column: col_idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<BoardResult<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(ParsedState { rows })
}

/// Save a board to a text file. The parent directory must exist.
pub fn save_state_to_file<P: AsRef<Path>>(board: &Board, path: P) -> BoardResult<()> {
    let path = path.as_ref();
    std::fs::write(path, serialize_board(board)).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), side = board.side(), "state saved");
    Ok(())
}

/// Read and parse a state file
pub fn read_state_file<P: AsRef<Path>>(path: P) -> BoardResult<ParsedState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state = parse_state(&content)?;
    debug!(path = %path.display(), rows = state.row_count(), "state file read");
    Ok(state)
}

/// Create example state files
pub fn create_example_states<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples: [(&str, usize, &[(usize, usize)]); 4] = [
        ("glider.txt", 8, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]),
        ("blinker.txt", 5, &[(2, 1), (2, 2), (2, 3)]),
        ("block.txt", 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]),
        (
            "beacon.txt",
            6,
            &[(1, 1), (1, 2), (2, 1), (3, 4), (4, 3), (4, 4)],
        ),
    ];

    for (name, side, alive) in examples {
        let mut board = Board::new(side);
        for &(row, col) in alive {
            board.set_status(row, col, Status::Alive)?;
        }
        save_state_to_file(&board, dir.join(name))
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

//! Display and output formatting utilities

use crate::config::{GridStyle, OutputFormat};
use crate::game_of_life::Board;
use anyhow::Result;

/// Format boards for terminal output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Render a board in the requested format and style
    pub fn render(board: &Board, format: OutputFormat, style: GridStyle) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&board.snapshot())?),
            OutputFormat::Text => {
                let mut output = Self::format_summary(board);
                output.push('\n');
                output.push_str(&match style {
                    GridStyle::Compact => Self::format_grid_compact(board),
                    GridStyle::Coordinates => Self::format_grid_with_coords(board),
                });
                Ok(output)
            }
        }
    }

    /// One line describing size, generation and population
    pub fn format_summary(board: &Board) -> String {
        format!(
            "Board {}x{} | generation {} | living cells {}{}",
            board.side(),
            board.side(),
            board.generation(),
            board.alive_count(),
            if board.is_playing() { " | playing" } else { "" }
        )
    }

    /// Format a board in compact form
    pub fn format_grid_compact(board: &Board) -> String {
        let mut output = String::new();
        for row in board.status_matrix() {
            for status in row {
                output.push(if status.is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a board with coordinates
    pub fn format_grid_with_coords(board: &Board) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..board.side() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (row, statuses) in board.status_matrix().iter().enumerate() {
            output.push_str(&format!("{:2} ", row));
            for status in statuses {
                output.push_str(if status.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{BoardSnapshot, Status};

    fn sample_board() -> Board {
        let mut board = Board::new(3);
        for (row, col) in [(0, 0), (1, 1), (2, 2)] {
            board.set_status(row, col, Status::Alive).unwrap();
        }
        board
    }

    #[test]
    fn test_grid_formatting() {
        let board = sample_board();

        let compact = BoardFormatter::format_grid_compact(&board);
        assert_eq!(compact, "█··\n·█·\n··█\n");

        let with_coords = BoardFormatter::format_grid_with_coords(&board);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_render_text_and_json() {
        let board = sample_board();

        let text = BoardFormatter::render(&board, OutputFormat::Text, GridStyle::Compact).unwrap();
        assert!(text.starts_with("Board 3x3 | generation 0 | living cells 3\n"));

        let json = BoardFormatter::render(&board, OutputFormat::Json, GridStyle::Compact).unwrap();
        let snapshot: BoardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, board.snapshot());
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Yellow);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}

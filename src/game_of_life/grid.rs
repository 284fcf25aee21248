//! Square board of cells: lifecycle, stepping, auto-play and shifting

use super::{Cell, Scheduler, Status};
use crate::error::{BoardError, BoardResult};
use itertools::iproduct;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Default delay between two auto-play steps
pub const DEFAULT_PLAY_INTERVAL: Duration = Duration::from_secs(1);

/// Direction for a one-step pan of the board contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) offset applied to every cell
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

/// Serializable summary of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub side: usize,
    pub generation: u64,
    pub playing: bool,
    pub alive: Vec<(usize, usize)>,
}

/// A square Game of Life board with hard edges
#[derive(Debug, Clone)]
pub struct Board {
    side: usize,
    cells: Vec<Cell>,
    playing: bool,
    generation: u64,
    play_interval: Duration,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            side: 0,
            cells: Vec::new(),
            playing: false,
            generation: 0,
            play_interval: DEFAULT_PLAY_INTERVAL,
        }
    }
}

impl Board {
    /// Create a board of `side` x `side` dead cells
    pub fn new(side: usize) -> Self {
        let mut board = Self::default();
        board.rebuild(side);
        board
    }

    /// Set the delay between auto-play steps
    pub fn with_play_interval(mut self, interval: Duration) -> Self {
        self.play_interval = interval;
        self
    }

    /// Parse user supplied side text. Surrounding whitespace is ignored.
    pub fn parse_side(input: &str, max: Option<usize>) -> BoardResult<usize> {
        let invalid = || BoardError::InvalidSize {
            input: input.to_string(),
            max,
        };
        let side: i64 = input.trim().parse().map_err(|_| invalid())?;
        if side <= 0 {
            return Err(invalid());
        }
        let side = usize::try_from(side).map_err(|_| invalid())?;
        match max {
            Some(max) if side > max => Err(invalid()),
            _ => Ok(side),
        }
    }

    /// Replace the board with a fresh one whose side is parsed from `side_text`.
    /// On error the current board is left untouched.
    pub fn create(&mut self, side_text: &str, max: Option<usize>) -> BoardResult<()> {
        let side = Self::parse_side(side_text, max)?;
        self.rebuild(side);
        Ok(())
    }

    /// Discard all cells and build a dead board of the given side.
    /// Auto-play is stopped.
    pub fn rebuild(&mut self, side: usize) {
        self.playing = false;
        self.generation = 0;
        self.side = side;
        self.cells = iproduct!(0..side, 0..side)
            .map(|(row, col)| Cell::new(row, col))
            .collect();
        Self::link_neighbors(&mut self.cells, side);
        info!(side, "board created");
    }

    fn link_neighbors(cells: &mut [Cell], side: usize) {
        for cell in cells.iter_mut() {
            let (row, col) = (cell.row(), cell.col());
            let rows = row.saturating_sub(1)..=(row + 1).min(side - 1);
            let cols = col.saturating_sub(1)..=(col + 1).min(side - 1);
            let neighbors = iproduct!(rows, cols)
                .filter(|&pos| pos != (row, col))
                .map(|(r, c)| r * side + c)
                .collect();
            cell.link_neighbors(neighbors);
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    fn checked_index(&self, row: usize, col: usize) -> BoardResult<usize> {
        if row < self.side && col < self.side {
            Ok(self.index(row, col))
        } else {
            Err(BoardError::OutOfBounds {
                row,
                col,
                side: self.side,
            })
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.checked_index(row, col).ok().map(|idx| &self.cells[idx])
    }

    /// Status at (row, col), or `None` outside the board
    pub fn status(&self, row: usize, col: usize) -> Option<Status> {
        self.cell(row, col).map(Cell::status)
    }

    /// Flip a single cell, returning its new status
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> BoardResult<Status> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx].toggle();
        Ok(self.cells[idx].status())
    }

    pub fn set_status(&mut self, row: usize, col: usize, status: Status) -> BoardResult<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx].set_status(status);
        Ok(())
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(Cell::is_alive)
    }

    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.is_alive())
            .map(|cell| (cell.row(), cell.col()))
            .collect()
    }

    /// Copy of every status, one inner vector per row
    pub fn status_matrix(&self) -> Vec<Vec<Status>> {
        if self.side == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.side)
            .map(|row| row.iter().map(Cell::status).collect())
            .collect()
    }

    /// Advance one generation and return the number of live cells.
    ///
    /// All neighbor counts are taken from the current generation before any
    /// cell changes. An all-dead result stops auto-play.
    pub fn step(&mut self) -> usize {
        let cells = &self.cells;
        let counts: Vec<u8> = cells
            .par_iter()
            .map(|cell| cell.count_alive_neighbors(cells))
            .collect();
        for (cell, count) in self.cells.iter_mut().zip(counts) {
            cell.record_alive_neighbors(count);
        }

        let mut alive = 0;
        for cell in self.cells.iter_mut() {
            if cell.update().is_alive() {
                alive += 1;
            }
        }
        self.generation += 1;
        debug!(generation = self.generation, alive, "stepped");

        if alive == 0 && self.playing {
            self.playing = false;
            info!(generation = self.generation, "board is empty, auto-play stopped");
        }
        alive
    }

    /// Start or stop auto-play. Starting steps once immediately and schedules
    /// the next tick on `scheduler`.
    pub fn toggle_play(&mut self, scheduler: &mut dyn Scheduler) {
        if self.playing {
            self.playing = false;
            info!(generation = self.generation, "auto-play paused");
        } else {
            self.playing = true;
            info!(generation = self.generation, "auto-play started");
            self.play_tick(scheduler);
        }
    }

    /// Handle a scheduled tick. Does nothing once auto-play is off.
    /// Returns whether a step was taken.
    pub fn play_tick(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if !self.playing {
            return false;
        }
        scheduler.schedule_tick(self.play_interval);
        self.step();
        true
    }

    /// Stop auto-play, returning whether it was running
    pub fn pause(&mut self) -> bool {
        let was_playing = self.playing;
        if was_playing {
            self.playing = false;
            info!(generation = self.generation, "auto-play paused");
        }
        was_playing
    }

    /// Stop auto-play and kill every cell
    pub fn clear(&mut self) {
        self.pause();
        self.kill_all();
        self.generation = 0;
    }

    fn kill_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_status(Status::Dead);
        }
    }

    /// Copy `rows` onto the board starting at the top-left corner. Rows and
    /// columns past the board edge are ignored and cells past the end of the
    /// input are left as they are.
    pub fn apply_rows(&mut self, rows: &[Vec<Status>]) {
        let side = self.side;
        for (row, statuses) in rows.iter().enumerate().take(side) {
            for (col, &status) in statuses.iter().enumerate().take(side) {
                let idx = self.index(row, col);
                self.cells[idx].set_status(status);
            }
        }
    }

    /// Move every cell one step in `direction`. Cells pushed past an edge are
    /// lost and the vacated edge is dead.
    pub fn shift(&mut self, direction: Direction) {
        self.pause();
        let previous = self.status_matrix();
        self.kill_all();

        let side = self.side;
        let (row_shift, col_shift) = direction.offset();
        for (row, statuses) in previous.iter().enumerate() {
            let Some(target_row) = row.checked_add_signed(row_shift).filter(|&r| r < side) else {
                continue;
            };
            for (col, &status) in statuses.iter().enumerate() {
                let Some(target_col) = col.checked_add_signed(col_shift).filter(|&c| c < side)
                else {
                    continue;
                };
                let idx = self.index(target_row, target_col);
                self.cells[idx].set_status(status);
            }
        }
        debug!(?direction, "board shifted");
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            side: self.side,
            generation: self.generation,
            playing: self.playing,
            alive: self.alive_cells(),
        }
    }
}

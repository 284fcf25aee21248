//! Session: the operations a user interface drives, and the collaborators it
//! supplies in return (prompts and tick scheduling)

pub mod prompt;

pub use prompt::{Confirmation, FixedAnswer, Prompter, TerminalPrompter};
pub use crate::game_of_life::schedule::{Scheduler, TickQueue};

use crate::config::Settings;
use crate::error::{BoardError, BoardResult};
use crate::game_of_life::{read_state_file, save_state_to_file, Board, Direction, Status};
use std::time::Instant;
use tracing::{debug, info};

/// Result of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// State was applied. `resized` is set when the board was recreated first.
    Loaded { rows: usize, resized: bool },
    /// The user cancelled one of the confirmations
    Aborted,
    /// No path was given
    Skipped,
}

/// Owns a board and routes user actions to it
pub struct Session<P: Prompter> {
    board: Board,
    prompter: P,
    ticks: TickQueue,
    max_side: usize,
}

impl<P: Prompter> Session<P> {
    /// Session with an uninitialized board, limited to the default maximum side
    pub fn new(prompter: P) -> Self {
        Self {
            board: Board::default(),
            prompter,
            ticks: TickQueue::new(),
            max_side: Settings::default().board.max_side,
        }
    }

    /// Session with a dead board of the configured default size
    pub fn with_settings(prompter: P, settings: &Settings) -> Self {
        Self {
            board: Board::new(settings.board.default_side)
                .with_play_interval(settings.play_interval()),
            prompter,
            ticks: TickQueue::new(),
            max_side: settings.board.max_side,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    pub fn ticks(&self) -> &TickQueue {
        &self.ticks
    }

    fn report(&mut self, err: &BoardError) {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        self.prompter.show_error(err.title(), &message);
    }

    fn reported<T>(&mut self, result: BoardResult<T>) -> BoardResult<T> {
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Replace the board with one whose side is parsed from `side_text`.
    /// Invalid input is reported and leaves the board as it was.
    pub fn create_grid(&mut self, side_text: &str) -> BoardResult<()> {
        let result = self.board.create(side_text, Some(self.max_side));
        if result.is_ok() {
            self.ticks.clear();
        }
        self.reported(result)
    }

    pub fn step(&mut self) -> usize {
        self.board.step()
    }

    /// Start or pause auto-play
    pub fn toggle_play(&mut self) {
        if !self.board.is_playing() {
            // Ticks left over from an earlier run would start a second chain
            self.ticks.clear();
        }
        self.board.toggle_play(&mut self.ticks);
    }

    /// Deliver one scheduled tick
    pub fn on_tick(&mut self) -> bool {
        self.board.play_tick(&mut self.ticks)
    }

    /// Fire every tick due at `now`, returning how many steps were taken.
    /// Ticks scheduled while firing wait for the next call.
    pub fn run_due_ticks(&mut self, now: Instant) -> usize {
        let mut due = 0;
        while self.ticks.pop_due(now).is_some() {
            due += 1;
        }
        (0..due).filter(|_| self.on_tick()).count()
    }

    /// Wait for the next tick and deliver it. Returns `None` when nothing is
    /// scheduled, otherwise whether a step was taken.
    pub fn wait_for_tick(&mut self) -> Option<bool> {
        self.ticks.wait_next()?;
        Some(self.on_tick())
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Save the board to `path`. An empty path means the user cancelled.
    pub fn save_state(&mut self, path: &str) -> BoardResult<()> {
        self.board.pause();
        if path.is_empty() {
            return Ok(());
        }
        let result = save_state_to_file(&self.board, path);
        self.reported(result)
    }

    /// Load a saved state from `path`.
    ///
    /// A state with more rows than the board asks whether to recreate the
    /// board at that size; anything but yes leaves the board unchanged. A
    /// board with live cells asks whether to clear first; declining merges
    /// and cancelling leaves the board unchanged.
    pub fn load_state(&mut self, path: &str) -> BoardResult<LoadOutcome> {
        self.board.pause();
        if path.is_empty() {
            return Ok(LoadOutcome::Skipped);
        }

        let state = read_state_file(path);
        let state = self.reported(state)?;
        let rows = state.row_count();

        let mut resized = false;
        if rows > self.board.side() {
            let question = format!(
                "The saved state is larger than the current board.\n\
                 Would you like to create a board of the same size ({})?",
                rows
            );
            match self.prompter.confirm(&question) {
                Confirmation::Yes => {
                    let result = self.board.create(&rows.to_string(), Some(self.max_side));
                    self.reported(result)?;
                    self.ticks.clear();
                    resized = true;
                }
                Confirmation::No | Confirmation::Cancel => {
                    info!(path, "load cancelled");
                    return Ok(LoadOutcome::Aborted);
                }
            }
        }

        if !self.board.is_empty() {
            match self.prompter.confirm("Clear the current board before loading?") {
                Confirmation::Yes => self.board.clear(),
                Confirmation::No => {}
                Confirmation::Cancel => {
                    info!(path, "load cancelled");
                    return Ok(LoadOutcome::Aborted);
                }
            }
        }

        self.board.apply_rows(&state.rows);
        info!(path, rows, resized, "state loaded");
        Ok(LoadOutcome::Loaded { rows, resized })
    }

    pub fn shift(&mut self, direction: Direction) {
        self.board.shift(direction);
    }

    /// Flip the cell the user clicked
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> BoardResult<Status> {
        let result = self.board.toggle_cell(row, col);
        if let Ok(status) = &result {
            debug!(row, col, %status, "cell toggled");
        }
        self.reported(result)
    }
}

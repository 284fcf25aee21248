//! A single board position and its cached neighborhood

use super::LifeRules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Alive,
    #[default]
    Dead,
}

impl Status {
    /// Token used for this status in saved state files
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
        }
    }

    pub fn is_alive(self) -> bool {
        self == Status::Alive
    }

    pub fn toggled(self) -> Status {
        match self {
            Status::Alive => Status::Dead,
            Status::Dead => Status::Alive,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a token is neither `alive` nor `dead`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("alive") {
            Ok(Status::Alive)
        } else if s.eq_ignore_ascii_case("dead") {
            Ok(Status::Dead)
        } else {
            Err(UnknownStatus(s.to_string()))
        }
    }
}

/// One position on a board.
///
/// Neighbors are stored as indices into the owning board's row-major cell
/// vector. They are linked once when the board is built and are only valid
/// for that board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    status: Status,
    alive_neighbors: u8,
    neighbors: Vec<usize>,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            status: Status::Dead,
            alive_neighbors: 0,
            neighbors: Vec::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    /// Indices of the neighboring cells in the owning board
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Live neighbor count recorded by the last counting pass
    pub fn alive_neighbors(&self) -> u8 {
        self.alive_neighbors
    }

    pub(crate) fn link_neighbors(&mut self, neighbors: Vec<usize>) {
        debug_assert!(neighbors.len() <= LifeRules::max_neighbor_count() as usize);
        self.neighbors = neighbors;
    }

    /// Flip between alive and dead
    pub fn toggle(&mut self) {
        self.status = self.status.toggled();
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Count neighbors that are currently alive. `cells` must be the board
    /// this cell was linked in.
    pub fn count_alive_neighbors(&self, cells: &[Cell]) -> u8 {
        self.neighbors
            .iter()
            .filter(|&&idx| cells[idx].is_alive())
            .count() as u8
    }

    /// Status this cell would take given `alive_neighbors` live neighbors
    pub fn next_status(&self, alive_neighbors: u8) -> Status {
        LifeRules::next_status(self.status, alive_neighbors)
    }

    pub(crate) fn record_alive_neighbors(&mut self, count: u8) {
        self.alive_neighbors = count;
    }

    /// Apply the rule to the recorded count
    pub(crate) fn update(&mut self) -> Status {
        self.status = self.next_status(self.alive_neighbors);
        self.status
    }
}

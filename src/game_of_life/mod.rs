//! Game of Life core: cells, the rule, the board and its text format

pub mod cell;
pub mod grid;
pub mod rules;
pub mod io;
pub mod schedule;

pub use cell::{Cell, Status, UnknownStatus};
pub use grid::{Board, BoardSnapshot, Direction, DEFAULT_PLAY_INTERVAL};
pub use rules::LifeRules;
pub use schedule::{Scheduler, TickQueue};
pub use io::{
    create_example_states, parse_state, read_state_file, save_state_to_file, serialize_board,
    ParsedState,
};

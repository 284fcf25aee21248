//! Conway's Game of Life board
//!
//! A square board of toggleable cells with hard edges that can be stepped,
//! auto-played on a fixed interval, saved to and loaded from text files and
//! panned one cell at a time. The [`session::Session`] type is the surface a
//! user interface drives.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use error::{BoardError, BoardResult};
pub use game_of_life::{Board, Cell, Direction, Status};
pub use session::{LoadOutcome, Session};

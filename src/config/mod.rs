//! Configuration management

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, GridStyle, OutputConfig, OutputFormat, PlayConfig, Settings,
};

//! Configuration settings for the board

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub play: PlayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub default_side: usize,
    pub max_side: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub style: GridStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStyle {
    Compact,
    Coordinates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                default_side: 20,
                max_side: 200,
            },
            play: PlayConfig { interval_ms: 1000 },
            output: OutputConfig {
                format: OutputFormat::Text,
                style: GridStyle::Compact,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` if it exists, otherwise use defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.default_side == 0 {
            anyhow::bail!("Default board side must be positive");
        }

        if self.board.max_side == 0 {
            anyhow::bail!("Maximum board side must be positive");
        }

        if self.board.default_side > self.board.max_side {
            anyhow::bail!(
                "Default board side {} exceeds maximum {}",
                self.board.default_side,
                self.board.max_side
            );
        }

        if self.play.interval_ms == 0 {
            anyhow::bail!("Play interval must be positive");
        }

        Ok(())
    }

    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.play.interval_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(side) = cli_overrides.side {
            self.board.default_side = side;
            self.board.max_side = self.board.max_side.max(side);
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.play.interval_ms = interval_ms;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub side: Option<usize>,
    pub interval_ms: Option<u64>,
    pub format: Option<OutputFormat>,
}

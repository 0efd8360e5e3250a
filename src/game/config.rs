use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::palette::{ColorParseError, Palette, Rgb};

/// Largest accepted grid side; cell coordinates must fit in an `i32`
pub const MAX_GRID_SIZE: usize = 1000;
/// Largest accepted score per food
pub const MAX_SCORE_PER_FOOD: u32 = 1_000_000;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Configuration for the game
///
/// Fixed at startup. Every field has a default, so a TOML file only needs
/// to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Pace
    /// Tick interval at the start of a game, in milliseconds
    pub initial_speed_ms: u64,
    /// How much faster the tick gets per food eaten, in milliseconds
    pub speed_decrement_ms: u64,
    /// The tick interval never drops below this, in milliseconds
    pub min_speed_ms: u64,

    /// Points per food eaten
    pub score_per_food: u32,

    // Display
    /// Draw grid lines between cells
    pub show_grid: bool,
    pub background_color: String,
    pub grid_color: String,
    pub food_color: String,
    pub snake_head_color: String,
    pub snake_body_color: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_speed_ms: 150,
            speed_decrement_ms: 2,
            min_speed_ms: 50,
            score_per_food: 10,
            show_grid: true,
            background_color: "#222".to_string(),
            grid_color: "#333".to_string(),
            food_color: "#FF4136".to_string(),
            snake_head_color: "#2ECC40".to_string(),
            snake_body_color: "#3D9970".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration parameters
    ///
    /// The initial snake is laid out leftward from the centre cell, so its
    /// length is bounded by half the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be in [2, {}], got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }

        let max_length = self.grid_size / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length must be in [1, {}], got {}",
                max_length, self.initial_snake_length
            )));
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_speed_ms must be at least 1".to_string(),
            ));
        }

        if self.initial_speed_ms < self.min_speed_ms {
            return Err(ConfigError::Invalid(format!(
                "initial_speed_ms ({}) cannot be below min_speed_ms ({})",
                self.initial_speed_ms, self.min_speed_ms
            )));
        }

        if self.score_per_food > MAX_SCORE_PER_FOOD {
            return Err(ConfigError::Invalid(format!(
                "score_per_food must be at most {}, got {}",
                MAX_SCORE_PER_FOOD, self.score_per_food
            )));
        }

        self.palette()?;
        Ok(())
    }

    /// Resolve the configured color strings
    pub fn palette(&self) -> Result<Palette, ColorParseError> {
        Ok(Palette {
            background: self.background_color.parse()?,
            grid: self.grid_color.parse()?,
            food: self.food_color.parse()?,
            snake_head: self.snake_head_color.parse()?,
            snake_body: self.snake_body_color.parse()?,
            eyes: Rgb::WHITE,
        })
    }
}

//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine owns the state and is its only writer; input only reaches it as
//! [`Intent`]s, and timers only learn about pace through [`Schedule`].

pub mod action;
pub mod config;
pub mod engine;
pub mod palette;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, Schedule, TickReport};
pub use palette::{ColorParseError, Palette, Rgb};
pub use state::{CollisionType, Ending, GameState, Outcome, Phase, Position, Snake};

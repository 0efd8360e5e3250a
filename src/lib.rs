//! Grid Snake - the classic single-player snake game
//!
//! This library provides:
//! - Core game logic and the tick-driven engine (game module)
//! - A pure scene description and its terminal painter (render module)
//! - Keyboard and mouse-swipe input mapping (input module)
//! - The interactive terminal mode and its periodic timer (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

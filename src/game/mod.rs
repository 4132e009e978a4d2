//! Core simulation for the snail game
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it at most one direction change per tick and render the
//! resulting state between ticks.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod scorer;
pub mod state;

// Re-export commonly used types
pub use action::{is_valid_direction, Direction};
pub use config::GameConfig;
pub use engine::{adjusted_delay, GameEngine, TickOutcome};
pub use error::GameError;
pub use scorer::{toroidal_distance, Scorer};
pub use state::{GameState, GameStatus, Position, Snail};

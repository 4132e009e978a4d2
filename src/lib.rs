//! Snail - a terminal snake game on a toroidal grid
//!
//! This library provides:
//! - Core simulation and distance-aware scoring (game module)
//! - The session loop and terminal driver (modes module)
//! - Key mapping (input module) and TUI rendering (render module)
//! - In-process play statistics (metrics module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

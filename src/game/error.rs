use std::error::Error;
use std::fmt;

/// Failures raised by the simulation core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A pickup was scored before the snail made a single step
    InvalidState,
    /// Food had to be placed but every cell is taken by the snail
    BoardFull,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidState => {
                write!(f, "cannot calculate score when no steps were made")
            }
            GameError::BoardFull => write!(f, "no free cell for food left"),
        }
    }
}

impl Error for GameError {}

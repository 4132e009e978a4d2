use std::time::Duration;

pub const MIN_DELAY_MS: u64 = 100;
pub const MAX_DELAY_MS: u64 = 200;
pub const DEFAULT_DELAY_MS: u64 = 150;

pub const MIN_DIMENSION: usize = 10;
pub const MAX_DIMENSION: usize = 50;
pub const DEFAULT_DIMENSION: usize = 20;

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snail
    pub initial_snail_length: usize,
    /// Delay between ticks at session start
    pub start_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_DIMENSION,
            grid_height: DEFAULT_DIMENSION,
            initial_snail_length: 3,
            start_delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl GameConfig {
    /// Create a square configuration, clamping both values into their
    /// supported ranges
    pub fn new(dimension: usize, delay_ms: u64) -> Self {
        let dimension = dimension.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let delay_ms = delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);

        Self {
            grid_width: dimension,
            grid_height: dimension,
            start_delay: Duration::from_millis(delay_ms),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(MIN_DIMENSION, DEFAULT_DELAY_MS)
    }

    pub fn total_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }
}

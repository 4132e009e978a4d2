use std::collections::VecDeque;
use std::time::Duration;

use super::action::Direction;
use super::scorer::Scorer;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one cell in a direction, wrapping around the grid edges
    pub fn wrapped_step(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.velocity();
        Self {
            x: (self.x + dx).rem_euclid(width as i32),
            y: (self.y + dy).rem_euclid(height as i32),
        }
    }
}

/// The player's snail
#[derive(Debug, Clone, PartialEq)]
pub struct Snail {
    /// Body segments, tail at the front and head at the back
    pub body: VecDeque<Position>,
    /// Current heading
    pub heading: Direction,
    /// Cell released by the tail on the last move, if any
    pub vacated_tail: Option<Position>,
}

impl Snail {
    /// Create a straight snail whose head sits at `head`, trailing behind it
    pub fn new(head: Position, heading: Direction, length: usize) -> Self {
        let (dx, dy) = heading.velocity();
        let body = (0..length as i32)
            .rev()
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self {
            body,
            heading,
            vacated_tail: None,
        }
    }

    /// Build a snail from explicit segments, listed tail first
    pub fn from_segments(segments: impl IntoIterator<Item = Position>, heading: Direction) -> Self {
        Self {
            body: segments.into_iter().collect(),
            heading,
            vacated_tail: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // The body is never empty while a session exists.
        self.body[self.body.len() - 1]
    }

    /// Get the tail position
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// Where the head lands after one more step in the current heading
    pub fn next_head(&self, width: usize, height: usize) -> Position {
        self.head().wrapped_step(self.heading, width, height)
    }

    /// Whether moving the head onto `next_head` runs into the body.
    ///
    /// When the snail is not growing, its tail leaves its cell on the same
    /// move and does not count as an obstacle.
    pub fn would_collide(&self, next_head: Position, growing: bool) -> bool {
        let skip = if growing { 0 } else { 1 };
        self.body.iter().skip(skip).any(|&segment| segment == next_head)
    }

    /// Move one cell in the current heading, keeping the tail when `grew`
    pub fn advance(&mut self, grew: bool, width: usize, height: usize) {
        let new_head = self.next_head(width, height);
        self.body.push_back(new_head);

        self.vacated_tail = if grew { None } else { self.body.pop_front() };
    }

    /// Check if position is occupied by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Complete state of one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snail: Snail,
    pub scorer: Scorer,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Delay the driver waits between ticks
    pub delay: Duration,
    pub status: GameStatus,
}

impl GameState {
    /// Create a running session state. The scorer's first interval starts
    /// at the snail's head and the given food.
    pub fn new(
        snail: Snail,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        delay: Duration,
    ) -> Self {
        let mut scorer = Scorer::new(grid_width, grid_height);
        scorer.record_interval(snail.head(), food);

        Self {
            snail,
            scorer,
            food,
            grid_width,
            grid_height,
            delay,
            status: GameStatus::Running,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }

    pub fn score(&self) -> u32 {
        self.scorer.score()
    }

    /// The snail covers the whole board
    pub fn has_won(&self) -> bool {
        self.snail.len() >= self.total_cells()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    /// Flip between running and paused; ended sessions are left alone
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            ended => ended,
        };
    }
}

//! Distance-aware scoring.
//!
//! Each pickup is worth up to [`MAX_POINTS`]. The award depends on how many
//! steps the snail needed beyond the shortest toroidal path between where its
//! head was when the food appeared and the food itself. Near-optimal routes
//! earn close to the maximum; dawdling for half the board area or more earns
//! a single point.

use super::error::GameError;
use super::state::Position;

/// Points awarded for a pickup reached along a shortest path
pub const MAX_POINTS: u32 = 10;

/// Manhattan distance between two cells on a torus.
///
/// Takes the shortest of the direct route and the four routes that wrap once
/// across the left, right, top or bottom edge.
pub fn toroidal_distance(a: Position, b: Position, width: usize, height: usize) -> u32 {
    let (w, h) = (width as i64, height as i64);
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let dx = (ax - bx).abs();
    let dy = (ay - by).abs();

    let candidates = [
        dx + dy,
        (ax + w - bx) + dy,
        (w - ax + bx) + dy,
        dx + (ay + h - by),
        dx + (h - ay + by),
    ];

    candidates.into_iter().min().unwrap_or(dx + dy) as u32
}

/// Tracks the running score and the steps taken since the last pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    score: u32,
    steps_since_pickup: u32,
    grid_width: usize,
    grid_height: usize,
    max_points: u32,
    interval_head: Position,
    interval_food: Position,
}

impl Scorer {
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            score: 0,
            steps_since_pickup: 0,
            grid_width,
            grid_height,
            max_points: MAX_POINTS,
            interval_head: Position::new(0, 0),
            interval_food: Position::new(0, 0),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps_since_pickup(&self) -> u32 {
        self.steps_since_pickup
    }

    /// Remember where the head and the food were when the current interval began
    pub fn record_interval(&mut self, head: Position, food: Position) {
        self.interval_head = head;
        self.interval_food = food;
    }

    /// Count one simulation step
    pub fn step(&mut self) {
        self.steps_since_pickup += 1;
    }

    /// Shortest toroidal distance for the current interval
    pub fn interval_distance(&self) -> u32 {
        toroidal_distance(
            self.interval_head,
            self.interval_food,
            self.grid_width,
            self.grid_height,
        )
    }

    /// Score a pickup, add it to the total and start counting steps anew.
    ///
    /// Returns the points awarded for this pickup.
    pub fn compute_score_on_pickup(&mut self) -> Result<u32, GameError> {
        let steps = self.steps_since_pickup;
        self.steps_since_pickup = 0;

        if steps < 1 {
            return Err(GameError::InvalidState);
        }

        let awarded = self.points_for(steps, self.interval_distance());
        self.score += awarded;
        Ok(awarded)
    }

    fn points_for(&self, steps: u32, distance: u32) -> u32 {
        // Moving one cell per step, the snail cannot beat the shortest path.
        // Kept so that a food spawn closer than expected still scores.
        if steps < distance {
            return self.max_points;
        }

        let detour = (steps - distance) as usize;
        let half_area = (self.grid_width * self.grid_height) / 2;
        if detour >= half_area {
            return 1;
        }

        let x = detour as f64 / half_area as f64;
        let fraction = (1.0 - (2.0 * x - 1.0).powi(3)) / 2.0;
        let points = (fraction * self.max_points as f64).round() as u32;
        points.max(1)
    }
}

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{
    action::{is_valid_direction, Direction},
    config::{GameConfig, MIN_DELAY_MS},
    error::GameError,
    state::{GameState, GameStatus, Position, Snail},
};

/// Milliseconds shaved off the delay each time the board gets fuller
const DELAY_STEP_MS: u64 = 10;

/// Fill percentage above which the delay may drop, paired with the delay
/// it has to exceed for that to happen
const SPEEDUP_THRESHOLDS: [(f64, u64); 9] = [
    (90.0, 100),
    (80.0, 110),
    (70.0, 120),
    (60.0, 130),
    (50.0, 140),
    (40.0, 150),
    (30.0, 160),
    (20.0, 170),
    (10.0, 180),
];

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The head was on the food when the tick started
    pub ate_food: bool,
    /// Points awarded for that pickup
    pub points: Option<u32>,
    /// Session status after the tick
    pub status: GameStatus,
}

impl TickOutcome {
    fn idle(status: GameStatus) -> Self {
        Self {
            ate_food: false,
            points: None,
            status,
        }
    }
}

/// Next delay for a snail of `body_len` cells on a board of `total_cells`.
///
/// Drops by one step while the fill ratio is above a threshold whose paired
/// delay is still exceeded, never going below the floor and never rising.
pub fn adjusted_delay(current: Duration, body_len: usize, total_cells: usize) -> Duration {
    let share = 100.0 * body_len as f64 / total_cells as f64;
    let mut delay_ms = current.as_millis() as u64;

    let speed_up = SPEEDUP_THRESHOLDS
        .iter()
        .any(|&(fill, ceiling)| share > fill && delay_ms > ceiling);
    if speed_up {
        delay_ms = delay_ms.saturating_sub(DELAY_STEP_MS);
    }

    Duration::from_millis(delay_ms.max(MIN_DELAY_MS))
}

/// Runs the simulation: food placement, movement, collisions and pacing
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the state of a fresh session
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let length = self.config.initial_snail_length;

        let head = Position::new(
            (width / 2 + length.saturating_sub(1)) as i32 % width as i32,
            (height / 2) as i32,
        );
        let snail = Snail::new(head, Direction::East, length);
        let food = self.place_food(&snail, width, height)?;

        info!(
            "new session on {}x{} board, delay {:?}",
            width, height, self.config.start_delay
        );
        Ok(GameState::new(
            snail,
            food,
            width,
            height,
            self.config.start_delay,
        ))
    }

    /// Pick a cell not covered by the snail, uniformly at random
    pub fn place_food(
        &mut self,
        snail: &Snail,
        width: usize,
        height: usize,
    ) -> Result<Position, GameError> {
        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snail.occupies(pos))
            .collect();

        free.choose(&mut self.rng).copied().ok_or(GameError::BoardFull)
    }

    /// Advance a running session by one step.
    ///
    /// Paused or ended sessions are left untouched.
    pub fn tick(
        &mut self,
        state: &mut GameState,
        pending: Option<Direction>,
    ) -> Result<TickOutcome, GameError> {
        if state.status != GameStatus::Running {
            return Ok(TickOutcome::idle(state.status));
        }

        if let Some(direction) = pending {
            if is_valid_direction(Some(state.snail.heading), direction) {
                state.snail.heading = direction;
            }
        }

        let (width, height) = (state.grid_width, state.grid_height);
        let mut outcome = TickOutcome::idle(GameStatus::Running);

        if state.snail.head() == state.food {
            let points = state.scorer.compute_score_on_pickup()?;
            outcome.ate_food = true;
            outcome.points = Some(points);
            debug!("pickup worth {} points, score {}", points, state.score());

            if state.has_won() {
                return Ok(self.finish(state, GameStatus::Won, outcome));
            }
            state.food = self.place_food(&state.snail, width, height)?;
            state.scorer.record_interval(state.snail.head(), state.food);
        }

        let next_head = state.snail.next_head(width, height);
        if state.snail.would_collide(next_head, outcome.ate_food) {
            return Ok(self.finish(state, GameStatus::Lost, outcome));
        }
        if state.has_won() {
            return Ok(self.finish(state, GameStatus::Won, outcome));
        }

        state.snail.advance(outcome.ate_food, width, height);
        state.scorer.step();

        let delay = adjusted_delay(state.delay, state.snail.len(), state.total_cells());
        if delay != state.delay {
            debug!("delay lowered to {:?}", delay);
            state.delay = delay;
        }

        Ok(outcome)
    }

    fn finish(
        &self,
        state: &mut GameState,
        status: GameStatus,
        outcome: TickOutcome,
    ) -> TickOutcome {
        state.status = status;
        info!(
            "session ended ({:?}) with score {} and length {}",
            status,
            state.score(),
            state.snail.len()
        );
        TickOutcome { status, ..outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::small(), 7)
    }

    fn state_with(snail: Snail, food: Position, width: usize, height: usize) -> GameState {
        GameState::new(snail, food, width, height, Duration::from_millis(150))
    }

    /// Snail covering the whole 3x3 board, head at (2,0) heading East so that
    /// its next cell is the tail at (0,0)
    fn full_board_snail() -> Snail {
        Snail::from_segments(
            [
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(1, 0),
                Position::new(2, 0),
            ],
            Direction::East,
        )
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset().unwrap();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snail.len(), 3);
        assert_eq!(state.snail.heading, Direction::East);
        assert_eq!(state.snail.tail(), Position::new(10, 10));
        assert_eq!(state.snail.head(), Position::new(12, 10));
        assert!(!state.snail.occupies(state.food));
        assert_eq!(state.delay, Duration::from_millis(150));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        let expected = state.snail.next_head(10, 10);

        let outcome = engine.tick(&mut state, None).unwrap();

        assert_eq!(outcome.status, GameStatus::Running);
        assert!(!outcome.ate_food);
        assert_eq!(state.snail.head(), expected);
        assert_eq!(state.snail.len(), 3);
        assert_eq!(state.scorer.steps_since_pickup(), 1);
    }

    #[test]
    fn test_food_pickup_grows_on_next_move() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(5, 5), Direction::East, 3);
        let mut state = state_with(snail, Position::new(6, 5), 10, 10);

        // Step onto the food
        engine.tick(&mut state, None).unwrap();
        assert_eq!(state.snail.head(), Position::new(6, 5));
        assert_eq!(state.snail.len(), 3);

        // The pickup is noticed before the following move
        let outcome = engine.tick(&mut state, None).unwrap();
        assert!(outcome.ate_food);
        assert_eq!(outcome.points, Some(10));
        assert_eq!(state.score(), 10);
        assert_eq!(state.snail.len(), 4);
        assert_eq!(state.snail.head(), Position::new(7, 5));
        assert!(!state.snail.occupies(state.food));
        assert_eq!(state.scorer.steps_since_pickup(), 1);
    }

    #[test]
    fn test_pickup_without_steps_is_error() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(5, 5), Direction::East, 3);
        let mut state = state_with(snail, Position::new(5, 5), 10, 10);

        assert_eq!(engine.tick(&mut state, None), Err(GameError::InvalidState));
    }

    #[test]
    fn test_wraps_across_edge() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(9, 4), Direction::East, 3);
        let mut state = state_with(snail, Position::new(5, 5), 10, 10);

        engine.tick(&mut state, None).unwrap();
        assert_eq!(state.snail.head(), Position::new(0, 4));
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_self_collision_before_move() {
        let mut engine = engine();
        let mut snail = Snail::from_segments(
            [Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)],
            Direction::East,
        );
        // Force a reversal straight into the neck
        snail.heading = Direction::West;
        let mut state = state_with(snail.clone(), Position::new(8, 8), 10, 10);

        let outcome = engine.tick(&mut state, None).unwrap();

        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(state.status, GameStatus::Lost);
        assert_eq!(state.snail.body, snail.body);
    }

    #[test]
    fn test_self_collision_after_loop() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(5, 5), Direction::East, 5);
        let mut state = state_with(snail, Position::new(8, 8), 10, 10);

        engine.tick(&mut state, Some(Direction::South)).unwrap();
        engine.tick(&mut state, Some(Direction::West)).unwrap();
        let outcome = engine.tick(&mut state, Some(Direction::North)).unwrap();

        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(state.snail.head(), Position::new(4, 6));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let mut engine = engine();
        let snail = Snail::from_segments(
            [
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::North,
        );
        let mut state = state_with(snail, Position::new(8, 8), 10, 10);

        engine.tick(&mut state, None).unwrap();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snail.head(), Position::new(1, 1));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();

        engine.tick(&mut state, Some(Direction::West)).unwrap();

        assert_eq!(state.snail.heading, Direction::East);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_turn_applied_before_move() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(5, 5), Direction::East, 3);
        let mut state = state_with(snail, Position::new(0, 0), 10, 10);

        engine.tick(&mut state, Some(Direction::North)).unwrap();

        assert_eq!(state.snail.heading, Direction::North);
        assert_eq!(state.snail.head(), Position::new(5, 4));
    }

    #[test]
    fn test_win_skips_final_move() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        let snail = full_board_snail();
        let mut state = state_with(snail.clone(), Position::new(1, 1), 3, 3);

        let outcome = engine.tick(&mut state, None).unwrap();

        assert_eq!(outcome.status, GameStatus::Won);
        assert!(state.has_won());
        assert_eq!(state.snail.body, snail.body);
    }

    #[test]
    fn test_final_pickup_wins_without_new_food() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        let snail = full_board_snail();
        let head = snail.head();
        let mut state = state_with(snail, head, 3, 3);
        state.scorer.step();

        let outcome = engine.tick(&mut state, None).unwrap();

        assert!(outcome.ate_food);
        assert_eq!(outcome.status, GameStatus::Won);
        assert!(state.score() > 0);
    }

    #[test]
    fn test_place_food_on_full_board() {
        let mut engine = engine();
        assert_eq!(
            engine.place_food(&full_board_snail(), 3, 3),
            Err(GameError::BoardFull)
        );
    }

    #[test]
    fn test_place_food_only_free_cell() {
        let mut engine = engine();
        let mut snail = full_board_snail();
        snail.body.pop_front();

        for _ in 0..10 {
            assert_eq!(engine.place_food(&snail, 3, 3), Ok(Position::new(0, 0)));
        }
    }

    #[test]
    fn test_place_food_avoids_snail() {
        let mut engine = engine();
        let snail = Snail::new(Position::new(5, 5), Direction::East, 5);

        for _ in 0..200 {
            let food = engine.place_food(&snail, 10, 10).unwrap();
            assert!(!snail.occupies(food));
            assert!((0..10).contains(&food.x) && (0..10).contains(&food.y));
        }
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.status = GameStatus::Lost;
        let before = state.clone();

        let outcome = engine.tick(&mut state, Some(Direction::North)).unwrap();

        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(state, before);
    }

    #[test]
    fn test_paused_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.toggle_pause();
        let before = state.clone();

        engine.tick(&mut state, None).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_adjusted_delay_steps() {
        let ms = Duration::from_millis;

        assert_eq!(adjusted_delay(ms(150), 5, 100), ms(150));
        assert_eq!(adjusted_delay(ms(150), 45, 100), ms(150));
        assert_eq!(adjusted_delay(ms(150), 55, 100), ms(140));
        assert_eq!(adjusted_delay(ms(140), 55, 100), ms(140));
        assert_eq!(adjusted_delay(ms(200), 11, 100), ms(190));
        assert_eq!(adjusted_delay(ms(180), 11, 100), ms(180));
        assert_eq!(adjusted_delay(ms(100), 100, 100), ms(100));
    }

    #[test]
    fn test_adjusted_delay_reaches_floor() {
        let mut delay = Duration::from_millis(150);
        for _ in 0..20 {
            let next = adjusted_delay(delay, 91, 100);
            assert!(next <= delay);
            delay = next;
        }
        assert_eq!(delay, Duration::from_millis(100));
    }

    #[test]
    fn test_delay_never_increases_as_board_fills() {
        let mut delay = Duration::from_millis(150);
        for body_len in 3..=100 {
            let next = adjusted_delay(delay, body_len, 100);
            assert!(next <= delay);
            assert!(next >= Duration::from_millis(100));
            delay = next;
        }
        assert_eq!(delay, Duration::from_millis(100));
    }
}

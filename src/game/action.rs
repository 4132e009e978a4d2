/// Heading of the snail on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::North, Direction::South)
                | (Direction::South, Direction::North)
                | (Direction::East, Direction::West)
                | (Direction::West, Direction::East)
        )
    }

    /// Unit vector (dx, dy) for this heading; y grows downwards
    pub fn velocity(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Whether `new` may replace `current` as the snail's heading.
///
/// Only a full reversal is rejected. Without a current heading every
/// direction is accepted.
pub fn is_valid_direction(current: Option<Direction>, new: Direction) -> bool {
    match current {
        Some(current) => !current.is_opposite(new),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::North.is_opposite(Direction::South));
        assert!(Direction::South.is_opposite(Direction::North));
        assert!(Direction::East.is_opposite(Direction::West));
        assert!(Direction::West.is_opposite(Direction::East));

        assert!(!Direction::North.is_opposite(Direction::East));
        assert!(!Direction::North.is_opposite(Direction::West));
        assert!(!Direction::North.is_opposite(Direction::North));
    }

    #[test]
    fn test_direction_velocity() {
        assert_eq!(Direction::North.velocity(), (0, -1));
        assert_eq!(Direction::South.velocity(), (0, 1));
        assert_eq!(Direction::East.velocity(), (1, 0));
        assert_eq!(Direction::West.velocity(), (-1, 0));
    }

    #[test]
    fn test_valid_direction_rejects_only_reversal() {
        for current in Direction::ALL {
            let accepted: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&new| is_valid_direction(Some(current), new))
                .collect();

            assert_eq!(accepted.len(), 3);
            assert!(accepted.contains(&current));
            assert!(accepted.iter().all(|new| !current.is_opposite(*new)));
        }
    }

    #[test]
    fn test_valid_direction_without_heading() {
        for new in Direction::ALL {
            assert!(is_valid_direction(None, new));
        }
    }
}

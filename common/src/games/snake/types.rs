use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Maps a keyboard key name to a direction. Accepts arrow names with or
    /// without the `Arrow` prefix and WASD, ignoring case.
    pub fn from_key_name(key: &str) -> Option<Direction> {
        let key = key.trim().to_ascii_lowercase();
        let key = key.strip_prefix("arrow").unwrap_or(&key);
        match key {
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    SelfCollision,
    ObstacleCollision,
    HazardCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost(DeathReason),
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }
}

/// Toroidal grid dimensions. Leaving one edge re-enters from the opposite one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max {
            0
        } else {
            value + 1
        }
    }

    pub fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 {
            max - 1
        } else {
            value - 1
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn next_point(&self, direction: Direction, point: Point) -> Point {
        match direction {
            Direction::Up => Point::new(point.x, Self::wrapping_dec(point.y, self.height)),
            Direction::Down => Point::new(point.x, Self::wrapping_inc(point.y, self.height)),
            Direction::Left => Point::new(Self::wrapping_dec(point.x, self.width), point.y),
            Direction::Right => Point::new(Self::wrapping_inc(point.x, self.width), point.y),
        }
    }

    /// Direction of a single step from `from` to `to`, if they are neighbours
    /// on the wrapped grid.
    pub fn direction_between(&self, from: Point, to: Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.next_point(direction, from) == to)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_point_wraps_every_edge() {
        let field = FieldSize::new(10, 10);
        for y in 0..10 {
            assert_eq!(field.next_point(Direction::Right, Point::new(9, y)), Point::new(0, y));
            assert_eq!(field.next_point(Direction::Left, Point::new(0, y)), Point::new(9, y));
        }
        for x in 0..10 {
            assert_eq!(field.next_point(Direction::Down, Point::new(x, 9)), Point::new(x, 0));
            assert_eq!(field.next_point(Direction::Up, Point::new(x, 0)), Point::new(x, 9));
        }
    }

    #[test]
    fn test_next_point_interior_is_unit_step() {
        let field = FieldSize::new(8, 6);
        let p = Point::new(3, 3);
        assert_eq!(field.next_point(Direction::Up, p), Point::new(3, 2));
        assert_eq!(field.next_point(Direction::Down, p), Point::new(3, 4));
        assert_eq!(field.next_point(Direction::Left, p), Point::new(2, 3));
        assert_eq!(field.next_point(Direction::Right, p), Point::new(4, 3));
    }

    #[test]
    fn test_direction_between_handles_wrap() {
        let field = FieldSize::new(5, 5);
        assert_eq!(
            field.direction_between(Point::new(4, 2), Point::new(0, 2)),
            Some(Direction::Right)
        );
        assert_eq!(
            field.direction_between(Point::new(1, 0), Point::new(1, 4)),
            Some(Direction::Up)
        );
        assert_eq!(field.direction_between(Point::new(1, 1), Point::new(3, 3)), None);
    }

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Up.is_opposite(&Direction::Up));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key_name("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key_name("Down"), Some(Direction::Down));
        assert_eq!(Direction::from_key_name("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key_name("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key_name("Space"), None);
    }
}

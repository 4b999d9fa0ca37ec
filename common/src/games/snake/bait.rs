use crate::games::SessionRng;
use super::types::{FieldSize, Point};

pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaitKind {
    Apple,
    Grape,
    Cherry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bait {
    pub position: Point,
    pub kind: BaitKind,
    pub visible: bool,
}

impl Bait {
    pub fn new(position: Point, kind: BaitKind) -> Self {
        Self {
            position,
            kind,
            visible: true,
        }
    }
}

/// Picks a cell not listed in `occupied`.
///
/// Draws uniformly until a free cell comes up. After `MAX_PLACEMENT_ATTEMPTS`
/// misses it falls back to choosing among the remaining free cells, and fails
/// only when the field is saturated.
pub fn secured_random_point(field: &FieldSize, rng: &mut SessionRng, occupied: &[Point]) -> Result<Point, String> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let point = rng.random_point(field);
        if !occupied.contains(&point) {
            return Ok(point);
        }
    }

    let free: Vec<Point> = field.points().filter(|point| !occupied.contains(point)).collect();
    if free.is_empty() {
        return Err(format!(
            "no free cell left on a {}x{} field",
            field.width, field.height
        ));
    }

    Ok(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_lands_on_occupied_cell() {
        let field = FieldSize::new(10, 10);
        let occupied: Vec<Point> = field.points().filter(|p| (p.x + p.y) % 3 != 0).collect();
        let mut rng = SessionRng::new(11);

        for _ in 0..1000 {
            let point = secured_random_point(&field, &mut rng, &occupied).unwrap();
            assert!(!occupied.contains(&point));
            assert!(field.contains(point));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let field = FieldSize::new(4, 4);
        let free = Point::new(2, 3);
        let occupied: Vec<Point> = field.points().filter(|&p| p != free).collect();
        let mut rng = SessionRng::new(3);

        assert_eq!(secured_random_point(&field, &mut rng, &occupied), Ok(free));
    }

    #[test]
    fn test_saturated_field_is_an_error() {
        let field = FieldSize::new(3, 3);
        let occupied: Vec<Point> = field.points().collect();
        let mut rng = SessionRng::new(5);

        assert!(secured_random_point(&field, &mut rng, &occupied).is_err());
    }
}

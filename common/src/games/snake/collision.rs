use super::types::Point;

/// True when any point of `a` equals any point of `b`.
pub fn any_collision(a: &[Point], b: &[Point]) -> bool {
    a.iter().any(|point| b.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_collision() {
        let a = [Point::new(1, 1), Point::new(2, 2)];
        let b = [Point::new(3, 3), Point::new(2, 2)];
        let c = [Point::new(0, 0)];

        assert!(any_collision(&a, &b));
        assert!(!any_collision(&a, &c));
        assert!(!any_collision(&a, &[]));
    }
}

use super::shapes::SegmentShape;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnPoint {
    pub point: Point,
    pub corner: SegmentShape,
    pub from: Direction,
    pub to: Direction,
}

/// Cells where the head changed direction and the tail has not yet passed.
///
/// Keyed strictly by point: there is never more than one entry per cell, so
/// removal does not depend on the order entries were recorded in.
#[derive(Clone, Debug, Default)]
pub struct TurnLedger {
    entries: Vec<TurnPoint>,
}

impl TurnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: TurnPoint) {
        self.entries.retain(|entry| entry.point != turn.point);
        self.entries.push(turn);
    }

    pub fn contains(&self, point: Point) -> bool {
        self.entries.iter().any(|entry| entry.point == point)
    }

    pub fn get(&self, point: Point) -> Option<&TurnPoint> {
        self.entries.iter().find(|entry| entry.point == point)
    }

    /// Removing a point that is not recorded is a no-op.
    pub fn remove_at(&mut self, point: Point) -> Option<TurnPoint> {
        let index = self.entries.iter().position(|entry| entry.point == point)?;
        Some(self.entries.remove(index))
    }

    pub fn last(&self) -> Option<&TurnPoint> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

use super::shapes::turn_shape;
use super::turn_ledger::{TurnLedger, TurnPoint};
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug)]
pub struct DirectionController {
    current: Direction,
    previous: Option<Direction>,
}

impl DirectionController {
    pub fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            previous: None,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn previous(&self) -> Option<Direction> {
        self.previous
    }

    pub fn reset(&mut self, direction: Direction) {
        *self = Self::new(direction);
    }

    /// Applies a requested direction and records the bend at `head`.
    ///
    /// Rejected when it repeats or reverses the current direction, or when the
    /// head is still on the cell of the last recorded turn.
    pub fn try_set_direction(&mut self, requested: Direction, head: Point, ledger: &mut TurnLedger) -> bool {
        if requested == self.current || requested.is_opposite(&self.current) {
            return false;
        }

        if !is_past_last_turn_point(head, ledger) {
            return false;
        }

        let previous = self.current;
        self.previous = Some(previous);
        self.current = requested;

        ledger.record(TurnPoint {
            point: head,
            corner: turn_shape(Some(previous), requested),
            from: previous,
            to: requested,
        });

        true
    }
}

pub fn is_past_last_turn_point(head: Point, ledger: &TurnLedger) -> bool {
    ledger.last().is_none_or(|turn| turn.point != head)
}

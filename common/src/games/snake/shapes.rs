use super::types::Direction;

/// Visual variant of one snake segment.
///
/// Corners are named by the two cell edges their body joins, so
/// `CornerTopLeft` connects the top edge with the left edge. Tails are named by
/// where the tip points: a snake travelling right ends in `TailLeft`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentShape {
    HeadUp,
    HeadRight,
    HeadDown,
    HeadLeft,
    BodyHorizontal,
    BodyVertical,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    TailUp,
    TailRight,
    TailDown,
    TailLeft,
}

impl SegmentShape {
    pub fn is_head(&self) -> bool {
        matches!(
            self,
            SegmentShape::HeadUp | SegmentShape::HeadRight | SegmentShape::HeadDown | SegmentShape::HeadLeft
        )
    }

    pub fn is_tail(&self) -> bool {
        matches!(
            self,
            SegmentShape::TailUp | SegmentShape::TailRight | SegmentShape::TailDown | SegmentShape::TailLeft
        )
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            SegmentShape::CornerTopLeft
                | SegmentShape::CornerTopRight
                | SegmentShape::CornerBottomLeft
                | SegmentShape::CornerBottomRight
        )
    }

    pub fn is_straight(&self) -> bool {
        matches!(self, SegmentShape::BodyHorizontal | SegmentShape::BodyVertical)
    }
}

/// Corner left behind when the path bends from `previous` to `current`.
///
/// The corner joins the edge the snake entered through (opposite of
/// `previous`) with the edge it leaves through (`current`). Without a previous
/// direction, or for pairs that cannot bend, the straight shape is used.
pub fn turn_shape(previous: Option<Direction>, current: Direction) -> SegmentShape {
    let Some(previous) = previous else {
        return straight_shape(current);
    };

    match (previous, current) {
        (Direction::Right, Direction::Up) | (Direction::Down, Direction::Left) => SegmentShape::CornerTopLeft,
        (Direction::Left, Direction::Up) | (Direction::Down, Direction::Right) => SegmentShape::CornerTopRight,
        (Direction::Right, Direction::Down) | (Direction::Up, Direction::Left) => SegmentShape::CornerBottomLeft,
        (Direction::Left, Direction::Down) | (Direction::Up, Direction::Right) => SegmentShape::CornerBottomRight,
        _ => straight_shape(current),
    }
}

pub fn straight_shape(direction: Direction) -> SegmentShape {
    if direction.is_horizontal() {
        SegmentShape::BodyHorizontal
    } else {
        SegmentShape::BodyVertical
    }
}

/// Tail of a snake whose last segment travels `direction` next; the tip
/// points the other way.
pub fn tail_shape(direction: Direction) -> SegmentShape {
    match direction {
        Direction::Up => SegmentShape::TailDown,
        Direction::Down => SegmentShape::TailUp,
        Direction::Left => SegmentShape::TailRight,
        Direction::Right => SegmentShape::TailLeft,
    }
}

pub fn head_shape(direction: Direction) -> SegmentShape {
    match direction {
        Direction::Up => SegmentShape::HeadUp,
        Direction::Down => SegmentShape::HeadDown,
        Direction::Left => SegmentShape::HeadLeft,
        Direction::Right => SegmentShape::HeadRight,
    }
}

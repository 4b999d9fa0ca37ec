use super::direction::DirectionController;
use super::shapes::{SegmentShape, head_shape, straight_shape, tail_shape, turn_shape};
use super::turn_ledger::TurnLedger;
use super::types::{Direction, FieldSize, Point};

/// One cell of the snake. A segment without a position is a grown
/// placeholder that has not reached the grid yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Option<Point>,
    pub shape: Option<SegmentShape>,
    dormant_moves: usize,
}

impl Segment {
    fn placed(position: Point, shape: SegmentShape) -> Self {
        Self {
            position: Some(position),
            shape: Some(shape),
            dormant_moves: 0,
        }
    }

    fn placeholder(dormant_moves: usize) -> Self {
        Self {
            position: None,
            shape: None,
            dormant_moves,
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    segments: Vec<Segment>,
}

impl Snake {
    /// Straight snake with its head on `head`, body trailing behind opposite
    /// to `direction`.
    pub fn new(head: Point, direction: Direction, length: usize, field: &FieldSize) -> Self {
        let length = length.max(1);
        let mut segments = Vec::with_capacity(length);
        let mut position = head;

        for index in 0..length {
            let shape = if index == 0 {
                head_shape(direction)
            } else if index == length - 1 {
                tail_shape(direction)
            } else {
                straight_shape(direction)
            };
            segments.push(Segment::placed(position, shape));
            position = field.next_point(direction.opposite(), position);
        }

        Self { segments }
    }

    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Result<&Segment, String> {
        self.segments.get(index).ok_or_else(|| {
            format!(
                "invalid segment index {} for snake of length {}",
                index,
                self.segments.len()
            )
        })
    }

    pub fn head(&self) -> Point {
        self.segments
            .first()
            .and_then(|segment| segment.position)
            .expect("Snake head should always be on the field")
    }

    /// Positions of every segment currently on the grid, head first.
    pub fn active_points(&self) -> Vec<Point> {
        self.segments.iter().filter_map(|segment| segment.position).collect()
    }

    /// Positions of the body without the head.
    pub fn body_points(&self) -> Vec<Point> {
        self.segments.iter().skip(1).filter_map(|segment| segment.position).collect()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.segments.iter().any(|segment| segment.position == Some(point))
    }

    /// Appends a placeholder that reaches the grid after `length - 1` moves,
    /// on the cell the head occupies right now.
    pub fn grow(&mut self) {
        let new_length = self.segments.len() + 1;
        self.segments.push(Segment::placeholder(new_length - 1));
    }

    /// Advances the snake by one cell in the controller's current direction.
    ///
    /// The body is shifted first, reading the pre-move snapshot, and the head
    /// last. Segments on a recorded turn keep the corner until the tail
    /// consumes the ledger entry.
    pub fn move_snake(&mut self, controller: &DirectionController, ledger: &mut TurnLedger, field: &FieldSize) {
        let direction = controller.current();
        let snapshot = self.segments.clone();
        let Some(head) = snapshot[0].position else {
            return;
        };
        let next_head = field.next_point(direction, head);

        let activates: Vec<bool> = snapshot
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                i > 0 && !segment.is_active() && segment.dormant_moves <= 1 && snapshot[i - 1].is_active()
            })
            .collect();

        let tail_index = (0..snapshot.len())
            .rev()
            .find(|&i| snapshot[i].is_active() || activates[i])
            .unwrap_or(0);

        for i in (1..snapshot.len()).rev() {
            if !snapshot[i].is_active() && !activates[i] {
                let segment = &mut self.segments[i];
                segment.dormant_moves = segment.dormant_moves.saturating_sub(1);
                continue;
            }

            let Some(position) = snapshot[i - 1].position else {
                continue;
            };

            let shape = if i == tail_index {
                let ahead = if i >= 2 { snapshot[i - 2].position } else { Some(next_head) };
                resolve_tail(&snapshot[i], position, ahead, direction, ledger, field)
            } else if let Some(turn) = ledger.get(position)
                && i != 1
            {
                turn.corner
            } else if i == 1 {
                turn_shape(controller.previous(), direction)
            } else {
                match snapshot[i - 1].shape {
                    Some(shape) => shape,
                    None => straight_shape(direction),
                }
            };

            self.segments[i] = Segment::placed(position, shape);
        }

        if tail_index > 1
            && let Some(neck) = self.segments[1].position
            && !ledger.contains(neck)
        {
            self.segments[1].shape = Some(straight_shape(direction));
        }

        self.segments[0] = Segment::placed(next_head, head_shape(direction));
    }
}

fn resolve_tail(
    previous: &Segment,
    position: Point,
    ahead: Option<Point>,
    direction: Direction,
    ledger: &mut TurnLedger,
    field: &FieldSize,
) -> SegmentShape {
    if let Some(turn) = ledger.remove_at(position) {
        return tail_shape(turn.to);
    }

    if let Some(shape) = previous.shape
        && previous.is_active()
        && shape.is_tail()
    {
        return shape;
    }

    // freshly placed tail: face the cell its predecessor moves into
    ahead
        .and_then(|ahead| field.direction_between(position, ahead))
        .map(tail_shape)
        .unwrap_or_else(|| tail_shape(direction))
}

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::bait::{Bait, BaitKind, secured_random_point};
use super::snake::Snake;
use super::types::{Direction, FieldSize, Point};

pub const START_LENGTH: usize = 3;
pub const START_DIRECTION: Direction = Direction::Right;
pub const MAX_HAZARDS: usize = 5;
pub const GRAPE_BOOST_TICKS: u32 = 30;

const START_COLUMN: usize = 4;
const START_LANE_END: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    OpenField,
    Fenced,
    Corridors,
    Checkerboard,
    Gates,
}

impl LevelId {
    pub const ALL: [LevelId; 5] = [
        LevelId::OpenField,
        LevelId::Fenced,
        LevelId::Corridors,
        LevelId::Checkerboard,
        LevelId::Gates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LevelId::OpenField => "Open Field",
            LevelId::Fenced => "Fenced",
            LevelId::Corridors => "Corridors",
            LevelId::Checkerboard => "Checkerboard",
            LevelId::Gates => "Gates",
        }
    }

    /// Parses a level from a name such as `open-field`, `Gates` or `2`
    /// (1-based position in the catalogue).
    pub fn from_name(name: &str) -> Option<LevelId> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if let Ok(index) = normalized.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }

        Self::ALL.into_iter().find(|level| {
            level
                .name()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
                == normalized
        })
    }

    pub fn plan(self) -> LevelPlan {
        match self {
            LevelId::OpenField => LevelPlan {
                id: self,
                obstacles: no_obstacles,
                first_bait: BaitKind::Apple,
                bait_cadence: no_extra_bait,
                on_bait_eaten: respawn_same_kind,
                win: WinCondition { kind: BaitKind::Apple, count: 15 },
                blink: None,
            },
            LevelId::Fenced => LevelPlan {
                id: self,
                obstacles: border_ring,
                first_bait: BaitKind::Apple,
                bait_cadence: grape_every_fifth_apple,
                on_bait_eaten: grape_boost,
                win: WinCondition { kind: BaitKind::Grape, count: 3 },
                blink: None,
            },
            LevelId::Corridors => LevelPlan {
                id: self,
                obstacles: corridor_walls,
                first_bait: BaitKind::Apple,
                bait_cadence: grape_every_fourth_apple,
                on_bait_eaten: cherry_orchard,
                win: WinCondition { kind: BaitKind::Apple, count: 20 },
                blink: None,
            },
            LevelId::Checkerboard => LevelPlan {
                id: self,
                obstacles: checkerboard_pillars,
                first_bait: BaitKind::Apple,
                bait_cadence: no_extra_bait,
                on_bait_eaten: respawn_same_kind,
                win: WinCondition { kind: BaitKind::Apple, count: 15 },
                blink: Some(BlinkSchedule {
                    visible_ticks: 40,
                    hidden_ticks: 12,
                }),
            },
            LevelId::Gates => LevelPlan {
                id: self,
                obstacles: gated_walls,
                first_bait: BaitKind::Apple,
                bait_cadence: grape_every_fifth_apple,
                on_bait_eaten: grape_boost,
                win: WinCondition { kind: BaitKind::Apple, count: 25 },
                blink: None,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinCondition {
    pub kind: BaitKind,
    pub count: u32,
}

/// Food is shown for `visible_ticks`, then hidden for `hidden_ticks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkSchedule {
    pub visible_ticks: u32,
    pub hidden_ticks: u32,
}

impl BlinkSchedule {
    pub fn is_visible(&self, tick: u64) -> bool {
        let period = (self.visible_ticks + self.hidden_ticks) as u64;
        period == 0 || tick % period < self.visible_ticks as u64
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BaitEatenContext {
    pub kind: BaitKind,
    pub apples_eaten: u32,
    pub hazard_count: usize,
}

/// What the game state should change after a bait was eaten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaitEatenDelta {
    pub respawn: Option<BaitKind>,
    pub spawn: Vec<BaitKind>,
    pub spawn_hazards: usize,
    pub clear_hazards: bool,
    pub speed_boost_ticks: Option<u32>,
}

pub struct LevelLayout {
    pub snake: Snake,
    pub direction: Direction,
    pub baits: Vec<Bait>,
    pub obstacles: Vec<Point>,
}

#[derive(Clone, Copy, Debug)]
pub struct LevelPlan {
    pub id: LevelId,
    pub obstacles: fn(&FieldSize) -> Vec<Point>,
    pub first_bait: BaitKind,
    pub bait_cadence: fn(u32) -> Option<BaitKind>,
    pub on_bait_eaten: fn(&LevelPlan, &BaitEatenContext) -> BaitEatenDelta,
    pub win: WinCondition,
    pub blink: Option<BlinkSchedule>,
}

impl LevelPlan {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn create_layout(&self, field: &FieldSize, rng: &mut SessionRng) -> Result<LevelLayout, String> {
        let start = start_point(field);
        let snake = Snake::new(start, START_DIRECTION, START_LENGTH, field);

        let lane = start_lane(field);
        let mut obstacles: Vec<Point> = Vec::new();
        for point in (self.obstacles)(field) {
            if field.contains(point) && !lane.contains(&point) && !obstacles.contains(&point) {
                obstacles.push(point);
            }
        }

        let mut occupied = snake.active_points();
        occupied.extend(obstacles.iter().copied());
        let position = secured_random_point(field, rng, &occupied)?;

        Ok(LevelLayout {
            snake,
            direction: START_DIRECTION,
            baits: vec![Bait::new(position, self.first_bait)],
            obstacles,
        })
    }

    pub fn on_bait_eaten(&self, context: &BaitEatenContext) -> BaitEatenDelta {
        (self.on_bait_eaten)(self, context)
    }
}

pub fn start_point(field: &FieldSize) -> Point {
    Point::new(START_COLUMN.min(field.width - 1), field.height / 2)
}

/// Cells kept free of obstacles so the snake never spawns into a wall.
pub fn start_lane(field: &FieldSize) -> Vec<Point> {
    let row = field.height / 2;
    (1..=START_LANE_END.min(field.width - 1))
        .map(|x| Point::new(x, row))
        .collect()
}

pub fn no_obstacles(_field: &FieldSize) -> Vec<Point> {
    Vec::new()
}

pub fn border_ring(field: &FieldSize) -> Vec<Point> {
    field
        .points()
        .filter(|p| p.x == 0 || p.y == 0 || p.x == field.width - 1 || p.y == field.height - 1)
        .collect()
}

/// Border plus two horizontal walls splitting the field into corridors.
pub fn corridor_walls(field: &FieldSize) -> Vec<Point> {
    let mut walls = border_ring(field);
    for row in [field.height / 3, field.height * 2 / 3] {
        for x in 4..field.width.saturating_sub(4) {
            walls.push(Point::new(x, row));
        }
    }
    walls
}

pub fn checkerboard_pillars(field: &FieldSize) -> Vec<Point> {
    field.points().filter(|p| p.x % 4 == 2 && p.y % 4 == 2).collect()
}

/// Border with a gate in the middle of every side, and a vertical wall
/// through the centre with a gap on the starting row.
pub fn gated_walls(field: &FieldSize) -> Vec<Point> {
    let mid_x = field.width / 2;
    let mid_y = field.height / 2;

    let mut walls: Vec<Point> = border_ring(field)
        .into_iter()
        .filter(|p| {
            let on_horizontal_gate = (p.y == 0 || p.y == field.height - 1) && p.x.abs_diff(mid_x) <= 1;
            let on_vertical_gate = (p.x == 0 || p.x == field.width - 1) && p.y.abs_diff(mid_y) <= 1;
            !on_horizontal_gate && !on_vertical_gate
        })
        .collect();

    for y in 3..field.height.saturating_sub(3) {
        if y.abs_diff(mid_y) > 1 {
            walls.push(Point::new(mid_x, y));
        }
    }
    walls
}

pub fn no_extra_bait(_apples_eaten: u32) -> Option<BaitKind> {
    None
}

pub fn grape_every_fifth_apple(apples_eaten: u32) -> Option<BaitKind> {
    (apples_eaten > 0 && apples_eaten % 5 == 0).then_some(BaitKind::Grape)
}

pub fn grape_every_fourth_apple(apples_eaten: u32) -> Option<BaitKind> {
    (apples_eaten > 0 && apples_eaten % 4 == 0).then_some(BaitKind::Grape)
}

pub fn respawn_same_kind(_plan: &LevelPlan, context: &BaitEatenContext) -> BaitEatenDelta {
    BaitEatenDelta {
        respawn: Some(context.kind),
        ..Default::default()
    }
}

/// Apples come back and follow the plan's cadence; a grape is not replaced
/// and speeds the snake up for a while.
pub fn grape_boost(plan: &LevelPlan, context: &BaitEatenContext) -> BaitEatenDelta {
    match context.kind {
        BaitKind::Grape => BaitEatenDelta {
            speed_boost_ticks: Some(GRAPE_BOOST_TICKS),
            ..Default::default()
        },
        kind => BaitEatenDelta {
            respawn: Some(kind),
            spawn: (plan.bait_cadence)(context.apples_eaten).into_iter().collect(),
            ..Default::default()
        },
    }
}

/// Every apple leaves a cherry behind, up to `MAX_HAZARDS`; a grape clears
/// them all.
pub fn cherry_orchard(plan: &LevelPlan, context: &BaitEatenContext) -> BaitEatenDelta {
    match context.kind {
        BaitKind::Grape => BaitEatenDelta {
            clear_hazards: true,
            ..Default::default()
        },
        kind => BaitEatenDelta {
            respawn: Some(kind),
            spawn: (plan.bait_cadence)(context.apples_eaten).into_iter().collect(),
            spawn_hazards: usize::from(context.hazard_count < MAX_HAZARDS),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_context(apples_eaten: u32, hazard_count: usize) -> BaitEatenContext {
        BaitEatenContext {
            kind: BaitKind::Apple,
            apples_eaten,
            hazard_count,
        }
    }

    #[test]
    fn test_layouts_keep_start_lane_clear() {
        let field = FieldSize::new(30, 30);
        for level in LevelId::ALL {
            let mut rng = SessionRng::new(99);
            let layout = level.plan().create_layout(&field, &mut rng).unwrap();
            let snake_points = layout.snake.active_points();

            for point in start_lane(&field) {
                assert!(!layout.obstacles.contains(&point), "{:?} blocks {}", level, point);
            }
            for bait in &layout.baits {
                assert!(!snake_points.contains(&bait.position));
                assert!(!layout.obstacles.contains(&bait.position));
            }
            assert_eq!(layout.snake.head(), Point::new(4, 15));
            assert_eq!(layout.direction, Direction::Right);
        }
    }

    #[test]
    fn test_border_ring_surrounds_field() {
        let field = FieldSize::new(12, 14);
        let ring = border_ring(&field);
        assert_eq!(ring.len(), 2 * 12 + 2 * 14 - 4);
        assert!(ring.contains(&Point::new(0, 0)));
        assert!(ring.contains(&Point::new(11, 13)));
        assert!(!ring.contains(&Point::new(5, 5)));
    }

    #[test]
    fn test_gated_walls_leave_gates_open() {
        let field = FieldSize::new(20, 20);
        let walls = gated_walls(&field);
        assert!(!walls.contains(&Point::new(10, 0)));
        assert!(!walls.contains(&Point::new(0, 10)));
        assert!(!walls.contains(&Point::new(10, 10)));
        assert!(walls.contains(&Point::new(10, 5)));
        assert!(walls.contains(&Point::new(0, 0)));
    }

    #[test]
    fn test_checkerboard_spacing() {
        let field = FieldSize::new(12, 12);
        let pillars = checkerboard_pillars(&field);
        assert_eq!(pillars.len(), 9);
        assert!(pillars.contains(&Point::new(6, 10)));
    }

    #[test]
    fn test_grape_cadence() {
        let plan = LevelId::Fenced.plan();
        assert!(plan.on_bait_eaten(&apple_context(4, 0)).spawn.is_empty());
        let fifth = plan.on_bait_eaten(&apple_context(5, 0));
        assert_eq!(fifth.respawn, Some(BaitKind::Apple));
        assert_eq!(fifth.spawn, vec![BaitKind::Grape]);

        let grape = plan.on_bait_eaten(&BaitEatenContext {
            kind: BaitKind::Grape,
            apples_eaten: 5,
            hazard_count: 0,
        });
        assert_eq!(grape.respawn, None);
        assert_eq!(grape.speed_boost_ticks, Some(GRAPE_BOOST_TICKS));
    }

    #[test]
    fn test_gates_share_fenced_callback() {
        let fenced = LevelId::Fenced.plan();
        let gates = LevelId::Gates.plan();
        assert!(std::ptr::fn_addr_eq(fenced.on_bait_eaten, gates.on_bait_eaten));
    }

    #[test]
    fn test_cherries_capped_and_cleared() {
        let plan = LevelId::Corridors.plan();
        assert_eq!(plan.on_bait_eaten(&apple_context(1, 0)).spawn_hazards, 1);
        assert_eq!(plan.on_bait_eaten(&apple_context(6, MAX_HAZARDS)).spawn_hazards, 0);

        let grape = plan.on_bait_eaten(&BaitEatenContext {
            kind: BaitKind::Grape,
            apples_eaten: 4,
            hazard_count: 3,
        });
        assert!(grape.clear_hazards);
    }

    #[test]
    fn test_blink_schedule() {
        let blink = BlinkSchedule {
            visible_ticks: 3,
            hidden_ticks: 2,
        };
        let pattern: Vec<bool> = (0..6).map(|t| blink.is_visible(t)).collect();
        assert_eq!(pattern, vec![true, true, true, false, false, true]);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LevelId::from_name("open-field"), Some(LevelId::OpenField));
        assert_eq!(LevelId::from_name("GATES"), Some(LevelId::Gates));
        assert_eq!(LevelId::from_name("3"), Some(LevelId::Corridors));
        assert_eq!(LevelId::from_name("0"), None);
        assert_eq!(LevelId::from_name("maze"), None);
    }
}

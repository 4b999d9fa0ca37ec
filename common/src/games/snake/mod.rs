mod bait;
mod collision;
mod direction;
mod game_state;
mod levels;
mod render;
mod session;
mod settings;
mod shapes;
mod snake;
mod turn_ledger;
mod types;

pub use bait::{Bait, BaitKind, MAX_PLACEMENT_ATTEMPTS, secured_random_point};
pub use collision::any_collision;
pub use direction::{DirectionController, is_past_last_turn_point};
pub use game_state::{SnakeGameState, TickOutcome};
pub use levels::{
    BaitEatenContext, BaitEatenDelta, BlinkSchedule, GRAPE_BOOST_TICKS, LevelId, LevelLayout, LevelPlan,
    MAX_HAZARDS, START_DIRECTION, START_LENGTH, WinCondition,
};
pub use render::{
    DrawRect, FrameSink, GameSummary, Renderer, Scene, SpriteId, SpriteResolver, TileSize, draw_scene,
};
pub use session::SnakeSession;
pub use settings::SnakeSessionSettings;
pub use shapes::{SegmentShape, head_shape, straight_shape, tail_shape, turn_shape};
pub use snake::{Segment, Snake};
pub use turn_ledger::{TurnLedger, TurnPoint};
pub use types::{DeathReason, Direction, FieldSize, GameStatus, Point};

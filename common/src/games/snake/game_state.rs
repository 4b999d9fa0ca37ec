use std::collections::HashMap;
use std::time::Duration;

use crate::log;
use crate::games::SessionRng;
use super::bait::{Bait, BaitKind, secured_random_point};
use super::collision::any_collision;
use super::direction::DirectionController;
use super::levels::{BaitEatenContext, BaitEatenDelta, LevelPlan};
use super::render::{GameSummary, Scene};
use super::settings::SnakeSessionSettings;
use super::snake::Snake;
use super::turn_ledger::TurnLedger;
use super::types::{DeathReason, Direction, FieldSize, GameStatus, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub eaten: Option<BaitKind>,
    pub status: GameStatus,
}

/// All mutable state of one level being played.
///
/// Built fresh for every level start, so the turn ledger and the direction
/// controller never carry over between games.
pub struct SnakeGameState {
    plan: LevelPlan,
    settings: SnakeSessionSettings,
    snake: Snake,
    controller: DirectionController,
    ledger: TurnLedger,
    baits: Vec<Bait>,
    hazards: Vec<Bait>,
    obstacles: Vec<Point>,
    eaten: HashMap<BaitKind, u32>,
    score: u32,
    tick: u64,
    boost_ticks_left: u32,
    status: GameStatus,
}

impl SnakeGameState {
    pub fn new(plan: LevelPlan, settings: SnakeSessionSettings, rng: &mut SessionRng) -> Result<Self, String> {
        let layout = plan.create_layout(&settings.field_size, rng)?;

        log!(
            "Level '{}' started on {}x{} field (seed {})",
            plan.name(),
            settings.field_size.width,
            settings.field_size.height,
            rng.seed()
        );

        Ok(Self {
            plan,
            settings,
            snake: layout.snake,
            controller: DirectionController::new(layout.direction),
            ledger: TurnLedger::new(),
            baits: layout.baits,
            hazards: Vec::new(),
            obstacles: layout.obstacles,
            eaten: HashMap::new(),
            score: 0,
            tick: 0,
            boost_ticks_left: 0,
            status: GameStatus::Running,
        })
    }

    pub fn plan(&self) -> &LevelPlan {
        &self.plan
    }

    pub fn settings(&self) -> &SnakeSessionSettings {
        &self.settings
    }

    pub fn field_size(&self) -> &FieldSize {
        &self.settings.field_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn controller(&self) -> &DirectionController {
        &self.controller
    }

    pub fn ledger(&self) -> &TurnLedger {
        &self.ledger
    }

    pub fn baits(&self) -> &[Bait] {
        &self.baits
    }

    pub fn hazards(&self) -> &[Bait] {
        &self.hazards
    }

    pub fn obstacles(&self) -> &[Point] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn eaten(&self, kind: BaitKind) -> u32 {
        self.eaten.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_ticks_left > 0
    }

    pub fn current_tick_interval(&self) -> Duration {
        if self.is_boosted() {
            self.settings.boosted_tick_interval()
        } else {
            self.settings.tick_interval
        }
    }

    /// Input is applied as soon as it arrives; only the last accepted turn
    /// before a tick shapes that tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status.is_finished() {
            return false;
        }
        self.controller
            .try_set_direction(direction, self.snake.head(), &mut self.ledger)
    }

    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if self.status.is_finished() {
            return TickOutcome {
                eaten: None,
                status: self.status,
            };
        }

        self.tick += 1;
        self.boost_ticks_left = self.boost_ticks_left.saturating_sub(1);

        self.snake
            .move_snake(&self.controller, &mut self.ledger, &self.settings.field_size);

        let head = self.snake.head();
        if let Some(reason) = self.detect_death(head) {
            self.finish(GameStatus::Lost(reason));
            return TickOutcome {
                eaten: None,
                status: self.status,
            };
        }

        let eaten = self.try_eat(head, rng);
        self.update_bait_visibility();

        TickOutcome {
            eaten,
            status: self.status,
        }
    }

    pub fn scene(&self) -> Scene {
        Scene {
            level: self.plan.id,
            field_size: self.settings.field_size,
            segments: self
                .snake
                .segments()
                .iter()
                .filter_map(|segment| segment.position.zip(segment.shape))
                .collect(),
            baits: self.baits.iter().chain(self.hazards.iter()).copied().collect(),
            obstacles: self.obstacles.clone(),
            score: self.score,
            length: self.snake.length(),
            status: self.status,
            tick: self.tick,
        }
    }

    pub fn summary(&self, abandoned: bool) -> GameSummary {
        GameSummary {
            level: self.plan.id,
            status: self.status,
            score: self.score,
            length: self.snake.length(),
            ticks: self.tick,
            abandoned,
        }
    }

    fn detect_death(&self, head: Point) -> Option<DeathReason> {
        let head = [head];
        if any_collision(&head, &self.obstacles) {
            Some(DeathReason::ObstacleCollision)
        } else if any_collision(&head, &self.snake.body_points()) {
            Some(DeathReason::SelfCollision)
        } else if any_collision(&head, &self.hazard_points()) {
            Some(DeathReason::HazardCollision)
        } else {
            None
        }
    }

    fn try_eat(&mut self, head: Point, rng: &mut SessionRng) -> Option<BaitKind> {
        let index = self
            .baits
            .iter()
            .position(|bait| bait.visible && bait.position == head)?;
        let bait = self.baits.remove(index);

        self.snake.grow();
        self.score += bait_points(bait.kind);
        *self.eaten.entry(bait.kind).or_insert(0) += 1;

        log!(
            "Ate {:?} at {} (score {}, length {})",
            bait.kind,
            bait.position,
            self.score,
            self.snake.length()
        );

        let context = BaitEatenContext {
            kind: bait.kind,
            apples_eaten: self.eaten(BaitKind::Apple),
            hazard_count: self.hazards.len(),
        };
        let delta = self.plan.on_bait_eaten(&context);
        self.apply_delta(delta, rng);

        if self.eaten(self.plan.win.kind) >= self.plan.win.count {
            self.finish(GameStatus::Won);
        }

        Some(bait.kind)
    }

    fn apply_delta(&mut self, delta: BaitEatenDelta, rng: &mut SessionRng) {
        if let Some(ticks) = delta.speed_boost_ticks {
            self.boost_ticks_left = ticks;
            log!("Speed boost for {} ticks", ticks);
        }

        if delta.clear_hazards && !self.hazards.is_empty() {
            log!("Cleared {} hazards", self.hazards.len());
            self.hazards.clear();
        }

        for kind in delta.respawn.into_iter().chain(delta.spawn) {
            if let Some(position) = self.free_cell(rng) {
                self.baits.push(Bait::new(position, kind));
            }
        }

        for _ in 0..delta.spawn_hazards {
            if let Some(position) = self.free_cell(rng) {
                self.hazards.push(Bait::new(position, BaitKind::Cherry));
                log!("Cherry hazard placed at {}", position);
            }
        }
    }

    fn free_cell(&self, rng: &mut SessionRng) -> Option<Point> {
        let mut occupied = self.snake.active_points();
        occupied.extend(self.obstacles.iter().copied());
        occupied.extend(self.baits.iter().map(|bait| bait.position));
        occupied.extend(self.hazard_points());

        match secured_random_point(&self.settings.field_size, rng, &occupied) {
            Ok(point) => Some(point),
            Err(e) => {
                log!("Could not place item: {}", e);
                None
            }
        }
    }

    fn update_bait_visibility(&mut self) {
        let Some(blink) = self.plan.blink else {
            return;
        };
        let visible = blink.is_visible(self.tick);
        for bait in &mut self.baits {
            bait.visible = visible;
        }
    }

    fn hazard_points(&self) -> Vec<Point> {
        self.hazards.iter().map(|hazard| hazard.position).collect()
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        match status {
            GameStatus::Won => log!(
                "Level '{}' won with score {} after {} ticks",
                self.plan.name(),
                self.score,
                self.tick
            ),
            GameStatus::Lost(reason) => log!(
                "Level '{}' lost ({:?}) with score {} after {} ticks",
                self.plan.name(),
                reason,
                self.score,
                self.tick
            ),
            GameStatus::Running => {}
        }
    }

    #[cfg(test)]
    fn set_baits(&mut self, baits: Vec<Bait>) {
        self.baits = baits;
    }

    #[cfg(test)]
    fn set_obstacles(&mut self, obstacles: Vec<Point>) {
        self.obstacles = obstacles;
    }

    #[cfg(test)]
    fn set_hazards(&mut self, hazards: Vec<Bait>) {
        self.hazards = hazards;
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: Snake, direction: Direction) {
        self.snake = snake;
        self.controller.reset(direction);
        self.ledger.clear();
    }
}

fn bait_points(kind: BaitKind) -> u32 {
    match kind {
        BaitKind::Apple => 1,
        BaitKind::Grape => 5,
        BaitKind::Cherry => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::levels::{GRAPE_BOOST_TICKS, LevelId, WinCondition};

    fn create_state(plan: LevelPlan) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(plan, SnakeSessionSettings::default(), &mut rng).unwrap();
        (state, rng)
    }

    fn ahead_of_head(state: &SnakeGameState) -> Point {
        state
            .field_size()
            .next_point(state.controller().current(), state.snake().head())
    }

    #[test]
    fn test_tick_moves_snake() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        state.set_baits(vec![]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.status, GameStatus::Running);
        assert_eq!(state.snake().head(), Point::new(5, 15));
        assert_eq!(state.ticks(), 1);
    }

    #[test]
    fn test_eating_grows_scores_and_relocates() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.eaten, Some(BaitKind::Apple));
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().length(), 4);
        assert_eq!(state.baits().len(), 1);
        assert!(!state.snake().occupies(state.baits()[0].position));
        assert_eq!(state.scene().segments.len(), 3);
    }

    #[test]
    fn test_relocated_bait_never_occupied() {
        for seed in 0..1000 {
            let mut rng = SessionRng::new(seed);
            let mut state =
                SnakeGameState::new(LevelId::Corridors.plan(), SnakeSessionSettings::default(), &mut rng).unwrap();
            let target = ahead_of_head(&state);
            state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);

            state.tick(&mut rng);
            let relocated = state.baits()[0].position;
            assert!(!state.snake().occupies(relocated), "seed {}", seed);
            assert!(!state.obstacles().contains(&relocated), "seed {}", seed);
            assert!(!state.hazards().iter().any(|h| h.position == relocated), "seed {}", seed);
        }
    }

    #[test]
    fn test_self_collision_ends_game_and_halts() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        state.set_baits(vec![]);
        let field = *state.field_size();
        state.set_snake(Snake::new(Point::new(5, 5), Direction::Right, 5, &field), Direction::Right);

        assert!(state.request_direction(Direction::Down));
        assert_eq!(state.tick(&mut rng).status, GameStatus::Running);
        assert!(state.request_direction(Direction::Left));
        assert_eq!(state.tick(&mut rng).status, GameStatus::Running);
        assert!(state.request_direction(Direction::Up));

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.status, GameStatus::Lost(DeathReason::SelfCollision));

        let head = state.snake().head();
        state.tick(&mut rng);
        assert_eq!(state.ticks(), 3);
        assert_eq!(state.snake().head(), head);
        assert!(!state.request_direction(Direction::Right));
    }

    #[test]
    fn test_obstacle_collision_on_border() {
        let (mut state, mut rng) = create_state(LevelId::Fenced.plan());
        state.set_baits(vec![]);

        for _ in 0..24 {
            assert_eq!(state.tick(&mut rng).status, GameStatus::Running);
        }
        assert_eq!(
            state.tick(&mut rng).status,
            GameStatus::Lost(DeathReason::ObstacleCollision)
        );
        assert_eq!(state.snake().head(), Point::new(29, 15));
    }

    #[test]
    fn test_obstacle_wins_over_bait_on_same_cell() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);
        state.set_obstacles(vec![target]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.eaten, None);
        assert_eq!(outcome.status, GameStatus::Lost(DeathReason::ObstacleCollision));
    }

    #[test]
    fn test_hazard_collision() {
        let (mut state, mut rng) = create_state(LevelId::Corridors.plan());
        state.set_baits(vec![]);
        let target = ahead_of_head(&state);
        state.set_hazards(vec![Bait::new(target, BaitKind::Cherry)]);

        assert_eq!(
            state.tick(&mut rng).status,
            GameStatus::Lost(DeathReason::HazardCollision)
        );
    }

    #[test]
    fn test_apple_in_corridors_adds_cherry() {
        let (mut state, mut rng) = create_state(LevelId::Corridors.plan());
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);

        state.tick(&mut rng);
        assert_eq!(state.hazards().len(), 1);
        assert_eq!(state.scene().baits.len(), 2);
    }

    #[test]
    fn test_grape_clears_hazards_in_corridors() {
        let (mut state, mut rng) = create_state(LevelId::Corridors.plan());
        state.set_hazards(vec![
            Bait::new(Point::new(20, 3), BaitKind::Cherry),
            Bait::new(Point::new(22, 3), BaitKind::Cherry),
        ]);
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Grape)]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.eaten, Some(BaitKind::Grape));
        assert_eq!(outcome.status, GameStatus::Running);
        assert!(state.hazards().is_empty());
        assert!(state.scene().baits.iter().all(|bait| bait.kind != BaitKind::Cherry));
    }

    #[test]
    fn test_saturated_field_withdraws_bait() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        let target = ahead_of_head(&state);
        let field = *state.field_size();
        state.set_obstacles(field.points().filter(|point| *point != target).collect());
        state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.eaten, Some(BaitKind::Apple));
        assert_eq!(outcome.status, GameStatus::Running);
        assert_eq!(state.status(), GameStatus::Running);
        assert!(state.baits().is_empty());
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_grape_boosts_speed() {
        let (mut state, mut rng) = create_state(LevelId::Fenced.plan());
        let base = state.current_tick_interval();
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Grape)]);

        let outcome = state.tick(&mut rng);
        assert_eq!(outcome.eaten, Some(BaitKind::Grape));
        assert!(state.is_boosted());
        assert_eq!(state.current_tick_interval(), base / 2);
        assert!(state.baits().is_empty());
        assert_eq!(state.score(), 5);

        state.set_obstacles(vec![]);
        for _ in 0..GRAPE_BOOST_TICKS {
            state.tick(&mut rng);
        }
        assert!(!state.is_boosted());
        assert_eq!(state.current_tick_interval(), base);
    }

    #[test]
    fn test_win_condition() {
        let plan = LevelPlan {
            win: WinCondition {
                kind: BaitKind::Apple,
                count: 1,
            },
            ..LevelId::OpenField.plan()
        };
        let (mut state, mut rng) = create_state(plan);
        let target = ahead_of_head(&state);
        state.set_baits(vec![Bait::new(target, BaitKind::Apple)]);

        assert_eq!(state.tick(&mut rng).status, GameStatus::Won);
        assert!(state.summary(false).status.is_finished());
    }

    #[test]
    fn test_hidden_bait_is_not_eaten() {
        let (mut state, mut rng) = create_state(LevelId::OpenField.plan());
        let target = ahead_of_head(&state);
        let mut bait = Bait::new(target, BaitKind::Apple);
        bait.visible = false;
        state.set_baits(vec![bait]);

        assert_eq!(state.tick(&mut rng).eaten, None);
        assert_eq!(state.snake().length(), 3);
    }

    #[test]
    fn test_checkerboard_bait_blinks() {
        let (mut state, mut rng) = create_state(LevelId::Checkerboard.plan());
        state.set_baits(vec![Bait::new(Point::new(20, 3), BaitKind::Apple)]);

        for _ in 0..39 {
            state.tick(&mut rng);
        }
        assert!(state.baits()[0].visible);
        state.tick(&mut rng);
        assert!(!state.baits()[0].visible);
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn test_reverse_request_rejected() {
        let (mut state, _) = create_state(LevelId::OpenField.plan());
        assert!(!state.request_direction(Direction::Left));
        assert!(state.request_direction(Direction::Up));
        assert!(!state.request_direction(Direction::Left));
        assert_eq!(state.ledger().len(), 1);
    }
}

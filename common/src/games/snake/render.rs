use std::future::Future;

use super::bait::{Bait, BaitKind};
use super::levels::LevelId;
use super::shapes::SegmentShape;
use super::types::{FieldSize, GameStatus, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Segment(SegmentShape),
    Bait(BaitKind),
    Brick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub fn rect_for(&self, point: Point) -> DrawRect {
        DrawRect {
            x: (point.x as u32 * self.width) as f32,
            y: (point.y as u32 * self.height) as f32,
            width: self.width as f32,
            height: self.height as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Turns a sprite identifier into whatever the front-end draws with.
pub trait SpriteResolver {
    type Handle;

    fn resolve(&self, sprite: SpriteId) -> Self::Handle;
}

pub trait Renderer<H> {
    fn draw(&mut self, handle: &H, rect: DrawRect);
}

/// Snapshot of everything drawable at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub level: LevelId,
    pub field_size: FieldSize,
    pub segments: Vec<(Point, SegmentShape)>,
    pub baits: Vec<Bait>,
    pub obstacles: Vec<Point>,
    pub score: u32,
    pub length: usize,
    pub status: GameStatus,
    pub tick: u64,
}

/// Outcome handed to the front-end when a session stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub level: LevelId,
    pub status: GameStatus,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub abandoned: bool,
}

pub trait FrameSink: Send + Sync + Clone + 'static {
    fn present(&self, scene: Scene) -> impl Future<Output = ()> + Send;

    fn finish(&self, summary: GameSummary) -> impl Future<Output = ()> + Send;
}

/// Draws bricks, visible baits and the snake, tail first so the head ends up
/// on top.
pub fn draw_scene<R, D>(scene: &Scene, tile: TileSize, resolver: &R, renderer: &mut D)
where
    R: SpriteResolver,
    D: Renderer<R::Handle>,
{
    for &obstacle in &scene.obstacles {
        renderer.draw(&resolver.resolve(SpriteId::Brick), tile.rect_for(obstacle));
    }

    for bait in scene.baits.iter().filter(|bait| bait.visible) {
        renderer.draw(&resolver.resolve(SpriteId::Bait(bait.kind)), tile.rect_for(bait.position));
    }

    for &(point, shape) in scene.segments.iter().rev() {
        renderer.draw(&resolver.resolve(SpriteId::Segment(shape)), tile.rect_for(point));
    }
}

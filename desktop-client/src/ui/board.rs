use eframe::egui;
use snake_common::games::snake::{
    BaitKind, Direction, DrawRect, Renderer, Scene, SegmentShape, SpriteId, SpriteResolver, TileSize, draw_scene,
};

/// How a sprite is painted; every sprite is built from filled primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glyph {
    Head(Direction),
    /// Tip of the tail points this way.
    Tail(Direction),
    Body([Direction; 2]),
    Fruit,
    Brick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub glyph: Glyph,
    pub color: egui::Color32,
}

pub struct Palette {
    head: egui::Color32,
    body: egui::Color32,
    apple: egui::Color32,
    grape: egui::Color32,
    cherry: egui::Color32,
    brick: egui::Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            head: egui::Color32::from_rgb(0x2E, 0x7D, 0x32),
            body: egui::Color32::from_rgb(0x43, 0xA0, 0x47),
            apple: egui::Color32::from_rgb(0xE5, 0x39, 0x35),
            grape: egui::Color32::from_rgb(0x7B, 0x1F, 0xA2),
            cherry: egui::Color32::from_rgb(0x5D, 0x0A, 0x16),
            brick: egui::Color32::from_rgb(0x8D, 0x4B, 0x2A),
        }
    }
}

impl SpriteResolver for Palette {
    type Handle = Sprite;

    fn resolve(&self, sprite: SpriteId) -> Sprite {
        match sprite {
            SpriteId::Segment(shape) => Sprite {
                glyph: segment_glyph(shape),
                color: if shape.is_head() { self.head } else { self.body },
            },
            SpriteId::Bait(kind) => Sprite {
                glyph: Glyph::Fruit,
                color: match kind {
                    BaitKind::Apple => self.apple,
                    BaitKind::Grape => self.grape,
                    BaitKind::Cherry => self.cherry,
                },
            },
            SpriteId::Brick => Sprite {
                glyph: Glyph::Brick,
                color: self.brick,
            },
        }
    }
}

fn segment_glyph(shape: SegmentShape) -> Glyph {
    match shape {
        SegmentShape::HeadUp => Glyph::Head(Direction::Up),
        SegmentShape::HeadRight => Glyph::Head(Direction::Right),
        SegmentShape::HeadDown => Glyph::Head(Direction::Down),
        SegmentShape::HeadLeft => Glyph::Head(Direction::Left),
        SegmentShape::TailUp => Glyph::Tail(Direction::Up),
        SegmentShape::TailRight => Glyph::Tail(Direction::Right),
        SegmentShape::TailDown => Glyph::Tail(Direction::Down),
        SegmentShape::TailLeft => Glyph::Tail(Direction::Left),
        SegmentShape::BodyHorizontal => Glyph::Body([Direction::Left, Direction::Right]),
        SegmentShape::BodyVertical => Glyph::Body([Direction::Up, Direction::Down]),
        SegmentShape::CornerTopLeft => Glyph::Body([Direction::Up, Direction::Left]),
        SegmentShape::CornerTopRight => Glyph::Body([Direction::Up, Direction::Right]),
        SegmentShape::CornerBottomLeft => Glyph::Body([Direction::Down, Direction::Left]),
        SegmentShape::CornerBottomRight => Glyph::Body([Direction::Down, Direction::Right]),
    }
}

pub struct PainterRenderer<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterRenderer<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }
}

impl Renderer<Sprite> for PainterRenderer<'_> {
    fn draw(&mut self, sprite: &Sprite, rect: DrawRect) {
        let cell = egui::Rect::from_min_size(
            self.origin + egui::vec2(rect.x, rect.y),
            egui::vec2(rect.width, rect.height),
        );
        let inset = cell.width().min(cell.height()) * 0.15;
        let core = cell.shrink(inset);

        match sprite.glyph {
            Glyph::Brick => {
                self.painter.rect_filled(cell.shrink(1.0), 2.0, sprite.color);
            }
            Glyph::Fruit => {
                self.painter
                    .circle_filled(cell.center(), core.width().min(core.height()) * 0.45, sprite.color);
            }
            Glyph::Body(sides) => {
                self.painter.rect_filled(core, 0.0, sprite.color);
                for side in sides {
                    self.painter.rect_filled(bridge(core, cell, side), 0.0, sprite.color);
                }
            }
            Glyph::Head(facing) => {
                self.painter.rect_filled(bridge(core, cell, facing.opposite()), 0.0, sprite.color);
                self.painter.rect_filled(core, inset, sprite.color);

                let [a, b] = edge(core, facing);
                let radius = inset * 0.6;
                for t in [0.3, 0.7] {
                    let eye = a.lerp(b, t).lerp(core.center(), 0.35);
                    self.painter.circle_filled(eye, radius, egui::Color32::BLACK);
                }
            }
            Glyph::Tail(tip) => {
                let band = if tip.is_horizontal() {
                    egui::Rect::from_min_max(egui::pos2(cell.min.x, core.min.y), egui::pos2(cell.max.x, core.max.y))
                } else {
                    egui::Rect::from_min_max(egui::pos2(core.min.x, cell.min.y), egui::pos2(core.max.x, cell.max.y))
                };
                let [a, b] = edge(band, tip.opposite());
                let [c, d] = edge(band, tip);
                self.painter
                    .add(egui::Shape::convex_polygon(vec![a, b, c.lerp(d, 0.5)], sprite.color, egui::Stroke::NONE));
            }
        }
    }
}

/// Strip joining the inner square of a segment to one side of its cell.
fn bridge(core: egui::Rect, cell: egui::Rect, side: Direction) -> egui::Rect {
    match side {
        Direction::Up => egui::Rect::from_min_max(egui::pos2(core.min.x, cell.min.y), egui::pos2(core.max.x, core.min.y)),
        Direction::Down => egui::Rect::from_min_max(egui::pos2(core.min.x, core.max.y), egui::pos2(core.max.x, cell.max.y)),
        Direction::Left => egui::Rect::from_min_max(egui::pos2(cell.min.x, core.min.y), egui::pos2(core.min.x, core.max.y)),
        Direction::Right => egui::Rect::from_min_max(egui::pos2(core.max.x, core.min.y), egui::pos2(cell.max.x, core.max.y)),
    }
}

fn edge(rect: egui::Rect, side: Direction) -> [egui::Pos2; 2] {
    match side {
        Direction::Up => [rect.left_top(), rect.right_top()],
        Direction::Down => [rect.left_bottom(), rect.right_bottom()],
        Direction::Left => [rect.left_top(), rect.left_bottom()],
        Direction::Right => [rect.right_top(), rect.right_bottom()],
    }
}

/// Allocates the field area and draws the whole scene into it.
pub fn render_board(ui: &mut egui::Ui, scene: &Scene, tile: TileSize, palette: &Palette) {
    let canvas = egui::vec2(
        scene.field_size.width as f32 * tile.width as f32,
        scene.field_size.height as f32 * tile.height as f32,
    );
    let (response, painter) = ui.allocate_painter(canvas, egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xC5, 0xE1, 0xA5));

    let mut renderer = PainterRenderer::new(&painter, rect.min);
    draw_scene(scene, tile, palette, &mut renderer);
}

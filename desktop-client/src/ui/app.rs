use eframe::egui;
use snake_common::games::snake::{DeathReason, Direction, GameStatus, GameSummary, LevelId, Scene, TileSize};
use crate::CommandSender;
use crate::state::{AppState, ClientCommand, SharedState};

use super::board::{Palette, render_board};

const LEVEL_KEYS: [egui::Key; 5] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
];

pub struct SnakeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    tile: TileSize,
    palette: Palette,
    last_level: Option<LevelId>,
}

impl SnakeApp {
    pub fn new(shared_state: SharedState, command_sender: CommandSender, tile: TileSize) -> Self {
        Self {
            shared_state,
            command_sender,
            tile,
            palette: Palette::default(),
            last_level: None,
        }
    }

    fn start_level(&mut self, level: LevelId) {
        self.last_level = Some(level);
        self.command_sender.send(ClientCommand::StartLevel { level });
    }

    fn render_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading("Snake Levels");
            ui.add_space(20.0);

            for (index, level) in LevelId::ALL.into_iter().enumerate() {
                let label = format!("{}. {}", index + 1, level.name());
                if ui.add_sized([220.0, 32.0], egui::Button::new(label)).clicked() {
                    self.start_level(level);
                }
                ui.add_space(6.0);
            }

            ui.add_space(10.0);
            ui.label("Press 1-5 to start a level");
        });

        let pressed = ctx.input(|i| LEVEL_KEYS.iter().position(|key| i.key_pressed(*key)));
        if let Some(level) = pressed.and_then(|index| LevelId::ALL.get(index).copied()) {
            self.start_level(level);
        }
    }

    fn render_game(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, level: LevelId, scene: &Option<Scene>) {
        self.handle_input(ctx);

        let Some(scene) = scene else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(level.name());
            ui.separator();
            ui.label(format!("Score: {}", scene.score));
            ui.label(format!("Length: {}", scene.length));
        });
        ui.separator();

        render_board(ui, scene, self.tile, &self.palette);

        ui.add_space(6.0);
        ui.label("Arrow keys or WASD to steer, Escape for the menu");
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let (direction, escape) = ctx.input(|i| {
            let direction = i.events.iter().find_map(|event| match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => Direction::from_key_name(key.name()),
                _ => None,
            });
            (direction, i.key_pressed(egui::Key::Escape))
        });

        if let Some(direction) = direction {
            self.command_sender.send(ClientCommand::Turn { direction });
        }
        if escape {
            self.command_sender.send(ClientCommand::BackToMenu);
        }
    }

    fn render_game_over(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        summary: &GameSummary,
        last_scene: &Option<Scene>,
    ) {
        if let Some(scene) = last_scene {
            render_board(ui, scene, self.tile, &self.palette);
        }

        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            let (title, color) = match summary.status {
                GameStatus::Won => ("Level Complete!".to_string(), egui::Color32::GREEN),
                GameStatus::Lost(reason) => (format!("Game Over: {}", death_text(reason)), egui::Color32::RED),
                GameStatus::Running => ("Stopped".to_string(), egui::Color32::GRAY),
            };
            ui.heading(egui::RichText::new(title).color(color).size(28.0));

            ui.add_space(6.0);
            ui.label(format!("Level: {}", summary.level.name()));
            ui.label(format!("Score: {}", summary.score));
            ui.label(format!("Length: {}", summary.length));
            ui.label(format!("Ticks: {}", summary.ticks));
            ui.add_space(10.0);

            if ui.button("Play Again (Enter)").clicked() || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_level(summary.level);
            }

            if let Some(next) = next_level(summary) {
                if ui.button(format!("Next: {} (N)", next.name())).clicked()
                    || ctx.input(|i| i.key_pressed(egui::Key::N))
                {
                    self.start_level(next);
                }
            }

            if ui.button("Menu (Escape)").clicked() || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.command_sender.send(ClientCommand::BackToMenu);
            }
        });
    }
}

fn death_text(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::SelfCollision => "bit your own tail",
        DeathReason::ObstacleCollision => "hit a wall",
        DeathReason::HazardCollision => "ate a cherry",
    }
}

fn next_level(summary: &GameSummary) -> Option<LevelId> {
    if summary.status != GameStatus::Won {
        return None;
    }
    let index = LevelId::ALL.iter().position(|level| *level == summary.level)?;
    LevelId::ALL.get(index + 1).copied()
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if let Some(error) = self.shared_state.get_error() {
            egui::Window::new("Error").collapsible(false).show(ctx, |ui| {
                ui.label(&error);
                if ui.button("OK").clicked() {
                    self.shared_state.clear_error();
                }
            });
        }

        let title = match self.last_level {
            Some(level) => format!("Snake - {}", level.name()),
            None => "Snake".to_string(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        let current_state = self.shared_state.get_state();

        egui::CentralPanel::default().show(ctx, |ui| match current_state {
            AppState::Menu => {
                self.render_menu(ui, ctx);
            }
            AppState::InGame { level, scene } => {
                self.render_game(ui, ctx, level, &scene);
            }
            AppState::GameOver { summary, last_scene } => {
                self.render_game_over(ui, ctx, &summary, &last_scene);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(level: LevelId, status: GameStatus) -> GameSummary {
        GameSummary {
            level,
            status,
            score: 0,
            length: 3,
            ticks: 10,
            abandoned: false,
        }
    }

    #[test]
    fn test_next_level_after_win() {
        assert_eq!(
            next_level(&summary(LevelId::OpenField, GameStatus::Won)),
            Some(LevelId::Fenced)
        );
        assert_eq!(next_level(&summary(LevelId::Gates, GameStatus::Won)), None);
        assert_eq!(
            next_level(&summary(
                LevelId::Fenced,
                GameStatus::Lost(DeathReason::ObstacleCollision)
            )),
            None
        );
    }
}

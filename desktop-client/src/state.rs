use eframe::egui;
use snake_common::games::snake::{Direction, GameSummary, LevelId, Scene};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum ClientCommand {
    StartLevel { level: LevelId },
    Turn { direction: Direction },
    BackToMenu,
}

#[derive(Debug, Clone)]
pub enum AppState {
    Menu,
    InGame {
        level: LevelId,
        scene: Option<Scene>,
    },
    GameOver {
        summary: GameSummary,
        last_scene: Option<Scene>,
    },
}

pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    error: Arc<Mutex<Option<String>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::Menu)),
            error: Arc::new(Mutex::new(None)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }

    pub fn set_state(&self, state: AppState) {
        *self.state.lock().unwrap() = state;
        self.request_repaint();
    }

    pub fn get_state(&self) -> AppState {
        self.state.lock().unwrap().clone()
    }

    /// Replaces the frame of the running level; ignored once the level has
    /// ended or the player went back to the menu.
    pub fn update_scene(&self, new_scene: Scene) {
        {
            let mut state = self.state.lock().unwrap();
            if let AppState::InGame { level, scene } = &mut *state
                && *level == new_scene.level
            {
                *scene = Some(new_scene);
            }
        }
        self.request_repaint();
    }

    pub fn finish_game(&self, summary: GameSummary) {
        let mut state = self.state.lock().unwrap();
        let last_scene = match &*state {
            AppState::InGame { scene, .. } => scene.clone(),
            _ => None,
        };
        *state = AppState::GameOver { summary, last_scene };
        drop(state);
        self.request_repaint();
    }

    pub fn set_error(&self, error: String) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap() = None;
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            error: Arc::clone(&self.error),
            context: Arc::clone(&self.context),
        }
    }
}

use snake_common::games::snake::{FrameSink, GameSummary, Scene};
use crate::state::{AppState, SharedState};

/// Publishes session frames into the state shared with the UI thread.
#[derive(Clone)]
pub struct LocalFrameSink {
    shared_state: SharedState,
}

impl LocalFrameSink {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl FrameSink for LocalFrameSink {
    async fn present(&self, scene: Scene) {
        self.shared_state.update_scene(scene);
    }

    async fn finish(&self, summary: GameSummary) {
        if summary.abandoned {
            self.shared_state.set_state(AppState::Menu);
        } else {
            self.shared_state.finish_game(summary);
        }
    }
}

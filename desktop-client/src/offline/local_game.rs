use tokio::sync::mpsc;
use snake_common::games::SessionRng;
use snake_common::games::snake::{LevelId, SnakeGameState, SnakeSession, SnakeSessionSettings};
use snake_common::log;
use crate::state::{AppState, ClientCommand, SharedState};

use super::LocalFrameSink;

pub async fn local_game_task(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    settings: SnakeSessionSettings,
    seed: Option<u64>,
) {
    let mut next_level = None;

    loop {
        let command = match next_level.take() {
            Some(level) => ClientCommand::StartLevel { level },
            None => match command_rx.recv().await {
                Some(command) => command,
                None => break,
            },
        };

        match command {
            ClientCommand::StartLevel { level } => {
                next_level = run_level(&shared_state, &mut command_rx, &settings, seed, level).await;
            }
            ClientCommand::BackToMenu => {
                shared_state.set_state(AppState::Menu);
            }
            ClientCommand::Turn { .. } => {}
        }
    }

    log!("Local game task stopped");
}

/// Plays one level until it ends or is abandoned. Returns the level to start
/// next when the player picked one while this level was still running.
async fn run_level(
    shared_state: &SharedState,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    settings: &SnakeSessionSettings,
    seed: Option<u64>,
    level: LevelId,
) -> Option<LevelId> {
    let mut rng = match seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let game_state = match SnakeGameState::new(level.plan(), settings.clone(), &mut rng) {
        Ok(game_state) => game_state,
        Err(e) => {
            log!("Failed to start level '{}': {}", level.name(), e);
            shared_state.set_error(format!("Failed to start level '{}': {}", level.name(), e));
            shared_state.set_state(AppState::Menu);
            return None;
        }
    };

    shared_state.clear_error();
    shared_state.set_state(AppState::InGame {
        level,
        scene: Some(game_state.scene()),
    });

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let mut input_tx = Some(input_tx);
    let frames = LocalFrameSink::new(shared_state.clone());

    let mut game_handle = tokio::spawn(SnakeSession::run(game_state, rng, input_rx, frames));

    loop {
        tokio::select! {
            result = &mut game_handle => {
                if let Err(e) = result {
                    log!("Session task for level '{}' failed: {}", level.name(), e);
                    shared_state.set_state(AppState::Menu);
                }
                return None;
            }
            command = command_rx.recv() => {
                match command {
                    Some(ClientCommand::Turn { direction }) => {
                        if let Some(ref tx) = input_tx
                            && let Err(e) = tx.send(direction)
                        {
                            log!("Session for level '{}' stopped, dropped turn {:?}", level.name(), e.0);
                        }
                    }
                    Some(ClientCommand::BackToMenu) | None => {
                        // Closing the input channel makes the session stop as abandoned.
                        input_tx.take();
                        if let Err(e) = (&mut game_handle).await {
                            log!("Session task for level '{}' failed: {}", level.name(), e);
                        }
                        shared_state.set_state(AppState::Menu);
                        return None;
                    }
                    Some(ClientCommand::StartLevel { level: next }) => {
                        log!("Abandoning level '{}' to start '{}'", level.name(), next.name());
                        input_tx.take();
                        if let Err(e) = (&mut game_handle).await {
                            log!("Session task for level '{}' failed: {}", level.name(), e);
                        }
                        return Some(next);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::snake::{FieldSize, GameStatus};
    use std::time::Duration;

    fn quick_settings() -> SnakeSessionSettings {
        SnakeSessionSettings {
            field_size: FieldSize::new(16, 16),
            tick_interval: Duration::from_millis(5),
            ..SnakeSessionSettings::default()
        }
    }

    async fn wait_for_game_over(shared_state: &SharedState) -> AppState {
        for _ in 0..400 {
            let state = shared_state.get_state();
            if matches!(state, AppState::GameOver { .. }) {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("level never finished, state {:?}", shared_state.get_state());
    }

    #[tokio::test]
    async fn test_start_level_while_running_switches_level() {
        let shared_state = SharedState::new();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(local_game_task(shared_state.clone(), command_rx, quick_settings(), Some(7)));

        command_tx.send(ClientCommand::StartLevel { level: LevelId::OpenField }).unwrap();
        command_tx.send(ClientCommand::StartLevel { level: LevelId::Fenced }).unwrap();

        // Open field never kills a snake running straight, so only the fenced level can end.
        match wait_for_game_over(&shared_state).await {
            AppState::GameOver { summary, .. } => {
                assert_eq!(summary.level, LevelId::Fenced);
                assert!(!summary.abandoned);
                assert!(matches!(summary.status, GameStatus::Lost(_)));
            }
            other => panic!("unexpected state {:?}", other),
        }

        drop(command_tx);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_back_to_menu_abandons_level() {
        let shared_state = SharedState::new();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        command_tx.send(ClientCommand::StartLevel { level: LevelId::OpenField }).unwrap();
        command_tx.send(ClientCommand::BackToMenu).unwrap();
        drop(command_tx);

        local_game_task(shared_state.clone(), command_rx, quick_settings(), Some(7)).await;
        assert!(matches!(shared_state.get_state(), AppState::Menu));
    }
}

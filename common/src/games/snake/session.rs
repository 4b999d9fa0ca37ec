use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::log;
use crate::games::SessionRng;
use super::game_state::SnakeGameState;
use super::render::{FrameSink, GameSummary};
use super::types::Direction;

pub struct SnakeSession;

impl SnakeSession {
    /// Drives one level until it is won, lost or the input side goes away.
    ///
    /// Movement and redraw run on separate timers. Turns are applied to the
    /// state as soon as they are received, between ticks.
    pub async fn run(
        mut game_state: SnakeGameState,
        mut rng: SessionRng,
        mut input_rx: mpsc::UnboundedReceiver<Direction>,
        frames: impl FrameSink,
    ) -> GameSummary {
        let mut period = game_state.current_tick_interval();
        let mut movement = movement_timer(period);
        let mut redraw = interval(game_state.settings().redraw_interval);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut abandoned = false;
        frames.present(game_state.scene()).await;

        loop {
            tokio::select! {
                _ = movement.tick() => {
                    let outcome = game_state.tick(&mut rng);
                    if outcome.status.is_finished() {
                        break;
                    }

                    let next_period = game_state.current_tick_interval();
                    if next_period != period {
                        log!("Tick interval changed from {:?} to {:?}", period, next_period);
                        period = next_period;
                        movement = movement_timer(period);
                    }
                }
                _ = redraw.tick() => {
                    frames.present(game_state.scene()).await;
                }
                command = input_rx.recv() => {
                    match command {
                        Some(direction) => {
                            game_state.request_direction(direction);
                        }
                        None => {
                            log!("Input channel closed, abandoning level '{}'", game_state.plan().name());
                            abandoned = true;
                            break;
                        }
                    }
                }
            }
        }

        frames.present(game_state.scene()).await;

        let summary = game_state.summary(abandoned);
        log!(
            "Session finished: {:?}, score {}, length {}, {} ticks",
            summary.status,
            summary.score,
            summary.length,
            summary.ticks
        );
        frames.finish(summary.clone()).await;
        summary
    }
}

fn movement_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

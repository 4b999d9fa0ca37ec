mod frame_sink;
mod local_game;

pub use frame_sink::LocalFrameSink;
pub use local_game::local_game_task;

mod app;
mod board;

pub use app::SnakeApp;

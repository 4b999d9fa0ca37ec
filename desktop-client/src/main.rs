mod offline;
mod state;
mod ui;

use clap::Parser;
use eframe::egui;
use snake_common::config::{ConfigManager, FileContentConfigProvider, SnakeConfig};
use snake_common::games::snake::{LevelId, SnakeSessionSettings};
use snake_common::{log, logger};
use tokio::sync::mpsc;

use offline::local_game_task;
use state::{ClientCommand, SharedState};
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake_desktop")]
struct Args {
    /// Path to the YAML configuration; defaults are used when it is missing.
    #[arg(long, default_value = "snake_config.yaml")]
    config: String,

    /// Level to start right away, by name or 1-based number.
    #[arg(long)]
    level: Option<String>,

    /// Fixed seed for bait placement.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[derive(Clone)]
pub struct CommandSender {
    command_tx: mpsc::UnboundedSender<ClientCommand>,
}

impl CommandSender {
    pub fn new(command_tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { command_tx }
    }

    pub fn send(&self, command: ClientCommand) {
        if let Err(e) = self.command_tx.send(command) {
            log!("Game task is not running, dropped command: {:?}", e.0);
        }
    }
}

fn load_config(path: &str) -> Result<SnakeConfig, String> {
    let config_manager: ConfigManager<FileContentConfigProvider, SnakeConfig> = ConfigManager::from_yaml_file(path);
    let config = config_manager.get_config()?;
    log!("Loaded config from {}", path);
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(&args.config)?;

    let start_level = match args.level.as_deref() {
        Some(name) => Some(LevelId::from_name(name).ok_or_else(|| format!("Unknown level '{}'", name))?),
        None => config.start_level,
    };

    let settings = SnakeSessionSettings::from(&config);
    let tile = settings.tile;
    let canvas_width = settings.field_size.width as f32 * tile.width as f32;
    let canvas_height = settings.field_size.height as f32 * tile.height as f32;

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let command_sender = CommandSender::new(command_tx);

    if let Some(level) = start_level {
        command_sender.send(ClientCommand::StartLevel { level });
    }

    let shared_state_clone = shared_state.clone();
    let seed = args.seed;

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to create tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(local_game_task(shared_state_clone, command_rx, settings, seed));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas_width + 40.0, canvas_height + 120.0])
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake",
        options,
        Box::new(move |_cc| Ok(Box::new(SnakeApp::new(shared_state, command_sender, tile)))),
    )?;

    Ok(())
}

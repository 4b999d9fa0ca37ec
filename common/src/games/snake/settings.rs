use std::time::Duration;

use crate::config::SnakeConfig;
use super::render::TileSize;
use super::types::FieldSize;

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub field_size: FieldSize,
    pub tile: TileSize,
    pub tick_interval: Duration,
    pub redraw_interval: Duration,
    pub boost_divisor: u32,
}

impl From<&SnakeConfig> for SnakeSessionSettings {
    fn from(config: &SnakeConfig) -> Self {
        Self {
            field_size: FieldSize::new(config.field_width as usize, config.field_height as usize),
            tile: TileSize {
                width: config.tile_width,
                height: config.tile_height,
            },
            tick_interval: Duration::from_millis(config.tick_interval_ms as u64),
            redraw_interval: Duration::from_millis(config.redraw_interval_ms as u64),
            boost_divisor: config.boost_divisor.max(1),
        }
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self::from(&SnakeConfig::default())
    }
}

impl SnakeSessionSettings {
    /// Movement period while a speed boost is active.
    pub fn boosted_tick_interval(&self) -> Duration {
        self.tick_interval / self.boost_divisor.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = SnakeConfig {
            field_width: 40,
            field_height: 25,
            tick_interval_ms: 200,
            boost_divisor: 4,
            ..SnakeConfig::default()
        };
        let settings = SnakeSessionSettings::from(&config);

        assert_eq!(settings.field_size, FieldSize::new(40, 25));
        assert_eq!(settings.tick_interval, Duration::from_millis(200));
        assert_eq!(settings.boosted_tick_interval(), Duration::from_millis(50));
        assert_eq!(settings.redraw_interval, Duration::from_millis(16));
    }
}

use serde::{Deserialize, Serialize};

use crate::games::snake::LevelId;
use super::Validate;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeConfig {
    pub field_width: u32,
    pub field_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tick_interval_ms: u32,
    pub redraw_interval_ms: u32,
    #[serde(default = "default_boost_divisor")]
    pub boost_divisor: u32,
    #[serde(default)]
    pub start_level: Option<LevelId>,
}

fn default_boost_divisor() -> u32 {
    2
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 12 || self.field_height < 12 {
            return Err("field dimensions must be at least 12x12".to_string());
        }
        if self.field_width > 100 || self.field_height > 100 {
            return Err("field dimensions must not exceed 100x100".to_string());
        }
        if !(4..=128).contains(&self.tile_width) || !(4..=128).contains(&self.tile_height) {
            return Err("tile size must be between 4 and 128 pixels".to_string());
        }
        if !(30..=2000).contains(&self.tick_interval_ms) {
            return Err("tick_interval_ms must be between 30 and 2000".to_string());
        }
        if !(5..=500).contains(&self.redraw_interval_ms) {
            return Err("redraw_interval_ms must be between 5 and 500".to_string());
        }
        if self.redraw_interval_ms > self.tick_interval_ms {
            return Err("redraw_interval_ms must not exceed tick_interval_ms".to_string());
        }
        if !(1..=4).contains(&self.boost_divisor) {
            return Err("boost_divisor must be between 1 and 4".to_string());
        }
        Ok(())
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            field_width: 30,
            field_height: 30,
            tile_width: 20,
            tile_height: 20,
            tick_interval_ms: 150,
            redraw_interval_ms: 16,
            boost_divisor: default_boost_divisor(),
            start_level: None,
        }
    }
}

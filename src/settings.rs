//! Game configuration
//!
//! Every tunable constant of the simulation lives here so tests can run with
//! alternate dimensions. Configs are validated once at setup, never per tick.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a [`GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for this schema
    Parse(serde_json::Error),
    /// A value is out of its valid range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Paddle ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Gap between paddle bottom and screen floor
    pub paddle_bottom_margin: i32,
    /// Pixels per move command (independent of ball speed)
    pub paddle_speed: i32,

    // === Ball ===
    pub ball_size: i32,
    /// Pixels per tick on each axis
    pub ball_speed: i32,

    // === Rules ===
    pub max_lives: u32,
    /// Last level; clearing it ends the game
    pub max_level: u32,

    // === Brick grid ===
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub brick_width: i32,
    pub brick_height: i32,
    pub brick_spacing_x: i32,
    pub brick_spacing_y: i32,
    pub brick_offset_x: i32,
    pub brick_offset_y: i32,

    // === Loop ===
    pub tick_period_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,

            max_lives: MAX_LIVES,
            max_level: MAX_LEVEL,

            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_spacing_x: BRICK_SPACING_X,
            brick_spacing_y: BRICK_SPACING_Y,
            brick_offset_x: BRICK_OFFSET_X,
            brick_offset_y: BRICK_OFFSET_Y,

            tick_period_ms: TICK_PERIOD_MS,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Fixed tick period of the game loop
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Vertical position of the paddle's top edge
    pub fn paddle_y(&self) -> i32 {
        self.screen_height - self.paddle_height - self.paddle_bottom_margin
    }

    /// Check every value is inside the range the simulation can handle
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: i32) -> Result<(), ConfigError> {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
            Ok(())
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_size", self.ball_size)?;
        positive("ball_speed", self.ball_speed)?;
        positive("brick_width", self.brick_width)?;
        positive("brick_height", self.brick_height)?;

        if self.paddle_bottom_margin < 0 {
            return Err(ConfigError::Invalid(
                "paddle_bottom_margin must not be negative".into(),
            ));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "brick grid must be non-empty, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if self.max_lives == 0 {
            return Err(ConfigError::Invalid("max_lives must be at least 1".into()));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid("max_level must be at least 1".into()));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if self.paddle_width > self.screen_width {
            return Err(ConfigError::Invalid(format!(
                "paddle_width {} exceeds screen_width {}",
                self.paddle_width, self.screen_width
            )));
        }
        if self.ball_size > self.screen_width / 2 || self.ball_size > self.screen_height / 2 {
            return Err(ConfigError::Invalid(format!(
                "ball_size {} does not fit the screen",
                self.ball_size
            )));
        }
        // A reflected ball lands at x - dx, which must stay on screen
        let reach = self.ball_speed.saturating_mul(2);
        if reach > self.screen_width - self.ball_size
            || reach > self.screen_height - self.ball_size
        {
            return Err(ConfigError::Invalid(format!(
                "ball_speed {} is too fast for the screen",
                self.ball_speed
            )));
        }
        for (name, value) in [
            ("brick_spacing_x", self.brick_spacing_x),
            ("brick_spacing_y", self.brick_spacing_y),
            ("brick_offset_x", self.brick_offset_x),
            ("brick_offset_y", self.brick_offset_y),
        ] {
            if value < 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        let right = grid_edge(
            self.grid_cols,
            self.brick_spacing_x,
            self.brick_offset_x,
            self.brick_width,
        );
        let bottom = grid_edge(
            self.grid_rows,
            self.brick_spacing_y,
            self.brick_offset_y,
            self.brick_height,
        );
        match (right, bottom) {
            (Some(right), Some(bottom))
                if right <= self.screen_width && bottom <= self.screen_height => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "{}x{} brick grid does not fit the screen",
                    self.grid_rows, self.grid_cols
                )));
            }
        }

        let paddle_band = self.paddle_height.checked_add(self.paddle_bottom_margin);
        if paddle_band.is_none_or(|band| band > self.screen_height) {
            return Err(ConfigError::Invalid(
                "paddle row lies outside the screen".into(),
            ));
        }

        Ok(())
    }
}

/// Far edge of the last brick along one axis, `None` on overflow
fn grid_edge(count: usize, spacing: i32, offset: i32, extent: i32) -> Option<i32> {
    let steps = i32::try_from(count.checked_sub(1)?).ok()?;
    steps
        .checked_mul(spacing)?
        .checked_add(offset)?
        .checked_add(extent)
}

//! Brick Breaker - a fixed-tick brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, collisions, scoring, levels)
//! - `driver`: Fixed-period game loop owning the simulation state
//! - `settings`: Validated game configuration
//! - `audio`: Advisory sound cues
//! - `autopilot`: Demo mode paddle controller

pub mod audio;
pub mod autopilot;
pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::{CommandSender, GameLoop, Presenter, TickReport};
pub use settings::{ConfigError, GameConfig};

/// Game configuration defaults
pub mod consts {
    /// Fixed simulation tick period (100 Hz)
    pub const TICK_PERIOD_MS: u64 = 10;
    /// Maximum ticks run by a single `advance` call
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 150;
    pub const PADDLE_HEIGHT: i32 = 20;
    /// Gap between the paddle's bottom edge and the floor
    pub const PADDLE_BOTTOM_MARGIN: i32 = 20;
    /// Horizontal shift per move command
    pub const PADDLE_SPEED: i32 = 100;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 20;
    /// Per-axis ball speed in pixels per tick
    pub const BALL_SPEED: i32 = 5;

    pub const MAX_LIVES: u32 = 2;
    pub const MAX_LEVEL: u32 = 2;

    /// Brick grid layout
    pub const GRID_ROWS: usize = 5;
    pub const GRID_COLS: usize = 10;
    pub const BRICK_WIDTH: i32 = 50;
    pub const BRICK_HEIGHT: i32 = 20;
    pub const BRICK_SPACING_X: i32 = 60;
    pub const BRICK_SPACING_Y: i32 = 30;
    pub const BRICK_OFFSET_X: i32 = 20;
    pub const BRICK_OFFSET_Y: i32 = 50;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer pixel coordinates, fixed per-tick velocities
//! - Stable row-major brick iteration
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod levels;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{BallMotion, LevelProgress};
pub use geometry::Rect;
pub use input::{PaddleMove, move_paddle};
pub use levels::{LevelPattern, brick_present};
pub use snapshot::{BrickView, Snapshot};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, TickOutcome, tick};

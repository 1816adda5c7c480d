//! Paddle input
//!
//! Each move command shifts the paddle by exactly one `paddle_speed` step.
//! There is no key repeat, acceleration or vertical motion.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Discrete horizontal paddle move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Left,
    Right,
}

/// Shift the paddle one step if it stays inside `[0, screen_width]`
///
/// Returns false when the move would leave the screen (the paddle stays put).
pub fn move_paddle(state: &mut GameState, dir: PaddleMove) -> bool {
    let step = match dir {
        PaddleMove::Left => -state.config.paddle_speed,
        PaddleMove::Right => state.config.paddle_speed,
    };
    let new_x = state.paddle.pos.x + step;
    if new_x < 0 || new_x + state.paddle.width > state.config.screen_width {
        return false;
    }
    state.paddle.pos.x = new_x;
    true
}

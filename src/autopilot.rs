//! Idle/demo mode - a simple AI that plays the game
//!
//! Tracks the ball horizontally with one move command per tick at most. A
//! seeded RNG makes it hesitate now and then so it is beatable, while two
//! runs with the same seed stay identical.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::driver::GameCommand;
use crate::sim::Snapshot;

/// Chance per tick that the autopilot does nothing
pub const DEFAULT_HESITATION: f64 = 0.35;

pub struct Autopilot {
    rng: Pcg32,
    hesitation: f64,
    /// Paddle step, used to avoid overshooting the ball
    paddle_speed: i32,
}

impl Autopilot {
    pub fn new(seed: u64, paddle_speed: i32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hesitation: DEFAULT_HESITATION,
            paddle_speed,
        }
    }

    /// Set the per-tick idle probability (clamped to `[0, 1]`)
    pub fn with_hesitation(mut self, hesitation: f64) -> Self {
        self.hesitation = hesitation.clamp(0.0, 1.0);
        self
    }

    /// Next command for the current frame, if any
    ///
    /// Presses retry once the game is over.
    pub fn decide(&mut self, snapshot: &Snapshot) -> Option<GameCommand> {
        if snapshot.game_over {
            return Some(GameCommand::Reset);
        }
        if self.rng.random_bool(self.hesitation) {
            return None;
        }

        let offset = snapshot.ball.center_x() - snapshot.paddle.center_x();
        // Only move when a full step gets closer to the ball
        if offset.abs() * 2 <= self.paddle_speed {
            return None;
        }
        if offset < 0 {
            Some(GameCommand::MoveLeft)
        } else {
            Some(GameCommand::MoveRight)
        }
    }
}

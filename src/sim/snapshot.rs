//! Read-only view of the game for presentation layers

use serde::Serialize;

use super::geometry::Rect;
use super::state::GameState;

/// One grid cell as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrickView {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub visible: bool,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: Rect,
    /// Present cells only, row-major
    pub bricks: Vec<BrickView>,
    pub score: u32,
    pub level: u32,
    pub remaining_chances: u32,
    pub chances_used: u32,
    pub game_over: bool,
    pub time_ticks: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            paddle: state.paddle.rect(),
            ball: state.ball.rect(),
            bricks: state
                .bricks
                .iter()
                .map(|(row, col, b)| BrickView {
                    row,
                    col,
                    rect: b.rect,
                    visible: b.visible,
                })
                .collect(),
            score: state.score,
            level: state.level,
            remaining_chances: state.remaining_chances,
            chances_used: state.chances_used(),
            game_over: state.is_game_over(),
            time_ticks: state.time_ticks,
        }
    }

    /// HUD labels; the terminal overlay lines appear only once the game is over
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Chances: {}", self.chances_used),
            format!("Level: {}", self.level),
        ];
        if self.game_over {
            lines.push("Game Over".to_string());
            lines.push("Retry".to_string());
        }
        lines
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}

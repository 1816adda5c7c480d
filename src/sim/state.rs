//! Game state and core simulation types
//!
//! All mutable game data lives in [`GameState`]; it is owned by exactly one
//! place (the game loop) and mutated only through the tick and input paths.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::levels::brick_present;
use crate::settings::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, retry available
    GameOver,
}

/// Advisory side effects of a tick (sound cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit,
    BrickBroken { row: usize, col: usize },
    LifeLost { remaining: u32 },
    LevelStarted { level: u32 },
    /// Final level cleared
    GameWon,
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: IVec2,
    /// Pixels per tick
    pub vel: IVec2,
    pub size: i32,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner; y never changes
    pub pos: IVec2,
    pub width: i32,
    pub height: i32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// A brick cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Cleared when the brick is destroyed
    pub visible: bool,
}

/// Fixed `rows x cols` arena of optional bricks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    /// Row-major cells; `None` marks a cell the level pattern left empty
    cells: Vec<Option<Brick>>,
}

impl BrickGrid {
    /// Populate the grid for `level` using the level pattern
    pub fn for_level(config: &GameConfig, level: u32) -> Self {
        let (rows, cols) = (config.grid_rows, config.grid_cols);
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let cell = brick_present(level, row, col).then(|| Brick {
                    rect: Rect::new(
                        col as i32 * config.brick_spacing_x + config.brick_offset_x,
                        row as i32 * config.brick_spacing_y + config.brick_offset_y,
                        config.brick_width,
                        config.brick_height,
                    ),
                    visible: true,
                });
                cells.push(cell);
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_mut()
    }

    /// Present cells in row-major order with their indices
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|b| (i / cols, i % cols, b)))
    }

    /// Mutable present cells in row-major order with their indices
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Brick)> {
        let cols = self.cols;
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_mut().map(|b| (i / cols, i % cols, b)))
    }

    pub fn visible_count(&self) -> usize {
        self.iter().filter(|(_, _, b)| b.visible).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.iter().all(|(_, _, b)| !b.visible)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Current level (1-based)
    pub level: u32,
    /// Bricks destroyed since the level started
    pub score: u32,
    /// Ball drops left before game over
    pub remaining_chances: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Simulation tick counter (advances only while playing)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a game at level 1 with the paddle centred
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        let paddle = Paddle {
            pos: IVec2::new(
                config.screen_width / 2 - config.paddle_width / 2,
                config.paddle_y(),
            ),
            width: config.paddle_width,
            height: config.paddle_height,
        };
        let ball = Ball {
            pos: IVec2::ZERO,
            vel: IVec2::ZERO,
            size: config.ball_size,
        };
        let bricks = BrickGrid::for_level(&config, 1);

        let mut state = Self {
            level: 1,
            score: 0,
            remaining_chances: config.max_lives,
            phase: GamePhase::Playing,
            paddle,
            ball,
            bricks,
            time_ticks: 0,
            config,
        };
        state.start_level(1);
        state
    }

    /// Begin `level` from scratch
    ///
    /// Score resets to zero on every level start, including after clearing
    /// the previous level.
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.bricks = BrickGrid::for_level(&self.config, level);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.remaining_chances = self.config.max_lives;
        self.respawn_ball();
        log::info!(
            "Level {} started with {} bricks",
            level,
            self.bricks.visible_count()
        );
    }

    /// Back to level 1 after a retry
    ///
    /// The paddle keeps its last position.
    pub fn reset_game(&mut self) {
        log::info!("Game reset");
        self.start_level(1);
    }

    /// Ball to the screen centre with the initial velocity `(+speed, -speed)`
    pub fn respawn_ball(&mut self) {
        let c = &self.config;
        self.ball.pos = IVec2::new(
            c.screen_width / 2 - c.ball_size / 2,
            c.screen_height / 2 - c.ball_size / 2,
        );
        self.ball.vel = IVec2::new(c.ball_speed, -c.ball_speed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Chances spent so far (what the HUD shows)
    pub fn chances_used(&self) -> u32 {
        self.config.max_lives.saturating_sub(self.remaining_chances)
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.visible_count()
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        self.bricks.all_destroyed()
    }
}

//! Ball movement, collision response and scoring
//!
//! All collisions are bounding-box tests with plain velocity inversion. Speed
//! is constant, so a ball may sit partly inside a wall or brick for a tick;
//! no position correction is applied.

use super::state::{GameEvent, GamePhase, GameState};

/// What happened to the ball during [`move_ball`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallMotion {
    /// Ball translated by its velocity
    Moved,
    /// Ball dropped past the paddle and was put back at the centre
    Respawned { remaining: u32 },
    /// Ball dropped with no chances left; the game is over
    OutOfChances,
}

/// Outcome of the level completion check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelProgress {
    InProgress,
    /// Grid cleared and the next level started
    Advanced { level: u32 },
    /// Final level cleared
    Completed,
}

/// Reflect off walls, handle floor drops, then translate
pub fn move_ball(state: &mut GameState) -> BallMotion {
    let width = state.config.screen_width;
    let height = state.config.screen_height;
    let ball = &mut state.ball;

    let next_x = ball.pos.x + ball.vel.x;
    if next_x < 0 || next_x + ball.size > width {
        ball.vel.x = -ball.vel.x;
    }

    if ball.pos.y + ball.vel.y < 0 {
        ball.vel.y = -ball.vel.y;
    }

    if ball.pos.y + ball.size >= height {
        state.remaining_chances = state.remaining_chances.saturating_sub(1);
        if state.remaining_chances > 0 {
            log::debug!("Ball lost, {} chances left", state.remaining_chances);
            state.respawn_ball();
            return BallMotion::Respawned {
                remaining: state.remaining_chances,
            };
        }
        log::info!("Out of chances on level {} (score {})", state.level, state.score);
        state.phase = GamePhase::GameOver;
        return BallMotion::OutOfChances;
    }

    state.ball.pos += state.ball.vel;
    BallMotion::Moved
}

/// Bounce off the paddle; returns true on contact
pub fn paddle_collision(state: &mut GameState) -> bool {
    if state.ball.rect().intersects(&state.paddle.rect()) {
        state.ball.vel.y = -state.ball.vel.y;
        log::trace!("Paddle hit at x={}", state.ball.pos.x);
        return true;
    }
    false
}

/// Break every visible brick the ball overlaps
///
/// Each hit inverts vertical velocity, so overlapping two bricks in one tick
/// inverts twice. Returns the number of bricks broken.
pub fn brick_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) -> u32 {
    let ball_rect = state.ball.rect();
    let mut hits = 0;

    for (row, col, brick) in state.bricks.iter_mut() {
        if !brick.visible || !brick.rect.intersects(&ball_rect) {
            continue;
        }
        brick.visible = false;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += 1;
        hits += 1;
        events.push(GameEvent::BrickBroken { row, col });
        log::trace!("Brick ({}, {}) broken, score {}", row, col, state.score);
    }

    hits
}

/// Advance to the next level, or end the game, once the grid is empty
pub fn check_level_complete(state: &mut GameState) -> LevelProgress {
    if !state.all_bricks_destroyed() {
        return LevelProgress::InProgress;
    }

    if state.level < state.config.max_level {
        log::info!("Level {} cleared", state.level);
        let next = state.level + 1;
        state.start_level(next);
        LevelProgress::Advanced { level: next }
    } else {
        log::info!("Final level {} cleared", state.level);
        state.phase = GamePhase::GameOver;
        LevelProgress::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use glam::IVec2;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default())
    }

    /// Hide every brick except `(row, col)`
    fn keep_only(state: &mut GameState, row: usize, col: usize) {
        for (r, c, brick) in state.bricks.iter_mut() {
            brick.visible = r == row && c == col;
        }
    }

    #[test]
    fn test_move_ball_translates_by_velocity() {
        let mut state = new_state();
        let before = state.ball.pos;
        assert_eq!(move_ball(&mut state), BallMotion::Moved);
        assert_eq!(state.ball.pos, before + IVec2::new(5, -5));
    }

    #[test]
    fn test_right_wall_inverts_dx() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(780, 300);
        state.ball.vel = IVec2::new(5, 5);
        move_ball(&mut state);
        assert_eq!(state.ball.vel, IVec2::new(-5, 5));
        assert_eq!(state.ball.pos, IVec2::new(775, 305));
    }

    #[test]
    fn test_left_wall_inverts_dx() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(0, 300);
        state.ball.vel = IVec2::new(-5, 5);
        move_ball(&mut state);
        assert_eq!(state.ball.vel.x, 5);
        assert_eq!(state.ball.pos.x, 5);
    }

    #[test]
    fn test_top_wall_inverts_dy() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(400, 0);
        state.ball.vel = IVec2::new(5, -5);
        move_ball(&mut state);
        assert_eq!(state.ball.vel, IVec2::new(5, 5));
        assert_eq!(state.ball.pos, IVec2::new(405, 5));
    }

    #[test]
    fn test_corner_inverts_both_axes_once() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(0, 0);
        state.ball.vel = IVec2::new(-5, -5);
        move_ball(&mut state);
        assert_eq!(state.ball.vel, IVec2::new(5, 5));
        assert_eq!(state.ball.pos, IVec2::new(5, 5));
    }

    #[test]
    fn test_floor_costs_a_chance_and_respawns() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(100, 580);
        state.ball.vel = IVec2::new(-5, 5);
        assert_eq!(move_ball(&mut state), BallMotion::Respawned { remaining: 1 });
        assert_eq!(state.ball.pos, IVec2::new(390, 290));
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_drop_ends_game() {
        let mut state = new_state();
        state.remaining_chances = 1;
        state.ball.pos = IVec2::new(100, 585);
        state.ball.vel = IVec2::new(5, 5);
        assert_eq!(move_ball(&mut state), BallMotion::OutOfChances);
        assert_eq!(state.remaining_chances, 0);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_paddle_hit_inverts_dy_only() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(390, 545);
        state.ball.vel = IVec2::new(5, 5);
        assert!(paddle_collision(&mut state));
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_paddle_miss() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(10, 545);
        assert!(!paddle_collision(&mut state));
    }

    #[test]
    fn test_brick_hit_scores_and_hides() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(30, 60);
        state.ball.vel = IVec2::new(5, -5);
        let mut events = Vec::new();

        assert_eq!(brick_collisions(&mut state, &mut events), 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, 5);
        assert!(!state.bricks.get(0, 0).unwrap().visible);
        assert_eq!(events, vec![GameEvent::BrickBroken { row: 0, col: 0 }]);
    }

    #[test]
    fn test_destroyed_brick_never_rescores() {
        let mut state = new_state();
        state.ball.pos = IVec2::new(30, 60);
        let mut events = Vec::new();
        brick_collisions(&mut state, &mut events);
        let vel = state.ball.vel;

        // Ball still overlapping the former brick
        assert_eq!(brick_collisions(&mut state, &mut events), 0);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel, vel);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_two_bricks_in_one_tick_invert_twice() {
        let mut state = new_state();
        // Straddles the gap between (0, 0) and (0, 1): x 65..85 overlaps both
        state.ball.pos = IVec2::new(65, 55);
        state.ball.vel = IVec2::new(5, -5);
        let mut events = Vec::new();

        assert_eq!(brick_collisions(&mut state, &mut events), 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.ball.vel.y, -5);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_sparse_cells_are_skipped() {
        let mut state = new_state();
        state.start_level(2);
        // Over cell (0, 1), which level 2 leaves empty
        state.ball.pos = IVec2::new(90, 55);
        let mut events = Vec::new();
        assert_eq!(brick_collisions(&mut state, &mut events), 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_level_in_progress() {
        let mut state = new_state();
        assert_eq!(check_level_complete(&mut state), LevelProgress::InProgress);
    }

    #[test]
    fn test_clearing_level_one_advances_and_resets_score() {
        let mut state = new_state();
        keep_only(&mut state, 0, 0);
        state.score = 49;
        state.ball.pos = IVec2::new(30, 60);
        let mut events = Vec::new();
        brick_collisions(&mut state, &mut events);
        assert_eq!(state.score, 50);

        assert_eq!(
            check_level_complete(&mut state),
            LevelProgress::Advanced { level: 2 }
        );
        assert_eq!(state.level, 2);
        // Points from the cleared level are discarded
        assert_eq!(state.score, 0);
        assert_eq!(state.visible_bricks(), 25);
    }

    #[test]
    fn test_clearing_final_level_ends_game() {
        let mut state = new_state();
        state.start_level(2);
        for (_, _, brick) in state.bricks.iter_mut() {
            brick.visible = false;
        }
        assert_eq!(check_level_complete(&mut state), LevelProgress::Completed);
        assert!(state.is_game_over());
        assert_eq!(state.level, 2);
    }
}

//! Fixed timestep simulation tick
//!
//! Core game loop step: apply input, move the ball, resolve collisions, check
//! for level completion.

use serde::{Deserialize, Serialize};

use super::collision::{
    BallMotion, LevelProgress, brick_collisions, check_level_complete, move_ball,
    paddle_collision,
};
use super::input::{PaddleMove, move_paddle};
use super::state::{GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle moves received since the previous tick, in arrival order
    pub paddle_moves: Vec<PaddleMove>,
    /// Retry requested
    pub reset: bool,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Simulation advanced normally
    Playing,
    /// Ball dropped, chances remain
    LifeLost { remaining: u32 },
    /// Grid cleared, next level started
    LevelCleared { next_level: u32 },
    /// Game ended this tick
    GameOver,
    /// Already over; nothing simulated
    Frozen,
    /// Retry honoured, level 1 restarted
    Reset,
}

/// Advance the game state by one tick
///
/// Advisory events are appended to `events`. Nothing here fails: every state
/// reachable through the public API is a valid input.
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) -> TickOutcome {
    // The paddle answers input in every phase
    for &dir in &input.paddle_moves {
        move_paddle(state, dir);
    }

    if state.is_game_over() {
        if input.reset {
            state.reset_game();
            events.push(GameEvent::LevelStarted { level: state.level });
            return TickOutcome::Reset;
        }
        return TickOutcome::Frozen;
    }

    if input.reset {
        log::debug!("Reset ignored while playing");
    }

    state.time_ticks += 1;

    let mut outcome = TickOutcome::Playing;
    match move_ball(state) {
        BallMotion::Moved => {}
        BallMotion::Respawned { remaining } => {
            events.push(GameEvent::LifeLost { remaining });
            outcome = TickOutcome::LifeLost { remaining };
        }
        BallMotion::OutOfChances => {
            events.push(GameEvent::LifeLost { remaining: 0 });
            events.push(GameEvent::GameOver);
            return TickOutcome::GameOver;
        }
    }

    if paddle_collision(state) {
        events.push(GameEvent::PaddleHit);
    }

    brick_collisions(state, events);

    match check_level_complete(state) {
        LevelProgress::InProgress => outcome,
        LevelProgress::Advanced { level } => {
            events.push(GameEvent::LevelStarted { level });
            TickOutcome::LevelCleared { next_level: level }
        }
        LevelProgress::Completed => {
            events.push(GameEvent::GameWon);
            events.push(GameEvent::GameOver);
            TickOutcome::GameOver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::state::GamePhase;
    use glam::IVec2;

    fn run(state: &mut GameState, input: &TickInput) -> (TickOutcome, Vec<GameEvent>) {
        let mut events = Vec::new();
        let outcome = tick(state, input, &mut events);
        (outcome, events)
    }

    /// Leave a single brick far from the ball's path
    fn isolate_corner_brick(state: &mut GameState) {
        for (r, c, brick) in state.bricks.iter_mut() {
            brick.visible = r == 0 && c == 0;
        }
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut state = GameState::new(GameConfig::default());
        let (outcome, events) = run(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::Playing);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, IVec2::new(395, 285));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_moves_applied_before_ball() {
        let mut state = GameState::new(GameConfig::default());
        let input = TickInput {
            paddle_moves: vec![PaddleMove::Left, PaddleMove::Left],
            reset: false,
        };
        run(&mut state, &input);
        assert_eq!(state.paddle.pos.x, 125);
    }

    #[test]
    fn test_paddle_hit_scenario() {
        let mut state = GameState::new(GameConfig::default());
        isolate_corner_brick(&mut state);
        state.ball.vel = IVec2::new(5, 5);
        // Ball reaches the paddle row at x=640; put the paddle under it
        state.paddle.pos.x = 575;

        let mut hit = None;
        for i in 0..200 {
            let (outcome, events) = run(&mut state, &TickInput::default());
            assert_eq!(outcome, TickOutcome::Playing);
            if events.contains(&GameEvent::PaddleHit) {
                hit = Some(i);
                break;
            }
        }

        assert!(hit.is_some(), "ball never reached the paddle");
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
        assert!(state.ball.rect().intersects(&state.paddle.rect()));
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_chances, 2);
    }

    #[test]
    fn test_paddle_hit_from_default_serve() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
        assert_eq!(state.visible_bricks(), 50);
        let max_x = state.config.screen_width - state.paddle.width;

        let mut hit = false;
        for _ in 0..2000 {
            // Keep the paddle under the ball so no chance is lost
            let under_ball = state.ball.rect().center_x() - state.paddle.width / 2;
            state.paddle.pos.x = under_ball.clamp(0, max_x);

            let score = state.score;
            let vel = state.ball.vel;
            let (outcome, events) = run(&mut state, &TickInput::default());
            assert_eq!(outcome, TickOutcome::Playing);
            if events.contains(&GameEvent::PaddleHit) {
                assert!(vel.y > 0);
                assert_eq!(state.ball.vel.y, -vel.y);
                assert_eq!(state.score, score);
                hit = true;
                break;
            }
        }

        assert!(hit, "ball never reached the paddle");
        assert_eq!(state.remaining_chances, 2);
    }

    #[test]
    fn test_last_brick_scenario_clears_level() {
        let mut state = GameState::new(GameConfig::default());
        isolate_corner_brick(&mut state);
        // Next step overlaps brick (0, 0) from below-right
        state.ball.pos = IVec2::new(65, 70);
        state.ball.vel = IVec2::new(-5, -5);

        let (outcome, events) = run(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::LevelCleared { next_level: 2 });
        assert_eq!(
            events,
            vec![
                GameEvent::BrickBroken { row: 0, col: 0 },
                GameEvent::LevelStarted { level: 2 },
            ]
        );
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.visible_bricks(), 25);
    }

    #[test]
    fn test_last_brick_inverts_velocity_and_scores() {
        let config = GameConfig {
            max_level: 1,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config);
        isolate_corner_brick(&mut state);
        state.ball.pos = IVec2::new(65, 70);
        state.ball.vel = IVec2::new(-5, -5);

        let (outcome, events) = run(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::GameOver);
        assert!(events.contains(&GameEvent::GameWon));
        assert!(!state.bricks.get(0, 0).unwrap().visible);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel, IVec2::new(-5, 5));
    }

    #[test]
    fn test_losing_all_lives_freezes_ball() {
        let mut state = GameState::new(GameConfig::default());
        state.remaining_chances = 1;
        state.ball.pos = IVec2::new(100, 580);
        state.ball.vel = IVec2::new(5, 5);

        let (outcome, events) = run(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::GameOver);
        assert!(events.contains(&GameEvent::GameOver));
        assert!(state.is_game_over());

        let frozen = state.ball;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            let (outcome, _) = run(&mut state, &TickInput::default());
            assert_eq!(outcome, TickOutcome::Frozen);
        }
        assert_eq!(state.ball, frozen);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.visible_bricks() > 0);
    }

    #[test]
    fn test_life_lost_respawns() {
        let mut state = GameState::new(GameConfig::default());
        state.ball.pos = IVec2::new(100, 580);
        state.ball.vel = IVec2::new(5, 5);

        let (outcome, events) = run(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::LifeLost { remaining: 1 });
        assert_eq!(events, vec![GameEvent::LifeLost { remaining: 1 }]);
        assert_eq!(state.ball.pos, IVec2::new(390, 290));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = GameState::new(GameConfig::default());
        state.start_level(2);
        state.paddle.pos.x = 625;
        state.remaining_chances = 1;
        state.ball.pos = IVec2::new(100, 580);
        state.ball.vel = IVec2::new(5, 5);
        run(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        let (outcome, events) = run(&mut state, &input);
        assert_eq!(outcome, TickOutcome::Reset);
        assert_eq!(events, vec![GameEvent::LevelStarted { level: 1 }]);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_chances, 2);
        assert!(!state.is_game_over());
        assert_eq!(state.visible_bricks(), 50);
        assert_eq!(state.paddle.pos.x, 625);
    }

    #[test]
    fn test_reset_ignored_while_playing() {
        let mut state = GameState::new(GameConfig::default());
        state.bricks.get_mut(4, 4).unwrap().visible = false;
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        let (outcome, _) = run(&mut state, &input);
        assert_eq!(outcome, TickOutcome::Playing);
        assert_eq!(state.visible_bricks(), 49);
    }

    #[test]
    fn test_paddle_moves_during_game_over() {
        let mut state = GameState::new(GameConfig::default());
        state.phase = GamePhase::GameOver;
        let input = TickInput {
            paddle_moves: vec![PaddleMove::Right],
            reset: false,
        };
        let (outcome, _) = run(&mut state, &input);
        assert_eq!(outcome, TickOutcome::Frozen);
        assert_eq!(state.paddle.pos.x, 425);
    }
}

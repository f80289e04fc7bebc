//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. Velocities are in units
//! per tick, so there is no `dt` scaling and no sub-stepping: a fast enough
//! ball can tunnel through a thin brick.

use glam::Vec2;

use super::collision::{circle_rect_overlap, reflect};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
///
/// Movement flags are held state sampled every frame; the rest are one-shot
/// key presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Resume; ignored unless paused
    pub resume: bool,
    /// Start over immediately. Handled by the session, not by [`tick`].
    pub new_game: bool,
    /// Remove every breakable brick (debug)
    pub clear_breakable: bool,
}

impl TickInput {
    /// Paddle direction: -1, 0 or 1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Transition signal produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep going (running or paused)
    Continue,
    /// Ball left through the bottom
    GameOver,
    /// Every breakable brick is gone
    LevelComplete,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    match state.phase {
        GamePhase::GameOver => return TickOutcome::GameOver,
        GamePhase::LevelComplete => return TickOutcome::LevelComplete,
        _ => {}
    }

    // Commands, pause before resume
    if input.toggle_pause {
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            _ => GamePhase::Running,
        };
    }
    if input.resume && state.phase == GamePhase::Paused {
        state.phase = GamePhase::Running;
    }

    if input.clear_breakable {
        let removed = state.clear_breakable();
        log::debug!("Debug clear removed {} bricks", removed);
    }

    if state.phase == GamePhase::Paused {
        return TickOutcome::Continue;
    }

    state.time_ticks += 1;

    // Paddle
    state.paddle.step(input.direction());

    // Ball
    state.ball.pos += state.ball.vel;

    collide_walls(state);
    collide_paddle(state);
    collide_bricks(state);

    // Terminal conditions
    if state.ball.bottom() > state.tuning.arena_height {
        state.phase = GamePhase::GameOver;
        return TickOutcome::GameOver;
    }
    if state.breakable_remaining() == 0 {
        state.phase = GamePhase::LevelComplete;
        return TickOutcome::LevelComplete;
    }

    TickOutcome::Continue
}

/// Side and top walls; the bottom is open
///
/// Touching or overlapping a wall flips the matching velocity component
/// whatever its sign, so a ball still past the wall next frame flips again.
fn collide_walls(state: &mut GameState) {
    let width = state.tuning.arena_width();
    let ball = &mut state.ball;

    if ball.left() <= 0.0 || ball.right() >= width {
        ball.vel = reflect(ball.vel, Vec2::X);
    }

    if ball.top() <= 0.0 {
        ball.vel = reflect(ball.vel, Vec2::Y);
    }
}

/// Flat paddle: the bounce ignores where on the paddle the ball lands
///
/// Any frame that ends with the ball's center inside the paddle reflects,
/// including the frame after a bounce.
fn collide_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    if state.paddle.rect().contains_strict(ball.pos) {
        ball.vel = reflect(ball.vel, Vec2::NEG_Y);
    }
}

/// Every overlapping brick reflects the ball and is removed
///
/// Hits are resolved one after another against the velocity left by the
/// previous hit, so touching two bricks in one frame reflects twice.
fn collide_bricks(state: &mut GameState) {
    let ball = &mut state.ball;
    state.bricks.retain(|brick| {
        if !circle_rect_overlap(&brick.rect, ball.pos, ball.radius) {
            return true;
        }
        let normal = if brick.rect.spans_x(ball.pos.x) {
            // Top or bottom face
            Vec2::Y
        } else {
            // Left or right face
            Vec2::X
        };
        ball.vel = reflect(ball.vel, normal);
        false
    });
}

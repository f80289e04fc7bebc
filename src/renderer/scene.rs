//! Scene assembly
//!
//! Turns a [`GameState`] into one triangle list in arena coordinates. Pure,
//! so what gets drawn can be tested without a GPU.

use glam::Vec2;

use super::shapes::{circle, line, rect};
use super::text::draw_text_centered;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Thickness of paddle and brick accent lines
const EDGE_WIDTH: f32 = 3.0;
const STAR_RADIUS: f32 = 1.0;
const STAR_SEGMENTS: u32 = 6;
const BALL_SEGMENTS: u32 = 24;
/// Font pixel size for overlay messages
const TEXT_SCALE: f32 = 4.0;

/// Phase-specific layer drawn over the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    None,
    Paused,
    /// End-of-session fade with a centered message
    Fade { alpha: f32, message: &'static str },
}

/// Build the full draw list for one frame
pub fn build(state: &GameState, overlay: Overlay, starfield: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    if starfield {
        for star in &state.starfield.stars {
            vertices.extend(circle(*star, STAR_RADIUS, colors::STAR, STAR_SEGMENTS));
        }
    }

    // Paddle with edge lines top and bottom
    let paddle = state.paddle.rect();
    vertices.extend(rect(&paddle, colors::PADDLE));
    vertices.extend(line(
        paddle.min,
        Vec2::new(paddle.right(), paddle.top()),
        EDGE_WIDTH,
        colors::PADDLE_EDGE,
    ));
    vertices.extend(line(
        Vec2::new(paddle.left(), paddle.bottom()),
        paddle.max(),
        EDGE_WIDTH,
        colors::PADDLE_EDGE,
    ));

    // Ball, snapped to whole units
    let ball = &state.ball;
    vertices.extend(circle(
        ball.pos.trunc(),
        ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    // Bricks: shadow along the bottom, highlight down the left side
    for brick in &state.bricks {
        let r = &brick.rect;
        vertices.extend(rect(r, colors::BRICK));
        vertices.extend(line(
            Vec2::new(r.left(), r.bottom()),
            r.max(),
            EDGE_WIDTH,
            colors::BRICK_SHADOW,
        ));
        vertices.extend(line(
            r.min,
            Vec2::new(r.left(), r.bottom()),
            EDGE_WIDTH,
            colors::BRICK_HIGHLIGHT,
        ));
    }

    let arena = state.arena();
    let center = arena.min + arena.size / 2.0;
    match overlay {
        Overlay::None => {}
        Overlay::Paused => {
            vertices.extend(draw_text_centered("PAUSED", center, TEXT_SCALE, colors::TEXT));
        }
        Overlay::Fade { alpha, message } => {
            vertices.extend(rect(&arena, colors::overlay(alpha)));
            vertices.extend(draw_text_centered(message, center, TEXT_SCALE, colors::TEXT));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    const PADDLE_VERTS: usize = 18;
    const BALL_VERTS: usize = BALL_SEGMENTS as usize * 3;
    const BRICK_VERTS: usize = 18;

    fn state() -> GameState {
        GameState::new(3, &Tuning::default())
    }

    #[test]
    fn test_vertex_count_tracks_bricks() {
        let mut state = state();
        let full = build(&state, Overlay::None, false);
        assert_eq!(full.len(), PADDLE_VERTS + BALL_VERTS + 120 * BRICK_VERTS);

        state.bricks.pop();
        let fewer = build(&state, Overlay::None, false);
        assert_eq!(full.len() - fewer.len(), BRICK_VERTS);
    }

    #[test]
    fn test_starfield_toggle() {
        let state = state();
        let with = build(&state, Overlay::None, true);
        let without = build(&state, Overlay::None, false);
        assert_eq!(
            with.len() - without.len(),
            state.starfield.stars.len() * STAR_SEGMENTS as usize * 3
        );
    }

    #[test]
    fn test_paused_overlay_adds_text_only() {
        let state = state();
        let plain = build(&state, Overlay::None, false);
        let paused = build(&state, Overlay::Paused, false);
        assert!(paused.len() > plain.len());
        assert!(paused[plain.len()..].iter().all(|v| v.color == colors::TEXT));
    }

    #[test]
    fn test_fade_overlay_covers_arena_at_alpha() {
        let state = state();
        let plain = build(&state, Overlay::None, false);
        let faded = build(
            &state,
            Overlay::Fade {
                alpha: 0.5,
                message: "GAME OVER",
            },
            false,
        );

        let veil = &faded[plain.len()..plain.len() + 6];
        assert!(veil.iter().all(|v| v.color == colors::overlay(0.5)));
        let max_x = veil.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = veil.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 720.0);
        assert_eq!(max_y, 800.0);

        // Message is drawn over the veil
        assert!(faded.last().unwrap().color == colors::TEXT);
    }
}

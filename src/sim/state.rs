//! Game state and core simulation types
//!
//! A [`GameState`] is one session's worth of entities. It is built fresh for
//! every new game and is never reset in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball in play
    Running,
    /// Simulation frozen until resumed
    Paused,
    /// Ball left through the bottom of the arena
    GameOver,
    /// No breakable bricks remain
    LevelComplete,
}

impl GamePhase {
    /// Terminal phases are never left; the session is replaced instead
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::LevelComplete)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the arena center heading off at `angle` (radians, y down)
    pub fn launched(tuning: &Tuning, angle: f32) -> Self {
        let center = Vec2::new(
            (tuning.arena_width() / 2.0).floor(),
            (tuning.arena_height / 2.0).floor(),
        );
        Self {
            pos: center,
            vel: Vec2::from_angle(angle) * tuning.base_ball_speed,
            radius: tuning.ball_radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units per tick while a movement key is held
    pub speed: f32,
    /// Largest legal `x`
    max_x: f32,
}

impl Paddle {
    /// Paddle centered on the bottom row
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            x: (tuning.arena_width() / 2.0).floor() - (tuning.paddle_width / 2.0).floor(),
            y: tuning.paddle_y(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed(),
            max_x: tuning.paddle_max_x(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Step by `direction * speed` if the result stays inside the arena
    ///
    /// `direction` is -1, 0 or 1. Movement has no inertia, and a step that
    /// would cross a wall is dropped whole, so the paddle can stop short of it.
    pub fn step(&mut self, direction: f32) {
        let x = self.x + direction * self.speed;
        if (0.0..=self.max_x).contains(&x) {
            self.x = x;
        }
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrickKind {
    /// Counts toward clearing the level
    #[default]
    Standard,
    /// Destroyed on hit like any other brick, but does not need to be
    /// cleared to finish the level
    Special,
}

/// A brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
}

impl Brick {
    pub fn new(rect: Rect, kind: BrickKind) -> Self {
        Self { rect, kind }
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind == BrickKind::Standard
    }
}

/// Build the full brick grid, row-major from the top-left
pub fn brick_grid(tuning: &Tuning) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity((tuning.row_count * tuning.bricks_per_row) as usize);
    for row in 0..tuning.row_count {
        for col in 0..tuning.bricks_per_row {
            let rect = Rect::new(
                col as f32 * tuning.brick_width,
                row as f32 * tuning.brick_height,
                tuning.brick_width,
                tuning.brick_height,
            );
            bricks.push(Brick::new(rect, BrickKind::Standard));
        }
    }
    bricks
}

/// Decorative background stars (no gameplay effect)
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Vec2>,
    /// Milliseconds accumulated since the last jitter
    timer_ms: f32,
}

impl Starfield {
    /// Scatter `count` stars at integer positions over the arena
    pub fn scatter(rng: &mut Pcg32, count: usize, width: f32, height: f32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let stars = (0..count)
            .map(|_| {
                Vec2::new(
                    rng.random_range(0..=w) as f32,
                    rng.random_range(0..=h) as f32,
                )
            })
            .collect();
        Self {
            stars,
            timer_ms: 0.0,
        }
    }

    /// Accumulate elapsed time and jitter every star once the interval passes
    ///
    /// Returns true if the stars moved.
    pub fn advance(&mut self, rng: &mut Pcg32, elapsed_ms: f32) -> bool {
        self.timer_ms += elapsed_ms;
        if self.timer_ms < STAR_INTERVAL_MS {
            return false;
        }
        self.timer_ms = 0.0;
        for star in &mut self.stars {
            let dx = rng.random_range(-STAR_JITTER..=STAR_JITTER) as f32;
            let dy = rng.random_range(-STAR_JITTER..=STAR_JITTER) as f32;
            *star += Vec2::new(dx, dy) * STAR_JITTER_SCALE;
        }
        true
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gameplay constants this session was built from
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Remaining bricks; removal is permanent
    pub bricks: Vec<Brick>,
    pub starfield: Starfield,
    /// Session RNG (launch angle, starfield)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session: full grid, centered paddle, random downward launch
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        use std::f32::consts::FRAC_PI_4;

        let mut rng = Pcg32::seed_from_u64(seed);
        let angle = rng.random_range(FRAC_PI_4..=3.0 * FRAC_PI_4);
        let starfield =
            Starfield::scatter(&mut rng, STAR_COUNT, tuning.arena_width(), tuning.arena_height);

        Self {
            seed,
            tuning: tuning.clone(),
            phase: GamePhase::Running,
            time_ticks: 0,
            ball: Ball::launched(tuning, angle),
            paddle: Paddle::centered(tuning),
            bricks: brick_grid(tuning),
            starfield,
            rng,
        }
    }

    /// Arena bounds
    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.arena_width(), self.tuning.arena_height)
    }

    /// Number of bricks that still have to be destroyed
    pub fn breakable_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.counts_for_clear()).count()
    }

    /// Remove every breakable brick (debug shortcut)
    pub fn clear_breakable(&mut self) -> usize {
        let before = self.bricks.len();
        self.bricks.retain(|b| !b.counts_for_clear());
        before - self.bricks.len()
    }

    /// Advance the starfield by one frame of running time
    pub fn advance_starfield(&mut self, elapsed_ms: f32) -> bool {
        self.starfield.advance(&mut self.rng, elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let tuning = Tuning::default();
        let state = GameState::new(12345, &tuning);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bricks.len(), 120);
        assert_eq!(state.breakable_remaining(), 120);
        assert_eq!(state.ball.pos, Vec2::new(360.0, 400.0));
        assert_eq!(state.paddle.x, 300.0);
        assert_eq!(state.paddle.y, 780.0);
        assert_eq!(state.starfield.stars.len(), STAR_COUNT);

        // First row, last column and last row, first column
        assert_eq!(state.bricks[11].rect, Rect::new(660.0, 0.0, 60.0, 20.0));
        assert_eq!(state.bricks[108].rect, Rect::new(0.0, 180.0, 60.0, 20.0));
    }

    #[test]
    fn test_launch_is_downward_cone_at_base_speed() {
        let tuning = Tuning::default();
        for seed in 0..200 {
            let state = GameState::new(seed, &tuning);
            let vel = state.ball.vel;
            assert!((vel.length() - tuning.base_ball_speed).abs() < 1e-4);
            // Within 45 degrees of straight down
            assert!(vel.y >= vel.x.abs() - 1e-4, "seed {seed}: {vel:?}");
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let tuning = Tuning::default();
        let a = GameState::new(99999, &tuning);
        let b = GameState::new(99999, &tuning);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.starfield.stars, b.starfield.stars);
    }

    #[test]
    fn test_paddle_stays_in_bounds() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::centered(&tuning);

        paddle.x = 0.0;
        paddle.step(-1.0);
        assert_eq!(paddle.x, 0.0);

        paddle.x = paddle.max_x();
        paddle.step(1.0);
        assert_eq!(paddle.x, tuning.arena_width() - tuning.paddle_width);

        // A step that would cross the wall is dropped
        paddle.x = 5.0;
        paddle.step(-1.0);
        assert_eq!(paddle.x, 5.0);
        paddle.x = paddle.max_x() - 5.0;
        paddle.step(1.0);
        assert_eq!(paddle.x, paddle.max_x() - 5.0);
    }

    #[test]
    fn test_paddle_from_center_stops_short_of_wall() {
        let mut paddle = Paddle::centered(&Tuning::default());
        for _ in 0..100 {
            paddle.step(-1.0);
        }
        // 300 - 26 * 11.25
        assert_eq!(paddle.x, 7.5);
    }

    #[test]
    fn test_clear_breakable_keeps_special() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.bricks[0].kind = BrickKind::Special;

        assert_eq!(state.clear_breakable(), 119);
        assert_eq!(state.bricks.len(), 1);
        assert_eq!(state.breakable_remaining(), 0);
    }

    #[test]
    fn test_starfield_jitters_on_interval() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        let before = state.starfield.stars.clone();

        assert!(!state.advance_starfield(STAR_INTERVAL_MS - 1.0));
        assert_eq!(state.starfield.stars, before);

        assert!(state.advance_starfield(1.0));
        let max_offset = STAR_JITTER as f32 * STAR_JITTER_SCALE;
        for (old, new) in before.iter().zip(&state.starfield.stars) {
            let d = *new - *old;
            assert!(d.x.abs() <= max_offset && d.y.abs() <= max_offset);
            assert_eq!(d.x % STAR_JITTER_SCALE, 0.0);
        }

        // Timer restarts after a jitter
        assert!(!state.advance_starfield(STAR_INTERVAL_MS / 2.0));
    }
}

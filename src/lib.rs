//! Brick Breaker - A single-screen brick breaker arcade game
//!
//! Core modules:
//! - `sim`: Frame-locked simulation (motion, collisions, win/loss detection)
//! - `session`: Session state machine, pacing and restart signalling
//! - `renderer`: Draw list construction and the WebGPU pipeline
//! - `platform`: Keyboard mapping and frame pacing shared by web and native
//! - `tuning`: Data-driven gameplay constants

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{Session, SessionSignal};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// One simulation tick; velocities are expressed in units per tick
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Frame rate while the ball is in play
    pub const RUNNING_FPS: u32 = 60;
    /// Frame rate while paused (nothing moves, so redraw rarely)
    pub const PAUSED_FPS: u32 = 5;

    /// Brick grid defaults
    pub const BRICKS_PER_ROW: u32 = 12;
    pub const ROW_COUNT: u32 = 10;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Arena height; width is always `BRICKS_PER_ROW * BRICK_WIDTH`
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BASE_BALL_SPEED: f32 = 7.5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Paddle speed as a multiple of ball speed
    pub const PADDLE_SPEED_FACTOR: f32 = 1.5;

    /// Starfield
    pub const STAR_COUNT: usize = 100;
    pub const STAR_INTERVAL_MS: f32 = 500.0;
    /// Jitter offset is `STAR_JITTER_SCALE * k` for `k` in `[-STAR_JITTER, STAR_JITTER]`
    pub const STAR_JITTER: i32 = 3;
    pub const STAR_JITTER_SCALE: f32 = 3.0;

    /// End-of-session fade: alpha climbs 0, 10, ... 250 (of 255), one step per 30 ms
    pub const FADE_STEP_MS: f32 = 30.0;
    pub const FADE_ALPHA_STEP: u32 = 10;
    pub const FADE_ALPHA_MAX: u32 = 255;
    /// Hold on the final fade frame before the next session starts
    pub const HOLD_MS: f32 = 2000.0;
}

/// Fresh random seed for a new session
#[inline]
pub fn random_seed() -> u64 {
    rand::random()
}

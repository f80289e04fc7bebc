//! Frame-locked simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, velocities in units per tick
//! - Seeded RNG only
//! - Stable brick iteration order (row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap, reflect};
pub use state::{Ball, Brick, BrickKind, GamePhase, GameState, Paddle, Starfield, brick_grid};
pub use tick::{TickInput, TickOutcome, tick};

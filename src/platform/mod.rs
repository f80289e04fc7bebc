//! Platform abstraction layer
//!
//! Pieces shared by the browser and native front ends:
//! - Keyboard mapping and held-key tracking
//! - Frame pacing against a millisecond clock

pub mod input;
pub mod pacing;

pub use input::{Controls, Key};
pub use pacing::FramePacer;

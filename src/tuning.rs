//! Data-driven gameplay constants
//!
//! Every field defaults to the values in [`crate::consts`]. Derived
//! quantities (arena width, paddle speed, paddle row) are computed, never
//! stored, so a tuning file cannot make them disagree.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bricks_per_row: u32,
    pub row_count: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub arena_height: f32,
    pub ball_radius: f32,
    /// Ball speed in units per tick
    pub base_ball_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bricks_per_row: BRICKS_PER_ROW,
            row_count: ROW_COUNT,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            arena_height: ARENA_HEIGHT,
            ball_radius: BALL_RADIUS,
            base_ball_speed: BASE_BALL_SPEED,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed_factor: PADDLE_SPEED_FACTOR,
        }
    }
}

impl Tuning {
    /// Arena width: the brick grid spans it exactly
    #[inline]
    pub fn arena_width(&self) -> f32 {
        self.bricks_per_row as f32 * self.brick_width
    }

    #[inline]
    pub fn paddle_speed(&self) -> f32 {
        self.paddle_speed_factor * self.base_ball_speed
    }

    /// Top edge of the paddle row
    #[inline]
    pub fn paddle_y(&self) -> f32 {
        self.arena_height - 2.0 * self.paddle_height
    }

    /// Rightmost legal paddle x
    #[inline]
    pub fn paddle_max_x(&self) -> f32 {
        self.arena_width() - self.paddle_width
    }

    /// Reject tunings that would produce an unplayable arena
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("arena_height", self.arena_height),
            ("ball_radius", self.ball_radius),
            ("base_ball_speed", self.base_ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed_factor", self.paddle_speed_factor),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be positive and finite, got {value}");
            }
        }

        if self.bricks_per_row == 0 || self.row_count == 0 {
            bail!(
                "brick grid must be non-empty, got {}x{}",
                self.row_count,
                self.bricks_per_row
            );
        }

        if self.paddle_width > self.arena_width() {
            bail!(
                "paddle_width {} exceeds arena width {}",
                self.paddle_width,
                self.arena_width()
            );
        }

        // Ball launches from the arena center and must clear the grid
        let grid_bottom = self.row_count as f32 * self.brick_height;
        let center_y = (self.arena_height / 2.0).floor();
        if center_y - self.ball_radius <= grid_bottom {
            bail!(
                "brick grid bottom {} overlaps the ball spawn at y={}",
                grid_bottom,
                center_y
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constant_set() {
        let t = Tuning::default();
        assert_eq!(t.arena_width(), 720.0);
        assert_eq!(t.arena_height, 800.0);
        assert!((t.paddle_speed() - 11.25).abs() < 1e-6);
        assert_eq!(t.paddle_y(), 780.0);
        assert_eq!(t.paddle_max_x(), 600.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let t = Tuning {
            ball_radius: 0.0,
            ..Default::default()
        };
        assert!(t.validate().is_err());

        let t = Tuning {
            paddle_width: 1000.0,
            ..Default::default()
        };
        assert!(t.validate().is_err());

        let t = Tuning {
            row_count: 0,
            ..Default::default()
        };
        assert!(t.validate().is_err());

        let t = Tuning {
            base_ball_speed: f32::NAN,
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_grid_over_spawn() {
        let t = Tuning {
            row_count: 25,
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t: Tuning = serde_json::from_str(r#"{ "base_ball_speed": 5.0 }"#).unwrap();
        assert_eq!(t.base_ball_speed, 5.0);
        assert_eq!(t.bricks_per_row, BRICKS_PER_ROW);
        assert!((t.paddle_speed() - 7.5).abs() < 1e-6);
    }
}

//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the arena is either a circle (the ball) or an axis-aligned
//! rectangle (paddle, bricks), so two pure functions cover all of it.

use glam::Vec2;

/// Axis-aligned rectangle in arena coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Closest point on (or in) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }

    /// Strict containment on both axes; points on the border are outside
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        self.left() < p.x && p.x < self.right() && self.top() < p.y && p.y < self.bottom()
    }

    /// Inclusive test on the horizontal span only
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.left() <= x && x <= self.right()
    }
}

/// Check whether a circle overlaps a rectangle
///
/// Clamps the circle center onto the rectangle and compares the distance to
/// that closest point against the radius. Touching exactly at `radius` is
/// not an overlap.
#[inline]
pub fn circle_rect_overlap(rect: &Rect, center: Vec2, radius: f32) -> bool {
    debug_assert!(radius >= 0.0, "negative radius {radius}");
    rect.closest_point(center).distance(center) < radius
}

/// Reflect a vector about a surface with unit normal `normal`
///
/// The caller guarantees `normal` is unit length; with that guarantee the
/// result has the same length as `v`.
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    debug_assert!(
        (normal.length_squared() - 1.0).abs() < 1e-4,
        "reflection normal must be unit length, got {normal:?}"
    );
    v - 2.0 * v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_known_values() {
        let r = reflect(Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0));
        assert!((r - Vec2::new(1.0, -1.0)).length() < 1e-6);

        let r = reflect(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 0.0));
        assert!((r - Vec2::new(1.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_reflect_sign_of_normal_is_irrelevant() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(reflect(v, Vec2::Y), reflect(v, Vec2::NEG_Y));
    }

    #[test]
    fn test_overlap_boundary() {
        let rect = Rect::new(0.0, 0.0, 60.0, 20.0);
        let radius = 10.0;
        let eps = 1e-3;

        // Directly below the bottom edge
        assert!(circle_rect_overlap(&rect, Vec2::new(30.0, 20.0 + radius - eps), radius));
        assert!(!circle_rect_overlap(&rect, Vec2::new(30.0, 20.0 + radius + eps), radius));

        // Diagonal from the bottom-right corner
        let diag = Vec2::new(1.0, 1.0).normalize();
        let inside = Vec2::new(60.0, 20.0) + diag * (radius - eps);
        let outside = Vec2::new(60.0, 20.0) + diag * (radius + eps);
        assert!(circle_rect_overlap(&rect, inside, radius));
        assert!(!circle_rect_overlap(&rect, outside, radius));
    }

    #[test]
    fn test_overlap_center_inside_rect() {
        let rect = Rect::new(100.0, 100.0, 60.0, 20.0);
        assert!(circle_rect_overlap(&rect, Vec2::new(130.0, 110.0), 10.0));
    }

    #[test]
    fn test_contains_strict_excludes_border() {
        let rect = Rect::new(300.0, 780.0, 120.0, 10.0);
        assert!(rect.contains_strict(Vec2::new(360.0, 785.0)));
        assert!(!rect.contains_strict(Vec2::new(300.0, 785.0)));
        assert!(!rect.contains_strict(Vec2::new(360.0, 780.0)));
        assert!(!rect.contains_strict(Vec2::new(420.0, 790.0)));
    }

    #[test]
    fn test_spans_x_is_inclusive() {
        let rect = Rect::new(60.0, 0.0, 60.0, 20.0);
        assert!(rect.spans_x(60.0));
        assert!(rect.spans_x(120.0));
        assert!(!rect.spans_x(59.9));
    }

    fn axis_normal() -> impl Strategy<Value = Vec2> {
        prop_oneof![
            Just(Vec2::X),
            Just(Vec2::NEG_X),
            Just(Vec2::Y),
            Just(Vec2::NEG_Y),
        ]
    }

    proptest! {
        #[test]
        fn prop_reflection_conserves_speed(
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 0.1f32..50.0,
            normals in prop::collection::vec(axis_normal(), 1..64),
        ) {
            let mut v = Vec2::from_angle(angle) * speed;
            for n in normals {
                v = reflect(v, n);
            }
            prop_assert!((v.length() - speed).abs() < 1e-3 * speed.max(1.0));
        }

        #[test]
        fn prop_reflection_is_involution(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            normal in axis_normal(),
        ) {
            let v = Vec2::new(x, y);
            let back = reflect(reflect(v, normal), normal);
            prop_assert!((back - v).length() < 1e-3);
        }
    }
}

//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in arena coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        r.min,
        Vec2::new(r.right(), r.top()),
        r.max(),
        Vec2::new(r.left(), r.bottom()),
        color,
    )
}

/// Generate vertices for a line segment `width` units thick, centered on `a`-`b`
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let half = dir.perp() * (width / 2.0);
    quad(a + half, b + half, b - half, a - half, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Two triangles over four corners given in winding order
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(&Rect::new(10.0, 20.0, 60.0, 20.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 70.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 40.0);
    }

    #[test]
    fn test_horizontal_line_thickness() {
        let v = line(Vec2::new(0.0, 10.0), Vec2::new(100.0, 10.0), 3.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        for vertex in &v {
            assert!((vertex.position[1] - 10.0).abs() <= 1.5 + 1e-5);
        }
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        let p = Vec2::new(5.0, 5.0);
        assert!(line(p, p, 3.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 10.0, [1.0; 4], 24).len(), 72);
    }
}

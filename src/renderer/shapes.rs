//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in playfield pixels
//! (top-left origin, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    gradient_rect(out, x, y, w, h, color, color);
}

/// Rectangle fading from `top` color to `bottom` color
pub fn gradient_rect(
    out: &mut Vec<Vertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let tl = Vertex::new(x, y, top);
    let tr = Vertex::new(x + w, y, top);
    let bl = Vertex::new(x, y + h, bottom);
    let br = Vertex::new(x + w, y + h, bottom);
    out.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::at(center, color));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }
}

/// Rounded hill silhouette (half-disc resting on `base_y`)
pub fn hill(out: &mut Vec<Vertex>, center_x: f32, base_y: f32, radius: f32, color: [f32; 4]) {
    let segments = 16;
    let center = Vec2::new(center_x, base_y);
    for i in 0..segments {
        let theta1 = PI + (i as f32 / segments as f32) * PI;
        let theta2 = PI + ((i + 1) as f32 / segments as f32) * PI;
        out.push(Vertex::at(center, color));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, 10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
    }

    #[test]
    fn test_degenerate_rect_skipped() {
        let mut out = Vec::new();
        rect(&mut out, 0.0, 0.0, 0.0, 10.0, [1.0; 4]);
        rect(&mut out, 0.0, 0.0, 10.0, -1.0, [1.0; 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        circle(&mut out, center, 10.0, [1.0; 4], 24);
        assert_eq!(out.len(), 72);
        for v in &out {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_hill_above_base() {
        let mut out = Vec::new();
        hill(&mut out, 100.0, 500.0, 80.0, [1.0; 4]);
        assert!(out.iter().all(|v| v.position[1] <= 500.0 + 1e-3));
    }
}

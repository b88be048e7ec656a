//! Vertex types and triangle tessellation for 2D rendering
//!
//! `tessellate` turns a frame's primitive list into a flat triangle list a
//! GPU backend can upload as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::PI;

use super::primitive::{DrawPrimitive, Stroke};

/// Segments used for full circles
const CIRCLE_SEGMENTS: u32 = 32;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }
}

/// Triangle list for every primitive, in paint order
pub fn tessellate(primitives: &[DrawPrimitive]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for prim in primitives {
        let color = prim.color().to_f32_array();
        match prim {
            DrawPrimitive::Polygon { points, .. } => polygon(&mut vertices, points, color),
            DrawPrimitive::LineStrip { points, width, .. } => {
                for pair in points.windows(2) {
                    segment(&mut vertices, pair[0], pair[1], *width, color);
                }
            }
            DrawPrimitive::Circle {
                center,
                radius,
                stroke,
                ..
            } => match stroke {
                Stroke::Fill => circle(&mut vertices, *center, *radius, color, CIRCLE_SEGMENTS),
                Stroke::Outline(width) => {
                    let inner = (radius - width / 2.0).max(0.0);
                    ring(&mut vertices, *center, inner, radius + width / 2.0, color, CIRCLE_SEGMENTS)
                }
            },
            DrawPrimitive::Rect {
                min, size, stroke, ..
            } => {
                let corners = [
                    *min,
                    *min + Vec2::new(size.x, 0.0),
                    *min + *size,
                    *min + Vec2::new(0.0, size.y),
                ];
                match stroke {
                    Stroke::Fill => quad(&mut vertices, corners, color),
                    Stroke::Outline(width) => {
                        for i in 0..4 {
                            segment(&mut vertices, corners[i], corners[(i + 1) % 4], *width, color);
                        }
                    }
                }
            }
        }
    }
    vertices
}

/// Fan from the vertex centroid; correct for convex and star-shaped outlines
fn polygon(out: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 3 {
        return;
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    for i in 0..points.len() {
        let next = points[(i + 1) % points.len()];
        out.push(Vertex::at(centroid, color));
        out.push(Vertex::at(points[i], color));
        out.push(Vertex::at(next, color));
    }
}

fn quad(out: &mut Vec<Vertex>, [a, b, c, d]: [Vec2; 4], color: [f32; 4]) {
    out.extend_from_slice(&[
        Vertex::at(a, color),
        Vertex::at(b, color),
        Vertex::at(c, color),
        Vertex::at(c, color),
        Vertex::at(d, color),
        Vertex::at(a, color),
    ]);
}

/// Thick line segment as a quad of `width`
fn segment(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(out, [from + perp, to + perp, to - perp, from - perp], color);
}

/// Filled circle as a triangle fan
fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::at(center, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }
}

/// Hollow circle
fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let a1 = Vec2::from_angle((i as f32 / segments as f32) * 2.0 * PI);
        let a2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * 2.0 * PI);

        let inner1 = center + a1 * inner_radius;
        let outer1 = center + a1 * outer_radius;
        let inner2 = center + a2 * inner_radius;
        let outer2 = center + a2 * outer_radius;

        // Two triangles per segment
        out.extend_from_slice(&[
            Vertex::at(inner1, color),
            Vertex::at(outer1, color),
            Vertex::at(inner2, color),
            Vertex::at(inner2, color),
            Vertex::at(outer1, color),
            Vertex::at(outer2, color),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::palette;

    #[test]
    fn test_vertex_is_pod() {
        let v = Vertex::new(1.0, 2.0, [0.5, 0.5, 0.5, 1.0]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_triangle_counts() {
        let prims = vec![
            DrawPrimitive::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y], palette::RED),
            DrawPrimitive::circle(Vec2::ZERO, 5.0, palette::RED),
            DrawPrimitive::ring(Vec2::ZERO, 5.0, palette::RED, 2.0),
            DrawPrimitive::square(Vec2::ZERO, 1.0, palette::RED, Stroke::Fill),
            DrawPrimitive::square(Vec2::ZERO, 1.0, palette::RED, Stroke::Outline(1.0)),
            DrawPrimitive::polyline(vec![Vec2::ZERO, Vec2::X, Vec2::ONE], palette::RED, 3.0),
        ];
        let counts: Vec<usize> = prims.iter().map(|p| tessellate(std::slice::from_ref(p)).len()).collect();
        let segments = CIRCLE_SEGMENTS as usize;
        assert_eq!(counts, vec![9, segments * 3, segments * 6, 6, 24, 12]);
        assert_eq!(tessellate(&prims).len(), counts.iter().sum::<usize>());
    }

    #[test]
    fn test_degenerate_primitives_emit_nothing() {
        let prims = vec![
            DrawPrimitive::polygon(vec![Vec2::ZERO, Vec2::X], palette::RED),
            DrawPrimitive::line(Vec2::ONE, Vec2::ONE, palette::RED, 2.0),
        ];
        assert!(tessellate(&prims).is_empty());
    }

    #[test]
    fn test_line_quad_has_stroke_width() {
        let verts = tessellate(&[DrawPrimitive::line(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            palette::WHITE,
            4.0,
        )]);
        assert_eq!(verts[0].position, [0.0, 2.0]);
        assert_eq!(verts[2].position, [10.0, -2.0]);
        assert_eq!(verts[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_polyline_stays_open() {
        let path = vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        let verts = tessellate(&[DrawPrimitive::polyline(path, palette::RED, 1.0)]);
        // Three segments, none from the last point back to the first
        assert_eq!(verts.len(), 18);
        assert!(verts.iter().all(|v| v.position[0] >= -0.5));
    }

    #[test]
    fn test_alpha_carried_to_vertices() {
        let verts = tessellate(&[DrawPrimitive::circle(
            Vec2::ZERO,
            1.0,
            palette::YELLOW.with_alpha(0),
        )]);
        assert!(verts.iter().all(|v| v.color[3] == 0.0));
    }
}

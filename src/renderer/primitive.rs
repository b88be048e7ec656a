//! Render-API-agnostic draw primitives
//!
//! A frame is a flat list of these, painted in order (later entries on top).

use glam::Vec2;

use crate::sim::state::Color;

/// How a closed primitive is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Fill,
    /// Outline only, with this width in pixels
    Outline(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// Filled polygon (convex or simple; tessellated as a fan)
    Polygon { points: Vec<Vec2>, color: Color },
    /// Open polyline of `width` pixels
    LineStrip {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        stroke: Stroke,
    },
    /// Axis-aligned rectangle with its top-left corner at `min`
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
        stroke: Stroke,
    },
}

impl DrawPrimitive {
    pub fn polygon(points: Vec<Vec2>, color: Color) -> Self {
        Self::Polygon { points, color }
    }

    pub fn line(from: Vec2, to: Vec2, color: Color, width: f32) -> Self {
        Self::LineStrip {
            points: vec![from, to],
            color,
            width,
        }
    }

    pub fn polyline(points: Vec<Vec2>, color: Color, width: f32) -> Self {
        Self::LineStrip {
            points,
            color,
            width,
        }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            color,
            stroke: Stroke::Fill,
        }
    }

    pub fn ring(center: Vec2, radius: f32, color: Color, width: f32) -> Self {
        Self::Circle {
            center,
            radius,
            color,
            stroke: Stroke::Outline(width),
        }
    }

    /// Square of half-extent `half` centered on `center`
    pub fn square(center: Vec2, half: f32, color: Color, stroke: Stroke) -> Self {
        Self::Rect {
            min: center - Vec2::splat(half),
            size: Vec2::splat(half * 2.0),
            color,
            stroke,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Polygon { color, .. }
            | Self::LineStrip { color, .. }
            | Self::Circle { color, .. }
            | Self::Rect { color, .. } => *color,
        }
    }

    /// Shift the whole primitive by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Self::Polygon { points, .. } | Self::LineStrip { points, .. } => {
                for p in points.iter_mut() {
                    *p += offset;
                }
            }
            Self::Circle { center, .. } => *center += offset,
            Self::Rect { min, .. } => *min += offset,
        }
    }

    /// Largest distance from `origin` any painted pixel can reach
    pub fn extent_from(&self, origin: Vec2) -> f32 {
        match self {
            Self::Polygon { points, .. } => max_distance(points, origin),
            Self::LineStrip { points, width, .. } => max_distance(points, origin) + width / 2.0,
            Self::Circle {
                center,
                radius,
                stroke,
                ..
            } => center.distance(origin) + radius + stroke_pad(*stroke),
            Self::Rect {
                min, size, stroke, ..
            } => {
                let corners = [
                    *min,
                    *min + Vec2::new(size.x, 0.0),
                    *min + Vec2::new(0.0, size.y),
                    *min + *size,
                ];
                max_distance(&corners, origin) + stroke_pad(*stroke)
            }
        }
    }
}

fn stroke_pad(stroke: Stroke) -> f32 {
    match stroke {
        Stroke::Fill => 0.0,
        Stroke::Outline(width) => width / 2.0,
    }
}

fn max_distance(points: &[Vec2], origin: Vec2) -> f32 {
    points
        .iter()
        .map(|p| p.distance(origin))
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::palette;

    #[test]
    fn test_translate_moves_every_variant() {
        let offset = Vec2::new(3.0, -2.0);
        let mut prims = vec![
            DrawPrimitive::polygon(vec![Vec2::ZERO, Vec2::X], palette::RED),
            DrawPrimitive::line(Vec2::ZERO, Vec2::Y, palette::RED, 1.0),
            DrawPrimitive::circle(Vec2::ZERO, 4.0, palette::RED),
            DrawPrimitive::square(Vec2::ZERO, 2.0, palette::RED, Stroke::Fill),
        ];
        for prim in prims.iter_mut() {
            prim.translate(offset);
        }
        assert_eq!(
            prims[0],
            DrawPrimitive::polygon(vec![offset, Vec2::X + offset], palette::RED)
        );
        assert_eq!(
            prims[2],
            DrawPrimitive::circle(offset, 4.0, palette::RED)
        );
        match &prims[3] {
            DrawPrimitive::Rect { min, .. } => assert_eq!(*min, Vec2::new(1.0, -4.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_extent_includes_stroke() {
        let ring = DrawPrimitive::ring(Vec2::new(10.0, 0.0), 5.0, palette::WHITE, 2.0);
        assert_eq!(ring.extent_from(Vec2::ZERO), 16.0);
        let rect = DrawPrimitive::square(Vec2::ZERO, 3.0, palette::WHITE, Stroke::Fill);
        assert!((rect.extent_from(Vec2::ZERO) - 18.0f32.sqrt()).abs() < 1e-5);
    }
}

//! Procedural enemy shapes
//!
//! `render_shape` maps a shape kind and its animated pose to draw primitives.
//! It is a pure function: same kind and pose, same primitives.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, TAU};

use super::primitive::{DrawPrimitive, Stroke};
use crate::polar_offset;
use crate::sim::state::{Color, Enemy, ShapeKind, palette};

/// Segments used to approximate ellipses
const ELLIPSE_SEGMENTS: usize = 32;

/// Everything a shape needs to draw itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePose {
    pub center: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub pulse_phase: f32,
    pub dimension_phase: f32,
    pub color: Color,
}

impl ShapePose {
    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            center: enemy.pos,
            size: enemy.size,
            rotation: enemy.rotation,
            pulse_phase: enemy.pulse_phase,
            dimension_phase: enemy.dimension_phase,
            color: enemy.color,
        }
    }

    /// Base size breathing with the pulse phase
    #[inline]
    pub fn display_size(&self) -> f32 {
        self.size + self.pulse_phase.sin() * 3.0
    }

    /// 4th-coordinate parameter in [0, 1]
    #[inline]
    fn w(&self) -> f32 {
        self.dimension_phase.sin() * 0.5 + 0.5
    }
}

/// Draw primitives for one enemy shape, back to front
pub fn render_shape(kind: ShapeKind, pose: &ShapePose) -> Vec<DrawPrimitive> {
    let ds = pose.display_size();
    let c = pose.center;
    let color = pose.color;

    match kind {
        ShapeKind::Circle => vec![DrawPrimitive::circle(c, ds, color)],
        ShapeKind::Triangle => regular(pose, 3),
        ShapeKind::Square => regular(pose, 4),
        ShapeKind::Pentagon => regular(pose, 5),
        ShapeKind::Hexagon => regular(pose, 6),
        ShapeKind::Octagon => regular(pose, 8),
        ShapeKind::Star => vec![DrawPrimitive::polygon(
            alternating_ring(c, 10, ds, ds * 0.5, pose.rotation),
            color,
        )],
        ShapeKind::Diamond => vec![DrawPrimitive::polygon(
            vec![
                c + Vec2::new(0.0, -ds),
                c + Vec2::new(ds, 0.0),
                c + Vec2::new(0.0, ds),
                c + Vec2::new(-ds, 0.0),
            ],
            color,
        )],
        ShapeKind::Ellipse => vec![DrawPrimitive::polygon(
            ellipse_points(c, ds * 1.5, ds * 0.8),
            color,
        )],
        ShapeKind::Cross => cross(c, ds, color),
        ShapeKind::Arrow => arrow(pose, ds),
        ShapeKind::Heart => heart(pose, ds),
        ShapeKind::Crescent => vec![
            DrawPrimitive::circle(c, ds, color),
            DrawPrimitive::circle(
                polar_offset(c, ds * 0.3, pose.rotation),
                ds * 0.8,
                palette::BACKGROUND,
            ),
        ],
        ShapeKind::Spiral => spiral(pose, ds),
        ShapeKind::Lightning => lightning(pose, ds),
        ShapeKind::Bowtie => bowtie(c, ds, color),
        ShapeKind::Hourglass => vec![
            DrawPrimitive::polygon(vec![c + Vec2::new(-ds, -ds), c + Vec2::new(ds, -ds), c], color),
            DrawPrimitive::polygon(vec![c, c + Vec2::new(-ds, ds), c + Vec2::new(ds, ds)], color),
        ],
        ShapeKind::Flower => flower(pose, ds),
        ShapeKind::Gear => vec![
            DrawPrimitive::polygon(alternating_ring(c, 16, ds, ds * 0.6, pose.rotation), color),
            DrawPrimitive::circle(c, ds * 0.2, palette::BACKGROUND),
        ],
        ShapeKind::Snowflake => snowflake(pose, ds),
        ShapeKind::Cube => cube(c, ds, color),
        ShapeKind::Pyramid => pyramid(c, ds, color),
        ShapeKind::Cylinder => cylinder(c, ds, color),
        ShapeKind::Cone => cone(c, ds, color),
        ShapeKind::Sphere => vec![
            DrawPrimitive::circle(c, ds, color),
            DrawPrimitive::circle(c - Vec2::splat(ds * 0.3), ds * 0.3, color.shade(50)),
            DrawPrimitive::circle(c + Vec2::splat(ds * 0.2), ds * 0.4, color.shade(-50)),
        ],
        ShapeKind::Torus => torus(c, ds, color),
        ShapeKind::Prism => prism(c, ds, color),
        ShapeKind::Dodecahedron => dodecahedron(pose, ds),
        ShapeKind::Icosahedron => icosahedron(pose, ds),
        ShapeKind::Tetrahedron => tetrahedron(c, ds, color),
        ShapeKind::Tesseract => tesseract(pose, ds),
        ShapeKind::Hypersphere => hypersphere(pose, ds),
        ShapeKind::Hyperprism => hyperprism(pose, ds),
        ShapeKind::Simplex4d => simplex_4d(pose, ds),
    }
}

/// `n` vertices at `center + radius * (cos, sin)(rotation + 2πi/n)`
pub fn regular_polygon(center: Vec2, radius: f32, n: usize, rotation: f32) -> Vec<Vec2> {
    (0..n)
        .map(|i| polar_offset(center, radius, rotation + i as f32 * TAU / n as f32))
        .collect()
}

/// `n` vertices alternating between `outer` (even) and `inner` (odd) radius
fn alternating_ring(center: Vec2, n: usize, outer: f32, inner: f32, rotation: f32) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            polar_offset(center, radius, rotation + i as f32 * TAU / n as f32)
        })
        .collect()
}

/// Axis-aligned ellipse outline
fn ellipse_points(center: Vec2, rx: f32, ry: f32) -> Vec<Vec2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let theta = i as f32 * TAU / ELLIPSE_SEGMENTS as f32;
            center + Vec2::new(rx * theta.cos(), ry * theta.sin())
        })
        .collect()
}

fn regular(pose: &ShapePose, n: usize) -> Vec<DrawPrimitive> {
    vec![DrawPrimitive::polygon(
        regular_polygon(pose.center, pose.display_size(), n, pose.rotation),
        pose.color,
    )]
}

fn cross(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let t = ds * 0.3;
    vec![
        DrawPrimitive::Rect {
            min: c - Vec2::new(t, ds),
            size: Vec2::new(t * 2.0, ds * 2.0),
            color,
            stroke: Stroke::Fill,
        },
        DrawPrimitive::Rect {
            min: c - Vec2::new(ds, t),
            size: Vec2::new(ds * 2.0, t * 2.0),
            color,
            stroke: Stroke::Fill,
        },
    ]
}

/// Points along the rotation direction
fn arrow(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let r = pose.rotation;
    let tip = polar_offset(pose.center, ds, r);
    let back = polar_offset(pose.center, -ds * 0.5, r);
    let wing1 = polar_offset(back, ds * 0.3, r + FRAC_PI_2);
    let wing2 = polar_offset(back, -ds * 0.3, r + FRAC_PI_2);
    vec![DrawPrimitive::polygon(vec![tip, wing1, back, wing2], pose.color)]
}

/// Classic parametric heart, 20 samples, rotated and scaled by `ds / 20`
fn heart(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let scale = ds / 20.0;
    let (sin_r, cos_r) = pose.rotation.sin_cos();
    let points = (0..20)
        .map(|i| {
            let t = i as f32 * TAU / 20.0;
            let hx = 16.0 * t.sin().powi(3);
            let hy = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
            pose.center + Vec2::new(hx * cos_r - hy * sin_r, hx * sin_r + hy * cos_r) * scale
        })
        .collect();
    vec![DrawPrimitive::polygon(points, pose.color)]
}

/// Archimedean spiral `r = 3t`, cut at the display size
fn spiral(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let points: Vec<Vec2> = (0..20)
        .map(|i| i as f32 * 0.3)
        .map(|t| (t * 3.0, pose.rotation + t))
        .filter(|(r, _)| *r <= ds)
        .map(|(r, angle)| polar_offset(pose.center, r, angle))
        .collect();
    if points.len() > 1 {
        vec![DrawPrimitive::polyline(points, pose.color, 3.0)]
    } else {
        Vec::new()
    }
}

/// Six-segment zigzag; odd joints are kicked sideways by the rotation
fn lightning(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    const SEGMENTS: usize = 6;
    let kick = Vec2::new(pose.rotation.sin(), pose.rotation.cos()) * ds * 0.3;
    let points = (0..=SEGMENTS)
        .map(|i| {
            let t = i as f32 / SEGMENTS as f32 - 0.5;
            let base = pose.center + Vec2::new(t * ds * 2.0, t * ds * 0.3);
            if i % 2 == 1 { base + kick } else { base }
        })
        .collect();
    vec![DrawPrimitive::polyline(points, pose.color, 4.0)]
}

/// Two triangles meeting tip to tip at the center
fn bowtie(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let h = ds * 0.5;
    vec![
        DrawPrimitive::polygon(
            vec![c + Vec2::new(-ds, -h), c, c + Vec2::new(-ds, h)],
            color,
        ),
        DrawPrimitive::polygon(
            vec![c + Vec2::new(ds, h), c, c + Vec2::new(ds, -h)],
            color,
        ),
    ]
}

fn flower(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let mut prims: Vec<DrawPrimitive> = regular_polygon(pose.center, ds * 0.7, 6, pose.rotation)
        .into_iter()
        .map(|petal| DrawPrimitive::circle(petal, ds * 0.4, pose.color))
        .collect();
    prims.push(DrawPrimitive::circle(pose.center, ds * 0.3, pose.color.shade(50)));
    prims
}

/// Six arms, each with two pairs of short branches
fn snowflake(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let c = pose.center;
    let mut prims = Vec::with_capacity(30);
    for i in 0..6 {
        let angle = pose.rotation + i as f32 * FRAC_PI_3;
        prims.push(DrawPrimitive::line(c, polar_offset(c, ds, angle), pose.color, 2.0));
        for along in [0.3, 0.6] {
            let root = polar_offset(c, ds * along, angle);
            for side in [-1.0, 1.0] {
                let end = polar_offset(root, ds * 0.2, angle + side * FRAC_PI_6);
                prims.push(DrawPrimitive::line(root, end, pose.color, 1.0));
            }
        }
    }
    prims
}

/// Front square with a lit top face and a shaded right face
fn cube(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let d = ds * 0.3;
    let depth = Vec2::new(d, -d);
    let top_left = c + Vec2::new(-ds, -ds);
    let top_right = c + Vec2::new(ds, -ds);
    let bottom_right = c + Vec2::new(ds, ds);
    vec![
        DrawPrimitive::square(c, ds, color, Stroke::Fill),
        DrawPrimitive::polygon(
            vec![top_left, top_left + depth, top_right + depth, top_right],
            color.shade(30),
        ),
        DrawPrimitive::polygon(
            vec![top_right, top_right + depth, bottom_right + depth, bottom_right],
            color.shade(-30),
        ),
    ]
}

fn pyramid(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let front_left = c + Vec2::new(-ds, ds * 0.5);
    let front_right = c + Vec2::new(ds, ds * 0.5);
    let back_right = c + Vec2::new(ds * 0.5, ds);
    let back_left = c + Vec2::new(-ds * 0.5, ds);
    let apex = c - Vec2::new(0.0, ds * 0.6);
    vec![
        DrawPrimitive::polygon(
            vec![front_left, front_right, back_right, back_left],
            color.shade(-40),
        ),
        DrawPrimitive::polygon(vec![front_left, front_right, apex], color),
        DrawPrimitive::polygon(vec![front_right, back_right, apex], color.shade(-20)),
    ]
}

/// Lit back cap, a shaded band joining the caps, then the front cap
fn cylinder(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let rx = ds * 1.2;
    let ry = ds * 0.8;
    let depth = Vec2::new(ds * 0.3, -ds * 0.3);
    let back = c + depth;
    vec![
        DrawPrimitive::polygon(ellipse_points(back, rx, ry), color.shade(30)),
        DrawPrimitive::polygon(
            vec![
                c - Vec2::new(rx, 0.0),
                back - Vec2::new(rx, 0.0),
                back + Vec2::new(rx, 0.0),
                c + Vec2::new(rx, 0.0),
            ],
            color.shade(-20),
        ),
        DrawPrimitive::polygon(ellipse_points(c, rx, ry), color),
    ]
}

/// Shaded base disc under a fan of 16 triangles to the apex
fn cone(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    const SLICES: usize = 16;
    let height = ds * 1.5;
    let base_center = c + Vec2::new(0.0, height * 0.3);
    let apex = c - Vec2::new(0.0, height * 0.7);
    let rim: Vec<Vec2> = (0..SLICES)
        .map(|i| {
            let angle = i as f32 * TAU / SLICES as f32;
            base_center + Vec2::new(angle.cos() * ds, angle.sin() * ds * 0.3)
        })
        .collect();

    let mut prims = Vec::with_capacity(SLICES + 1);
    prims.push(DrawPrimitive::circle(base_center, ds, color.shade(-40)));
    for i in 0..SLICES {
        let next = rim[(i + 1) % SLICES];
        prims.push(DrawPrimitive::polygon(vec![apex, rim[i], next], color));
    }
    prims
}

fn torus(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let hole = ds * 0.4;
    let depth = ds * 0.2;
    // Highlight ellipse sits along the top rim
    let highlight_center = c + Vec2::new(0.0, -ds - depth + hole / 2.0);
    vec![
        DrawPrimitive::circle(c, ds, color),
        DrawPrimitive::circle(c, hole, palette::BACKGROUND),
        DrawPrimitive::polygon(ellipse_points(highlight_center, ds, hole / 2.0), color.shade(30)),
    ]
}

fn prism(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let depth = Vec2::new(ds * 0.4, -ds * 0.4);
    let front = [
        c + Vec2::new(0.0, -ds),
        c + Vec2::new(-ds, ds * 0.5),
        c + Vec2::new(ds, ds * 0.5),
    ];
    let back = front.map(|p| p + depth);

    let mut prims = Vec::with_capacity(5);
    prims.push(DrawPrimitive::polygon(back.to_vec(), color.shade(20)));
    for (f, b) in front.iter().zip(back.iter()) {
        prims.push(DrawPrimitive::line(*f, *b, color.shade(-30), 2.0));
    }
    prims.push(DrawPrimitive::polygon(front.to_vec(), color));
    prims
}

/// Wobbly 12-gon with a lit hexagonal facet
fn dodecahedron(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let outline = (0..12)
        .map(|i| {
            let angle = pose.rotation + i as f32 * TAU / 12.0;
            let radius = ds * (0.8 + 0.2 * (i as f32 * 3.0).sin());
            polar_offset(pose.center, radius, angle)
        })
        .collect();
    vec![
        DrawPrimitive::polygon(outline, pose.color),
        DrawPrimitive::polygon(
            regular_polygon(pose.center, ds * 0.4, 6, pose.rotation),
            pose.color.shade(40),
        ),
    ]
}

/// Three squashed rings, each smaller, denser and brighter than the last
fn icosahedron(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    (0..3)
        .map(|layer| {
            let radius = ds * (1.0 - layer as f32 * 0.2);
            let n = 6 + layer * 2;
            let twist = pose.rotation + layer as f32 * 0.5;
            let points = (0..n)
                .map(|i| {
                    let angle = twist + i as f32 * TAU / n as f32;
                    pose.center + Vec2::new(angle.cos() * radius, angle.sin() * radius * 0.8)
                })
                .collect();
            DrawPrimitive::polygon(points, pose.color.shade(20 * layer as i16))
        })
        .collect()
}

fn tetrahedron(c: Vec2, ds: f32, color: Color) -> Vec<DrawPrimitive> {
    let b = ds * 0.8;
    let base = [
        c + Vec2::new(-b, b * 0.5),
        c + Vec2::new(b, b * 0.5),
        c + Vec2::new(0.0, -b * 0.5),
    ];
    let apex = c - Vec2::new(0.0, ds * 0.8);

    let mut prims = Vec::with_capacity(4);
    prims.push(DrawPrimitive::polygon(base.to_vec(), color.shade(-30)));
    for i in 0..3 {
        prims.push(DrawPrimitive::polygon(
            vec![base[i], base[(i + 1) % 3], apex],
            color.shade(-10 * i as i16),
        ));
    }
    prims
}

/// Nested squares; the inner cube grows and brightens with w
fn tesseract(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let c = pose.center;
    let scale = ds * 0.7;
    let w = pose.w();
    let inner = scale * (0.5 + w * 0.3);
    let outer = scale * (0.8 + w * 0.2);
    let inner_shade = (-50.0 + 30.0 * w).round() as i16;

    let mut prims = vec![
        DrawPrimitive::square(c, inner, pose.color.shade(inner_shade), Stroke::Fill),
        DrawPrimitive::square(c, outer, pose.color, Stroke::Outline(2.0)),
    ];
    for i in 0..4 {
        let angle = i as f32 * FRAC_PI_2;
        prims.push(DrawPrimitive::line(
            polar_offset(c, inner, angle),
            polar_offset(c, outer, angle),
            pose.color,
            1.0,
        ));
    }
    prims
}

/// 3D slices of a 4-ball at evenly spaced w, scaled by the current w
fn hypersphere(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    const SLICES: usize = 4;
    let w = pose.w();
    (0..SLICES)
        .filter_map(|i| {
            let t = i as f32 / (SLICES - 1) as f32 * 2.0 - 1.0;
            let radius = ds * (1.0 - t * t).max(0.0).sqrt() * (0.3 + w * 0.7);
            if radius <= 1.0 {
                return None;
            }
            let alpha = (255.0 * (1.0 - t.abs()) * 0.7) as u8;
            Some(DrawPrimitive::ring(
                pose.center,
                radius,
                pose.color.with_alpha(alpha),
                2.0,
            ))
        })
        .collect()
}

/// Three outlined layers sliding against each other as the phase turns
fn hyperprism(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    let drift = Vec2::new(pose.dimension_phase.sin(), pose.dimension_phase.cos()) * 0.3;
    (0..3)
        .map(|i| {
            let layer_w = (i as f32 - 1.0) * 0.5;
            let depth = (2 - i) as f32;
            let half = ds * (0.6 + 0.4 * depth);
            let alpha = (255.0 * (0.3 + 0.7 * depth / 2.0)) as u8;
            let color = pose.color.shade(20 * i as i16).with_alpha(alpha);
            DrawPrimitive::square(
                pose.center + drift * layer_w * ds,
                half,
                color,
                Stroke::Outline(2.0),
            )
        })
        .collect()
}

/// Regular 4-simplex projected through the dimension phase, all 10 edges
fn simplex_4d(pose: &ShapePose, ds: f32) -> Vec<DrawPrimitive> {
    const VERTICES: [[f32; 4]; 5] = [
        [1.0, 1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0, 1.0],
        [0.0, 0.0, 0.0, -4.0],
    ];
    let scale = ds * 0.3;
    let (sin_w, cos_w) = pose.dimension_phase.sin_cos();
    let projected: Vec<Vec2> = VERTICES
        .iter()
        .map(|[x, y, _, w]| pose.center + Vec2::new(x + w * cos_w, y + w * sin_w) * scale)
        .collect();

    let mut prims = Vec::with_capacity(10);
    for i in 0..projected.len() {
        for j in i + 1..projected.len() {
            prims.push(DrawPrimitive::line(projected[i], projected[j], pose.color, 1.0));
        }
    }
    prims
}

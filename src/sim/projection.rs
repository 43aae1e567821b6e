//! Axonometric projection
//!
//! Every rendered point (cell vertices, the ball, jump offsets) goes through
//! the same fixed transform so static geometry and animated motion line up.
//!
//! Input axes: `x` = column, `y` = row, `z` = height. Output is a screen offset
//! with `y` pointing up; the host flips it when drawing.

use glam::{Vec2, Vec3};

/// Row axis squash before shearing
pub const Y_COMPRESSION: f32 = 0.85;
/// Inclination angle (degrees)
pub const ALPHA_DEG: f32 = 20.0;
/// Rotation angle (degrees)
pub const BETA_DEG: f32 = 25.0;

/// Precomputed trig for the fixed view
#[derive(Debug, Clone, Copy)]
struct Axes {
    sin_alpha: f32,
    sin_beta: f32,
    cos_beta: f32,
}

impl Axes {
    #[inline]
    fn get() -> Self {
        let beta = BETA_DEG.to_radians();
        Self {
            sin_alpha: ALPHA_DEG.to_radians().sin(),
            sin_beta: beta.sin(),
            cos_beta: beta.cos(),
        }
    }
}

/// Project a 3D offset (column, row, height) to a 2D screen offset
#[inline]
pub fn project(p: Vec3) -> Vec2 {
    let axes = Axes::get();

    // Compress, incline, then rotate
    let y = p.y * Y_COMPRESSION;
    let x = p.x + y * axes.sin_alpha;

    Vec2::new(
        x * axes.cos_beta + y * axes.sin_beta,
        -x * axes.sin_beta + y * axes.cos_beta + p.z,
    )
}

/// Project a point given in cell units, scaled to pixels
#[inline]
pub fn project_scaled(p: Vec3, cell_size: f32) -> Vec2 {
    project(p * cell_size)
}

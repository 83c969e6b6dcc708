//! Transform helpers.
//!
//! Pure functions over `glam` types. Matrices are column-major, right-handed,
//! with clip-space depth in `[0, 1]` (the wgpu convention).

use glam::{Mat4, Vec2, Vec3};

use crate::coords::Viewport;

/// World units per logical pixel when mapping touches into the scene.
pub const PIXELS_TO_WORLD: f32 = 0.01;

#[inline]
pub fn radians_from_degrees(degrees: f32) -> f32 {
    (degrees / 180.0) * std::f32::consts::PI
}

/// Rotation of `radians` about `axis` (normalized internally).
///
/// A zero axis yields the identity.
pub fn rotation(radians: f32, axis: Vec3) -> Mat4 {
    let Some(axis) = axis.try_normalize() else {
        return Mat4::IDENTITY;
    };
    Mat4::from_axis_angle(axis, radians)
}

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Right-handed perspective projection mapping depth to `[0, 1]`.
pub fn perspective_rh(fovy_radians: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
    let ys = 1.0 / (fovy_radians * 0.5).tan();
    let xs = ys / aspect;
    let zs = z_far / (z_near - z_far);
    Mat4::from_cols_array(&[
        xs, 0.0, 0.0, 0.0, //
        0.0, ys, 0.0, 0.0, //
        0.0, 0.0, zs, -1.0, //
        0.0, 0.0, zs * z_near, 0.0,
    ])
}

/// Rotates `v` in the XZ plane by `angle`.
///
/// This is the inverse of the scene's spin about +Y, so geometry placed with
/// the current spin angle lands under the finger once the frame transform
/// re-applies that spin.
#[inline]
pub fn spin_xz(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.z * s, v.y, v.x * s + v.z * c)
}

/// Maps a touch position (logical px, top-left origin) into world space.
///
/// The viewport center maps to the origin, +Y points up, and the result is
/// spun by `spin_angle`.
pub fn project_touch(position: Vec2, viewport: Viewport, spin_angle: f32) -> Vec3 {
    let half = viewport.center();
    let x = (position.x - half.x) * PIXELS_TO_WORLD;
    let y = -(position.y - half.y) * PIXELS_TO_WORLD;
    spin_xz(Vec3::new(x, y, 0.0), spin_angle)
}

/// Intersects a ray with the horizontal plane `y = plane_y`.
///
/// Returns `None` when the ray is parallel to the plane (and not on it) or the
/// plane lies behind the ray origin. A ray lying in the plane returns its
/// origin.
pub fn ray_intersect_horizontal_plane(origin: Vec3, direction: Vec3, plane_y: f32) -> Option<Vec3> {
    let direction = direction.try_normalize()?;

    if direction.y == 0.0 {
        return (origin.y == plane_y).then_some(origin);
    }

    let dist = (plane_y - origin.y) / direction.y;
    if dist < 0.0 {
        return None;
    }

    Some(origin + direction * dist)
}

//! Mathematics for the corridor viewer
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix used for view and projection
//! - [`Smoothing`] - Exponential smoothing modes for camera motion
//!
//! Scalar helpers [`lerp`] and [`clamp_unordered`] are shared by the
//! camera controllers.

mod vec3;
pub mod mat4;
mod smoothing;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use smoothing::{Smoothing, SmoothingError};

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `value` into the range spanned by `a` and `b`, in either order
#[inline]
pub fn clamp_unordered(value: f32, a: f32, b: f32) -> f32 {
    value.clamp(a.min(b), a.max(b))
}

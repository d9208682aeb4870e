//! 4x4 matrix helpers for view and projection
//!
//! Matrices are column-major `[[f32; 4]; 4]` so they can be written to
//! uniform buffers unchanged.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Right-handed perspective projection with a [0, 1] depth range (wgpu)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = far / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, range, -1.0],
        [0.0, 0.0, near * range, 0.0],
    ]
}

/// Right-handed look-at view matrix
///
/// Falls back to looking down -Z when `eye == target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let mut f = (target - eye).normalized();
    if f == Vec3::ZERO {
        f = -Vec3::Z;
    }
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Matrix multiplication: result = a * b (column-major)
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            result[col][row] = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    result
}

/// Transform a point (w = 1) and return the homogeneous result
pub fn transform_point(m: Mat4, p: Vec3) -> [f32; 4] {
    let v = [p.x, p.y, p.z, 1.0];
    let mut out = [0.0f32; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = (0..4).map(|k| m[k][row] * v[k]).sum();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_mul_identity() {
        let m = perspective(1.0, 1.5, 0.1, 100.0);
        assert_eq!(mul(IDENTITY, m), m);
        assert_eq!(mul(m, IDENTITY), m);
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 8.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        let p = transform_point(view, Vec3::ZERO);
        assert!(approx_eq(p[0], 0.0));
        assert!(approx_eq(p[1], 0.0));
        assert!(approx_eq(p[2], -8.0));
    }

    #[test]
    fn test_look_at_degenerate_eye_equals_target() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = look_at(eye, eye, Vec3::Y);
        // Eye maps to the origin of view space
        let p = transform_point(view, eye);
        assert!(approx_eq(p[0], 0.0) && approx_eq(p[1], 0.0) && approx_eq(p[2], 0.0));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let near = transform_point(proj, Vec3::new(0.0, 0.0, -0.1));
        let far = transform_point(proj, Vec3::new(0.0, 0.0, -100.0));
        assert!(approx_eq(near[2] / near[3], 0.0));
        assert!((far[2] / far[3] - 1.0).abs() < 1e-3);
    }
}

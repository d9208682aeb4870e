//! Corridor camera
//!
//! Position plus an optional look-at target. Without a target the camera
//! faces down the corridor (-Z). The scroll controller writes Z through
//! [`AxialWriter`]; the parallax controller writes X/Y and the target through
//! [`LateralWriter`].

use corridor_input::{AxialWriter, LateralWriter};
use corridor_math::{mat4, Mat4, Vec3};

/// Camera for viewing the corridor
#[derive(Clone, Debug)]
pub struct Camera3D {
    /// World-space position
    pub position: Vec3,
    /// Point the camera faces, `None` = straight down -Z
    pub target: Option<Vec3>,
    /// Position restored by `reset`
    start: Vec3,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 8.0))
    }
}

impl Camera3D {
    /// Create a camera at `start` facing -Z
    pub fn new(start: Vec3) -> Self {
        Self {
            position: start,
            target: None,
            start,
        }
    }

    /// Point the camera is looking at
    pub fn look_target(&self) -> Vec3 {
        self.target.unwrap_or(self.position - Vec3::Z)
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let f = (self.look_target() - self.position).normalized();
        if f == Vec3::ZERO {
            -Vec3::Z
        } else {
            f
        }
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.look_target(), Vec3::Y)
    }

    /// Back to the starting position, facing -Z
    pub fn reset(&mut self) {
        self.position = self.start;
        self.target = None;
    }
}

impl AxialWriter for Camera3D {
    fn axial(&self) -> f32 {
        self.position.z
    }

    fn set_axial(&mut self, z: f32) {
        self.position.z = z;
    }
}

impl LateralWriter for Camera3D {
    fn lateral(&self) -> (f32, f32) {
        (self.position.x, self.position.y)
    }

    fn set_lateral(&mut self, x: f32, y: f32) {
        self.position.x = x;
        self.position.y = y;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_faces_down_corridor() {
        let cam = Camera3D::default();
        assert_eq!(cam.forward(), -Vec3::Z);
    }

    #[test]
    fn test_axial_and_lateral_are_disjoint() {
        let mut cam = Camera3D::default();
        cam.set_axial(-3.0);
        cam.set_lateral(0.25, -0.1);
        assert_eq!(cam.position, Vec3::new(0.25, -0.1, -3.0));
        cam.set_axial(1.0);
        assert_eq!(cam.lateral(), (0.25, -0.1));
    }

    #[test]
    fn test_look_at_changes_forward() {
        let mut cam = Camera3D::new(Vec3::ZERO);
        cam.look_at(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(cam.forward(), Vec3::X);
    }

    #[test]
    fn test_reset() {
        let mut cam = Camera3D::new(Vec3::new(0.0, 0.0, 8.0));
        cam.set_axial(-15.0);
        cam.look_at(Vec3::ZERO);
        cam.reset();
        assert_eq!(cam.position.z, 8.0);
        assert!(cam.target.is_none());
    }
}

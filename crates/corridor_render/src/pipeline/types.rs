//! GPU-compatible data types for the corridor pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use corridor_math::mat4::IDENTITY;

/// A vertex of corridor geometry
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    /// Position in world space (x, y, z)
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

impl Vertex3D {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, normal, color }
    }
}

/// Render uniforms for the corridor pass
/// Layout: 176 bytes total (must match corridor.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RenderUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Light direction + ambient (16 bytes)
    pub light_dir: [f32; 3],
    pub ambient_strength: f32,
    /// Fog blends toward this color, normally the clear color (16 bytes)
    pub fog_color: [f32; 4],
    /// Lighting and fog parameters (16 bytes)
    pub diffuse_strength: f32,
    pub fog_density: f32,
    pub _padding: [f32; 2],
}

impl Default for RenderUniforms {
    fn default() -> Self {
        Self {
            view_matrix: IDENTITY,
            projection_matrix: IDENTITY,
            light_dir: [0.3, 1.0, 0.5],
            ambient_strength: 0.35,
            fog_color: [0.02, 0.02, 0.05, 1.0],
            diffuse_strength: 0.65,
            fog_density: 0.02,
            _padding: [0.0; 2],
        }
    }
}

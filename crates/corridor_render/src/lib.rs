//! Corridor Rendering Library
//!
//! This crate provides the wgpu-based pipeline that draws the instantiated
//! corridor segments, plus the camera the controllers drive.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera3d::Camera3D`] - Camera with position and look target
//! - [`pipeline::RenderPipeline`] - Flat-shaded, fogged corridor rendering
//! - [`renderable::CorridorGeometry`] - Converts the segment scene graph to GPU vertices

pub mod context;
pub mod camera3d;
pub mod pipeline;
pub mod renderable;

pub use camera3d::Camera3D;
pub use context::{RenderContext, RenderError};
pub use renderable::{CorridorGeometry, CorridorStyle, CheckerboardPattern};

// Re-export core types for convenience
pub use corridor_core::{SceneGraph, SegmentIndex, SegmentNode};
pub use corridor_math::Vec3;

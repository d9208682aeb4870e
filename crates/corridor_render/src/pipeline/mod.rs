//! Rendering pipeline components

pub mod types;
pub mod render_pipeline;

pub use types::{RenderUniforms, Vertex3D};
pub use render_pipeline::RenderPipeline;

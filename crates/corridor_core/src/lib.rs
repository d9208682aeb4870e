//! Core types for the corridor viewer
//!
//! This crate owns the corridor's procedural layout:
//!
//! - [`SegmentRecycler`] - Keeps a fixed window of segments centred on the camera
//! - [`SegmentWindow`] - The `2k+1` segments currently instantiated
//! - [`WindowChange`] - Segments added/removed when the window moves
//! - [`SegmentSink`] - Anything that instantiates segment geometry
//! - [`SceneGraph`] - Generational-key store of live segment nodes
//! - [`RecyclerError`] - Invalid recycler construction parameters

mod error;
mod recycler;
mod scene_graph;

pub use error::RecyclerError;
pub use recycler::{SegmentIndex, SegmentRecycler, SegmentWindow, WindowChange};
pub use scene_graph::{GraphChanges, SceneGraph, SegmentKey, SegmentNode, SegmentSink};

// Re-export commonly used types from corridor_math for convenience
pub use corridor_math::Vec3;

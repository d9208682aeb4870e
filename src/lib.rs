//! Corridor - scroll-driven 3D corridor viewer
//!
//! Application layer over the `corridor_*` crates: configuration loading,
//! keyboard mapping and the systems driven from the winit event loop.

pub mod config;
pub mod input;
pub mod systems;

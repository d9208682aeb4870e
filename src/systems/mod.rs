//! Application systems
//!
//! Window, GPU and per-frame corridor logic, kept out of main.rs so they
//! can be tested on their own.

mod frame;
mod render;
mod window;

pub use frame::{FrameError, FrameResult, FrameSystem, MAX_FRAME_DT};
pub use render::RenderSystem;
pub use window::{WindowError, WindowSystem};

//! Keyboard handling for the host application
//!
//! Wheel and pointer input go straight to the controllers through the
//! input hub; only command keys are mapped here.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};

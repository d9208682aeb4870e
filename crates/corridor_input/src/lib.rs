//! Corridor input handling
//!
//! This crate turns raw wheel and pointer input into camera motion:
//!
//! - [`ScrollController`] - Wheel input drives the camera along the travel axis (Z)
//! - [`ParallaxController`] - Pointer position sways the camera on X/Y
//! - [`InputHub`] / [`Subscription`] - Scoped input listeners, released on drop
//! - [`AxialWriter`] / [`LateralWriter`] - Camera capabilities, one per controller
//! - [`AxisLedger`] - Rejects controllers that would write the same axis
//! - [`SectionNav`] - Tab-style jumps between progress stops

mod axis;
mod event;
mod hub;
mod parallax_controller;
mod scroll_controller;
mod sections;

pub use axis::{AxialWriter, Axes, AxisConflict, AxisLedger, LateralWriter};
pub use event::{normalize_pointer, wheel_delta_pixels, InputEvent, PIXELS_PER_LINE};
pub use hub::{EventKinds, InputHub, Subscription};
pub use parallax_controller::ParallaxController;
pub use scroll_controller::ScrollController;
pub use sections::{Section, SectionNav};

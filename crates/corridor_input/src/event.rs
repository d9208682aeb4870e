//! Raw input events consumed by the controllers
//!
//! Window events are reduced to pixel coordinates and page-style wheel
//! deltas. No smoothing or scaling happens here.

use winit::event::{MouseScrollDelta, WindowEvent};

/// Pixels scrolled per wheel "line" (one notch on most mice)
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Input the controllers listen for
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer position in physical pixels within a `width` x `height` viewport
    PointerMoved { x: f64, y: f64, width: u32, height: u32 },
    /// Vertical wheel delta in pixels; positive scrolls down (travels forward)
    Wheel { delta_y: f32 },
}

impl InputEvent {
    /// Translate a winit window event, given the current viewport size
    pub fn from_window_event(event: &WindowEvent, viewport: (u32, u32)) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
                x: position.x,
                y: position.y,
                width: viewport.0,
                height: viewport.1,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel {
                delta_y: wheel_delta_pixels(*delta),
            }),
            _ => None,
        }
    }
}

/// Convert a winit wheel delta to page-style pixels
///
/// winit reports positive `y` when scrolling up; pages report positive
/// `deltaY` when scrolling down, so the sign flips.
pub fn wheel_delta_pixels(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

/// Map pointer pixels to `[-1, 1]` on both axes, +Y up
///
/// A degenerate viewport yields the centre.
pub fn normalize_pointer(x: f64, y: f64, width: u32, height: u32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (0.0, 0.0);
    }
    let nx = (x / width as f64) * 2.0 - 1.0;
    let ny = -((y / height as f64) * 2.0 - 1.0);
    (nx.clamp(-1.0, 1.0) as f32, ny.clamp(-1.0, 1.0) as f32)
}

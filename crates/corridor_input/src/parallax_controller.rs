//! Pointer-driven parallax
//!
//! The pointer's normalized position sets a small target offset on X/Y
//! (vertical sway damped relative to horizontal). The offset is smoothed per
//! axis and added to a base position captured once when the controller is
//! activated, then the camera is re-aimed at a fixed world point.

use corridor_math::{Smoothing, Vec3};

use crate::{normalize_pointer, Axes, EventKinds, InputEvent, InputHub, LateralWriter, Subscription};

/// Controller for the lateral/vertical axes and look direction
pub struct ParallaxController {
    /// Normalized pointer, `[-1, 1]` on both axes, +Y up
    pointer: (f32, f32),
    /// Smoothed offset from the base position
    offset: (f32, f32),
    /// Camera (x, y) at activation
    base: Option<(f32, f32)>,
    subscription: Option<Subscription>,

    // Configuration
    /// Maximum horizontal offset in world units
    pub intensity: f32,
    /// Vertical offset scale relative to horizontal
    pub vertical_damping: f32,
    pub smoothing: Smoothing,
    /// World point the camera keeps facing
    pub look_at: Vec3,
}

impl Default for ParallaxController {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallaxController {
    /// Camera axes this controller writes
    pub const OWNED_AXES: Axes = Axes::LATERAL.union(Axes::ORIENTATION);

    pub fn new() -> Self {
        Self {
            pointer: (0.0, 0.0),
            offset: (0.0, 0.0),
            base: None,
            subscription: None,
            intensity: 0.5,
            vertical_damping: 0.6,
            smoothing: Smoothing::Fixed { factor: 0.05 },
            look_at: Vec3::new(0.0, 0.0, -60.0),
        }
    }

    /// Builder: set maximum horizontal offset
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Builder: set vertical damping factor
    pub fn with_vertical_damping(mut self, damping: f32) -> Self {
        self.vertical_damping = damping;
        self
    }

    /// Builder: set the smoothing mode
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Builder: set the fixed look-at point
    pub fn with_look_at(mut self, target: Vec3) -> Self {
        self.look_at = target;
        self
    }

    /// Capture the camera's (x, y) as the anchor for all future offsets
    ///
    /// Only the first call after construction (or `deactivate`) reads the
    /// camera; later calls keep the original anchor.
    pub fn activate<C: LateralWriter>(&mut self, camera: &C) {
        if self.base.is_none() {
            self.base = Some(camera.lateral());
        }
    }

    /// Forget the anchor; the next activation reads the camera again
    pub fn deactivate(&mut self) {
        self.base = None;
    }

    pub fn base(&self) -> Option<(f32, f32)> {
        self.base
    }

    /// Normalized pointer position
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// Current smoothed offset from the base
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Pointer moved to pixel `(x, y)` in a `width` x `height` viewport
    pub fn on_pointer_move(&mut self, x: f64, y: f64, width: u32, height: u32) {
        self.pointer = normalize_pointer(x, y, width, height);
    }

    /// Set the normalized pointer directly (clamped to `[-1, 1]`)
    pub fn set_pointer(&mut self, nx: f32, ny: f32) {
        if nx.is_finite() && ny.is_finite() {
            self.pointer = (nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0));
        }
    }

    /// Offset the smoothing is heading for
    pub fn target_offset(&self) -> (f32, f32) {
        (
            self.pointer.0 * self.intensity,
            self.pointer.1 * self.intensity * self.vertical_damping,
        )
    }

    /// Advance the smoothed offset by one frame and return it
    pub fn update(&mut self, dt: f32) -> (f32, f32) {
        let (tx, ty) = self.target_offset();
        self.offset = (
            self.smoothing.step(self.offset.0, tx, dt),
            self.smoothing.step(self.offset.1, ty, dt),
        );
        self.offset
    }

    /// Drain pointer events, step one frame, move and re-aim the camera
    ///
    /// Activates against `camera` first if not yet active.
    pub fn apply<C: LateralWriter>(&mut self, camera: &mut C, dt: f32) -> (f32, f32) {
        self.activate(camera);
        self.pump();
        let (ox, oy) = self.update(dt);
        let (bx, by) = self.base.unwrap_or_default();
        camera.set_lateral(bx + ox, by + oy);
        camera.look_at(self.look_at);
        self.offset
    }

    /// Process pointer events queued since the last frame
    pub fn pump(&mut self) {
        let events = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return,
        };
        // Only the latest position matters
        if let Some(InputEvent::PointerMoved { x, y, width, height }) = events
            .into_iter()
            .rev()
            .find(|e| matches!(e, InputEvent::PointerMoved { .. }))
        {
            self.on_pointer_move(x, y, width, height);
        }
    }

    /// Start listening for pointer events on `hub`
    pub fn mount(&mut self, hub: &InputHub) {
        self.subscription = Some(hub.subscribe(EventKinds::POINTER_MOVE));
    }

    /// Stop listening; queued events are discarded
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    /// Centre the pointer and drop any accumulated offset (anchor kept)
    pub fn reset(&mut self) {
        self.pointer = (0.0, 0.0);
        self.offset = (0.0, 0.0);
    }
}

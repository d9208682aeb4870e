//! Scroll-driven travel along the corridor
//!
//! Wheel deltas move a clamped target along Z; every frame the camera's
//! axial coordinate chases the target with exponential smoothing. Clamping
//! happens on the target, so the smoothed position can approach the bounds
//! but never pass them.

use corridor_math::{clamp_unordered, Smoothing};

use crate::{AxialWriter, Axes, EventKinds, InputEvent, InputHub, Subscription};

/// Controller for the travel axis (Z)
pub struct ScrollController {
    /// Where travel begins (progress 0)
    start: f32,
    /// Where travel ends (progress 1)
    end: f32,
    target: f32,
    current: f32,
    subscription: Option<Subscription>,

    // Configuration
    /// World units per pixel of wheel delta
    pub speed: f32,
    pub smoothing: Smoothing,
}

impl ScrollController {
    /// Camera axes this controller writes
    pub const OWNED_AXES: Axes = Axes::Z;

    /// Create a controller travelling from `start` to `end`
    ///
    /// The bounds may be given in either numeric order.
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end,
            target: start,
            current: start,
            subscription: None,
            speed: 0.01,
            smoothing: Smoothing::Fixed { factor: 0.1 },
        }
    }

    /// Builder: set wheel speed (world units per pixel)
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set the smoothing mode
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Travel endpoints as configured: `(start, end)`
    pub fn endpoints(&self) -> (f32, f32) {
        (self.start, self.end)
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Apply one wheel event: `target = clamp(target - delta * speed)`
    ///
    /// Returns the new target.
    pub fn on_scroll(&mut self, delta_y: f32) -> f32 {
        self.set_target(self.target - delta_y * self.speed);
        self.target
    }

    /// Set the target directly (clamped to the travel range)
    pub fn set_target(&mut self, z: f32) {
        if z.is_finite() {
            self.target = clamp_unordered(z, self.start, self.end);
        }
    }

    /// Set the target to a fraction of the travel, `0` = start, `1` = end
    pub fn set_target_progress(&mut self, progress: f32) {
        let p = progress.clamp(0.0, 1.0);
        self.set_target(self.start + (self.end - self.start) * p);
    }

    /// Advance the smoothed position by one frame and return it
    pub fn update(&mut self, dt: f32) -> f32 {
        self.current = self.smoothing.step(self.current, self.target, dt);
        self.current
    }

    /// Fraction of travel completed in `[0, 1]`
    ///
    /// A zero-length travel range reports 0.
    pub fn progress(&self) -> f32 {
        Self::progress_at(self.current, self.start, self.end)
    }

    /// Progress of an arbitrary coordinate within `start..end`
    pub fn progress_at(z: f32, start: f32, end: f32) -> f32 {
        let span = start - end;
        if span == 0.0 {
            return 0.0;
        }
        ((start - z) / span).clamp(0.0, 1.0)
    }

    /// Adopt the camera's current Z as both target and current (clamped)
    pub fn sync_from<C: AxialWriter>(&mut self, camera: &C) {
        let z = clamp_unordered(camera.axial(), self.start, self.end);
        self.target = z;
        self.current = z;
    }

    /// Drain queued wheel events, step one frame and write Z to the camera
    pub fn apply<C: AxialWriter>(&mut self, camera: &mut C, dt: f32) -> f32 {
        self.pump();
        let z = self.update(dt);
        camera.set_axial(z);
        z
    }

    /// Process wheel events queued since the last frame
    pub fn pump(&mut self) {
        let events = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return,
        };
        for event in events {
            if let InputEvent::Wheel { delta_y } = event {
                self.on_scroll(delta_y);
            }
        }
    }

    /// Start listening for wheel events on `hub`
    pub fn mount(&mut self, hub: &InputHub) {
        self.subscription = Some(hub.subscribe(EventKinds::WHEEL));
    }

    /// Stop listening; queued events are discarded
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    /// Return to the start of the corridor immediately
    pub fn reset(&mut self) {
        self.target = self.start;
        self.current = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AxialOnly {
        z: f32,
    }

    impl AxialWriter for AxialOnly {
        fn axial(&self) -> f32 {
            self.z
        }
        fn set_axial(&mut self, z: f32) {
            self.z = z;
        }
    }

    #[test]
    fn test_scroll_down_moves_forward() {
        let mut c = ScrollController::new(8.0, -15.0);
        let target = c.on_scroll(100.0);
        assert!((target - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_clamped_with_reversed_bounds() {
        let mut c = ScrollController::new(8.0, -15.0);
        c.on_scroll(-10_000.0);
        assert_eq!(c.target(), 8.0);
        c.on_scroll(10_000.0);
        assert_eq!(c.target(), -15.0);
    }

    #[test]
    fn test_target_clamped_with_ordered_bounds() {
        let mut c = ScrollController::new(-15.0, 8.0);
        c.on_scroll(-10_000.0);
        assert_eq!(c.target(), 8.0);
    }

    #[test]
    fn test_update_approaches_monotonically() {
        let mut c = ScrollController::new(8.0, -15.0);
        c.set_target(-15.0);
        let mut previous = c.current();
        for _ in 0..200 {
            let z = c.update(1.0 / 60.0);
            assert!(z <= previous);
            assert!(z >= -15.0);
            previous = z;
        }
    }

    #[test]
    fn test_progress_endpoints() {
        let mut c = ScrollController::new(8.0, -15.0);
        assert_eq!(c.progress(), 0.0);
        c.set_target(-15.0);
        c.smoothing = Smoothing::Fixed { factor: 1.0 };
        c.update(0.016);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_progress_zero_width_range() {
        let c = ScrollController::new(3.0, 3.0);
        assert_eq!(c.progress(), 0.0);
        assert!(!c.progress().is_nan());
    }

    #[test]
    fn test_progress_independent_of_bound_order() {
        assert_eq!(ScrollController::progress_at(-3.5, 8.0, -15.0), 0.5);
        assert_eq!(ScrollController::progress_at(-3.5, -15.0, 8.0), 0.5);
    }

    #[test]
    fn test_set_target_progress() {
        let mut c = ScrollController::new(8.0, -15.0);
        c.set_target_progress(0.5);
        assert!((c.target() - (-3.5)).abs() < 1e-5);
        c.set_target_progress(2.0);
        assert_eq!(c.target(), -15.0);
    }

    #[test]
    fn test_non_finite_target_ignored() {
        let mut c = ScrollController::new(8.0, -15.0);
        c.set_target(f32::NAN);
        assert_eq!(c.target(), 8.0);
    }

    #[test]
    fn test_apply_writes_only_axial() {
        let mut c = ScrollController::new(8.0, -15.0).with_smoothing(Smoothing::Fixed { factor: 0.5 });
        let mut cam = AxialOnly { z: 8.0 };
        c.set_target(0.0);
        let z = c.apply(&mut cam, 0.016);
        assert_eq!(z, 4.0);
        assert_eq!(cam.z, 4.0);
    }

    #[test]
    fn test_sync_from_clamps_camera_position() {
        let mut c = ScrollController::new(8.0, -15.0);
        c.sync_from(&AxialOnly { z: 50.0 });
        assert_eq!(c.current(), 8.0);
        assert_eq!(c.target(), 8.0);
    }

    #[test]
    fn test_mounted_controller_consumes_hub_events() {
        let hub = InputHub::new();
        let mut c = ScrollController::new(8.0, -15.0);
        c.mount(&hub);
        hub.dispatch(InputEvent::Wheel { delta_y: 200.0 });
        hub.dispatch(InputEvent::PointerMoved { x: 0.0, y: 0.0, width: 10, height: 10 });
        c.pump();
        assert!((c.target() - 6.0).abs() < 1e-5);

        c.unmount();
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(InputEvent::Wheel { delta_y: 200.0 });
        c.pump();
        assert!((c.target() - 6.0).abs() < 1e-5);
    }
}

//! Per-frame corridor system
//!
//! Owns the input hub, both camera controllers, the segment recycler and
//! the scene graph it feeds. Each frame:
//! - Delta time calculation
//! - Scroll controller writes the camera's Z
//! - Parallax controller writes X/Y and re-aims the camera
//! - Recycler recentres the segment window on the camera

use std::fmt;
use std::time::Instant;

use corridor_core::{RecyclerError, SceneGraph, SegmentRecycler, SegmentSink};
use corridor_input::{
    AxisConflict, AxisLedger, InputEvent, InputHub, ParallaxController, ScrollController,
    Section, SectionNav,
};
use corridor_math::{SmoothingError, Vec3};
use corridor_render::Camera3D;
use winit::event::WindowEvent;

use crate::config::{AppConfig, SmoothingConfig, SmoothingMode};

/// Longest step a single frame may take, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;

/// Result of a frame update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Whether geometry needs to be rebuilt and re-uploaded
    pub geometry_dirty: bool,
    /// Travel progress of the camera in [0, 1]
    pub progress: f32,
    /// Whether the active section changed this frame
    pub section_changed: bool,
}

/// Errors building the frame system from config
#[derive(Debug)]
pub enum FrameError {
    Recycler(RecyclerError),
    Axis(AxisConflict),
    Smoothing(SmoothingError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Recycler(e) => write!(f, "Segment recycler: {}", e),
            FrameError::Axis(e) => write!(f, "{}", e),
            FrameError::Smoothing(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<RecyclerError> for FrameError {
    fn from(e: RecyclerError) -> Self {
        FrameError::Recycler(e)
    }
}

impl From<AxisConflict> for FrameError {
    fn from(e: AxisConflict) -> Self {
        FrameError::Axis(e)
    }
}

impl From<SmoothingError> for FrameError {
    fn from(e: SmoothingError) -> Self {
        FrameError::Smoothing(e)
    }
}

/// Drives the controllers and the recycler once per rendered frame
pub struct FrameSystem {
    hub: InputHub,
    scroll: ScrollController,
    parallax: Option<ParallaxController>,
    recycler: SegmentRecycler,
    scene: SceneGraph,
    sections: SectionNav,
    ledger: AxisLedger,
    scroll_smoothing: SmoothingConfig,
    parallax_smoothing: SmoothingConfig,
    scroll_mode: SmoothingMode,
    parallax_mode: SmoothingMode,
    last_frame: Instant,
}

impl FrameSystem {
    pub fn new(config: &AppConfig) -> Result<Self, FrameError> {
        let hub = InputHub::new();
        let mut ledger = AxisLedger::new();

        ledger.claim("scroll", ScrollController::OWNED_AXES)?;
        config.scroll.smoothing.validate()?;
        let mut scroll = ScrollController::new(config.scroll.start_z, config.scroll.end_z)
            .with_speed(config.scroll.speed)
            .with_smoothing(config.scroll.smoothing.to_smoothing());
        scroll.mount(&hub);

        let parallax = if config.parallax.enabled {
            ledger.claim("parallax", ParallaxController::OWNED_AXES)?;
            config.parallax.smoothing.validate()?;
            let mut parallax = ParallaxController::new()
                .with_intensity(config.parallax.intensity)
                .with_vertical_damping(config.parallax.vertical_damping)
                .with_smoothing(config.parallax.smoothing.to_smoothing())
                .with_look_at(Vec3::from_array(config.parallax.look_at));
            parallax.mount(&hub);
            Some(parallax)
        } else {
            None
        };

        let recycler = SegmentRecycler::new(
            config.corridor.segment_length,
            config.corridor.window_radius,
        )?;

        log::info!(
            "Corridor: travel {} -> {}, segments of {} (radius {}), parallax {}",
            config.scroll.start_z,
            config.scroll.end_z,
            config.corridor.segment_length,
            config.corridor.window_radius,
            if parallax.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            hub,
            scroll,
            parallax,
            recycler,
            scene: SceneGraph::new(),
            sections: SectionNav::new(config.navigation.to_sections()),
            ledger,
            scroll_smoothing: config.scroll.smoothing.clone(),
            parallax_smoothing: config.parallax.smoothing.clone(),
            scroll_mode: config.scroll.smoothing.mode,
            parallax_mode: config.parallax.smoothing.mode,
            last_frame: Instant::now(),
        })
    }

    /// Adopt the camera's current Z as the scroll position
    pub fn attach(&mut self, camera: &Camera3D) {
        self.scroll.sync_from(camera);
        self.last_frame = Instant::now();
    }

    /// Forward a raw window event to the controllers
    ///
    /// Returns true if any controller queued it.
    pub fn dispatch(&self, event: &WindowEvent, viewport: (u32, u32)) -> bool {
        match InputEvent::from_window_event(event, viewport) {
            Some(input) => self.hub.dispatch(input) > 0,
            None => false,
        }
    }

    /// Run one frame using wall-clock delta time
    pub fn update(&mut self, camera: Option<&mut Camera3D>) -> FrameResult {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;
        self.step(camera, dt)
    }

    /// Run one frame with an explicit delta time
    ///
    /// Without a camera nothing is moved and no segments are instantiated.
    pub fn step(&mut self, camera: Option<&mut Camera3D>, dt: f32) -> FrameResult {
        let camera_z = match camera {
            Some(camera) => {
                self.scroll.apply(camera, dt);
                if let Some(parallax) = self.parallax.as_mut() {
                    parallax.apply(camera, dt);
                }
                Some(camera.position.z)
            }
            None => None,
        };

        self.recycler.sync(camera_z, &mut self.scene);

        let section_changed = self.sections.follow(self.target_progress());
        if section_changed {
            if let Some(section) = self.sections.active() {
                log::info!("Section: {}", section.title);
            }
        }

        FrameResult {
            geometry_dirty: self.scene.is_dirty(),
            progress: self.scroll.progress(),
            section_changed,
        }
    }

    pub fn next_section(&mut self) {
        let stop = self.sections.next().map(|s| s.progress);
        self.jump(stop);
    }

    pub fn prev_section(&mut self) {
        let stop = self.sections.prev().map(|s| s.progress);
        self.jump(stop);
    }

    pub fn first_section(&mut self) {
        let stop = self.sections.first().map(|s| s.progress);
        self.jump(stop);
    }

    pub fn last_section(&mut self) {
        let stop = self.sections.last().map(|s| s.progress);
        self.jump(stop);
    }

    pub fn select_section(&mut self, index: usize) {
        let stop = self.sections.select(index).map(|s| s.progress);
        self.jump(stop);
    }

    fn jump(&mut self, stop: Option<f32>) {
        if let Some(progress) = stop {
            self.scroll.set_target_progress(progress);
        }
    }

    /// Progress the scroll target is heading for
    fn target_progress(&self) -> f32 {
        let (start, end) = self.scroll.endpoints();
        ScrollController::progress_at(self.scroll.target(), start, end)
    }

    /// Flip each controller between fixed-factor and half-life smoothing
    ///
    /// Modes are tracked per controller, so a mixed configuration stays mixed.
    pub fn toggle_smoothing(&mut self) {
        self.scroll_mode = self.scroll_mode.toggled();
        self.scroll.smoothing = self.scroll_smoothing.smoothing_for(self.scroll_mode);
        if let Some(parallax) = self.parallax.as_mut() {
            self.parallax_mode = self.parallax_mode.toggled();
            parallax.smoothing = self.parallax_smoothing.smoothing_for(self.parallax_mode);
        }
        log::info!(
            "Smoothing: scroll {:?}, parallax {:?}",
            self.scroll_mode,
            self.parallax.as_ref().map(|_| self.parallax_mode)
        );
    }

    /// Back to the start of the corridor; the window is rebuilt next frame
    pub fn reset(&mut self, camera: &mut Camera3D) {
        camera.reset();
        self.scroll.reset();
        if let Some(parallax) = self.parallax.as_mut() {
            parallax.reset();
        }
        for index in self.recycler.reset() {
            self.scene.remove_segment(index);
        }
        self.sections.follow(self.target_progress());
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mark the scene as consumed after geometry was rebuilt
    pub fn clear_changes(&mut self) {
        self.scene.clear_changes();
    }

    pub fn recycler(&self) -> &SegmentRecycler {
        &self.recycler
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn parallax(&self) -> Option<&ParallaxController> {
        self.parallax.as_ref()
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.sections.active()
    }

    pub fn scroll_smoothing_mode(&self) -> SmoothingMode {
        self.scroll_mode
    }

    /// `None` when parallax is disabled
    pub fn parallax_smoothing_mode(&self) -> Option<SmoothingMode> {
        self.parallax.as_ref().map(|_| self.parallax_mode)
    }

    pub fn ledger(&self) -> &AxisLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_input::Axes;
    use corridor_math::Smoothing;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, MouseScrollDelta, TouchPhase};

    fn wheel(pixels: f64) -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -pixels)),
            phase: TouchPhase::Moved,
        }
    }

    fn cursor(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn system() -> (FrameSystem, Camera3D) {
        let config = AppConfig::default();
        let mut frame = FrameSystem::new(&config).unwrap();
        let camera = Camera3D::new(config.camera.start());
        frame.attach(&camera);
        (frame, camera)
    }

    #[test]
    fn test_first_frame_instantiates_window() {
        let (mut frame, mut camera) = system();
        let result = frame.step(Some(&mut camera), 1.0 / 60.0);

        assert!(result.geometry_dirty);
        assert_eq!(frame.scene().len(), 5);
        assert_eq!(result.progress, 0.0);
    }

    #[test]
    fn test_no_camera_renders_nothing() {
        let (mut frame, _camera) = system();
        let result = frame.step(None, 1.0 / 60.0);

        assert!(!result.geometry_dirty);
        assert!(frame.scene().is_empty());
        assert!(frame.recycler().current().is_none());
    }

    #[test]
    fn test_wheel_moves_camera_forward() {
        let (mut frame, mut camera) = system();
        assert!(frame.dispatch(&wheel(100.0), (800, 600)));

        frame.step(Some(&mut camera), 1.0 / 60.0);

        assert_eq!(frame.scroll().target(), 7.0);
        assert!(camera.position.z < 8.0);
        assert!(camera.position.z > 7.0);
    }

    #[test]
    fn test_pointer_offsets_camera() {
        let (mut frame, mut camera) = system();
        frame.dispatch(&cursor(800.0, 300.0), (800, 600));

        for _ in 0..400 {
            frame.step(Some(&mut camera), 1.0 / 60.0);
        }

        assert!((camera.position.x - 0.5).abs() < 1e-3);
        assert!(camera.position.y.abs() < 1e-3);
        assert_eq!(camera.target, Some(Vec3::new(0.0, 0.0, -60.0)));
    }

    #[test]
    fn test_parallax_disabled() {
        let mut config = AppConfig::default();
        config.parallax.enabled = false;
        let mut frame = FrameSystem::new(&config).unwrap();
        let mut camera = Camera3D::new(config.camera.start());

        assert!(!frame.dispatch(&cursor(0.0, 0.0), (800, 600)));
        frame.step(Some(&mut camera), 1.0 / 60.0);

        assert!(frame.parallax().is_none());
        assert_eq!(camera.target, None);
        assert_eq!(frame.ledger().claimed(), Axes::Z);
    }

    #[test]
    fn test_controllers_claim_disjoint_axes() {
        let (frame, _camera) = system();
        assert_eq!(frame.ledger().owner_of(Axes::Z), Some("scroll"));
        assert_eq!(frame.ledger().owner_of(Axes::X), Some("parallax"));
        assert_eq!(frame.ledger().owner_of(Axes::ORIENTATION), Some("parallax"));
    }

    #[test]
    fn test_invalid_segment_length_rejected() {
        let mut config = AppConfig::default();
        config.corridor.segment_length = 0.0;
        assert!(matches!(FrameSystem::new(&config), Err(FrameError::Recycler(_))));
    }

    #[test]
    fn test_section_navigation_sets_target() {
        let (mut frame, mut camera) = system();

        frame.last_section();
        assert_eq!(frame.scroll().target(), -15.0);
        let result = frame.step(Some(&mut camera), 1.0 / 60.0);
        assert!(!result.section_changed);
        assert_eq!(frame.active_section().map(|s| s.title.as_str()), Some("Contact"));

        frame.prev_section();
        assert!((frame.scroll().target() - -3.5).abs() < 1e-4);
        assert_eq!(frame.active_section().map(|s| s.title.as_str()), Some("Projects"));
    }

    #[test]
    fn test_wheel_updates_active_section() {
        let (mut frame, mut camera) = system();
        frame.step(Some(&mut camera), 1.0 / 60.0);
        assert_eq!(frame.active_section().map(|s| s.title.as_str()), Some("About"));

        frame.dispatch(&wheel(1200.0), (800, 600));
        let result = frame.step(Some(&mut camera), 1.0 / 60.0);

        assert!(result.section_changed);
        assert_eq!(frame.active_section().map(|s| s.title.as_str()), Some("Projects"));
    }

    #[test]
    fn test_toggle_smoothing_switches_mode() {
        let (mut frame, _camera) = system();
        assert_eq!(frame.scroll_smoothing_mode(), SmoothingMode::Legacy);

        frame.toggle_smoothing();
        assert_eq!(frame.scroll_smoothing_mode(), SmoothingMode::HalfLife);
        assert!(frame.scroll().smoothing.is_frame_rate_independent());

        frame.toggle_smoothing();
        assert_eq!(frame.scroll_smoothing_mode(), SmoothingMode::Legacy);
    }

    #[test]
    fn test_toggle_smoothing_with_mixed_modes() {
        let mut config = AppConfig::default();
        config.parallax.smoothing.mode = SmoothingMode::HalfLife;
        let mut frame = FrameSystem::new(&config).unwrap();

        assert_eq!(frame.scroll_smoothing_mode(), SmoothingMode::Legacy);
        assert_eq!(frame.parallax_smoothing_mode(), Some(SmoothingMode::HalfLife));
        assert_eq!(
            frame.parallax().unwrap().smoothing,
            Smoothing::HalfLife { seconds: 0.23 }
        );

        frame.toggle_smoothing();

        assert_eq!(frame.scroll_smoothing_mode(), SmoothingMode::HalfLife);
        assert_eq!(frame.parallax_smoothing_mode(), Some(SmoothingMode::Legacy));
        assert_eq!(frame.scroll().smoothing, Smoothing::HalfLife { seconds: 0.11 });
        assert_eq!(frame.parallax().unwrap().smoothing, Smoothing::Fixed { factor: 0.05 });
    }

    #[test]
    fn test_zero_smoothing_factor_rejected() {
        let mut config = AppConfig::default();
        config.scroll.smoothing.factor = 0.0;
        assert!(matches!(
            FrameSystem::new(&config),
            Err(FrameError::Smoothing(SmoothingError::InvalidFactor(_)))
        ));

        let mut config = AppConfig::default();
        config.parallax.smoothing.half_life = f32::NAN;
        assert!(matches!(
            FrameSystem::new(&config),
            Err(FrameError::Smoothing(SmoothingError::InvalidHalfLife(_)))
        ));
    }

    #[test]
    fn test_disabled_parallax_skips_smoothing_check() {
        let mut config = AppConfig::default();
        config.parallax.enabled = false;
        config.parallax.smoothing.factor = 0.0;
        let frame = FrameSystem::new(&config).unwrap();
        assert_eq!(frame.parallax_smoothing_mode(), None);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let (mut frame, mut camera) = system();
        frame.dispatch(&wheel(5000.0), (800, 600));
        for _ in 0..200 {
            frame.step(Some(&mut camera), 1.0 / 60.0);
        }
        frame.clear_changes();

        frame.reset(&mut camera);
        assert!(frame.scene().is_empty());
        assert!(frame.scene().is_dirty());
        assert_eq!(frame.scroll().current(), 8.0);

        let result = frame.step(Some(&mut camera), 1.0 / 60.0);
        assert_eq!(frame.scene().len(), 5);
        assert_eq!(result.progress, 0.0);
    }
}

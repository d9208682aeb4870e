//! Corridor - scroll-driven 3D corridor viewer
//!
//! Wheel input moves the camera down a recycled corridor, the pointer sways
//! it sideways, and number/page keys jump between sections.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use corridor::config::AppConfig;
use corridor::input::{InputAction, InputMapper};
use corridor::systems::{FrameSystem, RenderSystem, WindowSystem};
use corridor_render::{context::RenderError, Camera3D, CorridorGeometry, CorridorStyle};

/// Main application state
struct App {
    config: AppConfig,
    style: CorridorStyle,
    frame: FrameSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Created with the window; until then nothing is rendered
    camera: Option<Camera3D>,
    geometry: CorridorGeometry,
}

impl App {
    fn new(config: AppConfig, frame: FrameSystem) -> Self {
        Self {
            style: config.corridor.to_style(),
            config,
            frame,
            window: None,
            render: None,
            camera: None,
            geometry: CorridorGeometry::new(),
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                if let Some(camera) = self.camera.as_mut() {
                    self.frame.reset(camera);
                    log::info!("Camera reset to start of corridor");
                }
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleSmoothing => {
                self.frame.toggle_smoothing();
            }
            InputAction::NextSection => self.frame.next_section(),
            InputAction::PrevSection => self.frame.prev_section(),
            InputAction::FirstSection => self.frame.first_section(),
            InputAction::LastSection => self.frame.last_section(),
            InputAction::SelectSection(index) => self.frame.select_section(index),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.frame.update(self.camera.as_mut());

        if result.geometry_dirty {
            self.geometry = CorridorGeometry::from_scene(self.frame.scene(), &self.style);
            if let Some(render) = self.render.as_mut() {
                render.upload_geometry(&self.geometry);
            }
            self.frame.clear_changes();
        }

        if let Some(window) = &self.window {
            if self.config.debug.show_progress_in_title {
                let section = self.frame.active_section().map(|s| s.title.as_str());
                window.update_title(result.progress, section);
            }
        }

        if let (Some(render), Some(camera)) = (self.render.as_mut(), self.camera.as_ref()) {
            match render.render_frame(camera) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    let (width, height) = render.size();
                    log::warn!("Surface lost, reconfiguring");
                    render.resize(width, height);
                }
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise GPU: {}", e);
                event_loop.exit();
                return;
            }
        };

        let camera = Camera3D::new(self.config.camera.start());
        self.frame.attach(&camera);

        window.request_redraw();
        self.camera = Some(camera);
        self.render = Some(render);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event: ref key_event, .. } => {
                if let PhysicalKey::Code(key) = key_event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, key_event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::CursorMoved { .. } | WindowEvent::MouseWheel { .. } => {
                if let Some(window) = &self.window {
                    self.frame.dispatch(&event, window.viewport());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    // Config first so its log level can seed the logger
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Corridor");

    let frame = match FrameSystem::new(&config) {
        Ok(frame) => frame,
        Err(e) => {
            log::error!("Invalid corridor configuration: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, frame);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}

//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CORRIDOR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use corridor_input::Section;
use corridor_math::{Smoothing, SmoothingError, Vec3};
use corridor_render::{CheckerboardPattern, CorridorStyle};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Scroll-driven travel
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Pointer parallax
    #[serde(default)]
    pub parallax: ParallaxConfig,
    /// Corridor layout and colors
    #[serde(default)]
    pub corridor: CorridorConfig,
    /// Section navigation stops
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CORRIDOR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CORRIDOR_SCROLL__SPEED=0.02 -> scroll.speed = 0.02
        figment = figment.merge(Env::prefixed("CORRIDOR_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Corridor".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 8.0],
            fov: 60.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl CameraConfig {
    pub fn start(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }
}

/// Which smoothing formula a controller uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Fixed factor per frame (frame-rate dependent)
    Legacy,
    /// Half-life in seconds (frame-rate independent)
    HalfLife,
}

impl SmoothingMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SmoothingMode::Legacy => SmoothingMode::HalfLife,
            SmoothingMode::HalfLife => SmoothingMode::Legacy,
        }
    }
}

/// Smoothing parameters; both are kept so the mode can be toggled at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    pub mode: SmoothingMode,
    /// Per-frame lerp factor for `legacy`
    pub factor: f32,
    /// Seconds for `half_life`
    pub half_life: f32,
}

impl SmoothingConfig {
    pub fn to_smoothing(&self) -> Smoothing {
        self.smoothing_for(self.mode)
    }

    pub fn smoothing_for(&self, mode: SmoothingMode) -> Smoothing {
        match mode {
            SmoothingMode::Legacy => Smoothing::Fixed { factor: self.factor },
            SmoothingMode::HalfLife => Smoothing::HalfLife { seconds: self.half_life },
        }
    }

    /// Check both parameter sets, since the mode can be toggled at runtime
    pub fn validate(&self) -> Result<(), SmoothingError> {
        self.smoothing_for(SmoothingMode::Legacy).validate()?;
        self.smoothing_for(SmoothingMode::HalfLife).validate()
    }
}

/// Scroll-driven travel along the corridor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Z where travel starts (progress 0)
    pub start_z: f32,
    /// Z where travel ends (progress 1); may be below or above `start_z`
    pub end_z: f32,
    /// World units per pixel of wheel delta
    pub speed: f32,
    pub smoothing: SmoothingConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            start_z: 8.0,
            end_z: -15.0,
            speed: 0.01,
            smoothing: SmoothingConfig {
                mode: SmoothingMode::Legacy,
                factor: 0.1,
                half_life: 0.11,
            },
        }
    }
}

/// Pointer parallax
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub enabled: bool,
    /// Maximum horizontal offset in world units
    pub intensity: f32,
    /// Vertical offset relative to horizontal
    pub vertical_damping: f32,
    /// Fixed point the camera keeps facing [x, y, z]
    pub look_at: [f32; 3],
    pub smoothing: SmoothingConfig,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.5,
            vertical_damping: 0.6,
            look_at: [0.0, 0.0, -60.0],
            smoothing: SmoothingConfig {
                mode: SmoothingMode::Legacy,
                factor: 0.05,
                half_life: 0.23,
            },
        }
    }
}

/// Corridor layout and colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Length of one recycled segment along Z
    pub segment_length: f32,
    /// Segments kept on each side of the camera's segment
    pub window_radius: u32,
    pub width: f32,
    pub height: f32,
    pub rib_spacing: f32,
    pub rib_thickness: f32,
    /// Floor checker cell size
    pub tile_size: f32,
    pub floor_colors: [[f32; 4]; 2],
    pub wall_color: [f32; 4],
    pub ceiling_color: [f32; 4],
    pub rib_color: [f32; 4],
}

impl Default for CorridorConfig {
    fn default() -> Self {
        let style = CorridorStyle::default();
        Self {
            segment_length: 40.0,
            window_radius: 2,
            width: style.width,
            height: style.height,
            rib_spacing: style.rib_spacing,
            rib_thickness: style.rib_thickness,
            tile_size: style.floor.cell_size,
            floor_colors: [style.floor.color_a, style.floor.color_b],
            wall_color: style.wall_color,
            ceiling_color: style.ceiling_color,
            rib_color: style.rib_color,
        }
    }
}

impl CorridorConfig {
    pub fn to_style(&self) -> CorridorStyle {
        CorridorStyle {
            width: self.width,
            height: self.height,
            rib_spacing: self.rib_spacing,
            rib_thickness: self.rib_thickness,
            floor: CheckerboardPattern::new(self.floor_colors[0], self.floor_colors[1], self.tile_size),
            wall_color: self.wall_color,
            ceiling_color: self.ceiling_color,
            rib_color: self.rib_color,
            ..CorridorStyle::default()
        }
    }
}

/// A named navigation stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title: String,
    /// Travel progress in [0, 1]
    pub progress: f32,
}

/// Section navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub sections: Vec<SectionConfig>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionConfig { title: "About".to_string(), progress: 0.0 },
                SectionConfig { title: "Projects".to_string(), progress: 0.5 },
                SectionConfig { title: "Contact".to_string(), progress: 1.0 },
            ],
        }
    }
}

impl NavigationConfig {
    pub fn to_sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|s| Section::new(s.title.clone(), s.progress))
            .collect()
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background (and fog) color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z]
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Exponential fog density per world unit
    pub fog_density: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.05, 1.0],
            light_dir: [0.3, 1.0, 0.5],
            ambient_strength: 0.35,
            diffuse_strength: 0.65,
            fog_density: 0.02,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` overrides
    pub log_level: String,
    /// Show travel progress and active section in the window title
    pub show_progress_in_title: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_progress_in_title: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

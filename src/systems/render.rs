//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Corridor render pipeline
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use corridor_math::{mat4, Vec3};
use corridor_render::{
    context::{RenderContext, RenderError},
    camera3d::Camera3D,
    pipeline::{RenderPipeline, RenderUniforms},
    CorridorGeometry,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    render_pipeline: RenderPipeline,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut render_pipeline = RenderPipeline::new(&context.device, context.config.format);
        render_pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        Ok(Self {
            context,
            render_pipeline,
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.render_pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Upload geometry to GPU
    pub fn upload_geometry(&mut self, geometry: &CorridorGeometry) {
        self.render_pipeline.upload_vertices(
            &self.context.device,
            &self.context.queue,
            &geometry.vertices,
        );
        log::debug!("Uploaded {} corridor vertices", geometry.vertex_count());
    }

    /// Render a single frame
    pub fn render_frame(&mut self, camera: &Camera3D) -> Result<(), RenderError> {
        let uniforms = frame_uniforms(
            &self.render_config,
            &self.camera_config,
            camera,
            self.context.aspect_ratio(),
        );
        self.render_pipeline
            .update_uniforms(&self.context.queue, &uniforms);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        self.render_pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Uniforms for one frame; fog fades into the background color
fn frame_uniforms(
    render: &RenderingConfig,
    camera_cfg: &CameraConfig,
    camera: &Camera3D,
    aspect: f32,
) -> RenderUniforms {
    let projection_matrix = mat4::perspective(
        camera_cfg.fov.to_radians(),
        aspect,
        camera_cfg.near,
        camera_cfg.far,
    );
    let light_dir = Vec3::from_array(render.light_dir).normalized();

    RenderUniforms {
        view_matrix: camera.view_matrix(),
        projection_matrix,
        light_dir: light_dir.to_array(),
        ambient_strength: render.ambient_strength,
        fog_color: render.background_color,
        diffuse_strength: render.diffuse_strength,
        fog_density: render.fog_density,
        _padding: [0.0; 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_frame_uniforms_use_config() {
        let render = RenderingConfig::default();
        let camera_cfg = CameraConfig::default();
        let camera = Camera3D::default();

        let uniforms = frame_uniforms(&render, &camera_cfg, &camera, 16.0 / 9.0);

        assert_eq!(uniforms.fog_color, render.background_color);
        assert_eq!(uniforms.fog_density, render.fog_density);
        assert_eq!(uniforms.view_matrix, camera.view_matrix());
        let len = Vec3::from_array(uniforms.light_dir).length();
        assert!((len - 1.0).abs() < 1e-5);
    }
}

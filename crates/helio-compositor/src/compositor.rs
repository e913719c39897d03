//! The frame compositor: GPU resources owned across frames and the
//! per-frame render sequence.

use helio_camera::CameraControls;
use helio_render::{
    DepthBuffer, DrawMode, FrameEncoder, FramePassBuilder, FrameUniforms, ModePipelines,
    RenderContext, SurfaceError, ViewportTracker,
};
use helio_scene::{DAY_MAP, NIGHT_MAP, Scene};

use crate::uniforms::assemble_frame;

/// Current window measurements, sampled by the driver loop each frame.
#[derive(Clone, Copy, Debug)]
pub struct DisplayMetrics {
    /// Displayed width in logical pixels.
    pub logical_width: f64,
    /// Displayed height in logical pixels.
    pub logical_height: f64,
    /// Physical pixels per logical pixel.
    pub scale_factor: f64,
}

/// Errors raised during compositor construction or a frame render.
#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    /// The scene is missing a texture the shading model requires.
    #[error("scene is missing required texture '{0}'")]
    MissingTexture(&'static str),

    /// The surface could not provide a frame.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Owns the pipelines, uniform buffer, bind groups, depth buffer, and
/// viewport tracker. Built exactly once, before the first frame.
pub struct FrameCompositor {
    pipelines: ModePipelines,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    depth: DepthBuffer,
    viewport: ViewportTracker,
}

impl FrameCompositor {
    /// Build all long-lived GPU resources. The texture bind group is
    /// seeded here from the scene's named textures and never rebuilt.
    pub fn new(ctx: &RenderContext, scene: &Scene) -> Result<Self, CompositorError> {
        let pipelines = ModePipelines::new(&ctx.device, ctx.surface_format);

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame-uniforms"),
            size: FrameUniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-uniform-bind-group"),
            layout: &pipelines.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let day = scene
            .textures
            .get(DAY_MAP)
            .ok_or(CompositorError::MissingTexture(DAY_MAP))?;
        let night = scene
            .textures
            .get(NIGHT_MAP)
            .ok_or(CompositorError::MissingTexture(NIGHT_MAP))?;

        let texture_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("map-texture-bind-group"),
            layout: &pipelines.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&day.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&night.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(scene.textures.map_sampler()),
                },
            ],
        });

        let depth = DepthBuffer::new(
            &ctx.device,
            ctx.surface_config.width,
            ctx.surface_config.height,
        );

        log::info!("Frame compositor initialized");

        Ok(Self {
            pipelines,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            depth,
            viewport: ViewportTracker::new(),
        })
    }

    /// Render one frame.
    ///
    /// Sizing runs first so the surface backing store matches the
    /// displayed size before the viewport is used. Everything bound for
    /// the draw lives inside a single render pass; no binding state
    /// survives into the next frame.
    pub fn render(
        &mut self,
        ctx: &mut RenderContext,
        scene: &Scene,
        controls: &CameraControls,
        display: DisplayMetrics,
    ) -> Result<(), CompositorError> {
        if let Some(backing) = self.viewport.update(
            display.logical_width,
            display.logical_height,
            display.scale_factor,
        ) {
            ctx.resize(backing.width, backing.height);
            self.depth.resize(&ctx.device, backing.width, backing.height);
        }
        // update() has run at least once, so a backing size exists.
        let aspect = self
            .viewport
            .backing()
            .map(|b| b.aspect_ratio())
            .unwrap_or(1.0);

        let frame = assemble_frame(scene.calculated_moment(), controls, aspect);
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.uniforms));

        let surface_texture = ctx.get_current_texture()?;
        let mut encoder = FrameEncoder::new(&ctx.device, &ctx.queue, surface_texture);

        let pass_builder = FramePassBuilder::new()
            .label("globe-pass")
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE);

        {
            let mut pass = encoder.begin_render_pass(&pass_builder);

            // Pipeline and mesh buffer are selected in one place so they
            // can never switch independently.
            let (pipeline, mesh) = match frame.mode {
                DrawMode::Sphere => (&self.pipelines.sphere, &scene.sphere_buffer),
                DrawMode::Plane => (&self.pipelines.plane, &scene.plane_buffer),
            };

            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_bind_group(1, &self.texture_bind_group, &[]);
            mesh.bind(&mut pass);
            mesh.draw(&mut pass);
        }

        encoder.submit();
        Ok(())
    }
}

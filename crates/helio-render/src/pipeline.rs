//! The two mode pipelines and the per-frame uniform layout.
//!
//! One WGSL module carries both vertex entry points (`vs_sphere`,
//! `vs_plane`) and the single fragment entry point they share. The two
//! render pipelines differ only in which vertex entry they use; depth
//! test, back-face culling, and the opaque color target are identical.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::buffer::VertexPositionNormalUv;
use crate::depth::DepthBuffer;

/// Per-frame uniforms, rebuilt from scratch every frame and written to the
/// uniform buffer in one `write_buffer` call. Both eye vectors are present
/// regardless of which mode is active.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Model matrix; identity for both meshes.
    pub model: [[f32; 4]; 4],
    /// World-to-camera view matrix (inverse of the look-at matrix).
    pub view: [[f32; 4]; 4],
    /// Perspective projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Sphere-rig eye position (w unused).
    pub sphere_eye: [f32; 4],
    /// Plane-rig eye position (w unused).
    pub plane_eye: [f32; 4],
    /// Direction from the globe center toward the sun (w unused).
    pub light_direction: [f32; 4],
    /// Current moment in seconds since the Unix epoch.
    pub time: f32,
    /// Padding for 16-byte struct alignment.
    pub _padding: [f32; 3],
}

impl FrameUniforms {
    /// Byte size of the uniform block (and the GPU buffer backing it).
    pub const SIZE: u64 = std::mem::size_of::<FrameUniforms>() as u64;
}

/// Which of the two fixed draw modes is active this frame.
///
/// The mode is derived from `sphere_mode` alone; the compositor resolves
/// it to a (pipeline, mesh buffer) pair in a single match so the two can
/// never switch independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Sphere,
    Plane,
}

impl DrawMode {
    /// Derive the mode from the camera's `sphere_mode` flag.
    pub fn from_sphere_mode(sphere_mode: bool) -> Self {
        if sphere_mode {
            DrawMode::Sphere
        } else {
            DrawMode::Plane
        }
    }
}

/// The two render pipelines plus the bind group layouts they share.
pub struct ModePipelines {
    /// Pipeline using the `vs_sphere` vertex entry.
    pub sphere: wgpu::RenderPipeline,
    /// Pipeline using the `vs_plane` vertex entry.
    pub plane: wgpu::RenderPipeline,
    /// Group 0: the frame uniform buffer.
    pub uniform_bind_group_layout: wgpu::BindGroupLayout,
    /// Group 1: day map, night map, shared sampler.
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl ModePipelines {
    /// Compile the shared shader module and build both pipelines.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe-shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_SHADER_SOURCE.into()),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frame-uniform-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(FrameUniforms::SIZE),
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("map-texture-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            immediate_size: 0,
        });

        let sphere = build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            "vs_sphere",
            "globe-sphere-pipeline",
            surface_format,
        );
        let plane = build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            "vs_plane",
            "globe-plane-pipeline",
            surface_format,
        );

        Self {
            sphere,
            plane,
            uniform_bind_group_layout,
            texture_bind_group_layout,
        }
    }

    /// The pipeline for a draw mode.
    pub fn pipeline(&self, mode: DrawMode) -> &wgpu::RenderPipeline {
        match mode {
            DrawMode::Sphere => &self.sphere,
            DrawMode::Plane => &self.plane,
        }
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_entry: &str,
    label: &str,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vertex_entry),
            buffers: &[VertexPositionNormalUv::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: true,
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// WGSL for both vertex stages and the shared fragment stage.
pub const GLOBE_SHADER_SOURCE: &str = r#"
struct FrameUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    sphere_eye: vec4<f32>,
    plane_eye: vec4<f32>,
    light_direction: vec4<f32>,
    time: f32,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniforms;

@group(1) @binding(0)
var day_map: texture_2d<f32>;
@group(1) @binding(1)
var night_map: texture_2d<f32>;
@group(1) @binding(2)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) globe_normal: vec3<f32>,
};

const PI: f32 = 3.14159265358979;

@vertex
fn vs_sphere(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = frame.model * vec4<f32>(in.position, 1.0);
    out.clip_position = frame.projection * frame.view * world;
    out.uv = in.uv;
    out.globe_normal = (frame.model * vec4<f32>(in.normal, 0.0)).xyz;
    return out;
}

@vertex
fn vs_plane(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = frame.model * vec4<f32>(in.position, 1.0);
    out.clip_position = frame.projection * frame.view * world;
    out.uv = in.uv;
    // Reconstruct the globe normal for this map point so the flat map
    // shares the sphere's day/night shading.
    let lon = in.position.x * PI;
    let lat = in.position.z * PI;
    out.globe_normal = vec3<f32>(-cos(lat) * cos(lon), sin(lat), -cos(lat) * sin(lon));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let day = textureSample(day_map, map_sampler, in.uv);
    let night = textureSample(night_map, map_sampler, in.uv);
    let daylight = dot(normalize(in.globe_normal), frame.light_direction.xyz);
    let blend = smoothstep(-0.1, 0.1, daylight);
    let color = mix(night.rgb, day.rgb, blend);
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_device() -> Option<wgpu::Device> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions::default())
                .await
                .ok()?;

            let (device, _queue) = adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()?;

            Some(device)
        })
    }

    #[test]
    fn test_frame_uniforms_size_and_alignment() {
        // 3 mat4 + 3 vec4 + time + padding = 256 bytes, 16-byte aligned.
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 256);
        assert_eq!(FrameUniforms::SIZE, 256);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn test_draw_mode_derived_solely_from_flag() {
        assert_eq!(DrawMode::from_sphere_mode(true), DrawMode::Sphere);
        assert_eq!(DrawMode::from_sphere_mode(false), DrawMode::Plane);
    }

    #[test]
    fn test_shader_has_two_vertex_entries_one_fragment() {
        assert!(GLOBE_SHADER_SOURCE.contains("fn vs_sphere"));
        assert!(GLOBE_SHADER_SOURCE.contains("fn vs_plane"));
        assert_eq!(
            GLOBE_SHADER_SOURCE.matches("@fragment").count(),
            1,
            "both modes must share a single fragment stage"
        );
    }

    #[test]
    fn test_shader_declares_full_uniform_set() {
        for field in [
            "model",
            "view",
            "projection",
            "sphere_eye",
            "plane_eye",
            "light_direction",
            "time",
        ] {
            assert!(
                GLOBE_SHADER_SOURCE.contains(field),
                "uniform field '{field}' missing from shader"
            );
        }
    }

    #[test]
    fn test_pipeline_creation_succeeds() {
        let Some(device) = create_test_device() else {
            return;
        };
        let pipelines = ModePipelines::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb);
        // Selecting either mode yields a pipeline; creation not panicking
        // also validates the shader entry points.
        let _ = pipelines.pipeline(DrawMode::Sphere);
        let _ = pipelines.pipeline(DrawMode::Plane);
    }

    #[test]
    fn test_uniform_bind_group_accepts_256_byte_buffer() {
        let Some(device) = create_test_device() else {
            return;
        };
        let pipelines = ModePipelines::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("test-frame-uniforms"),
            size: FrameUniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: false,
        });
        let _bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("test"),
            layout: &pipelines.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        // If create_bind_group does not panic, the layout is correct.
    }
}

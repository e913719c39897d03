//! Thin wgpu wrapper: device/surface context, lazy viewport tracking, mesh
//! and texture resources, and the two mode pipelines the viewer draws with.

pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod texture;
pub mod viewport;

pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionNormalUv};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{DepthAttachmentConfig, FrameEncoder, FramePassBuilder, TRANSPARENT_BLACK};
pub use pipeline::{DrawMode, FrameUniforms, GLOBE_SHADER_SOURCE, ModePipelines};
pub use texture::{ManagedTexture, TextureError, TextureManager};
pub use viewport::{BackingSize, DEFAULT_SCALE_FACTOR, ViewportTracker};

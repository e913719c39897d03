//! The frame compositor: per-frame camera and lighting transforms, uniform
//! assembly, and draw submission.
//!
//! One [`FrameCompositor`] is built once after GPU initialization and then
//! driven once per animation tick. Each frame it derives the sun direction
//! from the scene's moment, both camera rigs from the control values, the
//! view/projection pair for the active mode, and submits exactly one
//! indexed draw.

mod compositor;
mod uniforms;

pub use compositor::{CompositorError, DisplayMetrics, FrameCompositor};
pub use uniforms::{FrameState, assemble_frame};

//! # Vertex Stage
//!
//! **The world / projection-view vertex transform, on the CPU and on the GPU.**
//!
//! Every vertex is mapped to clip space as
//! `proj_view_matrix * (world_matrix * vec4(position, 1.0))`, and its texture
//! coordinate is forwarded untouched. The world transform is always applied
//! first.
//!
//! ## Quick Start
//!
//! ```
//! use vertex_stage::*;
//!
//! let uniforms = TransformUniforms::new(
//!     Mat4::from_translation(Vec3::new(16.0, 0.0, -32.0)),
//!     Mat4::perspective_rh(1.2, 16.0 / 9.0, 0.1, 500.0),
//! );
//! let stage = VertexStage::new(&uniforms);
//!
//! let vertices = [
//!     Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 2.0]),
//!     Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0, 2.0]),
//!     Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0, 2.0]),
//! ];
//! let out = stage.run(&vertices);
//! assert_eq!(out[1].tex, Vec3::new(1.0, 0.0, 2.0));
//! ```
//!
//! For the GPU, [`TransformPass`] runs the same transform as a WGSL vertex
//! shader with the uniforms bound at group 0.

mod gpu;
mod logging;
mod stage;
mod transform_pass;
mod uniforms;
mod vertex;

pub use gpu::{GpuConfig, GpuContext, GpuError};
pub use logging::{DEFAULT_FILTER, LoggingConfig, init_logging};
pub use stage::{VertexStage, transform_vertex};
pub use transform_pass::{
    SHADER_SOURCE, TransformPass, TransformPassConfig, UNIFORM_GROUP, VERTEX_ENTRY,
};
pub use uniforms::{TransformUniforms, TransformUniformsRaw, UniformError, UniformSlot};
pub use vertex::{Vertex, VertexOutput};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3, Vec4};

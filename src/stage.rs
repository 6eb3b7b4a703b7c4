//! The vertex transform stage, evaluated on the CPU.
//!
//! Each invocation maps one [`Vertex`] to a [`VertexOutput`]:
//!
//! ```text
//! world_pos     = world_matrix * vec4(position, 1.0)
//! clip_position = proj_view_matrix * world_pos
//! tex           = tex_coords
//! ```
//!
//! The world transform is always applied first. The two matrices are never
//! pre-multiplied, so results match the GPU entry point in
//! `shaders/transform.wgsl` operation for operation.
//!
//! # Example
//!
//! ```
//! use vertex_stage::{Mat4, TransformUniforms, Vec4, Vertex, VertexStage};
//!
//! let uniforms = TransformUniforms::new(
//!     Mat4::IDENTITY,
//!     Mat4::from_diagonal(Vec4::new(2.0, 2.0, 2.0, 1.0)),
//! );
//! let stage = VertexStage::new(&uniforms);
//!
//! let out = stage.invoke(&Vertex::new([1.0, 0.0, 0.0], [0.5, 0.25, 0.0]));
//! assert_eq!(out.clip_position, Vec4::new(2.0, 0.0, 0.0, 1.0));
//! ```

use crate::uniforms::TransformUniforms;
use crate::vertex::{Vertex, VertexOutput};
use glam::{Vec3, Vec4};

/// Runs the stage for a single vertex.
///
/// Pure and total: no validation, no side effects. Non-finite inputs
/// propagate through the multiplication.
pub fn transform_vertex(vertex: &Vertex, uniforms: &TransformUniforms) -> VertexOutput {
    let world_pos = uniforms.world_matrix * vertex.homogeneous_position();
    let clip_position = uniforms.proj_view_matrix * world_pos;

    VertexOutput {
        clip_position,
        tex: Vec3::from_array(vertex.tex_coords),
    }
}

/// The stage bound to the uniforms of one draw.
///
/// Borrowing the uniforms for `'a` keeps them immutable for as long as the
/// draw can still run invocations.
#[derive(Copy, Clone, Debug)]
pub struct VertexStage<'a> {
    uniforms: &'a TransformUniforms,
}

impl<'a> VertexStage<'a> {
    /// Binds the stage to the uniforms of one draw.
    pub fn new(uniforms: &'a TransformUniforms) -> Self {
        Self { uniforms }
    }

    /// The uniforms this draw reads.
    pub fn uniforms(&self) -> &'a TransformUniforms {
        self.uniforms
    }

    /// Runs one invocation.
    pub fn invoke(&self, vertex: &Vertex) -> VertexOutput {
        transform_vertex(vertex, self.uniforms)
    }

    /// Runs the stage over every vertex, preserving input order.
    pub fn run(&self, vertices: &[Vertex]) -> Vec<VertexOutput> {
        let mut out = Vec::with_capacity(vertices.len());
        self.run_into(vertices, &mut out);
        out
    }

    /// Like [`run`](Self::run), but writes into `out` so its allocation can be
    /// reused across draws. `out` is cleared first.
    pub fn run_into(&self, vertices: &[Vertex], out: &mut Vec<VertexOutput>) {
        log::trace!("vertex stage: {} invocations", vertices.len());
        out.clear();
        out.extend(vertices.iter().map(|v| self.invoke(v)));
    }

    /// Runs the stage across up to `workers` scoped threads.
    ///
    /// The input is split into contiguous chunks, one per worker, and each
    /// worker writes only its own chunk of the output. Output order equals
    /// input order and the result is identical to [`run`](Self::run).
    /// `workers == 0` is treated as 1, and the count is capped at
    /// [`std::thread::available_parallelism`] and the vertex count.
    pub fn run_parallel(&self, vertices: &[Vertex], workers: usize) -> Vec<VertexOutput> {
        let workers = worker_count(workers, vertices.len());
        if workers == 1 {
            return self.run(vertices);
        }

        let chunk_len = vertices.len().div_ceil(workers);
        log::trace!(
            "vertex stage: {} invocations over {} workers",
            vertices.len(),
            vertices.len().div_ceil(chunk_len)
        );

        let mut out = vec![
            VertexOutput {
                clip_position: Vec4::ZERO,
                tex: Vec3::ZERO,
            };
            vertices.len()
        ];

        std::thread::scope(|scope| {
            for (input, output) in vertices.chunks(chunk_len).zip(out.chunks_mut(chunk_len)) {
                scope.spawn(move || {
                    for (v, slot) in input.iter().zip(output.iter_mut()) {
                        *slot = self.invoke(v);
                    }
                });
            }
        });

        out
    }
}

fn worker_count(requested: usize, vertices: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, |n| n.get());
    requested.min(available).min(vertices).max(1)
}

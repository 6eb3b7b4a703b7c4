//! Per-vertex records that cross the stage boundary.
//!
//! - [`Vertex`] — the attribute record read by the stage (position and texture coordinates)
//! - [`VertexOutput`] — the clip-space position and forwarded texture coordinate it produces
//!
//! # Vertex Layout
//!
//! The [`Vertex`] struct uses the following GPU layout (24 bytes per vertex):
//!
//! | Attribute  | Format    | Offset | Shader Location |
//! |------------|-----------|--------|-----------------|
//! | position   | Float32x3 | 0      | 0               |
//! | tex_coords | Float32x3 | 12     | 1               |
//!
//! This layout is exposed via [`Vertex::LAYOUT`] for pipeline creation.

use glam::{Vec3, Vec4};

/// A vertex attribute record: model-space position plus a texture coordinate triple.
///
/// Uses `#[repr(C)]` for a predictable memory layout and derives
/// [`bytemuck::Pod`] and [`bytemuck::Zeroable`] so slices can be cast to bytes
/// for upload.
///
/// The third texture coordinate usually selects a layer of a texture array.
/// The stage never reads it; it is forwarded with the other two.
///
/// # Example
///
/// ```
/// use vertex_stage::Vertex;
///
/// let vertex = Vertex::new(
///     [1.0, 0.0, 0.0],   // position
///     [0.5, 0.25, 3.0],  // u, v, array layer
/// );
/// assert_eq!(vertex.tex_coords[2], 3.0);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in object/model space.
    pub position: [f32; 3],
    /// Texture coordinates, typically in [0, 1] per axis. Not validated.
    pub tex_coords: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    ///
    /// - **Array stride**: 24 bytes per vertex
    /// - **Step mode**: Per-vertex
    /// - **Attributes**: position (loc 0), tex_coords (loc 1)
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // tex_coords
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    /// Creates a vertex from a model-space position and texture coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use vertex_stage::Vertex;
    ///
    /// let vertex = Vertex::new(
    ///     [0.0, 1.0, 0.0],   // top of a block face
    ///     [0.0, 0.0, 7.0],   // top-left texel of array layer 7
    /// );
    /// assert_eq!(vertex.position[1], 1.0);
    /// ```
    pub fn new(position: [f32; 3], tex_coords: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }

    /// Position promoted to homogeneous form with `w = 1.0`.
    pub fn homogeneous_position(&self) -> Vec4 {
        Vec3::from_array(self.position).extend(1.0)
    }
}

/// What one invocation of the stage produces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexOutput {
    /// Clip-space position, before perspective division.
    pub clip_position: Vec4,
    /// Texture coordinate forwarded unchanged for interpolation by the rasterizer.
    pub tex: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::LAYOUT.array_stride, 24);
    }

    #[test]
    fn layout_matches_field_offsets() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let attrs = Vertex::LAYOUT.attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!((attrs[0].offset, attrs[0].shader_location), (0, 0));
        assert_eq!((attrs[1].offset, attrs[1].shader_location), (12, 1));
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn homogeneous_position_appends_one() {
        let vertex = Vertex::new([-2.0, 0.5, 7.0], [0.0; 3]);
        assert_eq!(vertex.homogeneous_position(), Vec4::new(-2.0, 0.5, 7.0, 1.0));
    }
}

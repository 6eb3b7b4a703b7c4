//! Per-draw transform uniforms.
//!
//! [`TransformUniforms`] holds the two matrices every invocation of the stage
//! reads: the object-to-world `world_matrix` and the world-to-clip
//! `proj_view_matrix`. They are set once per draw by the caller and stay
//! read-only until the draw completes.
//!
//! [`TransformUniformsRaw`] is the byte layout uploaded to the GPU. Both
//! matrices are stored column-major, world matrix first, matching the
//! `TransformUniforms` struct in `shaders/transform.wgsl`.

use glam::Mat4;

/// Names one of the two configuration slots of the stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    /// Object-to-world transform.
    WorldMatrix,
    /// World-to-clip transform (projection composed with view).
    ProjViewMatrix,
}

impl UniformSlot {
    /// The slot name as it appears in the shader.
    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::WorldMatrix => "world_matrix",
            UniformSlot::ProjViewMatrix => "proj_view_matrix",
        }
    }
}

impl std::fmt::Display for UniformSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur when building uniforms from raw float data.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformError {
    /// A matrix slice did not contain exactly 16 floats.
    WrongLength { slot: UniformSlot, len: usize },
}

impl std::fmt::Display for UniformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniformError::WrongLength { slot, len } => {
                write!(f, "{} needs 16 floats, got {}", slot, len)
            }
        }
    }
}

impl std::error::Error for UniformError {}

/// The transform uniforms for one draw.
///
/// No validation is performed: singular or non-finite matrices are accepted
/// and propagate through the transform by ordinary floating-point rules.
///
/// # Example
///
/// ```
/// use vertex_stage::{Mat4, TransformUniforms, Vec3};
///
/// let uniforms = TransformUniforms::new(
///     Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
///     Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 100.0),
/// );
/// assert_eq!(uniforms.world_matrix.w_axis.z, -5.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformUniforms {
    /// Object-to-world transform, applied first.
    pub world_matrix: Mat4,
    /// World-to-clip transform, applied second.
    pub proj_view_matrix: Mat4,
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformUniforms {
    /// Creates uniforms from the object-to-world and world-to-clip matrices.
    pub fn new(world_matrix: Mat4, proj_view_matrix: Mat4) -> Self {
        Self {
            world_matrix,
            proj_view_matrix,
        }
    }

    /// Both slots set to the identity matrix.
    pub fn identity() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }

    /// Builds uniforms from two column-major float arrays.
    pub fn from_cols_arrays(world: &[f32; 16], proj_view: &[f32; 16]) -> Self {
        Self::new(Mat4::from_cols_array(world), Mat4::from_cols_array(proj_view))
    }

    /// Builds uniforms from two column-major float slices.
    ///
    /// # Errors
    ///
    /// Returns [`UniformError::WrongLength`] naming the first slot whose slice
    /// does not hold exactly 16 floats.
    pub fn try_from_slices(world: &[f32], proj_view: &[f32]) -> Result<Self, UniformError> {
        let world = matrix_from_slice(UniformSlot::WorldMatrix, world)?;
        let proj_view = matrix_from_slice(UniformSlot::ProjViewMatrix, proj_view)?;
        Ok(Self::new(world, proj_view))
    }

    /// Returns the matrix stored in `slot`.
    pub fn slot(&self, slot: UniformSlot) -> Mat4 {
        match slot {
            UniformSlot::WorldMatrix => self.world_matrix,
            UniformSlot::ProjViewMatrix => self.proj_view_matrix,
        }
    }

    /// Converts to the GPU byte layout.
    pub fn to_raw(&self) -> TransformUniformsRaw {
        TransformUniformsRaw {
            world_matrix: self.world_matrix.to_cols_array_2d(),
            proj_view_matrix: self.proj_view_matrix.to_cols_array_2d(),
        }
    }
}

fn matrix_from_slice(slot: UniformSlot, values: &[f32]) -> Result<Mat4, UniformError> {
    let cols: &[f32; 16] = values
        .try_into()
        .map_err(|_| UniformError::WrongLength {
            slot,
            len: values.len(),
        })?;
    Ok(Mat4::from_cols_array(cols))
}

/// Transform uniforms as uploaded to the GPU.
///
/// 128 bytes: `world_matrix` at offset 0, `proj_view_matrix` at offset 64,
/// each as four columns of four floats.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniformsRaw {
    /// Object-to-world transform, column-major.
    pub world_matrix: [[f32; 4]; 4],
    /// World-to-clip transform, column-major.
    pub proj_view_matrix: [[f32; 4]; 4],
}

impl TransformUniformsRaw {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<&TransformUniforms> for TransformUniformsRaw {
    fn from(uniforms: &TransformUniforms) -> Self {
        uniforms.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn default_is_identity() {
        let uniforms = TransformUniforms::default();
        assert_eq!(uniforms.world_matrix, Mat4::IDENTITY);
        assert_eq!(uniforms.proj_view_matrix, Mat4::IDENTITY);
    }

    #[test]
    fn raw_layout_is_world_then_proj_view() {
        assert_eq!(std::mem::size_of::<TransformUniformsRaw>(), 128);

        let uniforms = TransformUniforms::new(
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            Mat4::from_diagonal(Vec4::new(2.0, 2.0, 2.0, 1.0)),
        );
        let raw = uniforms.to_raw();
        let floats: &[f32] = bytemuck::cast_slice(raw.as_bytes());

        assert_eq!(floats.len(), 32);
        // Column-major: translation lives in the fourth column of the world matrix.
        assert_eq!(&floats[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(floats[16], 2.0);
        assert_eq!(floats[16 + 15], 1.0);
    }

    #[test]
    fn from_cols_arrays_is_column_major() {
        let mut world = [0.0; 16];
        world[0] = 1.0;
        world[5] = 1.0;
        world[10] = 1.0;
        world[15] = 1.0;
        world[12] = 9.0;
        let uniforms = TransformUniforms::from_cols_arrays(&world, &Mat4::IDENTITY.to_cols_array());
        assert_eq!(uniforms.world_matrix.w_axis, Vec4::new(9.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn try_from_slices_accepts_sixteen_floats() {
        let world = Mat4::from_scale(Vec3::splat(3.0)).to_cols_array();
        let proj_view = Mat4::IDENTITY.to_cols_array();
        let uniforms = TransformUniforms::try_from_slices(&world, &proj_view).unwrap();
        assert_eq!(uniforms.world_matrix, Mat4::from_scale(Vec3::splat(3.0)));
        assert_eq!(uniforms.slot(UniformSlot::ProjViewMatrix), Mat4::IDENTITY);
    }

    #[test]
    fn try_from_slices_names_the_bad_slot() {
        let good = [0.0; 16];
        let short = [0.0; 12];

        let err = TransformUniforms::try_from_slices(&short, &good).unwrap_err();
        assert_eq!(
            err,
            UniformError::WrongLength {
                slot: UniformSlot::WorldMatrix,
                len: 12
            }
        );

        let err = TransformUniforms::try_from_slices(&good, &[0.0; 17]).unwrap_err();
        assert_eq!(err.to_string(), "proj_view_matrix needs 16 floats, got 17");
    }

    #[test]
    fn non_finite_values_are_accepted() {
        let mut world = Mat4::IDENTITY.to_cols_array();
        world[0] = f32::NAN;
        let uniforms = TransformUniforms::try_from_slices(&world, &[0.0; 16]).unwrap();
        assert!(uniforms.world_matrix.x_axis.x.is_nan());
    }
}

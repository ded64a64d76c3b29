//! Camera math shared with the shader.

use cgmath::Matrix4;

/// Maps OpenGL clip depth (-1..1) onto wgpu's 0..1 range.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Eye position and clip transform of a camera.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// `w` is 1 and only pads the vector to 16 bytes.
    pub view_position: [f32; 4],
    /// View-projection in wgpu clip space.
    pub view_proj: [[f32; 4]; 4],
}

/// Column-major array layout WGSL expects for a `mat4x4<f32>`.
pub fn to_columns(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_wgpu_correction_maps_depth_range() {
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-6);
        assert!((far.z / far.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let a = to_columns(m);
        assert_eq!(a[3], [1.0, 2.0, 3.0, 1.0]);
    }
}

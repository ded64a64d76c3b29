//! Perspective camera with a cached projection matrix.
//!
//! The projection is only rebuilt by [`PerspectiveCamera::update_projection_matrix`]
//! (or [`PerspectiveCamera::refresh_projection`] after it was marked dirty), so
//! changing `fov`, `aspect`, `near` or `far` has no visible effect until then.
//! The view matrix is derived from `position`, `up` and the look-at target on
//! every call.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3, Vector4};

use super::camera_utils::{to_columns, CameraUniform, OPENGL_TO_WGPU_MATRIX};

const MIN_FOV_DEGREES: f32 = 1e-3;
const MAX_FOV_DEGREES: f32 = 179.999;
const MIN_EXTENT: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    target: Point3<f32>,
    projection: Matrix4<f32>,
    projection_dirty: bool,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fov,
            aspect,
            near,
            far,
            target: Point3::new(0.0, 0.0, -1.0),
            projection: Matrix4::from_scale(1.0),
            projection_dirty: false,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    /// Aims the camera at `target`.
    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    /// Rebuilds the projection from the current `fov`, `aspect`, `near`, `far`.
    pub fn update_projection_matrix(&mut self) {
        self.projection = build_perspective(self.fov, self.aspect, self.near, self.far);
        self.projection_dirty = false;
    }

    pub fn mark_projection_dirty(&mut self) {
        self.projection_dirty = true;
    }

    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Rebuilds the projection if it was marked dirty. Returns whether it did.
    pub fn refresh_projection(&mut self) -> bool {
        if self.projection_dirty {
            self.update_projection_matrix();
            true
        } else {
            false
        }
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let mut forward = self.target - self.position;
        if forward.magnitude2() < MIN_EXTENT * MIN_EXTENT {
            forward = -Vector3::unit_z();
        }
        let forward = forward.normalize();

        // look_at_rh degenerates when looking straight along `up`
        let up = if forward.cross(self.up).magnitude2() < MIN_EXTENT {
            if forward.z.abs() < 0.999 {
                Vector3::unit_z()
            } else {
                Vector3::unit_x()
            }
        } else {
            self.up
        };

        Matrix4::look_at_rh(self.position, self.position + forward, up)
    }

    /// Projection times view, OpenGL clip conventions (NDC z in -1..1).
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vector3<f32> {
        let forward = self.target - self.position;
        if forward.magnitude2() < MIN_EXTENT * MIN_EXTENT {
            -Vector3::unit_z()
        } else {
            forward.normalize()
        }
    }

    /// Projects a world point into normalized device coordinates.
    ///
    /// Points behind the camera or outside the frustum still get a finite
    /// result; their coordinates simply fall outside `-1..1`.
    pub fn project(&self, point: Point3<f32>) -> Vector3<f32> {
        let clip = self.view_projection() * Vector4::new(point.x, point.y, point.z, 1.0);
        let w = if clip.w.abs() < f32::EPSILON {
            f32::EPSILON.copysign(clip.w)
        } else {
            clip.w
        };
        Vector3::new(clip.x / w, clip.y / w, clip.z / w)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.position.to_homogeneous().into(),
            view_proj: to_columns(OPENGL_TO_WGPU_MATRIX * self.view_projection()),
        }
    }
}

/// Frustum projection built from the vertical fov in degrees.
///
/// Unlike `cgmath::perspective` this never asserts: the panels allow a zero
/// fov or `far < near`, so the inputs are nudged to the closest finite matrix.
fn build_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let fov = fov.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    let aspect = if aspect.abs() < MIN_EXTENT {
        MIN_EXTENT
    } else {
        aspect
    };
    let near = near.max(MIN_EXTENT);
    let far = if (far - near).abs() < MIN_EXTENT {
        near + MIN_EXTENT
    } else {
        far
    };

    let top = near * (fov.to_radians() * 0.5).tan();
    let height = 2.0 * top;
    let width = aspect * height;
    let left = -0.5 * width;
    let right = left + width;
    let bottom = top - height;

    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    #[rustfmt::skip]
    let m = Matrix4::new(
        x,   0.0, 0.0,  0.0,
        0.0, y,   0.0,  0.0,
        a,   b,   c,   -1.0,
        0.0, 0.0, d,    0.0,
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0).with_position(0.0, 2.0, 3.0);
        camera.look_at(Point3::new(0.0, 0.5, 0.0));
        camera
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = camera();
        let ndc = camera.project(Point3::new(0.0, 0.5, 0.0));
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_matches_cgmath_for_regular_parameters() {
        let ours = build_perspective(75.0, 1.5, 0.1, 100.0);
        let theirs = cgmath::perspective(cgmath::Deg(75.0), 1.5, 0.1, 100.0);
        for col in 0..4 {
            for row in 0..4 {
                assert!((ours[col][row] - theirs[col][row]).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_projection_is_cached_until_updated() {
        let mut camera = camera();
        let before = camera.projection_matrix();

        camera.fov = 30.0;
        assert_eq!(camera.projection_matrix(), before);
        assert!(!camera.refresh_projection());

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_dirty_projection_refreshes_once() {
        let mut camera = camera();
        camera.aspect = 1.0;
        camera.mark_projection_dirty();

        assert!(camera.refresh_projection());
        assert!(!camera.is_projection_dirty());
        assert!(!camera.refresh_projection());
    }

    #[test]
    fn test_degenerate_parameters_stay_finite() {
        let mut camera = camera();
        camera.fov = 0.0;
        camera.near = 5.0;
        camera.far = 5.0;
        camera.aspect = 0.0;
        camera.update_projection_matrix();

        let m = camera.projection_matrix();
        for col in 0..4 {
            for row in 0..4 {
                assert!(m[col][row].is_finite());
            }
        }
    }

    #[test]
    fn test_looking_straight_down_has_valid_view() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).with_position(0.0, 5.0, 0.0);
        camera.look_at(Point3::new(0.0, 0.0, 0.0));
        let view = camera.view_matrix();
        for col in 0..4 {
            for row in 0..4 {
                assert!(view[col][row].is_finite());
            }
        }
    }

    #[test]
    fn test_point_behind_camera_leaves_depth_range() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0).with_position(0.0, 0.0, 5.0);
        camera.look_at(Point3::new(0.0, 0.0, 0.0));

        let ndc = camera.project(Point3::new(0.0, 0.0, 10.0));
        assert!(!(-1.0..=1.0).contains(&ndc.z));
        assert!(ndc.x.is_finite() && ndc.y.is_finite());
    }
}

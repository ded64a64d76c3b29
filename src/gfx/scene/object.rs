//! Renderable scene objects and their transforms.

use cgmath::{Matrix4, Point3, Rad, Vector3};

use super::scene::{GeometryId, MaterialId};

/// Handle to an object stored in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A mesh placed in the world.
///
/// `rotation` holds Euler angles in radians applied in X, Y, Z order, so the
/// model matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: &str, geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Origin of the object in world space (objects are not parented).
    pub fn world_position(&self) -> Point3<f32> {
        Point3::new(self.position.x, self.position.y, self.position.z)
    }
}

use std::ops::{Index, IndexMut};

use crate::gfx::{
    geometry::GeometryData,
    resources::{environment::Environment, material::Material},
};

use super::{
    light::{Light, LightId},
    object::{ObjectId, SceneObject},
};

/// Handle to geometry stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub(crate) usize);

/// Handle to a material stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

/// Retained scene: geometry, materials, objects and lights.
///
/// Nothing is ever removed, so handles stay valid for the lifetime of the
/// scene. Geometry and materials can be shared between objects.
pub struct Scene {
    geometries: Vec<GeometryData>,
    materials: Vec<Material>,
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    pub environment: Option<Environment>,
    /// Clear color used when there is no enabled environment.
    pub background: [f32; 3],
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            geometries: Vec::new(),
            materials: Vec::new(),
            objects: Vec::new(),
            lights: Vec::new(),
            environment: None,
            background: [0.0, 0.0, 0.0],
        }
    }

    pub fn add_geometry(&mut self, geometry: GeometryData) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        log::debug!("scene: added object '{}'", object.name);
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GeometryData> {
        self.geometries.get(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, material)| (MaterialId(i), material))
    }

    pub fn geometries(&self) -> impl Iterator<Item = (GeometryId, &GeometryData)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, geometry)| (GeometryId(i), geometry))
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Looks an object up by name.
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|object| object.name == name)
            .map(ObjectId)
    }
}

impl Index<ObjectId> for Scene {
    type Output = SceneObject;

    fn index(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }
}

impl IndexMut<ObjectId> for Scene {
    fn index_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }
}

impl Index<MaterialId> for Scene {
    type Output = Material;

    fn index(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }
}

impl IndexMut<MaterialId> for Scene {
    fn index_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id.0]
    }
}

impl Index<LightId> for Scene {
    type Output = Light;

    fn index(&self, id: LightId) -> &Light {
        &self.lights[id.0]
    }
}

impl IndexMut<LightId> for Scene {
    fn index_mut(&mut self, id: LightId) -> &mut Light {
        &mut self.lights[id.0]
    }
}

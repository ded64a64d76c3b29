//! Shading program selection keyed on material versions.
//!
//! Most material fields reach the GPU through the material uniform every
//! frame. The normal interpolation mode does not: it picks a different
//! pipeline, and that choice is only re-derived when the material's version
//! changes (see [`Material::mark_needs_update`]).

use std::collections::HashMap;

use crate::gfx::{
    resources::material::{Material, ShadingModel},
    scene::MaterialId,
};

/// What the renderer compiled for a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramKey {
    pub model: ShadingModel,
    pub flat_shading: bool,
}

impl ProgramKey {
    fn from_material(material: &Material) -> Self {
        Self {
            model: material.model,
            flat_shading: material.flat_shading,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedProgram {
    version: u32,
    key: ProgramKey,
}

/// Per-material program cache.
#[derive(Debug, Default)]
pub struct ProgramCache {
    entries: HashMap<MaterialId, CachedProgram>,
    rebuilds: u64,
}

impl ProgramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the program for `material`, rebuilding it only if the material
    /// version differs from the cached one.
    pub fn resolve(&mut self, id: MaterialId, material: &Material) -> ProgramKey {
        if let Some(cached) = self.entries.get(&id) {
            if cached.version == material.version() {
                return cached.key;
            }
        }

        let key = ProgramKey::from_material(material);
        log::debug!(
            "Building {} program for material '{}' (version {}, flat: {})",
            key.model.label(),
            material.name,
            material.version(),
            key.flat_shading
        );
        self.entries.insert(
            id,
            CachedProgram {
                version: material.version(),
                key,
            },
        );
        self.rebuilds += 1;
        key
    }

    /// Number of programs built so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Scene;

    #[test]
    fn test_flat_shading_needs_version_bump() {
        let mut scene = Scene::new();
        let id = scene.add_material(Material::phong("phong", [0.2, 0.4, 1.0]));
        let mut cache = ProgramCache::new();

        let first = cache.resolve(id, &scene[id]);
        assert!(!first.flat_shading);

        scene[id].flat_shading = true;
        assert!(!cache.resolve(id, &scene[id]).flat_shading);

        scene[id].mark_needs_update();
        assert!(cache.resolve(id, &scene[id]).flat_shading);
        assert_eq!(cache.rebuilds(), 2);
    }

    #[test]
    fn test_unchanged_material_is_not_rebuilt() {
        let mut scene = Scene::new();
        let a = scene.add_material(Material::lambert("a", [1.0, 0.0, 0.0]));
        let b = scene.add_material(Material::standard("b", [0.0, 1.0, 0.0]));
        let mut cache = ProgramCache::new();

        for _ in 0..3 {
            cache.resolve(a, &scene[a]);
            cache.resolve(b, &scene[b]);
        }

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.rebuilds(), 2);
    }

    #[test]
    fn test_color_change_does_not_rebuild() {
        let mut scene = Scene::new();
        let id = scene.add_material(Material::basic("basic", [1.0, 1.0, 1.0]));
        let mut cache = ProgramCache::new();
        cache.resolve(id, &scene[id]);

        scene[id].color = [0.0, 0.0, 0.0];
        scene[id].wireframe = true;
        let key = cache.resolve(id, &scene[id]);

        assert_eq!(key.model, ShadingModel::Basic);
        assert_eq!(cache.rebuilds(), 1);
    }
}

//! Material definitions
//!
//! A [`Material`] describes how a mesh is shaded. Most fields reach the GPU
//! through [`MaterialUniform`] and take effect on the next frame. Switching
//! between smooth and flat normals selects a different shader program instead;
//! the renderer only re-derives that program when the material's version
//! changes, so toggling `flat_shading` must be followed by
//! [`Material::mark_needs_update`].

/// Lighting model used by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingModel {
    /// Unlit, flat color.
    Basic,
    /// Colors by view-space normal; ignores lights.
    Normal,
    /// Diffuse only.
    Lambert,
    /// Diffuse plus Blinn-Phong specular highlight.
    Phong,
    /// Metalness / roughness physically based shading.
    Standard,
}

impl ShadingModel {
    pub fn label(self) -> &'static str {
        match self {
            ShadingModel::Basic => "basic",
            ShadingModel::Normal => "normal",
            ShadingModel::Lambert => "lambert",
            ShadingModel::Phong => "phong",
            ShadingModel::Standard => "standard",
        }
    }

    fn shader_code(self) -> f32 {
        match self {
            ShadingModel::Basic => 0.0,
            ShadingModel::Normal => 1.0,
            ShadingModel::Lambert => 2.0,
            ShadingModel::Phong => 3.0,
            ShadingModel::Standard => 4.0,
        }
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// rgb, opacity
    pub color: [f32; 4],
    /// rgb, shininess
    pub specular: [f32; 4],
    /// shading model, roughness, metalness, reflectivity
    pub params: [f32; 4],
    /// environment enabled, unused x3
    pub flags: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub model: ShadingModel,
    pub color: [f32; 3],
    pub wireframe: bool,
    pub flat_shading: bool,
    /// Reflect the scene environment.
    pub env_map: bool,
    /// Share of the environment mixed into basic, Lambert and Phong shading.
    pub reflectivity: f32,
    pub specular: [f32; 3],
    pub shininess: f32,
    pub roughness: f32,
    pub metalness: f32,
    version: u32,
}

impl Material {
    pub fn new(name: &str, model: ShadingModel, color: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            model,
            color,
            wireframe: false,
            flat_shading: false,
            env_map: false,
            reflectivity: 1.0,
            specular: [0.066, 0.066, 0.066],
            shininess: 30.0,
            roughness: 1.0,
            metalness: 0.0,
            version: 0,
        }
    }

    pub fn basic(name: &str, color: [f32; 3]) -> Self {
        Self::new(name, ShadingModel::Basic, color)
    }

    pub fn normal(name: &str) -> Self {
        Self::new(name, ShadingModel::Normal, [1.0, 1.0, 1.0])
    }

    pub fn lambert(name: &str, color: [f32; 3]) -> Self {
        Self::new(name, ShadingModel::Lambert, color)
    }

    pub fn phong(name: &str, color: [f32; 3]) -> Self {
        Self::new(name, ShadingModel::Phong, color)
    }

    pub fn standard(name: &str, color: [f32; 3]) -> Self {
        Self::new(name, ShadingModel::Standard, color)
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_flat_shading(mut self, flat: bool) -> Self {
        self.flat_shading = flat;
        self
    }

    /// Reflect the environment with the given reflectivity.
    pub fn with_env_map(mut self, reflectivity: f32) -> Self {
        self.env_map = true;
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    pub fn with_specular(mut self, specular: [f32; 3], shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess.max(0.0);
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Asks the renderer to rebuild derived shading state on the next frame.
    pub fn mark_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            color: [self.color[0], self.color[1], self.color[2], 1.0],
            specular: [self.specular[0], self.specular[1], self.specular[2], self.shininess],
            params: [
                self.model.shader_code(),
                self.roughness,
                self.metalness,
                self.reflectivity,
            ],
            flags: [if self.env_map { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_carries_model_parameters() {
        let material = Material::standard("metal", [0.5, 0.5, 0.5])
            .with_roughness(0.25)
            .with_metalness(2.0)
            .with_env_map(0.8);
        let uniform = material.uniform();

        assert_eq!(uniform.params, [4.0, 0.25, 1.0, 0.8]);
        assert_eq!(uniform.flags[0], 1.0);
        assert_eq!(uniform.color[3], 1.0);
    }

    #[test]
    fn test_needs_update_bumps_version() {
        let mut material = Material::phong("phong", [1.0, 0.0, 0.0]);
        assert_eq!(material.version(), 0);

        material.flat_shading = true;
        assert_eq!(material.version(), 0);

        material.mark_needs_update();
        assert_eq!(material.version(), 1);
    }

    #[test]
    fn test_flat_shading_is_not_part_of_uniform() {
        let smooth = Material::lambert("l", [0.2, 0.4, 0.6]);
        let flat = smooth.clone().with_flat_shading(true);
        assert_eq!(smooth.uniform(), flat.uniform());
    }
}

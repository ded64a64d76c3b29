//! Per-frame and per-object uniform data
//!
//! Group 0 holds [`GlobalUniform`] (camera, lights, environment) shared by every
//! draw. Group 1 holds an [`ObjectUniform`] per scene object. The structs MUST
//! match `Globals` and `Object` in `scene.wgsl` exactly.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::{
    gfx::{
        camera::{camera_utils::to_columns, PerspectiveCamera},
        scene::{Scene, SceneObject},
    },
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

/// Lights beyond this count are ignored by the shader.
pub const MAX_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz position, w light kind
    pub position_kind: [f32; 4],
    /// rgb color, w intensity
    pub color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// rgb, w intensity
    pub env_sky: [f32; 4],
    /// rgb, w 1.0 when the environment is enabled
    pub env_horizon: [f32; 4],
    pub env_ground: [f32; 4],
    /// x light count
    pub counts: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl GlobalUniform {
    pub fn from_state(camera: &PerspectiveCamera, scene: &Scene) -> Self {
        let camera_uniform = camera.uniform();

        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        let mut count = 0;
        for light in scene.lights().filter(|l| l.visible).take(MAX_LIGHTS) {
            lights[count] = LightUniform {
                position_kind: [
                    light.position.x,
                    light.position.y,
                    light.position.z,
                    light.kind.shader_code(),
                ],
                color_intensity: [light.color[0], light.color[1], light.color[2], light.intensity],
            };
            count += 1;
        }

        let (sky, horizon, ground) = match &scene.environment {
            Some(env) => (
                [env.sky[0], env.sky[1], env.sky[2], env.intensity],
                [
                    env.horizon[0],
                    env.horizon[1],
                    env.horizon[2],
                    if env.enabled { 1.0 } else { 0.0 },
                ],
                [env.ground[0], env.ground[1], env.ground[2], 0.0],
            ),
            None => ([0.0; 4], [0.0; 4], [0.0; 4]),
        };

        Self {
            view_proj: camera_uniform.view_proj,
            view: to_columns(camera.view_matrix()),
            eye: camera_uniform.view_position,
            env_sky: sky,
            env_horizon: horizon,
            env_ground: ground,
            counts: [count as f32, 0.0, 0.0, 0.0],
            lights,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals under non-uniform scale.
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn from_object(object: &SceneObject) -> Self {
        let model = object.model_matrix();
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: to_columns(model),
            normal: to_columns(normal),
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Layout and bind group for group 0.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_uniform(wgpu::ShaderStages::VERTEX_FRAGMENT)
            .create(device, "Globals Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Layout for group 1 (object transforms).
pub fn object_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_uniform(wgpu::ShaderStages::VERTEX)
        .create(device, "Object Bind Group Layout")
}

/// Layout for group 2 (material parameters).
pub fn material_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_uniform(wgpu::ShaderStages::FRAGMENT)
        .create(device, "Material Bind Group Layout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::generate_box,
        resources::{environment::Environment, material::Material},
        scene::{Light, SceneObject},
    };

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
    }

    #[test]
    fn test_globals_pack_visible_lights_only() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient("ambient", [1.0, 1.0, 1.0], 0.3));
        let sun = scene.add_light(Light::directional("sun", [1.0, 0.9, 0.8], 2.0).with_position(1.0, 2.0, 3.0));
        scene.add_light(Light::point("bulb", [1.0, 1.0, 1.0], 1.0));
        scene[sun].visible = false;
        scene.environment = Some(Environment::default());

        let camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
        let globals = GlobalUniform::from_state(&camera, &scene);

        assert_eq!(globals.counts[0], 2.0);
        assert_eq!(globals.lights[0].color_intensity[3], 0.3);
        assert_eq!(globals.lights[1].position_kind[3], 2.0);
        assert_eq!(globals.env_horizon[3], 1.0);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let mut scene = Scene::new();
        let geometry = scene.add_geometry(generate_box(1.0, 1.0, 1.0));
        let material = scene.add_material(Material::normal("n"));
        let mut object = SceneObject::new("squashed", geometry, material);
        object.scale = cgmath::Vector3::new(2.0, 1.0, 1.0);

        let uniform = ObjectUniform::from_object(&object);
        assert!((uniform.normal[0][0] - 0.5).abs() < 1e-6);
        assert!((uniform.model[0][0] - 2.0).abs() < 1e-6);
    }
}

//! WGPU-based rendering engine
//!
//! Owns the surface, device and every GPU resource derived from the scene.
//! GPU buffers are created lazily the first time a geometry, object or
//! material is seen, and uniforms are re-uploaded only when their contents
//! change.

use std::collections::HashMap;

use wgpu::util::DeviceExt;
use wgpu::TextureFormat;

use crate::{
    error::{RenderError, VignetteError},
    frame::{FrameReport, Renderer},
    gfx::{
        geometry::{GeometryData, Topology},
        resources::{
            global_bindings::{material_layout, object_layout},
            DepthBuffer, GlobalBindings, GlobalUBO, GlobalUniform, MaterialUniform,
            ObjectUniform,
        },
        scene::{GeometryId, Scene},
    },
    state::AppState,
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

use super::{
    pipeline_manager::{PipelineConfig, PipelineKind, PipelineManager},
    program::ProgramCache,
};

/// GPU copy of one geometry. Triangle meshes also carry an edge list for
/// wireframe drawing.
struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: wgpu::Buffer,
    edge_count: u32,
    topology: Topology,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, name: &str, geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        let edges = geometry.edge_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", name)),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Edge Buffer", name)),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            index_buffer,
            index_count: indices.len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
            topology: geometry.topology,
        }
    }
}

struct UniformSlot<T> {
    ubo: UniformBuffer<T>,
    bind_group: wgpu::BindGroup,
}

impl<T: bytemuck::Pod> UniformSlot<T> {
    fn new(device: &wgpu::Device, layout: &BindGroupLayoutWithDesc, content: T, label: &str) -> Self {
        let ubo = UniformBuffer::new(device, label, content);
        let bind_group = BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .create(device, label);
        Self { ubo, bind_group }
    }
}

/// One resolved draw call.
struct DrawItem {
    object: usize,
    material: usize,
    geometry: GeometryId,
    pipeline: PipelineKind,
    edges: bool,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthBuffer,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,
    meshes: HashMap<GeometryId, MeshBuffers>,
    object_slots: Vec<UniformSlot<ObjectUniform>>,
    material_slots: Vec<UniformSlot<MaterialUniform>>,
    programs: ProgramCache,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present synchronised to the display refresh
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, VignetteError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(VignetteError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthBuffer::new(&device, config.width, config.height);

        let global_ubo = GlobalUBO::new(&device, "Globals", bytemuck::Zeroable::zeroed());
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let object_layout = object_layout(&device);
        let material_layout = material_layout(&device);

        let pipeline_manager = PipelineManager::new(
            &device,
            &PipelineConfig {
                shader_source: include_str!("scene.wgsl"),
                color_format: format,
                depth_format: DepthBuffer::FORMAT,
                bind_group_layouts: &[
                    global_bindings.bind_group_layout(),
                    &object_layout.layout,
                    &material_layout.layout,
                ],
            },
        )?;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_layout,
            material_layout,
            meshes: HashMap::new(),
            object_slots: Vec::new(),
            material_slots: Vec::new(),
            programs: ProgramCache::new(),
        })
    }

    /// Renders the scene from the current camera, then hands the encoder to
    /// `overlay` (used for the UI) before submitting.
    pub fn render_frame<F>(&mut self, state: &AppState, overlay: F) -> Result<FrameReport, RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error) => return Err(self.handle_surface_error(error)),
        };
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene = &state.scene;
        self.sync_scene(scene);
        self.global_ubo
            .write(&self.queue, GlobalUniform::from_state(&state.camera, scene));
        let draws = self.resolve_draws(scene);
        let clear = clear_color(state);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut report = FrameReport::default();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for draw in &draws {
                let (Some(pipeline), Some(mesh)) = (
                    self.pipeline_manager.get(draw.pipeline),
                    self.meshes.get(&draw.geometry),
                ) else {
                    continue;
                };
                let (index_buffer, index_count) = if draw.edges {
                    (&mesh.edge_buffer, mesh.edge_count)
                } else {
                    (&mesh.index_buffer, mesh.index_count)
                };
                if index_count == 0 {
                    continue;
                }

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &self.object_slots[draw.object].bind_group, &[]);
                render_pass.set_bind_group(2, &self.material_slots[draw.material].bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..index_count, 0, 0..1);

                report.draw_calls += 1;
                report.vertices += mesh.vertex_count;
            }
        }

        overlay(&self.device, &self.queue, &mut encoder, &surface_texture_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(report)
    }

    /// Uploads anything new or changed in `scene`.
    fn sync_scene(&mut self, scene: &Scene) {
        for (id, geometry) in scene.geometries() {
            if !self.meshes.contains_key(&id) {
                log::debug!(
                    "Uploading geometry {:?}: {} vertices",
                    id,
                    geometry.vertex_count()
                );
                let name = format!("Geometry {}", id.0);
                self.meshes
                    .insert(id, MeshBuffers::new(&self.device, &name, geometry));
            }
        }

        for (id, object) in scene.objects() {
            let uniform = ObjectUniform::from_object(object);
            match self.object_slots.get_mut(id.index()) {
                Some(slot) => {
                    slot.ubo.write(&self.queue, uniform);
                }
                None => self.object_slots.push(UniformSlot::new(
                    &self.device,
                    &self.object_layout,
                    uniform,
                    &format!("{} Object Bind Group", object.name),
                )),
            }
        }

        for (id, material) in scene.materials() {
            let uniform = material.uniform();
            match self.material_slots.get_mut(id.0) {
                Some(slot) => {
                    slot.ubo.write(&self.queue, uniform);
                }
                None => self.material_slots.push(UniformSlot::new(
                    &self.device,
                    &self.material_layout,
                    uniform,
                    &format!("{} Material Bind Group", material.name),
                )),
            }
        }
    }

    fn resolve_draws(&mut self, scene: &Scene) -> Vec<DrawItem> {
        let mut draws = Vec::with_capacity(scene.object_count());
        for (id, object) in scene.objects().filter(|(_, o)| o.visible) {
            let (Some(material), Some(mesh)) =
                (scene.material(object.material), self.meshes.get(&object.geometry))
            else {
                continue;
            };
            let program = self.programs.resolve(object.material, material);

            let (pipeline, edges) = PipelineKind::select(
                mesh.topology == Topology::Lines,
                material.wireframe,
                program.flat_shading,
            );

            draws.push(DrawItem {
                object: id.index(),
                material: object.material.0,
                geometry: object.geometry,
                pipeline,
                edges,
            });
        }
        draws
    }

    fn handle_surface_error(&mut self, error: wgpu::SurfaceError) -> RenderError {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.surface.configure(&self.device, &self.config);
                RenderError::SurfaceReconfigured
            }
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::Other => RenderError::Other,
        }
    }

    /// Resizes the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        if self.depth.size() != (width, height) {
            self.depth = DepthBuffer::new(&self.device, width, height);
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl Renderer for RenderEngine {
    fn render(&mut self, state: &AppState) -> Result<FrameReport, RenderError> {
        self.render_frame(state, |_, _, _, _| {})
    }

    fn resize(&mut self, width: u32, height: u32) {
        RenderEngine::resize(self, width, height);
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// The environment seen straight ahead when it doubles as the background,
/// otherwise the flat scene background.
pub(crate) fn clear_color(state: &AppState) -> [f32; 3] {
    match &state.scene.environment {
        Some(env) if env.enabled && env.background => env.sample(state.camera.forward()),
        _ => state.scene.background,
    }
}

//! Render pipelines for the scene pass.
//!
//! All variants are compiled from one WGSL module at startup. Validation
//! errors are caught in an error scope and reported instead of aborting.

use std::collections::HashMap;

use crate::{error::VignetteError, gfx::scene::Vertex3D};

/// Shader variant a draw call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    /// Interpolated vertex normals.
    Smooth,
    /// Face normals rebuilt from screen-space derivatives.
    Flat,
    /// Line list, used for grids and wireframes.
    Lines,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 3] = [PipelineKind::Smooth, PipelineKind::Flat, PipelineKind::Lines];

    /// Picks the variant for a draw. The second value is true when a
    /// triangle mesh has to be drawn through its edge list.
    pub fn select(line_geometry: bool, wireframe: bool, flat_shading: bool) -> (Self, bool) {
        if line_geometry || wireframe {
            (PipelineKind::Lines, !line_geometry)
        } else if flat_shading {
            (PipelineKind::Flat, false)
        } else {
            (PipelineKind::Smooth, false)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineKind::Smooth => "Smooth Pipeline",
            PipelineKind::Flat => "Flat Pipeline",
            PipelineKind::Lines => "Line Pipeline",
        }
    }

    fn fragment_entry(self) -> &'static str {
        match self {
            PipelineKind::Flat => "fs_flat",
            PipelineKind::Smooth | PipelineKind::Lines => "fs_main",
        }
    }

    fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PipelineKind::Lines => wgpu::PrimitiveTopology::LineList,
            PipelineKind::Smooth | PipelineKind::Flat => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            PipelineKind::Lines => None,
            PipelineKind::Smooth | PipelineKind::Flat => Some(wgpu::Face::Back),
        }
    }
}

/// Settings shared by every variant.
pub struct PipelineConfig<'a> {
    pub shader_source: &'a str,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    /// Layouts in group order.
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
}

pub struct PipelineManager {
    pipelines: HashMap<PipelineKind, wgpu::RenderPipeline>,
}

impl PipelineManager {
    /// Compiles the shader and builds every [`PipelineKind`].
    pub fn new(device: &wgpu::Device, config: &PipelineConfig) -> Result<Self, VignetteError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(config.shader_source.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: config.bind_group_layouts,
            push_constant_ranges: &[],
        });

        let pipelines = PipelineKind::ALL
            .into_iter()
            .map(|kind| (kind, create_pipeline(device, &module, &layout, kind, config)))
            .collect();

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(VignetteError::Pipeline(error.to_string()));
        }
        log::debug!("Created {} scene pipelines", PipelineKind::ALL.len());

        Ok(Self { pipelines })
    }

    pub fn get(&self, kind: PipelineKind) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&kind)
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    module: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    kind: PipelineKind,
    config: &PipelineConfig,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(kind.label()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(kind.fragment_entry()),
            targets: &[Some(wgpu::ColorTargetState {
                format: config.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: kind.topology(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: kind.cull_mode(),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: config.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

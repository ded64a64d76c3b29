//! Thin helpers over raw wgpu buffers and bind groups.

mod binding_builder;
mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;

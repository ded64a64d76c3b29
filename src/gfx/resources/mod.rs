//! Materials, environment and GPU resources
//!
//! Shading parameters, uniform layouts and the depth buffer.

pub mod depth;
pub mod environment;
pub mod global_bindings;
pub mod material;

// Re-export main types
pub use depth::DepthBuffer;
pub use environment::Environment;
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform, ObjectUniform};
pub use material::{Material, MaterialUniform, ShadingModel};

//! Core rendering functionality
//!
//! Handles render pipelines, shading program selection and frame rendering.

pub mod pipeline_manager;
pub mod program;
pub mod render_engine;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineKind, PipelineManager};
pub use program::{ProgramCache, ProgramKey};
pub use render_engine::RenderEngine;

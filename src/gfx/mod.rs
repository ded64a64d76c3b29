//! # Graphics Module
//!
//! Everything between the scene description and the GPU:
//!
//! - **Camera** ([`camera`]) - perspective camera and orbit controls
//! - **Geometry** ([`geometry`]) - procedural meshes
//! - **Scene** ([`scene`]) - objects, lights and the handles that address them
//! - **Resources** ([`resources`]) - materials, environment and uniform layouts
//! - **Rendering** ([`rendering`]) - pipelines, shader programs and the frame pass
//!
//! The renderer never mutates the scene. It reads it once per frame and keeps
//! its GPU buffers in sync.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use rendering::RenderEngine;
pub use scene::Scene;

//! # Scene Management Module
//!
//! The retained scene graph the renderer draws each frame.
//!
//! ## Key Components
//!
//! - [`Scene`] - owns geometry, materials, objects, lights and the environment
//! - [`SceneObject`] - a mesh instance with a transform and visibility flag
//! - [`Light`] - ambient, directional or point light
//! - [`Vertex3D`] - GPU vertex format
//!
//! Everything is addressed through small copyable handles
//! ([`ObjectId`], [`MaterialId`], [`GeometryId`], [`LightId`]) so control
//! bindings can capture them in closures without borrowing the scene.

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightId, LightKind};
pub use object::{ObjectId, SceneObject};
pub use scene::{GeometryId, MaterialId, Scene};
pub use vertex::Vertex3D;

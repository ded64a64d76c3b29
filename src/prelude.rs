//! # Vignette Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use vignette::prelude::*;
//!
//! fn main() -> Result<(), VignetteError> {
//!     let config = AppConfig::new("cube");
//!     let demo = vignette::demos::cube::build(Viewport::new(config.width, config.height));
//!     vignette::run(config, demo)
//! }
//! ```

pub use crate::config::{init_logging, AppConfig, LoggingConfig};
pub use crate::controls::{ControlPanel, ControlValue, NumberRange};
pub use crate::demos::Demo;
pub use crate::error::{ControlError, RenderError, VignetteError};
pub use crate::frame::{FrameReport, Renderer, RenderLoop, Viewport};
pub use crate::labels::{LabelLayer, LabelOverlay};
pub use crate::state::AppState;

pub use crate::gfx::camera::{OrbitControls, PerspectiveCamera};
pub use crate::gfx::geometry::{
    generate_box, generate_grid, generate_icosahedron, generate_plane, GeometryData,
};
pub use crate::gfx::resources::{Environment, Material, ShadingModel};
pub use crate::gfx::scene::{Light, Scene, SceneObject};

pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

pub use cgmath::{Point3, Vector3};

//! Vignette
//!
//! Two small interactive scenes on wgpu, winit and Dear ImGui: a wireframe
//! cube with camera sliders, and four shading models side by side under an
//! orbit camera with labels and a live debug panel.

pub mod app;
pub mod cli;
pub mod config;
pub mod controls;
pub mod demos;
pub mod error;
pub mod frame;
pub mod gfx;
pub mod labels;
pub mod performance;
pub mod prelude;
pub mod state;
pub mod ui;
pub mod wgpu_utils;

pub use app::run;
pub use error::{ControlError, RenderError, VignetteError};

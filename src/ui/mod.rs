//! # User Interface Module
//!
//! Dear ImGui on top of the scene:
//!
//! - [`UiManager`] - imgui integration with winit and wgpu
//! - [`draw_control_panel`] - widgets for a [`ControlPanel`](crate::controls::ControlPanel)
//! - [`draw_labels`] - screen-space label overlay
//!
//! Pointer events imgui wants are not forwarded to the orbit controls.

pub mod manager;
pub mod overlay;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use overlay::draw_labels;
pub use panel::draw_control_panel;

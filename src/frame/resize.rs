//! Viewport tracking and the resize handler.

use crate::state::AppState;

use super::Renderer;

/// Output size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Applies a new viewport size to the camera, orbit controls and renderer.
///
/// Returns false when the size is zero in either dimension (a minimised
/// window); nothing is touched in that case.
pub fn handle_resize<R: Renderer + ?Sized>(
    state: &mut AppState,
    renderer: &mut R,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        log::debug!("Ignoring resize to {}x{}", width, height);
        return false;
    }

    let viewport = Viewport::new(width, height);
    state.viewport = viewport;
    state.camera.aspect = viewport.aspect();
    state.camera.mark_projection_dirty();
    if let Some(controls) = state.controls.as_mut() {
        controls.set_element_size(width, height);
    }
    renderer.resize(width, height);
    log::debug!("Viewport resized to {}x{}", width, height);
    true
}

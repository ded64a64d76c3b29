//! Error types
//!
//! Startup failures are fatal and surface as [`VignetteError`]. Per-frame
//! surface problems are reported as [`RenderError`] and usually just skip a
//! frame. Rejected control writes are [`ControlError`].

use thiserror::Error;

/// Fatal failures while bringing up the window and GPU.
#[derive(Debug, Error)]
pub enum VignetteError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to build render pipelines: {0}")]
    Pipeline(String),

    #[error("rendering stopped: {0}")]
    Render(#[from] RenderError),
}

/// Outcome of a failed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Surface was lost or outdated and has been reconfigured.
    #[error("surface lost or outdated, reconfigured")]
    SurfaceReconfigured,

    #[error("timed out acquiring the next surface texture")]
    Timeout,

    #[error("GPU out of memory")]
    OutOfMemory,

    #[error("surface error")]
    Other,
}

impl RenderError {
    /// Whether the loop has to stop.
    pub fn is_fatal(self) -> bool {
        matches!(self, RenderError::OutOfMemory)
    }
}

/// A control write that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("controller '{label}' expects a {expected} value, got {found}")]
    KindMismatch {
        label: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("no controller with id {0}")]
    UnknownController(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_out_of_memory_is_fatal() {
        assert!(RenderError::OutOfMemory.is_fatal());
        assert!(!RenderError::SurfaceReconfigured.is_fatal());
        assert!(!RenderError::Timeout.is_fatal());
        assert!(!RenderError::Other.is_fatal());
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = ControlError::KindMismatch {
            label: "fov".into(),
            expected: "number",
            found: "toggle",
        };
        assert_eq!(
            err.to_string(),
            "controller 'fov' expects a number value, got toggle"
        );
    }
}

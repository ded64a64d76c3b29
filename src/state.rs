//! Application state shared by the control panel and the render loop.

use cgmath::Point3;

use crate::{
    frame::Viewport,
    gfx::{
        camera::{OrbitControls, PerspectiveCamera},
        scene::Scene,
    },
    labels::LabelLayer,
    performance::PerformanceMonitor,
};

/// Everything one demo mutates between frames.
pub struct AppState {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: Option<OrbitControls>,
    /// When set, the camera is re-aimed at this point every frame.
    pub look_at: Option<Point3<f32>>,
    pub labels: LabelLayer,
    pub viewport: Viewport,
    pub stats: PerformanceMonitor,
}

impl AppState {
    pub fn new(scene: Scene, camera: PerspectiveCamera) -> Self {
        Self {
            scene,
            camera,
            controls: None,
            look_at: None,
            labels: LabelLayer::new(),
            viewport: Viewport::default(),
            stats: PerformanceMonitor::new(),
        }
    }

    pub fn with_orbit_controls(mut self, controls: OrbitControls) -> Self {
        self.camera.look_at(controls.target);
        self.controls = Some(controls);
        self
    }

    /// Locks the camera onto `target`.
    pub fn with_look_at(mut self, target: Point3<f32>) -> Self {
        self.camera.look_at(target);
        self.look_at = Some(target);
        self
    }
}

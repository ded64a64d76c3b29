//! Orbit controls with optional damping.
//!
//! Pointer input only accumulates pending deltas (rotation, dolly scale,
//! pan offset). [`OrbitControls::update`] applies them to the camera once per
//! frame. With damping enabled only a `damping_factor` share of the pending
//! motion is applied per update and the rest decays geometrically, so the
//! camera keeps gliding for a few frames after the pointer is released.

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use std::f32::consts::PI;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::perspective_camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Dolly,
    Pan,
}

/// Pending spherical motion, in radians.
#[derive(Debug, Clone, Copy, Default)]
struct SphericalDelta {
    theta: f32,
    phi: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits measured from +Y.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    delta: SphericalDelta,
    scale: f32,
    pan_offset: Vector3<f32>,
    element_size: (f32, f32),
    drag: Option<DragMode>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitControls {
    pub fn new(target: Point3<f32>) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta: SphericalDelta::default(),
            scale: 1.0,
            pan_offset: Vector3::zero(),
            element_size: (1.0, 1.0),
            drag: None,
            cursor: None,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor;
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Size of the surface the pointer moves over, used to turn pixel drags into angles.
    pub fn set_element_size(&mut self, width: u32, height: u32) {
        self.element_size = (width.max(1) as f32, height.max(1) as f32);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Moves the camera towards the target by `dolly_scale` (< 1 zooms in).
    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        if dolly_scale.abs() > EPS {
            self.scale /= dolly_scale;
        }
    }

    /// Pans by a pixel delta. Moving the pointer right drags the scene right.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, camera: &PerspectiveCamera) {
        let distance = (camera.position - self.target).magnitude();
        let target_distance = distance * (camera.fov.to_radians() * 0.5).tan();
        let (_, height) = self.element_size;

        let forward = camera.forward();
        let mut right = forward.cross(camera.up);
        if right.magnitude2() < EPS {
            right = Vector3::unit_x();
        }
        let right = right.normalize();
        let up = right.cross(forward);

        let left_amount = 2.0 * delta_x * target_distance / height * self.pan_speed;
        let up_amount = 2.0 * delta_y * target_distance / height * self.pan_speed;
        self.pan_offset += right * -left_amount + up * up_amount;
    }

    /// Pending `(theta, phi)` rotation not yet applied to the camera.
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.delta.theta, self.delta.phi)
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Feeds a window event. Returns true when the event changed pending motion.
    pub fn handle_window_event(&mut self, event: &WindowEvent, camera: &PerspectiveCamera) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let mode = match button {
                    MouseButton::Left => DragMode::Rotate,
                    MouseButton::Middle => DragMode::Dolly,
                    MouseButton::Right => DragMode::Pan,
                    _ => return false,
                };
                match state {
                    ElementState::Pressed => self.drag = Some(mode),
                    ElementState::Released if self.drag == Some(mode) => self.drag = None,
                    ElementState::Released => {}
                }
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor.replace(*position);
                let (Some(mode), Some(previous)) = (self.drag, previous) else {
                    return false;
                };
                let dx = (position.x - previous.x) as f32;
                let dy = (position.y - previous.y) as f32;
                let (_, height) = self.element_size;

                match mode {
                    DragMode::Rotate => {
                        self.rotate_left(2.0 * PI * dx / height * self.rotate_speed);
                        self.rotate_up(2.0 * PI * dy / height * self.rotate_speed);
                    }
                    DragMode::Dolly => {
                        if dy > 0.0 {
                            self.dolly_out(self.zoom_scale());
                        } else if dy < 0.0 {
                            self.dolly_in(self.zoom_scale());
                        }
                    }
                    DragMode::Pan => self.pan(dx, dy, camera),
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
                };
                if scroll > 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if scroll < 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else {
                    return false;
                }
                true
            }
            _ => false,
        }
    }

    /// Applies one step of pending motion to `camera` and aims it at the target.
    ///
    /// Returns whether the camera position or target moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let previous_position = camera.position;
        let previous_target = self.target;

        let offset = camera.position - self.target;
        let mut radius = offset.magnitude();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > EPS {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI * 0.5
        };

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        theta += self.delta.theta * step;
        phi += self.delta.phi * step;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * step;

        let sin_phi = phi.sin();
        let offset = Vector3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta.theta *= decay;
            self.delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta = SphericalDelta::default();
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;

        (camera.position - previous_position).magnitude2() > EPS
            || (self.target - previous_target).magnitude2() > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0).with_position(0.0, 2.0, 6.0);
        let controls = OrbitControls::new(Point3::new(0.0, 1.0, 0.0));
        (controls, camera)
    }

    #[test]
    fn test_update_without_input_is_noop() {
        let (mut controls, mut camera) = setup();
        let before = camera.position;

        assert!(!controls.update(&mut camera));
        assert!((camera.position - before).magnitude() < 1e-4);
        assert_eq!(camera.target(), controls.target);
    }

    #[test]
    fn test_rotation_without_damping_applies_fully() {
        let (mut controls, mut camera) = setup();

        controls.rotate_left(PI * 0.5);
        assert!(controls.update(&mut camera));

        // a quarter turn seen from above: +Z swings to -X, height unchanged
        assert!((camera.position.x + 6.0).abs() < 1e-3);
        assert!(camera.position.z.abs() < 1e-3);
        assert!((camera.position.y - 2.0).abs() < 1e-3);
        assert_eq!(controls.pending_rotation(), (0.0, 0.0));
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_damping_decays_pending_rotation() {
        let (controls, mut camera) = setup();
        let mut controls = controls.with_damping(0.1);

        controls.rotate_left(1.0);
        assert!(controls.update(&mut camera));
        let (theta, _) = controls.pending_rotation();
        assert!((theta + 0.9).abs() < 1e-6);

        controls.update(&mut camera);
        let (theta, _) = controls.pending_rotation();
        assert!((theta + 0.81).abs() < 1e-6);
    }

    #[test]
    fn test_dolly_respects_distance_limits() {
        let (controls, mut camera) = setup();
        let mut controls = controls.with_distance_limits(2.0, 8.0);

        for _ in 0..100 {
            controls.dolly_in(0.5);
        }
        controls.update(&mut camera);
        let distance = (camera.position - controls.target).magnitude();
        assert!((distance - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_never_flips_over_the_pole() {
        let (mut controls, mut camera) = setup();
        controls.rotate_up(10.0);
        controls.update(&mut camera);

        let offset = camera.position - controls.target;
        assert!(offset.y > 0.0);
        assert!(offset.x.is_finite() && offset.z.is_finite());
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let (mut controls, mut camera) = setup();
        controls.set_element_size(800, 600);
        let offset_before = camera.position - controls.target;

        controls.pan(100.0, 0.0, &camera);
        controls.update(&mut camera);

        assert!(controls.target.x < 0.0);
        let offset_after = camera.position - controls.target;
        assert!((offset_after - offset_before).magnitude() < 1e-4);
    }
}

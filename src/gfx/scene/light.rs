//! Scene lights.

use cgmath::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays travelling from `position` towards the origin.
    Directional,
    /// Omni light at `position`, no falloff.
    Point,
}

impl LightKind {
    pub(crate) fn shader_code(self) -> f32 {
        match self {
            LightKind::Ambient => 0.0,
            LightKind::Directional => 1.0,
            LightKind::Point => 2.0,
        }
    }
}

/// Handle to a light stored in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub visible: bool,
}

impl Light {
    fn new(name: &str, kind: LightKind, color: [f32; 3], intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            color,
            intensity,
            position: Vector3::new(0.0, 1.0, 0.0),
            visible: true,
        }
    }

    pub fn ambient(name: &str, color: [f32; 3], intensity: f32) -> Self {
        Self::new(name, LightKind::Ambient, color, intensity)
    }

    pub fn directional(name: &str, color: [f32; 3], intensity: f32) -> Self {
        Self::new(name, LightKind::Directional, color, intensity)
    }

    pub fn point(name: &str, color: [f32; 3], intensity: f32) -> Self {
        Self::new(name, LightKind::Point, color, intensity)
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }
}

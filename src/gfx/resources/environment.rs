//! Procedural reflection environment.
//!
//! A three-stop vertical gradient (ground, horizon, sky) stands in for a cube
//! map. Reflective materials sample it along the reflected view ray and the
//! background clear color is sampled along the view direction.

use cgmath::{InnerSpace, Vector3};

#[derive(Debug, Clone)]
pub struct Environment {
    pub sky: [f32; 3],
    pub horizon: [f32; 3],
    pub ground: [f32; 3],
    pub intensity: f32,
    /// Reflections are only applied while enabled.
    pub enabled: bool,
    /// Use the gradient as the scene background.
    pub background: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            sky: [0.42, 0.62, 0.92],
            horizon: [0.85, 0.86, 0.88],
            ground: [0.22, 0.2, 0.18],
            intensity: 1.0,
            enabled: true,
            background: true,
        }
    }
}

impl Environment {
    pub fn gradient(sky: [f32; 3], horizon: [f32; 3], ground: [f32; 3]) -> Self {
        Self {
            sky,
            horizon,
            ground,
            ..Default::default()
        }
    }

    /// Radiance seen along `direction`. Must match `sample_environment` in the shader.
    pub fn sample(&self, direction: Vector3<f32>) -> [f32; 3] {
        let y = if direction.magnitude2() > 0.0 {
            direction.normalize().y
        } else {
            0.0
        };
        let (from, to, t) = if y >= 0.0 {
            (self.horizon, self.sky, y.sqrt())
        } else {
            (self.horizon, self.ground, (-y).sqrt())
        };
        [
            (from[0] + (to[0] - from[0]) * t) * self.intensity,
            (from[1] + (to[1] - from[1]) * t) * self.intensity,
            (from[2] + (to[2] - from[2]) * t) * self.intensity,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stops() {
        let env = Environment::gradient([0.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]);
        assert_eq!(env.sample(Vector3::unit_y()), [0.0, 0.0, 1.0]);
        assert_eq!(env.sample(Vector3::unit_x()), [1.0, 1.0, 1.0]);
        assert_eq!(env.sample(-Vector3::unit_y()), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_intensity_scales_and_zero_direction_is_horizon() {
        let mut env = Environment::default();
        env.intensity = 0.5;
        let horizon = env.sample(Vector3::new(0.0, 0.0, 0.0));
        assert!((horizon[0] - env.horizon[0] * 0.5).abs() < 1e-6);
    }
}

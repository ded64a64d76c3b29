//! Screen-space text labels anchored to scene objects.
//!
//! Each frame the anchor's world position is projected to NDC and mapped to
//! pixels with the window origin at the top-left:
//!
//! ```text
//! x = ((1 + ndc.x) / 2) * width + offset_x
//! y = ((1 - ndc.y) / 2) * height
//! ```
//!
//! A label centred on its anchor uses `offset_x = -half_width`. Labels built
//! with [`LabelOverlay::centred`] leave that to the overlay, which measures
//! the text with the UI font when drawing.

use cgmath::Vector3;

use crate::{
    frame::Viewport,
    gfx::{
        camera::PerspectiveCamera,
        scene::{ObjectId, Scene},
    },
};

/// Maps an NDC position into viewport pixels.
pub fn screen_position(ndc: Vector3<f32>, viewport: Viewport, offset_x: f32) -> [f32; 2] {
    let x = (1.0 + ndc.x) * 0.5 * viewport.width as f32 + offset_x;
    let y = (1.0 - ndc.y) * 0.5 * viewport.height as f32;
    [x, y]
}

#[derive(Debug, Clone)]
pub struct LabelOverlay {
    pub text: String,
    pub object: ObjectId,
    pub offset_x: f32,
    /// Shift left by half the drawn text width.
    pub centred: bool,
    ndc: Vector3<f32>,
    screen: [f32; 2],
    visible: bool,
}

impl LabelOverlay {
    pub fn new(text: &str, object: ObjectId) -> Self {
        Self {
            text: text.to_string(),
            object,
            offset_x: 0.0,
            centred: false,
            ndc: Vector3::new(0.0, 0.0, 0.0),
            screen: [0.0, 0.0],
            visible: true,
        }
    }

    pub fn with_offset_x(mut self, offset_x: f32) -> Self {
        self.offset_x = offset_x;
        self
    }

    pub fn centred(mut self) -> Self {
        self.centred = true;
        self
    }

    /// Top-left corner of text `text_width` pixels wide.
    pub fn draw_origin(&self, text_width: f32) -> [f32; 2] {
        let [x, y] = self.screen;
        if self.centred {
            [x - text_width * 0.5, y]
        } else {
            [x, y]
        }
    }

    /// Pixel position computed by the last [`LabelLayer::update`].
    pub fn screen_position(&self) -> [f32; 2] {
        self.screen
    }

    pub fn ndc(&self) -> Vector3<f32> {
        self.ndc
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the anchor lies between the near and far planes.
    pub fn in_depth_range(&self) -> bool {
        (-1.0..=1.0).contains(&self.ndc.z)
    }
}

/// All labels plus the one flag that shows or hides them together.
#[derive(Debug, Clone)]
pub struct LabelLayer {
    labels: Vec<LabelOverlay>,
    pub visible: bool,
}

impl Default for LabelLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelLayer {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            visible: true,
        }
    }

    pub fn push(&mut self, label: LabelOverlay) {
        self.labels.push(label);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelOverlay> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Re-projects every label through `camera` and applies the shared
    /// visibility flag.
    pub fn update(&mut self, scene: &Scene, camera: &PerspectiveCamera, viewport: Viewport) {
        for label in &mut self.labels {
            let Some(object) = scene.object(label.object) else {
                label.visible = false;
                continue;
            };
            label.ndc = camera.project(object.world_position());
            label.screen = screen_position(label.ndc, viewport, label.offset_x);
            label.visible = self.visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_icosahedron, resources::Material, scene::SceneObject};
    use cgmath::Point3;

    fn scene_with_object_at(x: f32, y: f32, z: f32) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let geometry = scene.add_geometry(generate_icosahedron(0.5, 0));
        let material = scene.add_material(Material::basic("basic", [1.0, 1.0, 1.0]));
        let id = scene.add_object(SceneObject::new("ball", geometry, material).with_position(x, y, z));
        (scene, id)
    }

    fn camera_looking_at(target: Point3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(45.0, 16.0 / 9.0, 0.1, 100.0).with_position(0.0, 2.0, 6.0);
        camera.look_at(target);
        camera
    }

    #[test]
    fn test_label_at_look_at_target_lands_in_viewport_center() {
        let (scene, id) = scene_with_object_at(1.0, 0.5, -1.0);
        let camera = camera_looking_at(Point3::new(1.0, 0.5, -1.0));
        let viewport = Viewport::new(1920, 1080);

        let mut layer = LabelLayer::new();
        layer.push(LabelOverlay::new("centred", id).with_offset_x(-40.0));
        layer.update(&scene, &camera, viewport);

        let label = layer.iter().next().expect("label");
        let [x, y] = label.screen_position();
        assert!((x - (960.0 - 40.0)).abs() < 1e-2);
        assert!((y - 540.0).abs() < 1e-2);
        assert!(label.in_depth_range());
    }

    #[test]
    fn test_centred_label_shifts_by_half_its_text_width() {
        let (scene, id) = scene_with_object_at(0.0, 0.0, 0.0);
        let camera = camera_looking_at(Point3::new(0.0, 0.0, 0.0));
        let mut layer = LabelLayer::new();
        layer.push(LabelOverlay::new("wide label", id).centred());
        layer.push(LabelOverlay::new("plain", id));
        layer.update(&scene, &camera, Viewport::new(1000, 500));

        let labels: Vec<_> = layer.iter().collect();
        let [x, y] = labels[0].draw_origin(180.0);
        assert!((x - 410.0).abs() < 1e-2);
        assert!((y - 250.0).abs() < 1e-2);
        // a wider font moves the origin further left
        assert!(labels[0].draw_origin(240.0)[0] < x);
        assert_eq!(labels[1].draw_origin(180.0), labels[1].screen_position());
    }

    #[test]
    fn test_screen_position_corners() {
        let viewport = Viewport::new(800, 600);
        assert_eq!(screen_position(Vector3::new(-1.0, 1.0, 0.0), viewport, 0.0), [0.0, 0.0]);
        assert_eq!(screen_position(Vector3::new(1.0, -1.0, 0.0), viewport, 0.0), [800.0, 600.0]);
        assert_eq!(screen_position(Vector3::new(0.0, 0.0, 0.0), viewport, 5.0), [405.0, 300.0]);
    }

    #[test]
    fn test_hidden_flag_hides_every_label_next_update() {
        let (scene, id) = scene_with_object_at(0.0, 0.0, 0.0);
        let camera = camera_looking_at(Point3::new(0.0, 0.0, 0.0));
        let mut layer = LabelLayer::new();
        layer.push(LabelOverlay::new("a", id));
        layer.push(LabelOverlay::new("b", id));

        layer.update(&scene, &camera, Viewport::new(640, 480));
        assert!(layer.iter().all(|l| l.is_visible()));

        layer.visible = false;
        layer.update(&scene, &camera, Viewport::new(640, 480));
        assert!(layer.iter().all(|l| !l.is_visible()));
    }

    #[test]
    fn test_point_behind_camera_gets_finite_pixel() {
        let (scene, id) = scene_with_object_at(0.5, 2.0, 12.0);
        let camera = camera_looking_at(Point3::new(0.0, 0.0, 0.0));
        let viewport = Viewport::new(1280, 720);

        let mut layer = LabelLayer::new();
        layer.push(LabelOverlay::new("behind", id));
        layer.update(&scene, &camera, viewport);

        let label = layer.iter().next().expect("label");
        let [x, y] = label.screen_position();
        assert!(x.is_finite() && y.is_finite());
        assert!(!label.in_depth_range());
        assert_eq!(label.screen_position(), screen_position(label.ndc(), viewport, 0.0));
        assert!(label.is_visible());
    }
}

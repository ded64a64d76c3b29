//! Wireframe cube over a grid, with rotation and camera sliders.

use std::f32::consts::TAU;

use cgmath::Point3;

use crate::{
    controls::{ControlPanel, NumberRange},
    frame::Viewport,
    gfx::{
        camera::PerspectiveCamera,
        geometry::{generate_box, generate_grid},
        resources::Material,
        scene::{ObjectId, Scene, SceneObject},
    },
    state::AppState,
};

use super::Demo;

/// Point the camera is re-aimed at every frame.
pub const LOOK_AT: Point3<f32> = Point3::new(0.0, 0.5, 0.0);

pub fn build(viewport: Viewport) -> Demo {
    let mut scene = Scene::new();
    scene.background = [0.0, 0.0, 0.0];

    let grid = scene.add_geometry(generate_grid(10.0, 10));
    let grid_material = scene.add_material(Material::basic("grid", [0.53, 0.53, 0.53]));
    scene.add_object(SceneObject::new("grid", grid, grid_material));

    let cube_geometry = scene.add_geometry(generate_box(1.0, 1.0, 1.0));
    let cube_material = scene.add_material(Material::normal("cube").with_wireframe(true));
    let cube = scene.add_object(
        SceneObject::new("cube", cube_geometry, cube_material).with_position(0.0, 0.5, 0.0),
    );

    let camera =
        PerspectiveCamera::new(75.0, viewport.aspect(), 0.1, 1000.0).with_position(0.0, 2.0, 3.0);
    let mut state = AppState::new(scene, camera).with_look_at(LOOK_AT);
    state.viewport = viewport;

    Demo {
        state,
        panel: control_panel(cube),
    }
}

fn control_panel(cube: ObjectId) -> ControlPanel<AppState> {
    let mut panel: ControlPanel<AppState> = ControlPanel::new("Controls");

    let rotation = NumberRange::new(0.0, TAU);
    let mut cube_folder = panel.add_folder("Cube");
    cube_folder.add("x", rotation, move |s| s.scene[cube].rotation.x, move |s, v| {
        s.scene[cube].rotation.x = v
    });
    cube_folder.add("y", rotation, move |s| s.scene[cube].rotation.y, move |s, v| {
        s.scene[cube].rotation.y = v
    });
    cube_folder.add("z", rotation, move |s| s.scene[cube].rotation.z, move |s, v| {
        s.scene[cube].rotation.z = v
    });
    cube_folder.open();

    let position = NumberRange::new(-10.0, 10.0);
    let mut camera = panel.add_folder("Camera");
    camera.add("x", position, |s| s.camera.position.x, |s, v| s.camera.position.x = v);
    camera.add("y", position, |s| s.camera.position.y, |s, v| s.camera.position.y = v);
    camera.add("z", position, |s| s.camera.position.z, |s, v| s.camera.position.z = v);
    camera
        .add("fov", NumberRange::new(0.0, 180.0), |s| s.camera.fov, |s, v| s.camera.fov = v)
        .step(0.01)
        .on_change(|s| s.camera.update_projection_matrix());
    camera
        .add("aspect", NumberRange::new(0.00001, 10.0), |s| s.camera.aspect, |s, v| {
            s.camera.aspect = v
        })
        .on_change(|s| s.camera.update_projection_matrix());
    camera
        .add("near", NumberRange::new(0.01, 10.0), |s| s.camera.near, |s, v| s.camera.near = v)
        .on_change(|s| s.camera.update_projection_matrix());
    camera
        .add("far", NumberRange::new(0.01, 10.0), |s| s.camera.far, |s, v| s.camera.far = v)
        .on_change(|s| s.camera.update_projection_matrix());
    camera.open();

    panel
}

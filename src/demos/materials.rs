//! Four icosahedrons, one per shading model, under an orbit camera.

use cgmath::Point3;

use crate::{
    controls::{ControlPanel, NumberRange},
    frame::Viewport,
    gfx::{
        camera::{OrbitControls, PerspectiveCamera},
        geometry::{generate_icosahedron, generate_plane},
        resources::{Environment, Material, ShadingModel},
        scene::{Light, LightId, MaterialId, Scene, SceneObject},
    },
    labels::LabelOverlay,
    state::AppState,
};

use super::Demo;

const TARGET: Point3<f32> = Point3::new(0.0, 1.0, 0.0);
const SPACING: f32 = 2.5;
const RADIUS: f32 = 0.8;

struct Lights {
    ambient: LightId,
    directional: LightId,
}

pub fn build(viewport: Viewport, show_labels: bool) -> Demo {
    let mut scene = Scene::new();
    scene.environment = Some(Environment::default());

    let ground_geometry = scene.add_geometry(generate_plane(20.0, 20.0, 1, 1));
    let ground_material = scene.add_material(Material::lambert("ground", [0.36, 0.36, 0.38]));
    scene.add_object(SceneObject::new("ground", ground_geometry, ground_material));

    let materials = [
        Material::basic("basic", [0.2, 0.55, 1.0]).with_env_map(0.25),
        Material::lambert("lambert", [0.95, 0.45, 0.2]).with_env_map(0.2),
        Material::phong("phong", [0.2, 0.8, 0.45])
            .with_specular([1.0, 1.0, 1.0], 60.0)
            .with_env_map(0.3),
        Material::standard("standard", [0.85, 0.85, 0.9])
            .with_roughness(0.3)
            .with_metalness(0.8)
            .with_env_map(1.0),
    ];
    let mesh = scene.add_geometry(generate_icosahedron(RADIUS, 1));

    let start_x = -SPACING * (materials.len() as f32 - 1.0) / 2.0;
    let mut placed = Vec::with_capacity(materials.len());
    for (i, material) in materials.into_iter().enumerate() {
        let title = label_text(material.model);
        let name = material.name.clone();
        let material = scene.add_material(material);
        let object = scene.add_object(
            SceneObject::new(&name, mesh, material).with_position(
                start_x + SPACING * i as f32,
                TARGET.y,
                0.0,
            ),
        );
        placed.push((title, object, material));
    }

    let lights = Lights {
        ambient: scene.add_light(Light::ambient("ambient", [1.0, 1.0, 1.0], 0.3)),
        directional: scene.add_light(
            Light::directional("sun", [1.0, 1.0, 1.0], 1.0).with_position(4.0, 6.0, 5.0),
        ),
    };

    let camera =
        PerspectiveCamera::new(60.0, viewport.aspect(), 0.1, 100.0).with_position(0.0, 3.0, 7.0);
    let controls = OrbitControls::new(TARGET)
        .with_damping(0.05)
        .with_distance_limits(2.0, 30.0);

    let mut state = AppState::new(scene, camera).with_orbit_controls(controls);
    state.viewport = viewport;
    state.labels.visible = show_labels;
    for (title, object, _) in &placed {
        state.labels.push(LabelOverlay::new(title, *object).centred());
    }

    let mut panel = ControlPanel::new("Debug");
    for (_, _, material) in &placed {
        let model = state.scene[*material].model;
        material_folder(&mut panel, model, *material);
    }
    light_folder(&mut panel, lights);
    environment_folder(&mut panel);
    camera_folder(&mut panel);
    orbit_folder(&mut panel);
    panel.root().add_toggle("labels", |s| s.labels.visible, |s, v| s.labels.visible = v);

    Demo { state, panel }
}

fn label_text(model: ShadingModel) -> &'static str {
    match model {
        ShadingModel::Basic => "MeshBasicMaterial",
        ShadingModel::Lambert => "MeshLambertMaterial",
        ShadingModel::Phong => "MeshPhongMaterial",
        ShadingModel::Standard => "MeshStandardMaterial",
        ShadingModel::Normal => "MeshNormalMaterial",
    }
}

fn folder_name(model: ShadingModel) -> &'static str {
    match model {
        ShadingModel::Basic => "Basic",
        ShadingModel::Lambert => "Lambert",
        ShadingModel::Phong => "Phong",
        ShadingModel::Standard => "Standard",
        ShadingModel::Normal => "Normal",
    }
}

fn material_folder(panel: &mut ControlPanel<AppState>, model: ShadingModel, id: MaterialId) {
    let unit = NumberRange::new(0.0, 1.0).with_step(0.01);
    let mut folder = panel.add_folder(folder_name(model));

    folder.add_color("color", move |s| s.scene[id].color, move |s, v| s.scene[id].color = v);
    folder.add_toggle("wireframe", move |s| s.scene[id].wireframe, move |s, v| {
        s.scene[id].wireframe = v
    });
    folder
        .add_toggle("flatShading", move |s| s.scene[id].flat_shading, move |s, v| {
            s.scene[id].flat_shading = v
        })
        .on_change(move |s| s.scene[id].mark_needs_update());
    folder.add_toggle("envMap", move |s| s.scene[id].env_map, move |s, v| {
        s.scene[id].env_map = v
    });
    folder.add("reflectivity", unit, move |s| s.scene[id].reflectivity, move |s, v| {
        s.scene[id].reflectivity = v
    });

    match model {
        ShadingModel::Phong => {
            folder.add_color("specular", move |s| s.scene[id].specular, move |s, v| {
                s.scene[id].specular = v
            });
            folder.add(
                "shininess",
                NumberRange::new(0.0, 200.0).with_step(1.0),
                move |s| s.scene[id].shininess,
                move |s, v| s.scene[id].shininess = v,
            );
        }
        ShadingModel::Standard => {
            folder.add("roughness", unit, move |s| s.scene[id].roughness, move |s, v| {
                s.scene[id].roughness = v
            });
            folder.add("metalness", unit, move |s| s.scene[id].metalness, move |s, v| {
                s.scene[id].metalness = v
            });
        }
        _ => {}
    }
}

fn light_folder(panel: &mut ControlPanel<AppState>, lights: Lights) {
    let Lights {
        ambient,
        directional,
    } = lights;
    let mut folder = panel.add_folder("Light");

    folder.add(
        "ambient",
        NumberRange::new(0.0, 2.0).with_step(0.01),
        move |s| s.scene[ambient].intensity,
        move |s, v| s.scene[ambient].intensity = v,
    );
    folder.add(
        "intensity",
        NumberRange::new(0.0, 5.0).with_step(0.01),
        move |s| s.scene[directional].intensity,
        move |s, v| s.scene[directional].intensity = v,
    );
    folder.add_color("color", move |s| s.scene[directional].color, move |s, v| {
        s.scene[directional].color = v
    });

    let position = NumberRange::new(-10.0, 10.0).with_step(0.1);
    folder.add("x", position, move |s| s.scene[directional].position.x, move |s, v| {
        s.scene[directional].position.x = v
    });
    folder.add("y", position, move |s| s.scene[directional].position.y, move |s, v| {
        s.scene[directional].position.y = v
    });
    folder.add("z", position, move |s| s.scene[directional].position.z, move |s, v| {
        s.scene[directional].position.z = v
    });
}

fn env_read<T: Default>(s: &AppState, read: impl Fn(&Environment) -> T) -> T {
    s.scene.environment.as_ref().map(read).unwrap_or_default()
}

fn env_write(s: &mut AppState, write: impl FnOnce(&mut Environment)) {
    if let Some(env) = s.scene.environment.as_mut() {
        write(env);
    }
}

fn environment_folder(panel: &mut ControlPanel<AppState>) {
    let mut folder = panel.add_folder("Environment");

    folder.add_toggle(
        "enabled",
        |s| env_read(s, |e| e.enabled),
        |s, v| env_write(s, |e| e.enabled = v),
    );
    folder.add_toggle(
        "background",
        |s| env_read(s, |e| e.background),
        |s, v| env_write(s, |e| e.background = v),
    );
    folder.add(
        "intensity",
        NumberRange::new(0.0, 2.0).with_step(0.01),
        |s| env_read(s, |e| e.intensity),
        |s, v| env_write(s, |e| e.intensity = v),
    );
    folder.add_color(
        "sky",
        |s| env_read(s, |e| e.sky),
        |s, v| env_write(s, |e| e.sky = v),
    );
    folder.add_color(
        "horizon",
        |s| env_read(s, |e| e.horizon),
        |s, v| env_write(s, |e| e.horizon = v),
    );
    folder.add_color(
        "ground",
        |s| env_read(s, |e| e.ground),
        |s, v| env_write(s, |e| e.ground = v),
    );
}

fn camera_folder(panel: &mut ControlPanel<AppState>) {
    let mut folder = panel.add_folder("Camera");

    folder
        .add("fov", NumberRange::new(1.0, 179.0), |s| s.camera.fov, |s, v| s.camera.fov = v)
        .step(0.01)
        .on_change(|s| s.camera.update_projection_matrix());
    folder
        .add("near", NumberRange::new(0.01, 10.0), |s| s.camera.near, |s, v| s.camera.near = v)
        .on_change(|s| s.camera.update_projection_matrix());
    folder
        .add("far", NumberRange::new(10.0, 1000.0), |s| s.camera.far, |s, v| s.camera.far = v)
        .on_change(|s| s.camera.update_projection_matrix());
}

fn orbit_folder(panel: &mut ControlPanel<AppState>) {
    let mut folder = panel.add_folder("Orbit");

    folder.add_toggle(
        "enableDamping",
        |s| s.controls.as_ref().is_some_and(|c| c.enable_damping),
        |s, v| {
            if let Some(controls) = s.controls.as_mut() {
                controls.enable_damping = v;
            }
        },
    );
    folder.add(
        "dampingFactor",
        NumberRange::new(0.0, 1.0).with_step(0.01),
        |s| s.controls.as_ref().map_or(0.0, |c| c.damping_factor),
        |s, v| {
            if let Some(controls) = s.controls.as_mut() {
                controls.damping_factor = v;
            }
        },
    );
}

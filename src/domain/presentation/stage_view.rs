//! Mirrors the scene graph into engine meshes.
//!
//! New visual objects get a `PbrBundle` the frame they appear; existing ones have
//! their transform copied every frame. The scene graph never shrinks, so the
//! count of mirrored objects is all the bookkeeping needed.

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::domain::simulation::scene::{Geometry, Material, VisualHandle};
use crate::domain::simulation::{DominoStage, SimTick};

#[derive(Component, Debug, Clone, Copy)]
pub struct VisualLink(pub VisualHandle);

#[derive(Resource, Default)]
struct SceneMirror {
    mirrored: usize,
}

pub struct StageViewPlugin;
impl Plugin for StageViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneMirror>()
            .add_systems(Update, present_scene.after(SimTick));
    }
}

fn present_scene(
    mut commands: Commands,
    stage: Res<DominoStage>,
    mut mirror: ResMut<SceneMirror>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q: Query<(&VisualLink, &mut Transform)>,
) {
    let scene = &stage.world.scene;

    for (link, mut t) in &mut q {
        if let Some(visual) = scene.get(link.0) {
            t.translation = visual.position;
            t.rotation = visual.orientation;
        }
    }

    for (handle, visual) in scene.iter().skip(mirror.mirrored) {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(mesh_for(visual.geometry)),
                material: materials.add(material_for(visual.material)),
                transform: Transform::from_translation(visual.position)
                    .with_rotation(visual.orientation),
                ..default()
            },
            VisualLink(handle),
        ));
    }
    mirror.mirrored = scene.len();
}

fn mesh_for(geometry: Geometry) -> Mesh {
    match geometry {
        Geometry::Cuboid {
            width,
            height,
            depth,
        } => Cuboid::new(width, height, depth).into(),
        Geometry::Plane { width, depth } => Plane3d::default().mesh().size(width, depth).into(),
    }
}

fn material_for(material: Material) -> StandardMaterial {
    let [r, g, b] = material.rgb();
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        double_sided: material.double_sided,
        cull_mode: if material.double_sided {
            None
        } else {
            Some(Face::Back)
        },
        ..default()
    }
}

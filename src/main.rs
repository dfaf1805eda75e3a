use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use domino_survey::domain::simulation::DominoStage;
use domino_survey::domain::survey::catalog;
use domino_survey::domain::survey::questionnaire::{Questionnaire, QuestionnaireError};
use domino_survey::domain::{InputPlugin, SimPlugin, SurveyPlugin, UiPlugin};
use domino_survey::MainCamera;

fn main() -> Result<(), QuestionnaireError> {
    let questionnaire = Questionnaire::new(catalog::default_questions())?;

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "domino survey".into(),
                        resolution: (1280., 800.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,domino_survey=debug".into(),
                    ..default()
                }),
        )
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins((
            SimPlugin,
            SurveyPlugin::new(questionnaire),
            UiPlugin,
            InputPlugin,
        ))
        .add_systems(Startup, (setup_camera, setup_light))
        .run();

    Ok(())
}

fn setup_camera(mut commands: Commands, stage: Res<DominoStage>) {
    let rig = stage.world.camera;
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            projection: PerspectiveProjection {
                fov: rig.fov_degrees.to_radians(),
                near: rig.near,
                far: rig.far,
                ..default()
            }
            .into(),
            transform: Transform::from_translation(rig.position).looking_at(rig.target, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}

fn setup_light(mut commands: Commands) {
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            color: Color::WHITE,
            ..default()
        },
        transform: Transform::from_xyz(-1.0, 2.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

pub mod lifecycle;
pub mod physics;
pub mod scene;
pub mod scheduler;
pub mod world;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lifecycle::{EntityId, ObjectLifecycleManager};
use physics::DEFAULT_GRAVITY;
use scheduler::{FrameScheduler, TickReport};
use world::WorldContext;

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RngMode {
    #[default]
    Entropy,
    Seeded,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

#[derive(Resource)]
pub struct SeededRng(pub StdRng);

/// Drop one more domino.
#[derive(Event, Default, Clone, Copy, Debug)]
pub struct SpawnDomino;

#[derive(Resource, Clone)]
pub struct SimSettings {
    /// Magnitude of the downward pull.
    pub gravity: f32,
    pub running: bool,
    pub deterministic: bool,
    pub seed: u64,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            gravity: -DEFAULT_GRAVITY.y,
            running: true,
            deterministic: false,
            seed: 0,
            show_help: false,
            show_diagnostics: false,
        }
    }
}

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimStats {
    pub spawned: usize,
    pub settled: usize,
    pub bodies: usize,
    pub frame: u64,
}

/// The shared world plus the two components that drive it.
#[derive(Resource, Debug)]
pub struct DominoStage {
    pub world: WorldContext,
    pub lifecycle: ObjectLifecycleManager,
    pub scheduler: FrameScheduler,
}

impl Default for DominoStage {
    fn default() -> Self {
        let mut world = WorldContext::default();
        world.install_floor();
        Self {
            world,
            lifecycle: ObjectLifecycleManager::default(),
            scheduler: FrameScheduler::default(),
        }
    }
}

impl DominoStage {
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> EntityId {
        let Self {
            world,
            lifecycle,
            scheduler,
        } = self;
        lifecycle.spawn(world, scheduler, rng)
    }

    pub fn tick(&mut self) -> TickReport {
        let Self {
            world,
            lifecycle,
            scheduler,
        } = self;
        scheduler.tick(world, lifecycle.entities_mut())
    }
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimSettings>()
            .init_resource::<SimStats>()
            .init_resource::<DominoStage>()
            .init_state::<RngMode>()
            .add_event::<SpawnDomino>()
            .add_systems(OnEnter(RngMode::Seeded), seed_rng)
            .add_systems(OnExit(RngMode::Seeded), |mut commands: Commands| {
                commands.remove_resource::<SeededRng>();
            })
            .add_systems(
                Update,
                (spawn_dominoes, frame_tick).chain().in_set(SimTick),
            );
    }
}

fn seed_rng(mut commands: Commands, settings: Res<SimSettings>) {
    commands.insert_resource(SeededRng(StdRng::seed_from_u64(settings.seed)));
}

fn spawn_dominoes(
    mut ev: EventReader<SpawnDomino>,
    mut stage: ResMut<DominoStage>,
    mut stats: ResMut<SimStats>,
    mut seeded_rng: Option<ResMut<SeededRng>>,
) {
    let mut rng = rand::thread_rng();
    for _ in ev.read() {
        match seeded_rng.as_mut() {
            Some(seeded) => stage.spawn(&mut seeded.0),
            None => stage.spawn(&mut rng),
        };
    }
    stats.spawned = stage.lifecycle.len();
    stats.bodies = stage.world.physics.len();
}

fn frame_tick(
    settings: Res<SimSettings>,
    mut stage: ResMut<DominoStage>,
    mut stats: ResMut<SimStats>,
) {
    if !settings.running {
        return;
    }

    let gravity = Vec3::NEG_Y * settings.gravity;
    if stage.world.physics.gravity() != gravity {
        stage.world.physics.set_gravity(gravity);
    }

    let report = stage.tick();
    stats.frame = report.frame;
    stats.settled += report.settled.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, SimPlugin));
        app
    }

    fn positions(app: &App) -> Vec<Vec3> {
        let stage = app.world().resource::<DominoStage>();
        stage
            .lifecycle
            .entities()
            .iter()
            .map(|e| stage.world.physics.body(e.body).unwrap().position)
            .collect()
    }

    #[test]
    fn stage_starts_with_floor_only() {
        let app = test_app();
        let stage = app.world().resource::<DominoStage>();
        assert_eq!(stage.world.physics.len(), 1);
        assert_eq!(stage.world.scene.len(), 1);
        assert!(stage.lifecycle.is_empty());
    }

    #[test]
    fn spawn_event_adds_a_watched_domino() {
        let mut app = test_app();
        app.world_mut().send_event(SpawnDomino);
        app.update();

        let stage = app.world().resource::<DominoStage>();
        assert_eq!(stage.lifecycle.len(), 1);
        assert_eq!(stage.scheduler.watching().len(), 1);

        let stats = app.world().resource::<SimStats>();
        assert_eq!(stats.spawned, 1);
        assert_eq!(stats.bodies, 2);
        assert_eq!(stats.frame, 1);
    }

    #[test]
    fn ticks_every_update_without_spawns() {
        let mut app = test_app();
        for _ in 0..3 {
            app.update();
        }
        let stage = app.world().resource::<DominoStage>();
        assert_eq!(stage.world.physics.steps(), 3);
        assert_eq!(stage.world.scene.frames(), 3);
    }

    #[test]
    fn paused_world_does_not_step() {
        let mut app = test_app();
        app.world_mut().resource_mut::<SimSettings>().running = false;
        app.world_mut().send_event(SpawnDomino);
        app.update();

        let stage = app.world().resource::<DominoStage>();
        assert_eq!(stage.lifecycle.len(), 1);
        assert_eq!(stage.world.physics.steps(), 0);
    }

    #[test]
    fn gravity_setting_reaches_physics() {
        let mut app = test_app();
        app.world_mut().resource_mut::<SimSettings>().gravity = 9.81;
        app.update();
        let stage = app.world().resource::<DominoStage>();
        assert_eq!(stage.world.physics.gravity(), Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn seeded_mode_reproduces_spawns() {
        let run = || {
            let mut app = test_app();
            app.world_mut().resource_mut::<SimSettings>().seed = 7;
            app.world_mut()
                .resource_mut::<NextState<RngMode>>()
                .set(RngMode::Seeded);
            app.update();
            assert!(app.world().contains_resource::<SeededRng>());

            for _ in 0..3 {
                app.world_mut().send_event(SpawnDomino);
            }
            app.update();
            positions(&app)
        };

        let first = run();
        assert_eq!(first.len(), 3);
        assert_eq!(first, run());
    }
}

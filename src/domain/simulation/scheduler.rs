//! The per-frame driver: step physics, follow falling dominoes, render.

use bevy::log::debug;

use super::lifecycle::{DominoEntity, EntityId};
use super::physics::FIXED_TIMESTEP;
use super::scene::RenderStats;
use super::world::WorldContext;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    /// Entities whose visual reached the floor during this tick.
    pub settled: Vec<EntityId>,
    pub render: RenderStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Watch {
    Falling,
    Settled,
    /// Handles no longer resolve; stop following.
    Lost,
}

#[derive(Clone, Debug)]
pub struct FrameScheduler {
    timestep: f32,
    watching: Vec<EntityId>,
    frame: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(FIXED_TIMESTEP)
    }
}

impl FrameScheduler {
    pub fn new(timestep: f32) -> Self {
        Self {
            timestep,
            watching: Vec::new(),
            frame: 0,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Entities still falling, in spawn order.
    pub fn watching(&self) -> &[EntityId] {
        &self.watching
    }

    pub fn watch(&mut self, id: EntityId) {
        self.watching.push(id);
    }

    pub fn tick(&mut self, world: &mut WorldContext, entities: &mut [DominoEntity]) -> TickReport {
        world.physics.step(self.timestep);

        let mut settled = Vec::new();
        self.watching.retain(|&id| {
            let Some(entity) = entities.get_mut(id.index()) else {
                return false;
            };
            match follow(world, entity) {
                Watch::Falling => true,
                Watch::Settled => {
                    settled.push(id);
                    false
                }
                Watch::Lost => false,
            }
        });

        let render = world.scene.render(&world.camera);
        self.frame += 1;

        for id in &settled {
            debug!(entity = id.index(), frame = self.frame, "domino settled");
        }

        TickReport {
            frame: self.frame,
            settled,
            render,
        }
    }
}

/// Copy the body pose onto the visual, then latch `settled` once it hits y <= 0.
///
/// The body itself is left alone: it keeps simulating after the visual stops.
fn follow(world: &mut WorldContext, entity: &mut DominoEntity) -> Watch {
    let Some(body) = world.physics.body(entity.body) else {
        return Watch::Lost;
    };
    let Some(visual) = world.scene.get_mut(entity.visual) else {
        return Watch::Lost;
    };

    visual.set_pose(body.position, body.orientation);
    if visual.position.y > 0.0 {
        return Watch::Falling;
    }

    visual.position.y = 0.0;
    entity.settle();
    Watch::Settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::lifecycle::{ObjectLifecycleManager, SpawnPlan};
    use bevy::math::Vec3;

    fn drop_at(height: f32) -> (WorldContext, FrameScheduler, ObjectLifecycleManager, EntityId) {
        let mut world = WorldContext::default();
        world.install_floor();
        let mut scheduler = FrameScheduler::default();
        let mut manager = ObjectLifecycleManager::default();
        let plan = SpawnPlan {
            position: Vec3::new(0.5, height, -0.5),
            euler: Vec3::ZERO,
            impulse: Vec3::ZERO,
        };
        let id = manager.spawn_planned(&mut world, &mut scheduler, &plan);
        (world, scheduler, manager, id)
    }

    #[test]
    fn visual_tracks_body_while_falling() {
        let (mut world, mut scheduler, mut manager, id) = drop_at(5.0);

        for _ in 0..30 {
            scheduler.tick(&mut world, manager.entities_mut());
            let entity = manager.entity(id).unwrap();
            let body = world.physics.body(entity.body).unwrap();
            let visual = world.scene.get(entity.visual).unwrap();
            assert!(!entity.is_settled());
            assert_eq!(visual.position, body.position);
            assert_eq!(visual.orientation, body.orientation);
        }
    }

    #[test]
    fn settles_exactly_once_at_zero() {
        let (mut world, mut scheduler, mut manager, id) = drop_at(5.0);

        let mut settle_ticks = 0;
        for _ in 0..600 {
            let report = scheduler.tick(&mut world, manager.entities_mut());
            settle_ticks += report.settled.iter().filter(|&&s| s == id).count();
        }

        let entity = manager.entity(id).unwrap();
        assert!(entity.is_settled());
        assert_eq!(settle_ticks, 1);
        assert_eq!(world.scene.get(entity.visual).unwrap().position.y, 0.0);
        assert!(scheduler.watching().is_empty());
    }

    #[test]
    fn visual_never_goes_below_floor() {
        let (mut world, mut scheduler, mut manager, id) = drop_at(2.0);
        let visual = manager.entity(id).unwrap().visual;

        let mut last = f32::MAX;
        for _ in 0..400 {
            scheduler.tick(&mut world, manager.entities_mut());
            let y = world.scene.get(visual).unwrap().position.y;
            assert!(y >= 0.0);
            // No upward kick, so the fall is monotone.
            assert!(y <= last);
            last = y;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn settled_visual_stops_following_body() {
        let (mut world, mut scheduler, mut manager, id) = drop_at(0.5);
        while !manager.entity(id).unwrap().is_settled() {
            scheduler.tick(&mut world, manager.entities_mut());
        }
        let entity = *manager.entity(id).unwrap();

        world
            .physics
            .body_mut(entity.body)
            .unwrap()
            .apply_impulse(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO);
        for _ in 0..5 {
            scheduler.tick(&mut world, manager.entities_mut());
        }

        assert!(world.physics.body(entity.body).unwrap().position.y > 0.0);
        assert_eq!(world.scene.get(entity.visual).unwrap().position.y, 0.0);
        assert!(manager.entity(id).unwrap().is_settled());
    }

    #[test]
    fn tick_steps_physics_then_renders() {
        let mut world = WorldContext::default();
        let mut scheduler = FrameScheduler::default();
        let report = scheduler.tick(&mut world, &mut []);
        assert_eq!(world.physics.steps(), 1);
        assert_eq!(report.frame, 1);
        assert_eq!(report.render.frame, 1);
    }
}

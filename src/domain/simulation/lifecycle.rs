//! Domino creation: random pose, paired body + visual, one-time impulse.
//!
//! Entities are never despawned. Every spawn adds one body to the physics
//! world and one object to the scene graph for the rest of the session.

use bevy::log::debug;
use bevy::math::{EulerRot, Quat, Vec3};
use rand::Rng;
use std::f32::consts::PI;

use super::physics::{BodyHandle, RigidBody, Shape};
use super::scene::{Geometry, Material, VisualHandle, VisualObject};
use super::scheduler::FrameScheduler;
use super::world::WorldContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One body and one visual, bound for life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DominoEntity {
    pub body: BodyHandle,
    pub visual: VisualHandle,
    settled: bool,
}

impl DominoEntity {
    pub fn new(body: BodyHandle, visual: VisualHandle) -> Self {
        Self {
            body,
            visual,
            settled: false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// One-way latch.
    pub(crate) fn settle(&mut self) {
        self.settled = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    pub floor_half_extent: f32,
    pub spawn_height: f32,
    pub size: Vec3,
    pub mass: f32,
    pub restitution: f32,
    pub color: u32,
    pub impulse_bias: f32,
    pub impulse_scale: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            floor_half_extent: 2.5,
            spawn_height: 5.0,
            size: Vec3::new(0.1, 0.5, 0.2),
            mass: 1.0,
            restitution: 0.2,
            color: 0x044a88,
            impulse_bias: 0.2,
            impulse_scale: 0.2,
        }
    }
}

impl SpawnParams {
    /// Half width of the square dominoes may appear over.
    pub fn reach(&self) -> f32 {
        self.floor_half_extent * 2.0
    }
}

/// Where a domino appears and how it is kicked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPlan {
    pub position: Vec3,
    /// Rotation about X, Y and Z, each in `[0, π)`.
    pub euler: Vec3,
    pub impulse: Vec3,
}

impl SpawnPlan {
    /// Draw order is fixed: x, z, rot x, rot y, rot z, impulse x, impulse y.
    pub fn roll<R: Rng>(rng: &mut R, params: &SpawnParams) -> Self {
        let reach = params.reach();
        let x = (rng.gen::<f32>() * 2.0 - 1.0) * reach;
        let z = (rng.gen::<f32>() * 2.0 - 1.0) * reach;

        let euler = Vec3::new(
            PI * rng.gen::<f32>(),
            PI * rng.gen::<f32>(),
            PI * rng.gen::<f32>(),
        );

        // The kick stays in the X/Y plane.
        let kick_x = (rng.gen::<f32>() - params.impulse_bias) * params.impulse_scale;
        let kick_y = (rng.gen::<f32>() - params.impulse_bias) * params.impulse_scale;

        Self {
            position: Vec3::new(x, params.spawn_height, z),
            euler,
            impulse: Vec3::new(kick_x, kick_y, 0.0),
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.euler.x, self.euler.y, self.euler.z)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ObjectLifecycleManager {
    params: SpawnParams,
    entities: Vec<DominoEntity>,
}

impl ObjectLifecycleManager {
    pub fn new(params: SpawnParams) -> Self {
        Self {
            params,
            entities: Vec::new(),
        }
    }

    pub fn params(&self) -> &SpawnParams {
        &self.params
    }

    pub fn spawn<R: Rng>(
        &mut self,
        world: &mut WorldContext,
        scheduler: &mut FrameScheduler,
        rng: &mut R,
    ) -> EntityId {
        let plan = SpawnPlan::roll(rng, &self.params);
        self.spawn_planned(world, scheduler, &plan)
    }

    /// Materialize a pre-rolled plan.
    pub fn spawn_planned(
        &mut self,
        world: &mut WorldContext,
        scheduler: &mut FrameScheduler,
        plan: &SpawnPlan,
    ) -> EntityId {
        let params = &self.params;
        let orientation = plan.orientation();

        let visual = world.scene.add(
            VisualObject::new(Geometry::cuboid(params.size), Material::solid(params.color))
                .with_pose(plan.position, orientation),
        );

        let mut body = RigidBody::dynamic(params.mass, Shape::cuboid(params.size))
            .with_pose(plan.position, orientation)
            .with_restitution(params.restitution);
        body.apply_impulse(plan.impulse, body.position);
        let body = world.physics.add_body(body);

        let id = EntityId(self.entities.len());
        self.entities.push(DominoEntity::new(body, visual));
        scheduler.watch(id);

        debug!(
            entity = id.index(),
            x = plan.position.x,
            z = plan.position.z,
            "domino spawned"
        );
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&DominoEntity> {
        self.entities.get(id.0)
    }

    pub fn entities(&self) -> &[DominoEntity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [DominoEntity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn settled_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_settled()).count()
    }
}

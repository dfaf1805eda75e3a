use bevy::math::{Quat, Vec3};

use super::physics::{BodyHandle, PhysicsWorld, RigidBody, Shape};
use super::scene::{CameraRig, Geometry, Material, SceneGraph, VisualHandle, VisualObject};

pub const FLOOR_SIZE: (f32, f32) = (7.0, 6.0);
pub const FLOOR_COLOR: u32 = 0x888888;

/// Everything the scheduler and the lifecycle manager share.
#[derive(Clone, Debug, Default)]
pub struct WorldContext {
    pub physics: PhysicsWorld,
    pub scene: SceneGraph,
    pub camera: CameraRig,
}

impl WorldContext {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            physics: PhysicsWorld::new(gravity),
            ..Default::default()
        }
    }

    /// Grey floor at y = 0 with a matching static plane body.
    pub fn install_floor(&mut self) -> (BodyHandle, VisualHandle) {
        let (width, depth) = FLOOR_SIZE;
        let visual = self.scene.add(VisualObject::new(
            Geometry::Plane { width, depth },
            Material::double_sided(FLOOR_COLOR),
        ));
        let body = self
            .physics
            .add_body(RigidBody::fixed(Shape::Plane).with_pose(Vec3::ZERO, Quat::IDENTITY));
        (body, visual)
    }
}

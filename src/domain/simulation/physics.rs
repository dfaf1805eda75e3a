//! Minimal rigid-body world: gravity, impulses and contacts against static planes.
//!
//! Bodies live in an arena and are addressed by [`BodyHandle`]. Nothing is ever
//! removed, so handles stay valid for the lifetime of the world.

use bevy::math::{Mat3, Quat, Vec3};

pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -1.1, 0.0);

/// Rebounds slower than this many frames' worth of gravity are dropped.
const REST_FRAMES: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BodyKind {
    #[default]
    Dynamic,
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { half_extents: Vec3 },
    /// Infinite plane through the body origin, normal along local +Y.
    Plane,
}

impl Shape {
    pub fn cuboid(size: Vec3) -> Self {
        Shape::Cuboid {
            half_extents: size * 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigidBody {
    pub kind: BodyKind,
    pub mass: f32,
    pub shape: Shape,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub restitution: f32,
}

impl RigidBody {
    pub fn dynamic(mass: f32, shape: Shape) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            shape,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            restitution: 0.0,
        }
    }

    pub fn fixed(shape: Shape) -> Self {
        Self {
            kind: BodyKind::Static,
            mass: 0.0,
            ..Self::dynamic(0.0, shape)
        }
    }

    pub fn with_pose(mut self, position: Vec3, orientation: Quat) -> Self {
        self.position = position;
        self.orientation = orientation;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Static bodies and massless bodies never move.
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static || self.mass <= 0.0
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.is_static() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// World-space inverse inertia tensor.
    pub fn inverse_inertia(&self) -> Mat3 {
        if self.is_static() {
            return Mat3::ZERO;
        }
        let local = match self.shape {
            Shape::Cuboid { half_extents: h } => {
                // Solid box about its centre: m/3 * (b² + c²) with half extents.
                let k = self.mass / 3.0;
                let inertia = Vec3::new(
                    k * (h.y * h.y + h.z * h.z),
                    k * (h.x * h.x + h.z * h.z),
                    k * (h.x * h.x + h.y * h.y),
                );
                Mat3::from_diagonal(inertia.recip())
            }
            Shape::Plane => Mat3::ZERO,
        };
        let rot = Mat3::from_quat(self.orientation);
        rot * local * rot.transpose()
    }

    /// Instantaneous change of momentum `impulse` applied at `world_point`.
    pub fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inverse_mass();
        let arm = world_point - self.position;
        self.angular_velocity += self.inverse_inertia() * arm.cross(impulse);
    }

    /// Plane normal and offset (`n · p = d`) for plane bodies.
    fn plane(&self) -> Option<(Vec3, f32)> {
        match self.shape {
            Shape::Plane => {
                let normal = self.orientation * Vec3::Y;
                Some((normal, normal.dot(self.position)))
            }
            Shape::Cuboid { .. } => None,
        }
    }

    fn integrate(&mut self, gravity: Vec3, dt: f32) {
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
        if self.angular_velocity != Vec3::ZERO {
            let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
            self.orientation = (spin * self.orientation).normalize();
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhysicsWorld {
    gravity: Vec3,
    bodies: Vec<RigidBody>,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            steps: 0,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyHandle(i), b))
    }

    /// Advance every dynamic body by `dt`, then push them out of static planes.
    pub fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            body.integrate(gravity, dt);
        }

        let planes: Vec<(Vec3, f32)> = self
            .bodies
            .iter()
            .filter(|b| b.is_static())
            .filter_map(RigidBody::plane)
            .collect();
        let rest_speed = gravity.length() * dt * REST_FRAMES;

        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            for &(normal, offset) in &planes {
                let depth = offset - normal.dot(body.position);
                if depth < 0.0 {
                    continue;
                }
                body.position += normal * depth;

                let vn = body.velocity.dot(normal);
                if vn < 0.0 {
                    let rebound = -vn * body.restitution;
                    let new_vn = if rebound < rest_speed { 0.0 } else { rebound };
                    body.velocity += normal * (new_vn - vn);
                }
            }
        }

        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> RigidBody {
        RigidBody::fixed(Shape::Plane)
    }

    fn domino() -> RigidBody {
        RigidBody::dynamic(1.0, Shape::cuboid(Vec3::new(0.1, 0.5, 0.2)))
    }

    #[test]
    fn gravity_accelerates_dynamic_bodies() {
        let mut world = PhysicsWorld::default();
        let h = world.add_body(domino().with_pose(Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY));
        world.step(FIXED_TIMESTEP);

        let body = world.body(h).unwrap();
        assert!((body.velocity.y - (-1.1 / 60.0)).abs() < 1e-6);
        assert!(body.position.y < 5.0);
        assert_eq!(world.steps(), 1);
    }

    #[test]
    fn static_bodies_do_not_move() {
        let mut world = PhysicsWorld::default();
        let h = world.add_body(floor());
        for _ in 0..10 {
            world.step(FIXED_TIMESTEP);
        }
        assert_eq!(world.body(h).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn plane_contact_stops_at_surface() {
        let mut world = PhysicsWorld::default();
        world.add_body(floor());
        let h = world.add_body(domino().with_pose(Vec3::new(1.0, 0.01, -1.0), Quat::IDENTITY));
        world.body_mut(h).unwrap().velocity = Vec3::new(0.0, -3.0, 0.0);

        world.step(FIXED_TIMESTEP);

        let body = world.body(h).unwrap();
        assert_eq!(body.position.y, 0.0);
        // Zero restitution by default: no bounce.
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn restitution_reflects_normal_velocity() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.add_body(floor());
        let h = world.add_body(
            domino()
                .with_pose(Vec3::new(0.0, 0.05, 0.0), Quat::IDENTITY)
                .with_restitution(0.5),
        );
        world.body_mut(h).unwrap().velocity = Vec3::new(1.0, -6.0, 0.0);

        world.step(FIXED_TIMESTEP);

        let body = world.body(h).unwrap();
        assert!((body.velocity.y - 3.0).abs() < 1e-5);
        assert_eq!(body.velocity.x, 1.0);
    }

    #[test]
    fn impulse_at_centre_adds_no_spin() {
        let mut body = domino().with_pose(Vec3::new(2.0, 5.0, 1.0), Quat::IDENTITY);
        body.apply_impulse(Vec3::new(0.1, 0.05, 0.0), body.position);
        assert_eq!(body.velocity, Vec3::new(0.1, 0.05, 0.0));
        assert_eq!(body.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn off_centre_impulse_spins_the_body() {
        let mut body = domino();
        body.apply_impulse(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.25, 0.0));
        assert!(body.angular_velocity.x > 0.0);

        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let h = world.add_body(body);
        world.step(FIXED_TIMESTEP);
        assert_ne!(world.body(h).unwrap().orientation, Quat::IDENTITY);
    }

    #[test]
    fn static_bodies_ignore_impulses() {
        let mut body = floor();
        body.apply_impulse(Vec3::ONE, Vec3::ZERO);
        assert_eq!(body.velocity, Vec3::ZERO);
    }
}

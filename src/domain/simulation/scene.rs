//! Visual objects and the camera they are drawn against.
//!
//! The scene graph is the authoritative copy of what should be on screen; the
//! presentation systems mirror it into engine meshes after each render.

use bevy::math::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(usize);

impl VisualHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Horizontal rectangle in the XZ plane.
    Plane { width: f32, depth: f32 },
}

impl Geometry {
    pub fn cuboid(size: Vec3) -> Self {
        Geometry::Cuboid {
            width: size.x,
            height: size.y,
            depth: size.z,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Material {
    /// 0xRRGGBB
    pub color: u32,
    pub double_sided: bool,
}

impl Material {
    pub fn solid(color: u32) -> Self {
        Self {
            color,
            double_sided: false,
        }
    }

    pub fn double_sided(color: u32) -> Self {
        Self {
            color,
            double_sided: true,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        let [_, r, g, b] = self.color.to_be_bytes();
        [r, g, b]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualObject {
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
    pub orientation: Quat,
}

impl VisualObject {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn with_pose(mut self, position: Vec3, orientation: Quat) -> Self {
        self.set_pose(position, orientation);
        self
    }

    pub fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        self.position = position;
        self.orientation = orientation;
    }
}

/// Perspective camera description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 1.0, 3.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Objects in front of the camera and inside the far plane.
    pub fn in_range(&self, point: Vec3) -> bool {
        let forward = (self.target - self.position).normalize_or_zero();
        let depth = (point - self.position).dot(forward);
        depth >= self.near && depth <= self.far
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frame: u64,
    pub objects: usize,
    pub in_range: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    objects: Vec<VisualObject>,
    frames: u64,
}

impl SceneGraph {
    pub fn add(&mut self, object: VisualObject) -> VisualHandle {
        self.objects.push(object);
        VisualHandle(self.objects.len() - 1)
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&VisualObject> {
        self.objects.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualObject> {
        self.objects.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualHandle, &VisualObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (VisualHandle(i), o))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Close the current frame. Every object is submitted; the engine culls.
    pub fn render(&mut self, camera: &CameraRig) -> RenderStats {
        self.frames += 1;
        RenderStats {
            frame: self.frames,
            objects: self.objects.len(),
            in_range: self
                .objects
                .iter()
                .filter(|o| camera.in_range(o.position))
                .count(),
        }
    }
}

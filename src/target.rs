//! Pointer-derived world-space target for the chain head.
//!
//! The host's input handler writes normalized device coordinates; once
//! per frame the tracker turns the latest pointer ray into a point on the
//! ribbon plane `z = 0`. Input and update run cooperatively on one
//! thread, so a plain field is all the synchronization needed — the next
//! frame always observes the most recent write, and reusing a stale
//! target is harmless because the follow pass is idempotent.

use crate::camera::Camera;
use crate::EPSILON;
use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    ndc: Vec2,
    world_target: Vec3,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self {
            ndc: Vec2::ZERO,
            world_target: Vec3::ZERO,
        }
    }
}

impl PointerTracker {
    /// Record the latest pointer position, x and y in [-1, 1]
    pub fn set_ndc(&mut self, x: f32, y: f32) {
        self.ndc = Vec2::new(x, y);
    }

    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Intersect the pointer ray with the ribbon plane `z = 0`.
    ///
    /// A ray parallel to the plane, or one pointing away from it, keeps
    /// the previous target instead of producing a wild intersection.
    pub fn world_target(&mut self, camera: &Camera, aspect: f32) -> Vec3 {
        let eye = camera.eye_position();
        let picked = camera.unproject_ndc(self.ndc, aspect);
        let dir = (picked - eye).normalize_or_zero();

        if dir.z.abs() > EPSILON {
            let t = -eye.z / dir.z;
            if t > 0.0 {
                self.world_target = eye + dir * t;
            }
        }

        self.world_target
    }
}

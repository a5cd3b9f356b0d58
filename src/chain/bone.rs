use super::point::SkinPoint;
use glam::Vec3;

/// A rigid ring of mesh vertices sharing one center point; the unit of
/// chain propagation.
///
/// Bones are plain data in an indexed array. Propagation passes the
/// predecessor's center by value (`Vec3` is `Copy`), so no bone ever
/// holds a reference into another.
#[derive(Debug, Clone)]
pub struct Bone {
    /// Current world-space anchor
    pub center: Vec3,
    /// Fixed distance kept from the predecessor bone
    pub segment_length: f32,
    /// Lateral reference axis, derived once from the bone's first two points
    pub axis_dir: Vec3,
    /// Unit vector from the previous bone's center toward this one,
    /// rewritten each propagation step
    pub facing_dir: Vec3,
    /// Surface normal shared by every owned point (flat per-segment shading)
    pub normal: Vec3,
    /// Ring of owned vertices, fixed cardinality, never resized
    pub points: Vec<SkinPoint>,
}

impl Bone {
    /// Build a bone from one grid row. Requires at least two points,
    /// which config validation guarantees (`width_segments >= 1`).
    pub fn new(center: Vec3, segment_length: f32, mut points: Vec<SkinPoint>) -> Self {
        let axis_dir =
            (points[0].world_position - points[1].world_position).normalize_or_zero();
        let facing_dir = Vec3::NEG_Y;

        let mut normal = (-axis_dir).cross(facing_dir).normalize_or_zero();
        if normal.length_squared() < 0.5 {
            normal = Vec3::NEG_Z;
        }
        for point in &mut points {
            point.world_normal = normal;
        }

        Self {
            center,
            segment_length,
            axis_dir,
            facing_dir,
            normal,
            points,
        }
    }

    /// Place the center at the target and refresh every owned point.
    ///
    /// The per-bone normal is `normalize(cross(-axis_dir, facing_dir))`,
    /// assigned uniformly to the ring. A facing direction parallel to the
    /// lateral axis would zero the cross product; the bone then keeps its
    /// previous normal so the buffers never see NaN.
    pub fn set(&mut self, target: Vec3) {
        self.center = target;

        let normal = (-self.axis_dir).cross(self.facing_dir).normalize_or_zero();
        if normal.length_squared() > 0.5 {
            self.normal = normal;
        }

        for point in &mut self.points {
            point.world_position = self.center + point.local_dir * point.local_dist;
            point.world_normal = self.normal;
        }
    }

    /// Derive a new center from the predecessor: keep the current offset
    /// direction but place the center exactly `segment_length` away, then
    /// reposition the ring.
    ///
    /// If this bone's center coincides with the predecessor's the
    /// direction is undefined; the previous frame's `facing_dir` is
    /// reused unchanged.
    pub fn follow(&mut self, prev_center: Vec3) {
        let dir = (self.center - prev_center).normalize_or_zero();
        if dir.length_squared() > 0.5 {
            self.facing_dir = dir;
        }

        let target = prev_center + self.facing_dir * self.segment_length;
        self.set(target);
    }
}

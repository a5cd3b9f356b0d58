use glam::Vec3;

/// A single mesh vertex owned by a bone: a static offset from the bone's
/// center axis plus its current world-space attributes.
///
/// The offset (`local_dir`, `local_dist`) is computed once at build time;
/// `world_position`/`world_normal` are rewritten in place every frame.
#[derive(Debug, Clone, Copy)]
pub struct SkinPoint {
    /// Unit offset direction from the bone center, fixed at build time
    pub local_dir: Vec3,
    /// Distance from the bone center, fixed at build time
    pub local_dist: f32,
    /// Stable slot in the flat position/normal buffers
    pub index: usize,
    /// World position, `center + local_dir * local_dist` after any update
    pub world_position: Vec3,
    /// World normal (unit), shared with the other points of the bone
    pub world_normal: Vec3,
}

impl SkinPoint {
    /// Describe a grid vertex relative to its row's reference center.
    /// A vertex sitting exactly on the center axis keeps a zero offset.
    pub fn new(vertex: Vec3, row_center: Vec3, index: usize) -> Self {
        let offset = vertex - row_center;
        Self {
            local_dir: offset.normalize_or_zero(),
            local_dist: offset.length(),
            index,
            world_position: vertex,
            world_normal: Vec3::NEG_Z,
        }
    }
}

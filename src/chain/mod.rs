//! Bone chain: the ribbon's spine and its follow propagation.
//!
//! The chain is rebuilt only when the configuration changes. Per frame it
//! runs a single head-to-tail cascade from the current target; no state
//! accumulates between frames beyond the bone centers themselves, so the
//! update is idempotent for a repeated target.

pub mod bone;
pub mod point;

pub use bone::Bone;
pub use point::SkinPoint;

use crate::buffers::MeshBuffers;
use crate::geometry::PlaneGrid;
use glam::Vec3;

/// Ordered sequence of bones, head to tail. The head (index 0) is the
/// free end tracking the target; the tail is anchored only by
/// propagation.
#[derive(Debug, Clone)]
pub struct Chain {
    bones: Vec<Bone>,
    vertex_count: usize,
}

impl Chain {
    /// Partition the grid into bones, one ring of points per row.
    ///
    /// Each row's reference center is `(0, y_row, 0)`; point offsets and
    /// the lateral axis are derived from the rest grid once and never
    /// recomputed.
    pub fn build(grid: &PlaneGrid) -> Self {
        let config = grid.config();
        let segment_length = config.segment_length();

        let mut bones = Vec::with_capacity(config.rows());
        for i in 0..config.rows() {
            let row_center = Vec3::new(0.0, grid.vertex(i, 0).y, 0.0);
            let points = (0..config.columns())
                .map(|j| {
                    let index = grid.vertex_index(i, j);
                    SkinPoint::new(grid.vertices()[index], row_center, index)
                })
                .collect();
            bones.push(Bone::new(row_center, segment_length, points));
        }

        Self {
            bones,
            vertex_count: config.vertex_count(),
        }
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Drag the head to the target, then cascade strictly head to tail.
    ///
    /// Bone `i+1` reads bone `i`'s freshly written center, so the pass is
    /// inherently sequential; no parallelism is sound here.
    ///
    /// The head's facing direction points from the target toward its old
    /// center, matching the follower bones' `(center - prev_center)`
    /// orientation so normals stay continuous along the ribbon.
    pub fn follow(&mut self, target: Vec3) {
        let head = &mut self.bones[0];
        let dir = (head.center - target).normalize_or_zero();
        if dir.length_squared() > 0.5 {
            head.facing_dir = dir;
        }
        head.set(target);

        for i in 0..self.bones.len() - 1 {
            let prev_center = self.bones[i].center;
            self.bones[i + 1].follow(prev_center);
        }
    }

    /// Scatter every point's world position and normal into the flat
    /// buffers at its fixed slot (`index * 3`).
    pub fn write_buffers(&self, buffers: &mut MeshBuffers) {
        for bone in &self.bones {
            for point in &bone.points {
                buffers.set(point.index, point.world_position, point.world_normal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RibbonConfig;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOLERANCE: f32 = 1e-4;

    fn build_chain(config: &RibbonConfig) -> Chain {
        let grid = PlaneGrid::new(config).unwrap();
        Chain::build(&grid)
    }

    fn small_config() -> RibbonConfig {
        RibbonConfig {
            width: 2.0,
            height: 4.0,
            width_segments: 2,
            height_segments: 4,
        }
    }

    fn assert_rigid(chain: &Chain) {
        let bones = chain.bones();
        for i in 0..bones.len() - 1 {
            let dist = bones[i].center.distance(bones[i + 1].center);
            assert!(
                (dist - bones[i + 1].segment_length).abs() < TOLERANCE,
                "link {} length {} should be {}",
                i,
                dist,
                bones[i + 1].segment_length
            );
        }
    }

    fn assert_points_placed(chain: &Chain) {
        for bone in chain.bones() {
            for point in &bone.points {
                let expected = bone.center + point.local_dir * point.local_dist;
                assert!(
                    point.world_position.distance(expected) < TOLERANCE,
                    "point {} drifted from its bone offset",
                    point.index
                );
            }
        }
    }

    fn collect(chain: &Chain) -> MeshBuffers {
        let mut buffers = MeshBuffers::new(chain.vertex_count());
        chain.write_buffers(&mut buffers);
        buffers
    }

    #[test]
    fn test_build_partitions_rows() {
        let chain = build_chain(&small_config());
        assert_eq!(chain.bones().len(), 5);
        for bone in chain.bones() {
            assert_eq!(bone.points.len(), 3);
            assert!((bone.segment_length - 1.0).abs() < TOLERANCE);
        }
        assert_eq!(chain.vertex_count(), 15);
    }

    #[test]
    fn test_head_tracks_target_exactly() {
        let mut chain = build_chain(&small_config());
        let target = Vec3::new(0.3, -1.2, 2.5);
        chain.follow(target);
        assert_eq!(chain.bones()[0].center, target);
    }

    #[test]
    fn test_rigidity_after_follow() {
        let mut chain = build_chain(&small_config());
        chain.follow(Vec3::new(1.0, 0.5, -2.0));
        assert_rigid(&chain);
        assert_points_placed(&chain);

        chain.follow(Vec3::new(-3.0, 2.0, 1.0));
        assert_rigid(&chain);
        assert_points_placed(&chain);
    }

    #[test]
    fn test_follow_is_idempotent() {
        let mut chain = build_chain(&small_config());
        let target = Vec3::new(0.7, 0.1, 3.0);

        chain.follow(target);
        let first = collect(&chain);

        chain.follow(target);
        let second = collect(&chain);

        // Bitwise identical: no accumulation, no drift
        assert_eq!(first.positions(), second.positions());
        assert_eq!(first.normals(), second.normals());
    }

    #[test]
    fn test_degenerate_target_holds_shape() {
        let mut chain = build_chain(&small_config());
        chain.follow(Vec3::new(0.5, 1.0, 0.5));

        // Target exactly on the head center: direction is undefined,
        // previous facing must be reused and nothing may go NaN.
        let stuck = chain.bones()[0].center;
        chain.follow(stuck);

        assert_rigid(&chain);
        let buffers = collect(&chain);
        assert!(buffers.is_finite(), "degenerate target leaked NaN/inf");
    }

    #[test]
    fn test_determinism_across_runs() {
        let config = small_config();
        let mut a = build_chain(&config);
        let mut b = build_chain(&config);

        let mut rng = StdRng::seed_from_u64(7);
        let targets: Vec<Vec3> = (0..50)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                )
            })
            .collect();

        for &target in &targets {
            a.follow(target);
        }
        for &target in &targets {
            b.follow(target);
        }

        let buf_a = collect(&a);
        let buf_b = collect(&b);
        assert_eq!(buf_a.positions(), buf_b.positions());
        assert_eq!(buf_a.normals(), buf_b.normals());
    }

    #[test]
    fn test_ribbon_scenario() {
        // width=3, height=30, 5x100 segments: 606 points, links of 0.3
        let config = RibbonConfig {
            width: 3.0,
            height: 30.0,
            width_segments: 5,
            height_segments: 100,
        };
        let mut chain = build_chain(&config);
        assert_eq!(chain.vertex_count(), 606);

        let target = Vec3::new(0.0, 0.0, 15.0);
        chain.follow(target);

        assert_eq!(chain.bones()[0].center, target);

        let bones = chain.bones();
        let mut path_length = 0.0;
        for i in 0..bones.len() - 1 {
            let dist = bones[i].center.distance(bones[i + 1].center);
            assert!(
                (dist - 0.3).abs() < TOLERANCE,
                "link {} is {} long, expected 0.3",
                i,
                dist
            );
            path_length += dist;
        }
        assert!(
            (path_length - 30.0).abs() < 1e-3,
            "cumulative path {} should be the ribbon height",
            path_length
        );
    }

    #[test]
    fn test_straight_pull_converges_to_line() {
        let mut chain = build_chain(&small_config());

        // Constant-velocity target along +X; the chain must catch up and
        // straighten while normals stay unit length every frame.
        let velocity = Vec3::new(1.0, 0.0, 0.0);
        let mut target = Vec3::ZERO;
        for _ in 0..200 {
            target += velocity;
            chain.follow(target);

            for bone in chain.bones() {
                assert!(
                    (bone.normal.length() - 1.0).abs() < 1e-3,
                    "normal lost unit length mid-pull"
                );
            }
        }

        assert_rigid(&chain);

        // All centers collinear with the pull direction
        let head = chain.bones()[0].center;
        for bone in chain.bones() {
            let offset = bone.center - head;
            let perp = offset - velocity * offset.dot(velocity);
            assert!(
                perp.length() < 1e-2,
                "bone at {:?} is off the pull line by {}",
                bone.center,
                perp.length()
            );
        }
    }

    #[test]
    fn test_buffers_stay_finite_under_churn() {
        let mut chain = build_chain(&small_config());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let target = Vec3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            );
            chain.follow(target);
        }

        let buffers = collect(&chain);
        assert!(buffers.is_finite());
        for bone in chain.bones() {
            assert!(
                (bone.facing_dir.length() - 1.0).abs() < 1e-3,
                "facing direction must stay unit length"
            );
        }
    }

    #[test]
    fn test_initial_state_before_tracking() {
        // Uninitialized chain: centers hold the build-time grid rows
        let chain = build_chain(&small_config());
        assert_eq!(chain.bones()[0].center, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(chain.bones()[4].center, Vec3::new(0.0, -2.0, 0.0));

        let buffers = collect(&chain);
        assert!(buffers.is_finite());
    }
}

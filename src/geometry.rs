//! Flat-plane grid geometry for the ribbon mesh.
//!
//! The vertex grid and triangle topology are built exactly once; after
//! construction only vertex attribute contents change (see the chain
//! module), which lets the renderer keep its GPU allocations and index
//! buffer for the lifetime of the visualization.

use crate::config::{ConfigError, RibbonConfig};
use glam::Vec3;

/// Row-major vertex grid in the X–Y plane, centered at the origin.
///
/// Row 0 sits at `+height/2` and rows descend to `-height/2`; columns run
/// from `-width/2` to `+width/2`. All vertices start at `z = 0`.
#[derive(Debug, Clone)]
pub struct PlaneGrid {
    config: RibbonConfig,
    vertices: Vec<Vec3>,
}

impl PlaneGrid {
    /// Generate the grid. Validation runs first: nothing is allocated for
    /// a config with non-positive dimensions or segment counts.
    pub fn new(config: &RibbonConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let cols = config.columns();
        let rows = config.rows();
        let step_x = config.width / config.width_segments as f32;
        let step_y = config.height / config.height_segments as f32;
        let half_width = config.width / 2.0;
        let half_height = config.height / 2.0;

        let mut vertices = Vec::with_capacity(cols * rows);
        for i in 0..rows {
            let y = half_height - i as f32 * step_y;
            for j in 0..cols {
                let x = j as f32 * step_x - half_width;
                vertices.push(Vec3::new(x, y, 0.0));
            }
        }

        Ok(Self {
            config: *config,
            vertices,
        })
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    /// All grid vertices, row-major
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Flat buffer slot for a grid position
    #[inline]
    pub fn vertex_index(&self, row: usize, col: usize) -> usize {
        row * self.config.columns() + col
    }

    #[inline]
    pub fn vertex(&self, row: usize, col: usize) -> Vec3 {
        self.vertices[self.vertex_index(row, col)]
    }

    /// Triangle index buffer: two counter-clockwise triangles per grid
    /// cell. Owned by the renderer after construction and never rebuilt.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let cols = self.config.columns() as u32;
        let mut indices =
            Vec::with_capacity(self.config.width_segments as usize * self.config.height_segments as usize * 6);

        for i in 0..self.config.height_segments {
            for j in 0..self.config.width_segments {
                let a = j + cols * i;
                let b = j + cols * (i + 1);
                let c = (j + 1) + cols * (i + 1);
                let d = (j + 1) + cols * i;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        indices
    }
}

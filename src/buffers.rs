//! Flat vertex attribute buffers shared with the renderer.
//!
//! Buffer length is fixed at build time from the mesh topology; per frame
//! only the contents change. The renderer keeps its GPU allocations and
//! re-uploads data in place (a dynamic buffer update, not a reallocation).

use glam::Vec3;
use static_assertions::const_assert_eq;

/// Position and normal arrays, three floats per vertex, slots matching the
/// grid's flat indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
}

impl MeshBuffers {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            positions: vec![0.0; vertex_count * 3],
            normals: vec![0.0; vertex_count * 3],
        }
    }

    /// Write one vertex's attributes at its fixed slot
    #[inline]
    pub fn set(&mut self, index: usize, position: Vec3, normal: Vec3) {
        let base = index * 3;
        self.positions[base..base + 3].copy_from_slice(&position.to_array());
        self.normals[base..base + 3].copy_from_slice(&normal.to_array());
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// True when no NaN or infinity has reached the buffers. Output that
    /// fails this is a defect in the follow pipeline, not a runtime error.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|v| v.is_finite())
            && self.normals.iter().all(|v| v.is_finite())
    }

    /// Interleave into the GPU vertex format, for hosts that bind a
    /// single vertex buffer instead of two attribute streams.
    pub fn interleaved(&self) -> Vec<RibbonVertex> {
        (0..self.vertex_count())
            .map(|i| {
                let base = i * 3;
                RibbonVertex {
                    position: [
                        self.positions[base],
                        self.positions[base + 1],
                        self.positions[base + 2],
                    ],
                    normal: [
                        self.normals[base],
                        self.normals[base + 1],
                        self.normals[base + 2],
                    ],
                }
            })
            .collect()
    }
}

/// Vertex format for the ribbon mesh
///
/// Matches the attribute layout the renderer declares: position at
/// location 0, normal at location 1, tightly packed.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RibbonVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

const_assert_eq!(std::mem::size_of::<RibbonVertex>(), 24);

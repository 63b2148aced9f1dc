#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Turns the voxels found by ray queries into a triangle mesh that's ready to upload to the GPU.
//!
//! Every voxel becomes a unit cube centered on its position, with 36 unshared vertices (6 faces of 2 triangles each),
//! all carrying the voxel's color:
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_mesh::VoxelCubeMesh;
//! use voxtrace_storage::{VoxelRecord, VoxelSet};
//!
//! let mut voxels = VoxelSet::default();
//! voxels.insert(VoxelRecord::new(PointN([3.0, 3.0, 3.0]), PointN([1.0, 0.0, 0.0])));
//!
//! let mut mesh = VoxelCubeMesh::default();
//! mesh.rebuild(voxels.iter());
//!
//! assert_eq!(mesh.voxel_count(), 1);
//! assert_eq!(mesh.positions.len(), 36);
//! assert_eq!(mesh.positions_bytes().len(), 36 * 12);
//! ```

use voxtrace_core::prelude::*;
use voxtrace_storage::VoxelRecord;

use std::convert::TryInto;

/// Number of vertices (and indices) in the mesh of one voxel.
pub const CUBE_VERTEX_COUNT: usize = 36;

const HALF_SIZE: f32 = 0.5;

// Corners of the cube, as signs of the offset from its center.
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

// Two triangles per face, as indices into `CUBE_CORNERS`.
const CUBE_TRIANGLES: [usize; CUBE_VERTEX_COUNT] = [
    0, 1, 2, 2, 3, 0, // -Z
    1, 5, 6, 6, 2, 1, // +X
    5, 4, 7, 7, 6, 5, // +Z
    4, 0, 3, 3, 7, 4, // -X
    3, 2, 6, 6, 7, 3, // +Y
    4, 5, 1, 1, 0, 4, // -Y
];

#[derive(Clone, Debug, Default)]
pub struct VoxelCubeMesh {
    pub positions: Vec<[f32; 3]>,
    /// One color per vertex.
    pub colors: Vec<[f32; 3]>,
    /// All of the triangles in the mesh. No vertex is shared by two triangles.
    pub indices: Vec<u32>,
}

impl VoxelCubeMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
    }

    pub fn voxel_count(&self) -> usize {
        self.positions.len() / CUBE_VERTEX_COUNT
    }

    /// Replaces the contents of the mesh with one cube per voxel.
    pub fn rebuild<'a>(&mut self, voxels: impl IntoIterator<Item = &'a VoxelRecord>) {
        self.clear();
        for voxel in voxels {
            self.push_voxel(voxel);
        }

        tracing::debug!(
            "rebuilt mesh for {} voxels with {} vertices",
            self.voxel_count(),
            self.positions.len()
        );
    }

    /// Adds the cube for one voxel.
    ///
    /// # Panics
    ///
    /// If the mesh would have more than `u32::MAX` vertices.
    pub fn push_voxel(&mut self, voxel: &VoxelRecord) {
        let first: u32 = self.positions.len().try_into().unwrap();
        let color = voxel.color.0;

        for (i, &corner) in CUBE_TRIANGLES.iter().enumerate() {
            let offset = PointN(CUBE_CORNERS[corner]) * HALF_SIZE;
            self.positions.push((voxel.position + offset).0);
            self.colors.push(color);
            self.indices.push(first + i as u32);
        }
    }

    /// Moves all of `other`'s triangles into `self`, leaving `other` empty.
    ///
    /// # Panics
    ///
    /// If the mesh would have more than `u32::MAX` vertices.
    pub fn append(&mut self, other: &mut Self) {
        let n: u32 = self.positions.len().try_into().unwrap();

        self.positions.append(&mut other.positions);
        self.colors.append(&mut other.colors);

        self.indices.extend(other.indices.drain(..).map(|i| n + i));
    }

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl<'a> std::iter::FromIterator<&'a VoxelRecord> for VoxelCubeMesh {
    fn from_iter<I: IntoIterator<Item = &'a VoxelRecord>>(iter: I) -> Self {
        let mut mesh = Self::default();
        mesh.rebuild(iter);

        mesh
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    use voxtrace_storage::VoxelSet;

    use pretty_assertions::assert_eq;
    use utilities::data_sets::diagonal_grid;

    fn record(p: [f32; 3], color: [f32; 3]) -> VoxelRecord {
        VoxelRecord::new(PointN(p), PointN(color))
    }

    #[test]
    fn one_voxel_makes_one_cube() {
        let voxel = record([3.0, 3.0, 3.0], [1.0, 0.5, 0.0]);
        let mesh: VoxelCubeMesh = std::iter::once(&voxel).collect();

        assert_eq!(mesh.voxel_count(), 1);
        assert_eq!(mesh.positions.len(), CUBE_VERTEX_COUNT);
        assert_eq!(mesh.colors, vec![[1.0, 0.5, 0.0]; CUBE_VERTEX_COUNT]);
        assert_eq!(mesh.indices, (0..CUBE_VERTEX_COUNT as u32).collect::<Vec<_>>());

        // The first triangle is on the -Z face.
        assert_eq!(mesh.positions[0], [2.5, 2.5, 2.5]);
        assert_eq!(mesh.positions[1], [3.5, 2.5, 2.5]);
        assert_eq!(mesh.positions[2], [3.5, 3.5, 2.5]);

        for p in mesh.positions.iter() {
            for c in p.iter() {
                assert!(*c == 2.5 || *c == 3.5);
            }
        }
    }

    #[test]
    fn every_face_is_covered_twice() {
        let voxel = record([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let mesh: VoxelCubeMesh = std::iter::once(&voxel).collect();

        // Each face's 6 vertices all lie on that face's plane.
        for face in mesh.positions.chunks(6) {
            let on_one_plane = (0..3).any(|axis| {
                let value = face[0][axis];
                value.abs() == HALF_SIZE && face.iter().all(|p| p[axis] == value)
            });
            assert!(on_one_plane, "{:?}", face);
        }
    }

    #[test]
    fn rebuild_replaces_contents() {
        let grid = diagonal_grid::<4>();
        let voxels: VoxelSet = grid.collect_voxels();

        let mut mesh = VoxelCubeMesh::default();
        mesh.rebuild(voxels.iter());
        assert_eq!(mesh.voxel_count(), 4);

        mesh.rebuild(voxels.iter().take(1));
        assert_eq!(mesh.voxel_count(), 1);
        assert_eq!(mesh.indices.len(), CUBE_VERTEX_COUNT);

        mesh.clear();
        assert!(mesh.is_empty());
        mesh.rebuild(std::iter::empty());
        assert!(mesh.is_empty());
    }

    #[test]
    fn append_offsets_indices() {
        let a = record([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = record([5.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let mut mesh: VoxelCubeMesh = std::iter::once(&a).collect();
        let mut other: VoxelCubeMesh = std::iter::once(&b).collect();

        mesh.append(&mut other);

        assert!(other.is_empty());
        assert_eq!(mesh.voxel_count(), 2);
        assert_eq!(mesh.indices, (0..2 * CUBE_VERTEX_COUNT as u32).collect::<Vec<_>>());
        assert_eq!(mesh.colors[CUBE_VERTEX_COUNT], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn byte_views_match_lengths() {
        let voxel = record([1.0, 2.0, 3.0], [0.2, 0.4, 0.6]);
        let mesh: VoxelCubeMesh = std::iter::once(&voxel).collect();

        assert_eq!(mesh.positions_bytes().len(), CUBE_VERTEX_COUNT * 3 * 4);
        assert_eq!(mesh.colors_bytes().len(), CUBE_VERTEX_COUNT * 3 * 4);
        assert_eq!(mesh.indices_bytes().len(), CUBE_VERTEX_COUNT * 4);
        assert_eq!(&mesh.indices_bytes()[4..8], &1u32.to_ne_bytes());
    }
}

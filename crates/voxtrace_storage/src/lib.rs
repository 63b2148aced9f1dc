//! Storage for voxels, in two complementary layouts:
//!   - `VoxelGrid`: a dense, fixed-capacity grid of optional voxels for one chunk
//!   - `Svo`: a sparse voxel octree, stored as an arena of nodes
//!
//! Ray queries over either layout produce `VoxelRecord`s, which are collected into a `VoxelSet` for the renderer.

pub mod grid;
pub mod svo;
pub mod voxel;

pub use grid::*;
pub use svo::*;
pub use voxel::*;

// Hash types to use for small keys like `VoxelRecord` and `NodeId`.
pub type SmallKeyHashSet<T> = std::collections::HashSet<T, SmallKeyBuildHasher>;
pub type SmallKeyHashMap<K, V> = std::collections::HashMap<K, V, SmallKeyBuildHasher>;
pub type SmallKeyBuildHasher = ahash::RandomState;

pub mod prelude {
    pub use super::{
        GridConfig, GridError, NodeId, Svo, SvoConfig, SvoError, SvoNode, SvoVisitor,
        VisitStatus, Voxel, VoxelGrid, VoxelRecord, VoxelSet,
    };
}

//! Voxel storage and ray queries on 3D lattices.
//!
//! This library is organized into several crates. The most fundamental are:
//! - **core**: lattice points, extents, axes, and rays
//! - **storage**: a dense `VoxelGrid` addressed by local cell coordinates, and a sparse voxel octree (`Svo`)
//!
//! Then you get extra bits of functionality from the others:
//! - **search**: ray traversal through voxel grids (Amanatides-Woo), ray marching through octrees, and sphere tracing against voxel boxes
//! - **mesh**: cube meshes for rendering the voxels found by a search
//!
//! A typical query traces a ray through a grid until it hits an occupied voxel:
//!
//! ```
//! use voxtrace::prelude::*;
//!
//! let mut grid = VoxelGrid::<8, 8, 8>::new(GridConfig::default()).unwrap();
//! grid.set_voxel_at(PointN([3.0, 3.0, 3.0]), Point3f::ONES).unwrap();
//!
//! let ray = Ray::new(PointN([3.0, 3.0, 0.0]), PointN([0.0, 0.0, 1.0]));
//! let hit = trace_ray(&ray, &grid, Point3f::ONES, Point3f::ONES, ray.origin()).unwrap();
//! assert_eq!(hit.map(|r| r.position), Some(PointN([3.0, 3.0, 3.0])));
//! ```

pub use voxtrace_core as core;
pub use voxtrace_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;

    #[cfg(feature = "search")]
    pub use super::search::prelude::*;
}

#[cfg(feature = "mesh")]
pub use voxtrace_mesh as mesh;

#[cfg(feature = "search")]
pub use voxtrace_search as search;

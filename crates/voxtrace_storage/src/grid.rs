//! A dense, fixed-capacity grid of optional voxels for a single chunk.
//!
//! The dimensions `X`, `Y`, and `Z` are part of the type, so the capacity of a grid can never change after
//! construction. Voxels are addressed by grid-local integer coordinates in `[0, X) x [0, Y) x [0, Z)`, and every access
//! is bounds-checked per axis:
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut grid = VoxelGrid::<16, 16, 16>::new(GridConfig::default()).unwrap();
//! grid.set_voxel_at(PointN([3.0, 3.0, 3.0]), Point3f::ZERO).unwrap();
//!
//! assert!(grid.get_voxel_at(3, 3, 3).is_some());
//! assert!(grid.get_voxel_at(4, 3, 3).is_none());
//!
//! // Out of range writes are reported, not performed.
//! assert!(grid.set_voxel_at(PointN([16.0, 0.0, 0.0]), Point3f::ZERO).is_err());
//! // Out of range reads are just empty.
//! assert!(grid.get_voxel_at(-1, 0, 0).is_none());
//! ```
//!
//! The grid's bounds (`get_min_bound`, `get_max_bound`) are in grid-local space. Use `local_to_world` and `world_to_local`
//! to move between the grid and the world, which apply the chunk `position` and cell `size`.

use crate::{VoxelRecord, VoxelSet};

use voxtrace_core::prelude::*;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GridError {
    #[error("voxel position {position:?} is outside of the grid extent {extent:?}")]
    OutOfBounds { position: Point3f, extent: Extent3i },
    #[error("voxel position {position:?} is not on the integer lattice")]
    NotIntegral { position: Point3f },
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Construction-time parameters of a `VoxelGrid`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct GridConfig {
    /// The chunk origin in world space.
    pub position: Point3f,
    /// The world-space size of one cell.
    pub size: Point3f,
    /// Number of voxels per axis, as reported to callers.
    pub amount: Point3f,
    /// The lattice pitch used when stepping rays through the grid.
    pub grid_size: Point3f,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            position: Point3f::ZERO,
            size: Point3f::ONES,
            amount: Point3f::ONES,
            grid_size: Point3f::ONES,
        }
    }
}

impl GridConfig {
    pub fn with_position(mut self, position: Point3f) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Point3f) -> Self {
        self.size = size;
        self
    }

    pub fn with_amount(mut self, amount: Point3f) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_grid_size(mut self, grid_size: Point3f) -> Self {
        self.grid_size = grid_size;
        self
    }

    fn validate(&self) -> Result<(), GridError> {
        if !self.position.is_finite() || !self.amount.is_finite() {
            return Err(GridError::InvalidConfig(
                "position and amount must be finite",
            ));
        }
        if !is_positive_finite(self.size) {
            return Err(GridError::InvalidConfig(
                "cell size must be positive and finite",
            ));
        }
        if !is_positive_finite(self.grid_size) {
            return Err(GridError::InvalidConfig(
                "grid size must be positive and finite",
            ));
        }

        Ok(())
    }
}

fn is_positive_finite(p: Point3f) -> bool {
    p.is_finite() && p.min_component() > 0.0
}

/// A dense `X * Y * Z` grid of optional `VoxelRecord`s.
#[derive(Clone, Debug)]
pub struct VoxelGrid<const X: usize, const Y: usize, const Z: usize> {
    position: Point3f,
    size: Point3f,
    amount: Point3f,
    grid_size: Point3f,
    min_bound: Point3f,
    max_bound: Point3f,
    voxels: Box<[Option<VoxelRecord>]>,
}

impl<const X: usize, const Y: usize, const Z: usize> VoxelGrid<X, Y, Z> {
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        if X == 0 || Y == 0 || Z == 0 {
            return Err(GridError::InvalidConfig("grid dimensions must be nonzero"));
        }
        if X > i32::MAX as usize || Y > i32::MAX as usize || Z > i32::MAX as usize {
            return Err(GridError::InvalidConfig(
                "grid dimensions must fit in an i32",
            ));
        }
        let capacity = X
            .checked_mul(Y)
            .and_then(|xy| xy.checked_mul(Z))
            .ok_or(GridError::InvalidConfig("grid capacity overflows usize"))?;
        config.validate()?;

        tracing::debug!(
            "creating {}x{}x{} voxel grid at {:?}",
            X,
            Y,
            Z,
            config.position
        );

        Ok(Self {
            position: config.position,
            size: config.size,
            amount: config.amount,
            grid_size: config.grid_size,
            min_bound: Point3f::ZERO,
            max_bound: PointN([X as f32, Y as f32, Z as f32]),
            voxels: vec![None; capacity].into_boxed_slice(),
        })
    }

    /// The dimensions `(X, Y, Z)` as a point.
    #[inline]
    pub fn dimensions(&self) -> Point3i {
        PointN([X as i32, Y as i32, Z as i32])
    }

    /// The grid-local extent of valid coordinates.
    #[inline]
    pub fn extent(&self) -> Extent3i {
        Extent3i::from_shape(self.dimensions())
    }

    /// The number of cells, `X * Y * Z`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn get_size(&self) -> Point3f {
        self.size
    }

    #[inline]
    pub fn get_amount(&self) -> Point3f {
        self.amount
    }

    #[inline]
    pub fn get_grid_size(&self) -> Point3f {
        self.grid_size
    }

    #[inline]
    pub fn get_chunk_position(&self) -> Point3f {
        self.position
    }

    #[inline]
    pub fn get_max_bound(&self) -> Point3f {
        self.max_bound
    }

    #[inline]
    pub fn get_min_bound(&self) -> Point3f {
        self.min_bound
    }

    /// `(max_bound, min_bound)`, in that order.
    #[inline]
    pub fn get_bounds(&self) -> (Point3f, Point3f) {
        (self.max_bound, self.min_bound)
    }

    /// The linear index of `(lx, ly, lz)`, or `None` if any coordinate is out of range.
    #[inline]
    pub fn linear_index(&self, lx: i32, ly: i32, lz: i32) -> Option<usize> {
        if !self.extent().contains(PointN([lx, ly, lz])) {
            return None;
        }
        let (lx, ly, lz) = (lx as usize, ly as usize, lz as usize);

        Some(lx + X * (ly + Y * lz))
    }

    /// The voxel at grid-local `(lx, ly, lz)`. Coordinates outside of the grid are simply empty.
    #[inline]
    pub fn get_voxel_at(&self, lx: i32, ly: i32, lz: i32) -> Option<VoxelRecord> {
        self.linear_index(lx, ly, lz).and_then(|i| self.voxels[i])
    }

    #[inline]
    pub fn get_voxel(&self, p: Point3i) -> Option<VoxelRecord> {
        self.get_voxel_at(p.x(), p.y(), p.z())
    }

    /// Writes a voxel at the grid-local `position`, which must be an integer point inside the grid. Any chunk offset must
    /// already be subtracted (see `world_to_local`).
    pub fn set_voxel_at(&mut self, position: Point3f, color: Point3f) -> Result<(), GridError> {
        let index = self.checked_index(position).map_err(|e| {
            tracing::warn!("rejected voxel write: {}", e);
            e
        })?;
        tracing::debug!("setting voxel at {:?}", position);
        self.voxels[index] = Some(VoxelRecord::new(position, color));

        Ok(())
    }

    /// Removes the voxel at grid-local `(lx, ly, lz)`, returning it if the cell was occupied.
    pub fn clear_voxel_at(
        &mut self,
        lx: i32,
        ly: i32,
        lz: i32,
    ) -> Result<Option<VoxelRecord>, GridError> {
        let index = self
            .linear_index(lx, ly, lz)
            .ok_or_else(|| GridError::OutOfBounds {
                position: Point3f::from(PointN([lx, ly, lz])),
                extent: self.extent(),
            })?;

        Ok(self.voxels[index].take())
    }

    fn checked_index(&self, position: Point3f) -> Result<usize, GridError> {
        if !position.is_integral() {
            return Err(GridError::NotIntegral { position });
        }
        // Integral and finite, but it may still be too large for an i32. Anything that large is out of bounds anyway.
        if position.abs().max_component() > i32::MAX as f32 {
            return Err(self.out_of_bounds(position));
        }
        let p = position.as_3i();

        self.linear_index(p.x(), p.y(), p.z())
            .ok_or_else(|| self.out_of_bounds(position))
    }

    fn out_of_bounds(&self, position: Point3f) -> GridError {
        GridError::OutOfBounds {
            position,
            extent: self.extent(),
        }
    }

    /// The number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_some()).count()
    }

    /// Every occupied cell, in linear index order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = &VoxelRecord> {
        self.voxels.iter().filter_map(|v| v.as_ref())
    }

    /// The set of occupied voxels, which is what a render buffer mirrors.
    pub fn collect_voxels(&self) -> VoxelSet {
        self.iter_occupied().copied().collect()
    }

    /// Maps a world-space point into (continuous) grid-local coordinates.
    #[inline]
    pub fn world_to_local(&self, world: Point3f) -> Point3f {
        (world - self.position) / self.size
    }

    /// Maps (continuous) grid-local coordinates into world space.
    #[inline]
    pub fn local_to_world(&self, local: Point3f) -> Point3f {
        self.position + local * self.size
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

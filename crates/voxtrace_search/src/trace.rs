//! Tracing rays through a dense `VoxelGrid` until they hit an occupied voxel.
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_search::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut grid = VoxelGrid::<16, 16, 16>::new(GridConfig::default()).unwrap();
//! grid.set_voxel_at(PointN([3.0, 3.0, 3.0]), Point3f::ZERO).unwrap();
//!
//! let ray = Ray::new(Point3f::ZERO, Point3f::ONES).normalized().unwrap();
//! let hit = trace_ray(&ray, &grid, Point3f::ONES, Point3f::ONES, ray.origin()).unwrap();
//!
//! assert_eq!(hit.map(|r| r.position), Some(PointN([3.0, 3.0, 3.0])));
//! ```

use crate::GridRayTraversal3;

use voxtrace_core::prelude::*;
use voxtrace_storage::{VoxelGrid, VoxelRecord, VoxelSet};

use thiserror::Error;

/// How far a single ray may travel, on any axis, before it's abandoned.
pub const DEFAULT_VIEW_DISTANCE: f32 = 50.0;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum TraceError {
    #[error(transparent)]
    Ray(#[from] RayError),
    #[error("deltas must be positive and finite, got {0:?}")]
    InvalidDeltas(Point3f),
    #[error("steps must be positive whole numbers, got {0:?}")]
    InvalidSteps(Point3f),
    #[error("view distance must be positive, got {0}")]
    InvalidViewDistance(f32),
    #[error("start position must be finite, got {0:?}")]
    NonFiniteStart(Point3f),
    #[error("invalid sphere trace configuration: {0}")]
    InvalidMarchConfig(&'static str),
}

/// Parameters of a grid traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// The lattice pitch on each axis.
    pub deltas: Point3f,
    /// The number of voxels advanced per step on each axis.
    pub steps: Point3f,
    /// The traversal gives up once it's this far from the start on any axis.
    pub view_distance: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            deltas: Point3f::ONES,
            steps: Point3f::ONES,
            view_distance: DEFAULT_VIEW_DISTANCE,
        }
    }
}

impl TraceConfig {
    pub fn with_deltas(mut self, deltas: Point3f) -> Self {
        self.deltas = deltas;
        self
    }

    pub fn with_steps(mut self, steps: Point3f) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_view_distance(mut self, view_distance: f32) -> Self {
        self.view_distance = view_distance;
        self
    }

    /// Checks the config and returns the steps as integers.
    pub fn validate(&self) -> Result<Point3i, TraceError> {
        if !(self.deltas.is_finite() && self.deltas.min_component() > 0.0) {
            return Err(TraceError::InvalidDeltas(self.deltas));
        }
        if !(self.steps.is_integral()
            && self.steps.min_component() >= 1.0
            && self.steps.max_component() <= i32::MAX as f32)
        {
            return Err(TraceError::InvalidSteps(self.steps));
        }
        if !(self.view_distance > 0.0) {
            return Err(TraceError::InvalidViewDistance(self.view_distance));
        }

        Ok(self.steps.as_3i())
    }
}

/// Steps `ray` through `grid` from `start_position` (grid-local) and returns the first occupied voxel, with the default
/// view distance.
pub fn trace_ray<const X: usize, const Y: usize, const Z: usize>(
    ray: &Ray,
    grid: &VoxelGrid<X, Y, Z>,
    deltas: Point3f,
    steps: Point3f,
    start_position: Point3f,
) -> Result<Option<VoxelRecord>, TraceError> {
    let config = TraceConfig::default()
        .with_deltas(deltas)
        .with_steps(steps);

    trace_ray_with(ray, grid, &config, start_position)
}

/// Like `trace_ray`, with every traversal parameter given by `config`.
///
/// Returns `Ok(None)` when the ray leaves the grid for good or travels `config.view_distance` on any axis without
/// hitting anything.
pub fn trace_ray_with<const X: usize, const Y: usize, const Z: usize>(
    ray: &Ray,
    grid: &VoxelGrid<X, Y, Z>,
    config: &TraceConfig,
    start_position: Point3f,
) -> Result<Option<VoxelRecord>, TraceError> {
    ray.validate()?;
    let steps = config.validate()?;
    if !start_position.is_finite() {
        return Err(TraceError::NonFiniteStart(start_position));
    }

    let local_start = start_position - grid.get_min_bound();
    let mut traversal = GridRayTraversal3::new(local_start, ray.direction(), config.deltas, steps);
    let start_voxel = traversal.current_voxel();
    let dimensions = grid.dimensions();

    loop {
        let voxel = traversal.current_voxel();
        tracing::trace!("visiting {:?}", voxel);

        if let Some(record) = grid.get_voxel(voxel) {
            return Ok(Some(record));
        }

        let travelled = Point3f::from((voxel - start_voxel).abs()) * config.deltas;
        if travelled.max_component() >= config.view_distance {
            tracing::debug!(
                "abandoned ray from {:?} after travelling {:?}",
                start_position,
                travelled
            );
            return Ok(None);
        }

        if is_leaving_forever(voxel, traversal.step_vector(), dimensions) {
            return Ok(None);
        }

        traversal.step();
    }
}

// True iff `voxel` is outside of the grid on some axis where the ray can never come back.
fn is_leaving_forever(voxel: Point3i, step: Point3i, dimensions: Point3i) -> bool {
    Axis3::ALL.iter().any(|&axis| {
        let v = voxel.axis_component(axis);
        let s = step.axis_component(axis);
        let d = dimensions.axis_component(axis);

        (v < 0 && s <= 0) || (v >= d && s >= 0)
    })
}

/// Traces every ray from its own origin (grid-local) and collects the hits. Rays that hit the same voxel produce one
/// record.
pub fn cast_rays<'a, const X: usize, const Y: usize, const Z: usize>(
    rays: impl IntoIterator<Item = &'a Ray>,
    grid: &VoxelGrid<X, Y, Z>,
    config: &TraceConfig,
) -> Result<VoxelSet, TraceError> {
    let mut hits = VoxelSet::default();
    for ray in rays {
        if let Some(record) = trace_ray_with(ray, grid, config, ray.origin())? {
            hits.insert(record);
        }
    }

    Ok(hits)
}

/// Casts one ray along `direction` from the center of every voxel in `grid`, and collects the hits.
pub fn sweep_grid<const X: usize, const Y: usize, const Z: usize>(
    grid: &VoxelGrid<X, Y, Z>,
    direction: Point3f,
    config: &TraceConfig,
) -> Result<VoxelSet, TraceError> {
    let rays: Vec<Ray> = grid
        .extent()
        .iter_points()
        .map(|p| Ray::new(Point3f::from(p), direction))
        .collect();
    tracing::debug!("sweeping grid with {} rays along {:?}", rays.len(), direction);

    cast_rays(rays.iter(), grid, config)
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

    use voxtrace_storage::GridConfig;

    use pretty_assertions::assert_eq;
    use utilities::data_sets::{diagonal_grid, sphere_grid};

    type Grid16 = VoxelGrid<16, 16, 16>;

    fn grid_with(voxels: &[Point3f]) -> Grid16 {
        let mut grid = Grid16::new(GridConfig::default()).unwrap();
        for p in voxels {
            grid.set_voxel_at(*p, Point3f::ZERO).unwrap();
        }

        grid
    }

    #[test]
    fn diagonal_ray_hits_single_voxel() {
        let grid = grid_with(&[PointN([3.0, 3.0, 3.0])]);
        let ray = Ray::new(Point3f::ZERO, Point3f::ONES).normalized().unwrap();

        let hit = trace_ray(&ray, &grid, Point3f::ONES, Point3f::ONES, ray.origin()).unwrap();

        assert_eq!(
            hit,
            Some(VoxelRecord::new(PointN([3.0, 3.0, 3.0]), Point3f::ZERO))
        );
        assert_eq!(hit.unwrap().color, Point3f::ZERO);
    }

    #[test]
    fn axis_ray_hits_only_the_occupied_voxel() {
        let target: Point3f = PointN([9.0, 4.0, 2.0]);
        let grid = grid_with(&[target, PointN([9.0, 5.0, 2.0]), PointN([12.0, 4.0, 3.0])]);
        let ray = Ray::new(PointN([0.0, 4.0, 2.0]), PointN([1.0, 0.0, 0.0]));

        let hit = trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()).unwrap();

        assert_eq!(hit.map(|r| r.position), Some(target));
    }

    #[test]
    fn negative_axis_ray_hits_nearest_voxel() {
        let grid = grid_with(&[PointN([2.0, 7.0, 7.0]), PointN([5.0, 7.0, 7.0])]);
        let ray = Ray::new(PointN([15.0, 7.0, 7.0]), PointN([-1.0, 0.0, 0.0]));

        let hit = trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()).unwrap();

        assert_eq!(hit.map(|r| r.position), Some(PointN([5.0, 7.0, 7.0])));
    }

    #[test]
    fn start_voxel_counts() {
        let grid = grid_with(&[PointN([1.0, 1.0, 1.0])]);
        let ray = Ray::new(PointN([1.0, 1.0, 1.0]), PointN([0.0, 1.0, 0.0]));

        let hit = trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()).unwrap();

        assert!(hit.is_some());
    }

    #[test]
    fn ray_entering_from_outside_the_grid() {
        let grid = grid_with(&[PointN([0.0, 8.0, 8.0])]);
        let ray = Ray::new(PointN([-10.0, 8.0, 8.0]), PointN([1.0, 0.0, 0.0]));

        let hit = trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()).unwrap();

        assert_eq!(hit.map(|r| r.position), Some(PointN([0.0, 8.0, 8.0])));
    }

    #[test]
    fn miss_in_empty_grid() {
        let grid = grid_with(&[]);
        let ray = Ray::new(PointN([8.0, 8.0, 8.0]), PointN([0.3, -0.2, 1.0]));

        assert_eq!(
            trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()),
            Ok(None)
        );
    }

    #[test]
    fn ray_moving_away_from_grid_misses() {
        let grid = grid_with(&[PointN([8.0, 8.0, 8.0])]);
        let ray = Ray::new(PointN([-5.0, 8.0, 8.0]), PointN([-1.0, 0.0, 0.0]));

        assert_eq!(
            trace_ray_with(&ray, &grid, &TraceConfig::default(), ray.origin()),
            Ok(None)
        );
    }

    #[test]
    fn view_distance_bounds_the_search() {
        let grid = grid_with(&[PointN([12.0, 0.0, 0.0])]);
        let ray = Ray::new(Point3f::ZERO, PointN([1.0, 0.0, 0.0]));

        let near = TraceConfig::default().with_view_distance(10.0);
        assert_eq!(trace_ray_with(&ray, &grid, &near, ray.origin()), Ok(None));

        let far = TraceConfig::default().with_view_distance(13.0);
        assert!(trace_ray_with(&ray, &grid, &far, ray.origin())
            .unwrap()
            .is_some());
    }

    #[test]
    fn deltas_scale_the_lattice() {
        let grid = grid_with(&[PointN([3.0, 0.0, 0.0])]);
        let ray = Ray::new(Point3f::ZERO, PointN([1.0, 0.0, 0.0]));
        let config = TraceConfig::default().with_deltas(PointN([2.0, 1.0, 1.0]));

        // Voxel 3 is 6 units away at this pitch.
        let hit = trace_ray_with(&ray, &grid, &config, ray.origin()).unwrap();
        assert_eq!(hit.map(|r| r.position), Some(PointN([3.0, 0.0, 0.0])));

        // The start position is measured in the same units as the deltas.
        let hit = trace_ray_with(&ray, &grid, &config, PointN([6.0, 0.0, 0.0])).unwrap();
        assert_eq!(hit.map(|r| r.position), Some(PointN([3.0, 0.0, 0.0])));
    }

    #[test]
    fn bad_inputs_are_errors() {
        let grid = grid_with(&[]);
        let ray = Ray::new(Point3f::ZERO, PointN([1.0, 0.0, 0.0]));
        let start = ray.origin();

        assert_eq!(
            trace_ray(
                &Ray::new(Point3f::ZERO, Point3f::ZERO),
                &grid,
                Point3f::ONES,
                Point3f::ONES,
                start
            ),
            Err(TraceError::Ray(RayError::ZeroDirection))
        );
        assert_eq!(
            trace_ray(&ray, &grid, PointN([1.0, 0.0, 1.0]), Point3f::ONES, start),
            Err(TraceError::InvalidDeltas(PointN([1.0, 0.0, 1.0])))
        );
        assert_eq!(
            trace_ray(&ray, &grid, Point3f::ONES, PointN([1.5, 1.0, 1.0]), start),
            Err(TraceError::InvalidSteps(PointN([1.5, 1.0, 1.0])))
        );
        assert_eq!(
            trace_ray(&ray, &grid, Point3f::ONES, PointN([-1.0, 1.0, 1.0]), start),
            Err(TraceError::InvalidSteps(PointN([-1.0, 1.0, 1.0])))
        );
        assert_eq!(
            trace_ray_with(
                &ray,
                &grid,
                &TraceConfig::default().with_view_distance(0.0),
                start
            ),
            Err(TraceError::InvalidViewDistance(0.0))
        );
        let nan_start = PointN([f32::NAN, 0.0, 0.0]);
        assert!(matches!(
            trace_ray(&ray, &grid, Point3f::ONES, Point3f::ONES, nan_start),
            Err(TraceError::NonFiniteStart(_))
        ));
    }

    #[test]
    fn cast_rays_dedups_hits() {
        let grid = grid_with(&[PointN([5.0, 5.0, 5.0]), PointN([10.0, 5.0, 5.0])]);
        let rays = [
            Ray::new(PointN([0.0, 5.0, 5.0]), PointN([1.0, 0.0, 0.0])),
            Ray::new(PointN([1.0, 5.0, 5.0]), PointN([1.0, 0.0, 0.0])),
            Ray::new(PointN([15.0, 5.0, 5.0]), PointN([-1.0, 0.0, 0.0])),
            Ray::new(PointN([0.0, 0.0, 0.0]), PointN([0.0, 0.0, 1.0])),
        ];

        let hits = cast_rays(rays.iter(), &grid, &TraceConfig::default()).unwrap();

        assert_eq!(hits.len(), 2);
        assert!(hits.contains(PointN([5.0, 5.0, 5.0])));
        assert!(hits.contains(PointN([10.0, 5.0, 5.0])));
    }

    #[test]
    fn sweep_finds_every_voxel_facing_the_sweep() {
        let grid = diagonal_grid::<8>();

        // Each diagonal voxel is seen at least by the ray starting inside of it.
        let hits = sweep_grid(&grid, PointN([0.0, 0.0, 1.0]), &TraceConfig::default()).unwrap();

        assert_eq!(hits.len(), 8);
        for i in 0..8 {
            assert!(hits.contains(Point3f::fill(i as f32)));
        }
    }

    #[test]
    fn sweep_of_sphere_only_sees_occupied_voxels() {
        let (grid, _radius) = sphere_grid::<8>(Point3f::ONES);

        let hits = sweep_grid(&grid, PointN([1.0, 1.0, 0.0]), &TraceConfig::default()).unwrap();

        assert!(!hits.is_empty());
        for hit in hits.iter() {
            assert!(grid.get_voxel(hit.position.as_3i()).is_some());
        }
    }
}

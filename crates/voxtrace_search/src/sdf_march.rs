//! Sphere tracing against the voxels of a `VoxelGrid`, with surface normals for shading.
//!
//! Every occupied voxel is a unit box centered on its grid-local position, and the ray is given in the same grid-local
//! space. The ray advances by the signed distance to the box on each step, so it never overshoots the surface. It stops
//! once that distance is below `min_hit_distance`, after `max_steps`, or beyond `max_trace_distance`.
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_search::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut grid = VoxelGrid::<8, 8, 8>::new(GridConfig::default()).unwrap();
//! grid.set_voxel_at(PointN([3.0, 3.0, 3.0]), Point3f::ONES).unwrap();
//!
//! let ray = Ray::new(PointN([3.0, 3.0, 0.0]), PointN([0.0, 0.0, 1.0]));
//! let (record, hit) = sdf_march_grid(&ray, &grid, &SdfMarchConfig::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(record.position, PointN([3.0, 3.0, 3.0]));
//! assert_eq!(hit.distance, 2.5);
//! assert_eq!(hit.normal, Some(PointN([0.0, 0.0, -1.0])));
//! ```

use crate::TraceError;

use voxtrace_core::prelude::*;
use voxtrace_storage::{VoxelGrid, VoxelRecord};

use float_ord::FloatOrd;

pub const DEFAULT_MAX_STEPS: u32 = 32;
pub const DEFAULT_MIN_HIT_DISTANCE: f32 = 0.001;
pub const DEFAULT_MAX_TRACE_DISTANCE: f32 = 1000.0;

// Offset used for the central differences of the normal.
const NORMAL_EPSILON: f32 = 0.001;

const VOXEL_HALF_EXTENTS: Point3f = PointN([0.5; 3]);

/// Budgets of a sphere trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SdfMarchConfig {
    pub max_steps: u32,
    /// A point closer than this to the surface counts as a hit.
    pub min_hit_distance: f32,
    /// The trace gives up once it has travelled farther than this.
    pub max_trace_distance: f32,
}

impl Default for SdfMarchConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            min_hit_distance: DEFAULT_MIN_HIT_DISTANCE,
            max_trace_distance: DEFAULT_MAX_TRACE_DISTANCE,
        }
    }
}

impl SdfMarchConfig {
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_min_hit_distance(mut self, min_hit_distance: f32) -> Self {
        self.min_hit_distance = min_hit_distance;
        self
    }

    pub fn with_max_trace_distance(mut self, max_trace_distance: f32) -> Self {
        self.max_trace_distance = max_trace_distance;
        self
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if self.max_steps == 0 {
            return Err(TraceError::InvalidMarchConfig("max steps must be nonzero"));
        }
        if !(self.min_hit_distance.is_finite() && self.min_hit_distance > 0.0) {
            return Err(TraceError::InvalidMarchConfig(
                "min hit distance must be positive and finite",
            ));
        }
        if !(self.max_trace_distance >= 0.0) {
            return Err(TraceError::InvalidMarchConfig(
                "max trace distance must be non-negative",
            ));
        }

        Ok(())
    }
}

/// Where a sphere trace stopped on a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SdfHit {
    /// Distance along the (normalized) ray.
    pub distance: f32,
    pub point: Point3f,
    /// The unit surface normal, or `None` where the distance gradient vanishes (e.g. at the center of a box).
    pub normal: Option<Point3f>,
}

/// Signed distance from `p` to the box at `center` with the given half extents. Negative inside.
#[inline]
pub fn box_sdf(p: Point3f, center: Point3f, half_extents: Point3f) -> f32 {
    let q = (p - center).abs() - half_extents;
    let outside = q.map_components_unary(|c| c.max(0.0)).norm();
    let inside = q.max_component().min(0.0);

    outside + inside
}

/// The gradient of `box_sdf` at `p` by central differences, normalized.
pub fn box_normal(p: Point3f, center: Point3f, half_extents: Point3f) -> Option<Point3f> {
    let mut gradient = Point3f::ZERO;
    for &axis in Axis3::ALL.iter() {
        let offset = Point3f::from(axis.get_unit_vector()) * NORMAL_EPSILON;
        *gradient.axis_component_mut(axis) = box_sdf(p + offset, center, half_extents)
            - box_sdf(p - offset, center, half_extents);
    }

    gradient.normalized()
}

/// Sphere traces `ray` against a single box. Distances are measured along the normalized ray.
pub fn sdf_march_box(
    ray: &Ray,
    center: Point3f,
    half_extents: Point3f,
    config: &SdfMarchConfig,
) -> Result<Option<SdfHit>, TraceError> {
    let ray = ray.normalized()?;
    config.validate()?;

    Ok(march_box(&ray, center, half_extents, config))
}

// `ray` must be normalized and `config` valid.
fn march_box(
    ray: &Ray,
    center: Point3f,
    half_extents: Point3f,
    config: &SdfMarchConfig,
) -> Option<SdfHit> {
    let mut travelled = 0.0;
    for _ in 0..config.max_steps {
        if travelled > config.max_trace_distance {
            return None;
        }

        let point = ray.point_at(travelled);
        let closest = box_sdf(point, center, half_extents);
        tracing::trace!("sphere at {:?} has radius {}", point, closest);

        if closest < config.min_hit_distance {
            return Some(SdfHit {
                distance: travelled,
                point,
                normal: box_normal(point, center, half_extents),
            });
        }

        travelled += closest;
    }

    None
}

/// Sphere traces `ray` (grid-local) against every occupied voxel of `grid`, in linear index order. Each voxel gets its
/// own trace, so the result says how every voxel would be shaded from this ray.
pub fn sdf_march_each<const X: usize, const Y: usize, const Z: usize>(
    ray: &Ray,
    grid: &VoxelGrid<X, Y, Z>,
    config: &SdfMarchConfig,
) -> Result<Vec<(VoxelRecord, Option<SdfHit>)>, TraceError> {
    let ray = ray.normalized()?;
    config.validate()?;

    let results: Vec<_> = grid
        .iter_occupied()
        .map(|record| {
            let hit = march_box(&ray, record.position, VOXEL_HALF_EXTENTS, config);
            (*record, hit)
        })
        .collect();
    tracing::debug!("sphere traced {} voxels", results.len());

    Ok(results)
}

/// The nearest voxel of `grid` hit by a sphere trace of `ray` (grid-local), if any.
pub fn sdf_march_grid<const X: usize, const Y: usize, const Z: usize>(
    ray: &Ray,
    grid: &VoxelGrid<X, Y, Z>,
    config: &SdfMarchConfig,
) -> Result<Option<(VoxelRecord, SdfHit)>, TraceError> {
    let nearest = sdf_march_each(ray, grid, config)?
        .into_iter()
        .filter_map(|(record, hit)| Some((record, hit?)))
        .min_by_key(|(_, hit)| FloatOrd(hit.distance));

    Ok(nearest)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

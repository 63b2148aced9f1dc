//! Ray queries over voxel storage:
//!   - `GridRayTraversal3`: the Amanatides and Woo stepper, on its own
//!   - `trace_ray`: first occupied voxel of a dense `VoxelGrid` along a ray
//!   - `SvoMarch`: distance to the first voxel of an `Svo` along a ray
//!   - `sdf_march_grid`: sphere tracing against the voxels of a `VoxelGrid`, with surface normals

pub mod grid_ray_traversal;
pub mod sdf_march;
pub mod svo_march;
pub mod trace;

pub use grid_ray_traversal::GridRayTraversal3;
pub use sdf_march::{
    box_normal, box_sdf, sdf_march_box, sdf_march_each, sdf_march_grid, SdfHit, SdfMarchConfig,
};
pub use svo_march::{MarchState, SvoMarch};
pub use trace::{
    cast_rays, sweep_grid, trace_ray, trace_ray_with, TraceConfig, TraceError,
    DEFAULT_VIEW_DISTANCE,
};

pub mod prelude {
    pub use super::{
        cast_rays, sdf_march_each, sdf_march_grid, sweep_grid, trace_ray, trace_ray_with,
        GridRayTraversal3, MarchState, SdfHit, SdfMarchConfig, SvoMarch, TraceConfig, TraceError,
    };
}

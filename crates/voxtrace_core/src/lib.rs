//! The core data types for voxel ray traversal:
//! - `PointN`: a 3-dimensional point, most importantly `Point3i` and `Point3f`
//! - `Extent3i`: a box on the integer lattice
//! - `Ray`: a half-line with a slab test against axis-aligned boxes

pub mod axis;
pub mod extent;
pub mod point;
pub mod ray;

pub use axis::Axis3;
pub use extent::{Extent3PointIter, Extent3i};
pub use point::{
    DotProduct, GetComponent, MapComponents, MinMaxComponent, Norm, NormSquared, Ones, Point3,
    Point3f, Point3i, PointN, SmallOne, SmallZero,
};
pub use ray::{is_hit, Ray, RayError, MISS};

pub use num;

pub mod prelude {
    pub use super::{
        is_hit, Axis3, DotProduct, Extent3i, GetComponent, MapComponents, MinMaxComponent, Norm,
        NormSquared, Ones, Point3, Point3f, Point3i, PointN, Ray, RayError, SmallOne, SmallZero,
        MISS,
    };
}

//! Points in 3-dimensional space.
//!
//! A point is just a primitive array wrapped in `PointN`, so it is cheap to copy and has the same
//! memory layout as `[T; 3]`:
//!
//! ```
//! use voxtrace_core::prelude::*;
//!
//! let p: Point3f = PointN([1.0, 2.0, 3.0]);
//! let q = Point3f::fill(1.0);
//!
//! assert_eq!(p + q, PointN([2.0, 3.0, 4.0]));
//! assert_eq!(p * 2.0, PointN([2.0, 4.0, 6.0]));
//! assert_eq!((p - q).dot(&q), 3.0);
//! ```
//!
//! There is also a partial order on points which says that A < B iff every component of A is less
//! than the same component of B. This makes bounds checks read naturally:
//!
//! ```
//! use voxtrace_core::prelude::*;
//!
//! let min = Point3i::ZERO;
//! let least_upper_bound = Point3i::fill(16);
//!
//! assert!(min <= PointN([0, 7, 15]) && PointN([0, 7, 15]) < least_upper_bound);
//! assert!(!(PointN([0, 16, 15]) < least_upper_bound));
//! ```

pub mod point3;

pub use point3::*;

#[cfg(feature = "glam")]
mod glam_conversions;

/// A point whose components are stored in the primitive array `N`.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct PointN<N>(pub N);

pub trait GetComponent {
    type Scalar: Copy;

    /// Returns the component specified by index. I.e. X = 0, Y = 1, Z = 2.
    fn at(&self, component_index: usize) -> Self::Scalar;
}

pub trait MapComponents {
    type Scalar;

    /// Returns the point after applying `f` component-wise.
    fn map_components_unary(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;

    /// Returns the point after applying `f` component-wise to both `self` and `other` in parallel.
    fn map_components_binary(
        &self,
        other: &Self,
        f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self;
}

// `num::Zero` can't provide an associated constant, so we have our own.
pub trait SmallZero: Copy {
    const ZERO: Self;
}

pub trait SmallOne: Copy {
    const ONE: Self;
}

impl SmallZero for i32 {
    const ZERO: i32 = 0;
}
impl SmallOne for i32 {
    const ONE: i32 = 1;
}

impl SmallZero for f32 {
    const ZERO: f32 = 0.0;
}
impl SmallOne for f32 {
    const ONE: f32 = 1.0;
}

pub trait Ones: Copy {
    /// A point of all ones.
    const ONES: Self;
}

pub trait DotProduct {
    type Scalar: Copy;

    /// The vector dot product.
    fn dot(&self, other: &Self) -> Self::Scalar;
}

pub trait NormSquared {
    fn norm_squared(&self) -> f32;
}

pub trait Norm {
    fn norm(&self) -> f32;
}

impl<T> Norm for T
where
    T: NormSquared,
{
    #[inline]
    fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }
}

pub trait MinMaxComponent {
    type Scalar;

    fn min_component(&self) -> Self::Scalar;
    fn max_component(&self) -> Self::Scalar;
}

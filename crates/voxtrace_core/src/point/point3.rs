use super::*;
use crate::Axis3;

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use num::Zero;
use std::cmp::Ordering;

/// A 3-dimensional point with scalar type `T`.
pub type Point3<T> = PointN<[T; 3]>;
/// A 3-dimensional point with scalar type `i32`.
pub type Point3i = PointN<[i32; 3]>;
/// A 3-dimensional point with scalar type `f32`.
pub type Point3f = PointN<[f32; 3]>;

// Safe because `PointN` is `repr(transparent)` over a primitive array.
unsafe impl bytemuck::Zeroable for Point3f {}
unsafe impl bytemuck::Pod for Point3f {}
unsafe impl bytemuck::Zeroable for Point3i {}
unsafe impl bytemuck::Pod for Point3i {}

impl<T> Point3<T> {
    #[inline]
    pub fn axis_component_mut(&mut self, axis: Axis3) -> &mut T {
        &mut self.0[axis.index()]
    }
}

impl<T> Point3<T>
where
    T: Copy,
{
    #[inline]
    pub fn fill(value: T) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    pub fn axis_component(&self, axis: Axis3) -> T {
        self.0[axis.index()]
    }
}

impl<T> Point3<T>
where
    T: Copy + Mul<Output = T> + Sub<Output = T>,
{
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        PointN([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }
}

impl Point3f {
    #[inline]
    pub fn round(&self) -> Self {
        self.map_components_unary(|c| c.round())
    }

    #[inline]
    pub fn abs(&self) -> Self {
        self.map_components_unary(|c| c.abs())
    }

    /// Like `f32::signum`, except that zero maps to zero.
    #[inline]
    pub fn signum(&self) -> Self {
        self.map_components_unary(|c| if c == 0.0 { 0.0 } else { c.signum() })
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z().is_finite()
    }

    /// Returns `true` iff every component is a whole number.
    #[inline]
    pub fn is_integral(&self) -> bool {
        self.is_finite() && self.fract().is_zero()
    }

    #[inline]
    pub fn fract(&self) -> Self {
        self.map_components_unary(|c| c.fract())
    }

    /// Truncates each component toward zero.
    #[inline]
    pub fn as_3i(&self) -> Point3i {
        PointN([self.x() as i32, self.y() as i32, self.z() as i32])
    }

    /// The integer point closest to `self`, rounding halfway cases away from zero.
    #[inline]
    pub fn round_to_3i(&self) -> Point3i {
        self.round().as_3i()
    }

    /// Scales `self` to unit length. Returns `None` for the zero vector or a non-finite result.
    #[inline]
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }

        Some(*self / norm)
    }

    /// Rotates `self` by `angle_radians` about the unit vector `axis` (Rodrigues' formula).
    #[inline]
    pub fn rotate_about(&self, axis: &Self, angle_radians: f32) -> Self {
        let (sin, cos) = angle_radians.sin_cos();

        *self * cos + axis.cross(self) * sin + *axis * (axis.dot(self) * (1.0 - cos))
    }

    /// Returns `true` iff every component of `self` is within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (*self - *other).abs().max_component() <= epsilon
    }
}

impl Point3i {
    #[inline]
    pub fn signum(&self) -> Self {
        self.map_components_unary(|c| c.signum())
    }

    #[inline]
    pub fn abs(&self) -> Self {
        self.map_components_unary(|c| c.abs())
    }

    /// The offsets of the 8 children of an octant, in child index order. Bit 0 of the index selects
    /// X, bit 1 selects Y, and bit 2 selects Z.
    #[inline]
    pub fn corner_offsets() -> [Self; 8] {
        [
            PointN([0, 0, 0]),
            PointN([1, 0, 0]),
            PointN([0, 1, 0]),
            PointN([1, 1, 0]),
            PointN([0, 0, 1]),
            PointN([1, 0, 1]),
            PointN([0, 1, 1]),
            PointN([1, 1, 1]),
        ]
    }
}

impl<T> MapComponents for Point3<T>
where
    T: Copy,
{
    type Scalar = T;

    #[inline]
    fn map_components_unary(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }

    #[inline]
    fn map_components_binary(
        &self,
        other: &Self,
        f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self {
        PointN([
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        ])
    }
}

impl<T> GetComponent for Point3<T>
where
    T: Copy,
{
    type Scalar = T;

    #[inline]
    fn at(&self, component_index: usize) -> T {
        self.0[component_index]
    }
}

impl<T> SmallZero for Point3<T>
where
    T: SmallZero,
{
    const ZERO: Self = PointN([T::ZERO; 3]);
}

impl<T> Ones for Point3<T>
where
    T: SmallOne,
{
    const ONES: Self = PointN([T::ONE; 3]);
}

impl<T> Zero for Point3<T>
where
    T: Copy + Zero,
{
    #[inline]
    fn zero() -> Self {
        PointN([T::zero(); 3])
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.x().is_zero() && self.y().is_zero() && self.z().is_zero()
    }
}

impl<T> DotProduct for Point3<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn dot(&self, other: &Self) -> Self::Scalar {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }
}

impl NormSquared for Point3f {
    #[inline]
    fn norm_squared(&self) -> f32 {
        self.dot(self)
    }
}

impl NormSquared for Point3i {
    #[inline]
    fn norm_squared(&self) -> f32 {
        self.dot(self) as f32
    }
}

impl MinMaxComponent for Point3f {
    type Scalar = f32;

    #[inline]
    fn min_component(&self) -> f32 {
        self.x().min(self.y()).min(self.z())
    }

    #[inline]
    fn max_component(&self) -> f32 {
        self.x().max(self.y()).max(self.z())
    }
}

impl MinMaxComponent for Point3i {
    type Scalar = i32;

    #[inline]
    fn min_component(&self) -> i32 {
        self.x().min(self.y()).min(self.z())
    }

    #[inline]
    fn max_component(&self) -> i32 {
        self.x().max(self.y()).max(self.z())
    }
}

// This particular partial order allows us to say that an `Extent3i` e contains a `Point3i` p iff p
// is GEQ the minimum of e and p is LT the least upper bound of e.
impl<T> PartialOrd for Point3<T>
where
    T: Copy + PartialOrd,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self.x() == other.x() && self.y() == other.y() && self.z() == other.z() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 + c2)
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 - c2)
    }
}

impl<T> Neg for Point3<T>
where
    T: Copy + Neg<Output = T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map_components_unary(|c| -c)
    }
}

impl<T> AddAssign for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T> SubAssign for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T> Mul<T> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.map_components_unary(|c| c * rhs)
    }
}

impl<T> Mul<Point3<T>> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.map_components_binary(&other, |c1, c2| c1 * c2)
    }
}

impl Div<f32> for Point3f {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.map_components_unary(|c| c / rhs)
    }
}

impl Div<Self> for Point3f {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 / c2)
    }
}

impl From<Point3i> for Point3f {
    #[inline]
    fn from(p: Point3i) -> Self {
        PointN([p.x() as f32, p.y() as f32, p.z() as f32])
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

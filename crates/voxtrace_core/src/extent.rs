use crate::{Point3i, PointN, SmallZero};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};

/// A 3-dimensional box on the integer lattice. This is mathematically the Cartesian product of a half-closed interval
/// `[a, b)` in each dimension.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent3i {
    /// The least point contained in the extent.
    pub minimum: Point3i,
    /// The length of each dimension.
    pub shape: Point3i,
}

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// An extent anchored at the origin.
    #[inline]
    pub fn from_shape(shape: Point3i) -> Self {
        Self::from_min_and_shape(Point3i::ZERO, shape)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.x() <= 0 || self.shape.y() <= 0 || self.shape.z() <= 0
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        self.shape.x() as usize * self.shape.y() as usize * self.shape.z() as usize
    }

    /// Iterates over all points in the extent, in row-major order (X varies fastest).
    #[inline]
    pub fn iter_points(&self) -> Extent3PointIter {
        let lub = self.least_upper_bound();

        Extent3PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(
                self.minimum.z()..lub.z(),
                self.minimum.y()..lub.y(),
                self.minimum.x()..lub.x()
            ),
        }
    }
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

/// An iterator over all points in an `Extent3i`.
pub struct Extent3PointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

impl Iterator for Extent3PointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| PointN([x, y, z]))
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

    use pretty_assertions::assert_eq;

    #[test]
    fn row_major_extent_iter() {
        let extent = Extent3i::from_shape(PointN([2, 2, 2]));

        let points: Vec<_> = extent.iter_points().collect();

        assert_eq!(
            points,
            vec![
                PointN([0, 0, 0]),
                PointN([1, 0, 0]),
                PointN([0, 1, 0]),
                PointN([1, 1, 0]),
                PointN([0, 0, 1]),
                PointN([1, 0, 1]),
                PointN([0, 1, 1]),
                PointN([1, 1, 1]),
            ]
        );
    }

    #[test]
    fn contains_is_half_open() {
        let extent = Extent3i::from_min_and_shape(PointN([-1, 0, 0]), PointN([4, 4, 4]));

        assert!(extent.contains(PointN([-1, 0, 0])));
        assert!(extent.contains(PointN([2, 3, 3])));
        assert!(!extent.contains(PointN([3, 0, 0])));
        assert!(!extent.contains(PointN([0, -1, 0])));
        assert_eq!(extent.num_points(), 64);
    }
}

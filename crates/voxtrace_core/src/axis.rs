use crate::{Point3i, PointN};

/// Either the X, Y, or Z axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis3 {
    /// All axes, in component order.
    pub const ALL: [Axis3; 3] = [Axis3::X, Axis3::Y, Axis3::Z];

    /// The index for a point's component on this axis.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub fn get_unit_vector(&self) -> Point3i {
        match self {
            Axis3::X => PointN([1, 0, 0]),
            Axis3::Y => PointN([0, 1, 0]),
            Axis3::Z => PointN([0, 0, 1]),
        }
    }
}

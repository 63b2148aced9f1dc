//! Rays and the slab test against axis-aligned boxes.
//!
//! A `Ray` is parameterized as `point_at(t) = origin + t * direction`. The direction is not required to have unit length,
//! but distances reported by intersection queries are in units of `direction`, so queries that compare distances across
//! rays should use `Ray::normalized`.
//!
//! ```
//! use voxtrace_core::prelude::*;
//!
//! let ray = Ray::new(PointN([0.0, 0.0, 5.0]), PointN([0.0, 0.0, -1.0]));
//!
//! // The near face of the unit cube is at z = 0.5.
//! assert_eq!(ray.intersect_cube(Point3f::ZERO, 1.0), 4.5);
//!
//! // Nothing lies behind the ray.
//! let away = Ray::new(PointN([0.0, 0.0, 5.0]), PointN([0.0, 0.0, 1.0]));
//! assert_eq!(away.intersect_cube(Point3f::ZERO, 1.0), MISS);
//! ```

use crate::{Axis3, GetComponent, Point3f, PointN};

use thiserror::Error;

/// The value returned by intersection queries when the ray does not hit anything in front of its origin.
pub const MISS: f32 = -1.0;

/// Returns `true` iff `t` is a hit distance rather than the `MISS` sentinel.
#[inline]
pub fn is_hit(t: f32) -> bool {
    t >= 0.0
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RayError {
    #[error("ray direction is the zero vector")]
    ZeroDirection,
    #[error("ray has a non-finite component: origin {origin:?}, direction {direction:?}")]
    NonFinite {
        origin: Point3f,
        direction: Point3f,
    },
}

/// A half-line starting at `origin` and extending along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    origin: Point3f,
    direction: Point3f,
}

impl Ray {
    const UP: Point3f = PointN([0.0, 1.0, 0.0]);

    #[inline]
    pub fn new(origin: Point3f, direction: Point3f) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3f {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Point3f {
        self.direction
    }

    #[inline]
    pub fn set_origin(&mut self, origin: Point3f) {
        self.origin = origin;
    }

    #[inline]
    pub fn set_direction(&mut self, direction: Point3f) {
        self.direction = direction;
    }

    /// Returns the same ray, moved forward along its direction by `t`.
    #[inline]
    pub fn advanced(&self, t: f32) -> Self {
        Self::new(self.point_at(t), self.direction)
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }

    /// Checks that the ray has a finite origin and a finite, nonzero direction.
    pub fn validate(&self) -> Result<(), RayError> {
        if !self.origin.is_finite() || !self.direction.is_finite() {
            return Err(RayError::NonFinite {
                origin: self.origin,
                direction: self.direction,
            });
        }
        // -0.0 compares equal to 0.0.
        if self.direction == Point3f::fill(0.0) {
            return Err(RayError::ZeroDirection);
        }

        Ok(())
    }

    /// The same ray with a unit-length direction.
    pub fn normalized(&self) -> Result<Self, RayError> {
        self.validate()?;
        let direction = self.direction.normalized().ok_or(RayError::ZeroDirection)?;

        Ok(Self::new(self.origin, direction))
    }

    /// Turns the direction by `angle_degrees` about the world up axis (+Y). The new direction has unit length.
    pub fn rotate_yaw(&mut self, angle_degrees: f32) -> Result<(), RayError> {
        let rotated = self
            .direction
            .rotate_about(&Self::UP, angle_degrees.to_radians());
        self.direction = Self::new(self.origin, rotated).normalized()?.direction;

        Ok(())
    }

    /// Tilts the direction by `angle_degrees` about the axis `direction x up`. The new direction has unit length.
    ///
    /// A ray pointing straight up or down has no such axis; it is left unchanged (apart from normalization).
    pub fn rotate_pitch(&mut self, angle_degrees: f32) -> Result<(), RayError> {
        let unit = self.normalized()?.direction;
        let rotated = match unit.cross(&Self::UP).normalized() {
            Some(right) => unit.rotate_about(&right, angle_degrees.to_radians()),
            None => unit,
        };
        self.direction = Self::new(self.origin, rotated).normalized()?.direction;

        Ok(())
    }

    /// The interval `[t_enter, t_exit]` over which the ray's line is inside of the box `[min, max]`, or `None` if the
    /// line never touches the box. Either end may be behind the origin.
    ///
    /// An axis where the direction is zero never limits the interval, as long as the origin lies within that axis's slab
    /// (boundaries included). Otherwise the ray can never enter the slab.
    ///
    /// A NaN in the ray or the box never intersects anything.
    pub fn slab_interval(&self, min: Point3f, max: Point3f) -> Option<(f32, f32)> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in Axis3::ALL.iter() {
            let i = axis.index();
            let origin = self.origin.at(i);
            let direction = self.direction.at(i);
            let (lo, hi) = (min.at(i), max.at(i));

            if direction == 0.0 {
                // Written so that a NaN origin or bound fails the test.
                if !(lo <= origin && origin <= hi) {
                    return None;
                }
                continue;
            }

            let t0 = (lo - origin) / direction;
            let t1 = (hi - origin) / direction;
            let (t_lo, t_hi) = if t0 <= t1 {
                (t0, t1)
            } else if t1 < t0 {
                (t1, t0)
            } else {
                // NaN
                return None;
            };

            if t_min > t_hi || t_lo > t_max {
                return None;
            }
            if t_lo > t_min {
                t_min = t_lo;
            }
            if t_hi < t_max {
                t_max = t_hi;
            }
        }

        Some((t_min, t_max))
    }

    /// Returns the parameter `t` of the nearest point where the ray enters the box `[min, max]`, or `MISS` if the ray
    /// misses the box or the box is only reachable behind the origin. A ray starting inside of the box misses it.
    pub fn intersect_box(&self, min: Point3f, max: Point3f) -> f32 {
        match self.slab_interval(min, max) {
            // Fold -0.0 into 0.0 so an origin on the entry face reports a plain zero.
            Some((t_enter, _)) if t_enter == 0.0 => 0.0,
            Some((t_enter, _)) if t_enter > 0.0 => t_enter,
            _ => MISS,
        }
    }

    /// `intersect_box` for the cube with edge length `size` centered at `center`.
    #[inline]
    pub fn intersect_cube(&self, center: Point3f, size: f32) -> f32 {
        let half_size = Point3f::fill(size * 0.5);

        self.intersect_box(center - half_size, center + half_size)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

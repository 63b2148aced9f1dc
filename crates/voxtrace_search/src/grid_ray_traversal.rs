use voxtrace_core::prelude::*;

/// Grid traversal algorithm by Amanatides and Woo. Visits every voxel intersecting the given ray.
///
/// Voxels are centered on lattice points, so voxel `p` covers `[(p - 0.5) * deltas, (p + 0.5) * deltas]`. An axis where
/// the velocity is zero is never stepped.
#[derive(Clone, Debug)]
pub struct GridRayTraversal3 {
    // The current voxel position.
    current_grid_point: Point3i,
    // The signed number of voxels we step along each axis, or 0 if the ray doesn't move on that axis.
    step: Point3i,
    // The amount of time it takes to move one step along each axis.
    t_delta: Point3f,
    // The next time when each axis will cross a voxel boundary.
    t_max: Point3f,
}

impl GridRayTraversal3 {
    /// Initialize the traversal, beginning at the `start` position and moving along the `velocity` vector. `deltas` is
    /// the edge length of a voxel along each axis, and `steps` is the (positive) number of voxels to advance on each
    /// step.
    pub fn new(start: Point3f, velocity: Point3f, deltas: Point3f, steps: Point3i) -> Self {
        let current_grid_point = (start / deltas).round_to_3i();
        let step = velocity.signum().as_3i() * steps;

        let mut t_delta = Point3f::fill(f32::INFINITY);
        let mut t_max = Point3f::fill(f32::INFINITY);
        for &axis in Axis3::ALL.iter() {
            let v = velocity.axis_component(axis);
            if v == 0.0 {
                continue;
            }

            let delta = deltas.axis_component(axis);
            let half = if v > 0.0 { 0.5 } else { -0.5 };
            let next_bound = (current_grid_point.axis_component(axis) as f32 + half) * delta;

            *t_max.axis_component_mut(axis) = (next_bound - start.axis_component(axis)) / v;
            *t_delta.axis_component_mut(axis) =
                (delta * steps.axis_component(axis) as f32 / v).abs();
        }

        Self {
            current_grid_point,
            step,
            t_delta,
            t_max,
        }
    }

    /// Move to the next closest voxel along the ray. Returns the axis that was stepped.
    ///
    /// Ties go to X over Y and Y over Z, except that an X/Z tie with Y behind them goes to Z.
    #[inline]
    pub fn step(&mut self) -> Axis3 {
        let axis = if self.t_max.x() < self.t_max.y() {
            if self.t_max.x() < self.t_max.z() {
                Axis3::X
            } else {
                Axis3::Z
            }
        } else if self.t_max.y() < self.t_max.z() {
            Axis3::Y
        } else {
            Axis3::Z
        };

        *self.current_grid_point.axis_component_mut(axis) += self.step.axis_component(axis);
        *self.t_max.axis_component_mut(axis) += self.t_delta.axis_component(axis);

        axis
    }

    /// The current voxel position. Changes on every call of `step`.
    #[inline]
    pub fn current_voxel(&self) -> Point3i {
        self.current_grid_point
    }

    /// The time at which the ray crosses the next voxel boundary on each axis.
    #[inline]
    pub fn t_max(&self) -> Point3f {
        self.t_max
    }

    #[inline]
    pub fn t_delta(&self) -> Point3f {
        self.t_delta
    }

    /// The signed number of voxels stepped on each axis.
    #[inline]
    pub fn step_vector(&self) -> Point3i {
        self.step
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

//! Marching rays through an `Svo`.
//!
//! A march descends from the root toward the leaves, entering only the children that the ray actually touches and that
//! are within the remaining distance budget. The ray is never mutated; each level of the descent receives its own
//! `MarchState`, with the ray's origin moved to the point where it entered that node.
//!
//! There are two marches:
//!   - `march` tests children in index order and returns as soon as any child's descent hits something. This is NOT
//!     guaranteed to be the nearest hit, since a child with a lower index may be farther along the ray than a sibling.
//!   - `march_nearest` tests children in the order the ray enters them, so the first hit is also the nearest.
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_search::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut svo = Svo::new(SvoConfig::default().with_min_voxel_size(0.1)).unwrap();
//! svo.construct_octree().unwrap();
//!
//! let ray = Ray::new(PointN([0.1, 0.1, 5.0]), PointN([0.0, 0.0, -1.0]));
//! assert_eq!(svo.march_nearest(&ray, 10.0), 4.5);
//!
//! // Too far away.
//! assert_eq!(svo.march_nearest(&ray, 4.0), MISS);
//! ```

use voxtrace_core::prelude::*;
use voxtrace_storage::{NodeId, Svo, Voxel};

use float_ord::FloatOrd;

/// The part of a ray that's left to march: where it is now and how much farther it may go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchState {
    pub ray: Ray,
    pub remaining: f32,
}

impl MarchState {
    #[inline]
    pub fn new(ray: Ray, remaining: f32) -> Self {
        Self { ray, remaining }
    }

    /// The state after moving `t` along the ray.
    #[inline]
    pub fn advanced(&self, t: f32) -> Self {
        Self {
            ray: self.ray.advanced(t),
            remaining: self.remaining - t,
        }
    }

    /// The distance to where the ray enters `voxel`, if it does so within the budget. A ray that starts inside of
    /// `voxel` enters it at 0.
    #[inline]
    pub fn entry_distance(&self, voxel: &Voxel) -> Option<f32> {
        let (t_enter, t_exit) = self.ray.slab_interval(voxel.min(), voxel.max())?;
        // A ray that only touches the voxel where it leaves doesn't enter it.
        if t_exit <= 0.0 {
            return None;
        }
        let t = t_enter.max(0.0);

        if t <= self.remaining {
            Some(t)
        } else {
            None
        }
    }
}

/// Ray marching for sparse voxel octrees.
pub trait SvoMarch {
    /// The distance along `ray` to the first voxel hit by an index-order descent, or `MISS`. A ray that fails
    /// `Ray::validate` always misses.
    fn march(&self, ray: &Ray, max_distance: f32) -> f32;

    /// One level of `march`, starting at `node`. Returns the distance from `state.ray`'s origin to the hit.
    fn march_recursive(&self, state: MarchState, node: NodeId) -> Option<f32>;

    /// The distance along `ray` to the nearest voxel hit, or `MISS`. A ray that fails `Ray::validate` always misses.
    fn march_nearest(&self, ray: &Ray, max_distance: f32) -> f32;
}

impl SvoMarch for Svo {
    fn march(&self, ray: &Ray, max_distance: f32) -> f32 {
        if !is_marchable(ray) {
            return MISS;
        }

        self.march_recursive(MarchState::new(*ray, max_distance), self.root())
            .unwrap_or(MISS)
    }

    fn march_recursive(&self, state: MarchState, node: NodeId) -> Option<f32> {
        tracing::trace!("marching {:?} with {} remaining", node, state.remaining);

        let children = match self.children(node) {
            Some(children) => children,
            None => return march_leaf(self, &state, node),
        };

        let mut nearest = f32::INFINITY;
        for &child in children.iter() {
            let t = match self
                .node(child)
                .and_then(|c| state.entry_distance(c.voxel()))
            {
                Some(t) => t,
                None => continue,
            };
            if t >= nearest {
                continue;
            }
            nearest = t;

            // The first child whose descent hits anything wins, even if a later sibling would hit sooner.
            if let Some(rest) = self.march_recursive(state.advanced(t), child) {
                return Some(t + rest);
            }
        }

        None
    }

    fn march_nearest(&self, ray: &Ray, max_distance: f32) -> f32 {
        if !is_marchable(ray) {
            return MISS;
        }

        march_nearest_recursive(self, MarchState::new(*ray, max_distance), self.root())
            .unwrap_or(MISS)
    }
}

fn is_marchable(ray: &Ray) -> bool {
    match ray.validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("not marching invalid ray: {}", e);
            false
        }
    }
}

// The nearest voxel of leaf `node` that the ray enters.
fn march_leaf(svo: &Svo, state: &MarchState, node: NodeId) -> Option<f32> {
    svo.leaf_voxels(node)
        .filter_map(|voxel| state.entry_distance(voxel))
        .min_by_key(|t| FloatOrd(*t))
}

fn march_nearest_recursive(svo: &Svo, state: MarchState, node: NodeId) -> Option<f32> {
    tracing::trace!("marching {:?} with {} remaining", node, state.remaining);

    let children = match svo.children(node) {
        Some(children) => children,
        None => return march_leaf(svo, &state, node),
    };

    // Children don't overlap, so the first one entered that has a hit has the nearest hit.
    let mut entered: Vec<(FloatOrd<f32>, NodeId)> = children
        .iter()
        .filter_map(|&child| {
            let t = state.entry_distance(svo.node(child)?.voxel())?;
            Some((FloatOrd(t), child))
        })
        .collect();
    entered.sort_unstable();

    entered.into_iter().find_map(|(FloatOrd(t), child)| {
        march_nearest_recursive(svo, state.advanced(t), child).map(|rest| t + rest)
    })
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

//! A sparse voxel octree (SVO), stored as an arena of nodes.
//!
//! Every node owns one cubic `Voxel`. Subdividing a node creates its 8 children at once, each covering one octant of the
//! parent's cube, so the children of a node always partition it exactly. The children are allocated contiguously in the
//! arena, which means a node only needs to remember the `NodeId` of its first child.
//!
//! Child `i` of a node sits on the positive side of the parent's center along X iff bit 0 of `i` is set, and likewise
//! for bit 1 with Y and bit 2 with Z.
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut svo = Svo::new(SvoConfig::default().with_min_voxel_size(0.1)).unwrap();
//! svo.construct_octree().unwrap();
//!
//! // 1.0 / 2^4 = 0.0625 is the first size <= 0.1.
//! assert_eq!(svo.depth(), 4);
//! assert_eq!(svo.leaf_count(), 8usize.pow(4));
//!
//! let children = svo.children(svo.root()).unwrap();
//! let last = svo.node(children[7]).unwrap().voxel();
//! assert_eq!(last.position, PointN([0.25, 0.25, 0.25]));
//! assert_eq!(last.size, 0.5);
//! ```
//!
//! A leaf may hold up to 7 more voxels than the one it owns (see `insert_leaf_voxel`), as long as they fit inside its
//! cube.

use crate::{SmallKeyHashMap, VoxelRecord, VoxelSet};

use voxtrace_core::prelude::*;

use thiserror::Error;

/// The deepest level a node can live at. The root is at depth 0.
///
/// `construct_octree` builds a complete 8-ary tree, so a depth of `d` allocates `(8^(d + 1) - 1) / 7` nodes. This cap
/// bounds that at about 19 million nodes. Configs whose root size and min voxel size would need a deeper tree are
/// rejected with `SvoError::TooDeep` rather than built.
pub const MAX_DEPTH: u8 = 8;

/// The number of voxel slots in a leaf, including the one the leaf owns.
pub const LEAF_VOXEL_SLOTS: usize = 8;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SvoError {
    #[error("min voxel size must be positive and finite, got {0}")]
    InvalidMinVoxelSize(f32),
    #[error("root size must be positive and finite, got {0}")]
    InvalidRootSize(f32),
    #[error("root position must be finite, got {0:?}")]
    NonFinitePosition(Point3f),
    #[error("octree would have depth {depth}, but the maximum is {max_depth}")]
    TooDeep { depth: u8, max_depth: u8 },
    #[error("node {0:?} is not a leaf")]
    NotALeaf(NodeId),
    #[error("leaf {0:?} has no free voxel slots")]
    LeafFull(NodeId),
    #[error("voxel does not fit inside leaf {0:?}")]
    OutsideLeaf(NodeId),
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
}

/// A cube of edge length `size` centered at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Voxel {
    pub position: Point3f,
    pub color: Point3f,
    pub size: f32,
}

impl Voxel {
    #[inline]
    pub fn new(position: Point3f, color: Point3f, size: f32) -> Self {
        Self {
            position,
            color,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Point3f {
        self.position - Point3f::fill(self.size * 0.5)
    }

    #[inline]
    pub fn max(&self) -> Point3f {
        self.position + Point3f::fill(self.size * 0.5)
    }

    /// Returns `true` iff `other`'s cube lies entirely inside of `self`'s cube.
    #[inline]
    pub fn contains(&self, other: &Voxel) -> bool {
        self.min() <= other.min() && other.max() <= self.max()
    }

    /// The voxel covering octant `child_index` of `self`, with the same color.
    #[inline]
    pub fn child(&self, child_index: usize) -> Self {
        let size = self.size * 0.5;
        let signs = Point3f::from(Point3i::corner_offsets()[child_index]) * 2.0 - Point3f::ONES;

        Self {
            position: self.position + signs * (size * 0.5),
            color: self.color,
            size,
        }
    }

    #[inline]
    pub fn record(&self) -> VoxelRecord {
        VoxelRecord::new(self.position, self.color)
    }
}

/// The index of a node in an `Svo` arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn offset(&self, n: u32) -> Self {
        NodeId(self.0 + n)
    }
}

#[derive(Clone, Debug)]
pub struct SvoNode {
    voxel: Voxel,
    first_child: Option<NodeId>,
    depth: u8,
}

impl SvoNode {
    #[inline]
    pub fn voxel(&self) -> &Voxel {
        &self.voxel
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    #[inline]
    pub fn children(&self) -> Option<[NodeId; 8]> {
        self.first_child.map(|first| {
            [
                first,
                first.offset(1),
                first.offset(2),
                first.offset(3),
                first.offset(4),
                first.offset(5),
                first.offset(6),
                first.offset(7),
            ]
        })
    }
}

/// Construction-time parameters of an `Svo`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct SvoConfig {
    /// Center of the root voxel.
    pub position: Point3f,
    /// Color of the root voxel, inherited by every descendant.
    pub color: Point3f,
    /// Edge length of the root voxel.
    pub root_size: f32,
    /// Subdivision stops at the first node whose size is at most this.
    pub min_voxel_size: f32,
}

impl Default for SvoConfig {
    fn default() -> Self {
        Self {
            position: Point3f::ZERO,
            color: Point3f::ONES,
            root_size: 1.0,
            min_voxel_size: 0.01,
        }
    }
}

impl SvoConfig {
    pub fn with_position(mut self, position: Point3f) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, color: Point3f) -> Self {
        self.color = color;
        self
    }

    pub fn with_root_size(mut self, root_size: f32) -> Self {
        self.root_size = root_size;
        self
    }

    pub fn with_min_voxel_size(mut self, min_voxel_size: f32) -> Self {
        self.min_voxel_size = min_voxel_size;
        self
    }

    /// The depth of the complete octree built from this config, i.e. the number of halvings it takes for the root size
    /// to reach `min_voxel_size`.
    ///
    /// Fails with `SvoError::TooDeep` past `MAX_DEPTH`, which bounds the memory of the complete tree. For example, a root
    /// of size 16 with a min voxel size of 0.01 would need depth 11.
    pub fn depth(&self) -> Result<u8, SvoError> {
        if !(self.root_size.is_finite() && self.root_size > 0.0) {
            return Err(SvoError::InvalidRootSize(self.root_size));
        }
        if !(self.min_voxel_size.is_finite() && self.min_voxel_size > 0.0) {
            return Err(SvoError::InvalidMinVoxelSize(self.min_voxel_size));
        }
        if !self.position.is_finite() {
            return Err(SvoError::NonFinitePosition(self.position));
        }

        let mut depth = 0;
        let mut size = self.root_size;
        while size > self.min_voxel_size {
            if depth == MAX_DEPTH {
                return Err(SvoError::TooDeep {
                    depth: depth + 1,
                    max_depth: MAX_DEPTH,
                });
            }
            size *= 0.5;
            depth += 1;
        }

        Ok(depth)
    }
}

/// The number of nodes in a complete octree of the given depth.
pub fn complete_node_count(depth: u8) -> usize {
    (0..=depth as u32).map(|d| 8usize.pow(d)).sum()
}

/// A sparse voxel octree.
#[derive(Clone, Debug)]
pub struct Svo {
    config: SvoConfig,
    target_depth: u8,
    nodes: Vec<SvoNode>,
    // Voxels beyond the one each leaf owns.
    extra_voxels: SmallKeyHashMap<NodeId, Vec<Voxel>>,
}

impl Svo {
    /// Creates an octree with only a root voxel. Call `construct_octree` to subdivide it.
    ///
    /// The config must describe a tree no deeper than `MAX_DEPTH` (see `SvoConfig::depth`).
    pub fn new(config: SvoConfig) -> Result<Self, SvoError> {
        let target_depth = config.depth()?;
        let root = SvoNode {
            voxel: Voxel::new(config.position, config.color, config.root_size),
            first_child: None,
            depth: 0,
        };

        Ok(Self {
            config,
            target_depth,
            nodes: vec![root],
            extra_voxels: Default::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &SvoConfig {
        &self.config
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn root_voxel(&self) -> &Voxel {
        &self.nodes[0].voxel
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&SvoNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).map_or(false, SvoNode::is_leaf)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 8]> {
        self.node(id).and_then(SvoNode::children)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// The depth of the deepest node.
    pub fn depth(&self) -> u8 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// The depth that `construct_octree` subdivides down to.
    #[inline]
    pub fn target_depth(&self) -> u8 {
        self.target_depth
    }

    fn get_node(&self, id: NodeId) -> Result<&SvoNode, SvoError> {
        self.node(id).ok_or(SvoError::UnknownNode(id))
    }

    /// Turns leaf `id` into an internal node with 8 children. Does not recurse. Any extra voxels of the leaf are dropped.
    pub fn subdivide_node(&mut self, id: NodeId) -> Result<(), SvoError> {
        let node = self.get_node(id)?;
        if !node.is_leaf() {
            return Err(SvoError::NotALeaf(id));
        }
        if node.depth >= MAX_DEPTH {
            return Err(SvoError::TooDeep {
                depth: node.depth + 1,
                max_depth: MAX_DEPTH,
            });
        }

        let parent_voxel = node.voxel;
        let child_depth = node.depth + 1;
        let first_child = NodeId(self.nodes.len() as u32);
        self.nodes.extend((0..8).map(|i| SvoNode {
            voxel: parent_voxel.child(i),
            first_child: None,
            depth: child_depth,
        }));
        self.nodes[id.index()].first_child = Some(first_child);
        self.extra_voxels.remove(&id);

        Ok(())
    }

    /// Subdivides the whole tree, starting from the root, until every leaf is at most `min_voxel_size`.
    pub fn construct_octree(&mut self) -> Result<(), SvoError> {
        let total = complete_node_count(self.target_depth);
        self.nodes.reserve(total.saturating_sub(self.nodes.len()));

        self.construct_octree_recursive(self.root())?;

        tracing::debug!(
            "constructed octree with depth {} and {} nodes",
            self.depth(),
            self.node_count()
        );

        Ok(())
    }

    /// Subdivides the subtree at `id` until every leaf is at most `min_voxel_size`. Subtrees that are already subdivided
    /// are only descended.
    pub fn construct_octree_recursive(&mut self, id: NodeId) -> Result<(), SvoError> {
        let node = self.get_node(id)?;
        if node.voxel.size <= self.config.min_voxel_size {
            return Ok(());
        }
        if node.is_leaf() {
            self.subdivide_node(id)?;
        }

        if let Some(children) = self.children(id) {
            for child in children.iter() {
                self.construct_octree_recursive(*child)?;
            }
        }

        Ok(())
    }

    /// Adds `voxel` to one of the spare slots of leaf `id`. The voxel must fit inside of the leaf's own voxel.
    pub fn insert_leaf_voxel(&mut self, id: NodeId, voxel: Voxel) -> Result<(), SvoError> {
        let node = self.get_node(id)?;
        if !node.is_leaf() {
            return Err(SvoError::NotALeaf(id));
        }
        if !node.voxel.contains(&voxel) {
            return Err(SvoError::OutsideLeaf(id));
        }

        let extras = self.extra_voxels.entry(id).or_insert_with(Vec::new);
        if extras.len() + 1 >= LEAF_VOXEL_SLOTS {
            return Err(SvoError::LeafFull(id));
        }
        extras.push(voxel);

        Ok(())
    }

    /// All voxels held by leaf `id`, starting with the one it owns. Empty if `id` is not a leaf.
    pub fn leaf_voxels(&self, id: NodeId) -> impl Iterator<Item = &Voxel> + '_ {
        let leaf = self.node(id).filter(|n| n.is_leaf());
        let extras: &[Voxel] = leaf
            .and_then(|_| self.extra_voxels.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        leaf.map(|n| &n.voxel).into_iter().chain(extras.iter())
    }

    /// Visit every node in pre-order, children in index order.
    pub fn visit(&self, visitor: &mut impl SvoVisitor) -> VisitStatus {
        self.visit_node_in_preorder(self.root(), visitor)
    }

    fn visit_node_in_preorder(&self, id: NodeId, visitor: &mut impl SvoVisitor) -> VisitStatus {
        let node = &self.nodes[id.index()];
        match visitor.visit_node(id, node) {
            VisitStatus::Continue => (),
            status => return status,
        }

        if let Some(children) = node.children() {
            for child in children.iter() {
                if self.visit_node_in_preorder(*child, visitor) == VisitStatus::ExitEarly {
                    return VisitStatus::ExitEarly;
                }
            }
        }

        VisitStatus::Continue
    }

    /// Every voxel held by a leaf, as render-adapter input.
    pub fn leaf_voxel_set(&self) -> VoxelSet {
        let mut set = VoxelSet::with_capacity(self.leaf_count());
        self.visit(&mut |id: NodeId, node: &SvoNode| {
            if node.is_leaf() {
                set.extend(self.leaf_voxels(id).map(Voxel::record));
            }
            VisitStatus::Continue
        });

        set
    }
}

pub trait SvoVisitor {
    fn visit_node(&mut self, id: NodeId, node: &SvoNode) -> VisitStatus;
}

impl<F> SvoVisitor for F
where
    F: FnMut(NodeId, &SvoNode) -> VisitStatus,
{
    #[inline]
    fn visit_node(&mut self, id: NodeId, node: &SvoNode) -> VisitStatus {
        (self)(id, node)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitStatus {
    /// Continue traversing this branch.
    Continue,
    /// Stop traversing this branch.
    Stop,
    /// Stop traversing the entire tree. No further nodes will be visited.
    ExitEarly,
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

    fn constructed(config: SvoConfig) -> Svo {
        let mut svo = Svo::new(config).unwrap();
        svo.construct_octree().unwrap();

        svo
    }

    #[test]
    fn depth_is_ceil_log2_of_size_ratio() {
        for &(root_size, min_voxel_size, expected_depth) in [
            (1.0, 1.0, 0),
            (1.0, 2.0, 0),
            (1.0, 0.5, 1),
            (1.0, 0.3, 2),
            (1.0, 0.25, 2),
            (1.0, 0.1, 4),
            (1.0, 0.01, 7),
            (16.0, 1.0, 4),
            (10.0, 1.0, 4),
        ]
        .iter()
        {
            let config = SvoConfig::default()
                .with_root_size(root_size)
                .with_min_voxel_size(min_voxel_size);
            assert_eq!(config.depth(), Ok(expected_depth), "{:?}", config);
        }
    }

    #[test]
    fn construct_builds_complete_tree() {
        let svo = constructed(SvoConfig::default().with_min_voxel_size(0.1));

        assert_eq!(svo.depth(), 4);
        assert_eq!(svo.node_count(), complete_node_count(4));
        assert_eq!(svo.node_count(), 1 + 8 + 64 + 512 + 4096);
        assert_eq!(svo.leaf_count(), 4096);
    }

    #[test]
    fn every_leaf_is_at_max_depth_and_min_size() {
        let config = SvoConfig::default()
            .with_root_size(2.0)
            .with_min_voxel_size(0.3);
        let svo = constructed(config);
        let depth = svo.depth();
        let leaf_size = 2.0 / 2f32.powi(depth as i32);
        assert!(leaf_size <= 0.3);

        let mut leaves = 0;
        svo.visit(&mut |_id: NodeId, node: &SvoNode| {
            if node.is_leaf() {
                assert_eq!(node.depth(), depth);
                assert_eq!(node.voxel().size, leaf_size);
                leaves += 1;
            }
            VisitStatus::Continue
        });
        assert_eq!(leaves, 8usize.pow(depth as u32));
    }

    #[test]
    fn children_partition_parent() {
        let svo = constructed(
            SvoConfig::default()
                .with_position(PointN([1.0, -2.0, 0.5]))
                .with_color(PointN([0.2, 0.4, 0.6]))
                .with_min_voxel_size(0.2),
        );

        svo.visit(&mut |id: NodeId, node: &SvoNode| {
            let children = match svo.children(id) {
                Some(c) => c,
                None => return VisitStatus::Continue,
            };
            let parent = node.voxel();

            let mut min = parent.max();
            let mut max = parent.min();
            for (i, child_id) in children.iter().enumerate() {
                let child = svo.node(*child_id).unwrap();
                let voxel = child.voxel();
                assert_eq!(child.depth(), node.depth() + 1);
                assert_eq!(voxel.size, parent.size / 2.0);
                assert_eq!(voxel.color, parent.color);
                assert!(parent.contains(voxel));

                let offset = voxel.position - parent.position;
                let quarter = parent.size / 4.0;
                for axis in Axis3::ALL.iter() {
                    let positive = i & (1 << axis.index()) != 0;
                    let expected = if positive { quarter } else { -quarter };
                    assert_eq!(offset.axis_component(*axis), expected);
                }

                min = min.map_components_binary(&voxel.min(), f32::min);
                max = max.map_components_binary(&voxel.max(), f32::max);
            }
            // Union of the children is the parent.
            assert_eq!(min, parent.min());
            assert_eq!(max, parent.max());

            VisitStatus::Continue
        });
    }

    #[test]
    fn invalid_configs_are_rejected() {
        for &min_voxel_size in [0.0, -1.0, f32::NAN, f32::INFINITY].iter() {
            assert!(matches!(
                Svo::new(SvoConfig::default().with_min_voxel_size(min_voxel_size)),
                Err(SvoError::InvalidMinVoxelSize(_))
            ));
        }
        assert!(matches!(
            Svo::new(SvoConfig::default().with_root_size(0.0)),
            Err(SvoError::InvalidRootSize(_))
        ));
        assert!(matches!(
            Svo::new(SvoConfig::default().with_position(PointN([f32::NAN, 0.0, 0.0]))),
            Err(SvoError::NonFinitePosition(_))
        ));
        assert_eq!(
            SvoConfig::default().with_min_voxel_size(1e-6).depth(),
            Err(SvoError::TooDeep {
                depth: MAX_DEPTH + 1,
                max_depth: MAX_DEPTH
            })
        );
    }

    #[test]
    fn depth_cap_applies_to_the_ratio_of_root_to_min_size() {
        let big_root = SvoConfig::default().with_root_size(16.0);

        assert_eq!(big_root.with_min_voxel_size(16.0 / 256.0).depth(), Ok(MAX_DEPTH));
        assert_eq!(
            big_root.with_min_voxel_size(0.01).depth(),
            Err(SvoError::TooDeep {
                depth: MAX_DEPTH + 1,
                max_depth: MAX_DEPTH
            })
        );
        assert!(Svo::new(big_root.with_min_voxel_size(0.01)).is_err());
    }

    #[test]
    fn subdivide_is_one_way() {
        let mut svo = Svo::new(SvoConfig::default()).unwrap();
        let root = svo.root();

        assert!(svo.is_leaf(root));
        svo.subdivide_node(root).unwrap();
        assert!(!svo.is_leaf(root));
        assert_eq!(svo.node_count(), 9);
        assert_eq!(svo.subdivide_node(root), Err(SvoError::NotALeaf(root)));
        assert_eq!(
            svo.subdivide_node(NodeId(100)),
            Err(SvoError::UnknownNode(NodeId(100)))
        );
    }

    #[test]
    fn subdivide_stops_at_max_depth() {
        let mut svo = Svo::new(SvoConfig::default()).unwrap();
        let mut id = svo.root();
        for _ in 0..MAX_DEPTH {
            svo.subdivide_node(id).unwrap();
            id = svo.children(id).unwrap()[0];
        }

        assert_eq!(svo.node(id).unwrap().depth(), MAX_DEPTH);
        assert_eq!(
            svo.subdivide_node(id),
            Err(SvoError::TooDeep {
                depth: MAX_DEPTH + 1,
                max_depth: MAX_DEPTH
            })
        );
    }

    #[test]
    fn construct_is_idempotent() {
        let mut svo = constructed(SvoConfig::default().with_min_voxel_size(0.2));
        let count = svo.node_count();
        svo.construct_octree().unwrap();

        assert_eq!(svo.node_count(), count);
    }

    #[test]
    fn single_node_tree() {
        let svo = constructed(SvoConfig::default().with_min_voxel_size(1.0));

        assert_eq!(svo.node_count(), 1);
        assert!(svo.is_leaf(svo.root()));
        assert_eq!(svo.leaf_voxels(svo.root()).count(), 1);
    }

    #[test]
    fn leaf_holds_up_to_eight_voxels() {
        let mut svo = Svo::new(SvoConfig::default()).unwrap();
        let root = svo.root();
        let small = Voxel::new(PointN([0.25, 0.25, 0.25]), Point3f::ZERO, 0.5);

        for _ in 1..LEAF_VOXEL_SLOTS {
            svo.insert_leaf_voxel(root, small).unwrap();
        }
        assert_eq!(svo.insert_leaf_voxel(root, small), Err(SvoError::LeafFull(root)));
        assert_eq!(svo.leaf_voxels(root).count(), LEAF_VOXEL_SLOTS);

        svo.subdivide_node(root).unwrap();
        assert_eq!(svo.leaf_voxels(root).count(), 0);
        assert_eq!(svo.insert_leaf_voxel(root, small), Err(SvoError::NotALeaf(root)));
    }

    #[test]
    fn voxel_outside_leaf_is_rejected() {
        let mut svo = Svo::new(SvoConfig::default()).unwrap();
        let root = svo.root();
        let outside = Voxel::new(PointN([0.5, 0.0, 0.0]), Point3f::ZERO, 0.5);

        assert_eq!(
            svo.insert_leaf_voxel(root, outside),
            Err(SvoError::OutsideLeaf(root))
        );
    }

    #[test]
    fn visit_can_stop_and_exit_early() {
        let svo = constructed(SvoConfig::default().with_min_voxel_size(0.3));

        // Stopping at the root's children visits only depth 0 and 1.
        let mut visited = 0;
        svo.visit(&mut |_id: NodeId, node: &SvoNode| {
            visited += 1;
            if node.depth() == 1 {
                VisitStatus::Stop
            } else {
                VisitStatus::Continue
            }
        });
        assert_eq!(visited, 9);

        let mut visited = 0;
        let status = svo.visit(&mut |_id: NodeId, _node: &SvoNode| {
            visited += 1;
            if visited == 5 {
                VisitStatus::ExitEarly
            } else {
                VisitStatus::Continue
            }
        });
        assert_eq!(status, VisitStatus::ExitEarly);
        assert_eq!(visited, 5);
    }

    #[test]
    fn leaf_voxel_set_has_one_record_per_leaf() {
        let svo = constructed(SvoConfig::default().with_min_voxel_size(0.2));
        let set = svo.leaf_voxel_set();

        assert_eq!(set.len(), svo.leaf_count());
        assert!(set.contains(PointN([0.4375, 0.4375, 0.4375])));
    }
}

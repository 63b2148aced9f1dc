//! Voxel records and the deduplicated sets of them that ray queries produce.
//!
//! A `VoxelRecord`'s identity is its position. The color is payload, so two records at the same position are the same
//! voxel, even if their colors differ:
//!
//! ```
//! use voxtrace_core::prelude::*;
//! use voxtrace_storage::prelude::*;
//!
//! let mut hits = VoxelSet::default();
//! assert!(hits.insert(VoxelRecord::new(PointN([3.0, 3.0, 3.0]), PointN([1.0, 0.0, 0.0]))));
//! assert!(!hits.insert(VoxelRecord::new(PointN([3.0, 3.0, 3.0]), PointN([0.0, 1.0, 0.0]))));
//!
//! assert_eq!(hits.len(), 1);
//! // The first record wins.
//! assert_eq!(hits.get(PointN([3.0, 3.0, 3.0])).unwrap().color, PointN([1.0, 0.0, 0.0]));
//! ```

use crate::SmallKeyHashSet;

use voxtrace_core::prelude::*;

use core::hash::{Hash, Hasher};

/// A voxel at `position` with some `color`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct VoxelRecord {
    pub position: Point3f,
    pub color: Point3f,
}

impl VoxelRecord {
    #[inline]
    pub fn new(position: Point3f, color: Point3f) -> Self {
        Self { position, color }
    }

    /// The bit pattern that identifies this record. `-0.0` and `0.0` are the same position.
    #[inline]
    pub fn position_key(&self) -> [u32; 3] {
        position_key(self.position)
    }
}

#[inline]
fn position_key(p: Point3f) -> [u32; 3] {
    // Adding 0.0 turns -0.0 into 0.0 and leaves everything else alone.
    [
        (p.x() + 0.0).to_bits(),
        (p.y() + 0.0).to_bits(),
        (p.z() + 0.0).to_bits(),
    ]
}

impl PartialEq for VoxelRecord {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.position_key() == other.position_key()
    }
}

impl Eq for VoxelRecord {}

impl Hash for VoxelRecord {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position_key().hash(state);
    }
}

/// An unordered collection of `VoxelRecord`s, deduplicated by position.
///
/// This is what one tick of ray queries hands to a renderer. Nothing about iteration order or size is stable across
/// ticks.
#[derive(Clone, Debug, Default)]
pub struct VoxelSet {
    records: SmallKeyHashSet<VoxelRecord>,
}

impl VoxelSet {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: SmallKeyHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts `record` unless a record with the same position is already present. Returns `true` iff it was inserted.
    #[inline]
    pub fn insert(&mut self, record: VoxelRecord) -> bool {
        self.records.insert(record)
    }

    #[inline]
    pub fn contains(&self, position: Point3f) -> bool {
        self.records.contains(&Self::lookup_key(position))
    }

    #[inline]
    pub fn get(&self, position: Point3f) -> Option<&VoxelRecord> {
        self.records.get(&Self::lookup_key(position))
    }

    #[inline]
    pub fn remove(&mut self, position: Point3f) -> Option<VoxelRecord> {
        self.records.take(&Self::lookup_key(position))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &VoxelRecord> {
        self.records.iter()
    }

    // Color doesn't participate in lookups.
    #[inline]
    fn lookup_key(position: Point3f) -> VoxelRecord {
        VoxelRecord::new(position, Point3f::ZERO)
    }
}

impl Extend<VoxelRecord> for VoxelSet {
    #[inline]
    fn extend<I: IntoIterator<Item = VoxelRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl core::iter::FromIterator<VoxelRecord> for VoxelSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = VoxelRecord>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);

        set
    }
}

impl IntoIterator for VoxelSet {
    type Item = VoxelRecord;
    type IntoIter = std::collections::hash_set::IntoIter<VoxelRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a VoxelSet {
    type Item = &'a VoxelRecord;
    type IntoIter = std::collections::hash_set::Iter<'a, VoxelRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

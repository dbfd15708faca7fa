//! Membership set contracts and the hash-based reference sets
//!
//! The search keeps two kinds of membership: which separations are already used
//! by the placed pegs, and which cells are occupied or ruled out. Both contracts
//! have a hash-backed implementation here, used as a correctness oracle, and a
//! bit-packed implementation in [`crate::algorithm::bitset`] used on the hot path.

use crate::algorithm::bitset::{BitPointSet, BitSeparationSet};
use crate::spatial::grid::{Placements, Point, separation};
use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;
use std::iter::Copied;

/// Set of squared distances between placed pegs
///
/// Values must not exceed [`crate::spatial::grid::MAX_SEPARATION`]; callers keep
/// values in range rather than the set checking them.
pub trait SeparationSet: Clone + Default + fmt::Debug + Send {
    /// Allocation-free iterator over members
    type Iter<'a>: Iterator<Item = u16>
    where
        Self: 'a;

    /// Build a set holding every pairwise separation of the placements
    fn from_placements(placements: &[Point]) -> Self {
        let mut set = Self::default();
        for (i, &p1) in placements.iter().enumerate() {
            for &p2 in placements.iter().skip(i + 1) {
                set.insert(separation(p1, p2));
            }
        }
        set
    }

    /// Test membership
    fn contains(&self, sep: u16) -> bool;

    /// Insert a separation
    fn insert(&mut self, sep: u16);

    /// Remove every member
    fn clear(&mut self);

    /// Iterate members without allocating
    fn iter(&self) -> Self::Iter<'_>;

    /// Replace this set's contents with another's, reusing this set's storage
    fn clone_from_set<O: SeparationSet>(&mut self, other: &O) {
        self.clear();
        self.union_with(other);
    }

    /// Add every member of another set
    fn union_with<O: SeparationSet>(&mut self, other: &O) {
        for sep in other.iter() {
            self.insert(sep);
        }
    }

    /// Snapshot of the members, in no particular order
    fn elements(&self) -> Vec<u16> {
        self.iter().collect()
    }

    /// Number of members
    fn len(&self) -> usize {
        self.iter().count()
    }

    /// Test whether the set has no members
    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Bit-packed view of this set, when it has one
    fn as_bits(&self) -> Option<&BitSeparationSet> {
        None
    }
}

/// Set of grid cells
///
/// Points must lie on a grid no larger than [`crate::spatial::grid::MAX_GRID_SIZE`].
pub trait PointSet: Clone + Default + fmt::Debug + Send {
    /// Allocation-free iterator over members
    type Iter<'a>: Iterator<Item = Point>
    where
        Self: 'a;

    /// Build a set holding the placed points
    fn from_placements(placements: &[Point]) -> Self {
        let mut set = Self::default();
        for &point in placements {
            set.insert(point);
        }
        set
    }

    /// Test membership
    fn contains(&self, point: Point) -> bool;

    /// Insert a point
    fn insert(&mut self, point: Point);

    /// Remove every member
    fn clear(&mut self);

    /// Iterate members without allocating
    fn iter(&self) -> Self::Iter<'_>;

    /// Replace this set's contents with another's, reusing this set's storage
    fn clone_from_set<O: PointSet>(&mut self, other: &O) {
        self.clear();
        self.union_with(other);
    }

    /// Add every member of another set
    fn union_with<O: PointSet>(&mut self, other: &O) {
        for point in other.iter() {
            self.insert(point);
        }
    }

    /// Snapshot of the members, in no particular order
    fn elements(&self) -> Placements {
        self.iter().collect()
    }

    /// Number of members
    fn len(&self) -> usize {
        self.iter().count()
    }

    /// Test whether the set has no members
    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Bit-packed view of this set, when it has one
    fn as_bits(&self) -> Option<&BitPointSet> {
        None
    }
}

/// Hash-backed separation set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashSeparationSet {
    members: HashSet<u16>,
}

impl SeparationSet for HashSeparationSet {
    type Iter<'a> = Copied<hash_set::Iter<'a, u16>>;

    fn contains(&self, sep: u16) -> bool {
        self.members.contains(&sep)
    }

    fn insert(&mut self, sep: u16) {
        self.members.insert(sep);
    }

    fn clear(&mut self) {
        self.members.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.members.iter().copied()
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// Hash-backed point set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashPointSet {
    members: HashSet<Point>,
}

impl PointSet for HashPointSet {
    type Iter<'a> = Copied<hash_set::Iter<'a, Point>>;

    fn contains(&self, point: Point) -> bool {
        self.members.contains(&point)
    }

    fn insert(&mut self, point: Point) {
        self.members.insert(point);
    }

    fn clear(&mut self) {
        self.members.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.members.iter().copied()
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

use crate::algorithm::sets::{PointSet, SeparationSet};
use crate::spatial::grid::{MAX_CELLS, MAX_GRID_SIZE, MAX_SEPARATION, Point};
use bitvec::prelude::*;
use bitvec::slice::IterOnes;
use std::fmt;
use std::iter::Map;

const SEPARATION_CAPACITY: usize = MAX_SEPARATION as usize + 1;
const ROW_STRIDE: usize = MAX_GRID_SIZE as usize;

type SeparationBits = BitArr!(for SEPARATION_CAPACITY, in u64, Lsb0);
type PointBits = BitArr!(for MAX_CELLS, in u64, Lsb0);

/// Fixed-size bitset of separations, one bit per squared distance
///
/// Sized for the largest separation on a maximum sized grid, so it never
/// allocates. Copies and unions with another bitset run over whole words.
#[derive(Clone, Default)]
pub struct BitSeparationSet {
    bits: SeparationBits,
}

/// Fixed-size bitset of grid cells, indexed by packed row and column
///
/// Members iterate in row-major order.
#[derive(Clone, Default)]
pub struct BitPointSet {
    bits: PointBits,
}

const fn point_index(point: Point) -> usize {
    point.row as usize * ROW_STRIDE + point.col as usize
}

const fn index_point(index: usize) -> Point {
    Point::new((index / ROW_STRIDE) as u8, (index % ROW_STRIDE) as u8)
}

const fn index_separation(index: usize) -> u16 {
    index as u16
}

fn or_words(dst: &mut [u64], src: &[u64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d |= *s;
    }
}

impl BitSeparationSet {
    /// Create a set with no separations present
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeparationSet for BitSeparationSet {
    type Iter<'a> = Map<IterOnes<'a, u64, Lsb0>, fn(usize) -> u16>;

    fn contains(&self, sep: u16) -> bool {
        self.bits.get(sep as usize).as_deref() == Some(&true)
    }

    fn insert(&mut self, sep: u16) {
        if let Some(mut bit) = self.bits.get_mut(sep as usize) {
            *bit = true;
        }
    }

    fn clear(&mut self) {
        self.bits.as_raw_mut_slice().fill(0);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.bits.iter_ones().map(index_separation as fn(usize) -> u16)
    }

    fn clone_from_set<O: SeparationSet>(&mut self, other: &O) {
        if let Some(bits) = other.as_bits() {
            self.bits
                .as_raw_mut_slice()
                .copy_from_slice(bits.bits.as_raw_slice());
        } else {
            self.clear();
            for sep in other.iter() {
                self.insert(sep);
            }
        }
    }

    fn union_with<O: SeparationSet>(&mut self, other: &O) {
        if let Some(bits) = other.as_bits() {
            or_words(self.bits.as_raw_mut_slice(), bits.bits.as_raw_slice());
        } else {
            for sep in other.iter() {
                self.insert(sep);
            }
        }
    }

    fn len(&self) -> usize {
        self.bits.count_ones()
    }

    fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    fn as_bits(&self) -> Option<&BitSeparationSet> {
        Some(self)
    }
}

impl PartialEq for BitSeparationSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.as_raw_slice() == other.bits.as_raw_slice()
    }
}

impl Eq for BitSeparationSet {}

impl fmt::Debug for BitSeparationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitPointSet {
    /// Create a set with no points present
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointSet for BitPointSet {
    type Iter<'a> = Map<IterOnes<'a, u64, Lsb0>, fn(usize) -> Point>;

    fn contains(&self, point: Point) -> bool {
        self.bits.get(point_index(point)).as_deref() == Some(&true)
    }

    fn insert(&mut self, point: Point) {
        if let Some(mut bit) = self.bits.get_mut(point_index(point)) {
            *bit = true;
        }
    }

    fn clear(&mut self) {
        self.bits.as_raw_mut_slice().fill(0);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.bits.iter_ones().map(index_point as fn(usize) -> Point)
    }

    fn clone_from_set<O: PointSet>(&mut self, other: &O) {
        if let Some(bits) = other.as_bits() {
            self.bits
                .as_raw_mut_slice()
                .copy_from_slice(bits.bits.as_raw_slice());
        } else {
            self.clear();
            for point in other.iter() {
                self.insert(point);
            }
        }
    }

    fn union_with<O: PointSet>(&mut self, other: &O) {
        if let Some(bits) = other.as_bits() {
            or_words(self.bits.as_raw_mut_slice(), bits.bits.as_raw_slice());
        } else {
            for point in other.iter() {
                self.insert(point);
            }
        }
    }

    fn len(&self) -> usize {
        self.bits.count_ones()
    }

    fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    fn as_bits(&self) -> Option<&BitPointSet> {
        Some(self)
    }
}

impl PartialEq for BitPointSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.as_raw_slice() == other.bits.as_raw_slice()
    }
}

impl Eq for BitPointSet {}

impl fmt::Debug for BitPointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for BitPointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitPointSet({} points: {:?})", self.len(), self)
    }
}

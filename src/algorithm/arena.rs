//! Preallocated placers
//!
//! A search never holds more than N+1 states for an N×N grid, and it backtracks
//! constantly, so these placers allocate one frame per depth up front and overwrite
//! frames in place. Frames are linked parent to child by index.
//!
//! What differs between the variants is how a child frame is derived from its
//! parent, captured by [`PruningStrategy`]:
//! - [`NoPruning`] only tracks separations,
//! - [`BatchPruning`] rules out cells once per placement after all new separations
//!   are known,
//! - [`OpportunisticPruning`] rules out cells eagerly for each new pair.

use crate::algorithm::bitset::{BitPointSet, BitSeparationSet};
use crate::algorithm::placer::{
    ConstraintViolation, Seed, StonePlacer, StonePlacerConstructor, extend_separations,
    plant_seed,
};
use crate::algorithm::pruner::Pruner;
use crate::algorithm::sets::{PointSet, SeparationSet};
use crate::io::error::Result;
use crate::spatial::grid::{Grid, MAX_GRID_SIZE, Placements, Point, separation};
use std::marker::PhantomData;
use std::sync::Arc;

/// One preallocated search state
#[derive(Clone, Debug)]
pub struct ArenaFrame {
    stones: Placements,
    separations: BitSeparationSet,
    pruned: BitPointSet,
    cursor: Point,
    parent: Option<usize>,
    next: Option<usize>,
}

impl ArenaFrame {
    /// Pegs placed in this frame
    pub fn stones(&self) -> &[Point] {
        &self.stones
    }

    /// Separations used by this frame's pegs
    pub const fn separations(&self) -> &BitSeparationSet {
        &self.separations
    }

    /// Cells ruled out for this frame's next peg
    pub const fn pruned(&self) -> &BitPointSet {
        &self.pruned
    }
}

/// Rule for deriving a child frame from its parent
pub trait PruningStrategy: Send {
    /// Build for a grid
    fn for_grid(grid: Grid) -> Self;

    /// Fill `child` with the parent's state plus a peg at `candidate`
    ///
    /// Stones and cursor are handled by the placer; the strategy sets the child's
    /// separations and pruned cells.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint if the candidate repeats a separation
    fn extend(
        &self,
        parent: &ArenaFrame,
        child: &mut ArenaFrame,
        candidate: Point,
    ) -> std::result::Result<(), ConstraintViolation>;
}

/// Separation tracking only
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPruning;

impl PruningStrategy for NoPruning {
    fn for_grid(_grid: Grid) -> Self {
        Self
    }

    fn extend(
        &self,
        parent: &ArenaFrame,
        child: &mut ArenaFrame,
        candidate: Point,
    ) -> std::result::Result<(), ConstraintViolation> {
        child.separations.clone_from_set(&parent.separations);
        extend_separations(
            &mut child.separations,
            parent.stones.iter().copied(),
            candidate,
        )
    }
}

/// Prune after each placement, once every new separation is known
///
/// Rules out the apexes of isosceles triangles over each new pair, circles of
/// every new separation around every earlier peg, and circles of every separation
/// around the new peg.
pub struct BatchPruning<P> {
    pruner: Arc<P>,
}

impl<P: Pruner> PruningStrategy for BatchPruning<P> {
    fn for_grid(grid: Grid) -> Self {
        Self {
            pruner: P::for_grid(grid),
        }
    }

    fn extend(
        &self,
        parent: &ArenaFrame,
        child: &mut ArenaFrame,
        candidate: Point,
    ) -> std::result::Result<(), ConstraintViolation> {
        child.separations.clone_from_set(&parent.separations);
        child.pruned.clone_from_set(&parent.pruned);

        let mut new_separations = [0u16; MAX_GRID_SIZE as usize];
        for (slot, &stone) in new_separations.iter_mut().zip(&parent.stones) {
            let sep = separation(candidate, stone);
            if child.separations.contains(sep) {
                return Err(ConstraintViolation::DuplicateSeparation {
                    point: candidate,
                    separation: sep,
                });
            }
            child.separations.insert(sep);
            *slot = sep;
            self.pruner
                .prune_isosceles(&mut child.pruned, stone, candidate);
        }

        for &sep in new_separations.iter().take(parent.stones.len()) {
            for &stone in &parent.stones {
                self.pruner.prune_circles(&mut child.pruned, stone, sep);
            }
        }

        for sep in child.separations.iter() {
            self.pruner.prune_circles(&mut child.pruned, candidate, sep);
        }
        Ok(())
    }
}

/// Prune eagerly for each new pair
///
/// Only the circles around the two pegs of each new pair are ruled out, which
/// misses some cells the batched strategy catches; the separation check still
/// rejects those when they are tried.
pub struct OpportunisticPruning<P> {
    pruner: Arc<P>,
}

impl<P: Pruner> PruningStrategy for OpportunisticPruning<P> {
    fn for_grid(grid: Grid) -> Self {
        Self {
            pruner: P::for_grid(grid),
        }
    }

    fn extend(
        &self,
        parent: &ArenaFrame,
        child: &mut ArenaFrame,
        candidate: Point,
    ) -> std::result::Result<(), ConstraintViolation> {
        child.separations.clone_from_set(&parent.separations);
        child.pruned.clone_from_set(&parent.pruned);

        for &stone in &parent.stones {
            let sep = separation(candidate, stone);
            if child.separations.contains(sep) {
                return Err(ConstraintViolation::DuplicateSeparation {
                    point: candidate,
                    separation: sep,
                });
            }
            child.separations.insert(sep);
            self.pruner
                .prune_isosceles(&mut child.pruned, stone, candidate);
            self.pruner.prune_circles(&mut child.pruned, stone, sep);
            self.pruner.prune_circles(&mut child.pruned, candidate, sep);
        }
        Ok(())
    }
}

/// Canonically ordered placer over a preallocated arena of frames
pub struct ArenaPlacer<K> {
    grid: Grid,
    strategy: K,
    frames: Vec<ArenaFrame>,
    active: usize,
    root: usize,
}

/// Arena placer without pruning
pub type OrderedArenaPlacer = ArenaPlacer<NoPruning>;

/// Arena placer with batched pruning
pub type PruningArenaPlacer<P> = ArenaPlacer<BatchPruning<P>>;

/// Arena placer with per-pair pruning
pub type OpportunisticArenaPlacer<P> = ArenaPlacer<OpportunisticPruning<P>>;

// Advance from `cursor` to the first cell not ruled out, possibly leaving the grid.
fn next_open(grid: Grid, pruned: &BitPointSet, mut cursor: Point) -> Point {
    while grid.contains(cursor) && pruned.contains(cursor) {
        cursor = grid.advance(cursor);
    }
    cursor
}

impl<K: PruningStrategy> ArenaPlacer<K> {
    /// Allocate frames for every depth and place the seed's pegs
    ///
    /// # Errors
    ///
    /// Returns [`crate::io::error::SearchError::InvalidSeed`] if the seed breaks a
    /// placement rule, including landing on a pruned cell
    pub fn new(grid: Grid, strategy: K, seed: &Seed) -> Result<Self> {
        let depth = grid.size() as usize;
        let frames = (0..=depth)
            .map(|i| ArenaFrame {
                stones: Vec::with_capacity(depth),
                separations: BitSeparationSet::new(),
                pruned: BitPointSet::new(),
                cursor: Point::ORIGIN,
                parent: i.checked_sub(1),
                next: (i < depth).then_some(i + 1),
            })
            .collect();

        let mut placer = Self {
            grid,
            strategy,
            frames,
            active: 0,
            root: 0,
        };
        plant_seed(&mut placer, seed)?;
        Ok(placer)
    }

    /// Frame currently being searched
    pub fn active_frame(&self) -> Option<&ArenaFrame> {
        self.frames.get(self.active)
    }

    /// Number of preallocated frames
    pub const fn capacity(&self) -> usize {
        self.frames.len()
    }

    fn parent_index(&self) -> Option<usize> {
        if self.active <= self.root {
            return None;
        }
        self.active_frame().and_then(|frame| frame.parent)
    }
}

impl<K: PruningStrategy> StonePlacer for ArenaPlacer<K> {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn placements(&self) -> &[Point] {
        self.active_frame().map_or(&[], |frame| &frame.stones)
    }

    fn cursor(&self) -> Point {
        self.active_frame()
            .map_or_else(|| self.grid.end(), |frame| frame.cursor)
    }

    fn place(&mut self) -> std::result::Result<(), ConstraintViolation> {
        let grid = self.grid;
        let active = self.active;
        let Some(frame) = self.frames.get_mut(active) else {
            return Err(ConstraintViolation::OutOfBounds(grid.end()));
        };
        let candidate = frame.cursor;
        if !grid.contains(candidate) {
            return Err(ConstraintViolation::OutOfBounds(candidate));
        }
        // Children always sit after their parent in the arena.
        let Some(next) = frame.next.filter(|&next| next > active) else {
            frame.cursor = grid.end();
            return Err(ConstraintViolation::OutOfBounds(candidate));
        };

        let (head, tail) = self.frames.split_at_mut(next);
        let (Some(parent), Some(child)) = (head.get_mut(active), tail.first_mut()) else {
            return Err(ConstraintViolation::OutOfBounds(candidate));
        };
        parent.cursor = next_open(grid, &parent.pruned, grid.advance(candidate));

        self.strategy.extend(parent, child, candidate)?;

        child.stones.clear();
        child.stones.extend_from_slice(&parent.stones);
        child.stones.push(candidate);
        child.cursor = next_open(grid, &child.pruned, grid.advance(candidate));
        self.active = next;
        Ok(())
    }

    fn place_at(&mut self, point: Point) -> std::result::Result<(), ConstraintViolation> {
        if !self.grid.contains(point) {
            return Err(ConstraintViolation::OutOfBounds(point));
        }
        let Some(frame) = self.frames.get_mut(self.active) else {
            return Err(ConstraintViolation::OutOfBounds(point));
        };
        if let Some(&last) = frame.stones.last()
            && point <= last
        {
            return Err(ConstraintViolation::OutOfOrder { point, last });
        }
        if frame.pruned.contains(point) {
            return Err(ConstraintViolation::Pruned(point));
        }
        frame.cursor = point;
        self.place()
    }

    fn seek(&mut self, cursor: Point) -> std::result::Result<(), ConstraintViolation> {
        let grid = self.grid;
        let Some(frame) = self.frames.get_mut(self.active) else {
            return Err(ConstraintViolation::OutOfBounds(cursor));
        };
        if let Some(&last) = frame.stones.last()
            && cursor <= last
        {
            return Err(ConstraintViolation::OutOfOrder {
                point: cursor,
                last,
            });
        }
        frame.cursor = next_open(grid, &frame.pruned, cursor);
        Ok(())
    }

    fn pin_root(&mut self) {
        self.root = self.active;
    }

    fn backtrack(&mut self) -> bool {
        match self.parent_index() {
            Some(parent) => {
                self.active = parent;
                true
            }
            None => false,
        }
    }

    fn hand_off_parent(&mut self, seed: &mut Seed) -> bool {
        let grid = self.grid;
        let Some(frame) = self
            .parent_index()
            .and_then(|parent| self.frames.get_mut(parent))
        else {
            return false;
        };
        if !grid.contains(frame.cursor) {
            return false;
        }
        seed.fill(&frame.stones, frame.cursor);
        frame.cursor = grid.end();
        true
    }
}

/// Builds arena placers using pruning strategy `K`
pub struct ArenaConstructor<K> {
    _strategy: PhantomData<fn() -> K>,
}

/// Builds [`OrderedArenaPlacer`]s
pub type OrderedArenaConstructor = ArenaConstructor<NoPruning>;

/// Builds [`PruningArenaPlacer`]s using pruner `P`
pub type PruningArenaConstructor<P> = ArenaConstructor<BatchPruning<P>>;

/// Builds [`OpportunisticArenaPlacer`]s using pruner `P`
pub type OpportunisticArenaConstructor<P> = ArenaConstructor<OpportunisticPruning<P>>;

impl<K> ArenaConstructor<K> {
    /// Create the constructor
    pub const fn new() -> Self {
        Self {
            _strategy: PhantomData,
        }
    }
}

impl<K> Default for ArenaConstructor<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PruningStrategy> StonePlacerConstructor for ArenaConstructor<K> {
    type Placer = ArenaPlacer<K>;

    fn construct(&self, grid: Grid, seed: &Seed) -> Result<Self::Placer> {
        ArenaPlacer::new(grid, K::for_grid(grid), seed)
    }
}

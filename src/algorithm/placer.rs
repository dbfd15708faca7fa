//! Placement state machines
//!
//! A placer holds a stack of partial placements. Only the top of the stack is
//! active: [`StonePlacer::place`] tries the active state's cursor cell and, on
//! success, pushes a child state holding one more peg; [`StonePlacer::backtrack`]
//! discards the active state. States below the top are never modified except for
//! their cursor, which only moves forward.
//!
//! The variants here allocate a fresh state on every successful placement. The
//! preallocated variants live in [`crate::algorithm::arena`].

use crate::algorithm::sets::{PointSet, SeparationSet};
use crate::io::error::{Result, SearchError};
use crate::spatial::grid::{Grid, Placements, Point, separation};
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// Why a peg could not be placed
///
/// Violations are the normal way a search step fails; they tell the search to try
/// the next cursor position and are never fatal on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Placing the peg would repeat a separation already in use
    DuplicateSeparation {
        /// Cell that was tried
        point: Point,
        /// Separation that would repeat
        separation: u16,
    },
    /// The peg is not strictly after the last placed peg in row-major order
    OutOfOrder {
        /// Cell that was tried
        point: Point,
        /// Most recently placed peg
        last: Point,
    },
    /// The cell has already been ruled out by pruning
    Pruned(Point),
    /// The cell already holds a peg
    Occupied(Point),
    /// The cell is not on the grid, or the state has no room for another peg
    OutOfBounds(Point),
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSeparation { point, separation } => write!(
                f,
                "cannot place peg at {point}, squared distance {separation} is already used"
            ),
            Self::OutOfOrder { point, last } => write!(
                f,
                "cannot place peg at {point}, ordering constraint violated with peg at {last}"
            ),
            Self::Pruned(point) => write!(f, "cannot place peg at {point}, cell is pruned"),
            Self::Occupied(point) => write!(f, "cannot place peg at {point}, cell is occupied"),
            Self::OutOfBounds(point) => write!(f, "cannot place peg at {point}, out of bounds"),
        }
    }
}

impl std::error::Error for ConstraintViolation {}

/// Starting state for a search: pegs already placed and where to look next
///
/// A seed without a cursor starts at the first admissible cell. Seeds double as
/// the reusable buffers that carry work between parallel searchers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seed {
    /// Pegs placed before the search starts
    pub placements: Placements,
    /// First cell the search should try
    pub cursor: Option<Point>,
}

impl Seed {
    /// Seed with the given pegs, starting at the first admissible cell
    pub const fn new(placements: Placements) -> Self {
        Self {
            placements,
            cursor: None,
        }
    }

    /// Seed with the given pegs, starting at `cursor`
    pub const fn with_cursor(placements: Placements, cursor: Point) -> Self {
        Self {
            placements,
            cursor: Some(cursor),
        }
    }

    /// Empty seed whose buffer can hold `capacity` pegs without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            placements: Vec::with_capacity(capacity),
            cursor: None,
        }
    }

    /// Overwrite this seed in place, reusing its buffer
    pub fn fill(&mut self, placements: &[Point], cursor: Point) {
        self.placements.clear();
        self.placements.extend_from_slice(placements);
        self.cursor = Some(cursor);
    }
}

impl From<Placements> for Seed {
    fn from(placements: Placements) -> Self {
        Self::new(placements)
    }
}

/// Depth-first placement state machine
pub trait StonePlacer: Send {
    /// Grid pegs are placed onto
    fn grid(&self) -> Grid;

    /// Pegs placed in the active state
    fn placements(&self) -> &[Point];

    /// Next cell the active state will try
    fn cursor(&self) -> Point;

    /// Attempt to place a peg at the active state's cursor
    ///
    /// The cursor always moves past the tried cell. On success a child state with
    /// the new peg becomes active.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint; the active state is unchanged apart from
    /// its cursor
    fn place(&mut self) -> std::result::Result<(), ConstraintViolation>;

    /// Move the active state's cursor to `point` and place a peg there
    ///
    /// # Errors
    ///
    /// Returns the violated constraint, including placements that break the
    /// placer's ordering or pruning rules
    fn place_at(&mut self, point: Point) -> std::result::Result<(), ConstraintViolation>;

    /// Reposition the active state's cursor at the first admissible cell from `cursor`
    ///
    /// # Errors
    ///
    /// Returns a violation if the cursor lies before a cell the placer may use
    fn seek(&mut self, cursor: Point) -> std::result::Result<(), ConstraintViolation>;

    /// Make the active state the root that [`Self::backtrack`] never discards
    fn pin_root(&mut self);

    /// Discard the active state, making its parent active
    ///
    /// Returns false, leaving the placer unchanged, when the active state is the root.
    fn backtrack(&mut self) -> bool;

    /// Hand the parent state's untried cells to another searcher
    ///
    /// Copies the parent's pegs and cursor into `seed` and exhausts the parent's
    /// cursor, so this placer never revisits that work. Returns false when the
    /// active state is the root or the parent has nothing left to try.
    fn hand_off_parent(&mut self, seed: &mut Seed) -> bool;

    /// Whether the active state's cursor has passed the last cell
    fn done(&self) -> bool {
        !self.grid().contains(self.cursor())
    }

    /// Whether the active state holds a full placement
    fn is_complete(&self) -> bool {
        self.placements().len() == self.grid().size() as usize
    }

    /// Number of pegs in the active state
    fn depth(&self) -> usize {
        self.placements().len()
    }
}

/// Builds placers for a grid from seeds
pub trait StonePlacerConstructor: Send + Sync {
    /// Placer produced by this constructor
    type Placer: StonePlacer;

    /// Build a placer with the seed's pegs placed
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSeed`] if the seed breaks any placement rule
    fn construct(&self, grid: Grid, seed: &Seed) -> Result<Self::Placer>;
}

/// Place a seed's pegs in row-major order and position the root cursor
///
/// # Errors
///
/// Returns [`SearchError::InvalidSeed`] on the first violated constraint
pub fn plant_seed<P: StonePlacer>(placer: &mut P, seed: &Seed) -> Result<()> {
    let mut sorted = seed.placements.clone();
    sorted.sort_unstable();
    let invalid = |violation: ConstraintViolation| SearchError::InvalidSeed {
        seed: seed.placements.clone(),
        violation,
    };

    for &point in &sorted {
        placer.place_at(point).map_err(invalid)?;
    }
    placer.pin_root();
    if let Some(cursor) = seed.cursor {
        placer.seek(cursor).map_err(invalid)?;
    }
    Ok(())
}

/// Check a candidate against every placed peg, recording new separations
pub(crate) fn extend_separations<S, I>(
    separations: &mut S,
    stones: I,
    candidate: Point,
) -> std::result::Result<(), ConstraintViolation>
where
    S: SeparationSet,
    I: IntoIterator<Item = Point>,
{
    for stone in stones {
        let sep = separation(candidate, stone);
        if separations.contains(sep) {
            return Err(ConstraintViolation::DuplicateSeparation {
                point: candidate,
                separation: sep,
            });
        }
        separations.insert(sep);
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct OrderedState<S> {
    stones: Placements,
    separations: S,
    cursor: Point,
}

/// Canonically ordered placer that copies its state on every placement
///
/// Each new peg must come strictly after the previous one in row-major order, so
/// every unordered set of pegs is explored exactly once.
#[derive(Debug)]
pub struct OrderedPlacer<S> {
    grid: Grid,
    current: OrderedState<S>,
    ancestors: Vec<OrderedState<S>>,
    root: usize,
}

impl<S: SeparationSet> OrderedPlacer<S> {
    /// Create a placer with the seed's pegs placed
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSeed`] if the seed breaks a placement rule
    pub fn new(grid: Grid, seed: &Seed) -> Result<Self> {
        let mut placer = Self {
            grid,
            current: OrderedState {
                stones: Vec::new(),
                separations: S::default(),
                cursor: Point::ORIGIN,
            },
            ancestors: Vec::with_capacity(grid.size() as usize),
            root: 0,
        };
        plant_seed(&mut placer, seed)?;
        Ok(placer)
    }
}

impl<S: SeparationSet> StonePlacer for OrderedPlacer<S> {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn placements(&self) -> &[Point] {
        &self.current.stones
    }

    fn cursor(&self) -> Point {
        self.current.cursor
    }

    fn place(&mut self) -> std::result::Result<(), ConstraintViolation> {
        let candidate = self.current.cursor;
        if !self.grid.contains(candidate) {
            return Err(ConstraintViolation::OutOfBounds(candidate));
        }
        self.current.cursor = self.grid.advance(candidate);

        let mut separations = self.current.separations.clone();
        extend_separations(
            &mut separations,
            self.current.stones.iter().copied(),
            candidate,
        )?;

        let mut stones = Vec::with_capacity(self.current.stones.len() + 1);
        stones.extend_from_slice(&self.current.stones);
        stones.push(candidate);

        let child = OrderedState {
            stones,
            separations,
            cursor: self.grid.advance(candidate),
        };
        self.ancestors.push(mem::replace(&mut self.current, child));
        Ok(())
    }

    fn place_at(&mut self, point: Point) -> std::result::Result<(), ConstraintViolation> {
        if !self.grid.contains(point) {
            return Err(ConstraintViolation::OutOfBounds(point));
        }
        if let Some(&last) = self.current.stones.last()
            && point <= last
        {
            return Err(ConstraintViolation::OutOfOrder { point, last });
        }
        self.current.cursor = point;
        self.place()
    }

    fn seek(&mut self, cursor: Point) -> std::result::Result<(), ConstraintViolation> {
        if let Some(&last) = self.current.stones.last()
            && cursor <= last
        {
            return Err(ConstraintViolation::OutOfOrder {
                point: cursor,
                last,
            });
        }
        self.current.cursor = cursor;
        Ok(())
    }

    fn pin_root(&mut self) {
        self.root = self.ancestors.len();
    }

    fn backtrack(&mut self) -> bool {
        if self.ancestors.len() <= self.root {
            return false;
        }
        match self.ancestors.pop() {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    fn hand_off_parent(&mut self, seed: &mut Seed) -> bool {
        if self.ancestors.len() <= self.root {
            return false;
        }
        let grid = self.grid;
        match self.ancestors.last_mut() {
            Some(parent) if grid.contains(parent.cursor) => {
                seed.fill(&parent.stones, parent.cursor);
                parent.cursor = grid.end();
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
struct UnorderedState<S, P> {
    stones: P,
    order: Placements,
    separations: S,
    cursor: Point,
}

/// Placer that may put the next peg on any free cell
///
/// Explores every ordering of every peg set, so it is only practical on small
/// grids; it serves as a baseline for the ordered placers.
#[derive(Debug)]
pub struct UnorderedPlacer<S, P> {
    grid: Grid,
    current: UnorderedState<S, P>,
    ancestors: Vec<UnorderedState<S, P>>,
    root: usize,
}

fn skip_occupied<P: PointSet>(grid: Grid, stones: &P, mut cursor: Point) -> Point {
    while grid.contains(cursor) && stones.contains(cursor) {
        cursor = grid.advance(cursor);
    }
    cursor
}

impl<S: SeparationSet, P: PointSet> UnorderedPlacer<S, P> {
    /// Create a placer with the seed's pegs placed
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSeed`] if the seed breaks a placement rule
    pub fn new(grid: Grid, seed: &Seed) -> Result<Self> {
        let mut placer = Self {
            grid,
            current: UnorderedState {
                stones: P::default(),
                order: Vec::new(),
                separations: S::default(),
                cursor: Point::ORIGIN,
            },
            ancestors: Vec::with_capacity(grid.size() as usize),
            root: 0,
        };
        plant_seed(&mut placer, seed)?;
        Ok(placer)
    }
}

impl<S: SeparationSet, P: PointSet> StonePlacer for UnorderedPlacer<S, P> {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn placements(&self) -> &[Point] {
        &self.current.order
    }

    fn cursor(&self) -> Point {
        self.current.cursor
    }

    fn place(&mut self) -> std::result::Result<(), ConstraintViolation> {
        let grid = self.grid;
        let candidate = skip_occupied(grid, &self.current.stones, self.current.cursor);
        if !grid.contains(candidate) {
            self.current.cursor = candidate;
            return Err(ConstraintViolation::OutOfBounds(candidate));
        }
        self.current.cursor = skip_occupied(grid, &self.current.stones, grid.advance(candidate));

        let mut separations = self.current.separations.clone();
        extend_separations(&mut separations, self.current.stones.iter(), candidate)?;

        let mut stones = self.current.stones.clone();
        stones.insert(candidate);
        let mut order = self.current.order.clone();
        order.push(candidate);
        let cursor = skip_occupied(grid, &stones, Point::ORIGIN);

        let child = UnorderedState {
            stones,
            order,
            separations,
            cursor,
        };
        self.ancestors.push(mem::replace(&mut self.current, child));
        Ok(())
    }

    fn place_at(&mut self, point: Point) -> std::result::Result<(), ConstraintViolation> {
        if !self.grid.contains(point) {
            return Err(ConstraintViolation::OutOfBounds(point));
        }
        if self.current.stones.contains(point) {
            return Err(ConstraintViolation::Occupied(point));
        }
        self.current.cursor = point;
        self.place()
    }

    fn seek(&mut self, cursor: Point) -> std::result::Result<(), ConstraintViolation> {
        self.current.cursor = skip_occupied(self.grid, &self.current.stones, cursor);
        Ok(())
    }

    fn pin_root(&mut self) {
        self.root = self.ancestors.len();
    }

    fn backtrack(&mut self) -> bool {
        if self.ancestors.len() <= self.root {
            return false;
        }
        match self.ancestors.pop() {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    fn hand_off_parent(&mut self, seed: &mut Seed) -> bool {
        if self.ancestors.len() <= self.root {
            return false;
        }
        let grid = self.grid;
        match self.ancestors.last_mut() {
            Some(parent) if grid.contains(parent.cursor) => {
                seed.fill(&parent.order, parent.cursor);
                parent.cursor = grid.end();
                true
            }
            _ => false,
        }
    }
}

/// Builds [`OrderedPlacer`]s using separation set `S`
pub struct OrderedConstructor<S> {
    _sets: PhantomData<fn() -> S>,
}

impl<S> OrderedConstructor<S> {
    /// Create the constructor
    pub const fn new() -> Self {
        Self { _sets: PhantomData }
    }
}

impl<S> Default for OrderedConstructor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SeparationSet> StonePlacerConstructor for OrderedConstructor<S> {
    type Placer = OrderedPlacer<S>;

    fn construct(&self, grid: Grid, seed: &Seed) -> Result<Self::Placer> {
        OrderedPlacer::new(grid, seed)
    }
}

/// Builds [`UnorderedPlacer`]s using separation set `S` and point set `P`
pub struct UnorderedConstructor<S, P> {
    _sets: PhantomData<fn() -> (S, P)>,
}

impl<S, P> UnorderedConstructor<S, P> {
    /// Create the constructor
    pub const fn new() -> Self {
        Self { _sets: PhantomData }
    }
}

impl<S, P> Default for UnorderedConstructor<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SeparationSet, P: PointSet> StonePlacerConstructor for UnorderedConstructor<S, P> {
    type Placer = UnorderedPlacer<S, P>;

    fn construct(&self, grid: Grid, seed: &Seed) -> Result<Self::Placer> {
        UnorderedPlacer::new(grid, seed)
    }
}

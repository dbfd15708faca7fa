use crate::algorithm::pruner::PrecomputedPruner;
use crate::spatial::grid::Grid;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::time::Instant;

/// Memoization cache of precomputed pruners, one per grid size
///
/// Entries are never evicted; grid sizes are bounded, so the cache is too.
#[derive(Default)]
pub struct PrunerCache {
    /// Grid side to pruner mapping
    pruners: HashMap<u8, Arc<PrecomputedPruner>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl PrunerCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the cached pruner for a grid or build and store a new one
    pub fn get_or_build(&mut self, grid: Grid) -> Arc<PrecomputedPruner> {
        self.get_or_compute(grid, || PrecomputedPruner::build(grid))
    }

    /// Retrieve the cached pruner for a grid, using `compute_fn` only on a miss
    pub fn get_or_compute<F>(&mut self, grid: Grid, compute_fn: F) -> Arc<PrecomputedPruner>
    where
        F: FnOnce() -> PrecomputedPruner,
    {
        use std::collections::hash_map::Entry;

        match self.pruners.entry(grid.size()) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let started = Instant::now();
                let pruner = Arc::new(compute_fn());
                tracing::debug!(%grid, elapsed = ?started.elapsed(), "built precomputed pruner");
                Arc::clone(entry.insert(pruner))
            }
        }
    }

    /// Number of grid sizes held
    pub fn len(&self) -> usize {
        self.pruners.len()
    }

    /// Test whether no pruner has been built yet
    pub fn is_empty(&self) -> bool {
        self.pruners.is_empty()
    }
}

// The lock is held for the whole build, so concurrent first users of a grid size
// wait for one construction and then share it.
static PRUNER_CACHE: LazyLock<Mutex<PrunerCache>> =
    LazyLock::new(|| Mutex::new(PrunerCache::new()));

/// Process-wide precomputed pruner for a grid, built on first use
pub fn shared_precomputed_pruner(grid: Grid) -> Arc<PrecomputedPruner> {
    PRUNER_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_build(grid)
}

/// Snapshot of the process-wide cache statistics
pub fn shared_cache_stats() -> CacheStats {
    PRUNER_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .stats
}

/// Preallocated placers with optional pruning
pub mod arena;
/// Bit-packed separation and point sets
pub mod bitset;
/// Process-wide cache of precomputed pruners
pub mod cache;
/// Placement state machines that copy their state on every placement
pub mod placer;
/// Cells ruled out by placed pegs
pub mod pruner;
/// Membership set contracts and hash-based reference sets
pub mod sets;

//! Recursive depth-first search over a placer
//!
//! Every solver shares this loop. The observer hooks let parallel solvers check for
//! cancellation before each attempt and hand off work after each successful step.

use crate::algorithm::placer::StonePlacer;
use crate::spatial::grid::Placements;
use std::ops::ControlFlow;

/// Why a search stopped before exhausting its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// A complete placement was reached
    Found(Placements),
    /// The observer asked the search to stop
    Cancelled,
}

/// Hooks called from inside the search loop
pub trait SearchObserver {
    /// Called before every placement attempt
    fn before_attempt(&mut self) -> ControlFlow<Halt> {
        ControlFlow::Continue(())
    }

    /// Called after each successful placement, before descending into the child
    fn after_descend<P: StonePlacer>(&mut self, _placer: &mut P) -> ControlFlow<Halt> {
        ControlFlow::Continue(())
    }
}

/// Observer that never interrupts the search
#[derive(Clone, Copy, Debug, Default)]
pub struct Unobserved;

impl SearchObserver for Unobserved {}

/// Explore the subtree under the placer's active state
///
/// Returns `Continue` when the subtree holds no complete placement. The placer is
/// left on the same active state it started on unless the search halts.
pub fn descend<P, O>(placer: &mut P, observer: &mut O) -> ControlFlow<Halt>
where
    P: StonePlacer,
    O: SearchObserver,
{
    if placer.is_complete() {
        return ControlFlow::Break(Halt::Found(placer.placements().to_vec()));
    }
    while !placer.done() {
        observer.before_attempt()?;
        if placer.place().is_ok() {
            observer.after_descend(placer)?;
            descend(placer, observer)?;
            placer.backtrack();
        }
    }
    ControlFlow::Continue(())
}

/// Search the placer's subtree to completion without interruption
pub fn find_solution<P: StonePlacer>(placer: &mut P) -> Option<Placements> {
    match descend(placer, &mut Unobserved) {
        ControlFlow::Break(Halt::Found(placements)) => Some(placements),
        ControlFlow::Break(Halt::Cancelled) | ControlFlow::Continue(()) => None,
    }
}

//! Tests for the recursive search loop and its observer hooks

#[cfg(test)]
mod tests {
    use pegboard::algorithm::arena::OrderedArenaConstructor;
    use pegboard::algorithm::placer::{Seed, StonePlacer, StonePlacerConstructor};
    use pegboard::solver::search::{Halt, SearchObserver, Unobserved, descend, find_solution};
    use pegboard::spatial::grid::{Grid, Point, check_valid_solution};
    use std::ops::ControlFlow;

    fn grid(size: u8) -> Grid {
        Grid::new(size).unwrap_or_else(|error| panic!("grid {size}: {error}"))
    }

    struct CountingObserver {
        attempts: usize,
        descents: usize,
        limit: usize,
    }

    impl SearchObserver for CountingObserver {
        fn before_attempt(&mut self) -> ControlFlow<Halt> {
            self.attempts += 1;
            if self.attempts > self.limit {
                ControlFlow::Break(Halt::Cancelled)
            } else {
                ControlFlow::Continue(())
            }
        }

        fn after_descend<P: StonePlacer>(&mut self, placer: &mut P) -> ControlFlow<Halt> {
            self.descents += 1;
            assert!(placer.depth() > 0);
            ControlFlow::Continue(())
        }
    }

    // Tests the search finds a valid placement on a grid with solutions
    // Verified by returning the first partial placement
    #[test]
    fn test_find_solution_valid() {
        let g = grid(6);
        let mut placer = OrderedArenaConstructor::new()
            .construct(g, &Seed::default())
            .unwrap_or_else(|error| panic!("{error}"));
        let solution = find_solution(&mut placer).unwrap_or_else(|| panic!("no solution on {g}"));
        assert_eq!(check_valid_solution(g, &solution), Ok(()));
    }

    // Tests a complete seed is reported immediately without any attempt
    // Verified by checking completeness after the first attempt
    #[test]
    fn test_complete_seed_found_immediately() {
        let g = grid(3);
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(1, 1), Point::new(1, 2)]);
        let mut placer = OrderedArenaConstructor::new()
            .construct(g, &seed)
            .unwrap_or_else(|error| panic!("{error}"));
        let mut observer = CountingObserver {
            attempts: 0,
            descents: 0,
            limit: usize::MAX,
        };
        assert_eq!(
            descend(&mut placer, &mut observer),
            ControlFlow::Break(Halt::Found(seed.placements))
        );
        assert_eq!(observer.attempts, 0);
    }

    // Tests an exhausted subtree continues and leaves the placer at its root
    // Verified by skipping backtrack after a failed descent
    #[test]
    fn test_exhausted_subtree() {
        let g = grid(4);
        // Pegs after D2 cannot complete a four peg placement
        let seed = Seed::new(vec![Point::new(3, 2)]);
        let mut placer = OrderedArenaConstructor::new()
            .construct(g, &seed)
            .unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(descend(&mut placer, &mut Unobserved), ControlFlow::Continue(()));
        assert_eq!(placer.placements(), &[Point::new(3, 2)]);
        assert!(placer.done());
    }

    // Tests the observer sees every attempt and every descent and can cancel
    // Verified by ignoring the observer's break
    #[test]
    fn test_observer_cancels() {
        let g = grid(7);
        let mut placer = OrderedArenaConstructor::new()
            .construct(g, &Seed::default())
            .unwrap_or_else(|error| panic!("{error}"));
        let mut observer = CountingObserver {
            attempts: 0,
            descents: 0,
            limit: 10,
        };
        assert_eq!(
            descend(&mut placer, &mut observer),
            ControlFlow::Break(Halt::Cancelled)
        );
        assert_eq!(observer.attempts, 11);
        assert!(observer.descents > 0);
    }

    // Tests the search is deterministic for a fixed placer and seed
    // Verified by iterating cells in hash order
    #[test]
    fn test_search_deterministic() {
        let g = grid(6);
        let run = || {
            let mut placer = OrderedArenaConstructor::new()
                .construct(g, &Seed::default())
                .unwrap_or_else(|error| panic!("{error}"));
            find_solution(&mut placer)
        };
        assert_eq!(run(), run());
    }
}

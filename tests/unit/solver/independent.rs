//! Tests for the one-thread-per-seed solver

#[cfg(test)]
mod tests {
    use pegboard::SearchError;
    use pegboard::algorithm::arena::{OpportunisticArenaConstructor, OrderedArenaConstructor};
    use pegboard::algorithm::pruner::PrecomputedPruner;
    use pegboard::solver::{IndependentSolver, Solver};
    use pegboard::spatial::grid::{Grid, Placements, Point, check_valid_solution};
    use pegboard::spatial::starting::{empty_grid, first_octant};

    fn grid(size: u8) -> Grid {
        Grid::new(size).unwrap_or_else(|error| panic!("grid {size}: {error}"))
    }

    fn no_seeds(_grid: Grid) -> Vec<Placements> {
        Vec::new()
    }

    fn late_seeds(_grid: Grid) -> Vec<Placements> {
        vec![vec![Point::new(3, 2)], vec![Point::new(3, 3)]]
    }

    fn conflicting_seed(_grid: Grid) -> Vec<Placements> {
        vec![
            vec![Point::ORIGIN],
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)],
        ]
    }

    // Tests a valid solution is returned from the octant seeds
    // Verified by closing the done signal before searching
    #[test]
    fn test_finds_valid_solution() {
        let g = grid(6);
        let solver = IndependentSolver::new(first_octant, OrderedArenaConstructor::new());
        let placements = solver.solve(g).unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(check_valid_solution(g, &placements), Ok(()));
    }

    // Tests a single seed works with a pruning placer
    // Verified by dropping the supervisor's exhaustion report
    #[test]
    fn test_single_seed_with_pruning() {
        let g = grid(5);
        let solver = IndependentSolver::new(
            empty_grid,
            OpportunisticArenaConstructor::<PrecomputedPruner>::new(),
        );
        let placements = solver.solve(g).unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(check_valid_solution(g, &placements), Ok(()));
    }

    // Tests no seeds and exhausted seeds both report no solution
    // Verified by reporting exhaustion only when at least one searcher ran
    #[test]
    fn test_exhaustion_reports_no_solution() {
        let empty = IndependentSolver::new(no_seeds, OrderedArenaConstructor::new());
        assert!(matches!(
            empty.solve(grid(4)),
            Err(SearchError::NoSolution { size: 4 })
        ));

        let late = IndependentSolver::new(late_seeds, OrderedArenaConstructor::new());
        assert!(matches!(
            late.solve(grid(4)),
            Err(SearchError::NoSolution { size: 4 })
        ));
    }

    // Tests invalid seeds are rejected before any searcher starts
    // Verified by constructing placers inside the searcher threads
    #[test]
    fn test_invalid_seed_rejected_up_front() {
        let solver = IndependentSolver::new(conflicting_seed, OrderedArenaConstructor::new());
        assert!(matches!(
            solver.solve(grid(4)),
            Err(SearchError::InvalidSeed { .. })
        ));
    }

    // Tests repeated runs always return some valid solution
    // Verified by reporting the first searcher to finish even without a solution
    #[test]
    fn test_repeated_runs_valid() {
        let g = grid(6);
        let solver = IndependentSolver::new(first_octant, OrderedArenaConstructor::new());
        for _ in 0..5 {
            let placements = solver.solve(g).unwrap_or_else(|error| panic!("{error}"));
            assert_eq!(check_valid_solution(g, &placements), Ok(()));
        }
    }
}

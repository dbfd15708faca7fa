//! Tests for the preallocated placers and their pruning strategies

#[cfg(test)]
mod tests {
    use pegboard::SearchError;
    use pegboard::algorithm::arena::{
        ArenaPlacer, BatchPruning, NoPruning, OpportunisticArenaConstructor,
        OpportunisticPruning, OrderedArenaConstructor, PruningArenaConstructor, PruningStrategy,
    };
    use pegboard::algorithm::bitset::BitSeparationSet;
    use pegboard::algorithm::placer::{
        ConstraintViolation, OrderedPlacer, Seed, StonePlacer, StonePlacerConstructor,
    };
    use pegboard::algorithm::pruner::{PrecomputedPruner, RuntimePruner};
    use pegboard::algorithm::sets::{PointSet, SeparationSet};
    use pegboard::spatial::grid::{Grid, Point, separation};

    fn grid(size: u8) -> Grid {
        Grid::new(size).unwrap_or_else(|error| panic!("grid {size}: {error}"))
    }

    fn arena<K: PruningStrategy>(size: u8, seed: &Seed) -> ArenaPlacer<K> {
        let g = grid(size);
        ArenaPlacer::new(g, K::for_grid(g), seed).unwrap_or_else(|error| panic!("{error}"))
    }

    // Collect every full placement reachable from the placer's root, in search order.
    fn enumerate<P: StonePlacer>(placer: &mut P) -> Vec<Vec<Point>> {
        let mut found = Vec::new();
        loop {
            if placer.is_complete() {
                found.push(placer.placements().to_vec());
                if !placer.backtrack() {
                    break;
                }
                continue;
            }
            if placer.done() {
                if !placer.backtrack() {
                    break;
                }
                continue;
            }
            let _ = placer.place();
        }
        found
    }

    // Tests one frame is allocated per depth including the empty root
    // Verified by allocating N frames
    #[test]
    fn test_arena_has_frame_per_depth() {
        let placer = arena::<NoPruning>(5, &Seed::default());
        assert_eq!(placer.capacity(), 6);
        assert_eq!(placer.depth(), 0);
    }

    // Tests place and backtrack reuse frames and restore the parent state
    // Verified by not advancing the parent cursor before descending
    #[test]
    fn test_place_and_backtrack() {
        let mut placer = arena::<NoPruning>(3, &Seed::default());
        assert_eq!(placer.place(), Ok(()));
        assert_eq!(placer.place(), Ok(()));
        assert_eq!(placer.placements(), &[Point::new(0, 0), Point::new(0, 1)]);
        assert_eq!(placer.cursor(), Point::new(0, 2));
        assert!(placer.backtrack());
        assert_eq!(placer.placements(), &[Point::new(0, 0)]);
        assert_eq!(placer.cursor(), Point::new(0, 2));
        assert!(placer.backtrack());
        assert!(!placer.backtrack());
    }

    // Tests a full arena refuses to place beyond the grid side
    // Verified by wrapping the child index back to the root
    #[test]
    fn test_full_arena_refuses_place() {
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(1, 1), Point::new(1, 2)]);
        let mut placer = arena::<NoPruning>(3, &seed);
        assert!(placer.is_complete());
        assert!(placer.place().is_err());
        assert!(placer.done());
    }

    // Tests frames overwritten after backtracking hold only the new branch's separations
    // Verified by unioning into the child instead of cloning the parent
    #[test]
    fn test_reused_frame_is_overwritten() {
        let mut placer = arena::<NoPruning>(4, &Seed::new(vec![Point::ORIGIN]));
        assert_eq!(placer.place_at(Point::new(0, 3)), Ok(()));
        assert!(placer.backtrack());
        assert_eq!(placer.place_at(Point::new(1, 0)), Ok(()));
        let frame = placer
            .active_frame()
            .unwrap_or_else(|| panic!("no active frame"));
        assert_eq!(frame.separations().elements(), vec![1]);
        assert_eq!(frame.stones(), &[Point::ORIGIN, Point::new(1, 0)]);
    }

    // Tests ordering and duplicate checks match the copying placer
    // Verified by dropping the ordering check from the arena place_at
    #[test]
    fn test_constraints_match_ordered_placer() {
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        let mut placer = arena::<NoPruning>(3, &seed);
        assert!(matches!(
            placer.place_at(Point::new(0, 2)),
            Err(ConstraintViolation::OutOfOrder { .. })
        ));
        assert!(matches!(
            placer.place_at(Point::new(2, 2)),
            Err(ConstraintViolation::DuplicateSeparation { separation: 2, .. })
        ));
    }

    // Tests batched pruning rules out circles and isosceles apexes around the pegs
    // Verified by skipping circles around the new peg
    #[test]
    fn test_batch_pruning_marks_cells() {
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(0, 1)]);
        let placer = arena::<BatchPruning<RuntimePruner>>(4, &seed);
        let frame = placer
            .active_frame()
            .unwrap_or_else(|| panic!("no active frame"));
        let pruned = frame.pruned();
        // Separation 1 around both pegs
        assert!(pruned.contains(Point::new(1, 0)));
        assert!(pruned.contains(Point::new(1, 1)));
        assert!(pruned.contains(Point::new(0, 2)));
        // Not at distance 1 from either peg and not equidistant
        assert!(!pruned.contains(Point::new(2, 3)));
        for cell in pruned.iter() {
            let d0 = separation(cell, Point::new(0, 0));
            let d1 = separation(cell, Point::new(0, 1));
            assert!(d0 == 1 || d1 == 1 || d0 == d1, "{cell} pruned without cause");
        }
    }

    // Tests placing on a pruned cell is refused and the cursor skips pruned cells
    // Verified by removing the pruned check from place_at
    #[test]
    fn test_pruned_cells_refused_and_skipped() {
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(0, 1)]);
        let mut placer = arena::<BatchPruning<RuntimePruner>>(4, &seed);
        assert_eq!(
            placer.place_at(Point::new(1, 1)),
            Err(ConstraintViolation::Pruned(Point::new(1, 1)))
        );
        let frame = placer
            .active_frame()
            .unwrap_or_else(|| panic!("no active frame"));
        assert!(!frame.pruned().contains(placer.cursor()));
    }

    // Tests a seed landing on a cell pruned by earlier seed pegs aborts construction
    // Verified by skipping the pruned check while planting
    #[test]
    fn test_seed_on_pruned_cell_rejected() {
        let seed = Seed::new(vec![Point::new(0, 0), Point::new(0, 2), Point::new(1, 1)]);
        let result = PruningArenaConstructor::<PrecomputedPruner>::new().construct(grid(4), &seed);
        assert!(matches!(
            result,
            Err(SearchError::InvalidSeed {
                violation: ConstraintViolation::Pruned(_),
                ..
            })
        ));
    }

    // Tests every arena variant finds the same solutions as the copying placer
    // Verified by pruning cells at distance sep + 1
    #[test]
    fn test_variants_agree_with_copying_placer() {
        for size in 3..=5 {
            let g = grid(size);
            let mut reference = OrderedPlacer::<BitSeparationSet>::new(g, &Seed::default())
                .unwrap_or_else(|error| panic!("{error}"));
            let expected = enumerate(&mut reference);
            assert!(!expected.is_empty());

            assert_eq!(enumerate(&mut arena::<NoPruning>(size, &Seed::default())), expected);
            assert_eq!(
                enumerate(&mut arena::<BatchPruning<RuntimePruner>>(size, &Seed::default())),
                expected
            );
            assert_eq!(
                enumerate(&mut arena::<BatchPruning<PrecomputedPruner>>(size, &Seed::default())),
                expected
            );
            assert_eq!(
                enumerate(&mut arena::<OpportunisticPruning<PrecomputedPruner>>(
                    size,
                    &Seed::default()
                )),
                expected
            );
        }
    }

    // Tests hand_off_parent gives away the parent's untried cells
    // Verified by handing off the active frame instead of its parent
    #[test]
    fn test_hand_off_parent() {
        let mut placer = OpportunisticArenaConstructor::<RuntimePruner>::new()
            .construct(grid(5), &Seed::new(vec![Point::ORIGIN]))
            .unwrap_or_else(|error| panic!("{error}"));
        let mut seed = Seed::with_capacity(5);
        assert!(!placer.hand_off_parent(&mut seed));

        assert_eq!(placer.place(), Ok(()));
        let placed = placer.placements().to_vec();
        assert!(placer.hand_off_parent(&mut seed));
        assert_eq!(seed.placements, vec![Point::ORIGIN]);
        assert!(seed.cursor.is_some_and(|cursor| cursor > placed[1]));

        assert!(placer.backtrack());
        assert!(placer.done());
    }

    // Tests handed off work rebuilds into an equivalent placer
    // Verified by ignoring the seed cursor when constructing
    #[test]
    fn test_handed_off_seed_resumes() {
        let constructor = OrderedArenaConstructor::new();
        let seed = Seed::with_cursor(vec![Point::ORIGIN], Point::new(1, 3));
        let placer = constructor
            .construct(grid(4), &seed)
            .unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(placer.placements(), &[Point::ORIGIN]);
        assert_eq!(placer.cursor(), Point::new(1, 3));
    }
}

//! Tests for the starting point providers

#[cfg(test)]
mod tests {
    use pegboard::spatial::grid::{Grid, Point};
    use pegboard::spatial::starting::{StartingPointsProvider, empty_grid, first_octant};

    fn grid(size: u8) -> Grid {
        Grid::new(size).unwrap_or_else(|error| panic!("grid {size}: {error}"))
    }

    // Tests the empty provider yields exactly one seed with no pegs
    // Verified by returning no seeds
    #[test]
    fn test_empty_grid_single_empty_seed() {
        assert_eq!(empty_grid(grid(5)), vec![Vec::<Point>::new()]);
    }

    // Tests first octant cells on an even grid
    // Verified by letting the column start at zero
    #[test]
    fn test_first_octant_even_grid() {
        let expected = vec![
            vec![Point::new(0, 0)],
            vec![Point::new(0, 1)],
            vec![Point::new(1, 1)],
        ];
        assert_eq!(first_octant(grid(4)), expected);
    }

    // Tests first octant includes the middle row and column on an odd grid
    // Verified by using size / 2 instead of rounding up
    #[test]
    fn test_first_octant_odd_grid() {
        let expected = vec![
            vec![Point::new(0, 0)],
            vec![Point::new(0, 1)],
            vec![Point::new(0, 2)],
            vec![Point::new(1, 1)],
            vec![Point::new(1, 2)],
            vec![Point::new(2, 2)],
        ];
        assert_eq!(first_octant(grid(5)), expected);
    }

    // Tests every first octant seed lies on the grid and the one cell grid has one seed
    // Verified by iterating past the half
    #[test]
    fn test_first_octant_in_bounds() {
        let provider: StartingPointsProvider = first_octant;
        for size in 1..=14 {
            let g = grid(size);
            let seeds = provider(g);
            assert!(!seeds.is_empty());
            assert!(seeds.iter().flatten().all(|&p| g.contains(p) && p.row <= p.col));
        }
        assert_eq!(first_octant(grid(1)), vec![vec![Point::ORIGIN]]);
    }
}

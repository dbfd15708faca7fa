//! Tests for the bit-packed separation and point sets

#[cfg(test)]
mod tests {
    use pegboard::algorithm::bitset::{BitPointSet, BitSeparationSet};
    use pegboard::algorithm::sets::{PointSet, SeparationSet};
    use pegboard::spatial::grid::{MAX_GRID_SIZE, MAX_SEPARATION, Point};

    // Verifies a new bitset is empty and its iterator yields nothing
    // Verified by initializing the words with all bits set
    #[test]
    fn test_new_sets_are_empty() {
        assert!(BitSeparationSet::new().is_empty());
        assert!(BitPointSet::new().is_empty());
        assert_eq!(BitSeparationSet::new().iter().next(), None);
        assert_eq!(BitPointSet::new().iter().next(), None);
    }

    // Tests the separations at the word boundaries and the largest value
    // Verified by sizing the array to MAX_SEPARATION bits
    #[test]
    fn test_separation_boundaries() {
        let mut set = BitSeparationSet::new();
        for sep in [0, 63, 64, 127, 128, MAX_SEPARATION] {
            set.insert(sep);
        }
        assert_eq!(set.elements(), vec![0, 63, 64, 127, 128, MAX_SEPARATION]);
        assert!(!set.contains(62));
        assert!(!set.contains(MAX_SEPARATION - 1));
    }

    // Tests point members iterate in row-major order
    // Verified by packing points as col * stride + row
    #[test]
    fn test_points_iterate_row_major() {
        let mut set = BitPointSet::new();
        let last = Point::new(MAX_GRID_SIZE - 1, MAX_GRID_SIZE - 1);
        set.insert(last);
        set.insert(Point::new(1, 0));
        set.insert(Point::new(0, 13));
        assert_eq!(
            set.elements(),
            vec![Point::new(0, 13), Point::new(1, 0), last]
        );
    }

    // Tests inserting twice keeps one member
    // Verified by counting inserts rather than set bits
    #[test]
    fn test_insert_idempotent() {
        let mut set = BitPointSet::new();
        set.insert(Point::new(4, 4));
        set.insert(Point::new(4, 4));
        assert_eq!(set.len(), 1);
    }

    // Tests clone_from_set replaces rather than merges
    // Verified by or-ing words instead of copying them
    #[test]
    fn test_clone_from_set_overwrites() {
        let mut target = BitSeparationSet::new();
        target.insert(1);
        target.insert(200);
        let mut source = BitSeparationSet::new();
        source.insert(5);

        target.clone_from_set(&source);
        assert_eq!(target, source);
        assert!(!target.contains(200));
    }

    // Tests word-wise union keeps both operands' members
    // Verified by and-ing words instead of or-ing them
    #[test]
    fn test_union_merges_words() {
        let mut a = BitPointSet::new();
        a.insert(Point::new(0, 0));
        a.insert(Point::new(9, 9));
        let mut b = BitPointSet::new();
        b.insert(Point::new(9, 9));
        b.insert(Point::new(13, 0));

        a.union_with(&b);
        assert_eq!(
            a.elements(),
            vec![Point::new(0, 0), Point::new(9, 9), Point::new(13, 0)]
        );
    }

    // Tests equality compares members and debug output lists them
    // Verified by deriving equality on an unused field
    #[test]
    fn test_equality_and_formatting() {
        let mut a = BitPointSet::new();
        let mut b = BitPointSet::new();
        assert_eq!(a, b);
        a.insert(Point::new(0, 1));
        assert_ne!(a, b);
        b.insert(Point::new(0, 1));
        assert_eq!(a, b);
        assert!(a.to_string().contains("1 points"));

        let mut seps = BitSeparationSet::new();
        seps.insert(2);
        assert_eq!(format!("{seps:?}"), "{2}");
    }

    // Tests the bit view is exposed for the fast path
    // Verified by returning None from as_bits
    #[test]
    fn test_as_bits_exposed() {
        assert!(BitSeparationSet::new().as_bits().is_some());
        assert!(BitPointSet::new().as_bits().is_some());
    }
}

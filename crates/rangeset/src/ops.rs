//! Set algebra between two canonical range sets.
//!
//! All three operations walk the merged boundary cuts of both inputs and
//! derive the result segment by segment, so they stay near-linear in the
//! total number of stored ranges instead of comparing pairs.
use std::{
    cmp,
    collections::BTreeMap,
    ops::{
        BitAnd,
        BitOr,
        Sub,
    },
};

use itertools::Itertools;

use crate::{
    cut::Cut,
    set::RangeSet,
};

impl<T: Ord + Clone> RangeSet<T> {
    /// Values present in either input.
    pub fn union(&self, other: &Self) -> Self {
        let mut ranges = BTreeMap::new();
        let merged = self
            .ranges
            .iter()
            .merge_by(other.ranges.iter(), |(a, _), (b, _)| a <= b);
        // Sweep the ranges in lower-cut order, holding back the pending
        // merged range until a gap appears.
        let mut pending: Option<(Cut<T>, Cut<T>)> = None;
        for (lower, upper) in merged {
            pending = match pending.take() {
                None => Some((lower.clone(), upper.clone())),
                Some((pending_lower, pending_upper)) => {
                    if *lower <= pending_upper {
                        let pending_upper = cmp::max(pending_upper, upper.clone());
                        Some((pending_lower, pending_upper))
                    } else {
                        ranges.insert(pending_lower, pending_upper);
                        Some((lower.clone(), upper.clone()))
                    }
                },
            };
        }
        if let Some((pending_lower, pending_upper)) = pending {
            ranges.insert(pending_lower, pending_upper);
        }
        Self { ranges }
    }

    /// Values present in both inputs.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut ranges = BTreeMap::new();
        let mut left = self.ranges.iter().peekable();
        let mut right = other.ranges.iter().peekable();
        while let (Some((left_lower, left_upper)), Some((right_lower, right_upper))) =
            (left.peek(), right.peek())
        {
            let lower = cmp::max(left_lower, right_lower);
            let upper = cmp::min(left_upper, right_upper);
            if lower < upper {
                ranges.insert((*lower).clone(), (*upper).clone());
            }
            // Advance whichever side ends first; the other may still overlap
            // the next range on this side.
            if left_upper <= right_upper {
                left.next();
            } else {
                right.next();
            }
        }
        Self { ranges }
    }

    /// Values present in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.intersection(&other.complement().to_range_set())
    }
}

impl<T: Ord + Clone> BitOr<&RangeSet<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitor(self, other: &RangeSet<T>) -> RangeSet<T> {
        self.union(other)
    }
}

impl<T: Ord + Clone> BitAnd<&RangeSet<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitand(self, other: &RangeSet<T>) -> RangeSet<T> {
        self.intersection(other)
    }
}

impl<T: Ord + Clone> Sub<&RangeSet<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn sub(self, other: &RangeSet<T>) -> RangeSet<T> {
        self.difference(other)
    }
}

#[cfg(test)]
mod tests {
    use cmd_util::env::env_config;
    use proptest::prelude::*;

    use crate::{
        test_helpers::{
            int_range,
            int_set,
            small_range_set,
        },
        Range,
        RangeSet,
    };

    #[test]
    fn test_union_coalesces_across_inputs() {
        let left = int_set(vec![int_range(1, 5), int_range(20, 25)]);
        let right = int_set(vec![int_range(5, 10), int_range(22, 30)]);
        assert_eq!(
            left.union(&right).iter().collect::<Vec<_>>(),
            vec![int_range(1, 10), int_range(20, 30)]
        );
    }

    #[test]
    fn test_intersection_segments() {
        let left = int_set(vec![int_range(1, 10), int_range(15, 20)]);
        let right = int_set(vec![int_range(5, 16), Range::at_least(18)]);
        assert_eq!(
            left.intersection(&right).iter().collect::<Vec<_>>(),
            vec![int_range(5, 10), int_range(15, 16), int_range(18, 20)]
        );

        // Touching inputs share no values.
        let left = int_set(vec![int_range(1, 5)]);
        let right = int_set(vec![int_range(5, 9)]);
        assert!(left.intersection(&right).is_empty());
    }

    #[test]
    fn test_difference() {
        let left = int_set(vec![int_range(1, 10)]);
        let right = int_set(vec![int_range(3, 5), int_range(8, 20)]);
        assert_eq!(
            left.difference(&right).iter().collect::<Vec<_>>(),
            vec![int_range(1, 3), int_range(5, 8)]
        );
    }

    #[test]
    fn test_operators() {
        let left = int_set(vec![int_range(1, 5)]);
        let right = int_set(vec![int_range(3, 9)]);
        assert_eq!(&left | &right, int_set(vec![int_range(1, 9)]));
        assert_eq!(&left & &right, int_set(vec![int_range(3, 5)]));
        assert_eq!(&left - &right, int_set(vec![int_range(1, 3)]));
    }

    #[test]
    fn test_algebra_with_empty() {
        let set = int_set(vec![int_range(1, 5)]);
        let empty = RangeSet::new();
        assert_eq!(set.union(&empty), set);
        assert_eq!(set.intersection(&empty), empty);
        assert_eq!(set.difference(&empty), set);
        assert_eq!(empty.difference(&set), empty);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256 * env_config("RANGESET_PROPTEST_MULTIPLIER", 1),
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn proptest_algebra_pointwise(left in small_range_set(), right in small_range_set()) {
            let union = left.union(&right);
            let intersection = left.intersection(&right);
            let difference = left.difference(&right);
            union.check_invariants();
            intersection.check_invariants();
            difference.check_invariants();
            for v in -1..34i32 {
                assert_eq!(union.contains(&v), left.contains(&v) || right.contains(&v));
                assert_eq!(intersection.contains(&v), left.contains(&v) && right.contains(&v));
                assert_eq!(difference.contains(&v), left.contains(&v) && !right.contains(&v));
            }
        }

        #[test]
        fn proptest_union_matches_adds(left in small_range_set(), right in small_range_set()) {
            // The merge walk and repeated `add` must agree exactly.
            let mut by_add = left.clone();
            by_add.extend(right.iter());
            assert_eq!(left.union(&right), by_add);
        }
    }
}

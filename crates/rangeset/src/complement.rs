use std::{
    collections::{
        btree_map,
        BTreeMap,
    },
    ops::Bound,
};

use crate::{
    cut::Cut,
    range::Range,
    set::RangeSet,
};

/// Read-only view of everything a [`RangeSet`] does not cover.
///
/// Holds only a borrow of the backing set; every query derives gaps from the
/// live backing map, so there is no state to fall out of date.
pub struct Complement<'a, T> {
    backing: &'a RangeSet<T>,
}

impl<'a, T: Ord + Clone> Complement<'a, T> {
    pub(crate) fn new(backing: &'a RangeSet<T>) -> Self {
        Self { backing }
    }

    /// The backing set itself: complementing twice hands back the original
    /// set, never a doubly wrapped view.
    pub fn complement(&self) -> &'a RangeSet<T> {
        self.backing
    }

    /// The maximal uncovered ranges in ascending order.
    pub fn iter(&self) -> Gaps<'a, T> {
        Gaps {
            cursor: Some(Cut::BelowAll),
            inner: self.backing.ranges.iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        !self.backing.contains(value)
    }

    /// The gap containing `value`, if the backing set does not cover it.
    pub fn range_containing(&self, value: &T) -> Option<Range<T>> {
        let probe = Cut::BelowValue(value.clone());
        let below = self
            .backing
            .ranges
            .range((Bound::Unbounded, Bound::Included(&probe)))
            .next_back();
        if let Some((_, upper)) = below {
            if !upper.is_less_than(value) {
                return None;
            }
        }
        let lower = match below {
            Some((_, upper)) => upper.clone(),
            None => Cut::BelowAll,
        };
        let upper = match self
            .backing
            .ranges
            .range((Bound::Excluded(&probe), Bound::Unbounded))
            .next()
        {
            Some((next_lower, _)) => next_lower.clone(),
            None => Cut::AboveAll,
        };
        Some(Range::from_cuts(lower, upper))
    }

    pub fn encloses(&self, range: &Range<T>) -> bool {
        // A connected range missed entirely by the backing set lies within a
        // single gap.
        range.is_empty() || !self.backing.intersects(range)
    }

    pub fn intersects(&self, range: &Range<T>) -> bool {
        // Stored ranges never touch, so the backing set covers a connected
        // range iff a single entry encloses it.
        !range.is_empty() && !self.backing.encloses(range)
    }

    pub fn span(&self) -> Option<Range<T>> {
        let ranges = &self.backing.ranges;
        let (first_lower, first_upper) = match ranges.iter().next() {
            Some(entry) => entry,
            None => return Some(Range::all()),
        };
        let (last_lower, last_upper) = ranges
            .iter()
            .next_back()
            .expect("non-empty map has a last entry");
        let lower = match first_lower {
            Cut::BelowAll => first_upper.clone(),
            _ => Cut::BelowAll,
        };
        let upper = match last_upper {
            Cut::AboveAll => last_lower.clone(),
            _ => Cut::AboveAll,
        };
        if lower < upper {
            Some(Range::from_cuts(lower, upper))
        } else {
            None
        }
    }

    /// Materialize the gaps into an owned set.
    pub fn to_range_set(&self) -> RangeSet<T> {
        let mut ranges = BTreeMap::new();
        for gap in self.iter() {
            let (lower, upper) = gap.into_cuts();
            ranges.insert(lower, upper);
        }
        RangeSet { ranges }
    }
}

/// Read-write complement view. Reads see the gaps of the backing set;
/// mutations translate into the inverse mutation on it.
pub struct ComplementMut<'a, T> {
    backing: &'a mut RangeSet<T>,
}

impl<'a, T: Ord + Clone> ComplementMut<'a, T> {
    pub(crate) fn new(backing: &'a mut RangeSet<T>) -> Self {
        Self { backing }
    }

    /// Consume the view and hand back the backing set (double-complement
    /// identity).
    pub fn complement(self) -> &'a mut RangeSet<T> {
        self.backing
    }

    /// Adding to the complement carves the range out of the backing set.
    pub fn add(&mut self, range: Range<T>) {
        self.backing.remove(&range);
    }

    /// Removing from the complement covers the range in the backing set.
    pub fn remove(&mut self, range: &Range<T>) {
        self.backing.add(range.clone());
    }

    pub fn iter(&self) -> Gaps<'_, T> {
        Complement::new(self.backing).iter()
    }

    pub fn is_empty(&self) -> bool {
        Complement::new(self.backing).is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        Complement::new(self.backing).contains(value)
    }

    pub fn range_containing(&self, value: &T) -> Option<Range<T>> {
        Complement::new(self.backing).range_containing(value)
    }

    pub fn encloses(&self, range: &Range<T>) -> bool {
        Complement::new(self.backing).encloses(range)
    }

    pub fn intersects(&self, range: &Range<T>) -> bool {
        Complement::new(self.backing).intersects(range)
    }

    pub fn span(&self) -> Option<Range<T>> {
        Complement::new(self.backing).span()
    }

    pub fn to_range_set(&self) -> RangeSet<T> {
        Complement::new(self.backing).to_range_set()
    }
}

/// Iterator over the maximal ranges not covered by the backing set,
/// ascending.
pub struct Gaps<'a, T> {
    cursor: Option<Cut<T>>,
    inner: btree_map::Iter<'a, Cut<T>, Cut<T>>,
}

impl<'a, T: Ord + Clone> Iterator for Gaps<'a, T> {
    type Item = Range<T>;

    fn next(&mut self) -> Option<Range<T>> {
        loop {
            let start = self.cursor.take()?;
            match self.inner.next() {
                Some((lower, upper)) => {
                    self.cursor = Some(upper.clone());
                    // `start == lower` only when the first stored range is
                    // itself unbounded below; no gap there.
                    if start < *lower {
                        return Some(Range::from_cuts(start, lower.clone()));
                    }
                },
                None => {
                    if start < Cut::AboveAll {
                        return Some(Range::from_cuts(start, Cut::AboveAll));
                    }
                    return None;
                },
            }
        }
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
    fn test_complement_gaps() {
        let set = int_set(vec![int_range(1, 5), int_range(10, 15)]);
        assert_eq!(
            set.complement().iter().collect::<Vec<_>>(),
            vec![Range::less_than(1), int_range(5, 10), Range::at_least(15)]
        );
    }

    #[test]
    fn test_complement_of_empty_and_full() {
        let empty = RangeSet::<i32>::new();
        assert_eq!(empty.complement().iter().collect::<Vec<_>>(), vec![Range::all()]);
        assert_eq!(empty.complement().span(), Some(Range::all()));

        let mut full = RangeSet::new();
        full.add(Range::<i32>::all());
        assert!(full.complement().is_empty());
        assert_eq!(full.complement().iter().next(), None);
        assert_eq!(full.complement().span(), None);
    }

    #[test]
    fn test_complement_unbounded_edges() {
        let set = int_set(vec![Range::less_than(1), int_range(5, 10)]);
        assert_eq!(
            set.complement().iter().collect::<Vec<_>>(),
            vec![int_range(1, 5), Range::at_least(10)]
        );
        assert_eq!(set.complement().span(), Some(Range::at_least(1)));
    }

    #[test]
    fn test_complement_queries() {
        let set = int_set(vec![int_range(1, 5)]);
        let complement = set.complement();
        assert!(complement.contains(&0));
        assert!(!complement.contains(&3));
        assert_eq!(complement.range_containing(&3), None);
        assert_eq!(complement.range_containing(&7), Some(Range::at_least(5)));
        assert_eq!(complement.range_containing(&0), Some(Range::less_than(1)));
        assert!(complement.encloses(&Range::at_least(5)));
        assert!(!complement.encloses(&int_range(4, 6)));
        assert!(complement.intersects(&int_range(4, 6)));
        assert!(!complement.intersects(&int_range(2, 4)));
    }

    #[test]
    fn test_double_complement_identity() {
        let set = int_set(vec![int_range(1, 5), int_range(10, 15)]);
        let complement = set.complement();
        // The double complement is the backing set itself, by reference.
        assert!(std::ptr::eq(complement.complement(), &set));
        assert_eq!(
            complement.to_range_set().complement().to_range_set(),
            set
        );
    }

    #[test]
    fn test_complement_mut_routes_mutations() {
        let mut set = int_set(vec![int_range(1, 5)]);
        let mut complement = set.complement_mut();
        // Adding to the complement removes from the backing set.
        complement.add(int_range(2, 3));
        // Removing from the complement adds to the backing set.
        complement.remove(&int_range(7, 9));
        assert!(complement.contains(&2));
        assert!(!complement.contains(&8));
        assert_eq!(
            complement.complement().iter().collect::<Vec<_>>(),
            vec![int_range(1, 2), int_range(3, 5), int_range(7, 9)]
        );
        set.check_invariants();
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256 * env_config("RANGESET_PROPTEST_MULTIPLIER", 1),
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn proptest_complement_partitions_domain(set in small_range_set(), v in -1..34i32) {
            let complement = set.complement();
            assert_ne!(set.contains(&v), complement.contains(&v));
            assert_eq!(complement.contains(&v), complement.range_containing(&v).is_some());
        }

        #[test]
        fn proptest_complement_round_trip(set in small_range_set()) {
            let materialized = set.complement().to_range_set();
            materialized.check_invariants();
            assert_eq!(materialized.complement().to_range_set(), set);
        }
    }
}

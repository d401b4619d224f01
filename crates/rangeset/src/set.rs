use std::{
    collections::{
        btree_map,
        BTreeMap,
    },
    ops::Bound,
};

use crate::{
    complement::{
        Complement,
        ComplementMut,
    },
    cut::Cut,
    discrete::{
        DiscreteDomain,
        Elements,
    },
    error::RangeError,
    range::Range,
    sub::{
        SubRangeSet,
        SubRangeSetMut,
    },
};

/// A set of values over an ordered domain, stored as the minimal collection
/// of disjoint, non-adjacent, non-empty ranges.
///
/// The backing map goes from each range's lower cut to its upper cut and is
/// ordered by lower cut, so neighbor lookups during mutation are a floor
/// probe plus a short forward scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeSet<T> {
    pub(crate) ranges: BTreeMap<Cut<T>, Cut<T>>,
}

impl<T> RangeSet<T> {
    pub fn new() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    /// True if no value is in the set.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// How many disjoint ranges are in the set?
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

impl<T> Default for RangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> RangeSet<T> {
    /// Add `range` to the set, coalescing it with every stored range it
    /// overlaps or touches.
    ///
    /// Cost is O(log n + k) with k absorbed neighbors; each absorbed entry
    /// charges back to the insertion that created it, so a long run of adds
    /// is amortized O(log n) apiece.
    pub fn add(&mut self, range: Range<T>) {
        if range.is_empty() {
            return;
        }
        let (mut lower, mut upper) = range.into_cuts();
        let mut absorbed = Vec::new();
        // The nearest range starting below ours is connected to us iff it
        // reaches our lower cut.
        if let Some((prev_lower, prev_upper)) = self
            .ranges
            .range((Bound::Unbounded, Bound::Excluded(&lower)))
            .next_back()
        {
            if *prev_upper >= lower {
                absorbed.push(prev_lower.clone());
            }
        }
        // Every range starting inside ours (or exactly at our upper cut) is
        // connected.
        for (next_lower, _) in self.ranges.range((Bound::Included(&lower), Bound::Unbounded)) {
            if *next_lower > upper {
                break;
            }
            absorbed.push(next_lower.clone());
        }
        for key in absorbed {
            let (entry_lower, entry_upper) = self
                .ranges
                .remove_entry(&key)
                .expect("absorbed range must be stored");
            if entry_lower < lower {
                lower = entry_lower;
            }
            if entry_upper > upper {
                upper = entry_upper;
            }
        }
        self.ranges.insert(lower, upper);
    }

    /// Remove `range` from the set. A stored range overlapping it is deleted
    /// and up to two surviving remnants are reinserted, so this can shrink,
    /// split, or drop stored ranges but never disturbs their neighbors.
    pub fn remove(&mut self, range: &Range<T>) {
        if range.is_empty() {
            return;
        }
        let (lower, upper) = (range.lower(), range.upper());
        let mut overlapping = Vec::new();
        if let Some((prev_lower, prev_upper)) = self
            .ranges
            .range((Bound::Unbounded, Bound::Excluded(lower)))
            .next_back()
        {
            // Touching from the left is not overlap; nothing to remove there.
            if *prev_upper > *lower {
                overlapping.push(prev_lower.clone());
            }
        }
        for (next_lower, _) in self.ranges.range((Bound::Included(lower), Bound::Unbounded)) {
            if *next_lower >= *upper {
                break;
            }
            overlapping.push(next_lower.clone());
        }
        for key in overlapping {
            let (entry_lower, entry_upper) = self
                .ranges
                .remove_entry(&key)
                .expect("overlapping range must be stored");
            if entry_lower < *lower {
                self.ranges.insert(entry_lower, lower.clone());
            }
            if entry_upper > *upper {
                self.ranges.insert(upper.clone(), entry_upper);
            }
        }
    }

    /// True if some stored range contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        let probe = Cut::BelowValue(value.clone());
        match self
            .ranges
            .range((Bound::Unbounded, Bound::Included(&probe)))
            .next_back()
        {
            // Only the nearest range starting at or below `value` can
            // contain it.
            Some((_, upper)) => !upper.is_less_than(value),
            None => false,
        }
    }

    /// The stored range containing `value`, if any.
    pub fn range_containing(&self, value: &T) -> Option<Range<T>> {
        let probe = Cut::BelowValue(value.clone());
        let (lower, upper) = self
            .ranges
            .range((Bound::Unbounded, Bound::Included(&probe)))
            .next_back()?;
        if upper.is_less_than(value) {
            return None;
        }
        Some(Range::from_cuts(lower.clone(), upper.clone()))
    }

    /// True if some single stored range encloses `range`. Since stored
    /// ranges never touch, a range covered by the set is covered by exactly
    /// one entry.
    pub fn encloses(&self, range: &Range<T>) -> bool {
        match self
            .ranges
            .range((Bound::Unbounded, Bound::Included(range.lower())))
            .next_back()
        {
            Some((_, upper)) => *range.upper() <= *upper,
            None => false,
        }
    }

    /// True if some stored range shares at least one value with `range`.
    /// Ranges that merely touch at a shared cut do not intersect: `{[1, 5)}`
    /// does not intersect `[5, 7)`.
    pub fn intersects(&self, range: &Range<T>) -> bool {
        if range.is_empty() {
            return false;
        }
        if let Some((_, upper)) = self
            .ranges
            .range((Bound::Unbounded, Bound::Included(range.lower())))
            .next_back()
        {
            if *upper > *range.lower() {
                return true;
            }
        }
        self.ranges
            .range((Bound::Excluded(range.lower()), Bound::Unbounded))
            .next()
            .is_some_and(|(lower, _)| *lower < *range.upper())
    }

    /// The smallest range enclosing the whole set, or `None` if the set is
    /// empty.
    pub fn span(&self) -> Option<Range<T>> {
        let (lower, _) = self.ranges.iter().next()?;
        let (_, upper) = self.ranges.iter().next_back()?;
        Some(Range::from_cuts(lower.clone(), upper.clone()))
    }

    /// The stored ranges in ascending order. Lazy and read-only; reflects
    /// live state at the time of iteration.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.ranges.iter(),
        }
    }

    /// Everything the set does not cover, as a live read-only view.
    pub fn complement(&self) -> Complement<'_, T> {
        Complement::new(self)
    }

    /// Complement view that also accepts mutations, routing them back into
    /// this set.
    pub fn complement_mut(&mut self) -> ComplementMut<'_, T> {
        ComplementMut::new(self)
    }

    /// This set restricted to `bound`, as a live read-only view.
    pub fn sub_range_set(&self, bound: Range<T>) -> SubRangeSet<'_, T> {
        SubRangeSet::new(self, bound)
    }

    /// Restricted view that also accepts mutations clipped to `bound`.
    pub fn sub_range_set_mut(&mut self, bound: Range<T>) -> SubRangeSetMut<'_, T> {
        SubRangeSetMut::new(self, bound)
    }

    /// Walk the individual domain values in the set, ascending. Fails if the
    /// set extends below a domain with no minimum; a set unbounded above
    /// iterates until the domain runs out of successors.
    pub fn elements<'a, D: DiscreteDomain<T>>(
        &'a self,
        domain: &'a D,
    ) -> Result<Elements<'a, T, D>, RangeError> {
        if let Some((Cut::BelowAll, _)) = self.ranges.iter().next() {
            if domain.min_value().is_none() {
                return Err(RangeError::UnboundedBelow);
            }
        }
        Ok(Elements::new(domain, self.ranges.iter()))
    }

    /// The least domain value in the set, if any.
    pub fn first_element<D: DiscreteDomain<T>>(&self, domain: &D) -> Option<T> {
        for (lower, upper) in self.ranges.iter() {
            let first = match lower {
                Cut::BelowAll => domain.min_value(),
                Cut::BelowValue(v) => Some(v.clone()),
                Cut::AboveValue(v) => domain.next(v),
                Cut::AboveAll => None,
            };
            if let Some(first) = first {
                if !upper.is_less_than(&first) {
                    return Some(first);
                }
            }
        }
        None
    }

    /// The greatest domain value in the set, if any.
    pub fn last_element<D: DiscreteDomain<T>>(&self, domain: &D) -> Option<T> {
        for (lower, upper) in self.ranges.iter().rev() {
            let last = match upper {
                Cut::AboveAll => domain.max_value(),
                Cut::AboveValue(v) => Some(v.clone()),
                Cut::BelowValue(v) => domain.previous(v),
                Cut::BelowAll => None,
            };
            if let Some(last) = last {
                if lower.is_less_than(&last) {
                    return Some(last);
                }
            }
        }
        None
    }

    /// Total number of domain values in the set. `None` if the set is
    /// unbounded past what the domain can delimit, or if the count overflows
    /// a `u64`.
    pub fn element_count<D: DiscreteDomain<T>>(&self, domain: &D) -> Option<u64> {
        let mut total: u64 = 0;
        for (lower, upper) in self.ranges.iter() {
            let canonical =
                Range::from_cuts(lower.clone(), upper.clone()).canonical(domain);
            let count = match canonical.into_cuts() {
                (Cut::BelowValue(start), Cut::BelowValue(end)) => domain.distance(&start, &end),
                (Cut::BelowValue(start), Cut::AboveAll) => {
                    let max = domain.max_value()?;
                    domain.distance(&start, &max).checked_add(1)?
                },
                _ => return None,
            };
            total = total.checked_add(count)?;
        }
        Some(total)
    }
}

#[cfg(test)]
impl<T: Ord + Clone + std::fmt::Debug> RangeSet<T> {
    /// Assert the canonical-form invariants: every stored range is
    /// non-empty, and no two stored ranges touch or overlap.
    pub(crate) fn check_invariants(&self) {
        let entries: Vec<_> = self.ranges.iter().collect();
        for (lower, upper) in &entries {
            assert!(lower < upper, "stored empty range at {lower:?}");
        }
        for window in entries.windows(2) {
            let (_, first_upper) = window[0];
            let (second_lower, _) = window[1];
            assert!(
                first_upper < second_lower,
                "stored ranges touch or overlap at {first_upper:?} / {second_lower:?}"
            );
        }
    }
}

impl<T: Ord + Clone> Extend<Range<T>> for RangeSet<T> {
    fn extend<I: IntoIterator<Item = Range<T>>>(&mut self, iter: I) {
        for range in iter {
            self.add(range);
        }
    }
}

impl<T: Ord + Clone> FromIterator<Range<T>> for RangeSet<T> {
    fn from_iter<I: IntoIterator<Item = Range<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: Ord + Clone> IntoIterator for &'a RangeSet<T> {
    type IntoIter = Iter<'a, T>;
    type Item = Range<T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over the stored ranges of a [`RangeSet`], ascending by lower
/// cut.
pub struct Iter<'a, T> {
    inner: btree_map::Iter<'a, Cut<T>, Cut<T>>,
}

impl<'a, T: Ord + Clone> Iterator for Iter<'a, T> {
    type Item = Range<T>;

    fn next(&mut self) -> Option<Range<T>> {
        let (lower, upper) = self.inner.next()?;
        Some(Range::from_cuts(lower.clone(), upper.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Ord + Clone> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Range<T>> {
        let (lower, upper) = self.inner.next_back()?;
        Some(Range::from_cuts(lower.clone(), upper.clone()))
    }
}

impl<'a, T: Ord + Clone> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

use std::{
    cmp,
    ops::Bound,
};

use crate::{
    error::RangeError,
    range::Range,
    set::RangeSet,
};

/// Ranges of `backing` clipped to `bound`, ascending. A stored range
/// straddling either edge of the bound shows up trimmed.
fn clipped<'a, T: Ord + Clone>(
    backing: &'a RangeSet<T>,
    bound: &'a Range<T>,
) -> impl Iterator<Item = Range<T>> + 'a {
    let bound_lower = bound.lower();
    let bound_upper = bound.upper();
    // A range starting below the bound can still reach into it.
    let start = match backing
        .ranges
        .range((Bound::Unbounded, Bound::Included(bound_lower)))
        .next_back()
    {
        Some((floor_lower, floor_upper)) if *floor_upper > *bound_lower => {
            Bound::Included(floor_lower)
        },
        _ => Bound::Excluded(bound_lower),
    };
    backing
        .ranges
        .range((start, Bound::Unbounded))
        .take_while(move |(lower, _)| *lower < bound_upper)
        .filter_map(move |(lower, upper)| {
            let lower = cmp::max(lower, bound_lower).clone();
            let upper = cmp::min(upper, bound_upper).clone();
            if lower < upper {
                Some(Range::from_cuts(lower, upper))
            } else {
                None
            }
        })
}

fn clipped_span<T: Ord + Clone>(backing: &RangeSet<T>, bound: &Range<T>) -> Option<Range<T>> {
    let mut iter = clipped(backing, bound);
    let first = iter.next()?;
    match iter.last() {
        Some(last) => Some(first.span(&last)),
        None => Some(first),
    }
}

// Compose a view bound with a further restriction. Disconnected bounds leave
// nothing visible, expressed as an empty bound.
fn compose_bounds<T: Ord + Clone>(bound: &Range<T>, restriction: Range<T>) -> Range<T> {
    match bound.intersection(&restriction) {
        Ok(intersection) => intersection,
        Err(_) => Range::from_cuts(bound.lower().clone(), bound.lower().clone()),
    }
}

/// Read-only view of a [`RangeSet`] restricted to a bounding range.
pub struct SubRangeSet<'a, T> {
    backing: &'a RangeSet<T>,
    bound: Range<T>,
}

impl<'a, T: Ord + Clone> SubRangeSet<'a, T> {
    pub(crate) fn new(backing: &'a RangeSet<T>, bound: Range<T>) -> Self {
        Self { backing, bound }
    }

    pub fn bound(&self) -> &Range<T> {
        &self.bound
    }

    /// Restrict further; bounds compose by intersection.
    pub fn sub_range_set(self, restriction: Range<T>) -> SubRangeSet<'a, T> {
        let bound = compose_bounds(&self.bound, restriction);
        SubRangeSet {
            backing: self.backing,
            bound,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Range<T>> + '_ {
        clipped(self.backing, &self.bound)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.bound.contains(value) && self.backing.contains(value)
    }

    pub fn range_containing(&self, value: &T) -> Option<Range<T>> {
        if !self.bound.contains(value) {
            return None;
        }
        let range = self.backing.range_containing(value)?;
        Some(
            range
                .intersection(&self.bound)
                .expect("ranges sharing a value are connected"),
        )
    }

    pub fn encloses(&self, range: &Range<T>) -> bool {
        self.bound.encloses(range) && self.backing.encloses(range)
    }

    pub fn intersects(&self, range: &Range<T>) -> bool {
        match self.bound.intersection(range) {
            Ok(visible) => self.backing.intersects(&visible),
            Err(_) => false,
        }
    }

    pub fn span(&self) -> Option<Range<T>> {
        clipped_span(self.backing, &self.bound)
    }

    pub fn to_range_set(&self) -> RangeSet<T> {
        self.iter().collect()
    }
}

/// Restricted view that also accepts mutations. Reads are clipped to the
/// bound; writes must respect it.
pub struct SubRangeSetMut<'a, T> {
    backing: &'a mut RangeSet<T>,
    bound: Range<T>,
}

impl<'a, T: Ord + Clone> SubRangeSetMut<'a, T> {
    pub(crate) fn new(backing: &'a mut RangeSet<T>, bound: Range<T>) -> Self {
        Self { backing, bound }
    }

    pub fn bound(&self) -> &Range<T> {
        &self.bound
    }

    pub fn sub_range_set(self, restriction: Range<T>) -> SubRangeSetMut<'a, T> {
        let bound = compose_bounds(&self.bound, restriction);
        SubRangeSetMut {
            backing: self.backing,
            bound,
        }
    }

    /// Add `range` to the backing set. Fails if the view's bound does not
    /// enclose it; nothing is mutated on failure.
    pub fn add(&mut self, range: Range<T>) -> Result<(), RangeError> {
        if range.is_empty() {
            return Ok(());
        }
        if !self.bound.encloses(&range) {
            return Err(RangeError::OutsideBound);
        }
        self.backing.add(range);
        Ok(())
    }

    /// Remove the portion of `range` that falls inside the bound. The part
    /// outside is untouched; a range entirely outside is a no-op.
    pub fn remove(&mut self, range: &Range<T>) {
        if let Ok(visible) = self.bound.intersection(range) {
            self.backing.remove(&visible);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Range<T>> + '_ {
        clipped(self.backing, &self.bound)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.bound.contains(value) && self.backing.contains(value)
    }

    pub fn encloses(&self, range: &Range<T>) -> bool {
        self.bound.encloses(range) && self.backing.encloses(range)
    }

    pub fn intersects(&self, range: &Range<T>) -> bool {
        match self.bound.intersection(range) {
            Ok(visible) => self.backing.intersects(&visible),
            Err(_) => false,
        }
    }

    pub fn span(&self) -> Option<Range<T>> {
        clipped_span(self.backing, &self.bound)
    }
}

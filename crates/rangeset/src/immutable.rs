use crate::{
    cut::Cut,
    error::RangeError,
    range::Range,
    set::RangeSet,
};

/// A frozen snapshot of disjoint, non-adjacent ranges.
///
/// Storage is a flat vector sorted by lower cut, queries are binary
/// searches, and there is no mutation surface: freezing is how a set opts
/// out of `add`/`remove` entirely.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImmutableRangeSet<T> {
    ranges: Vec<Range<T>>,
}

impl<T: Ord + Clone> ImmutableRangeSet<T> {
    pub fn builder() -> Builder<T> {
        Builder { ranges: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Range<T>> + '_ {
        self.ranges.iter()
    }

    /// Index of the last range starting at or below `probe`, if any.
    fn floor_index(&self, probe: &Cut<T>) -> Option<usize> {
        self.ranges
            .partition_point(|range| range.lower() <= probe)
            .checked_sub(1)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.range_containing(value).is_some()
    }

    pub fn range_containing(&self, value: &T) -> Option<&Range<T>> {
        let probe = Cut::BelowValue(value.clone());
        let index = self.floor_index(&probe)?;
        let range = &self.ranges[index];
        range.contains(value).then_some(range)
    }

    pub fn encloses(&self, range: &Range<T>) -> bool {
        match self.floor_index(range.lower()) {
            Some(index) => self.ranges[index].encloses(range),
            None => false,
        }
    }

    pub fn intersects(&self, range: &Range<T>) -> bool {
        if range.is_empty() {
            return false;
        }
        if let Some(index) = self.floor_index(range.lower()) {
            if *self.ranges[index].upper() > *range.lower() {
                return true;
            }
        }
        let next = self
            .ranges
            .partition_point(|stored| stored.lower() <= range.lower());
        self.ranges
            .get(next)
            .is_some_and(|stored| *stored.lower() < *range.upper())
    }

    pub fn span(&self) -> Option<Range<T>> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        Some(first.span(last))
    }

    /// Thaw back into a mutable set.
    pub fn to_range_set(&self) -> RangeSet<T> {
        self.ranges.iter().cloned().collect()
    }
}

/// Freezing a canonical set never fails: its ranges are already disjoint and
/// non-adjacent.
impl<T: Ord + Clone> From<RangeSet<T>> for ImmutableRangeSet<T> {
    fn from(set: RangeSet<T>) -> Self {
        Self {
            ranges: set.iter().collect(),
        }
    }
}

/// Accumulates ranges for an [`ImmutableRangeSet`].
///
/// Consuming: `build` takes the builder by value, so reuse after build is a
/// compile error rather than an aliasing hazard.
pub struct Builder<T> {
    ranges: Vec<Range<T>>,
}

impl<T: Ord + Clone> Builder<T> {
    /// Queue `range`. Validation happens at `build`; empty ranges carry no
    /// points and are dropped here.
    pub fn add(mut self, range: Range<T>) -> Self {
        if !range.is_empty() {
            self.ranges.push(range);
        }
        self
    }

    pub fn add_all<I: IntoIterator<Item = Range<T>>>(mut self, ranges: I) -> Self {
        for range in ranges {
            self = self.add(range);
        }
        self
    }

    /// Sort the queued ranges and fail with [`RangeError::ConnectedRanges`]
    /// if any two overlap or touch. Unlike [`RangeSet::add`], the immutable
    /// variant never coalesces: connected inputs are a caller bug.
    pub fn build(mut self) -> Result<ImmutableRangeSet<T>, RangeError> {
        self.ranges.sort_by(|a, b| a.lower().cmp(b.lower()));
        // Sorted by lower cut, so any connected pair includes a connected
        // neighbor pair.
        for window in self.ranges.windows(2) {
            if window[0].is_connected(&window[1]) {
                return Err(RangeError::ConnectedRanges);
            }
        }
        Ok(ImmutableRangeSet {
            ranges: self.ranges,
        })
    }
}

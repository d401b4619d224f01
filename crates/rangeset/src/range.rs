use std::{
    cmp,
    fmt,
};

use crate::{
    cut::Cut,
    discrete::DiscreteDomain,
    error::RangeError,
};

/// A contiguous, possibly unbounded span of an ordered domain, expressed as a
/// pair of cuts with `lower <= upper`. `lower == upper` is the empty range,
/// valid as a transient value but never stored in a set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Range<T> {
    lower: Cut<T>,
    upper: Cut<T>,
}

// Ordered by lower cut, then upper. Hand-written for the same reason as on
// `Cut`: the derive would demand `Cut<T>: PartialOrd` under too-weak bounds.
impl<T: Ord> Ord for Range<T> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.lower
            .cmp(&other.lower)
            .then_with(|| self.upper.cmp(&other.upper))
    }
}

impl<T: Ord> PartialOrd for Range<T> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Range<T> {
    /// The general constructor; rejects inverted bounds. `open(v, v)` and
    /// friends reduce to exactly this check, since in cut order
    /// `AboveValue(v) > BelowValue(v)`.
    pub fn new(lower: Cut<T>, upper: Cut<T>) -> Result<Self, RangeError> {
        if lower > upper {
            return Err(RangeError::InvertedBounds);
        }
        Ok(Self { lower, upper })
    }

    /// `[lower, upper]`
    pub fn closed(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(Cut::BelowValue(lower), Cut::AboveValue(upper))
    }

    /// `(lower, upper)`
    pub fn open(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(Cut::AboveValue(lower), Cut::BelowValue(upper))
    }

    /// `[lower, upper)`
    pub fn closed_open(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(Cut::BelowValue(lower), Cut::BelowValue(upper))
    }

    /// `(lower, upper]`
    pub fn open_closed(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(Cut::AboveValue(lower), Cut::AboveValue(upper))
    }

    /// `[value, value]`
    pub fn singleton(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            lower: Cut::BelowValue(value.clone()),
            upper: Cut::AboveValue(value),
        }
    }

    /// `[value, +∞)`
    pub fn at_least(value: T) -> Self {
        Self {
            lower: Cut::BelowValue(value),
            upper: Cut::AboveAll,
        }
    }

    /// `(value, +∞)`
    pub fn greater_than(value: T) -> Self {
        Self {
            lower: Cut::AboveValue(value),
            upper: Cut::AboveAll,
        }
    }

    /// `(-∞, value]`
    pub fn at_most(value: T) -> Self {
        Self {
            lower: Cut::BelowAll,
            upper: Cut::AboveValue(value),
        }
    }

    /// `(-∞, value)`
    pub fn less_than(value: T) -> Self {
        Self {
            lower: Cut::BelowAll,
            upper: Cut::BelowValue(value),
        }
    }

    /// `(-∞, +∞)`
    pub const fn all() -> Self {
        Self {
            lower: Cut::BelowAll,
            upper: Cut::AboveAll,
        }
    }

    pub fn lower(&self) -> &Cut<T> {
        &self.lower
    }

    pub fn upper(&self) -> &Cut<T> {
        &self.upper
    }

    pub(crate) fn from_cuts(lower: Cut<T>, upper: Cut<T>) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }

    pub(crate) fn into_cuts(self) -> (Cut<T>, Cut<T>) {
        (self.lower, self.upper)
    }

    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    pub fn contains(&self, value: &T) -> bool {
        self.lower.is_less_than(value) && !self.upper.is_less_than(value)
    }

    pub fn encloses(&self, other: &Self) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// True if the ranges overlap or touch with no gap between them. The
    /// shared region may be empty: `[1, 5)` and `[5, 7)` are connected.
    pub fn is_connected(&self, other: &Self) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl<T: Ord + Clone> Range<T> {
    /// The largest range enclosed by both inputs, possibly empty. Fails if
    /// the inputs are separated by a gap.
    pub fn intersection(&self, other: &Self) -> Result<Self, RangeError> {
        if !self.is_connected(other) {
            return Err(RangeError::NotConnected);
        }
        let lower = cmp::max(&self.lower, &other.lower).clone();
        let upper = cmp::min(&self.upper, &other.upper).clone();
        Ok(Self { lower, upper })
    }

    /// The smallest range enclosing both inputs, whether or not they are
    /// connected.
    pub fn span(&self, other: &Self) -> Self {
        let lower = cmp::min(&self.lower, &other.lower).clone();
        let upper = cmp::max(&self.upper, &other.upper).clone();
        Self { lower, upper }
    }

    /// The maximal range strictly between the inputs. Abutting ranges have an
    /// empty gap; ranges that share points have none.
    pub fn gap(&self, other: &Self) -> Result<Self, RangeError> {
        if self.lower < other.upper && other.lower < self.upper {
            return Err(RangeError::Overlap);
        }
        let (first, second) = if self.lower <= other.lower {
            (self, other)
        } else {
            (other, self)
        };
        Ok(Self {
            lower: first.upper.clone(),
            upper: second.lower.clone(),
        })
    }

    /// Rewrite to closed-open form over a discrete domain: `[1, 5]` over the
    /// integers becomes `[1, 6)`. Emptiness and membership are preserved.
    pub fn canonical<D: DiscreteDomain<T>>(&self, domain: &D) -> Self {
        Self {
            lower: canonical_cut(&self.lower, domain),
            upper: canonical_cut(&self.upper, domain),
        }
    }
}

// Both cuts go through the same rewrite so that equal cuts stay equal and
// empty ranges stay empty.
fn canonical_cut<T: Ord + Clone, D: DiscreteDomain<T>>(cut: &Cut<T>, domain: &D) -> Cut<T> {
    match cut {
        Cut::BelowAll => match domain.min_value() {
            Some(min) => Cut::BelowValue(min),
            None => Cut::BelowAll,
        },
        Cut::BelowValue(v) => Cut::BelowValue(v.clone()),
        Cut::AboveValue(v) => match domain.next(v) {
            Some(next) => Cut::BelowValue(next),
            None => Cut::AboveAll,
        },
        Cut::AboveAll => Cut::AboveAll,
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Cut::BelowAll => write!(f, "(-∞")?,
            Cut::BelowValue(v) => write!(f, "[{v}")?,
            Cut::AboveValue(v) => write!(f, "({v}")?,
            Cut::AboveAll => write!(f, "(+∞")?,
        }
        write!(f, "..")?;
        match &self.upper {
            Cut::BelowAll => write!(f, "-∞)"),
            Cut::BelowValue(v) => write!(f, "{v})"),
            Cut::AboveValue(v) => write!(f, "{v}]"),
            Cut::AboveAll => write!(f, "+∞)"),
        }
    }
}

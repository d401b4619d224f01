//! Boundary markers between values of an ordered domain.
//!
//! A cut can't reuse [`std::ops::Bound`] directly: `Unbounded` is the minimum
//! when used as a lower bound and the maximum when used as an upper bound, so
//! the two sentinels have to be distinct variants for cuts to be totally
//! ordered.
use std::cmp::Ordering;

/// A position between values of an ordered domain.
///
/// `BelowValue(v)` sits immediately below `v`, so it acts as an inclusive
/// lower bound and an exclusive upper bound. `AboveValue(v)` sits immediately
/// above `v`: exclusive lower, inclusive upper. The sentinels sit below and
/// above every value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cut<T> {
    BelowAll,
    BelowValue(T),
    AboveValue(T),
    AboveAll,
}

impl<T: Ord> Ord for Cut<T> {
    // Not derivable: a derive compares variant tags first and would put every
    // `BelowValue` below every `AboveValue` regardless of value.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cut::BelowAll, Cut::BelowAll) => Ordering::Equal,
            (Cut::BelowAll, _) => Ordering::Less,
            (_, Cut::BelowAll) => Ordering::Greater,
            (Cut::AboveAll, Cut::AboveAll) => Ordering::Equal,
            (Cut::AboveAll, _) => Ordering::Greater,
            (_, Cut::AboveAll) => Ordering::Less,
            (Cut::BelowValue(l), Cut::BelowValue(r)) => l.cmp(r),
            (Cut::AboveValue(l), Cut::AboveValue(r)) => l.cmp(r),
            (Cut::BelowValue(l), Cut::AboveValue(r)) => l.cmp(r).then(Ordering::Less),
            (Cut::AboveValue(l), Cut::BelowValue(r)) => l.cmp(r).then(Ordering::Greater),
        }
    }
}

impl<T: Ord> PartialOrd for Cut<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Cut<T> {
    /// True if this cut sits strictly below `value`, i.e. `value` lies on the
    /// upper side of the cut.
    pub fn is_less_than(&self, value: &T) -> bool {
        match self {
            Cut::BelowAll => true,
            Cut::BelowValue(v) => v <= value,
            Cut::AboveValue(v) => v < value,
            Cut::AboveAll => false,
        }
    }
}

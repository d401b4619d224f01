use std::collections::btree_map;

use crate::cut::Cut;

/// Successor/predecessor structure over an ordered domain. This is what lets
/// a range be rewritten to closed-open form and a bounded set be walked
/// element by element.
pub trait DiscreteDomain<T> {
    /// The least value strictly greater than `value`, if any.
    fn next(&self, value: &T) -> Option<T>;

    /// The greatest value strictly less than `value`, if any.
    fn previous(&self, value: &T) -> Option<T>;

    /// Number of successor steps from `start` to `end`. Callers pass
    /// `start <= end`.
    fn distance(&self, start: &T, end: &T) -> u64;

    fn min_value(&self) -> Option<T> {
        None
    }

    fn max_value(&self) -> Option<T> {
        None
    }
}

/// The discrete domain of the primitive integer types.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integers;

macro_rules! integer_domain {
    ($($t:ty),* $(,)?) => {
        $(
            impl DiscreteDomain<$t> for Integers {
                fn next(&self, value: &$t) -> Option<$t> {
                    value.checked_add(1)
                }

                fn previous(&self, value: &$t) -> Option<$t> {
                    value.checked_sub(1)
                }

                fn distance(&self, start: &$t, end: &$t) -> u64 {
                    end.abs_diff(*start) as u64
                }

                fn min_value(&self) -> Option<$t> {
                    Some(<$t>::MIN)
                }

                fn max_value(&self) -> Option<$t> {
                    Some(<$t>::MAX)
                }
            }
        )*
    };
}

integer_domain!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Iterator over the individual domain values covered by a range set, in
/// ascending order. Constructed by [`crate::RangeSet::elements`].
pub struct Elements<'a, T, D> {
    domain: &'a D,
    ranges: btree_map::Iter<'a, Cut<T>, Cut<T>>,
    value: Option<T>,
    upper: Option<Cut<T>>,
}

impl<'a, T, D> Elements<'a, T, D> {
    pub(crate) fn new(domain: &'a D, ranges: btree_map::Iter<'a, Cut<T>, Cut<T>>) -> Self {
        Self {
            domain,
            ranges,
            value: None,
            upper: None,
        }
    }
}

impl<'a, T: Ord + Clone, D: DiscreteDomain<T>> Iterator for Elements<'a, T, D> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.value.take() {
                let upper = self.upper.as_ref()?;
                if !upper.is_less_than(&value) {
                    self.value = self.domain.next(&value);
                    return Some(value);
                }
                // Walked past the end of this range; move on to the next one.
            }
            let (lower, upper) = self.ranges.next()?;
            self.value = match lower {
                Cut::BelowAll => self.domain.min_value(),
                Cut::BelowValue(v) => Some(v.clone()),
                Cut::AboveValue(v) => self.domain.next(v),
                Cut::AboveAll => None,
            };
            self.upper = Some(upper.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use must_let::must_let;

    use super::{
        DiscreteDomain,
        Integers,
    };
    use crate::{
        error::RangeError,
        test_helpers::{
            int_range,
            int_set,
        },
        Range,
        RangeSet,
    };

    #[test]
    fn test_integer_domain() {
        assert_eq!(Integers.next(&5i32), Some(6));
        assert_eq!(Integers.previous(&5i32), Some(4));
        assert_eq!(Integers.next(&i32::MAX), None);
        assert_eq!(Integers.previous(&i32::MIN), None);
        assert_eq!(Integers.distance(&3i32, &7), 4);
        assert_eq!(Integers.distance(&-2i64, &2), 4);
    }

    #[test]
    fn test_elements() {
        let mut set = int_set(vec![int_range(1, 4)]);
        set.add(Range::closed(10, 12).unwrap());
        let elements: Vec<i32> = set.elements(&Integers).unwrap().collect();
        assert_eq!(elements, vec![1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn test_elements_skips_hollow_ranges() {
        // (5, 6) is a valid non-empty range with no integer members.
        let set = int_set(vec![Range::open(5, 6).unwrap(), int_range(8, 9)]);
        let elements: Vec<i32> = set.elements(&Integers).unwrap().collect();
        assert_eq!(elements, vec![8]);
    }

    #[test]
    fn test_elements_unbounded_below() {
        // A domain with no extremes: the integers shifted away from their
        // representation limits.
        struct Unbounded;
        impl DiscreteDomain<i64> for Unbounded {
            fn next(&self, value: &i64) -> Option<i64> {
                value.checked_add(1)
            }

            fn previous(&self, value: &i64) -> Option<i64> {
                value.checked_sub(1)
            }

            fn distance(&self, start: &i64, end: &i64) -> u64 {
                end.abs_diff(*start)
            }
        }

        let set: RangeSet<i64> = [Range::less_than(5)].into_iter().collect();
        must_let!(let Err(RangeError::UnboundedBelow) = set.elements(&Unbounded));

        let set: RangeSet<i64> = [Range::closed_open(0, 5).unwrap()].into_iter().collect();
        let elements: Vec<i64> = set.elements(&Unbounded).unwrap().collect();
        assert_eq!(elements, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_first_last_element() {
        let set = int_set(vec![int_range(1, 4), int_range(10, 12)]);
        assert_eq!(set.first_element(&Integers), Some(1));
        assert_eq!(set.last_element(&Integers), Some(11));

        let set = int_set(vec![Range::open(5, 6).unwrap(), int_range(8, 10)]);
        assert_eq!(set.first_element(&Integers), Some(8));
        assert_eq!(set.last_element(&Integers), Some(9));

        let empty = RangeSet::<i32>::new();
        assert_eq!(empty.first_element(&Integers), None);
        assert_eq!(empty.last_element(&Integers), None);

        let unbounded = int_set(vec![int_range(1, 4), Range::at_least(7)]);
        assert_eq!(unbounded.last_element(&Integers), Some(i32::MAX));
    }

    #[test]
    fn test_element_count() {
        let set = int_set(vec![int_range(1, 4), int_range(10, 12)]);
        assert_eq!(set.element_count(&Integers), Some(5));

        let set = int_set(vec![Range::closed(1, 4).unwrap()]);
        assert_eq!(set.element_count(&Integers), Some(4));

        assert_eq!(RangeSet::<i32>::new().element_count(&Integers), Some(0));

        // Unbounded above over a domain with a maximum still counts.
        let mut bytes = RangeSet::<u8>::new();
        bytes.add(Range::at_least(0));
        assert_eq!(bytes.element_count(&Integers), Some(256));

        let set = int_set(vec![Range::less_than(0)]);
        assert_eq!(set.element_count(&Integers), Some(i32::MIN.unsigned_abs() as u64));
    }
}

use proptest::prelude::*;

use crate::{
    cut::Cut,
    range::Range,
    set::RangeSet,
};

/// `[lower, upper)` over the integers. Test-only, so inverted bounds panic.
pub fn int_range(lower: i32, upper: i32) -> Range<i32> {
    Range::closed_open(lower, upper).expect("inverted test range")
}

pub fn int_set(ranges: Vec<Range<i32>>) -> RangeSet<i32> {
    ranges.into_iter().collect()
}

pub fn small_cut() -> impl Strategy<Value = Cut<i32>> {
    prop_oneof![
        1 => Just(Cut::BelowAll),
        4 => (0..32i32).prop_map(Cut::BelowValue),
        4 => (0..32i32).prop_map(Cut::AboveValue),
        1 => Just(Cut::AboveAll),
    ]
}

pub fn small_range() -> impl Strategy<Value = Range<i32>> {
    (small_cut(), small_cut())
        .prop_filter_map("inverted bounds", |(lower, upper)| Range::new(lower, upper).ok())
}

pub fn small_range_set() -> impl Strategy<Value = RangeSet<i32>> {
    prop::collection::vec(small_range(), 0..6).prop_map(int_set)
}

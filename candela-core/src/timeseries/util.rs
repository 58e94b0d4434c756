//! Shared helpers for bar series ordering and invariants.

use crate::Bar;

/// Sort bars ascending by `time` and drop later duplicates.
///
/// The sort is stable, so among bars sharing a timestamp the one that appeared
/// first in the input is kept.
#[must_use]
pub fn dedup_sorted(mut bars: Vec<Bar>) -> Vec<Bar> {
    bars.sort_by_key(|b| b.time);
    bars.dedup_by_key(|b| b.time);
    bars
}

/// True if consecutive bars are exactly `period_ms` apart.
///
/// Empty and single-bar series are trivially contiguous.
#[must_use]
pub fn is_contiguous(bars: &[Bar], period_ms: i64) -> bool {
    bars.windows(2).all(|w| w[1].time - w[0].time == period_ms)
}

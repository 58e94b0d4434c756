use std::collections::BTreeMap;

use crate::Bar;
use crate::timeseries::util::dedup_sorted;

/// Divide `base` by `quote` field by field and stamp the result at `time`.
///
/// Returns `None` if any ratio is not finite (zero or non-finite divisor).
/// The composed bar carries `volume: Some(0.0)`.
#[must_use]
pub fn cross_rate(base: &Bar, quote: &Bar, time: i64) -> Option<Bar> {
    let ratio = |b: f64, q: f64| {
        let r = b / q;
        r.is_finite().then_some(r)
    };
    Some(Bar::new(
        time,
        ratio(base.open, quote.open)?,
        ratio(base.high, quote.high)?,
        ratio(base.low, quote.low)?,
        ratio(base.close, quote.close)?,
        Some(0.0),
    ))
}

/// Compose the implied `base/quote` series from `base/REF` and `quote/REF`.
///
/// Every base bar is paired with the quote bar at the same time, or else the
/// latest quote bar before it. Base bars older than the first quote bar are
/// dropped. Quote bars whose time is still missing afterwards are composed
/// against the base bar behind the preceding composed point; if that ratio is
/// not finite the preceding composed bar is carried forward to the quote time.
///
/// Output is sorted ascending with unique times.
#[must_use]
pub fn compose_cross_rate(base: Vec<Bar>, quote: Vec<Bar>) -> Vec<Bar> {
    let base = dedup_sorted(base);
    let quote = dedup_sorted(quote);
    let quotes: BTreeMap<i64, Bar> = quote.iter().map(|q| (q.time, *q)).collect();

    // time -> (composed bar, base bar it was derived from)
    let mut composed: BTreeMap<i64, (Bar, Bar)> = BTreeMap::new();
    for b in &base {
        let Some((_, q)) = quotes.range(..=b.time).next_back() else {
            continue;
        };
        if let Some(bar) = cross_rate(b, q, b.time) {
            composed.insert(b.time, (bar, *b));
        }
    }

    for q in &quote {
        if composed.contains_key(&q.time) {
            continue;
        }
        let Some((_, &(last_bar, last_base))) = composed.range(..q.time).next_back() else {
            continue;
        };
        let bar = cross_rate(&last_base, q, q.time).unwrap_or_else(|| last_bar.at(q.time));
        composed.insert(q.time, (bar, last_base));
    }

    composed.into_values().map(|(bar, _)| bar).collect()
}

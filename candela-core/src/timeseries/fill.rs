use crate::timeseries::util::dedup_sorted;
use crate::{Bar, CandleDetails};

/// Turn a sparse bar series into a contiguous one covering `[start, end]`.
///
/// `start` and `end` are in seconds; bar times and `now_ms` are milliseconds.
///
/// Behavior:
/// - No input bars and a window of at most two periods yields an empty series.
/// - No input bars otherwise seeds flat zero bars at `start` and `end`.
/// - Periods between `start` and the first bar are backfilled flat at the first
///   bar's close, never at or after `now_ms`.
/// - A gap of two or more periods after the last bar is filled flat at the
///   last bar's close.
/// - Interior holes are filled flat at the next real bar's open (or the
///   previous bar's close past the last real bar).
/// - Finally each bar opens at the previous bar's close (the first bar keeps
///   its own open), and closes at the next bar's open when that bar traded
///   volume. High and low are left as they are.
///
/// The output is sorted, unique by time, and spaced by exactly one period
/// whenever input times lie on the period grid. Running it again on its own
/// output with the same arguments returns the same series.
#[must_use]
pub fn add_missing_bars(
    bars: Vec<Bar>,
    details: &CandleDetails,
    start: i64,
    end: i64,
    now_ms: i64,
) -> Vec<Bar> {
    let secs = details.candle_seconds();
    let period = details.period_ms();
    let start_ms = start * 1000;
    let end_ms = end * 1000;
    let bar_count = (end - start).div_euclid(secs);

    if bars.is_empty() && bar_count <= 2 {
        return Vec::new();
    }

    let mut items = dedup_sorted(bars);
    if items.is_empty() {
        items = vec![Bar::flat(start_ms, 0.0), Bar::flat(end_ms, 0.0)];
    }
    let items = backfill(items, period, start_ms, end_ms, now_ms);
    fill_and_stitch(items, period, bar_count)
}

/// Extend a sorted, non-empty series towards both window edges.
fn backfill(mut items: Vec<Bar>, period: i64, start_ms: i64, end_ms: i64, now_ms: i64) -> Vec<Bar> {
    if let Some(&first) = items.first() {
        let missing = (first.time - start_ms).div_euclid(period);
        for i in (1..=missing).rev() {
            let time = first.time - i * period;
            if time >= now_ms {
                break;
            }
            items.push(Bar::flat(time, first.close));
        }
        items = dedup_sorted(items);
    }

    if let Some(&last) = items.last() {
        let missing = (end_ms - last.time).div_euclid(period);
        if missing >= 2 {
            items.extend((1..=missing).map(|i| Bar::flat(last.time + i * period, last.close)));
            items = dedup_sorted(items);
        }
    }
    items
}

fn fill_and_stitch(items: Vec<Bar>, period: i64, bar_count: i64) -> Vec<Bar> {
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return items;
    };
    let spanned = (last.time - first.time).div_euclid(period) + 1;
    let expected = usize::try_from(bar_count.max(spanned)).unwrap_or(0);

    let items = if expected > items.len() {
        fill_interior(&items, period, expected)
    } else {
        items
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target = "candela::fill",
        bars = items.len(),
        expected,
        "stitching bar series"
    );

    stitch(&items)
}

/// Rebuild the series slot by slot from its first bar.
fn fill_interior(items: &[Bar], period: i64, expected: usize) -> Vec<Bar> {
    let Some(first) = items.first() else {
        return Vec::new();
    };
    let mut out: Vec<Bar> = Vec::with_capacity(expected);
    let mut cursor = 0;
    let mut slot = first.time;
    for _ in 0..expected {
        while items.get(cursor).is_some_and(|b| b.time < slot) {
            cursor += 1;
        }
        let bar = match items.get(cursor) {
            Some(b) if b.time == slot => {
                cursor += 1;
                *b
            }
            Some(next) => Bar::flat(slot, next.open),
            None => Bar::flat(slot, out.last().map_or(first.close, |prev| prev.close)),
        };
        out.push(bar);
        slot += period;
    }
    out
}

fn stitch(items: &[Bar]) -> Vec<Bar> {
    let mut out: Vec<Bar> = Vec::with_capacity(items.len());
    for (i, bar) in items.iter().enumerate() {
        let mut b = *bar;
        if let Some(prev) = out.last() {
            b.open = prev.close;
        }
        if let Some(next) = items.get(i + 1)
            && next.has_volume()
        {
            b.close = next.open;
        }
        out.push(b);
    }
    out
}

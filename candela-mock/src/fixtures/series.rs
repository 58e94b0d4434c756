use candela_core::{Bar, CandleDuration};

use super::tokens::{DOC, RBTC, SOV, XUSD};

/// First period start of every fixture series, seconds. Aligned to a day.
pub const FIXTURE_START: i64 = 1_699_920_000;
/// Periods generated per series.
pub const FIXTURE_PERIODS: i64 = 72;
/// Every series skips the slots whose index is a multiple of this.
const GAP_EVERY: i64 = 7;

/// Fixture candles for `(entity, base, quote)`; `None` for unknown pairs.
pub fn by_pair(entity: &str, base: &str, quote: &str) -> Option<Vec<Bar>> {
    let duration = CandleDuration::ALL
        .into_iter()
        .find(|d| d.entity_name() == entity)?;
    let price = match (base, quote) {
        (SOV, XUSD) => 0.5,
        (RBTC, XUSD) => 60_000.0,
        (DOC, XUSD) => 1.0,
        (SOV, RBTC) => 0.000_008,
        _ => return None,
    };
    Some(build(duration, price))
}

fn build(duration: CandleDuration, price: f64) -> Vec<Bar> {
    let period_ms = i64::from(duration.seconds()) * 1000;
    let step = price / 100.0;
    (1..FIXTURE_PERIODS)
        .filter(|i| i % GAP_EVERY != 0)
        .map(|i| {
            let wobble = f64::from(u8::try_from(i % 10).unwrap_or(0));
            let open = price + wobble * step;
            let close = open + step / 2.0;
            Bar::new(
                FIXTURE_START * 1000 + i * period_ms,
                open,
                close + step,
                open - step,
                close,
                Some(100.0 + wobble),
            )
        })
        .collect()
}

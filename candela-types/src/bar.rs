use serde::{Deserialize, Serialize};

/// One OHLCV candle.
///
/// `time` is the period start in milliseconds since the UNIX epoch. Synthesized
/// bars carry `volume: Some(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Period start, milliseconds since epoch.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price in the period.
    pub high: f64,
    /// Lowest price in the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume, if the source reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    /// Build a bar from its components.
    #[must_use]
    pub const fn new(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// A flat placeholder bar: `open == high == low == close == price`, zero volume.
    #[must_use]
    pub const fn flat(time: i64, price: f64) -> Self {
        Self::new(time, price, price, price, price, Some(0.0))
    }

    /// True when the bar reports a non-zero traded volume.
    #[must_use]
    pub fn has_volume(&self) -> bool {
        self.volume.is_some_and(|v| v != 0.0)
    }

    /// Copy of this bar moved to another period start.
    #[must_use]
    pub const fn at(self, time: i64) -> Self {
        Self { time, ..self }
    }
}

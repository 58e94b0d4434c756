//! Candle durations and the indexer-facing description of each one.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CandelaError;

/// Maximum number of candles requested from the indexer in one query.
pub const CHUNK_SIZE: u32 = 1000;

/// Static description of a supported candle duration as the indexer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CandleDetails {
    entity_name: String,
    candle_seconds: u32,
}

impl CandleDetails {
    /// Describe a candle duration served under `entity_name`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `candle_seconds` is zero or the entity name is empty.
    pub fn new(entity_name: impl Into<String>, candle_seconds: u32) -> Result<Self, CandelaError> {
        let entity_name = entity_name.into();
        if entity_name.trim().is_empty() {
            return Err(CandelaError::InvalidArg("candle entity name is empty".into()));
        }
        if candle_seconds == 0 {
            return Err(CandelaError::InvalidArg(format!(
                "candle duration for {entity_name} must be positive"
            )));
        }
        Ok(Self {
            entity_name,
            candle_seconds,
        })
    }

    /// Indexer query root for this duration (e.g. `candleSticksHours`).
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Period length in seconds. Always positive.
    #[must_use]
    pub const fn candle_seconds(&self) -> i64 {
        self.candle_seconds as i64
    }

    /// Period length in milliseconds, the unit bar timestamps are stored in.
    #[must_use]
    pub const fn period_ms(&self) -> i64 {
        self.candle_seconds() * 1000
    }
}

/// Unit used by chart history-depth hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionBack {
    /// Count `interval_back` in days.
    Days,
    /// Count `interval_back` in months.
    Months,
}

/// How far back a chart should request history on first load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDepth {
    /// Unit of `interval_back`.
    pub resolution_back: ResolutionBack,
    /// Number of units to look back.
    pub interval_back: u32,
}

/// Candle durations served by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CandleDuration {
    /// One minute.
    M1,
    /// Fifteen minutes.
    M15,
    /// One hour.
    H1,
    /// Four hours.
    H4,
    /// One day.
    D1,
}

impl CandleDuration {
    /// Every supported duration, shortest first.
    pub const ALL: [Self; 5] = [Self::M1, Self::M15, Self::H1, Self::H4, Self::D1];

    /// Indexer query root serving this duration.
    #[must_use]
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::M1 => "candleSticksMinutes",
            Self::M15 => "candleSticksFifteenMinutes",
            Self::H1 => "candleSticksHours",
            Self::H4 => "candleSticksFourHours",
            Self::D1 => "candleSticksDays",
        }
    }

    /// Period length in seconds.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        match self {
            Self::M1 => 60,
            Self::M15 => 15 * 60,
            Self::H1 => 60 * 60,
            Self::H4 => 4 * 60 * 60,
            Self::D1 => 24 * 60 * 60,
        }
    }

    /// Indexer description of this duration.
    #[must_use]
    pub fn details(self) -> CandleDetails {
        CandleDetails {
            entity_name: self.entity_name().to_string(),
            candle_seconds: self.seconds(),
        }
    }

    /// Chart resolution string (TradingView convention) for this duration.
    #[must_use]
    pub const fn resolution(self) -> &'static str {
        match self {
            Self::M1 => "1",
            Self::M15 => "15",
            Self::H1 => "60",
            Self::H4 => "240",
            Self::D1 => "1D",
        }
    }

    /// Map a chart resolution string to a duration.
    ///
    /// # Errors
    /// Returns `InvalidArg` for resolutions the indexer does not serve.
    pub fn from_resolution(resolution: &str) -> Result<Self, CandelaError> {
        match resolution.trim() {
            "1" => Ok(Self::M1),
            "15" => Ok(Self::M15),
            "60" => Ok(Self::H1),
            "240" => Ok(Self::H4),
            "1D" | "D" => Ok(Self::D1),
            other => Err(CandelaError::InvalidArg(format!(
                "unsupported chart resolution: {other}"
            ))),
        }
    }

    /// Suggested initial history depth for a chart at this duration.
    #[must_use]
    pub const fn history_depth(self) -> HistoryDepth {
        let (resolution_back, interval_back) = match self {
            Self::M1 => (ResolutionBack::Days, 1),
            Self::M15 => (ResolutionBack::Days, 3),
            Self::H1 => (ResolutionBack::Days, 5),
            Self::H4 => (ResolutionBack::Days, 15),
            Self::D1 => (ResolutionBack::Months, 1),
        };
        HistoryDepth {
            resolution_back,
            interval_back,
        }
    }
}

impl fmt::Display for CandleDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::M1 => "1m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        };
        f.write_str(s)
    }
}

impl FromStr for CandleDuration {
    type Err = CandelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CandelaError::InvalidArg(format!("unknown candle duration: {s}")))
    }
}

impl From<CandleDuration> for CandleDetails {
    fn from(d: CandleDuration) -> Self {
        d.details()
    }
}

/// A sub-range of a request, in seconds, sized to stay under the indexer row limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampChunk {
    /// Inclusive start, seconds since epoch.
    pub from: i64,
    /// End, seconds since epoch. Equal to the next chunk's `from`.
    pub to: i64,
}

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Bar, CandelaError, CandleDetails};

/// Sort order on `periodStartUnix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl OrderDirection {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Which record fields a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Full OHLCV rows.
    Ohlcv,
    /// Only `periodStartUnix`; used for earliest-candle lookups.
    PeriodStart,
}

impl Selection {
    const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Ohlcv => &[
                "id",
                "open",
                "high",
                "low",
                "close",
                "totalVolume",
                "periodStartUnix",
            ],
            Self::PeriodStart => &["periodStartUnix"],
        }
    }
}

/// One indexer request for candles of a single token pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandleQuery {
    /// Query root, e.g. `candleSticksHours`.
    pub entity: String,
    /// Base token address, matched exactly.
    pub base_token: String,
    /// Quote token address, matched exactly.
    pub quote_token: String,
    /// Inclusive `periodStartUnix` bounds in seconds, if any.
    pub period: Option<(i64, i64)>,
    /// Ordering on `periodStartUnix`.
    pub order: OrderDirection,
    /// Row cap.
    pub first: u32,
    /// Selected fields.
    pub selection: Selection,
}

impl CandleQuery {
    /// Candles with `periodStartUnix` in `[start, end]`, newest first, at most `limit` rows.
    #[must_use]
    pub fn range(
        details: &CandleDetails,
        base_token: &str,
        quote_token: &str,
        start: i64,
        end: i64,
        limit: u32,
    ) -> Self {
        Self {
            entity: details.entity_name().to_string(),
            base_token: base_token.to_string(),
            quote_token: quote_token.to_string(),
            period: Some((start, end)),
            order: OrderDirection::Desc,
            first: limit,
            selection: Selection::Ohlcv,
        }
    }

    /// The single oldest candle of a pair.
    #[must_use]
    pub fn earliest(details: &CandleDetails, base_token: &str, quote_token: &str) -> Self {
        Self {
            entity: details.entity_name().to_string(),
            base_token: base_token.to_string(),
            quote_token: quote_token.to_string(),
            period: None,
            order: OrderDirection::Asc,
            first: 1,
            selection: Selection::PeriodStart,
        }
    }

    /// True if a record starting at `period_start` (seconds) satisfies the period filter.
    #[must_use]
    pub fn covers(&self, period_start: i64) -> bool {
        self.period
            .is_none_or(|(start, end)| start <= period_start && period_start <= end)
    }

    /// Render the query as a GraphQL document.
    #[must_use]
    pub fn document(&self) -> String {
        let mut filter = format!(
            "baseToken: {} quoteToken: {}",
            quoted(&self.base_token),
            quoted(&self.quote_token)
        );
        if let Some((start, end)) = self.period {
            let _ = write!(
                filter,
                " periodStartUnix_gte: {start} periodStartUnix_lte: {end}"
            );
        }
        format!(
            "{{ {entity}(where: {{ {filter} }} orderBy: periodStartUnix orderDirection: {order} first: {first}) {{ {fields} }} }}",
            entity = self.entity,
            order = self.order.as_str(),
            first = self.first,
            fields = self.selection.fields().join(" "),
        )
    }
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// A candle row exactly as the indexer returned it.
///
/// Numeric fields arrive as JSON numbers or decimal strings and are only parsed
/// by [`CandleRecord::to_bar`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleRecord {
    /// Indexer entity id.
    #[serde(default)]
    pub id: Option<String>,
    /// Opening price.
    #[serde(default)]
    pub open: Option<Value>,
    /// High price.
    #[serde(default)]
    pub high: Option<Value>,
    /// Low price.
    #[serde(default)]
    pub low: Option<Value>,
    /// Closing price.
    #[serde(default)]
    pub close: Option<Value>,
    /// Traded volume.
    #[serde(default)]
    pub total_volume: Option<Value>,
    /// Period start in seconds.
    #[serde(default)]
    pub period_start_unix: Option<Value>,
}

impl CandleRecord {
    /// Render a bar the way the indexer does: decimal strings, seconds timestamp.
    #[must_use]
    pub fn from_bar(bar: &Bar) -> Self {
        let period = bar.time.div_euclid(1000);
        Self {
            id: Some(period.to_string()),
            open: Some(Value::String(bar.open.to_string())),
            high: Some(Value::String(bar.high.to_string())),
            low: Some(Value::String(bar.low.to_string())),
            close: Some(Value::String(bar.close.to_string())),
            total_volume: bar.volume.map(|v| Value::String(v.to_string())),
            period_start_unix: Some(Value::from(period)),
        }
    }

    /// Parsed `periodStartUnix`, in seconds.
    ///
    /// # Errors
    /// Returns `MalformedCandleRecord` if the field is missing or not an integer.
    pub fn period_start(&self) -> Result<i64, CandelaError> {
        let v = self.period_start_unix.as_ref();
        let parsed = match v {
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| CandelaError::malformed("periodStartUnix", render(v)))
    }

    /// Validate and convert into a [`Bar`]; `time` is `periodStartUnix * 1000`.
    ///
    /// # Errors
    /// Returns `MalformedCandleRecord` naming the first field that is missing or
    /// not a finite number, or `periodStartUnix` when `time` would overflow. A
    /// missing `totalVolume` is not an error.
    pub fn to_bar(&self) -> Result<Bar, CandelaError> {
        let period = self.period_start()?;
        let time = period
            .checked_mul(1000)
            .ok_or_else(|| CandelaError::malformed("periodStartUnix", period.to_string()))?;
        let volume = match &self.total_volume {
            None | Some(Value::Null) => None,
            v @ Some(_) => Some(number("totalVolume", v.as_ref())?),
        };
        Ok(Bar {
            time,
            open: number("open", self.open.as_ref())?,
            high: number("high", self.high.as_ref())?,
            low: number("low", self.low.as_ref())?,
            close: number("close", self.close.as_ref())?,
            volume,
        })
    }
}

fn number(field: &str, v: Option<&Value>) -> Result<f64, CandelaError> {
    let parsed = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|x| x.is_finite())
        .ok_or_else(|| CandelaError::malformed(field, render(v)))
}

fn render(v: Option<&Value>) -> String {
    v.map_or_else(|| "null".to_string(), Value::to_string)
}

/// Extract the rows of `entity` from a GraphQL JSON response body.
///
/// Accepts either the full `{ "data": { .. } }` envelope or the bare `data`
/// object. A missing collection yields no rows.
///
/// # Errors
/// - `Transport` when the response carries a non-empty `errors` array.
/// - `Data` when the collection is present but is not an array of objects.
pub fn rows_from_response(
    entity: &str,
    response: &Value,
) -> Result<Vec<CandleRecord>, CandelaError> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let msgs: Vec<String> = errors
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| e.to_string(), str::to_string)
            })
            .collect();
        return Err(CandelaError::transport("graphql", msgs.join("; ")));
    }
    let data = response.get("data").unwrap_or(response);
    match data.get(entity) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(rows @ Value::Array(_)) => serde_json::from_value(rows.clone())
            .map_err(|e| CandelaError::Data(format!("{entity} rows: {e}"))),
        Some(other) => Err(CandelaError::Data(format!(
            "{entity} is not a list: {other}"
        ))),
    }
}

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CandelaError;

/// A chart symbol split into its base and quote assets, e.g. `SOV/XUSD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    base: String,
    quote: String,
}

impl Pair {
    /// Build a pair from asset symbols.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either side is empty.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Result<Self, CandelaError> {
        let base = base.into().trim().to_string();
        let quote = quote.into().trim().to_string();
        if base.is_empty() || quote.is_empty() {
            return Err(CandelaError::InvalidArg(format!(
                "pair needs both assets, got `{base}/{quote}`"
            )));
        }
        Ok(Self { base, quote })
    }

    /// Parse a `BASE/QUOTE` chart symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless the symbol has exactly one `/` with assets on both sides.
    pub fn parse(symbol: &str) -> Result<Self, CandelaError> {
        let mut parts = symbol.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) => Self::new(base, quote),
            _ => Err(CandelaError::InvalidArg(format!(
                "expected BASE/QUOTE symbol, got `{symbol}`"
            ))),
        }
    }

    /// Base asset symbol.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote asset symbol.
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Resolved token addresses of a pair; the key of the end-time cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    /// Base token address (lower-cased).
    pub base_token: String,
    /// Quote token address (lower-cased).
    pub quote_token: String,
}

impl PairKey {
    /// Build a key from two token addresses. Addresses are lower-cased.
    pub fn new(base_token: impl AsRef<str>, quote_token: impl AsRef<str>) -> Self {
        Self {
            base_token: base_token.as_ref().to_ascii_lowercase(),
            quote_token: quote_token.as_ref().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base_token, self.quote_token)
    }
}

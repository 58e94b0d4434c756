use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the candela workspace.
///
/// Every failure on the fetch path is eventually surfaced to callers wrapped in
/// [`CandelaError::Request`], which keeps the original cause reachable through
/// [`CandelaError::root`].
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandelaError {
    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (missing collections, wrong shapes).
    #[error("data issue: {0}")]
    Data(String),

    /// An indexer record carried a field that could not be parsed as a number.
    #[error("malformed candle record: field `{field}` has value {value}")]
    MalformedCandleRecord {
        /// Name of the offending field as the indexer spells it (e.g. `totalVolume`).
        field: String,
        /// Raw value as received, rendered for diagnostics.
        value: String,
    },

    /// The indexer transport rejected the query.
    #[error("{client} failed: {msg}")]
    Transport {
        /// Name of the indexer client that failed.
        client: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A token or resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "token address for SOV".
        what: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Label of the operation that timed out.
        capability: String,
    },

    /// Uniform wrapper applied at the orchestrator boundary.
    #[error("Request error: {0}")]
    Request(Box<CandelaError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CandelaError {
    /// Helper: build a `Transport` error with the client name and message.
    pub fn transport(client: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            client: client.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MalformedCandleRecord` error.
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedCandleRecord {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Wrap an error into the uniform `Request` kind.
    ///
    /// Already wrapped errors are returned unchanged so the wrapper never nests.
    #[must_use]
    pub fn request(inner: Self) -> Self {
        match inner {
            e @ Self::Request(_) => e,
            other => Self::Request(Box::new(other)),
        }
    }

    /// The innermost cause, looking through any `Request` wrapper.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Request(inner) => inner.root(),
            other => other,
        }
    }
}

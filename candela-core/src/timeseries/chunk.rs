use crate::{CHUNK_SIZE, CandleDetails, TimestampChunk};

/// Split `[from, to]` (seconds) into chunks of at most [`CHUNK_SIZE`] candles.
///
/// ```
/// use candela_core::{CandleDuration, split_period_to_chunks};
///
/// let hours = CandleDuration::H1.details();
/// let chunks = split_period_to_chunks(0, 5000 * 3600, &hours);
/// assert_eq!(chunks.len(), 5);
/// assert_eq!(chunks[0].from, 0);
/// assert_eq!(chunks[4].to, 5000 * 3600);
/// ```
#[must_use]
pub fn split_period_to_chunks(from: i64, to: i64, details: &CandleDetails) -> Vec<TimestampChunk> {
    split_period_to_chunks_with_size(from, to, details, CHUNK_SIZE)
}

/// Split `[from, to]` (seconds) into chunks of at most `chunk_size` candles.
///
/// Chunks are contiguous: each chunk's `to` is the next chunk's `from`. The
/// first chunk starts at `from` and the last ends exactly at `to`, so a window
/// that is not a multiple of the chunk span gets a shorter final chunk.
///
/// A window of at most `chunk_size` candles, or one with `to <= from`, comes
/// back unchanged as a single chunk.
#[must_use]
pub fn split_period_to_chunks_with_size(
    from: i64,
    to: i64,
    details: &CandleDetails,
    chunk_size: u32,
) -> Vec<TimestampChunk> {
    let secs = details.candle_seconds();
    let size = i64::from(chunk_size.max(1));
    let candles = (to - from).abs() / secs;
    if candles <= size || to <= from {
        return vec![TimestampChunk { from, to }];
    }

    let step = size * secs;
    let mut chunks = Vec::with_capacity(usize::try_from(candles / size + 1).unwrap_or(0));
    let mut cursor = from;
    while cursor < to {
        let end = cursor.saturating_add(step).min(to);
        chunks.push(TimestampChunk { from: cursor, to: end });
        cursor = end;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target = "candela::chunk",
        from,
        to,
        chunks = chunks.len(),
        "split request window"
    );

    chunks
}

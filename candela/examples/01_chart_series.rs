use std::sync::Arc;

use candela::{CandleDuration, CandleSeries, EndTimeCache};
use candela_mock::MockIndexer;
use candela_mock::fixtures::series::FIXTURE_START;
use candela_mock::fixtures::tokens;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,candela=debug (build with --features tracing)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // One cache per session, shared by every series built from it
    let cache = EndTimeCache::new();
    let series = CandleSeries::builder()
        .indexer(Arc::new(MockIndexer::new()))
        .token_resolver(Arc::new(tokens::resolver()))
        .end_time_cache(cache.clone())
        .build()?;

    let duration = CandleDuration::H4;
    let end = FIXTURE_START + 40 * i64::from(duration.seconds());
    for symbol in ["SOV/XUSD", "SOV/DOC"] {
        let bars = series.bars(symbol, duration, FIXTURE_START, end).await?;
        println!("{symbol} {duration}: {} bars", bars.len());
        for bar in bars.iter().take(5) {
            let at = chrono::DateTime::from_timestamp_millis(bar.time)
                .map_or_else(|| bar.time.to_string(), |t| t.to_rfc3339());
            println!(
                "  {at}  o={:.6} h={:.6} l={:.6} c={:.6} v={:?}",
                bar.open, bar.high, bar.low, bar.close, bar.volume
            );
        }
    }
    println!("cached pairs: {}", cache.len().await);

    Ok(())
}

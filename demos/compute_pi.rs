// ============================================================================
// Compute Pi Example
// ============================================================================
//
// Usage: cargo run --release --example compute_pi --features logging -- [DIGITS] [WORKERS]

use chudnovsky_pi::prelude::*;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<(), PiError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let digits = args.next().and_then(|s| s.parse().ok()).unwrap_or(1000);
    let workers = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(chudnovsky_pi::domain::DEFAULT_WORKER_COUNT);

    println!("=== Chudnovsky Pi Example ===\n");
    println!("Digits: {}, reduction workers: {}\n", digits, workers);

    let engine = PiEngine::new(ComputeConfig::new(digits).with_worker_count(workers))
        .with_observer(Arc::new(LoggingObserver));

    let start = Instant::now();
    let pi = engine.compute()?;
    let elapsed = start.elapsed();

    println!("{}\n", pi);
    println!(
        "Terms: {}, precision: {} bits",
        pi.budget().iterations(),
        pi.precision_bits()
    );
    println!("Calculation took: {}ms", elapsed.as_millis());

    Ok(())
}

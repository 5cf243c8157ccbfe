use std::sync::Arc;
use std::time::Instant;

use loki_scope_logger::context::{self, with_field};
use loki_scope_logger::noop_sink::NoopSink;
use loki_scope_logger::{Context, ContextScopedLogger};

#[tokio::main]
async fn main() {
    let sink = Arc::new(NoopSink::default());
    let logger = ContextScopedLogger::with_sink(sink, "load", "bench");
    let ctx = Context::background().with_logger(Arc::new(logger));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let ctx = with_field(&ctx, "iteration", &i);
        context::error(&ctx, "noop load test error").await;
    }

    let elapsed = start.elapsed();
    println!(
        "noop sink: built {} entries in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}

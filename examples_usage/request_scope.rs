use std::sync::Arc;

use loki_scope_logger::context::{self, with_error, with_field, with_user_uuid};
use loki_scope_logger::env::ServiceIdentity;
use loki_scope_logger::init::init_fallback_logging;
use loki_scope_logger::loki::{LokiConfig, LokiSink};
use loki_scope_logger::{Context, ContextScopedLogger};

async fn charge(ctx: &Context, amount_cents: u64) -> Result<(), std::io::Error> {
    let ctx = with_field(ctx, "amount_cents", &amount_cents);
    context::info(&ctx, "charging card").await;
    Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway timed out"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Failed pushes are reported here; the request path never sees them.
    init_fallback_logging()?;

    // LOKI_HOST / LOKI_PORT / LOKI_TIMEOUT_MS, LOG_SERVICE_NAME / LOG_ENVIRONMENT
    let identity = ServiceIdentity::from_env();
    let sink = LokiSink::new(LokiConfig::from_env())?;

    // One logger per incoming request.
    let logger = ContextScopedLogger::with_sink(Arc::new(sink), identity.service, identity.environment);
    let ctx = Context::background().with_logger(Arc::new(logger));
    let ctx = with_user_uuid(&ctx, "0d9c6c1e-5a8e-4c1f-9b51-2f3d7c1e0a42");
    let ctx = with_field(&ctx, "route", "/checkout");

    if let Err(e) = charge(&ctx, 4_999).await {
        let ctx = with_error(&ctx, &e);
        context::error(&ctx, "checkout failed").await;
    }

    // Concurrent children get their own copy of the fields.
    let left = ctx.fork();
    let right = ctx.fork();
    let (_, _) = tokio::join!(
        async {
            let left = with_field(&left, "worker", "inventory");
            context::warn(&left, "stock low").await;
        },
        async {
            let right = with_field(&right, "worker", "email");
            context::info(&right, "receipt queued").await;
        }
    );

    Ok(())
}

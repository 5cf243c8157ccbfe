use std::sync::Arc;

use loki_scope_logger::init::init_fallback_logging;
use loki_scope_logger::{Context, NamedFunctionLogger, StructuredLogger};

async fn nightly_export(ctx: &Context) {
    ctx.named_scope().info("export started").await;
    ctx.named_scope().warn("export took longer than 60s").await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_fallback_logging()?;

    let mut logger = NamedFunctionLogger::new("127.0.0.1", 3100, "reports", "development")?;
    // Lines are tagged function_name = "reports_nightly_export".
    logger.set_function_name("nightly_export");

    let ctx = Context::background().with_named_logger(Arc::new(logger));
    nightly_export(&ctx).await;
    Ok(())
}

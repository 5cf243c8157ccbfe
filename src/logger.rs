use async_trait::async_trait;

use crate::fields::FieldValue;
use crate::record::Level;

/// Common surface of every logger flavour.
///
/// `log` never fails from the caller's point of view: delivery problems
/// are reported on the logger's fallback log and swallowed.
#[async_trait]
pub trait StructuredLogger: Send + Sync {
    /// Build an entry at `level` and push it, waiting for the push to finish.
    async fn log(&self, level: Level, message: &str);

    /// Attach a field to the logger's current scope.
    ///
    /// Flavours without a field set ignore it.
    fn record_field(&self, _key: &str, _value: FieldValue) {}

    async fn info(&self, message: &str) {
        self.log(Level::Info, message).await
    }

    async fn warn(&self, message: &str) {
        self.log(Level::Warn, message).await
    }

    async fn error(&self, message: &str) {
        self.log(Level::Error, message).await
    }
}

/// Stand-in used when no logger is bound to a context.
///
/// Every call returns immediately without touching any state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

#[async_trait]
impl StructuredLogger for NoopLogger {
    async fn log(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn noop_logger_completes_immediately() {
        let logger = NoopLogger;
        logger.record_field("ignored", FieldValue::Json(json!(1)));

        let all = async {
            logger.info("a").await;
            logger.warn("b").await;
            logger.error("c").await;
        };
        tokio::time::timeout(Duration::from_millis(100), all)
            .await
            .expect("noop logger must not block");
    }
}

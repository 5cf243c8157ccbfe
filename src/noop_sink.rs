use crate::error::PushError;
use crate::sink::LogSink;
use crate::wire::PushRequest;
use async_trait::async_trait;

/// A sink that simply drops all requests.
///
/// Useful for measuring the cost of building entries without any network
/// I/O, and for wiring loggers in tests that don't inspect the output.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn send(&self, _request: &PushRequest) -> Result<(), PushError> {
        Ok(())
    }
}

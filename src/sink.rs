use crate::error::PushError;
use crate::wire::PushRequest;
use async_trait::async_trait;

/// Destination for [`PushRequest`]s built by the loggers.
///
/// Implementations own serialization and transport of the request to a
/// concrete backend. Loggers await `send` directly on the caller's task;
/// there is no queue in between, so a slow sink slows the caller.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver a single push request.
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the request.
    /// - `Err(..)` for serialization, transport or status failures. The
    ///   logger reports it to its fallback log and does not retry.
    async fn send(&self, request: &PushRequest) -> Result<(), PushError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Captures every request it is given.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) requests: Arc<Mutex<Vec<PushRequest>>>,
    }

    impl RecordingSink {
        pub(crate) fn taken(&self) -> Vec<PushRequest> {
            std::mem::take(&mut *self.requests.lock())
        }
    }

    #[async_trait]
    impl LogSink for RecordingSink {
        async fn send(&self, request: &PushRequest) -> Result<(), PushError> {
            self.requests.lock().push(request.clone());
            Ok(())
        }
    }

    /// Rejects every request as if the endpoint answered `status`.
    pub(crate) struct FailingSink {
        pub(crate) status: u16,
    }

    #[async_trait]
    impl LogSink for FailingSink {
        async fn send(&self, _request: &PushRequest) -> Result<(), PushError> {
            Err(PushError::UnexpectedStatus {
                status: self.status,
                body: "internal error".to_string(),
            })
        }
    }
}

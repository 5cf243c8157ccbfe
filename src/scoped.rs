use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use crate::error::PushError;
use crate::fallback::{FallbackLog, TracingFallback};
use crate::fields::{FieldSet, FieldValue, LabelSet, ENV_LABEL, MESSAGE_FIELD, SERVICE_LABEL};
use crate::logger::StructuredLogger;
use crate::record::{Level, LineFormat, LogEntry};
use crate::sink::LogSink;

/// Logger whose lines are the JSON-encoded field set of a unit of work.
///
/// Labels (`service`, `env`) are fixed once the logger is shared: adding
/// one needs `&mut self`. Fields are mutated through `&self` and every
/// holder of the same instance sees the same set. Use one instance per
/// unit of work; hand concurrent children a [`ContextScopedLogger::fork`].
pub struct ContextScopedLogger {
    sink: Arc<dyn LogSink>,
    fallback: Arc<dyn FallbackLog>,
    labels: LabelSet,
    fields: Mutex<FieldSet>,
}

impl ContextScopedLogger {
    /// Logger pushing to `http://{host}:{port}/loki/api/v1/push` with the
    /// default request timeout.
    #[cfg(feature = "loki")]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        service: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, crate::error::SinkBuildError> {
        let sink = crate::loki::LokiSink::new(crate::loki::LokiConfig::new(host, port))?;
        Ok(Self::with_sink(Arc::new(sink), service, environment))
    }

    /// Logger pushing into an arbitrary [`LogSink`].
    pub fn with_sink(
        sink: Arc<dyn LogSink>,
        service: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        let mut labels = LabelSet::new();
        labels.attach(SERVICE_LABEL, service);
        labels.attach(ENV_LABEL, environment);
        Self {
            sink,
            fallback: Arc::new(TracingFallback),
            labels,
            fields: Mutex::new(FieldSet::new()),
        }
    }

    /// Replace the [`TracingFallback`] used for delivery failures.
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackLog>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn attach_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.attach(key, value);
    }

    /// Set a field on the shared field set. Last write wins.
    pub fn attach_field<T: Serialize + ?Sized>(&self, key: impl Into<String>, value: &T) {
        self.fields.lock().attach(key, value);
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Copy of the current field set.
    pub fn fields(&self) -> FieldSet {
        self.fields.lock().clone()
    }

    /// A new logger with the same sink, labels and fallback and its own
    /// copy of the current fields. Later writes on either side stay local.
    pub fn fork(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            fallback: Arc::clone(&self.fallback),
            labels: self.labels.clone(),
            fields: Mutex::new(self.fields()),
        }
    }

    /// Record `message` under the `message` field and snapshot the entry.
    ///
    /// Writes to the shared field set: the message stays there until the
    /// next call overwrites it.
    pub(crate) fn build_entry(&self, level: Level, message: &str) -> LogEntry {
        let fields = {
            let mut fields = self.fields.lock();
            fields.attach(MESSAGE_FIELD, message);
            fields.clone()
        };
        LogEntry::now(level, message, self.labels.clone(), fields)
    }

    async fn push(&self, level: Level, message: &str) -> Result<(), PushError> {
        let request = self.build_entry(level, message).to_push_request(LineFormat::Fields)?;
        self.sink.send(&request).await
    }
}

#[async_trait]
impl StructuredLogger for ContextScopedLogger {
    async fn log(&self, level: Level, message: &str) {
        if let Err(failure) = self.push(level, message).await {
            self.fallback.report(level, &failure);
        }
    }

    fn record_field(&self, key: &str, value: FieldValue) {
        self.fields.lock().insert(key, value);
    }
}

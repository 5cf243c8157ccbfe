use async_trait::async_trait;
use std::sync::Arc;

use crate::error::PushError;
use crate::fallback::{FallbackLog, TracingFallback};
use crate::fields::{FieldSet, LabelSet, ENV_LABEL, FUNCTION_NAME_LABEL, SERVICE_LABEL};
use crate::logger::StructuredLogger;
use crate::record::{Level, LineFormat, LogEntry};
use crate::sink::LogSink;

/// Logger that pushes raw messages tagged with an optional function name.
///
/// Carries no field set: the line on the wire is the message text itself.
pub struct NamedFunctionLogger {
    sink: Arc<dyn LogSink>,
    fallback: Arc<dyn FallbackLog>,
    service: String,
    environment: String,
    function_name: Option<String>,
}

impl NamedFunctionLogger {
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

    pub fn with_sink(
        sink: Arc<dyn LogSink>,
        service: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            fallback: Arc::new(TracingFallback),
            service: service.into(),
            environment: environment.into(),
            function_name: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackLog>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Tag subsequent lines with `function_name = "{service}_{name}"`.
    pub fn set_function_name(&mut self, name: &str) {
        self.function_name = Some(format!("{}_{}", self.service, name));
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    pub fn build_entry(&self, level: Level, message: &str) -> LogEntry {
        let mut labels = LabelSet::new();
        labels.attach(SERVICE_LABEL, self.service.as_str());
        labels.attach(ENV_LABEL, self.environment.as_str());
        if let Some(name) = &self.function_name {
            labels.attach(FUNCTION_NAME_LABEL, name.as_str());
        }
        LogEntry::now(level, message, labels, FieldSet::new())
    }

    async fn push(&self, level: Level, message: &str) -> Result<(), PushError> {
        let request = self.build_entry(level, message).to_push_request(LineFormat::Plain)?;
        self.sink.send(&request).await
    }
}

#[async_trait]
impl StructuredLogger for NamedFunctionLogger {
    async fn log(&self, level: Level, message: &str) {
        if let Err(failure) = self.push(level, message).await {
            self.fallback.report(level, &failure);
        }
    }
}

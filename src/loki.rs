use crate::env::{LOKI_HOST_ENV, LOKI_PORT_ENV, LOKI_TIMEOUT_MS_ENV};
use crate::error::{PushError, SinkBuildError};
use crate::sink::LogSink;
use crate::wire::PushRequest;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Path of the JSON push endpoint on a Loki server.
pub const PUSH_PATH: &str = "/loki/api/v1/push";

/// Configuration for [`LokiSink`].
///
/// The sink posts one JSON push body per log call to
/// `http://{host}:{port}/loki/api/v1/push`. `timeout` bounds each request
/// so a stalled endpoint cannot hold the caller indefinitely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LokiConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for LokiConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3100,
            timeout: Duration::from_secs(5),
        }
    }
}

impl LokiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full push URL.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, PUSH_PATH)
    }

    /// Build a config from [`LOKI_HOST_ENV`], [`LOKI_PORT_ENV`] and
    /// [`LOKI_TIMEOUT_MS_ENV`]. Missing or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup(LOKI_HOST_ENV).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup(LOKI_PORT_ENV).and_then(|p| p.trim().parse().ok()) {
            config.port = port;
        }
        if let Some(ms) = lookup(LOKI_TIMEOUT_MS_ENV).and_then(|t| t.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }

    fn validate(&self) -> Result<(), SinkBuildError> {
        if self.host.trim().is_empty() {
            return Err(SinkBuildError::InvalidEndpoint("empty host".to_string()));
        }
        if self.port == 0 {
            return Err(SinkBuildError::InvalidEndpoint("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Loki implementation of [`LogSink`] using the HTTP push API.
#[derive(Clone, Debug)]
pub struct LokiSink {
    client: Client,
    endpoint: String,
}

impl LokiSink {
    /// Construct a new sink instance using the provided configuration.
    ///
    /// **Parameters**
    /// - `config`: [`LokiConfig`] describing target host, port and the
    ///   per-request timeout.
    ///
    /// **Returns**
    /// - A ready-to-use [`LokiSink`], or [`SinkBuildError`] when the
    ///   endpoint is unusable or the HTTP client cannot be created.
    pub fn new(config: LokiConfig) -> Result<Self, SinkBuildError> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for LokiSink {
    async fn send(&self, request: &PushRequest) -> Result<(), PushError> {
        let body = serde_json::to_vec(request)?;
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if resp.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(PushError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_push_path() {
        let config = LokiConfig::new("loki.local", 3100);
        assert_eq!(config.endpoint(), "http://loki.local:3100/loki/api/v1/push");
    }

    #[test]
    fn from_lookup_falls_back_on_bad_values() {
        let config = LokiConfig::from_lookup(|key| match key {
            LOKI_HOST_ENV => Some(" loki ".to_string()),
            LOKI_PORT_ENV => Some("not-a-port".to_string()),
            LOKI_TIMEOUT_MS_ENV => Some("250".to_string()),
            _ => None,
        });

        assert_eq!(config.host, "loki");
        assert_eq!(config.port, 3100);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_unusable_endpoint() {
        assert!(matches!(
            LokiSink::new(LokiConfig::new("", 3100)),
            Err(SinkBuildError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            LokiSink::new(LokiConfig::new("loki", 0)),
            Err(SinkBuildError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn builds_sink_for_valid_config() {
        let sink = LokiSink::new(LokiConfig::new("127.0.0.1", 3100)).unwrap();
        assert_eq!(sink.endpoint(), "http://127.0.0.1:3100/loki/api/v1/push");
    }
}

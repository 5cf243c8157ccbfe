//! Environment variable names used by this crate for convenient
//! configuration of loggers from microservices.
//!
//! These are purely helpers; the logger and sink types remain decoupled
//! from environment access.

/// Loki host name or address, e.g. `loki.monitoring.svc`.
pub const LOKI_HOST_ENV: &str = "LOKI_HOST";

/// Loki HTTP port, e.g. `3100`.
pub const LOKI_PORT_ENV: &str = "LOKI_PORT";

/// Optional request timeout in milliseconds for each push.
pub const LOKI_TIMEOUT_MS_ENV: &str = "LOKI_TIMEOUT_MS";

/// Logical service name attached to every stream.
pub const LOG_SERVICE_NAME_ENV: &str = "LOG_SERVICE_NAME";

/// Deployment environment attached to every stream, e.g. `prod`.
pub const LOG_ENVIRONMENT_ENV: &str = "LOG_ENVIRONMENT";

const DEFAULT_SERVICE: &str = "unknown";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Service name and environment labels shared by both logger flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub service: String,
    pub environment: String,
}

impl ServiceIdentity {
    pub fn new(service: impl Into<String>, environment: impl Into<String>) -> Self {
        ServiceIdentity {
            service: service.into(),
            environment: environment.into(),
        }
    }

    /// Read [`LOG_SERVICE_NAME_ENV`] and [`LOG_ENVIRONMENT_ENV`], defaulting
    /// to `unknown` / `development`.
    pub fn from_env() -> Self {
        ServiceIdentity {
            service: env_or(LOG_SERVICE_NAME_ENV, DEFAULT_SERVICE),
            environment: env_or(LOG_ENVIRONMENT_ENV, DEFAULT_ENVIRONMENT),
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ServiceIdentity {
            service: lookup(LOG_SERVICE_NAME_ENV).unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            environment: lookup(LOG_ENVIRONMENT_ENV)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_defaults_when_unset() {
        let identity = ServiceIdentity::from_lookup(|_| None);
        assert_eq!(identity, ServiceIdentity::new("unknown", "development"));
    }

    #[test]
    fn env_or_falls_back_for_unset_variable() {
        assert_eq!(env_or("LOKI_SCOPE_LOGGER_TEST_UNSET_VARIABLE", "fallback"), "fallback");
    }

    #[test]
    fn identity_reads_lookup() {
        let identity = ServiceIdentity::from_lookup(|key| match key {
            LOG_SERVICE_NAME_ENV => Some("billing".to_string()),
            LOG_ENVIRONMENT_ENV => Some("prod".to_string()),
            _ => None,
        });
        assert_eq!(identity, ServiceIdentity::new("billing", "prod"));
    }
}

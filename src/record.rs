use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::PushError;
use crate::fields::{FieldSet, LabelSet, ENV_LABEL, FUNCTION_NAME_LABEL, SERVICE_LABEL};
use crate::wire::{PushRequest, Stream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the line of a [`LogEntry`] is rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// The field set as a JSON object (the message is one of its fields).
    Fields,
    /// The bare message text.
    Plain,
}

/// Immutable snapshot of one log call, taken at send time.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub labels: LabelSet,
    pub fields: FieldSet,
}

impl LogEntry {
    /// Capture an entry stamped with the current wall-clock time.
    pub fn now(level: Level, message: impl Into<String>, labels: LabelSet, fields: FieldSet) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            labels,
            fields,
        }
    }

    /// Unix epoch nanoseconds as a decimal string, as Loki expects.
    pub fn timestamp_nanos(&self) -> String {
        match self.timestamp.timestamp_nanos_opt() {
            Some(nanos) => nanos.to_string(),
            // Outside the i64 nanosecond range (past 2262); still render exactly.
            None => format!(
                "{}{:09}",
                self.timestamp.timestamp(),
                self.timestamp.timestamp_subsec_nanos()
            ),
        }
    }

    fn stream(&self) -> Stream {
        Stream {
            service: self.labels.get_or_empty(SERVICE_LABEL).to_string(),
            level: self.level.as_str().to_string(),
            environment: self.labels.get_or_empty(ENV_LABEL).to_string(),
            function_name: self
                .labels
                .get(FUNCTION_NAME_LABEL)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    /// Build the push body for this entry.
    ///
    /// Fails only for [`LineFormat::Fields`] when a field value could not
    /// be serialized.
    pub fn to_push_request(&self, format: LineFormat) -> Result<PushRequest, PushError> {
        let line = match format {
            LineFormat::Fields => self.fields.to_json()?,
            LineFormat::Plain => self.message.clone(),
        };
        Ok(PushRequest::single(self.stream(), self.timestamp_nanos(), line))
    }
}

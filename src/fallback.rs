use crate::error::PushError;
use crate::record::Level;

/// Local channel for reporting entries that could not be pushed.
///
/// Loggers never return delivery errors to their callers. Whatever goes
/// wrong between building an entry and getting a `204` back ends up here.
pub trait FallbackLog: Send + Sync {
    fn report(&self, level: Level, failure: &PushError);
}

/// Reports failures as `tracing` warnings on the process' own subscriber.
///
/// Until a global subscriber is installed the same report is written to
/// stderr instead, so failures are never dropped silently. Pair with
/// [`crate::init::init_fallback_logging`] for formatted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFallback;

fn summary(failure: &PushError) -> &'static str {
    match failure {
        PushError::Serialization(_) => "failed to marshal log entry",
        PushError::Transport(_) => "failed to send log entry to loki",
        PushError::UnexpectedStatus { .. } => "loki rejected log entry",
    }
}

/// Line written to stderr when no subscriber is listening.
fn stderr_line(level: Level, failure: &PushError) -> String {
    format!("{} (entry_level={}): {}", summary(failure), level, failure)
}

impl FallbackLog for TracingFallback {
    fn report(&self, level: Level, failure: &PushError) {
        if !tracing::dispatcher::has_been_set() {
            eprintln!("{}", stderr_line(level, failure));
            return;
        }
        let message = summary(failure);
        match failure.status() {
            Some(status) => {
                tracing::warn!(entry_level = %level, status, error = %failure, "{}", message);
            }
            None => {
                tracing::warn!(entry_level = %level, error = %failure, "{}", message);
            }
        }
    }
}

//! Explicit carrier for loggers across a unit of work.
//!
//! A [`Context`] is cheap to clone and is passed by the caller down the
//! call chain, the way a request handle would be. Loggers bound to it are
//! shared, not copied: every context derived from the same binding
//! mutates the same field set. Call [`Context::fork`] before handing a
//! context to concurrently running children.

use serde::Serialize;
use std::error::Error;
use std::sync::Arc;

use crate::fields::{FieldValue, ERROR_FIELD, USER_UUID_FIELD};
use crate::logger::{NoopLogger, StructuredLogger};
use crate::named::NamedFunctionLogger;
use crate::scoped::ContextScopedLogger;

static NOOP: NoopLogger = NoopLogger;

#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Arc<ContextScopedLogger>>,
    named: Option<Arc<NamedFunctionLogger>>,
}

impl Context {
    /// An empty context with nothing bound.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying `logger`.
    pub fn with_logger(&self, logger: Arc<ContextScopedLogger>) -> Self {
        Self {
            logger: Some(logger),
            named: self.named.clone(),
        }
    }

    /// The bound scoped logger, if any.
    pub fn logger(&self) -> Option<&Arc<ContextScopedLogger>> {
        self.logger.as_ref()
    }

    pub fn with_named_logger(&self, logger: Arc<NamedFunctionLogger>) -> Self {
        Self {
            logger: self.logger.clone(),
            named: Some(logger),
        }
    }

    pub fn named_logger(&self) -> Option<&Arc<NamedFunctionLogger>> {
        self.named.as_ref()
    }

    /// The bound scoped logger, or a [`NoopLogger`] when nothing is bound.
    pub fn scope(&self) -> &dyn StructuredLogger {
        match &self.logger {
            Some(logger) => &**logger,
            None => &NOOP,
        }
    }

    /// Same as [`Context::scope`] for the named-function logger.
    pub fn named_scope(&self) -> &dyn StructuredLogger {
        match &self.named {
            Some(logger) => &**logger,
            None => &NOOP,
        }
    }

    /// Derive a context whose scoped logger owns a copy of the current
    /// fields, so writes on the two branches no longer see each other.
    pub fn fork(&self) -> Self {
        Self {
            logger: self.logger.as_ref().map(|logger| Arc::new(logger.fork())),
            named: self.named.clone(),
        }
    }
}

/// Attach `key = value` to the bound logger's fields.
///
/// Returns `ctx` unchanged when no logger is bound.
pub fn with_field<T: Serialize + ?Sized>(ctx: &Context, key: &str, value: &T) -> Context {
    ctx.scope().record_field(key, FieldValue::from_serialize(value));
    ctx.clone()
}

/// Attach the error's display text under `error`.
pub fn with_error<E: Error + ?Sized>(ctx: &Context, err: &E) -> Context {
    with_field(ctx, ERROR_FIELD, &err.to_string())
}

/// Attach a user identifier under `user_uuid`.
pub fn with_user_uuid(ctx: &Context, user_uuid: &str) -> Context {
    with_field(ctx, USER_UUID_FIELD, user_uuid)
}

pub async fn info(ctx: &Context, message: &str) {
    ctx.scope().info(message).await
}

pub async fn warn(ctx: &Context, message: &str) {
    ctx.scope().warn(message).await
}

pub async fn error(ctx: &Context, message: &str) {
    ctx.scope().error(message).await
}

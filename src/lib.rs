pub mod error;
pub mod fields;
pub mod record;
pub mod wire;
pub mod sink;
pub mod fallback;
pub mod logger;
pub mod scoped;
pub mod named;
pub mod context;

#[cfg(feature = "loki")]
pub mod loki;

pub mod env;
pub mod init;
pub mod noop_sink;

pub use context::Context;
pub use logger::{NoopLogger, StructuredLogger};
pub use named::NamedFunctionLogger;
pub use record::Level;
pub use scoped::ContextScopedLogger;

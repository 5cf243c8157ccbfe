use std::error::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

/// Configuration of the local fallback log.
///
/// **Fields**
/// - `ansi`: colorize output; turn off when stderr is collected by a
///   log shipper.
/// - `with_target`: include the emitting module in each line.
#[derive(Clone, Debug)]
pub struct FallbackConfig {
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            ansi: true,
            with_target: true,
        }
    }
}

/// Install a global `tracing` subscriber that prints to stderr.
///
/// [`crate::fallback::TracingFallback`] reports delivery failures as
/// `tracing` events; this gives them somewhere to go in processes that do
/// not set up their own subscriber.
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already installed. The existing
///   one is left in place and keeps receiving the fallback events.
pub fn init_fallback_logging_with_config(
    config: FallbackConfig,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(config.with_target);
    Registry::default().with(fmt_layer).try_init()?;
    Ok(())
}

/// Initialize the fallback log with [`FallbackConfig::default`].
pub fn init_fallback_logging() -> Result<(), Box<dyn Error + Send + Sync>> {
    init_fallback_logging_with_config(FallbackConfig::default())
}

//! Tracing setup and forwarding of post-processing log messages.
//!
//! Diagnostics collected while configuring are plain data; [`emit`] replays
//! them through `tracing` once the pass is over, so the order the user sees
//! matches the order the entries were processed.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::messages::{LogLevel, LogMessage};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=navigator=debug ansible-navigator config -m stdout
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

/// Forward collected log messages to the subscriber at their own level.
pub fn emit(messages: &[LogMessage]) {
    for msg in messages {
        match msg.level {
            LogLevel::Debug => tracing::debug!(target: "navigator::post_process", "{}", msg.message),
            LogLevel::Info => tracing::info!(target: "navigator::post_process", "{}", msg.message),
            LogLevel::Error => tracing::error!(target: "navigator::post_process", "{}", msg.message),
        }
    }
}

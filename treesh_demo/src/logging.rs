//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG` (default `info`). Records emitted by the
/// library through the `log` facade are bridged into the subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log security event with structured data
///
/// # Arguments
///
/// * `event_type` - Type of security event
/// * `match_id` - Optional chat thread the event concerns
/// * `message` - Event message
pub fn log_security_event(event_type: &str, match_id: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        match_id = match_id,
        "SECURITY: {}",
        message
    );
}

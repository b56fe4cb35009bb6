//! Structured logging configuration.
//!
//! Library records emitted through `log` are forwarded into the same
//! subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the RUST_LOG env var, `info` by default.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr, stdout carries the bot replies
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log one handled chat command
///
/// # Arguments
///
/// * `user_id` - Platform id of the caller
/// * `command` - Command keyword as typed
/// * `ok` - Whether the command succeeded
pub fn log_command_event(user_id: u64, command: &str, ok: bool) {
    if ok {
        tracing::info!(user_id = user_id, command = command, "Command handled");
    } else {
        tracing::debug!(user_id = user_id, command = command, "Command rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_command_event() {
        // Just ensure it doesn't panic without a subscriber
        log_command_event(42, "join", true);
        log_command_event(42, "start", false);
    }
}

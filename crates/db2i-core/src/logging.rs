//! Logging integration for db2i-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`AdapterSettings`] and for creating per-command spans. Generated SQL is
//! emitted on the [`SQL_TARGET`] target so it can be filtered separately
//! (e.g. `db2i::sql=info`).

use crate::settings::AdapterSettings;

/// Tracing target for every statement sent to the connection.
pub const SQL_TARGET: &str = "db2i::sql";

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format.
/// Installing a subscriber twice is silently ignored.
pub fn setup_logging(settings: &AdapterSettings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one schema command.
///
/// Every statement logged while the span is entered carries the command name.
///
/// # Examples
///
/// ```
/// use db2i_core::logging::command_span;
///
/// let span = command_span("addColumn");
/// let _guard = span.enter();
/// tracing::info!("adding column");
/// ```
pub fn command_span(command: &str) -> tracing::Span {
    tracing::info_span!("command", name = command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_does_not_panic() {
        let settings = AdapterSettings::default();
        setup_logging(&settings);
        setup_logging(&AdapterSettings { debug: true, ..settings });
    }

    #[test]
    fn test_command_span_enter() {
        let span = command_span("createTable");
        let _guard = span.enter();
        tracing::info!("inside span");
    }
}

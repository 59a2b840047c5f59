//! Logging integration for unobtrusive-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-field spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used. An already-installed subscriber is left
/// in place.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
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

/// Creates a tracing span for building the rule descriptors of one field.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::logging::field_span;
///
/// let span = field_span("email");
/// let _guard = span.enter();
/// tracing::debug!("building rule descriptors");
/// ```
pub fn field_span(field: &str) -> tracing::Span {
    tracing::debug_span!("rule_descriptors", field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_does_not_panic() {
        let settings = Settings {
            log_level: "not a valid ::: directive".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings {
            debug: false,
            ..Settings::default()
        });
    }

    #[test]
    fn test_field_span_enter() {
        let span = field_span("age");
        let _guard = span.enter();
    }
}

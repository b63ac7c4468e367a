//! Logging integration for uniform-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-form spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "uniform_rs_forms=trace"). In debug mode a pretty, human-readable format is
/// used; otherwise a structured JSON format is used. Logs go to stderr.
/// Installing a subscriber twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
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
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one attached form.
///
/// Form controllers enter this span around every event handler so that all
/// log entries emitted while handling focus, blur, submit and unload carry
/// the form's identifier.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::logging::form_span;
///
/// let span = form_span("signup");
/// let _guard = span.enter();
/// tracing::info!("handling submit");
/// ```
pub fn form_span(form_id: &str) -> tracing::Span {
    tracing::info_span!("form", id = form_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            debug: false,
            log_level: "not a valid ==== filter".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_form_span_enter() {
        let span = form_span("contact");
        let _guard = span.enter();
        tracing::debug!("inside form span");
    }
}

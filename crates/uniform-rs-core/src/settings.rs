//! Settings and per-form options.
//!
//! [`Options`] is the plain-data part of a form attachment's configuration:
//! class names, the field selector, the prompt colour and the behaviour
//! flags. It is resolved exactly once per attachment by merging the default
//! table with an [`OptionOverrides`] and is never mutated afterwards.
//!
//! [`Settings`] holds process-level configuration (logging, language, the
//! default option table) and is usually produced by
//! [`settings_loader`](crate::settings_loader).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved, immutable options for one form attachment.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::settings::{OptionOverrides, Options};
///
/// let overrides = OptionOverrides {
///     prevent_submit: Some(true),
///     holder_class: Some("ctrlHolder".into()),
///     ..OptionOverrides::default()
/// };
/// let options = Options::default().merged(&overrides);
/// assert!(options.prevent_submit);
/// assert_eq!(options.holder_class, "ctrlHolder");
/// assert_eq!(options.valid_class, "valid");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    // ── Behaviour ────────────────────────────────────────────────────

    /// Validate every field on submit and block submission on errors.
    pub prevent_submit: bool,
    /// Warn before leaving the page when the form contents changed.
    pub ask_on_leave: bool,

    // ── Visual class names ───────────────────────────────────────────

    /// Class toggled on a field and its holder after successful validation.
    pub valid_class: String,
    /// Class toggled on a field and its holder after failed validation.
    pub invalid_class: String,
    /// Error marker class, toggled together with `invalid_class`.
    pub error_class: String,
    /// Class placed on the holder of the focused field.
    pub focused_class: String,
    /// Class identifying the container that wraps a field.
    pub holder_class: String,
    /// Class identifying the help-text element inside a holder.
    pub hint_class: String,

    // ── Form marker classes ──────────────────────────────────────────

    /// Form class that enables leave-confirmation like `ask_on_leave`.
    pub ask_on_leave_class: String,
    /// Form class that enables submit prevention like `prevent_submit`.
    pub prevent_submit_class: String,
    /// Class placed on the form after a blocked submission.
    pub failed_submit_class: String,

    // ── Discovery and rendering ──────────────────────────────────────

    /// Selector deciding which form controls are managed fields.
    pub field_selector: String,
    /// Text colour used while a field shows its default prompt.
    pub default_value_color: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prevent_submit: false,
            ask_on_leave: false,
            valid_class: "valid".to_string(),
            invalid_class: "invalid".to_string(),
            error_class: "error".to_string(),
            focused_class: "focused".to_string(),
            holder_class: "ctrl-holder".to_string(),
            hint_class: "form-hint".to_string(),
            ask_on_leave_class: "askOnLeave".to_string(),
            prevent_submit_class: "preventSubmit".to_string(),
            failed_submit_class: "failedSubmit".to_string(),
            field_selector: "input, textarea, select".to_string(),
            default_value_color: "#afafaf".to_string(),
        }
    }
}

impl Options {
    /// Returns a copy of these options with every `Some` override applied.
    #[must_use]
    pub fn merged(&self, overrides: &OptionOverrides) -> Self {
        let mut out = self.clone();
        if let Some(v) = overrides.prevent_submit {
            out.prevent_submit = v;
        }
        if let Some(v) = overrides.ask_on_leave {
            out.ask_on_leave = v;
        }
        let strings = [
            (&mut out.valid_class, &overrides.valid_class),
            (&mut out.invalid_class, &overrides.invalid_class),
            (&mut out.error_class, &overrides.error_class),
            (&mut out.focused_class, &overrides.focused_class),
            (&mut out.holder_class, &overrides.holder_class),
            (&mut out.hint_class, &overrides.hint_class),
            (&mut out.ask_on_leave_class, &overrides.ask_on_leave_class),
            (&mut out.prevent_submit_class, &overrides.prevent_submit_class),
            (&mut out.failed_submit_class, &overrides.failed_submit_class),
            (&mut out.field_selector, &overrides.field_selector),
            (&mut out.default_value_color, &overrides.default_value_color),
        ];
        for (slot, value) in strings {
            if let Some(v) = value {
                slot.clone_from(v);
            }
        }
        out
    }

    /// Returns the class names that must be non-empty for the visual state
    /// machine to work, paired with their option names.
    pub fn class_names(&self) -> [(&'static str, &str); 9] {
        [
            ("valid_class", &self.valid_class),
            ("invalid_class", &self.invalid_class),
            ("error_class", &self.error_class),
            ("focused_class", &self.focused_class),
            ("holder_class", &self.holder_class),
            ("hint_class", &self.hint_class),
            ("ask_on_leave_class", &self.ask_on_leave_class),
            ("prevent_submit_class", &self.prevent_submit_class),
            ("failed_submit_class", &self.failed_submit_class),
        ]
    }
}

/// Per-call overrides for [`Options`]. Every `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionOverrides {
    pub prevent_submit: Option<bool>,
    pub ask_on_leave: Option<bool>,
    pub valid_class: Option<String>,
    pub invalid_class: Option<String>,
    pub error_class: Option<String>,
    pub focused_class: Option<String>,
    pub holder_class: Option<String>,
    pub hint_class: Option<String>,
    pub ask_on_leave_class: Option<String>,
    pub prevent_submit_class: Option<String>,
    pub failed_submit_class: Option<String>,
    pub field_selector: Option<String>,
    pub default_value_color: Option<String>,
}

/// Process-level configuration.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.language_code, "en");
/// assert_eq!(settings.options.field_selector, "input, textarea, select");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log filter (e.g. "info", "uniform_rs_forms=debug").
    pub log_level: String,
    /// The language of the active message table.
    pub language_code: String,
    /// An optional JSON or TOML message table layered over the English defaults.
    pub messages: Option<PathBuf>,
    /// The default option table every attachment starts from.
    pub options: Options,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            messages: None,
            options: Options::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let o = Options::default();
        assert!(!o.prevent_submit);
        assert!(!o.ask_on_leave);
        assert_eq!(o.valid_class, "valid");
        assert_eq!(o.invalid_class, "invalid");
        assert_eq!(o.error_class, "error");
        assert_eq!(o.focused_class, "focused");
        assert_eq!(o.holder_class, "ctrl-holder");
        assert_eq!(o.hint_class, "form-hint");
        assert_eq!(o.field_selector, "input, textarea, select");
        assert_eq!(o.default_value_color, "#afafaf");
        assert_eq!(o.failed_submit_class, "failedSubmit");
    }

    #[test]
    fn test_merge_keeps_unset_defaults() {
        let merged = Options::default().merged(&OptionOverrides::default());
        assert_eq!(merged, Options::default());
    }

    #[test]
    fn test_merge_applies_overrides() {
        let overrides = OptionOverrides {
            ask_on_leave: Some(true),
            error_class: Some("has-error".into()),
            default_value_color: Some("#999".into()),
            ..OptionOverrides::default()
        };
        let merged = Options::default().merged(&overrides);
        assert!(merged.ask_on_leave);
        assert_eq!(merged.error_class, "has-error");
        assert_eq!(merged.default_value_color, "#999");
        assert_eq!(merged.valid_class, "valid");
    }

    #[test]
    fn test_merge_does_not_touch_base() {
        let base = Options::default();
        let _ = base.merged(&OptionOverrides {
            valid_class: Some("ok".into()),
            ..OptionOverrides::default()
        });
        assert_eq!(base.valid_class, "valid");
    }

    #[test]
    fn test_overrides_deserialize_partial() {
        let overrides: OptionOverrides =
            serde_json::from_str(r#"{"prevent_submit": true}"#).unwrap();
        assert_eq!(overrides.prevent_submit, Some(true));
        assert!(overrides.holder_class.is_none());
    }

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert!(s.messages.is_none());
    }
}

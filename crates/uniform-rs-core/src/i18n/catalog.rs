//! Message template tables.
//!
//! A [`MessageTable`] maps a message key to a `%d`/`%s` template (see
//! [`format_template`]). The English table ships built in; localizations are
//! supplied as JSON or TOML documents keyed identically and layered over a
//! base table, so a partial localization falls back to the base for any key
//! it does not define.
//!
//! ## Document Format
//!
//! Either a flat object of templates or the same object nested under a
//! `messages` key:
//!
//! ```json
//! {
//!   "messages": {
//!     "required": "%s est requis",
//!     "email": "%s n'est pas une adresse Email valide"
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{UniformError, UniformResult};
use crate::i18n::format::{format_template, MessageArg};
use crate::settings::Settings;
use crate::settings_loader::toml_to_json;

/// Well-known message keys.
pub mod keys {
    pub const REQUIRED: &str = "required";
    pub const REQ_RADIO: &str = "req_radio";
    pub const REQ_CHECKBOX: &str = "req_checkbox";
    pub const MIN_LENGTH: &str = "minlength";
    pub const MIN: &str = "min";
    pub const MAX_LENGTH: &str = "maxlength";
    pub const MAX: &str = "max";
    pub const SAME_AS: &str = "same_as";
    pub const EMAIL: &str = "email";
    pub const URL: &str = "url";
    pub const NUMBER: &str = "number";
    pub const INTEGER: &str = "integer";
    pub const ALPHA: &str = "alpha";
    pub const ALPHANUM: &str = "alphanum";
    pub const PHRASE: &str = "phrase";
    pub const PHONE: &str = "phone";
    pub const DATE: &str = "date";
    pub const CALLBACK: &str = "callback";
    pub const ON_LEAVE: &str = "on_leave";
    pub const SUBMIT_MSG: &str = "submit_msg";
    pub const SUBMIT_HELP: &str = "submit_help";
    pub const SUBMIT_SUCCESS: &str = "submit_success";
}

const ENGLISH: [(&str, &str); 22] = [
    (keys::REQUIRED, "%s is required"),
    (keys::REQ_RADIO, "Please make a selection"),
    (keys::REQ_CHECKBOX, "You must select this checkbox to continue"),
    (keys::MIN_LENGTH, "%s should be at least %d characters long"),
    (keys::MIN, "%s should be greater than or equal to %d"),
    (keys::MAX_LENGTH, "%s should not be longer than %d characters"),
    (keys::MAX, "%s should be less than or equal to %d"),
    (keys::SAME_AS, "%s is expected to be same as %s"),
    (keys::EMAIL, "%s is not a valid email address"),
    (keys::URL, "%s is not a valid URL"),
    (keys::NUMBER, "%s needs to be a number"),
    (keys::INTEGER, "%s needs to be a whole number"),
    (
        keys::ALPHA,
        "%s should contain only letters (without special characters or numbers)",
    ),
    (
        keys::ALPHANUM,
        "%s should contain only numbers and letters (without special characters)",
    ),
    (
        keys::PHRASE,
        "%s should contain only alphabetic characters, numbers, spaces, and the following: . , - _ () * # :",
    ),
    (keys::PHONE, "%s should be a phone number"),
    (keys::DATE, "%s should be a date (mm/dd/yyyy)"),
    (
        keys::CALLBACK,
        "Failed to validate %s field. Validator function (%s) is not defined!",
    ),
    (
        keys::ON_LEAVE,
        "Are you sure you want to leave this page without saving this form?",
    ),
    (keys::SUBMIT_MSG, "Sorry, this form needs corrections."),
    (keys::SUBMIT_HELP, "Please see the items marked below."),
    (keys::SUBMIT_SUCCESS, "Thank you, this form has been sent."),
];

/// A table of message templates for one language.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::i18n::{MessageArg, MessageTable};
///
/// let table = MessageTable::english();
/// let msg = table.format("minlength", &["Name".into(), MessageArg::Int(5)]).unwrap();
/// assert_eq!(msg, "Name should be at least 5 characters long");
/// assert!(table.format("no_such_key", &[]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    language: String,
    templates: HashMap<String, String>,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageTable {
    /// Returns the built-in English table.
    pub fn english() -> Self {
        Self {
            language: "en".to_string(),
            templates: ENGLISH
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Creates a table with no templates.
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            templates: HashMap::new(),
        }
    }

    /// Parses a JSON message document.
    pub fn from_json_str(language: &str, json_str: &str) -> UniformResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
            UniformError::SerializationError(format!("Invalid JSON message table: {e}"))
        })?;
        Self::from_value(language, &value)
    }

    /// Parses a TOML message document.
    pub fn from_toml_str(language: &str, toml_str: &str) -> UniformResult<Self> {
        let value: toml::Value = toml::from_str(toml_str).map_err(|e| {
            UniformError::SerializationError(format!("Invalid TOML message table: {e}"))
        })?;
        Self::from_value(language, &toml_to_json(value))
    }

    /// Reads a message document from disk (`.json` is JSON, anything else TOML).
    pub fn from_file(language: &str, path: impl AsRef<Path>) -> UniformResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_str(language, &content)
        } else {
            Self::from_toml_str(language, &content)
        }
    }

    /// Builds the table `settings` asks for: the English table with the
    /// localization file named by `settings.messages` layered on top.
    pub fn from_settings(settings: &Settings) -> UniformResult<Self> {
        let english = Self::english();
        match &settings.messages {
            Some(path) => {
                let overlay = Self::from_file(&settings.language_code, path)?;
                Ok(Self::layered(&english, &overlay))
            }
            None => Ok(english),
        }
    }

    fn from_value(language: &str, value: &serde_json::Value) -> UniformResult<Self> {
        let object = value
            .get("messages")
            .unwrap_or(value)
            .as_object()
            .ok_or_else(|| {
                UniformError::SerializationError(
                    "message table must be an object of templates".to_string(),
                )
            })?;

        let mut table = Self::empty(language);
        for (key, template) in object {
            let template = template.as_str().ok_or_else(|| {
                UniformError::SerializationError(format!(
                    "message template '{key}' must be a string"
                ))
            })?;
            table.set(key.clone(), template);
        }
        Ok(table)
    }

    /// Returns the language code of this table.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Sets (or replaces) a template.
    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Copies every template of `other` over this table. The language becomes
    /// that of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.language.clone_from(&other.language);
        for (key, template) in &other.templates {
            self.templates.insert(key.clone(), template.clone());
        }
    }

    /// Returns `base` with `overlay` layered on top.
    #[must_use]
    pub fn layered(base: &Self, overlay: &Self) -> Self {
        let mut table = base.clone();
        table.extend(overlay);
        table
    }

    /// Returns the raw template for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Returns `true` if the key has a template.
    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Returns the keys of this table, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the keys of `reference` that this table does not define, sorted.
    pub fn missing_keys<'a>(&self, reference: &'a Self) -> Vec<&'a str> {
        let mut missing: Vec<&str> = reference
            .templates
            .keys()
            .filter(|key| !self.templates.contains_key(*key))
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Formats the template for `key` with positional arguments.
    ///
    /// Fails with [`UniformError::UnknownMessageKey`] if the key is not defined.
    pub fn format(&self, key: &str, args: &[MessageArg]) -> UniformResult<String> {
        let template = self
            .get(key)
            .ok_or_else(|| UniformError::UnknownMessageKey(key.to_string()))?;
        Ok(format_template(template, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_has_all_keys() {
        let table = MessageTable::english();
        assert_eq!(table.keys().len(), 22);
        assert_eq!(table.language(), "en");
        assert_eq!(table.get(keys::REQUIRED), Some("%s is required"));
    }

    #[test]
    fn test_format_required() {
        let table = MessageTable::english();
        assert_eq!(
            table.format(keys::REQUIRED, &["Email".into()]).unwrap(),
            "Email is required"
        );
    }

    #[test]
    fn test_format_unknown_key() {
        let err = MessageTable::english().format("bogus", &[]).unwrap_err();
        assert!(matches!(err, UniformError::UnknownMessageKey(ref k) if k == "bogus"));
    }

    #[test]
    fn test_from_json_flat() {
        let table =
            MessageTable::from_json_str("fr", r#"{"required": "%s est requis"}"#).unwrap();
        assert_eq!(table.language(), "fr");
        assert_eq!(
            table.format(keys::REQUIRED, &["Nom".into()]).unwrap(),
            "Nom est requis"
        );
    }

    #[test]
    fn test_from_json_nested_messages() {
        let table = MessageTable::from_json_str(
            "nl",
            r#"{"messages": {"email": "%s is geen geldig e-mailadres"}}"#,
        )
        .unwrap();
        assert!(table.contains(keys::EMAIL));
        assert!(!table.contains(keys::REQUIRED));
    }

    #[test]
    fn test_from_json_rejects_non_string() {
        let result = MessageTable::from_json_str("xx", r#"{"required": 5}"#);
        assert!(matches!(result, Err(UniformError::SerializationError(_))));
    }

    #[test]
    fn test_from_toml() {
        let table = MessageTable::from_toml_str(
            "da",
            r#"
            [messages]
            required = "%s er påkrævet"
            "#,
        )
        .unwrap();
        assert_eq!(table.get(keys::REQUIRED), Some("%s er påkrævet"));
    }

    #[test]
    fn test_layered_falls_back_to_base() {
        let overlay =
            MessageTable::from_json_str("fr", r#"{"required": "%s est requis"}"#).unwrap();
        let table = MessageTable::layered(&MessageTable::english(), &overlay);
        assert_eq!(table.language(), "fr");
        assert_eq!(table.get(keys::REQUIRED), Some("%s est requis"));
        assert_eq!(table.get(keys::PHONE), Some("%s should be a phone number"));
    }

    #[test]
    fn test_missing_keys() {
        let partial =
            MessageTable::from_json_str("tr", r#"{"required": "%s gerekli"}"#).unwrap();
        let english = MessageTable::english();
        let missing = partial.missing_keys(&english);
        assert_eq!(missing.len(), 21);
        assert!(!missing.contains(&keys::REQUIRED));
        assert!(missing.contains(&keys::SUBMIT_SUCCESS));
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fi.json");
        std::fs::write(&path, r#"{"required": "%s vaaditaan"}"#).unwrap();
        let table = MessageTable::from_file("fi", &path).unwrap();
        assert_eq!(table.get(keys::REQUIRED), Some("%s vaaditaan"));
    }

    #[test]
    fn test_from_settings_layers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.toml");
        std::fs::write(&path, "required = \"%s ist erforderlich\"\n").unwrap();
        let settings = Settings {
            language_code: "de".to_string(),
            messages: Some(path),
            ..Settings::default()
        };
        let table = MessageTable::from_settings(&settings).unwrap();
        assert_eq!(table.language(), "de");
        assert_eq!(table.get(keys::REQUIRED), Some("%s ist erforderlich"));
        assert_eq!(table.get(keys::EMAIL), Some("%s is not a valid email address"));
    }

    #[test]
    fn test_from_settings_default_is_english() {
        let table = MessageTable::from_settings(&Settings::default()).unwrap();
        assert_eq!(table, MessageTable::english());
    }
}

//! The `check` management command.
//!
//! Inspects the settings for configurations that would break the form
//! controllers at runtime: empty class names, an empty field selector, and
//! localization files that fail to load or drift from the English table.

use std::io::Write;
use std::path::PathBuf;

use uniform_rs_core::{MessageTable, Settings, UniformError};

use crate::command::ManagementCommand;

/// Runs configuration checks.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    pub level: CheckLevel,
    /// A human-readable description of the issue.
    pub msg: String,
    /// An optional hint for how to resolve the issue.
    pub hint: Option<String>,
    /// A unique identifier for this check (e.g. "options.E001").
    pub id: String,
}

impl CheckMessage {
    fn new(level: CheckLevel, id: &str, msg: impl Into<String>) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: None,
            id: id.to_string(),
        }
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

fn placeholder_count(template: &str) -> usize {
    template.matches("%s").count() + template.matches("%d").count()
}

/// Runs every check against `settings`.
pub fn run_checks(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = check_options(settings);
    messages.extend(check_messages(settings));
    messages
}

fn check_options(settings: &Settings) -> Vec<CheckMessage> {
    let options = &settings.options;
    let mut messages = Vec::new();

    for (name, value) in options.class_names() {
        if value.trim().is_empty() {
            messages.push(
                CheckMessage::new(CheckLevel::Error, "options.E001", format!("{name} is empty"))
                    .hint("Every marker class needs a non-empty name"),
            );
        }
    }

    if options.field_selector.trim().is_empty() {
        messages.push(
            CheckMessage::new(CheckLevel::Error, "options.E002", "field_selector is empty")
                .hint("Use e.g. \"input, textarea, select\""),
        );
    }

    if !options.valid_class.is_empty() && options.valid_class == options.invalid_class {
        messages.push(
            CheckMessage::new(
                CheckLevel::Warning,
                "options.W001",
                "valid_class and invalid_class are identical",
            )
            .hint("Valid and invalid fields will look the same"),
        );
    }

    messages
}

fn check_messages(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    let Some(path) = &settings.messages else {
        if settings.language_code != "en" {
            messages.push(
                CheckMessage::new(
                    CheckLevel::Warning,
                    "messages.W003",
                    format!(
                        "language_code is '{}' but no message table is configured",
                        settings.language_code
                    ),
                )
                .hint("Set `messages` to a localization file; English is used meanwhile"),
            );
        }
        return messages;
    };

    let overlay = match MessageTable::from_file(&settings.language_code, path) {
        Ok(table) => table,
        Err(e) => {
            messages.push(CheckMessage::new(
                CheckLevel::Error,
                "messages.E001",
                format!("cannot load {}: {e}", path.display()),
            ));
            return messages;
        }
    };
    let english = MessageTable::english();

    let missing = overlay.missing_keys(&english);
    if !missing.is_empty() {
        messages.push(
            CheckMessage::new(
                CheckLevel::Info,
                "messages.I001",
                format!("{} message(s) not translated: {}", missing.len(), missing.join(", ")),
            )
            .hint("Untranslated messages fall back to English"),
        );
    }

    for key in overlay.keys() {
        match (english.get(key), overlay.get(key)) {
            (None, _) => messages.push(
                CheckMessage::new(
                    CheckLevel::Warning,
                    "messages.W001",
                    format!("unknown message key '{key}'"),
                )
                .hint("Custom validators may use it; otherwise it is a typo"),
            ),
            (Some(reference), Some(template))
                if placeholder_count(reference) != placeholder_count(template) =>
            {
                messages.push(CheckMessage::new(
                    CheckLevel::Warning,
                    "messages.W002",
                    format!(
                        "'{key}' has {} placeholder(s), English has {}",
                        placeholder_count(template),
                        placeholder_count(reference)
                    ),
                ));
            }
            _ => {}
        }
    }

    messages
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check settings and message tables for problems"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("messages")
                .long("messages")
                .value_name("FILE")
                .help("Message table to check instead of the configured one"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), UniformError> {
        let mut settings = settings.clone();
        if let Some(path) = matches.get_one::<String>("messages") {
            settings.messages = Some(PathBuf::from(path));
        }
        let messages = run_checks(&settings);

        if messages.is_empty() {
            writeln!(out, "System check identified no issues.")?;
            return Ok(());
        }

        for msg in &messages {
            writeln!(out, "{} ({}): {}", msg.level, msg.id, msg.msg)?;
            if let Some(hint) = &msg.hint {
                writeln!(out, "\tHINT: {hint}")?;
            }
        }

        let errors = messages.iter().filter(|m| m.level == CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();
        writeln!(
            out,
            "System check identified {} issue(s) ({errors} error(s), {warnings} warning(s)).",
            messages.len()
        )?;
        tracing::info!(errors, warnings, "system check finished");

        if errors > 0 {
            return Err(UniformError::ConfigurationError(format!(
                "System check found {errors} error(s)"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(messages: &[CheckMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    fn with_messages(content: &str, ext: &str) -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("messages.{ext}"));
        std::fs::write(&path, content).unwrap();
        let settings = Settings {
            language_code: "fr".to_string(),
            messages: Some(path),
            ..Settings::default()
        };
        (dir, settings)
    }

    #[test]
    fn test_defaults_are_clean() {
        assert!(run_checks(&Settings::default()).is_empty());
    }

    #[test]
    fn test_empty_class_name() {
        let mut settings = Settings::default();
        settings.options.focused_class = String::new();
        let messages = run_checks(&settings);
        assert_eq!(ids(&messages), vec!["options.E001"]);
        assert!(messages[0].msg.contains("focused_class"));
        assert_eq!(messages[0].level, CheckLevel::Error);
    }

    #[test]
    fn test_empty_selector() {
        let mut settings = Settings::default();
        settings.options.field_selector = "  ".to_string();
        assert_eq!(ids(&run_checks(&settings)), vec!["options.E002"]);
    }

    #[test]
    fn test_identical_valid_invalid() {
        let mut settings = Settings::default();
        settings.options.invalid_class = "valid".to_string();
        assert_eq!(ids(&run_checks(&settings)), vec!["options.W001"]);
    }

    #[test]
    fn test_language_without_table() {
        let settings = Settings {
            language_code: "de".to_string(),
            ..Settings::default()
        };
        assert_eq!(ids(&run_checks(&settings)), vec!["messages.W003"]);
    }

    #[test]
    fn test_unloadable_table() {
        let (_dir, settings) = with_messages("{broken", "json");
        let messages = run_checks(&settings);
        assert_eq!(ids(&messages), vec!["messages.E001"]);
    }

    #[test]
    fn test_partial_table() {
        let (_dir, settings) = with_messages(
            r#"
            [messages]
            required = "%s est requis"
            minlength = "%s est trop court"
            frobnicate = "?"
            "#,
            "toml",
        );
        let messages = run_checks(&settings);
        let found = ids(&messages);
        assert!(found.contains(&"messages.I001"));
        assert!(found.contains(&"messages.W001"));
        assert!(found.contains(&"messages.W002"));
        assert!(!found.contains(&"messages.E001"));

        let info = messages.iter().find(|m| m.id == "messages.I001").unwrap();
        let listed: Vec<&str> = info.msg.split(": ").nth(1).unwrap().split(", ").collect();
        assert!(listed.contains(&"email"));
        assert!(!listed.contains(&"required"));
        assert!(!listed.contains(&"minlength"));
    }

    #[test]
    fn test_level_display_and_order() {
        assert_eq!(CheckLevel::Info.to_string(), "INFO");
        assert_eq!(CheckLevel::Warning.to_string(), "WARNING");
        assert_eq!(CheckLevel::Error.to_string(), "ERROR");
        assert!(CheckLevel::Info < CheckLevel::Warning);
        assert!(CheckLevel::Warning < CheckLevel::Error);
    }

    #[test]
    fn test_placeholder_count() {
        assert_eq!(placeholder_count("%s is required"), 1);
        assert_eq!(placeholder_count("%s should be at least %d characters long"), 2);
        assert_eq!(placeholder_count("Please make a selection"), 0);
    }
}

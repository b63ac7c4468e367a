//! The `validate` management command.
//!
//! Runs the built-in validators against one standalone value, which is handy
//! for trying out modifier markup without a page.

use std::io::Write;

use uniform_rs_core::{MessageTable, Settings, UniformError, ValidationFailure};
use uniform_rs_forms::host::FieldKind;
use uniform_rs_forms::validation::{validate_detached, DetachedField, FieldReport};
use uniform_rs_forms::ValidatorRegistry;

use crate::command::ManagementCommand;

/// Validates a value against a modifier list.
pub struct ValidateCommand;

/// Parses a control kind by its lowercase name.
pub fn parse_kind(kind: &str) -> Result<FieldKind, UniformError> {
    match kind {
        "text" => Ok(FieldKind::Text),
        "textarea" => Ok(FieldKind::Textarea),
        "select" => Ok(FieldKind::Select),
        "checkbox" => Ok(FieldKind::Checkbox),
        "radio" => Ok(FieldKind::Radio),
        other => Err(UniformError::ConfigurationError(format!(
            "unknown field kind '{other}'"
        ))),
    }
}

/// Validates `field` with the built-in registry and the message table the
/// settings select.
pub fn validate_value(
    field: &DetachedField<'_>,
    settings: &Settings,
) -> Result<FieldReport, UniformError> {
    let messages = MessageTable::from_settings(settings)?;
    let registry = ValidatorRegistry::with_builtins();
    validate_detached(field, &registry, &settings.options, &messages)
}

fn arg<'a>(matches: &'a clap::ArgMatches, id: &str) -> &'a str {
    matches.get_one::<String>(id).map_or("", String::as_str)
}

impl ManagementCommand for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn help(&self) -> &'static str {
        "Validate a value against validator markup"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("modifiers")
                .long("modifiers")
                .short('m')
                .required(true)
                .help("Validator markup, e.g. \"required validateMinLength val-5\""),
        )
        .arg(
            clap::Arg::new("value")
                .long("value")
                .short('v')
                .default_value("")
                .allow_hyphen_values(true)
                .help("The value to validate"),
        )
        .arg(
            clap::Arg::new("caption")
                .long("caption")
                .default_value("Field")
                .help("Caption used in messages"),
        )
        .arg(
            clap::Arg::new("name")
                .long("name")
                .default_value("field")
                .help("Field name"),
        )
        .arg(
            clap::Arg::new("kind")
                .long("kind")
                .default_value("text")
                .value_parser(["text", "textarea", "select", "checkbox", "radio"])
                .help("Control kind"),
        )
        .arg(
            clap::Arg::new("checked")
                .long("checked")
                .action(clap::ArgAction::SetTrue)
                .help("Treat a checkbox as checked"),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Print the full report as JSON"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), UniformError> {
        let field = DetachedField {
            name: arg(matches, "name"),
            kind: parse_kind(arg(matches, "kind"))?,
            markup: arg(matches, "modifiers"),
            value: arg(matches, "value"),
            checked: matches.get_flag("checked"),
            caption: arg(matches, "caption"),
        };
        let report = validate_value(&field, settings)?;

        if matches.get_flag("json") {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| UniformError::SerializationError(e.to_string()))?;
            writeln!(out, "{json}")?;
        } else {
            writeln!(out, "{}", report.message.as_deref().unwrap_or("valid"))?;
        }

        match (report.failed, report.message) {
            (Some(code), Some(message)) => Err(UniformError::ValidationFailure(
                ValidationFailure::new(message, code).for_field(report.name),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (Result<(), UniformError>, String) {
        let cmd = ValidateCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("validate"))
            .try_get_matches_from(std::iter::once("validate").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let result = cmd.handle(&matches, &Settings::default(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_value() {
        let (result, out) = run(&["-m", "required validateEmail", "-v", "jane@example.com"]);
        assert!(result.is_ok());
        assert_eq!(out, "valid\n");
    }

    #[test]
    fn test_invalid_value() {
        let (result, out) = run(&[
            "--modifiers",
            "validateMinLength val-5",
            "--value",
            "abc",
            "--caption",
            "Nickname",
        ]);
        assert_eq!(out, "Nickname should be at least 5 characters long\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            UniformError::ValidationFailure(ref f) if f.code == "validateMinLength"
        ));
    }

    #[test]
    fn test_negative_number_value() {
        let (result, _) = run(&["-m", "validateInteger validateMin val-0", "-v", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_checkbox_kind() {
        let (result, out) = run(&["-m", "required", "--kind", "checkbox"]);
        assert!(result.is_err());
        assert_eq!(out, "You must select this checkbox to continue\n");

        let (result, _) = run(&["-m", "required", "--kind", "checkbox", "--checked"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_json_report() {
        let (_, out) = run(&["-m", "required validateAlpha", "-v", "r2d2", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["failed"], "validateAlpha");
        assert_eq!(json["ran"], serde_json::json!(["required", "validateAlpha"]));
    }

    #[test]
    fn test_malformed_markup() {
        let (result, out) = run(&["-m", "validateMax val-x", "-v", "1"]);
        assert!(matches!(result, Err(UniformError::MalformedModifier { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("radio").unwrap(), FieldKind::Radio);
        assert!(parse_kind("button").is_err());
    }
}

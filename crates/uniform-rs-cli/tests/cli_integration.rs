//! End-to-end tests of the `uniform-rs` command line: argument parsing,
//! settings loading and command dispatch.

use uniform_rs_cli::run;
use uniform_rs_core::{ErrorKind, UniformError};

fn invoke(args: &[&str]) -> (Result<(), UniformError>, String) {
    let mut out = Vec::new();
    let result = run(std::iter::once("uniform-rs").chain(args.iter().copied()), &mut out)
        .expect("arguments should parse");
    (result, String::from_utf8(out).unwrap())
}

// ============================================================================
// Dispatch
// ============================================================================

/// 1. A clean default configuration passes the check.
#[test]
fn test_check_default_settings() {
    let (result, out) = invoke(&["check"]);
    assert!(result.is_ok());
    assert_eq!(out, "System check identified no issues.\n");
}

/// 2. Validation failures surface as validation errors after printing the
///    message.
#[test]
fn test_validate_failure_kind() {
    let (result, out) = invoke(&["validate", "-m", "required", "--caption", "Email"]);
    assert_eq!(out, "Email is required\n");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::ValidationFailure);
}

/// 3. Messages render from the default table.
#[test]
fn test_message_render() {
    let (result, out) = invoke(&["message", "same_as", "Confirm", "Password"]);
    assert!(result.is_ok());
    assert_eq!(out, "Confirm is expected to be same as Password\n");
}

/// 4. Unknown subcommands and missing arguments are clap errors.
#[test]
fn test_argument_errors() {
    let mut out = Vec::new();
    assert!(run(["uniform-rs", "frobnicate"], &mut out).is_err());
    assert!(run(["uniform-rs", "validate"], &mut out).is_err());
    assert!(run(["uniform-rs"], &mut out).is_err());
    assert!(out.is_empty());
}

// ============================================================================
// Settings files
// ============================================================================

/// 5. A settings file with a broken option fails the check.
#[test]
fn test_check_with_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uniform.toml");
    std::fs::write(
        &path,
        r#"
        [options]
        hint_class = ""
        "#,
    )
    .unwrap();

    let (result, out) = invoke(&["check", "--settings", path.to_str().unwrap()]);
    assert!(result.is_err());
    assert!(out.contains("ERROR (options.E001): hint_class is empty"));
    assert!(out.contains("1 error(s)"));
}

/// 6. The settings' message table is used by every command.
#[test]
fn test_settings_message_table() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("es.json");
    std::fs::write(&messages, r#"{"messages": {"required": "%s es obligatorio"}}"#).unwrap();
    let settings = dir.path().join("uniform.json");
    std::fs::write(
        &settings,
        serde_json::json!({
            "language_code": "es",
            "messages": messages,
        })
        .to_string(),
    )
    .unwrap();
    let settings = settings.to_str().unwrap();

    let (_, out) = invoke(&["--settings", settings, "validate", "-m", "required", "--caption", "Nombre"]);
    assert_eq!(out, "Nombre es obligatorio\n");

    let (result, out) = invoke(&["check", "--settings", settings]);
    assert!(result.is_ok());
    assert!(out.contains("INFO (messages.I001)"));
}

/// 7. `check --messages` inspects another table.
#[test]
fn test_check_messages_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[[not toml").unwrap();

    let (result, out) = invoke(&["check", "--messages", path.to_str().unwrap()]);
    assert!(result.is_err());
    assert!(out.contains("messages.E001"));
}

/// 8. A missing settings file is an error before any command runs.
#[test]
fn test_missing_settings_file() {
    let (result, out) = invoke(&["--settings", "/nonexistent/uniform.toml", "check"]);
    assert!(result.is_err());
    assert!(out.is_empty());
}

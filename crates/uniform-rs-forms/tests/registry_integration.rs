//! Integration tests for the validator registry and detached validation.
//!
//! These go through the public API only:
//!   markup -> modifier list -> applicable validators -> report

use std::sync::Arc;
use std::thread;

use uniform_rs_core::{MessageArg, MessageTable, Options};
use uniform_rs_forms::host::FieldKind;
use uniform_rs_forms::validation::{validate_detached, DetachedField, FieldReport};
use uniform_rs_forms::{Outcome, ValidatorRegistry};

// ============================================================================
// Shared helpers
// ============================================================================

fn text<'a>(markup: &'a str, value: &'a str) -> DetachedField<'a> {
    DetachedField {
        name: "field",
        kind: FieldKind::Text,
        markup,
        value,
        checked: false,
        caption: "Nickname",
    }
}

fn check(registry: &ValidatorRegistry, field: &DetachedField<'_>) -> FieldReport {
    validate_detached(field, registry, &Options::default(), &MessageTable::english()).unwrap()
}

// ============================================================================
// Built-in validators
// ============================================================================

/// 1. Minimum length names the caption and the bound.
#[test]
fn test_min_length_message() {
    let registry = ValidatorRegistry::with_builtins();

    let report = check(&registry, &text("validateMinLength val-5", "abc"));
    let message = report.message.unwrap();
    assert!(message.contains("Nickname"));
    assert!(message.contains('5'));

    assert!(check(&registry, &text("validateMinLength val-5", "abcdef")).is_valid());
}

/// 2. Unknown markup tokens are ignored.
#[test]
fn test_unrelated_markup_ignored() {
    let registry = ValidatorRegistry::with_builtins();
    let report = check(&registry, &text("textInput large highlight", ""));
    assert!(report.is_valid());
    assert!(report.ran.is_empty());
}

/// 3. Validators run in registration order, not markup order.
#[test]
fn test_registration_order_wins() {
    let registry = ValidatorRegistry::with_builtins();
    let report = check(&registry, &text("validateEmail required", ""));
    assert_eq!(report.failed.as_deref(), Some("required"));
    assert_eq!(report.ran, vec!["required".to_string()]);
}

/// 4. A detached required checkbox reads its checked flag.
#[test]
fn test_detached_checkbox() {
    let registry = ValidatorRegistry::with_builtins();
    let mut field = text("required", "on");
    field.kind = FieldKind::Checkbox;

    assert_eq!(
        check(&registry, &field).message.as_deref(),
        Some("You must select this checkbox to continue")
    );
    field.checked = true;
    assert!(check(&registry, &field).is_valid());
}

// ============================================================================
// Custom validators
// ============================================================================

/// 5. A custom validator reads its parameter and formats through the
///    message table.
#[test]
fn test_custom_parameterized_validator() {
    let registry = ValidatorRegistry::with_builtins();
    registry.register("validateWords", |ctx| {
        let limit = ctx.modifiers().param("validateWords", 3);
        let words = i64::try_from(ctx.value().split_whitespace().count()).unwrap_or(i64::MAX);
        if words <= limit {
            Ok(Outcome::Valid)
        } else {
            ctx.fail("too_many_words", &[MessageArg::from(limit)])
        }
    });

    let mut messages = MessageTable::english();
    messages.set("too_many_words", "%s allows at most %d words");

    let field = text("validateWords val-2", "one two three");
    let report =
        validate_detached(&field, &registry, &Options::default(), &messages).unwrap();
    assert_eq!(report.failed.as_deref(), Some("validateWords"));
    assert_eq!(report.message.as_deref(), Some("Nickname allows at most 2 words"));

    let report = validate_detached(
        &text("validateWords val-2", "one two"),
        &registry,
        &Options::default(),
        &messages,
    )
    .unwrap();
    assert!(report.is_valid());
}

/// 6. Replacing a built-in changes behaviour without changing its slot.
#[test]
fn test_replace_builtin() {
    let registry = ValidatorRegistry::with_builtins();
    let before = registry.names();
    registry.register("validateAlpha", |_| Ok(Outcome::Valid));

    assert_eq!(registry.names(), before);
    assert!(check(&registry, &text("validateAlpha", "r2d2")).is_valid());
}

/// 7. A localized table changes built-in messages.
#[test]
fn test_localized_builtin_message() {
    let registry = ValidatorRegistry::with_builtins();
    let overlay = MessageTable::from_toml_str(
        "de",
        r#"
        [messages]
        email = "%s ist keine gültige E-Mail-Adresse"
        "#,
    )
    .unwrap();
    let messages = MessageTable::layered(&MessageTable::english(), &overlay);

    let report = validate_detached(
        &text("validateEmail", "nope"),
        &registry,
        &Options::default(),
        &messages,
    )
    .unwrap();
    assert_eq!(
        report.message.as_deref(),
        Some("Nickname ist keine gültige E-Mail-Adresse")
    );
}

// ============================================================================
// Sharing
// ============================================================================

/// 8. One registry serves several threads while being extended.
#[test]
fn test_shared_across_threads() {
    let registry = Arc::new(ValidatorRegistry::with_builtins());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.register(format!("validateCustom{i}"), |_| Ok(Outcome::Valid));
                let report = validate_detached(
                    &text("required validateEmail", "jane@example.com"),
                    &registry,
                    &Options::default(),
                    &MessageTable::english(),
                )
                .unwrap();
                assert!(report.is_valid());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..4 {
        assert!(registry.contains(&format!("validateCustom{i}")));
    }
}

/// 9. Reports serialize for tooling.
#[test]
fn test_report_json() {
    let registry = ValidatorRegistry::with_builtins();
    let report = check(&registry, &text("required validateInteger", "4.5"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "field");
    assert_eq!(json["failed"], "validateInteger");
    assert_eq!(json["ran"], serde_json::json!(["required", "validateInteger"]));
}

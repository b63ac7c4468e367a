//! The per-field validation pipeline.
//!
//! A field is validated by running every applicable validator from the
//! registry in registration order. The first failure short-circuits: later
//! validators do not run and the field reports exactly one message.
//!
//! Configuration errors raised by a validator (a malformed comparison
//! target, an unknown message key) abort the pipeline and propagate.

use serde::Serialize;
use tracing::trace;

use uniform_rs_core::{MessageTable, Options, UniformResult};

use crate::host::FieldKind;
use crate::modifiers::ModifierList;
use crate::registry::{Detached, FieldInput, Outcome, ValidationContext, ValidatorRegistry};

/// What happened when one field was validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// The field name.
    pub name: String,
    /// The validators that ran, in order.
    pub ran: Vec<String>,
    /// The validator that failed, if any.
    pub failed: Option<String>,
    /// The failure message, if any.
    pub message: Option<String>,
}

impl FieldReport {
    /// Returns `true` if no validator failed.
    pub const fn is_valid(&self) -> bool {
        self.failed.is_none()
    }

    /// Converts the report to an [`Outcome`].
    pub fn outcome(&self) -> Outcome {
        self.message
            .as_ref()
            .map_or(Outcome::Valid, |msg| Outcome::Invalid(msg.clone()))
    }
}

/// Runs the applicable validators for the field in `ctx`.
///
/// A field whose modifiers select no validator is valid.
pub fn run_validators(ctx: &ValidationContext<'_>) -> UniformResult<FieldReport> {
    let mut report = FieldReport {
        name: ctx.field().name.to_string(),
        ran: Vec::new(),
        failed: None,
        message: None,
    };

    for (name, validator) in ctx.registry().applicable(ctx.modifiers()) {
        let outcome = validator(ctx)?;
        trace!(field = ctx.field().name, validator = %name, valid = outcome.is_valid(), "validator ran");
        report.ran.push(name.clone());
        if let Outcome::Invalid(message) = outcome {
            report.failed = Some(name);
            report.message = Some(message);
            break;
        }
    }

    Ok(report)
}

/// A field described without a host document.
#[derive(Debug, Clone, Copy)]
pub struct DetachedField<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
    /// The validator markup (class attribute).
    pub markup: &'a str,
    pub value: &'a str,
    pub checked: bool,
    pub caption: &'a str,
}

/// Validates a single value outside any form.
///
/// Cross-field validators see no siblings, so `validateSameAs` always fails
/// and a required radio button is never satisfied.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::{MessageTable, Options};
/// use uniform_rs_forms::host::FieldKind;
/// use uniform_rs_forms::registry::ValidatorRegistry;
/// use uniform_rs_forms::validation::{validate_detached, DetachedField};
///
/// let field = DetachedField {
///     name: "email",
///     kind: FieldKind::Text,
///     markup: "required validateEmail",
///     value: "not-an-address",
///     checked: false,
///     caption: "Email",
/// };
/// let report = validate_detached(
///     &field,
///     &ValidatorRegistry::with_builtins(),
///     &Options::default(),
///     &MessageTable::english(),
/// )
/// .unwrap();
/// assert_eq!(report.failed.as_deref(), Some("validateEmail"));
/// assert_eq!(report.message.as_deref(), Some("Email is not a valid email address"));
/// ```
pub fn validate_detached(
    field: &DetachedField<'_>,
    registry: &ValidatorRegistry,
    options: &Options,
    messages: &MessageTable,
) -> UniformResult<FieldReport> {
    let modifiers = ModifierList::parse(field.markup)?;
    let input = FieldInput {
        name: field.name,
        kind: field.kind,
        value: field.value,
        checked: field.checked,
        modifiers: &modifiers,
    };
    let ctx = ValidationContext::new(input, field.caption, options, messages, registry, &Detached);
    run_validators(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uniform_rs_core::UniformError;

    fn detached<'a>(markup: &'a str, value: &'a str) -> DetachedField<'a> {
        DetachedField {
            name: "f",
            kind: FieldKind::Text,
            markup,
            value,
            checked: false,
            caption: "F",
        }
    }

    fn validate(registry: &ValidatorRegistry, markup: &str, value: &str) -> UniformResult<FieldReport> {
        validate_detached(
            &detached(markup, value),
            registry,
            &Options::default(),
            &MessageTable::english(),
        )
    }

    #[test]
    fn test_no_applicable_validators_is_valid() {
        let registry = ValidatorRegistry::with_builtins();
        let report = validate(&registry, "textInput large", "anything").unwrap();
        assert!(report.is_valid());
        assert!(report.ran.is_empty());
        assert_eq!(report.outcome(), Outcome::Valid);
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let registry = ValidatorRegistry::with_builtins();
        let report = validate(&registry, "validateEmail required", "").unwrap();
        assert_eq!(report.ran, vec!["required"]);
        assert_eq!(report.failed.as_deref(), Some("required"));
        assert_eq!(report.outcome(), Outcome::invalid("F is required"));
    }

    #[test]
    fn test_runs_all_when_passing() {
        let registry = ValidatorRegistry::with_builtins();
        let report = validate(&registry, "required validateMaxLength val-5 validateInteger", "123").unwrap();
        assert!(report.is_valid());
        assert_eq!(report.ran, vec!["required", "validateMaxLength", "validateInteger"]);
    }

    #[test]
    fn test_later_validators_not_invoked() {
        let registry = ValidatorRegistry::with_builtins();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register("validateCounted", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Valid)
        });

        validate(&registry, "required validateCounted", "").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        validate(&registry, "required validateCounted", "x").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_configuration_error_propagates() {
        let registry = ValidatorRegistry::with_builtins();
        let err = validate(&registry, "validateSameAs", "x").unwrap_err();
        assert!(matches!(err, UniformError::MissingTargetField { .. }));
    }

    #[test]
    fn test_malformed_markup_propagates() {
        let registry = ValidatorRegistry::with_builtins();
        let err = validate(&registry, "validateMin val-x", "1").unwrap_err();
        assert!(matches!(err, UniformError::MalformedModifier { .. }));
    }

    #[test]
    fn test_report_serializes() {
        let registry = ValidatorRegistry::with_builtins();
        let report = validate(&registry, "validateInteger", "1.5").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failed"], "validateInteger");
        assert_eq!(json["message"], "F needs to be a whole number");
    }
}

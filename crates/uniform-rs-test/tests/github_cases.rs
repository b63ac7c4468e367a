//! Regression tests for reported issues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uniform_rs_core::OptionOverrides;
use uniform_rs_forms::host::{FieldId, FormHost, Target};
use uniform_rs_forms::{FormConfig, FormController};
use uniform_rs_test::{FieldFixture, MemoryForm, SignupForm};

fn guarded(id: &str) -> FormConfig {
    FormConfig::new(id).with_overrides(&OptionOverrides {
        prevent_submit: Some(true),
        ..OptionOverrides::default()
    })
}

/// Builds a guarded config whose prevent-submit callback records whether
/// the holder of `watched` carried the error class when it ran.
fn recording(id: &str, watched: FieldId, flag: &Arc<AtomicBool>) -> FormConfig {
    let flag = Arc::clone(flag);
    guarded(id).on_prevent_submit(move |host, _title, _items| {
        flag.store(host.has_class(Target::Holder(watched), "error"), Ordering::SeqCst);
        false
    })
}

// ============================================================================
// Submission
// ============================================================================

/// Case 1: prefilled invalid data blocks a submit that was never preceded
/// by a blur.
#[test]
fn test_prefilled_invalid_data_blocks_submit() {
    let mut host = MemoryForm::new();
    host.add(
        FieldFixture::text("email")
            .markup("textInput required validateEmail")
            .label("Email")
            .value("invalid@example"),
    );
    let mut form = FormController::attach(&mut host, guarded("issue1")).unwrap();

    assert!(!form.on_submit(&mut host).unwrap());
    assert!(host.form_has("failedSubmit"));
    assert_eq!(form.error("email"), Some("Email is not a valid email address"));
}

/// Case 3: prompt text never reaches the submitted data.
#[test]
fn test_prompt_is_not_submitted() {
    let mut host = MemoryForm::new();
    let name = host.add(FieldFixture::text("name").prompt("Sample data"));
    let mut form = FormController::attach(&mut host, FormConfig::new("issue3")).unwrap();
    assert_eq!(host.value(name), "Sample data");

    assert!(form.on_submit(&mut host).unwrap());
    assert_eq!(host.value(name), "");
    assert_eq!(host.form_data(), vec![("name".to_string(), String::new())]);
}

/// Case 17: control names containing periods are ordinary names.
#[test]
fn test_names_with_periods() {
    let mut host = MemoryForm::new();
    let holder = host.add_holder("Gender *", None);
    host.add(
        FieldFixture::radio("demographicInfo.gender", "f")
            .markup("required")
            .in_holder(holder),
    );
    host.add(
        FieldFixture::radio("demographicInfo.gender", "m")
            .markup("required")
            .in_holder(holder),
    );
    let mut form = FormController::attach(&mut host, guarded("issue17")).unwrap();

    assert!(!form.on_submit(&mut host).unwrap());
    assert!(host.form_has("failedSubmit"));
    assert_eq!(form.error("demographicInfo.gender"), Some("Please make a selection"));
    assert_eq!(form.outstanding_errors().len(), 1);
}

// ============================================================================
// Required groups
// ============================================================================

/// Case 2: a required radio group is checked as a group.
#[test]
fn test_required_radio_group() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut s = SignupForm::new();
    let config = recording("issue2", s.color_red, &flag);
    let mut form = FormController::attach(&mut s.form, config).unwrap();

    assert!(!form.on_submit(&mut s.form).unwrap());
    assert!(flag.load(Ordering::SeqCst));

    s.form.check(s.color_red);
    assert!(!form.on_submit(&mut s.form).unwrap());
    assert!(!flag.load(Ordering::SeqCst));
    assert_eq!(form.error("color"), None);
}

/// Case 4: a required checkbox.
#[test]
fn test_required_checkbox() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut s = SignupForm::new();
    let config = recording("issue4", s.terms, &flag);
    let mut form = FormController::attach(&mut s.form, config).unwrap();

    assert!(!form.on_submit(&mut s.form).unwrap());
    assert!(flag.load(Ordering::SeqCst));
    assert_eq!(
        form.error("terms"),
        Some("You must select this checkbox to continue")
    );

    s.form.check(s.terms);
    assert!(!form.on_submit(&mut s.form).unwrap());
    assert!(!flag.load(Ordering::SeqCst));
    assert_eq!(form.error("terms"), None);
}

// ============================================================================
// Prompts
// ============================================================================

/// Case 9: the autofocus control starts focused with its prompt cleared.
#[test]
fn test_autofocus_clears_prompt() {
    let mut host = MemoryForm::new();
    let name = host.add(
        FieldFixture::text("name")
            .prompt("Sample data in case there is none")
            .autofocus(),
    );
    let form = FormController::attach(&mut host, FormConfig::new("issue9")).unwrap();

    assert!(host.holder_has(name, "focused"));
    assert_eq!(host.value(name), "");
    assert_eq!(form.focused(), Some(name));
}

/// Case 15: prompts with periods survive intact.
#[test]
fn test_prompt_with_period() {
    let mut host = MemoryForm::new();
    let amount = host.add(FieldFixture::text("amount").prompt("100.000"));
    FormController::attach(&mut host, FormConfig::new("issue15")).unwrap();
    assert_eq!(host.value(amount), "100.000");
}

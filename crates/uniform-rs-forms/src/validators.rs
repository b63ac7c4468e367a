//! Built-in validators.
//!
//! Each validator reads the effective field value (empty while a prompt is
//! shown) and returns [`Outcome::Valid`] or a formatted failure message. The
//! pattern validators match ASCII-only character classes and use search
//! semantics, so a pattern without anchors may match anywhere in the value.
//!
//! Registration order is the run order, and a field stops at its first
//! failure, so `required` always reports before the format checks.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::warn;

use uniform_rs_core::i18n::keys;
use uniform_rs_core::utils::text::parse_leading_int;
use uniform_rs_core::{MessageArg, UniformError, UniformResult};

use crate::host::FieldKind;
use crate::registry::{Outcome, ValidationContext, ValidatorRegistry};

// ── Patterns ────────────────────────────────────────────────────────

/// Email pattern (case-insensitive).
pub const EMAIL_PATTERN: &str = r"^([a-zA-Z0-9_.\-+])+@(([a-zA-Z0-9\-])+\.)+([a-zA-Z0-9]{2,4})+$";

/// URL pattern (case-insensitive, anchored at the start only).
pub const URL_PATTERN: &str = r"^(http|https|ftp):\/\/(([A-Z0-9][A-Z0-9_\-]*)(\.[A-Z0-9][A-Z0-9_\-]*)+)(:(\d+))?\/?";

/// Decimal number pattern.
pub const NUMBER_PATTERN: &str = r"(^-?\d\d*\.\d*$)|(^-?\d\d*$)|(^-?\.\d\d*$)";

/// Whole number pattern.
pub const INTEGER_PATTERN: &str = r"(^-?\d\d*$)";

/// Letters only.
pub const ALPHA_PATTERN: &str = r"^[a-zA-Z]+$";

/// Any character outside `[0-9A-Za-z_]`.
pub const NON_WORD_PATTERN: &str = r"[^0-9A-Za-z_]";

/// Phrase pattern (case-insensitive).
pub const PHRASE_PATTERN: &str = r"^[\w\d.\-_()*'# :,]+$";

/// Phone pattern.
pub const PHONE_PATTERN: &str = r"^\(?(\d{3})\)?[\- ]?(\d{3})[\- ]?(\d{4})$";

/// Date pattern, `mm/dd/yy` or `mm/dd/yyyy` (anchored at the end only).
pub const DATE_PATTERN: &str = r"([0]?[1-9]|[1][0-2])/([0]?[1-9]|[1|2][0-9]|[3][0|1])/([0-9]{4}|[0-9]{2})$";

fn compile(pattern: &str, case_insensitive: bool) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .unicode(false)
        .build()
        .unwrap()
}

static EMAIL: Lazy<Regex> = Lazy::new(|| compile(EMAIL_PATTERN, true));
static URL: Lazy<Regex> = Lazy::new(|| compile(URL_PATTERN, true));
static NUMBER: Lazy<Regex> = Lazy::new(|| compile(NUMBER_PATTERN, false));
static INTEGER: Lazy<Regex> = Lazy::new(|| compile(INTEGER_PATTERN, false));
static ALPHA: Lazy<Regex> = Lazy::new(|| compile(ALPHA_PATTERN, false));
// Negated class: compiled in Unicode mode so it matches whole characters.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(NON_WORD_PATTERN).unwrap());
static PHRASE: Lazy<Regex> = Lazy::new(|| compile(PHRASE_PATTERN, true));
static PHONE: Lazy<Regex> = Lazy::new(|| compile(PHONE_PATTERN, false));
static DATE: Lazy<Regex> = Lazy::new(|| compile(DATE_PATTERN, false));

// ── Registration ────────────────────────────────────────────────────

/// Registers the built-in validators in their canonical run order.
pub fn register_builtins(registry: &ValidatorRegistry) {
    registry.register("required", required);
    registry.register("validateMinLength", min_length);
    registry.register("validateMin", min);
    registry.register("validateMaxLength", max_length);
    registry.register("validateMax", max);
    registry.register("validateSameAs", same_as);
    registry.register("validateEmail", email);
    registry.register("validateUrl", url);
    registry.register("validateNumber", number);
    registry.register("validateInteger", integer);
    registry.register("validateAlpha", alpha);
    registry.register("validateAlphaNum", alphanum);
    registry.register("validatePhrase", phrase);
    registry.register("validatePhone", phone);
    registry.register("validateDate", date);
    registry.register("validateCallback", callback);
}

fn check(ok: bool, ctx: &ValidationContext<'_>, key: &str) -> UniformResult<Outcome> {
    if ok {
        Ok(Outcome::Valid)
    } else {
        ctx.fail(key, &[])
    }
}

// ── Presence ────────────────────────────────────────────────────────

/// Fails on an empty value, an unchecked checkbox, or a radio group with no
/// checked member.
pub fn required(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    match ctx.field().kind {
        FieldKind::Radio => check(ctx.group_checked(), ctx, keys::REQ_RADIO),
        FieldKind::Checkbox => check(ctx.field().checked, ctx, keys::REQ_CHECKBOX),
        _ => check(!ctx.value().trim().is_empty(), ctx, keys::REQUIRED),
    }
}

// ── Length and range ────────────────────────────────────────────────

fn char_len(value: &str) -> i64 {
    i64::try_from(value.chars().count()).unwrap_or(i64::MAX)
}

/// Fails if the value is shorter than `val-N` characters (when `N > 0`).
pub fn min_length(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let limit = ctx.modifiers().param("validateMinLength", 0);
    if limit > 0 && char_len(ctx.value()) < limit {
        return ctx.fail(keys::MIN_LENGTH, &[MessageArg::Int(limit)]);
    }
    Ok(Outcome::Valid)
}

/// Fails if the value is longer than `val-N` characters (when `N > 0`).
pub fn max_length(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let limit = ctx.modifiers().param("validateMaxLength", 0);
    if limit > 0 && char_len(ctx.value()) > limit {
        return ctx.fail(keys::MAX_LENGTH, &[MessageArg::Int(limit)]);
    }
    Ok(Outcome::Valid)
}

/// Fails if the leading integer of the value is below `val-N`.
///
/// A value without a leading integer passes.
pub fn min(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let limit = ctx.modifiers().param("validateMin", 0);
    match parse_leading_int(ctx.value()) {
        Some(value) if value < limit => ctx.fail(keys::MIN, &[MessageArg::Int(limit)]),
        _ => Ok(Outcome::Valid),
    }
}

/// Fails if the leading integer of the value is above `val-N`.
///
/// A value without a leading integer passes.
pub fn max(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let limit = ctx.modifiers().param("validateMax", 0);
    match parse_leading_int(ctx.value()) {
        Some(value) if value > limit => ctx.fail(keys::MAX, &[MessageArg::Int(limit)]),
        _ => Ok(Outcome::Valid),
    }
}

// ── Cross-field ─────────────────────────────────────────────────────

/// Fails unless the value equals the value of the field named by the token
/// after `validateSameAs`.
pub fn same_as(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let target = ctx
        .modifiers()
        .argument("validateSameAs")
        .ok_or_else(|| UniformError::MissingTargetField {
            field: ctx.field().name.to_string(),
            target: "validateSameAs".to_string(),
        })?;

    let Some(sibling) = ctx.sibling(target) else {
        warn!(field = ctx.field().name, target_field = target, "same-as target field not found");
        return ctx.fail(keys::SAME_AS, &[MessageArg::from(target)]);
    };

    if sibling.value == ctx.value() {
        Ok(Outcome::Valid)
    } else {
        ctx.fail(keys::SAME_AS, &[MessageArg::from(sibling.caption)])
    }
}

/// Runs the named callback given by the token after `validateCallback`.
pub fn callback(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let name = ctx.modifiers().argument("validateCallback").unwrap_or_default();
    match ctx.registry().callback(name) {
        Some(f) => Ok(f(ctx)),
        None => {
            warn!(field = ctx.field().name, callback = name, "callback validator is not registered");
            ctx.fail(keys::CALLBACK, &[MessageArg::from(name)])
        }
    }
}

// ── Formats ─────────────────────────────────────────────────────────

pub fn email(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(EMAIL.is_match(ctx.value()), ctx, keys::EMAIL)
}

pub fn url(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(URL.is_match(ctx.value()), ctx, keys::URL)
}

/// Empty passes.
pub fn number(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let value = ctx.value();
    check(value.is_empty() || NUMBER.is_match(value), ctx, keys::NUMBER)
}

/// Empty passes.
pub fn integer(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let value = ctx.value();
    check(value.is_empty() || INTEGER.is_match(value), ctx, keys::INTEGER)
}

pub fn alpha(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(ALPHA.is_match(ctx.value()), ctx, keys::ALPHA)
}

/// Fails if any non-word character is present. Empty passes.
pub fn alphanum(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(!NON_WORD.is_match(ctx.value()), ctx, keys::ALPHANUM)
}

/// Empty passes.
pub fn phrase(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    let value = ctx.value();
    check(value.is_empty() || PHRASE.is_match(value), ctx, keys::PHRASE)
}

pub fn phone(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(PHONE.is_match(ctx.value()), ctx, keys::PHONE)
}

pub fn date(ctx: &ValidationContext<'_>) -> UniformResult<Outcome> {
    check(DATE.is_match(ctx.value()), ctx, keys::DATE)
}

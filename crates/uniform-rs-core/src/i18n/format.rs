//! Positional `%d` / `%s` template formatting.
//!
//! A template is split on `%`. Every piece that starts with `d` or `s` is a
//! placeholder followed by literal text up to the next `%`; the nth
//! placeholder consumes the nth argument. `%d` renders an integer (floats are
//! truncated, strings are parsed for a leading integer), `%s` inserts the
//! argument as text. A [`MessageArg::None`] argument, or a missing one,
//! suppresses the substitution but keeps the trailing literal text. A `%`
//! followed by anything else is emitted verbatim.

use std::fmt;

use crate::utils::text::parse_leading_int;

/// One substitution argument.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    /// An integer.
    Int(i64),
    /// A floating-point number; truncated by `%d`.
    Float(f64),
    /// A string; parsed for a leading integer by `%d`.
    Str(String),
    /// The "no value" sentinel. The placeholder is skipped.
    None,
}

impl MessageArg {
    fn render_int(&self) -> Option<String> {
        match self {
            Self::Int(i) => Some(i.to_string()),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.is_finite() => Some((f.trunc() as i64).to_string()),
            Self::Float(_) => Some("NaN".to_string()),
            Self::Str(s) => Some(parse_leading_int(s).map_or_else(|| "NaN".to_string(), |i| i.to_string())),
            Self::None => None,
        }
    }

    fn render_str(&self) -> Option<String> {
        match self {
            Self::None => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::None => Ok(()),
        }
    }
}

impl From<&str> for MessageArg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for MessageArg {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for MessageArg {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for MessageArg {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for MessageArg {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<Self>> From<Option<T>> for MessageArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Formats a template with positional arguments.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::i18n::{format_template, MessageArg};
///
/// let out = format_template(
///     "%s should be at least %d characters long",
///     &["Name".into(), MessageArg::Int(5)],
/// );
/// assert_eq!(out, "Name should be at least 5 characters long");
///
/// // The sentinel keeps the literal text but drops the value.
/// let out = format_template("%s is required", &[MessageArg::None]);
/// assert_eq!(out, " is required");
/// ```
pub fn format_template(template: &str, args: &[MessageArg]) -> String {
    let mut pieces = template.split('%');
    let mut out = pieces.next().unwrap_or_default().to_string();
    let mut position = 0;

    for piece in pieces {
        let mut chars = piece.chars();
        let tag = chars.next();
        let rest = chars.as_str();

        let rendered = match tag {
            Some('d') => args.get(position).and_then(MessageArg::render_int),
            Some('s') => args.get(position).and_then(MessageArg::render_str),
            _ => {
                out.push('%');
                out.push_str(piece);
                continue;
            }
        };
        position += 1;

        if let Some(value) = rendered {
            out.push_str(&value);
        }
        out.push_str(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert_eq!(format_template("Thank you.", &[]), "Thank you.");
    }

    #[test]
    fn test_two_strings() {
        let out = format_template(
            "%s is expected to be same as %s",
            &["Confirm".into(), "Password".into()],
        );
        assert_eq!(out, "Confirm is expected to be same as Password");
    }

    #[test]
    fn test_int_truncates_float() {
        assert_eq!(format_template("%d", &[MessageArg::Float(4.9)]), "4");
        assert_eq!(format_template("%d", &[MessageArg::Float(-4.9)]), "-4");
    }

    #[test]
    fn test_int_from_string() {
        assert_eq!(format_template("%d items", &["12abc".into()]), "12 items");
        assert_eq!(format_template("%d items", &["abc".into()]), "NaN items");
    }

    #[test]
    fn test_string_from_int() {
        assert_eq!(format_template("[%s]", &[MessageArg::Int(3)]), "[3]");
    }

    #[test]
    fn test_sentinel_skips_substitution_only() {
        let out = format_template(
            "Failed to validate %s field. Validator function (%s) is not defined!",
            &[MessageArg::None, "zip_check".into()],
        );
        assert_eq!(
            out,
            "Failed to validate  field. Validator function (zip_check) is not defined!"
        );
    }

    #[test]
    fn test_missing_argument_behaves_like_sentinel() {
        assert_eq!(format_template("%s and %s", &["a".into()]), "a and ");
    }

    #[test]
    fn test_unknown_tag_is_literal() {
        assert_eq!(format_template("100% sure, %s", &["Bob".into()]), "100% sure, Bob");
        assert_eq!(format_template("50%", &[]), "50%");
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<&str> = None;
        assert_eq!(MessageArg::from(none), MessageArg::None);
        assert_eq!(MessageArg::from(Some(7)), MessageArg::Int(7));
    }
}

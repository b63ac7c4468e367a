//! Validator modifier parsing.
//!
//! A field's class attribute doubles as its validation markup: every
//! whitespace-separated token names a validator (or is an ordinary CSS
//! class, which is simply never matched). A `val-N` token carries the
//! integer parameter of the token directly before it, and validators that
//! need a field name or function name read the token that follows their
//! marker:
//!
//! ```text
//! required validateMinLength val-8 validateSameAs password
//! ```
//!
//! The list is parsed once when a field is attached; the token order is kept
//! so argument lookups stay positional.

use std::fmt;
use std::str::FromStr;

use uniform_rs_core::{UniformError, UniformResult};

/// Prefix of a parameter token.
pub const PARAM_PREFIX: &str = "val-";

/// One parsed token of a modifier list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// The token text.
    pub name: String,
    /// The integer carried by a directly following `val-N` token.
    pub param: Option<i64>,
}

impl Modifier {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            param: None,
        }
    }
}

/// The ordered list of modifiers declared on a field.
///
/// # Examples
///
/// ```
/// use uniform_rs_forms::modifiers::ModifierList;
///
/// let mods = ModifierList::parse("textInput required validateMinLength val-8").unwrap();
/// assert!(mods.contains("required"));
/// assert_eq!(mods.param("validateMinLength", 0), 8);
/// assert_eq!(mods.param("validateMaxLength", 0), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierList {
    tokens: Vec<Modifier>,
}

impl ModifierList {
    /// Parses a whitespace-separated token string.
    ///
    /// Fails with [`UniformError::MalformedModifier`] when a `val-` token has a
    /// non-integer suffix or does not directly follow a marker token.
    pub fn parse(markup: &str) -> UniformResult<Self> {
        let mut tokens: Vec<Modifier> = Vec::new();

        for token in markup.split_whitespace() {
            let Some(raw) = token.strip_prefix(PARAM_PREFIX) else {
                tokens.push(Modifier::new(token));
                continue;
            };

            let value = raw
                .parse::<i64>()
                .map_err(|_| UniformError::MalformedModifier {
                    token: token.to_string(),
                    reason: "expected an integer after 'val-'".to_string(),
                })?;

            match tokens.last_mut() {
                Some(previous) if previous.param.is_none() => previous.param = Some(value),
                _ => {
                    return Err(UniformError::MalformedModifier {
                        token: token.to_string(),
                        reason: "parameter does not follow a marker token".to_string(),
                    })
                }
            }
        }

        Ok(Self { tokens })
    }

    /// Returns `true` if a token with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.tokens.iter().any(|m| m.name == name)
    }

    /// Returns the parameter attached to the first occurrence of `name` that
    /// carries one, or `default`.
    pub fn param(&self, name: &str, default: i64) -> i64 {
        self.tokens
            .iter()
            .filter(|m| m.name == name)
            .find_map(|m| m.param)
            .unwrap_or(default)
    }

    /// Returns the token following the first occurrence of `name`.
    pub fn argument(&self, name: &str) -> Option<&str> {
        let index = self.tokens.iter().position(|m| m.name == name)?;
        self.tokens.get(index + 1).map(|m| m.name.as_str())
    }

    /// Iterates over the parsed tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.tokens.iter()
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens were declared.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromStr for ModifierList {
    type Err = UniformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&m.name)?;
            if let Some(param) = m.param {
                write!(f, " {PARAM_PREFIX}{param}")?;
            }
        }
        Ok(())
    }
}

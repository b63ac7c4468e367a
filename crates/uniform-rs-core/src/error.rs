//! Core error types for uniform-rs.
//!
//! Validation problems with a field's *value* are never errors in the Rust
//! sense: validators report them as failure outcomes that end up in a form's
//! error map. [`UniformError`] is reserved for problems with the *markup* or
//! configuration (unknown message keys, malformed modifier tokens, missing
//! comparison targets), which abort the current validation pass.

use std::fmt;

use thiserror::Error;

/// A single failed validation, as surfaced to the user.
///
/// # Examples
///
/// ```
/// use uniform_rs_core::error::ValidationFailure;
///
/// let failure = ValidationFailure::new("Email is required", "required").for_field("email");
/// assert_eq!(failure.to_string(), "Email is required");
/// assert_eq!(failure.field.as_deref(), Some("email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The formatted, user-facing message.
    pub message: String,
    /// The message template key that produced the failure (e.g. "required", "email").
    pub code: String,
    /// The `name` of the field that failed, when known.
    pub field: Option<String>,
}

impl ValidationFailure {
    /// Creates a new `ValidationFailure` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            field: None,
        }
    }

    /// Attaches the failing field's name.
    #[must_use]
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// The three user-visible error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value did not satisfy a validator. Non-fatal.
    ValidationFailure,
    /// The markup or configuration is wrong. Fails fast.
    ConfigurationError,
    /// A named callback or comparison target could not be found.
    CallbackMissing,
}

/// The primary error type for uniform-rs.
#[derive(Error, Debug)]
pub enum UniformError {
    // ── Validation ───────────────────────────────────────────────────

    /// A field value failed validation.
    #[error("Validation failure: {0}")]
    ValidationFailure(ValidationFailure),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A message template was requested that the active table does not define.
    #[error("Configuration error: unknown message key '{0}'")]
    UnknownMessageKey(String),

    /// A field's modifier token list could not be parsed.
    #[error("Configuration error: malformed modifier token '{token}': {reason}")]
    MalformedModifier {
        /// The offending token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A comparison validator was declared without a target field name.
    #[error("Configuration error: field '{field}' declares {target} without a target")]
    MissingTargetField {
        /// The field carrying the validator.
        field: String,
        /// The validator that needed a target.
        target: String,
    },

    // ── Lookup ───────────────────────────────────────────────────────

    /// A named callback validator is not registered.
    #[error("Callback not defined: {0}")]
    CallbackMissing(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred while (de)serializing settings or message tables.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl UniformError {
    /// Classifies this error into one of the user-visible categories.
    ///
    /// Serialization and IO problems only occur while loading configuration,
    /// so they are reported as configuration errors.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailure(_) => ErrorKind::ValidationFailure,
            Self::CallbackMissing(_) => ErrorKind::CallbackMissing,
            Self::ConfigurationError(_)
            | Self::UnknownMessageKey(_)
            | Self::MalformedModifier { .. }
            | Self::MissingTargetField { .. }
            | Self::SerializationError(_)
            | Self::IoError(_) => ErrorKind::ConfigurationError,
        }
    }
}

impl From<ValidationFailure> for UniformError {
    fn from(failure: ValidationFailure) -> Self {
        Self::ValidationFailure(failure)
    }
}

/// A convenience type alias for `Result<T, UniformError>`.
pub type UniformResult<T> = Result<T, UniformError>;

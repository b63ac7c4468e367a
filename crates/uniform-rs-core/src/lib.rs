//! # uniform-rs-core
//!
//! Core types for uniform-rs. This crate has no dependency on the form
//! controllers and provides the foundation the other crates build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Per-form [`Options`] and process-level [`Settings`]
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`i18n`] - The message formatter and message tables
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{ErrorKind, UniformError, UniformResult, ValidationFailure};
pub use i18n::{MessageArg, MessageTable};
pub use settings::{OptionOverrides, Options, Settings};

//! # uniform-rs
//!
//! Headless form enhancement for Uni-Form style markup: placeholder prompts,
//! focus highlighting, per-field validation driven by class tokens, and
//! submit and leave gating.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `uniform-rs` for everything, or on individual crates for finer-grained
//! control.
//!
//! ```
//! use uniform_rs::forms::validation::{validate_detached, DetachedField};
//! use uniform_rs::forms::{FieldKind, ValidatorRegistry};
//! use uniform_rs::{MessageTable, Options};
//!
//! let field = DetachedField {
//!     name: "age",
//!     kind: FieldKind::Text,
//!     markup: "validateInteger validateMin val-18",
//!     value: "16",
//!     checked: false,
//!     caption: "Age",
//! };
//! let report = validate_detached(
//!     &field,
//!     &ValidatorRegistry::with_builtins(),
//!     &Options::default(),
//!     &MessageTable::english(),
//! )
//! .unwrap();
//! assert_eq!(report.message.as_deref(), Some("Age should be greater than or equal to 18"));
//! ```

/// Errors, settings, message tables, and logging.
pub use uniform_rs_core as core;

pub use uniform_rs_core::{
    MessageArg, MessageTable, OptionOverrides, Options, Settings, UniformError, UniformResult,
};

/// Field and form controllers, the validator registry, and the host interface.
#[cfg(feature = "forms")]
pub use uniform_rs_forms as forms;

/// The management CLI.
#[cfg(feature = "cli")]
pub use uniform_rs_cli as cli;

/// In-memory host document and fixtures for tests.
#[cfg(feature = "testing")]
pub use uniform_rs_test as test;

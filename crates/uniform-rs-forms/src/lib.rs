//! # uniform-rs-forms
//!
//! Client-side form validation for uniform-rs. Attaches to a form through the
//! [`FormHost`] abstraction, validates fields on blur against the validators
//! named in their markup, shows prompts in empty fields, gates submission,
//! and guards against leaving a form with unsaved changes.
//!
//! ## Modules
//!
//! - [`modifiers`] - Parsing of the validator markup on a field
//! - [`registry`] - The named validator registry and validation context
//! - [`validators`] - The built-in validators
//! - [`validation`] - The short-circuiting per-field pipeline
//! - [`host`] - The host document abstraction
//! - [`field`] - Per-field state and visual transitions
//! - [`form`] - The form controller
//! - [`banner`] - Error and success banners
//! - [`serialize`] - Form data encoding for the leave guard

pub mod banner;
pub mod field;
pub mod form;
pub mod host;
pub mod modifiers;
pub mod registry;
pub mod serialize;
pub mod validation;
pub mod validators;

pub use field::{FieldController, FieldState, HintStash};
pub use form::{Callbacks, FormConfig, FormController, LeaveDecision};
pub use host::{BannerKind, FieldId, FieldKind, FormHost, Target};
pub use modifiers::ModifierList;
pub use registry::{Outcome, ValidationContext, ValidatorRegistry};
pub use validation::{validate_detached, DetachedField, FieldReport};

//! # uniform-rs-test
//!
//! Testing support for uniform-rs. Provides an in-memory host document that
//! implements [`FormHost`](uniform_rs_forms::host::FormHost), ready-made
//! fixture forms, and scoped settings overrides.
//!
//! ## Modules
//!
//! - [`memory_form`] - [`MemoryForm`] and its [`FieldFixture`] builder
//! - [`fixtures`] - Prebuilt forms such as [`SignupForm`]
//! - [`override_settings`] - Thread-local settings overrides

pub mod fixtures;
pub mod memory_form;
pub mod override_settings;

pub use fixtures::SignupForm;
pub use memory_form::{FieldFixture, HolderId, MemoryForm};
pub use override_settings::{get_settings, override_settings, SettingsOverride};

//! The validator registry.
//!
//! Validators are named functions from a [`ValidationContext`] to an
//! [`Outcome`]. A field runs every registered validator whose name appears in
//! its modifier list, in registration order. The built-in set is registered
//! by [`ValidatorRegistry::with_builtins`]; applications add their own with
//! [`ValidatorRegistry::register`] and add named callbacks (referenced from
//! markup as `validateCallback <name>`) with
//! [`ValidatorRegistry::register_callback`].
//!
//! A registry is shared between forms behind an `Arc`; registration takes
//! `&self` so it can happen after forms have been attached.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use uniform_rs_forms::registry::{Outcome, ValidatorRegistry};
//!
//! let registry = Arc::new(ValidatorRegistry::with_builtins());
//! registry.register("validateZip", |ctx| {
//!     if ctx.value().len() == 5 {
//!         Ok(Outcome::Valid)
//!     } else {
//!         Ok(Outcome::invalid(format!("{} must have five digits", ctx.caption())))
//!     }
//! });
//! assert!(registry.contains("validateZip"));
//! assert_eq!(registry.names().first().map(String::as_str), Some("required"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uniform_rs_core::{MessageArg, MessageTable, Options, UniformResult};

use crate::host::FieldKind;
use crate::modifiers::ModifierList;

/// The result of running one validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value passed.
    Valid,
    /// The value failed, with the message to show.
    Invalid(String),
}

impl Outcome {
    /// Shorthand for [`Outcome::Invalid`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns `true` for [`Outcome::Valid`].
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }
}

/// The type signature of a registered validator.
pub type ValidatorFn =
    Arc<dyn Fn(&ValidationContext<'_>) -> UniformResult<Outcome> + Send + Sync>;

/// The type signature of a named callback validator.
pub type CallbackFn = Arc<dyn Fn(&ValidationContext<'_>) -> Outcome + Send + Sync>;

/// Another control of the same form, as seen by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    /// The effective value (empty while the control shows its prompt).
    pub value: String,
    /// The cleaned label caption.
    pub caption: String,
}

/// Read-only lookups into the rest of the form.
pub trait SiblingLookup {
    /// Returns the first control named `name`.
    fn sibling(&self, name: &str) -> Option<Sibling>;

    /// Returns `true` if any control named `name` is checked.
    fn group_checked(&self, name: &str) -> bool;
}

/// A [`SiblingLookup`] for a field validated on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl SiblingLookup for Detached {
    fn sibling(&self, _name: &str) -> Option<Sibling> {
        None
    }

    fn group_checked(&self, _name: &str) -> bool {
        false
    }
}

/// The attributes of the field under validation.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
    /// The effective value: empty while the prompt is shown.
    pub value: &'a str,
    pub checked: bool,
    pub modifiers: &'a ModifierList,
}

/// Everything a validator may look at.
pub struct ValidationContext<'a> {
    field: FieldInput<'a>,
    caption: &'a str,
    options: &'a Options,
    messages: &'a MessageTable,
    registry: &'a ValidatorRegistry,
    siblings: &'a dyn SiblingLookup,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context.
    pub fn new(
        field: FieldInput<'a>,
        caption: &'a str,
        options: &'a Options,
        messages: &'a MessageTable,
        registry: &'a ValidatorRegistry,
        siblings: &'a dyn SiblingLookup,
    ) -> Self {
        Self {
            field,
            caption,
            options,
            messages,
            registry,
            siblings,
        }
    }

    pub const fn field(&self) -> &FieldInput<'a> {
        &self.field
    }

    pub const fn value(&self) -> &'a str {
        self.field.value
    }

    pub const fn caption(&self) -> &'a str {
        self.caption
    }

    pub const fn modifiers(&self) -> &'a ModifierList {
        self.field.modifiers
    }

    pub const fn options(&self) -> &'a Options {
        self.options
    }

    pub const fn messages(&self) -> &'a MessageTable {
        self.messages
    }

    pub const fn registry(&self) -> &'a ValidatorRegistry {
        self.registry
    }

    /// See [`SiblingLookup::sibling`].
    pub fn sibling(&self, name: &str) -> Option<Sibling> {
        self.siblings.sibling(name)
    }

    /// See [`SiblingLookup::group_checked`].
    pub fn group_checked(&self) -> bool {
        self.siblings.group_checked(self.field.name)
    }

    /// Formats a message with the field caption as the first argument.
    pub fn message(&self, key: &str, extra: &[MessageArg]) -> UniformResult<String> {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(MessageArg::from(self.caption));
        args.extend_from_slice(extra);
        self.messages.format(key, &args)
    }

    /// Formats a message and wraps it in [`Outcome::Invalid`].
    pub fn fail(&self, key: &str, extra: &[MessageArg]) -> UniformResult<Outcome> {
        self.message(key, extra).map(Outcome::Invalid)
    }
}

/// A registry of named validators and callbacks.
pub struct ValidatorRegistry {
    validators: RwLock<Vec<(String, ValidatorFn)>>,
    callbacks: RwLock<HashMap<String, CallbackFn>>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .field("callbacks", &self.callback_names())
            .finish()
    }
}

impl ValidatorRegistry {
    /// Creates a registry with no validators.
    pub fn new() -> Self {
        Self {
            validators: RwLock::new(Vec::new()),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding the built-in validators.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        crate::validators::register_builtins(&registry);
        registry
    }

    /// Registers a validator under `name`.
    ///
    /// Re-registering a name replaces the function but keeps its original
    /// position in the run order.
    pub fn register<F>(&self, name: impl Into<String>, validator: F)
    where
        F: Fn(&ValidationContext<'_>) -> UniformResult<Outcome> + Send + Sync + 'static,
    {
        self.register_arc(name, Arc::new(validator));
    }

    /// Registers an already shared validator.
    pub fn register_arc(&self, name: impl Into<String>, validator: ValidatorFn) {
        let name = name.into();
        let mut validators = self.validators.write().expect("validator lock poisoned");
        if let Some(entry) = validators.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = validator;
        } else {
            validators.push((name, validator));
        }
    }

    /// Removes a validator. Returns `true` if it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        let mut validators = self.validators.write().expect("validator lock poisoned");
        let len_before = validators.len();
        validators.retain(|(n, _)| n != name);
        validators.len() < len_before
    }

    /// Returns `true` if a validator with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators
            .read()
            .expect("validator lock poisoned")
            .iter()
            .any(|(n, _)| n == name)
    }

    /// Returns the validator names in run order.
    pub fn names(&self) -> Vec<String> {
        self.validators
            .read()
            .expect("validator lock poisoned")
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().expect("validator lock poisoned").len()
    }

    /// Returns `true` if no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the validators a modifier list asks for, in run order.
    ///
    /// The result is a snapshot; validators may register further validators
    /// while it is being run.
    pub fn applicable(&self, modifiers: &ModifierList) -> Vec<(String, ValidatorFn)> {
        self.validators
            .read()
            .expect("validator lock poisoned")
            .iter()
            .filter(|(name, _)| modifiers.contains(name))
            .map(|(name, f)| (name.clone(), Arc::clone(f)))
            .collect()
    }

    /// Registers a named callback validator.
    pub fn register_callback<F>(&self, name: impl Into<String>, callback: F)
    where
        F: Fn(&ValidationContext<'_>) -> Outcome + Send + Sync + 'static,
    {
        self.callbacks
            .write()
            .expect("callback lock poisoned")
            .insert(name.into(), Arc::new(callback));
    }

    /// Removes a named callback. Returns `true` if it was registered.
    pub fn unregister_callback(&self, name: &str) -> bool {
        self.callbacks
            .write()
            .expect("callback lock poisoned")
            .remove(name)
            .is_some()
    }

    /// Looks up a named callback.
    pub fn callback(&self, name: &str) -> Option<CallbackFn> {
        self.callbacks
            .read()
            .expect("callback lock poisoned")
            .get(name)
            .cloned()
    }

    /// Returns the registered callback names, sorted.
    pub fn callback_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .callbacks
            .read()
            .expect("callback lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }
}

//! Per-field state and visual transitions.
//!
//! A [`FieldController`] owns what the form remembers about one control: its
//! parsed modifiers, its prompt, the text colour it had when attached, and
//! its current [`FieldState`]. The hint markup hidden while an error message
//! is shown lives in a [`HintStash`] owned by the form, since the radios of a
//! group share one hint.
//!
//! ```text
//!              focus                 blur (validators pass)
//! ShowingPrompt ────▶ Editing ──────────────────────────────▶ Valid
//!       ▲                │  blur (a validator fails)            │
//!       │                └──────────────────────────▶ Invalid ◀─┘
//!       │  blur, empty and not required                 │
//!       └───────────────────────────────────────────────┘
//! ```
//!
//! The transitions only touch the host through [`FormHost`]; deciding *when*
//! to transition is the form controller's job.

use std::collections::HashMap;

use uniform_rs_core::{Options, UniformResult};

use crate::host::{FieldId, FieldKind, FormHost, Target};
use crate::modifiers::ModifierList;

/// The visible state of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// Empty; showing its prompt (if it has one).
    ShowingPrompt,
    /// Focused, or typed into and not yet validated.
    Editing,
    /// Passed validation.
    Valid,
    /// Failed validation with this message.
    Invalid(String),
}

impl FieldState {
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Hint text hidden behind error messages, keyed by error key.
///
/// Fields sharing an error key (the radios of a group) share one hint
/// element, so the first failure stashes it and the first recovery puts it
/// back.
#[derive(Debug, Clone, Default)]
pub struct HintStash {
    hints: HashMap<String, String>,
}

impl HintStash {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stashed hint for `key`, if a failure is showing in its place.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.hints.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

/// One attached control.
#[derive(Debug, Clone)]
pub struct FieldController {
    id: FieldId,
    name: String,
    kind: FieldKind,
    modifiers: ModifierList,
    prompt: Option<String>,
    baseline_color: String,
    state: FieldState,
}

impl FieldController {
    /// Reads a control from the host and shows its prompt if it is empty.
    pub fn attach(host: &mut dyn FormHost, id: FieldId, options: &Options) -> UniformResult<Self> {
        let kind = host.field_kind(id);
        let modifiers = ModifierList::parse(&host.modifier_markup(id))?;
        let prompt = if kind.takes_prompt() {
            host.prompt(id)
        } else {
            None
        };

        let mut field = Self {
            id,
            name: host.field_name(id),
            kind,
            modifiers,
            prompt,
            baseline_color: host.text_color(id),
            state: FieldState::Editing,
        };

        if kind.takes_prompt() && field.is_blank(host) {
            field.show_prompt(host, options);
        }
        Ok(field)
    }

    pub const fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key of this field in the form's error map: its name, or its id
    /// when unnamed.
    pub fn error_key(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub const fn modifiers(&self) -> &ModifierList {
        &self.modifiers
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub const fn state(&self) -> &FieldState {
        &self.state
    }

    /// Returns `true` if the `required` modifier is present.
    pub fn is_required(&self) -> bool {
        self.modifiers.contains("required")
    }

    /// Returns `true` if the host value is the prompt text.
    pub fn shows_prompt_text(&self, host: &dyn FormHost) -> bool {
        self.prompt
            .as_deref()
            .is_some_and(|prompt| host.value(self.id) == prompt)
    }

    /// Returns `true` if the control holds no user input.
    pub fn is_blank(&self, host: &dyn FormHost) -> bool {
        self.kind.takes_prompt() && (host.value(self.id).is_empty() || self.shows_prompt_text(host))
    }

    /// Returns the value validators see: empty while the prompt is shown.
    pub fn effective_value(&self, host: &dyn FormHost) -> String {
        if self.shows_prompt_text(host) {
            String::new()
        } else {
            host.value(self.id)
        }
    }

    /// Puts the prompt text in the control, dims it, and enters
    /// [`FieldState::ShowingPrompt`].
    pub fn show_prompt(&mut self, host: &mut dyn FormHost, options: &Options) {
        self.paint_prompt(host, options);
        self.state = FieldState::ShowingPrompt;
    }

    /// Puts the prompt text back without changing the state, so an invalid
    /// field keeps its message.
    pub fn paint_prompt(&self, host: &mut dyn FormHost, options: &Options) {
        if self.kind.dims_prompt() {
            host.set_text_color(self.id, &options.default_value_color);
        }
        if let Some(prompt) = &self.prompt {
            host.set_value(self.id, prompt);
        }
    }

    /// Removes the prompt text, if shown, without touching the state.
    pub fn strip_prompt(&self, host: &mut dyn FormHost) {
        if self.shows_prompt_text(host) {
            host.set_value(self.id, "");
        }
    }

    /// Handles focus: clears the prompt and restores the text colour.
    pub fn focus(&mut self, host: &mut dyn FormHost) {
        if self.shows_prompt_text(host) {
            host.set_value(self.id, "");
        }
        self.restore_color(host);
        if self.state == FieldState::ShowingPrompt {
            self.state = FieldState::Editing;
        }
    }

    /// Restores the text colour recorded at attach time.
    pub fn restore_color(&self, host: &mut dyn FormHost) {
        if self.kind.dims_prompt() {
            host.set_text_color(self.id, &self.baseline_color);
        }
    }

    /// Marks the field valid.
    pub fn mark_valid(&mut self, host: &mut dyn FormHost, options: &Options, hints: &mut HintStash) {
        self.set_marks(host, options, false);
        for target in [Target::Holder(self.id), Target::Field(self.id)] {
            host.set_class(target, &options.valid_class, true);
        }
        self.restore_hint(host, options, hints);
        self.state = FieldState::Valid;
    }

    /// Marks the field invalid and shows `message` in place of the hint.
    pub fn mark_invalid(
        &mut self,
        host: &mut dyn FormHost,
        options: &Options,
        hints: &mut HintStash,
        message: &str,
    ) {
        for target in [Target::Holder(self.id), Target::Field(self.id)] {
            host.set_class(target, &options.valid_class, false);
        }
        self.set_marks(host, options, true);
        hints
            .hints
            .entry(self.error_key())
            .or_insert_with(|| host.hint(self.id, &options.hint_class).unwrap_or_default());
        host.set_hint(self.id, &options.hint_class, message);
        self.state = FieldState::Invalid(message.to_string());
    }

    /// Removes every validation mark, restores the hint, and returns to
    /// [`FieldState::Editing`].
    pub fn clear_marks(&mut self, host: &mut dyn FormHost, options: &Options, hints: &mut HintStash) {
        self.set_marks(host, options, false);
        for target in [Target::Holder(self.id), Target::Field(self.id)] {
            host.set_class(target, &options.valid_class, false);
        }
        self.restore_hint(host, options, hints);
        self.state = FieldState::Editing;
    }

    fn set_marks(&self, host: &mut dyn FormHost, options: &Options, present: bool) {
        for target in [Target::Holder(self.id), Target::Field(self.id)] {
            host.set_class(target, &options.error_class, present);
            host.set_class(target, &options.invalid_class, present);
        }
    }

    fn restore_hint(&self, host: &mut dyn FormHost, options: &Options, hints: &mut HintStash) {
        if let Some(original) = hints.hints.remove(&self.error_key()) {
            host.set_hint(self.id, &options.hint_class, &original);
        }
    }
}

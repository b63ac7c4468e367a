//! The form controller.
//!
//! [`FormController`] attaches to one form in a host document and reacts to
//! the four events a form sees: focus, blur, submit and page unload. It owns
//! the per-field controllers, the error map (one message per invalid field),
//! the leave-guard snapshot and the focus tracker.
//!
//! ## Usage
//!
//! ```ignore
//! use uniform_rs_forms::form::{FormConfig, FormController};
//!
//! let config = FormConfig::new("signup").on_submit(|_host| true);
//! let mut form = FormController::attach(&mut host, config)?;
//!
//! form.on_focus(&mut host, email);
//! form.on_blur(&mut host, email)?;
//! if form.on_submit(&mut host)? {
//!     // let the submission through
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, Span};

use uniform_rs_core::i18n::keys;
use uniform_rs_core::logging::form_span;
use uniform_rs_core::utils::text::clean_caption;
use uniform_rs_core::{
    MessageTable, OptionOverrides, Options, Settings, UniformError, UniformResult,
};

use crate::banner;
use crate::field::{FieldController, FieldState, HintStash};
use crate::host::{FieldId, FormHost, Target};
use crate::registry::{FieldInput, Sibling, SiblingLookup, ValidationContext, ValidatorRegistry};
use crate::serialize::urlencode;
use crate::validation::run_validators;

// ── Callbacks ───────────────────────────────────────────────────────

/// Inspects the form before a guarded submission. Returning `false` blocks it.
pub type SubmitCallback = Arc<dyn Fn(&dyn FormHost) -> bool + Send + Sync>;

/// Decides a blocked submission. Receives the title and the report items;
/// its return value becomes the result of the submit.
pub type PreventSubmitCallback =
    Arc<dyn Fn(&mut dyn FormHost, &str, &[String]) -> bool + Send + Sync>;

/// Displays the report of a blocked submission in place of the error banner.
pub type ErrorReportCallback = Arc<dyn Fn(&mut dyn FormHost, &str, &[String]) + Send + Sync>;

/// Decides whether a page with unsaved changes may be left.
pub type LeaveCallback = Arc<dyn Fn(&dyn FormHost) -> bool + Send + Sync>;

/// The optional hooks of a form.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub submit: Option<SubmitCallback>,
    pub prevent_submit: Option<PreventSubmitCallback>,
    pub error_report: Option<ErrorReportCallback>,
    pub on_leave: Option<LeaveCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("submit", &self.submit.is_some())
            .field("prevent_submit", &self.prevent_submit.is_some())
            .field("error_report", &self.error_report.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .finish()
    }
}

// ── Configuration ───────────────────────────────────────────────────

/// Everything a form is attached with.
///
/// Options are resolved here, before attaching; the controller never
/// consults a global table afterwards.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub id: String,
    pub options: Options,
    pub callbacks: Callbacks,
    pub registry: Arc<ValidatorRegistry>,
    pub messages: Arc<MessageTable>,
}

impl FormConfig {
    /// Creates a configuration with default options, the built-in
    /// validators and the English messages.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: Options::default(),
            callbacks: Callbacks::default(),
            registry: Arc::new(ValidatorRegistry::with_builtins()),
            messages: Arc::new(MessageTable::english()),
        }
    }

    /// Creates a configuration from process settings: their default options
    /// and their message table.
    pub fn from_settings(id: impl Into<String>, settings: &Settings) -> UniformResult<Self> {
        let mut config = Self::new(id);
        config.options = settings.options.clone();
        config.messages = Arc::new(MessageTable::from_settings(settings)?);
        Ok(config)
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Applies per-form overrides to the current options.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &OptionOverrides) -> Self {
        self.options = self.options.merged(overrides);
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ValidatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Arc<MessageTable>) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    #[must_use]
    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn FormHost) -> bool + Send + Sync + 'static,
    {
        self.callbacks.submit = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_prevent_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn FormHost, &str, &[String]) -> bool + Send + Sync + 'static,
    {
        self.callbacks.prevent_submit = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_error_report<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn FormHost, &str, &[String]) + Send + Sync + 'static,
    {
        self.callbacks.error_report = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn FormHost) -> bool + Send + Sync + 'static,
    {
        self.callbacks.on_leave = Some(Arc::new(f));
        self
    }
}

// ── Controller ──────────────────────────────────────────────────────

/// The answer to a page-unload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    /// Nothing to protect; leave silently.
    Unchanged,
    /// Unsaved changes, and the user chose to stay.
    Stay,
    /// Unsaved changes, and the user chose to leave anyway.
    Leave,
}

/// A form attached to a host document.
pub struct FormController {
    id: String,
    options: Options,
    callbacks: Callbacks,
    registry: Arc<ValidatorRegistry>,
    messages: Arc<MessageTable>,
    fields: Vec<FieldController>,
    errors: HashMap<String, String>,
    hints: HintStash,
    focused: Option<FieldId>,
    ask_on_leave: bool,
    snapshot: String,
    span: Span,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("fields", &self.fields.len())
            .field("errors", &self.errors)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Attaches to the form in `host`.
    ///
    /// Every control matching the field selector is attached (empty controls
    /// get their prompt), the leave-guard snapshot is taken, and the
    /// autofocus control, if any, receives focus.
    ///
    /// Fails if a control carries malformed validator markup.
    pub fn attach(host: &mut dyn FormHost, config: FormConfig) -> UniformResult<Self> {
        let span = form_span(&config.id);
        let _entered = span.clone().entered();

        let ids = host.select_fields(&config.options.field_selector);
        let mut fields = Vec::with_capacity(ids.len());
        for id in ids {
            fields.push(FieldController::attach(host, id, &config.options)?);
        }

        let mut form = Self {
            id: config.id,
            ask_on_leave: config.options.ask_on_leave,
            options: config.options,
            callbacks: config.callbacks,
            registry: config.registry,
            messages: config.messages,
            fields,
            errors: HashMap::new(),
            hints: HintStash::new(),
            focused: None,
            snapshot: String::new(),
            span,
        };
        form.snapshot = form.serialize(host);
        debug!(fields = form.fields.len(), "form attached");

        if let Some(id) = host.autofocus_field() {
            form.on_focus(host, id);
        }
        Ok(form)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &Arc<ValidatorRegistry> {
        &self.registry
    }

    /// The attached fields, in document order.
    pub fn fields(&self) -> &[FieldController] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldController> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// The state of a field, if it is attached.
    pub fn field_state(&self, id: FieldId) -> Option<&FieldState> {
        self.field(id).map(FieldController::state)
    }

    /// The error map: field name to its current message.
    pub const fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The current message of a field, by name.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Returns `true` if no field currently has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The field that has focus, if any.
    pub const fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    /// The outstanding error messages in document order.
    pub fn outstanding_errors(&self) -> Vec<String> {
        let mut seen = Vec::new();
        let mut messages = Vec::new();
        for field in &self.fields {
            let key = field.error_key();
            if seen.contains(&key) {
                continue;
            }
            if let Some(message) = self.errors.get(&key) {
                messages.push(message.clone());
            }
            seen.push(key);
        }
        messages
    }

    /// The form data with prompt text replaced by empty values.
    pub fn effective_form_data(&self, host: &dyn FormHost) -> Vec<(String, String)> {
        host.form_data()
            .into_iter()
            .map(|(name, value)| {
                let is_prompt = self
                    .fields
                    .iter()
                    .any(|f| f.name() == name && f.prompt() == Some(value.as_str()));
                if is_prompt {
                    (name, String::new())
                } else {
                    (name, value)
                }
            })
            .collect()
    }

    /// Serializes the effective form data.
    pub fn serialize(&self, host: &dyn FormHost) -> String {
        urlencode(&self.effective_form_data(host))
    }

    fn index_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == id)
    }

    fn require_index(&self, id: FieldId) -> UniformResult<usize> {
        self.index_of(id).ok_or_else(|| {
            UniformError::ConfigurationError(format!(
                "field {id} is not attached to form '{}'",
                self.id
            ))
        })
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Handles focus on a field: moves the focus highlight to its holder and
    /// clears its prompt. Focus on an unattached control is ignored.
    pub fn on_focus(&mut self, host: &mut dyn FormHost, id: FieldId) {
        let _entered = self.span.clone().entered();
        let Some(index) = self.index_of(id) else {
            debug!(field = %id, "focus on unattached control ignored");
            return;
        };

        for field in &self.fields {
            if field.id() != id {
                host.set_class(Target::Holder(field.id()), &self.options.focused_class, false);
            }
        }
        host.set_class(Target::Holder(id), &self.options.focused_class, true);
        self.focused = Some(id);
        self.fields[index].focus(host);
    }

    /// Handles blur on a field: validates it and updates its marks.
    ///
    /// Returns the field's new state.
    pub fn on_blur(&mut self, host: &mut dyn FormHost, id: FieldId) -> UniformResult<FieldState> {
        let _entered = self.span.clone().entered();
        let index = self.require_index(id)?;

        host.set_class(Target::Holder(id), &self.options.focused_class, false);
        if self.focused == Some(id) {
            self.focused = None;
        }

        self.validate_at(host, index, true)?;
        Ok(self.fields[index].state().clone())
    }

    /// Validates every field, as if each had been blurred, without touching
    /// focus. Returns `true` if the form is valid.
    pub fn validate_all(&mut self, host: &mut dyn FormHost) -> UniformResult<bool> {
        let _entered = self.span.clone().entered();
        for index in 0..self.fields.len() {
            self.validate_at(host, index, true)?;
        }
        Ok(self.is_valid())
    }

    /// Handles a submit attempt. Returns `true` if the submission may go
    /// ahead.
    ///
    /// Prompt text is always stripped first. When submission prevention is
    /// on (by option or the form's marker class) every field is validated
    /// and the submit callback consulted; a failure blocks the submission,
    /// marks the form, reports the errors and puts the prompts back.
    pub fn on_submit(&mut self, host: &mut dyn FormHost) -> UniformResult<bool> {
        let _entered = self.span.clone().entered();

        host.set_class(Target::Form, &self.options.failed_submit_class, false);
        self.ask_on_leave = false;
        host.set_class(Target::Form, &self.options.ask_on_leave_class, false);

        for field in &self.fields {
            field.strip_prompt(host);
        }

        let prevent = self.options.prevent_submit
            || host.has_class(Target::Form, &self.options.prevent_submit_class);
        if !prevent {
            debug!("submission allowed, prevention disabled");
            return Ok(true);
        }

        for index in 0..self.fields.len() {
            self.validate_at(host, index, false)?;
        }
        let accepted = self
            .callbacks
            .submit
            .as_ref()
            .map_or(true, |callback| callback(host));

        if self.errors.is_empty() && accepted {
            debug!("submission allowed");
            return Ok(true);
        }

        let title = self.messages.format(keys::SUBMIT_MSG, &[])?;
        let items = if self.errors.is_empty() {
            vec![self.messages.format(keys::SUBMIT_HELP, &[])?]
        } else {
            self.outstanding_errors()
        };

        let allowed = if let Some(decide) = &self.callbacks.prevent_submit {
            decide(host, &title, &items)
        } else if let Some(report) = &self.callbacks.error_report {
            report(host, &title, &items);
            false
        } else {
            banner::show_form_error(host, &title, &items)
        };
        if allowed {
            info!("blocked submission released by callback");
            return Ok(true);
        }

        host.set_class(Target::Form, &self.options.failed_submit_class, true);
        for field in &mut self.fields {
            if !field.is_blank(host) {
                continue;
            }
            if field.state().is_invalid() {
                field.paint_prompt(host, &self.options);
            } else {
                field.show_prompt(host, &self.options);
            }
        }
        info!(errors = self.errors.len(), rejected = !accepted, "submission blocked");
        Ok(false)
    }

    /// Handles a page-unload attempt.
    ///
    /// When the leave guard is armed (by option or the form's marker class)
    /// and the form data differs from the snapshot taken at attach time, the
    /// leave callback decides, or else the host asks the user.
    pub fn on_before_unload(&self, host: &mut dyn FormHost) -> UniformResult<LeaveDecision> {
        let _entered = self.span.clone().entered();

        let armed = self.ask_on_leave
            || host.has_class(Target::Form, &self.options.ask_on_leave_class);
        if !armed || self.serialize(host) == self.snapshot {
            return Ok(LeaveDecision::Unchanged);
        }

        let leave = if let Some(callback) = &self.callbacks.on_leave {
            callback(host)
        } else {
            let message = self.messages.format(keys::ON_LEAVE, &[])?;
            host.confirm(&message)
        };
        info!(leave, "unsaved changes on unload");
        Ok(if leave {
            LeaveDecision::Leave
        } else {
            LeaveDecision::Stay
        })
    }

    /// Shows the success banner.
    pub fn show_success(&self, host: &mut dyn FormHost) -> UniformResult<()> {
        let title = self.messages.format(keys::SUBMIT_SUCCESS, &[])?;
        banner::show_form_success(host, &title);
        Ok(())
    }

    // ── Validation ───────────────────────────────────────────────────

    fn validate_at(
        &mut self,
        host: &mut dyn FormHost,
        index: usize,
        show_prompt: bool,
    ) -> UniformResult<()> {
        let key = self.fields[index].error_key();

        if self.fields[index].is_blank(host) && !self.fields[index].is_required() {
            self.errors.remove(&key);
            let field = &mut self.fields[index];
            field.clear_marks(host, &self.options, &mut self.hints);
            if show_prompt {
                field.show_prompt(host, &self.options);
            }
            debug!(field = %key, "empty optional field reset");
            return Ok(());
        }

        let report = {
            let field = &self.fields[index];
            let host: &dyn FormHost = host;
            let value = field.effective_value(host);
            let caption = clean_caption(&host.label_text(field.id(), &self.options.holder_class));
            let siblings = HostSiblings {
                host,
                fields: &self.fields,
                holder_class: &self.options.holder_class,
            };
            let input = FieldInput {
                name: field.name(),
                kind: field.kind(),
                value: &value,
                checked: host.is_checked(field.id()),
                modifiers: field.modifiers(),
            };
            let ctx = ValidationContext::new(
                input,
                &caption,
                &self.options,
                &self.messages,
                &self.registry,
                &siblings,
            );
            run_validators(&ctx)?
        };

        let field = &mut self.fields[index];
        match report.message {
            Some(message) => {
                debug!(field = %key, validator = ?report.failed, "field invalid");
                field.mark_invalid(host, &self.options, &mut self.hints, &message);
                self.errors.insert(key, message);
            }
            None => {
                debug!(field = %key, "field valid");
                field.mark_valid(host, &self.options, &mut self.hints);
                self.errors.remove(&key);
            }
        }
        field.restore_color(host);
        Ok(())
    }
}

/// Sibling lookups against the host, honouring prompts.
struct HostSiblings<'a> {
    host: &'a dyn FormHost,
    fields: &'a [FieldController],
    holder_class: &'a str,
}

impl SiblingLookup for HostSiblings<'_> {
    fn sibling(&self, name: &str) -> Option<Sibling> {
        let id = self.host.fields_named(name).into_iter().next()?;
        let value = self
            .fields
            .iter()
            .find(|f| f.id() == id)
            .map_or_else(|| self.host.value(id), |f| f.effective_value(self.host));
        Some(Sibling {
            value,
            caption: clean_caption(&self.host.label_text(id, self.holder_class)),
        })
    }

    fn group_checked(&self, name: &str) -> bool {
        self.host
            .fields_named(name)
            .into_iter()
            .any(|id| self.host.is_checked(id))
    }
}

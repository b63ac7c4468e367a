//! The host abstraction.
//!
//! The controllers never touch a document directly. Everything they read or
//! change about a form (field values, classes, hint text, banners, the leave
//! confirmation) goes through [`FormHost`], so the same state machine drives
//! a browser binding, a server-side renderer or the in-memory host used in
//! tests.
//!
//! Fields are addressed by [`FieldId`], an opaque handle issued by the host.
//! The host must return fields in document order, which is the order the
//! controllers validate in and report errors in.

use std::fmt;

/// Opaque handle of one form control, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A single-line input (text, password, email, ...).
    Text,
    /// A multi-line text area.
    Textarea,
    /// A drop-down list.
    Select,
    /// A checkbox.
    Checkbox,
    /// One button of a radio group.
    Radio,
}

impl FieldKind {
    /// The markup tag name for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Text | Self::Checkbox | Self::Radio => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
        }
    }

    /// Whether a placeholder prompt may be shown in this kind of control.
    pub const fn takes_prompt(self) -> bool {
        !matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Whether the text colour is adjusted while the prompt is shown.
    pub const fn dims_prompt(self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }
}

/// The element a class change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The control itself.
    Field(FieldId),
    /// The holder container wrapping the control.
    Holder(FieldId),
    /// The form element.
    Form,
}

/// The two banner containers a form can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    /// The error summary shown when submission is blocked.
    Error,
    /// The success message.
    Success,
}

impl BannerKind {
    /// The element id of the banner container.
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Error => "errorMsg",
            Self::Success => "okMsg",
        }
    }
}

/// Access to one form in its host document.
///
/// Implementations should treat operations on a missing element (a field
/// without a holder, a holder without a hint) as no-ops.
pub trait FormHost {
    /// Returns the controls matching `selector`, in document order.
    fn select_fields(&self, selector: &str) -> Vec<FieldId>;

    /// Returns every control named `name`, in document order.
    fn fields_named(&self, name: &str) -> Vec<FieldId>;

    /// Returns the control marked for autofocus, if any.
    fn autofocus_field(&self) -> Option<FieldId>;

    /// Returns the kind of a control.
    fn field_kind(&self, field: FieldId) -> FieldKind;

    /// Returns the `name` attribute of a control (empty if unnamed).
    fn field_name(&self, field: FieldId) -> String;

    /// Returns the raw class attribute carrying the validator markup.
    fn modifier_markup(&self, field: FieldId) -> String;

    /// Returns the declared prompt (`data-default-value`), if any.
    fn prompt(&self, field: FieldId) -> Option<String>;

    /// Returns the current value of a control.
    fn value(&self, field: FieldId) -> String;

    /// Replaces the value of a control.
    fn set_value(&mut self, field: FieldId, value: &str);

    /// Returns whether a checkbox or radio button is checked.
    fn is_checked(&self, field: FieldId) -> bool;

    /// Returns the label text of the holder wrapping a control.
    fn label_text(&self, field: FieldId, holder_class: &str) -> String;

    /// Returns the text colour of a control.
    fn text_color(&self, field: FieldId) -> String;

    /// Sets the text colour of a control.
    fn set_text_color(&mut self, field: FieldId, color: &str);

    /// Returns whether `target` carries `class`.
    fn has_class(&self, target: Target, class: &str) -> bool;

    /// Adds (`present == true`) or removes a class.
    fn set_class(&mut self, target: Target, class: &str, present: bool);

    /// Returns the inner markup of the hint inside a control's holder, or
    /// `None` if the holder has no hint element.
    fn hint(&self, field: FieldId, hint_class: &str) -> Option<String>;

    /// Replaces the inner markup of a control's hint element.
    fn set_hint(&mut self, field: FieldId, hint_class: &str, markup: &str);

    /// Returns the successful controls as name/value pairs, in document order.
    fn form_data(&self) -> Vec<(String, String)>;

    /// Removes a banner if one is displayed.
    fn remove_banner(&mut self, kind: BannerKind);

    /// Inserts a banner as the first child of the form.
    fn prepend_banner(&mut self, kind: BannerKind, markup: &str);

    /// Scrolls the document so a banner is visible.
    fn scroll_to_banner(&mut self, kind: BannerKind);

    /// Asks the user a yes/no question. Returns `true` for yes.
    fn confirm(&mut self, message: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_tags() {
        assert_eq!(FieldKind::Text.tag(), "input");
        assert_eq!(FieldKind::Radio.tag(), "input");
        assert_eq!(FieldKind::Textarea.tag(), "textarea");
        assert_eq!(FieldKind::Select.tag(), "select");
    }

    #[test]
    fn test_prompt_rules() {
        assert!(FieldKind::Text.takes_prompt());
        assert!(FieldKind::Select.takes_prompt());
        assert!(!FieldKind::Select.dims_prompt());
        assert!(!FieldKind::Checkbox.takes_prompt());
        assert!(!FieldKind::Radio.takes_prompt());
    }

    #[test]
    fn test_banner_ids() {
        assert_eq!(BannerKind::Error.element_id(), "errorMsg");
        assert_eq!(BannerKind::Success.element_id(), "okMsg");
    }
}

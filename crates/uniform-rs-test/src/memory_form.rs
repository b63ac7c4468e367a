//! An in-memory form document.
//!
//! [`MemoryForm`] implements [`FormHost`] over plain vectors: fields, the
//! holders wrapping them, the form's own classes, and the banners shown. It
//! also captures what a browser would show the user (banners, scroll
//! requests, confirmation prompts) so tests can assert on it.
//!
//! ## Example
//!
//! ```
//! use uniform_rs_forms::host::FormHost;
//! use uniform_rs_test::memory_form::{FieldFixture, MemoryForm};
//!
//! let mut form = MemoryForm::new();
//! let email = form.add(
//!     FieldFixture::text("email")
//!         .markup("required validateEmail")
//!         .label("Email *")
//!         .hint("We never share it"),
//! );
//!
//! form.type_into(email, "jane@example.com");
//! assert_eq!(form.value(email), "jane@example.com");
//! assert_eq!(form.hint_of(email).as_deref(), Some("We never share it"));
//! ```

use std::collections::BTreeSet;

use uniform_rs_forms::host::{BannerKind, FieldId, FieldKind, FormHost, Target};

/// The default text colour of a field.
pub const DEFAULT_COLOR: &str = "#000000";

/// Handle of a holder container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolderId(pub usize);

/// One control.
#[derive(Debug, Clone)]
pub struct MemoryField {
    pub kind: FieldKind,
    pub name: String,
    /// The class attribute, in order.
    pub classes: Vec<String>,
    pub prompt: Option<String>,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub autofocus: bool,
    pub color: String,
    pub holder: Option<HolderId>,
}

/// A holder container: its classes, label text and hint markup.
#[derive(Debug, Clone, Default)]
pub struct MemoryHolder {
    pub classes: BTreeSet<String>,
    pub label: String,
    /// `None` when the holder has no hint element.
    pub hint: Option<String>,
}

/// Builder for a field added with [`MemoryForm::add`].
#[derive(Debug, Clone)]
pub struct FieldFixture {
    field: MemoryField,
    label: String,
    hint: Option<String>,
}

impl FieldFixture {
    fn new(kind: FieldKind, name: &str, value: &str) -> Self {
        Self {
            field: MemoryField {
                kind,
                name: name.to_string(),
                classes: Vec::new(),
                prompt: None,
                value: value.to_string(),
                checked: false,
                disabled: false,
                autofocus: false,
                color: DEFAULT_COLOR.to_string(),
                holder: None,
            },
            label: String::new(),
            hint: None,
        }
    }

    /// A single-line text input.
    pub fn text(name: &str) -> Self {
        Self::new(FieldKind::Text, name, "")
    }

    /// A text area.
    pub fn textarea(name: &str) -> Self {
        Self::new(FieldKind::Textarea, name, "")
    }

    /// A drop-down with the given selected value.
    pub fn select(name: &str, selected: &str) -> Self {
        Self::new(FieldKind::Select, name, selected)
    }

    /// A checkbox submitting `on` when checked.
    pub fn checkbox(name: &str) -> Self {
        Self::new(FieldKind::Checkbox, name, "on")
    }

    /// One radio button of the group `name`.
    pub fn radio(name: &str, value: &str) -> Self {
        Self::new(FieldKind::Radio, name, value)
    }

    /// Sets the class attribute (the validator markup).
    #[must_use]
    pub fn markup(mut self, markup: &str) -> Self {
        self.field.classes = markup.split_whitespace().map(str::to_string).collect();
        self
    }

    /// Declares a prompt (`data-default-value`).
    #[must_use]
    pub fn prompt(mut self, prompt: &str) -> Self {
        self.field.prompt = Some(prompt.to_string());
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.field.value = value.to_string();
        self
    }

    #[must_use]
    pub fn checked(mut self) -> Self {
        self.field.checked = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.field.disabled = true;
        self
    }

    #[must_use]
    pub fn autofocus(mut self) -> Self {
        self.field.autofocus = true;
        self
    }

    /// Sets the initial text colour.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.field.color = color.to_string();
        self
    }

    /// Sets the label of the holder created for this field.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Gives the holder created for this field a hint element.
    #[must_use]
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// Places the field in an existing holder instead of creating one.
    #[must_use]
    pub fn in_holder(mut self, holder: HolderId) -> Self {
        self.field.holder = Some(holder);
        self
    }
}

/// An in-memory form implementing [`FormHost`].
#[derive(Debug, Clone)]
pub struct MemoryForm {
    fields: Vec<MemoryField>,
    holders: Vec<MemoryHolder>,
    classes: BTreeSet<String>,
    banners: Vec<(BannerKind, String)>,
    scrolled: Vec<BannerKind>,
    confirmations: Vec<String>,
    confirm_answer: bool,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    /// Creates an empty form. Confirmation prompts are answered "stay".
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            holders: Vec::new(),
            classes: BTreeSet::new(),
            banners: Vec::new(),
            scrolled: Vec::new(),
            confirmations: Vec::new(),
            confirm_answer: false,
        }
    }

    /// Adds a class to the form element.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    /// Adds a holder shared by several fields (a radio group).
    pub fn add_holder(&mut self, label: &str, hint: Option<&str>) -> HolderId {
        self.holders.push(MemoryHolder {
            classes: BTreeSet::new(),
            label: label.to_string(),
            hint: hint.map(str::to_string),
        });
        HolderId(self.holders.len() - 1)
    }

    /// Adds a field. Returns its id.
    pub fn add(&mut self, fixture: FieldFixture) -> FieldId {
        let mut field = fixture.field;
        if field.holder.is_none() {
            field.holder = Some(self.add_holder(&fixture.label, fixture.hint.as_deref()));
        }
        self.fields.push(field);
        FieldId(self.fields.len() - 1)
    }

    // ── Simulated user input ─────────────────────────────────────────

    /// Replaces a field's value, as typing would.
    pub fn type_into(&mut self, id: FieldId, value: &str) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.value = value.to_string();
        }
    }

    /// Checks a checkbox, or selects a radio button (unchecking the rest of
    /// its group).
    pub fn check(&mut self, id: FieldId) {
        let Some(field) = self.fields.get(id.0) else {
            return;
        };
        if field.kind == FieldKind::Radio {
            let name = field.name.clone();
            for other in &mut self.fields {
                if other.kind == FieldKind::Radio && other.name == name {
                    other.checked = false;
                }
            }
        }
        self.fields[id.0].checked = true;
    }

    pub fn uncheck(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.checked = false;
        }
    }

    /// Sets the answer given to confirmation prompts.
    pub fn set_confirm_answer(&mut self, leave: bool) {
        self.confirm_answer = leave;
    }

    /// Adds or removes a class on the form element.
    pub fn toggle_form_class(&mut self, class: &str, present: bool) {
        self.set_class(Target::Form, class, present);
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn field_ref(&self, id: FieldId) -> Option<&MemoryField> {
        self.fields.get(id.0)
    }

    fn holder_of(&self, id: FieldId) -> Option<&MemoryHolder> {
        let holder = self.fields.get(id.0)?.holder?;
        self.holders.get(holder.0)
    }

    /// Returns `true` if the field's holder carries `class`.
    pub fn holder_has(&self, id: FieldId, class: &str) -> bool {
        self.holder_of(id).is_some_and(|h| h.classes.contains(class))
    }

    /// Returns `true` if the field itself carries `class`.
    pub fn field_has(&self, id: FieldId, class: &str) -> bool {
        self.fields
            .get(id.0)
            .is_some_and(|f| f.classes.iter().any(|c| c == class))
    }

    /// Returns `true` if the form element carries `class`.
    pub fn form_has(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// The hint markup of the field's holder.
    pub fn hint_of(&self, id: FieldId) -> Option<String> {
        self.holder_of(id).and_then(|h| h.hint.clone())
    }

    /// The text colour of a field.
    pub fn color_of(&self, id: FieldId) -> String {
        self.fields.get(id.0).map(|f| f.color.clone()).unwrap_or_default()
    }

    /// The markup of a displayed banner.
    pub fn banner(&self, kind: BannerKind) -> Option<&str> {
        self.banners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, html)| html.as_str())
    }

    /// The displayed banners, first child first.
    pub fn banners(&self) -> &[(BannerKind, String)] {
        &self.banners
    }

    /// The banners scrolled into view, oldest first.
    pub fn scrolled(&self) -> &[BannerKind] {
        &self.scrolled
    }

    /// The confirmation prompts shown, oldest first.
    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
    }

    /// A JSON view of the fields, handy in assertion failures.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.fields
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.name,
                        "value": f.value,
                        "checked": f.checked,
                        "classes": f.classes,
                    })
                })
                .collect(),
        )
    }
}

fn set_membership(classes: &mut BTreeSet<String>, class: &str, present: bool) {
    if present {
        classes.insert(class.to_string());
    } else {
        classes.remove(class);
    }
}

impl FormHost for MemoryForm {
    fn select_fields(&self, selector: &str) -> Vec<FieldId> {
        let tags: Vec<&str> = selector.split(',').map(str::trim).collect();
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| tags.iter().any(|t| *t == "*" || *t == f.kind.tag()))
            .map(|(i, _)| FieldId(i))
            .collect()
    }

    fn fields_named(&self, name: &str) -> Vec<FieldId> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name == name)
            .map(|(i, _)| FieldId(i))
            .collect()
    }

    fn autofocus_field(&self) -> Option<FieldId> {
        self.fields.iter().position(|f| f.autofocus).map(FieldId)
    }

    fn field_kind(&self, field: FieldId) -> FieldKind {
        self.fields.get(field.0).map_or(FieldKind::Text, |f| f.kind)
    }

    fn field_name(&self, field: FieldId) -> String {
        self.fields.get(field.0).map(|f| f.name.clone()).unwrap_or_default()
    }

    fn modifier_markup(&self, field: FieldId) -> String {
        self.fields
            .get(field.0)
            .map(|f| f.classes.join(" "))
            .unwrap_or_default()
    }

    fn prompt(&self, field: FieldId) -> Option<String> {
        self.fields.get(field.0).and_then(|f| f.prompt.clone())
    }

    fn value(&self, field: FieldId) -> String {
        self.fields.get(field.0).map(|f| f.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, field: FieldId, value: &str) {
        self.type_into(field, value);
    }

    fn is_checked(&self, field: FieldId) -> bool {
        self.fields.get(field.0).is_some_and(|f| f.checked)
    }

    fn label_text(&self, field: FieldId, _holder_class: &str) -> String {
        self.holder_of(field).map(|h| h.label.clone()).unwrap_or_default()
    }

    fn text_color(&self, field: FieldId) -> String {
        self.color_of(field)
    }

    fn set_text_color(&mut self, field: FieldId, color: &str) {
        if let Some(f) = self.fields.get_mut(field.0) {
            f.color = color.to_string();
        }
    }

    fn has_class(&self, target: Target, class: &str) -> bool {
        match target {
            Target::Field(id) => self.field_has(id, class),
            Target::Holder(id) => self.holder_has(id, class),
            Target::Form => self.form_has(class),
        }
    }

    fn set_class(&mut self, target: Target, class: &str, present: bool) {
        match target {
            Target::Field(id) => {
                if let Some(f) = self.fields.get_mut(id.0) {
                    let has = f.classes.iter().any(|c| c == class);
                    if present && !has {
                        f.classes.push(class.to_string());
                    } else if !present {
                        f.classes.retain(|c| c != class);
                    }
                }
            }
            Target::Holder(id) => {
                let holder = self.fields.get(id.0).and_then(|f| f.holder);
                if let Some(h) = holder.and_then(|h| self.holders.get_mut(h.0)) {
                    set_membership(&mut h.classes, class, present);
                }
            }
            Target::Form => set_membership(&mut self.classes, class, present),
        }
    }

    fn hint(&self, field: FieldId, _hint_class: &str) -> Option<String> {
        self.hint_of(field)
    }

    fn set_hint(&mut self, field: FieldId, _hint_class: &str, markup: &str) {
        let holder = self.fields.get(field.0).and_then(|f| f.holder);
        if let Some(h) = holder.and_then(|h| self.holders.get_mut(h.0)) {
            if h.hint.is_some() {
                h.hint = Some(markup.to_string());
            }
        }
    }

    fn form_data(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|f| !f.disabled && !f.name.is_empty())
            .filter(|f| !matches!(f.kind, FieldKind::Checkbox | FieldKind::Radio) || f.checked)
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    fn remove_banner(&mut self, kind: BannerKind) {
        self.banners.retain(|(k, _)| *k != kind);
    }

    fn prepend_banner(&mut self, kind: BannerKind, markup: &str) {
        self.banners.insert(0, (kind, markup.to_string()));
    }

    fn scroll_to_banner(&mut self, kind: BannerKind) {
        self.scrolled.push(kind);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_creates_holder() {
        let mut form = MemoryForm::new();
        let id = form.add(FieldFixture::text("name").label("Name").hint("Full name"));
        assert_eq!(form.label_text(id, "ctrl-holder"), "Name");
        assert_eq!(form.hint(id, "form-hint").as_deref(), Some("Full name"));
    }

    #[test]
    fn test_select_fields_by_tag() {
        let mut form = MemoryForm::new();
        let a = form.add(FieldFixture::text("a"));
        let b = form.add(FieldFixture::textarea("b"));
        let c = form.add(FieldFixture::select("c", "x"));
        assert_eq!(form.select_fields("input, textarea, select"), vec![a, b, c]);
        assert_eq!(form.select_fields("textarea"), vec![b]);
        assert_eq!(form.select_fields("*").len(), 3);
    }

    #[test]
    fn test_radio_check_unchecks_group() {
        let mut form = MemoryForm::new();
        let group = form.add_holder("Colour", None);
        let red = form.add(FieldFixture::radio("color", "red").in_holder(group));
        let blue = form.add(FieldFixture::radio("color", "blue").in_holder(group));
        form.check(red);
        form.check(blue);
        assert!(!form.is_checked(red));
        assert!(form.is_checked(blue));
        assert_eq!(form.form_data(), vec![("color".to_string(), "blue".to_string())]);
    }

    #[test]
    fn test_form_data_skips_disabled_unnamed_and_unchecked() {
        let mut form = MemoryForm::new();
        form.add(FieldFixture::text("a").value("1"));
        form.add(FieldFixture::text("").value("2"));
        form.add(FieldFixture::text("c").value("3").disabled());
        form.add(FieldFixture::checkbox("d"));
        let e = form.add(FieldFixture::checkbox("e"));
        form.check(e);
        assert_eq!(
            form.form_data(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("e".to_string(), "on".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_classes_keep_markup() {
        let mut form = MemoryForm::new();
        let id = form.add(FieldFixture::text("a").markup("required validateEmail"));
        form.set_class(Target::Field(id), "error", true);
        form.set_class(Target::Field(id), "error", true);
        assert_eq!(form.modifier_markup(id), "required validateEmail error");
        form.set_class(Target::Field(id), "error", false);
        assert_eq!(form.modifier_markup(id), "required validateEmail");
    }

    #[test]
    fn test_set_hint_needs_hint_element() {
        let mut form = MemoryForm::new();
        let id = form.add(FieldFixture::text("a"));
        form.set_hint(id, "form-hint", "Oops");
        assert_eq!(form.hint_of(id), None);
    }

    #[test]
    fn test_banners_replace_same_kind() {
        let mut form = MemoryForm::new();
        form.prepend_banner(BannerKind::Success, "<h3>ok</h3>");
        form.prepend_banner(BannerKind::Error, "<h3>one</h3>");
        form.remove_banner(BannerKind::Error);
        form.prepend_banner(BannerKind::Error, "<h3>two</h3>");
        assert_eq!(form.banners().len(), 2);
        assert_eq!(form.banners()[0].0, BannerKind::Error);
        assert_eq!(form.banner(BannerKind::Error), Some("<h3>two</h3>"));
    }

    #[test]
    fn test_confirm_records_prompt() {
        let mut form = MemoryForm::new();
        assert!(!form.confirm("Leave?"));
        form.set_confirm_answer(true);
        assert!(form.confirm("Leave?"));
        assert_eq!(form.confirmations().len(), 2);
    }

    #[test]
    fn test_to_json() {
        let mut form = MemoryForm::new();
        form.add(FieldFixture::text("a").value("x"));
        let json = form.to_json();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[0]["value"], "x");
    }
}

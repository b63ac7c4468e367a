//! Ready-made forms.
//!
//! [`SignupForm`] is a small registration form exercising every kind of
//! control the controllers treat differently: prompted text inputs, a
//! cross-field confirmation, a numeric range, a required radio group and a
//! required checkbox.

use uniform_rs_forms::host::FieldId;

use crate::memory_form::{FieldFixture, MemoryForm};

/// Prompt of the name field.
pub const NAME_PROMPT: &str = "Your full name";
/// Prompt of the email field.
pub const EMAIL_PROMPT: &str = "you@example.com";
/// Hint of the email field.
pub const EMAIL_HINT: &str = "We never share your address.";

/// A registration form and the ids of its controls.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub form: MemoryForm,
    pub name: FieldId,
    pub email: FieldId,
    pub password: FieldId,
    pub confirm: FieldId,
    pub age: FieldId,
    pub color_red: FieldId,
    pub color_blue: FieldId,
    pub terms: FieldId,
}

impl SignupForm {
    /// Builds the form with every control empty.
    pub fn new() -> Self {
        Self::with_form(MemoryForm::new())
    }

    /// Builds the controls into `form` (which may carry form classes).
    pub fn with_form(mut form: MemoryForm) -> Self {
        let name = form.add(
            FieldFixture::text("name")
                .markup("textInput")
                .label("Name")
                .prompt(NAME_PROMPT),
        );
        let email = form.add(
            FieldFixture::text("email")
                .markup("textInput required validateEmail")
                .label("Email *")
                .prompt(EMAIL_PROMPT)
                .hint(EMAIL_HINT),
        );
        let password = form.add(
            FieldFixture::text("password")
                .markup("textInput required validateMinLength val-8")
                .label("Password *"),
        );
        let confirm = form.add(
            FieldFixture::text("confirm")
                .markup("textInput required validateSameAs password")
                .label("Confirm password *:"),
        );
        let age = form.add(
            FieldFixture::text("age")
                .markup("textInput validateInteger validateMin val-18 validateMax val-120")
                .label("Age"),
        );
        let colors = form.add_holder("Favourite colour *", Some("Pick one."));
        let color_red = form.add(FieldFixture::radio("color", "red").markup("required").in_holder(colors));
        let color_blue = form.add(FieldFixture::radio("color", "blue").markup("required").in_holder(colors));
        let terms = form.add(
            FieldFixture::checkbox("terms")
                .markup("required")
                .label("I accept the terms *"),
        );

        Self {
            form,
            name,
            email,
            password,
            confirm,
            age,
            color_red,
            color_blue,
            terms,
        }
    }

    /// Fills every control with valid input.
    pub fn fill_valid(&mut self) {
        self.form.type_into(self.name, "Jane Doe");
        self.form.type_into(self.email, "jane@example.com");
        self.form.type_into(self.password, "correct horse");
        self.form.type_into(self.confirm, "correct horse");
        self.form.type_into(self.age, "34");
        self.form.check(self.color_blue);
        self.form.check(self.terms);
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}

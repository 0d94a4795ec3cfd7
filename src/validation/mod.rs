//! Client-side form validation.
//!
//! Rules are synchronous and stateless. A [`Form`] applies them per field as
//! the user types (never blocking input) and to every field on submit,
//! where any violation blocks submission. Each field carries its inline
//! error message and error-class flag, which are always attached and removed
//! together.

pub mod forms;
pub mod password;

pub use forms::{
    login_form, login_request, signup_form, signup_request, upload_form, validate_upload,
};
pub use password::{password_strength, PasswordStrength};

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// True if `value` has the shape of an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// A single field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty after trimming.
    Required,
    /// Value must look like an email address.
    Email,
    /// Value must have at least this many characters.
    MinLength(usize),
}

impl Rule {
    /// Checks a value against the rule.
    ///
    /// Only `Required` rejects an empty value; the other rules let empty
    /// optional fields through.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Rule::Required => {
                if value.trim().is_empty() {
                    return Err(REQUIRED_MESSAGE.to_string());
                }
            }
            Rule::Email => {
                if !value.is_empty() && !is_valid_email(value) {
                    return Err(EMAIL_MESSAGE.to_string());
                }
            }
            Rule::MinLength(min) => {
                if !value.is_empty() && value.chars().count() < *min {
                    return Err(format!("Password must be at least {} characters", min));
                }
            }
        }
        Ok(())
    }
}

/// Checks `value` against `rules` in order and returns the first failure.
pub fn validate_value(rules: &[Rule], value: &str) -> Result<(), String> {
    rules.iter().try_for_each(|rule| rule.check(value))
}

/// A failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field failures of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message recorded for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// One-line description of every failure.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Declaration of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// Current value and inline error of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    error_message: Option<String>,
    error_class: bool,
}

impl FieldState {
    /// Inline error message shown next to the field.
    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the field is styled as invalid.
    pub fn has_error_class(&self) -> bool {
        self.error_class
    }

    fn show_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.error_class = true;
    }

    fn clear_error(&mut self) {
        self.error_message = None;
        self.error_class = false;
    }
}

/// A form made of validated fields.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<(FieldSpec, FieldState)>,
}

impl Form {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|spec| (spec, FieldState::default()))
                .collect(),
        }
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut (FieldSpec, FieldState)> {
        self.fields.iter_mut().find(|(spec, _)| spec.name == name)
    }

    fn state(&self, name: &str) -> Option<&FieldState> {
        self.fields
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, state)| state)
    }

    fn revalidate(spec: &FieldSpec, state: &mut FieldState) -> bool {
        match validate_value(&spec.rules, &state.value) {
            Ok(()) => {
                state.clear_error();
                true
            }
            Err(message) => {
                state.show_error(message);
                false
            }
        }
    }

    /// Records typed input for a field and validates that field alone.
    ///
    /// Input is always accepted; the return value is the inline error now
    /// shown, if any. Unknown field names are ignored.
    pub fn input(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        let (spec, state) = self.entry_mut(name)?;
        state.value = value.into();
        Self::revalidate(spec, state);
        state.error_message.clone()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.state(name).map(|s| s.value.as_str())
    }

    /// Inline error currently shown for a field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.state(name).and_then(FieldState::error)
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.state(name).map_or(false, FieldState::has_error_class)
    }

    /// Validates every field.
    ///
    /// # Returns
    ///
    /// The field values keyed by name, or every failure. Inline errors are
    /// updated either way.
    pub fn submit(&mut self) -> Result<HashMap<String, String>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (spec, state) in &mut self.fields {
            if !Self::revalidate(spec, state) {
                if let Some(message) = state.error() {
                    errors.push(spec.name.clone(), message);
                }
            }
        }
        errors.into_result()?;

        Ok(self
            .fields
            .iter()
            .map(|(spec, state)| (spec.name.clone(), state.value.clone()))
            .collect())
    }
}

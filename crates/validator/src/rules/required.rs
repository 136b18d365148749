//! Required rule
//!
//! Fails for null values and, unless allowed, for empty strings.
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::foundation::{Property, Rule};
//! use keel_validator::rules::required;
//!
//! let rule = required();
//! assert!(rule.evaluate(&Property::new("Name", &Some("x".to_owned()))).is_success());
//! assert!(rule.evaluate(&Property::new("Name", &None::<String>)).is_failure());
//! assert!(rule.evaluate(&Property::new("Name", &String::new())).is_failure());
//! assert!(rule.allow_empty_strings(true).evaluate(&Property::new("Name", &String::new())).is_success());
//! ```

use crate::foundation::{
    Property, PropertyValue, Rule, ValidationError, ValidationResult, render_message,
};
use std::borrow::Cow;

/// Validates that a value is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Required {
    allow_empty_strings: bool,
    message: Option<Cow<'static, str>>,
}

impl Required {
    /// The code carried by this rule's violations.
    pub const CODE: &'static str = "required";

    /// Creates the rule. Empty strings are rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an empty string counts as present.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_empty_strings(mut self, allow: bool) -> Self {
        self.allow_empty_strings = allow;
        self
    }

    /// Overrides the default message. `{name}` expands to the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<V: PropertyValue> Rule<V> for Required {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        let value = property.value();
        if !value.is_null() && (self.allow_empty_strings || !value.is_blank()) {
            return ValidationResult::Success;
        }

        let name = property.name();
        let message = render_message(self.message.as_deref(), name, || {
            format!("The {name} field is required.")
        });
        ValidationResult::failure(ValidationError::new(Self::CODE, message, name.to_owned()))
    }
}

/// Creates a [`Required`] rule.
#[must_use]
pub fn required() -> Required {
    Required::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_rejected(false, Some(""), false)]
    #[case::empty_allowed(true, Some(""), true)]
    #[case::null_rejected(false, None, false)]
    #[case::null_rejected_when_empty_allowed(true, None, false)]
    #[case::present(false, Some("x"), true)]
    #[case::present_when_empty_allowed(true, Some("x"), true)]
    fn test_required_string(
        #[case] allow_empty: bool,
        #[case] value: Option<&str>,
        #[case] valid: bool,
    ) {
        let rule = required().allow_empty_strings(allow_empty);
        let value: Option<String> = value.map(str::to_owned);
        let result = rule.evaluate(&Property::new("Name", &value));
        assert_eq!(result.is_success(), valid);
    }

    #[test]
    fn test_default_message_names_property() {
        let error = required()
            .evaluate(&Property::new("Name", &None::<String>))
            .into_error()
            .unwrap();
        assert_eq!(error.code, "required");
        assert_eq!(error.message, "The Name field is required.");
        assert_eq!(error.member_names.as_slice(), ["Name"]);
    }

    #[test]
    fn test_custom_message() {
        let error = required()
            .with_message("{name} please")
            .evaluate(&Property::new("Email", &None::<String>))
            .into_error()
            .unwrap();
        assert_eq!(error.message, "Email please");
    }

    #[test]
    fn test_non_text_values() {
        assert!(required().evaluate(&Property::new("Age", &Some(0))).is_success());
        assert!(required().evaluate(&Property::new("Age", &None::<i32>)).is_failure());
        assert!(required().evaluate(&Property::new("Age", &7)).is_success());
    }
}

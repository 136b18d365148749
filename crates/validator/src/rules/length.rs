//! String length rule
//!
//! By default, length is measured in Unicode scalar values (chars).
//! Use [`StringLength::bytes`] for byte-length counting when the input is
//! known to be ASCII.

use crate::error::{ConfigError, ConfigResult};
use crate::foundation::{Property, Rule, TextValue, ValidationError, ValidationResult, render_message};
use std::borrow::Cow;

// ============================================================================
// LENGTH MODE
// ============================================================================

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    /// Count bytes (fastest, ASCII-only correct).
    Bytes,
    /// Count Unicode scalar values (correct for all text).
    #[default]
    Chars,
}

impl LengthMode {
    /// Measures the length of a string according to this mode.
    #[inline]
    fn measure(self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

// ============================================================================
// STRING LENGTH
// ============================================================================

/// Validates that a text length lies within `[min, max]`.
///
/// A null value is valid.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule};
/// use keel_validator::rules::string_length;
///
/// let rule = string_length(2, 4).unwrap();
/// assert!(rule.evaluate(&Property::new("Code", "ab")).is_success());
/// assert!(rule.evaluate(&Property::new("Code", "abcde")).is_failure());
/// assert!(rule.evaluate(&Property::new("Code", &None::<String>)).is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLength {
    min: usize,
    max: usize,
    mode: LengthMode,
    message: Option<Cow<'static, str>>,
}

impl StringLength {
    /// The code carried by this rule's violations.
    pub const CODE: &'static str = "string_length";

    /// Creates the rule, counting chars.
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `max < min`.
    pub fn new(min: usize, max: usize) -> ConfigResult<Self> {
        if max < min {
            return Err(ConfigError::InvalidBounds {
                rule: Self::CODE,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            min,
            max,
            mode: LengthMode::Chars,
            message: None,
        })
    }

    /// Switches to byte counting.
    #[must_use = "builder methods must be chained or built"]
    pub fn bytes(mut self) -> Self {
        self.mode = LengthMode::Bytes;
        self
    }

    /// Overrides the default message. `{name}` expands to the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The lower bound (inclusive).
    pub fn min(&self) -> usize {
        self.min
    }

    /// The upper bound (inclusive).
    pub fn max(&self) -> usize {
        self.max
    }

    /// The counting mode.
    pub fn mode(&self) -> LengthMode {
        self.mode
    }
}

impl<V: TextValue + ?Sized> Rule<V> for StringLength {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        let Some(text) = property.value().as_text() else {
            return ValidationResult::Success;
        };
        let length = self.mode.measure(text);
        if (self.min..=self.max).contains(&length) {
            return ValidationResult::Success;
        }

        let name = property.name();
        let message = render_message(self.message.as_deref(), name, || {
            if self.min == 0 {
                format!("The field {name} must be a string with a maximum length of {}.", self.max)
            } else {
                format!(
                    "The field {name} must be a string with a minimum length of {} and a maximum length of {}.",
                    self.min, self.max
                )
            }
        });
        ValidationResult::failure(
            ValidationError::new(Self::CODE, message, name.to_owned())
                .with_param("min", self.min.to_string())
                .with_param("max", self.max.to_string())
                .with_param("actual", length.to_string()),
        )
    }
}

/// Creates a [`StringLength`] rule over `[min, max]`.
pub fn string_length(min: usize, max: usize) -> ConfigResult<StringLength> {
    StringLength::new(min, max)
}

/// Creates a [`StringLength`] rule with no lower bound.
#[must_use]
pub fn max_length(max: usize) -> StringLength {
    StringLength {
        min: 0,
        max,
        mode: LengthMode::Chars,
        message: None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("ab", true)]
    #[case("abcd", true)]
    #[case("abcde", false)]
    fn test_bounds_are_inclusive(#[case] input: &str, #[case] valid: bool) {
        let rule = string_length(2, 4).unwrap();
        assert_eq!(rule.evaluate(&Property::new("Code", input)).is_success(), valid);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            string_length(5, 2),
            Err(ConfigError::InvalidBounds {
                rule: "string_length",
                min: "5".to_owned(),
                max: "2".to_owned(),
            })
        );
    }

    #[test]
    fn test_chars_vs_bytes() {
        let chars = string_length(0, 2).unwrap();
        let bytes = string_length(0, 2).unwrap().bytes();
        // "日本" is 2 chars but 6 bytes
        assert!(chars.evaluate(&Property::new("Title", "日本")).is_success());
        assert!(bytes.evaluate(&Property::new("Title", "日本")).is_failure());
    }

    #[test]
    fn test_null_is_valid() {
        let rule = string_length(1, 3).unwrap();
        assert!(rule.evaluate(&Property::new("Title", &None::<String>)).is_success());
        assert!(rule.evaluate(&Property::new("Title", &Some(String::new()))).is_failure());
    }

    #[test]
    fn test_error_params() {
        let error = max_length(3)
            .evaluate(&Property::new("Title", "abcdef"))
            .into_error()
            .unwrap();
        assert_eq!(error.code, "string_length");
        assert_eq!(error.param("actual"), Some("6"));
        assert_eq!(
            error.message,
            "The field Title must be a string with a maximum length of 3."
        );
    }
}

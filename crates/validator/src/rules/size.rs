//! Collection size rule

use crate::error::{ConfigError, ConfigResult};
use crate::foundation::{
    Property, Rule, SequenceValue, ValidationError, ValidationResult, render_message,
};
use std::borrow::Cow;

/// Validates that a sequence's element count lies within `[min, max]`.
///
/// A null sequence is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    min: usize,
    max: usize,
    message: Option<Cow<'static, str>>,
}

impl Size {
    /// The code carried by this rule's violations.
    pub const CODE: &'static str = "size";

    /// Creates the rule.
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
            message: None,
        })
    }

    /// Overrides the default message. `{name}` expands to the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<V: SequenceValue + ?Sized> Rule<V> for Size {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        let Some(count) = property.value().element_count() else {
            return ValidationResult::Success;
        };
        if (self.min..=self.max).contains(&count) {
            return ValidationResult::Success;
        }

        let name = property.name();
        let message = render_message(self.message.as_deref(), name, || {
            format!(
                "The field {name} must contain between {} and {} items, got {count}.",
                self.min, self.max
            )
        });
        ValidationResult::failure(
            ValidationError::new(Self::CODE, message, name.to_owned())
                .with_param("min", self.min.to_string())
                .with_param("max", self.max.to_string())
                .with_param("actual", count.to_string()),
        )
    }
}

/// Creates a [`Size`] rule over `[min, max]`.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule};
/// use keel_validator::rules::size;
///
/// let rule = size(1, 3).unwrap();
/// assert!(rule.evaluate(&Property::new("Tags", &vec!["a"])).is_success());
/// assert!(rule.evaluate(&Property::new("Tags", &Vec::<&str>::new())).is_failure());
/// ```
pub fn size(min: usize, max: usize) -> ConfigResult<Size> {
    Size::new(min, max)
}

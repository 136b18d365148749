//! Numeric range rules

use std::borrow::Cow;
use std::fmt::Display;

use crate::error::{ConfigError, ConfigResult};
use crate::foundation::{Property, Rule, ValidationError, ValidationResult, render_message};

/// Validates that a value lies within `[min, max]`.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule};
/// use keel_validator::rules::range;
///
/// let rule = range(0, 10).unwrap();
/// assert!(rule.evaluate(&Property::new("Level", &10)).is_success());
/// assert!(rule.evaluate(&Property::new("Level", &11)).is_failure());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Range<N> {
    min: N,
    max: N,
    message: Option<Cow<'static, str>>,
}

impl<N: PartialOrd + Display> Range<N> {
    /// The code carried by this rule's violations.
    pub const CODE: &'static str = "range";

    /// Creates the rule.
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `max < min` or the bounds
    /// do not order (a NaN bound).
    pub fn new(min: N, max: N) -> ConfigResult<Self> {
        let ordered = min.partial_cmp(&min).is_some() && max.partial_cmp(&max).is_some();
        if !ordered || max < min {
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

    /// Accepts `Option<N>`, treating `None` as valid.
    #[must_use]
    pub fn nullable(self) -> NullableRange<N> {
        NullableRange { inner: self }
    }

    fn check(&self, name: &str, value: &N) -> ValidationResult {
        if *value >= self.min && *value <= self.max {
            return ValidationResult::Success;
        }

        let message = render_message(self.message.as_deref(), name, || {
            format!("The field {name} must be between {} and {}.", self.min, self.max)
        });
        ValidationResult::failure(
            ValidationError::new(Self::CODE, message, name.to_owned())
                .with_param("min", self.min.to_string())
                .with_param("max", self.max.to_string())
                .with_param("actual", value.to_string()),
        )
    }
}

impl<N> Rule<N> for Range<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn evaluate(&self, property: &Property<'_, N>) -> ValidationResult {
        self.check(property.name(), property.value())
    }
}

/// [`Range`] over `Option<N>`. `None` is valid; presence is `required()`'s job.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableRange<N> {
    inner: Range<N>,
}

impl<N: PartialOrd + Display> NullableRange<N> {
    /// Creates the rule.
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `max < min` or a bound is NaN.
    pub fn new(min: N, max: N) -> ConfigResult<Self> {
        Range::new(min, max).map(Range::nullable)
    }

    /// Overrides the default message. `{name}` expands to the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: self.inner.with_message(message),
        }
    }
}

impl<N> Rule<Option<N>> for NullableRange<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn evaluate(&self, property: &Property<'_, Option<N>>) -> ValidationResult {
        match property.value() {
            Some(value) => self.inner.check(property.name(), value),
            None => ValidationResult::Success,
        }
    }
}

/// Creates a [`Range`] rule over `[min, max]`.
pub fn range<N: PartialOrd + Display>(min: N, max: N) -> ConfigResult<Range<N>> {
    Range::new(min, max)
}

/// Creates a [`NullableRange`] rule over `[min, max]`.
pub fn nullable_range<N: PartialOrd + Display>(min: N, max: N) -> ConfigResult<NullableRange<N>> {
    NullableRange::new(min, max)
}

//! Adapts a [`Specification`] into a rule

use crate::foundation::{Property, Rule, ValidationError, ValidationResult};
use crate::specification::Specification;
use std::borrow::Cow;

/// Fails when the wrapped specification is not satisfied.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule};
/// use keel_validator::rules::satisfies;
/// use keel_validator::specification::Specification;
///
/// let even = Specification::new(|n: &i32| n % 2 == 0);
/// let rule = satisfies(even, "{name} must be even.");
///
/// let error = rule.evaluate(&Property::new("Count", &3)).into_error().unwrap();
/// assert_eq!(error.message, "Count must be even.");
/// ```
pub struct Satisfies<V: ?Sized> {
    specification: Specification<V>,
    message: Cow<'static, str>,
}

impl<V: ?Sized> Satisfies<V> {
    /// The code carried by this rule's violations.
    pub const CODE: &'static str = "specification";

    /// Wraps `specification`. `{name}` in `message` expands to the property name.
    pub fn new(specification: Specification<V>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            specification,
            message: message.into(),
        }
    }

    /// The wrapped specification.
    pub fn specification(&self) -> &Specification<V> {
        &self.specification
    }
}

impl<V: ?Sized> Clone for Satisfies<V> {
    fn clone(&self) -> Self {
        Self {
            specification: self.specification.clone(),
            message: self.message.clone(),
        }
    }
}

impl<V: ?Sized> std::fmt::Debug for Satisfies<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satisfies")
            .field("specification", &self.specification)
            .field("message", &self.message)
            .finish()
    }
}

impl<V: ?Sized + 'static> Rule<V> for Satisfies<V> {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        if self.specification.is_satisfied_by(property.value()) {
            return ValidationResult::Success;
        }
        let name = property.name();
        ValidationResult::failure(ValidationError::new(
            Self::CODE,
            self.message.replace("{name}", name),
            name.to_owned(),
        ))
    }
}

/// Creates a [`Satisfies`] rule.
pub fn satisfies<V: ?Sized>(
    specification: Specification<V>,
    message: impl Into<Cow<'static, str>>,
) -> Satisfies<V> {
    Satisfies::new(specification, message)
}

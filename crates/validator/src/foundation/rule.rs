//! The rule contract
//!
//! A [`Rule`] maps one named property value to a [`ValidationResult`].
//! Rules are `Send + Sync` and are held behind `Arc`, so one configured rule
//! can be shared by any number of property validators.
//!
//! Cross-property rules additionally implement [`PerInstance`]: before
//! evaluation they are specialised against the object that owns the
//! property, which lets them read sibling properties.

use crate::foundation::{Property, ValidationResult};
use std::sync::Arc;

// ============================================================================
// RULE
// ============================================================================

/// Evaluates one property value.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule, ValidationError, ValidationResult};
///
/// struct Even;
///
/// impl Rule<i32> for Even {
///     fn evaluate(&self, property: &Property<'_, i32>) -> ValidationResult {
///         if property.value() % 2 == 0 {
///             ValidationResult::Success
///         } else {
///             ValidationResult::failure(ValidationError::new(
///                 "even",
///                 format!("{} must be even.", property.name()),
///                 property.name().to_owned(),
///             ))
///         }
///     }
/// }
///
/// assert!(Even.evaluate(&Property::new("Count", &4)).is_success());
/// assert!(Even.evaluate(&Property::new("Count", &3)).is_failure());
/// ```
pub trait Rule<V: ?Sized>: Send + Sync {
    /// Evaluates the rule. A failure must name `property`.
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult;
}

impl<V: ?Sized, R: Rule<V> + ?Sized> Rule<V> for &R {
    #[inline]
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        (**self).evaluate(property)
    }
}

impl<V: ?Sized, R: Rule<V> + ?Sized> Rule<V> for Box<R> {
    #[inline]
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        (**self).evaluate(property)
    }
}

impl<V: ?Sized, R: Rule<V> + ?Sized> Rule<V> for Arc<R> {
    #[inline]
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        (**self).evaluate(property)
    }
}

// ============================================================================
// PER-INSTANCE SPECIALISATION
// ============================================================================

/// A rule that must be bound to its owning object before evaluation.
///
/// `T` is the object type and `V` the property value type.
pub trait PerInstance<T: ?Sized, V: ?Sized>: Rule<V> {
    /// Binds the rule to `instance`.
    ///
    /// With no instance the rule returns itself unbound. The result never
    /// mutates `self`.
    fn per_instance<'a>(&'a self, instance: Option<&'a T>) -> Specialized<'a, V>;
}

/// A rule ready for evaluation against one object.
pub enum Specialized<'a, V: ?Sized> {
    /// The original rule, evaluated as is.
    Unbound(&'a dyn Rule<V>),
    /// A transient copy bound to one instance.
    Bound(Box<dyn Rule<V> + 'a>),
}

impl<V: ?Sized> Specialized<'_, V> {
    /// Returns true if the rule was bound to an instance.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl<V: ?Sized> Rule<V> for Specialized<'_, V> {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        match self {
            Self::Unbound(rule) => rule.evaluate(property),
            Self::Bound(rule) => rule.evaluate(property),
        }
    }
}

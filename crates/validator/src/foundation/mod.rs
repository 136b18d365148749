//! Core validation types and traits
//!
//! This module contains the building blocks every other layer is written
//! against:
//!
//! - **Values**: [`Property`], [`PropertyValue`], [`TextValue`], [`SequenceValue`]
//! - **Rules**: [`Rule`], [`PerInstance`], [`Specialized`]
//! - **Outcomes**: [`ValidationResult`], [`ValidationError`]
//! - **Identity**: [`TypeKey`]
//!
//! # Architecture
//!
//! ## 1. One value, one outcome
//!
//! A rule sees exactly one named value and returns either the allocation-free
//! `Success` or a `Failure` naming the property:
//!
//! ```rust
//! use keel_validator::foundation::{Property, Rule};
//! use keel_validator::rules::range;
//!
//! let rule = range(0, 10).unwrap();
//! assert!(rule.evaluate(&Property::new("Age", &10)).is_success());
//! assert!(rule.evaluate(&Property::new("Age", &11)).is_failure());
//! ```
//!
//! ## 2. Capabilities instead of concrete types
//!
//! Leaf rules are generic over a capability trait, so one `StringLength`
//! serves `String`, `Box<str>` and `Option<String>` alike.
//!
//! ## 3. Late binding for cross-property rules
//!
//! Rules that read a sibling property implement [`PerInstance`] and are bound
//! to the owning object right before evaluation.

mod result;
mod rule;
mod type_key;
mod value;

pub use result::{MemberNames, ValidationError, ValidationResult, render_message};
pub use rule::{PerInstance, Rule, Specialized};
pub use type_key::TypeKey;
pub use value::{Property, PropertyValue, SequenceValue, TextValue};

// ============================================================================
// UTILITIES
// ============================================================================

/// Evaluates every rule against one property and keeps only the failures.
///
/// Evaluation never stops early: each rule runs even after a failure.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::{Property, Rule, evaluate_all};
/// use keel_validator::rules::range;
///
/// let rules: Vec<Box<dyn Rule<i32>>> = vec![Box::new(range(0, 5).unwrap()), Box::new(range(10, 20).unwrap())];
/// let errors = evaluate_all(&Property::new("Level", &7), &rules);
/// assert_eq!(errors.len(), 2);
/// ```
pub fn evaluate_all<V, R>(property: &Property<'_, V>, rules: &[R]) -> Vec<ValidationError>
where
    V: ?Sized,
    R: Rule<V>,
{
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(property).into_error())
        .collect()
}

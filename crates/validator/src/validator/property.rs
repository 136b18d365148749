//! Ordered rules for one declared property
//!
//! A [`PropertyValidator`] pairs a property name with an accessor closure and
//! an append-only rule list. The list is published through [`ArcSwap`], so
//! evaluation never takes a lock and configuration may keep appending rules
//! while other threads validate.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::RegistryConfig;
use crate::foundation::{
    PerInstance, Property, PropertyValue, Rule, TypeKey, ValidationError,
};

type Accessor<T, V> = Arc<dyn Fn(&T) -> &V + Send + Sync>;

/// Code of the violation synthesised for a null value on a non-nullable property.
pub const VALUE_CANNOT_BE_NULL: &str = "value_cannot_be_null";

/// Code of the violation synthesised for a value of the wrong run-time type.
pub const INVALID_VALUE_TYPE: &str = "invalid_value_type";

// ============================================================================
// RULE ENTRY
// ============================================================================

enum RuleEntry<T: ?Sized, V> {
    Value(Arc<dyn Rule<V>>),
    PerInstance(Arc<dyn PerInstance<T, V>>),
}

impl<T: ?Sized, V> Clone for RuleEntry<T, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(rule) => Self::Value(Arc::clone(rule)),
            Self::PerInstance(rule) => Self::PerInstance(Arc::clone(rule)),
        }
    }
}

// ============================================================================
// PROPERTY VALIDATOR
// ============================================================================

/// Validates one property of `T` whose value type is `V`.
///
/// Obtained from [`ObjectValidator::property`](crate::validator::ObjectValidator::property).
/// Rules run in the order they were applied and every rule runs, so one pass
/// reports every violation.
///
/// # Examples
///
/// ```rust
/// use keel_validator::registry::ValidatorRegistry;
/// use keel_validator::rules::{required, string_length};
///
/// struct User {
///     name: String,
/// }
///
/// let registry = ValidatorRegistry::new();
/// let name = registry.for_type::<User>().property("Name", |u: &User| &u.name).unwrap();
/// name.apply(required()).apply(string_length(2, 20).unwrap());
///
/// let errors = name.validate_object(&User { name: String::new() });
/// assert_eq!(errors.len(), 2);
/// assert!(name.validate_value(&"Ada".to_owned()).is_empty());
/// ```
pub struct PropertyValidator<T: ?Sized, V> {
    name: Cow<'static, str>,
    accessor: Accessor<T, V>,
    rules: ArcSwap<Vec<RuleEntry<T, V>>>,
    config: Arc<RegistryConfig>,
}

impl<T, V> PropertyValidator<T, V>
where
    T: ?Sized + 'static,
    V: PropertyValue,
{
    pub(crate) fn new<F>(name: Cow<'static, str>, accessor: F, config: Arc<RegistryConfig>) -> Self
    where
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Arc::new(accessor),
            rules: ArcSwap::from_pointee(Vec::new()),
            config,
        }
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of rules applied so far.
    pub fn rule_count(&self) -> usize {
        self.rules.load().len()
    }

    /// Appends a rule.
    pub fn apply<R>(&self, rule: R) -> &Self
    where
        R: Rule<V> + 'static,
    {
        self.push(RuleEntry::Value(Arc::new(rule)))
    }

    /// Appends a rule that is already shared with other validators.
    pub fn apply_shared(&self, rule: Arc<dyn Rule<V>>) -> &Self {
        self.push(RuleEntry::Value(rule))
    }

    /// Appends a cross-property rule, bound to the owning object on every pass.
    pub fn apply_per_instance<R>(&self, rule: R) -> &Self
    where
        R: PerInstance<T, V> + 'static,
    {
        self.push(RuleEntry::PerInstance(Arc::new(rule)))
    }

    fn push(&self, entry: RuleEntry<T, V>) -> &Self {
        self.rules.rcu(|rules| {
            let mut next = Vec::with_capacity(rules.len() + 1);
            next.extend(rules.iter().cloned());
            next.push(entry.clone());
            next
        });
        self
    }

    /// Reads the property from `instance` and runs every rule.
    ///
    /// Cross-property rules are bound to `instance` first.
    pub fn validate_object(&self, instance: &T) -> Vec<ValidationError> {
        self.run((self.accessor)(instance), Some(instance))
    }

    /// Runs every rule against a bare value.
    ///
    /// There is no owning object, so cross-property rules succeed.
    pub fn validate_value(&self, value: &V) -> Vec<ValidationError> {
        self.run(value, None)
    }

    /// Runs every rule against an untyped value.
    ///
    /// `None` is the null value. A null value on a non-nullable property and
    /// a value of the wrong run-time type each produce one synthesised
    /// violation instead of running the rules.
    pub fn validate_untyped(&self, value: Option<&dyn Any>) -> Vec<ValidationError> {
        match value {
            None => match V::null() {
                Some(null) => self.validate_value(&null),
                None => vec![self.synthesised(VALUE_CANNOT_BE_NULL, self.config.null_value(&self.name))],
            },
            Some(value) => match V::from_any(value) {
                Some(typed) => self.validate_value(&typed),
                None => vec![
                    self.synthesised(INVALID_VALUE_TYPE, self.config.invalid_type(&self.name))
                        .with_param("expected", type_name::<V>()),
                ],
            },
        }
    }

    fn run(&self, value: &V, instance: Option<&T>) -> Vec<ValidationError> {
        let property = Property::new(&self.name, value);
        self.rules
            .load()
            .iter()
            .filter_map(|entry| match entry {
                RuleEntry::Value(rule) => rule.evaluate(&property).into_error(),
                RuleEntry::PerInstance(rule) => {
                    rule.per_instance(instance).evaluate(&property).into_error()
                }
            })
            .map(|error| self.named(error))
            .collect()
    }

    /// A violation always names at least its own property.
    fn named(&self, mut error: ValidationError) -> ValidationError {
        if error.member_names.is_empty() {
            error.member_names.push(self.name.clone());
        }
        error
    }

    fn synthesised(&self, code: &'static str, message: String) -> ValidationError {
        ValidationError::new(code, message, self.name.clone())
    }
}

impl<T: ?Sized, V> fmt::Debug for PropertyValidator<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyValidator")
            .field("name", &self.name)
            .field("value_type", &type_name::<V>())
            .field("rules", &self.rules.load().len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TYPE ERASURE
// ============================================================================

/// Object-safe view of a property validator, independent of its value type.
pub(crate) trait ErasedProperty<T: ?Sized>: Send + Sync {
    fn value_type(&self) -> TypeKey;
    fn validate_object(&self, instance: &T) -> Vec<ValidationError>;
    fn validate_untyped(&self, value: Option<&dyn Any>) -> Vec<ValidationError>;
}

impl<T, V> ErasedProperty<T> for PropertyValidator<T, V>
where
    T: ?Sized + 'static,
    V: PropertyValue,
{
    fn value_type(&self) -> TypeKey {
        TypeKey::of::<V>()
    }

    fn validate_object(&self, instance: &T) -> Vec<ValidationError> {
        Self::validate_object(self, instance)
    }

    fn validate_untyped(&self, value: Option<&dyn Any>) -> Vec<ValidationError> {
        Self::validate_untyped(self, value)
    }
}

// ============================================================================
// TESTS
// ============================================================================

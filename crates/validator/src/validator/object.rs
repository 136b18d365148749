//! Property validators grouped by declared type
//!
//! An [`ObjectValidator`] owns one [`PropertyValidator`] per declared
//! property, kept in declaration order. Results always come out in that
//! order, whichever subset of properties runs.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::config::RegistryConfig;
use crate::error::{ConfigError, ConfigResult, ContractError};
use crate::foundation::{PropertyValue, TypeKey, ValidationError};
use crate::validator::property::{ErasedProperty, PropertyValidator};

// ============================================================================
// OBJECT VALIDATE
// ============================================================================

/// Validation of instances of `T`, as seen by the registry.
///
/// Implemented by [`ObjectValidator`] for its own type and by the projected
/// and composite validators the registry builds for compatible types.
pub trait ObjectValidate<T: ?Sized>: Send + Sync {
    /// The type whose rules this validator runs.
    fn declared_type(&self) -> TypeKey;

    /// Runs every property validator.
    fn validate_object(&self, instance: &T) -> Vec<ValidationError>;

    /// Runs only the named properties. Unknown names are ignored.
    fn validate_members(&self, instance: &T, members: &[&str]) -> Vec<ValidationError>;

    /// Validates a bare untyped value with one property validator.
    ///
    /// An unknown property yields no violations.
    fn validate_property(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError>;
}

// ============================================================================
// OBJECT VALIDATOR
// ============================================================================

struct PropertySlot<T: ?Sized> {
    erased: Arc<dyn ErasedProperty<T>>,
    typed: Arc<dyn Any + Send + Sync>,
}

impl<T: ?Sized> Clone for PropertySlot<T> {
    fn clone(&self) -> Self {
        Self {
            erased: Arc::clone(&self.erased),
            typed: Arc::clone(&self.typed),
        }
    }
}

/// Every property validator declared for `T`.
///
/// # Examples
///
/// ```rust
/// use keel_validator::registry::ValidatorRegistry;
/// use keel_validator::rules::{range, required};
///
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// let registry = ValidatorRegistry::new();
/// let person = registry.for_type::<Person>();
/// person.property("Name", |p: &Person| &p.name)?.apply(required());
/// person.property("Age", |p: &Person| &p.age)?.apply(range(0, 130)?);
///
/// let invalid = Person { name: String::new(), age: 200 };
/// assert_eq!(person.validate_object(&invalid).len(), 2);
/// assert_eq!(person.validate_members(&invalid, &["Age"]).len(), 1);
/// # Ok::<(), keel_validator::error::ConfigError>(())
/// ```
pub struct ObjectValidator<T: ?Sized> {
    properties: ArcSwap<IndexMap<Cow<'static, str>, PropertySlot<T>>>,
    build_lock: Mutex<()>,
    config: Arc<RegistryConfig>,
}

impl<T: ?Sized + 'static> ObjectValidator<T> {
    /// Creates an empty validator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Arc::new(RegistryConfig::default()))
    }

    /// Creates an empty validator sharing `config`.
    pub fn with_config(config: Arc<RegistryConfig>) -> Self {
        Self {
            properties: ArcSwap::from_pointee(IndexMap::new()),
            build_lock: Mutex::new(()),
            config,
        }
    }

    /// Fetches or creates the validator for property `name`.
    ///
    /// The first call fixes the accessor and value type; later calls return
    /// the same validator so rules accumulate.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPropertyName`] if `name` is empty
    /// - [`ConfigError::PropertyTypeConflict`] if `name` was declared with another value type
    pub fn property<V, F>(
        &self,
        name: impl Into<Cow<'static, str>>,
        accessor: F,
    ) -> ConfigResult<Arc<PropertyValidator<T, V>>>
    where
        V: PropertyValue,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyPropertyName {
                declared_type: type_name::<T>(),
            });
        }

        if let Some(slot) = self.properties.load().get(&*name) {
            return Self::typed_slot(slot, &name);
        }

        let _guard = self.build_lock.lock();
        let current = self.properties.load_full();
        if let Some(slot) = current.get(&*name) {
            return Self::typed_slot(slot, &name);
        }

        let validator = Arc::new(PropertyValidator::new(
            name.clone(),
            accessor,
            Arc::clone(&self.config),
        ));
        let mut next = IndexMap::clone(&current);
        next.insert(
            name.clone(),
            PropertySlot {
                erased: Arc::clone(&validator) as Arc<dyn ErasedProperty<T>>,
                typed: Arc::clone(&validator) as Arc<dyn Any + Send + Sync>,
            },
        );
        self.properties.store(Arc::new(next));

        tracing::debug!(
            declared_type = type_name::<T>(),
            property = %name,
            value_type = type_name::<V>(),
            "property validator created"
        );
        Ok(validator)
    }

    fn typed_slot<V: PropertyValue>(
        slot: &PropertySlot<T>,
        name: &str,
    ) -> ConfigResult<Arc<PropertyValidator<T, V>>> {
        Arc::clone(&slot.typed)
            .downcast::<PropertyValidator<T, V>>()
            .map_err(|_| ConfigError::PropertyTypeConflict {
                declared_type: type_name::<T>(),
                property: name.to_owned(),
                existing: slot.erased.value_type().name(),
                requested: type_name::<V>(),
            })
    }

    /// Declared property names, in declaration order.
    pub fn property_names(&self) -> Vec<String> {
        self.properties
            .load()
            .keys()
            .map(|name| name.to_string())
            .collect()
    }

    /// Returns true if `name` has been declared.
    pub fn contains_property(&self, name: &str) -> bool {
        self.properties.load().contains_key(name)
    }

    /// The number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.load().len()
    }

    /// Returns true if no property has been declared.
    pub fn is_empty(&self) -> bool {
        self.properties.load().is_empty()
    }

    /// Runs every property validator, in declaration order.
    pub fn validate_object(&self, instance: &T) -> Vec<ValidationError> {
        self.properties
            .load()
            .values()
            .flat_map(|slot| slot.erased.validate_object(instance))
            .collect()
    }

    /// Runs the named property validators, in declaration order.
    ///
    /// Unknown names are ignored.
    pub fn validate_members(&self, instance: &T, members: &[&str]) -> Vec<ValidationError> {
        let wanted = |name: &str| members.contains(&name);
        self.properties
            .load()
            .iter()
            .filter(|(name, _)| wanted(name))
            .flat_map(|(_, slot)| slot.erased.validate_object(instance))
            .collect()
    }

    /// Validates a bare untyped value against property `name`.
    ///
    /// An unknown property yields no violations.
    pub fn validate_property(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError> {
        match self.properties.load().get(name) {
            Some(slot) => slot.erased.validate_untyped(value),
            None => Vec::new(),
        }
    }
}

impl<T: Any> ObjectValidator<T> {
    /// Erases the instance type for callers that only hold `&dyn Any`.
    pub fn into_untyped(self: Arc<Self>) -> Arc<dyn AnyObjectValidator> {
        self
    }
}

impl<T: ?Sized + 'static> Default for ObjectValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObjectValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = self.properties.load();
        f.debug_struct("ObjectValidator")
            .field("declared_type", &type_name::<T>())
            .field("properties", &properties.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> ObjectValidate<T> for ObjectValidator<T> {
    fn declared_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn validate_object(&self, instance: &T) -> Vec<ValidationError> {
        Self::validate_object(self, instance)
    }

    fn validate_members(&self, instance: &T, members: &[&str]) -> Vec<ValidationError> {
        Self::validate_members(self, instance, members)
    }

    fn validate_property(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError> {
        Self::validate_property(self, name, value)
    }
}

// ============================================================================
// UNTYPED SURFACE
// ============================================================================

/// An object validator driven with untyped instances.
///
/// Handing in an instance of the wrong type is a contract fault, reported as
/// [`ContractError::InstanceTypeMismatch`] rather than as a violation.
pub trait AnyObjectValidator: Send + Sync {
    /// The type whose rules this validator runs.
    fn declared_type(&self) -> TypeKey;

    /// Runs every property validator against `instance`.
    fn validate_any(&self, instance: &dyn Any) -> Result<Vec<ValidationError>, ContractError>;

    /// Runs the named property validators against `instance`.
    fn validate_any_members(
        &self,
        instance: &dyn Any,
        members: &[&str],
    ) -> Result<Vec<ValidationError>, ContractError>;

    /// Validates a bare untyped value against property `name`.
    fn validate_property_any(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError>;
}

impl<T: Any> ObjectValidator<T> {
    fn downcast_instance<'a>(&self, instance: &'a dyn Any) -> Result<&'a T, ContractError> {
        instance
            .downcast_ref::<T>()
            .ok_or(ContractError::InstanceTypeMismatch {
                expected: type_name::<T>(),
            })
    }
}

impl<T: Any> AnyObjectValidator for ObjectValidator<T> {
    fn declared_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn validate_any(&self, instance: &dyn Any) -> Result<Vec<ValidationError>, ContractError> {
        let instance = self.downcast_instance(instance)?;
        Ok(self.validate_object(instance))
    }

    fn validate_any_members(
        &self,
        instance: &dyn Any,
        members: &[&str],
    ) -> Result<Vec<ValidationError>, ContractError> {
        let instance = self.downcast_instance(instance)?;
        Ok(self.validate_members(instance, members))
    }

    fn validate_property_any(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError> {
        self.validate_property(name, value)
    }
}

// ============================================================================
// TESTS
// ============================================================================

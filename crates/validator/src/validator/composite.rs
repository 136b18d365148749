//! Validators the registry synthesises during resolution
//!
//! A [`Projected`] validator runs the rules of a declared type `D` against a
//! requested type `R` by projecting `&R` to `&D`. A [`CompositeValidator`]
//! runs several validators for the same instance type and unions their
//! results.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::foundation::{TypeKey, ValidationError};
use crate::validator::object::ObjectValidate;

pub(crate) type Projection<R, D> = Arc<dyn Fn(&R) -> &D + Send + Sync>;

// ============================================================================
// PROJECTED
// ============================================================================

/// Runs a `D` validator against instances of `R`.
pub struct Projected<R: ?Sized, D: ?Sized> {
    inner: Arc<dyn ObjectValidate<D>>,
    projection: Projection<R, D>,
}

impl<R: ?Sized, D: ?Sized> Projected<R, D> {
    /// Wraps `inner` behind `projection`.
    pub fn new<F>(inner: Arc<dyn ObjectValidate<D>>, projection: F) -> Self
    where
        F: Fn(&R) -> &D + Send + Sync + 'static,
    {
        Self {
            inner,
            projection: Arc::new(projection),
        }
    }

    pub(crate) fn from_shared(inner: Arc<dyn ObjectValidate<D>>, projection: Projection<R, D>) -> Self {
        Self { inner, projection }
    }
}

impl<R: ?Sized, D: ?Sized> Clone for Projected<R, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            projection: Arc::clone(&self.projection),
        }
    }
}

impl<R: ?Sized, D: ?Sized> fmt::Debug for Projected<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projected")
            .field("requested", &type_name::<R>())
            .field("declared", &self.inner.declared_type())
            .finish()
    }
}

impl<R: ?Sized, D: ?Sized> ObjectValidate<R> for Projected<R, D> {
    fn declared_type(&self) -> TypeKey {
        self.inner.declared_type()
    }

    fn validate_object(&self, instance: &R) -> Vec<ValidationError> {
        self.inner.validate_object((self.projection)(instance))
    }

    fn validate_members(&self, instance: &R, members: &[&str]) -> Vec<ValidationError> {
        self.inner
            .validate_members((self.projection)(instance), members)
    }

    fn validate_property(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError> {
        self.inner.validate_property(name, value)
    }
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// Runs every part and concatenates their violations, part by part.
pub struct CompositeValidator<T: ?Sized> {
    parts: Vec<Arc<dyn ObjectValidate<T>>>,
}

impl<T: ?Sized> CompositeValidator<T> {
    /// Creates a composite over `parts`, run in the given order.
    pub fn new(parts: Vec<Arc<dyn ObjectValidate<T>>>) -> Self {
        Self { parts }
    }

    /// The wrapped validators.
    pub fn parts(&self) -> &[Arc<dyn ObjectValidate<T>>] {
        &self.parts
    }

    /// The number of wrapped validators.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Declared types of every part, in run order.
    pub fn declared_types(&self) -> Vec<TypeKey> {
        self.parts.iter().map(|part| part.declared_type()).collect()
    }
}

impl<T: ?Sized> fmt::Debug for CompositeValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("requested", &type_name::<T>())
            .field("parts", &self.declared_types())
            .finish()
    }
}

impl<T: ?Sized + 'static> ObjectValidate<T> for CompositeValidator<T> {
    fn declared_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn validate_object(&self, instance: &T) -> Vec<ValidationError> {
        self.parts
            .iter()
            .flat_map(|part| part.validate_object(instance))
            .collect()
    }

    fn validate_members(&self, instance: &T, members: &[&str]) -> Vec<ValidationError> {
        self.parts
            .iter()
            .flat_map(|part| part.validate_members(instance, members))
            .collect()
    }

    fn validate_property(&self, name: &str, value: Option<&dyn Any>) -> Vec<ValidationError> {
        self.parts
            .iter()
            .flat_map(|part| part.validate_property(name, value))
            .collect()
    }
}

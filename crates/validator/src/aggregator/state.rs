//! Validation state owned by one observable object

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::aggregator::{ErrorContainer, ErrorEvent};
use crate::context::ValidationContext;
use crate::foundation::ValidationError;
use crate::registry::ValidatorRegistry;

/// Runs the registry for one object and keeps its errors.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use keel_validator::aggregator::ValidationState;
/// use keel_validator::registry::ValidatorRegistry;
/// use keel_validator::rules::required;
///
/// struct Contact {
///     email: String,
/// }
///
/// let registry = Arc::new(ValidatorRegistry::new());
/// registry.for_type::<Contact>().property("Email", |c: &Contact| &c.email)?.apply(required());
///
/// let mut state = ValidationState::new(Arc::clone(&registry));
/// let mut contact = Contact { email: String::new() };
/// assert!(!state.validate_all(&contact));
///
/// contact.email = "a@example.com".to_owned();
/// assert!(state.validate_member(&contact, "Email"));
/// assert!(state.is_valid());
/// # Ok::<(), keel_validator::error::ConfigError>(())
/// ```
pub struct ValidationState<T: ?Sized> {
    registry: Arc<ValidatorRegistry>,
    errors: ErrorContainer,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + 'static> ValidationState<T> {
    /// Creates a state with no errors.
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            registry,
            errors: ErrorContainer::new(),
            _marker: PhantomData,
        }
    }

    /// Runs a full-object pass and files its results.
    ///
    /// Returns true if `instance` is valid.
    pub fn validate_all(&mut self, instance: &T) -> bool {
        let mut results = Vec::new();
        let valid = self
            .registry
            .try_validate_object(&ValidationContext::new(instance), &mut results);
        self.errors.apply_object_results(results);
        valid
    }

    /// Runs a pass scoped to `member` and files its results under `member`.
    ///
    /// Returns true if the member is valid.
    pub fn validate_member(&mut self, instance: &T, member: &str) -> bool {
        let mut results = Vec::new();
        let ctx = ValidationContext::new(instance).with_member(member);
        let valid = self.registry.try_validate_object(&ctx, &mut results);
        self.errors.apply_property_results(member, results);
        valid
    }

    /// Violations filed under `property`.
    pub fn errors_for(&self, property: &str) -> &[ValidationError] {
        self.errors.errors_for(property)
    }

    /// Returns true if any violation is filed.
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Returns true if no violation is filed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }

    /// The underlying container.
    pub fn errors(&self) -> &ErrorContainer {
        &self.errors
    }

    /// Registers a callback for every change.
    pub fn subscribe(&mut self, subscriber: impl Fn(&ErrorEvent) + Send + Sync + 'static) {
        self.errors.subscribe(subscriber);
    }
}

impl<T: ?Sized> fmt::Debug for ValidationState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationState")
            .field("type", &std::any::type_name::<T>())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

//! Type-indexed validator registry
//!
//! The registry owns one [`ObjectValidator`] per declared type and resolves a
//! requested type to the validators that apply to it:
//!
//! 1. the validator registered for exactly that type, if there is one;
//! 2. otherwise every validator whose declared type the requested type was
//!    declared compatible with, through [`ValidatorRegistry::declare_compatible`].
//!
//! No match is not an error: the instance is simply unvalidated. Several
//! matches are aggregated into a [`CompositeValidator`] that is rebuilt on
//! every lookup, so registrations made later are always picked up.
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::context::ValidationContext;
//! use keel_validator::registry::ValidatorRegistry;
//! use keel_validator::rules::{range, required};
//!
//! struct Address {
//!     city: String,
//! }
//!
//! struct Customer {
//!     address: Address,
//!     age: u8,
//! }
//!
//! let registry = ValidatorRegistry::new();
//! registry
//!     .for_type::<Address>()
//!     .property("City", |a: &Address| &a.city)?
//!     .apply(required());
//! registry.declare_compatible(|c: &Customer| &c.address);
//!
//! let customer = Customer { address: Address { city: String::new() }, age: 30 };
//! let mut results = Vec::new();
//! assert!(!registry.try_validate_object(&ValidationContext::new(&customer), &mut results));
//! assert_eq!(results[0].member_names.as_slice(), ["City"]);
//! # Ok::<(), keel_validator::error::ConfigError>(())
//! ```

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::config::RegistryConfig;
use crate::context::ValidationContext;
use crate::error::{ContractError, Error, ValidationFault};
use crate::foundation::{TypeKey, ValidationError};
use crate::validator::composite::Projection;
use crate::validator::{CompositeValidator, ObjectValidate, ObjectValidator, Projected};

// ============================================================================
// REGISTRATIONS
// ============================================================================

#[derive(Clone)]
struct Registration {
    validator: Arc<dyn Any + Send + Sync>,
}

impl Registration {
    fn typed<T: ?Sized + 'static>(&self) -> Option<Arc<ObjectValidator<T>>> {
        Arc::clone(&self.validator)
            .downcast::<ObjectValidator<T>>()
            .ok()
    }
}

type Entries = IndexMap<TypeKey, Registration>;

/// Builds the projected validator for one compatibility relation, if the
/// target type has a registered validator.
struct Binder<R: ?Sized>(Box<dyn Fn(&Entries) -> Option<Arc<dyn ObjectValidate<R>>> + Send + Sync>);

#[derive(Clone)]
struct Relation {
    target: TypeKey,
    binder: Arc<dyn Any + Send + Sync>,
}

type Relations = IndexMap<TypeKey, Vec<Relation>>;

// ============================================================================
// VALIDATOR REGISTRY
// ============================================================================

/// Declared type → [`ObjectValidator`] store with covariant resolution.
///
/// Lookups and validation never lock. Registration serialises behind one
/// coarse lock and publishes a fresh map, so a validator is built at most
/// once even under concurrent first access.
pub struct ValidatorRegistry {
    entries: ArcSwap<Entries>,
    relations: ArcSwap<Relations>,
    build_lock: Mutex<()>,
    config: Arc<RegistryConfig>,
}

impl ValidatorRegistry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry. Every validator it creates shares `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: ArcSwap::from_pointee(IndexMap::new()),
            relations: ArcSwap::from_pointee(IndexMap::new()),
            build_lock: Mutex::new(()),
            config: Arc::new(config),
        }
    }

    /// The shared configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates or returns the validator for exactly `T`.
    ///
    /// Idempotent: every call for the same `T` returns the same validator.
    pub fn for_type<T: ?Sized + 'static>(&self) -> Arc<ObjectValidator<T>> {
        let key = TypeKey::of::<T>();
        if let Some(validator) = self.registered::<T>() {
            return validator;
        }

        let _guard = self.build_lock.lock();
        let current = self.entries.load_full();
        if let Some(validator) = current.get(&key).and_then(Registration::typed::<T>) {
            return validator;
        }

        let validator = Arc::new(ObjectValidator::<T>::with_config(Arc::clone(&self.config)));
        let mut next = Entries::clone(&current);
        next.insert(
            key,
            Registration {
                validator: Arc::clone(&validator) as Arc<dyn Any + Send + Sync>,
            },
        );
        self.entries.store(Arc::new(next));

        tracing::debug!(declared_type = key.name(), "object validator registered");
        validator
    }

    /// Returns the validator for exactly `T` without creating one.
    pub fn registered<T: ?Sized + 'static>(&self) -> Option<Arc<ObjectValidator<T>>> {
        self.entries
            .load()
            .get(&TypeKey::of::<T>())
            .and_then(Registration::typed::<T>)
    }

    /// Declares that instances of `R` are validated by `D`'s rules, reached
    /// through `projection`.
    ///
    /// Relations are kept in declaration order. Declaring the same pair
    /// again keeps the first projection.
    pub fn declare_compatible<R, D, F>(&self, projection: F) -> &Self
    where
        R: ?Sized + 'static,
        D: ?Sized + 'static,
        F: Fn(&R) -> &D + Send + Sync + 'static,
    {
        let requested = TypeKey::of::<R>();
        let target = TypeKey::of::<D>();

        let _guard = self.build_lock.lock();
        let current = self.relations.load_full();
        let known = current
            .get(&requested)
            .is_some_and(|relations| relations.iter().any(|r| r.target == target));
        if known {
            return self;
        }

        let projection: Projection<R, D> = Arc::new(projection);
        let binder = Binder::<R>(Box::new(move |entries: &Entries| {
            let validator = entries.get(&target)?.typed::<D>()?;
            let projected = Projected::from_shared(
                validator as Arc<dyn ObjectValidate<D>>,
                Arc::clone(&projection),
            );
            Some(Arc::new(projected) as Arc<dyn ObjectValidate<R>>)
        }));

        let mut next = Relations::clone(&current);
        next.entry(requested).or_default().push(Relation {
            target,
            binder: Arc::new(binder),
        });
        self.relations.store(Arc::new(next));

        tracing::debug!(
            requested_type = requested.name(),
            declared_type = target.name(),
            "compatibility declared"
        );
        self
    }

    /// Declares `R` compatible with `D` through its [`AsRef`] implementation.
    pub fn implements<R, D>(&self) -> &Self
    where
        R: AsRef<D> + ?Sized + 'static,
        D: ?Sized + 'static,
    {
        self.declare_compatible::<R, D, _>(<R as AsRef<D>>::as_ref)
    }

    /// Resolves the validators that apply to `R`.
    ///
    /// Returns `None` when nothing applies, one validator on a single match,
    /// and a fresh [`CompositeValidator`] on several.
    pub fn resolve<R: ?Sized + 'static>(&self) -> Option<Arc<dyn ObjectValidate<R>>> {
        let requested = TypeKey::of::<R>();
        let entries = self.entries.load();

        if let Some(validator) = entries.get(&requested).and_then(Registration::typed::<R>) {
            self.trace_resolution(requested, "exact", 1);
            return Some(validator as Arc<dyn ObjectValidate<R>>);
        }

        let relations = self.relations.load();
        let mut matches: Vec<Arc<dyn ObjectValidate<R>>> = relations
            .get(&requested)
            .into_iter()
            .flatten()
            .filter_map(|relation| relation.binder.downcast_ref::<Binder<R>>())
            .filter_map(|binder| (binder.0)(&**entries))
            .collect();

        match matches.len() {
            0 => {
                self.trace_resolution(requested, "none", 0);
                None
            }
            1 => {
                self.trace_resolution(requested, "compatible", 1);
                matches.pop()
            }
            count => {
                self.trace_resolution(requested, "composite", count);
                Some(Arc::new(CompositeValidator::new(matches)) as Arc<dyn ObjectValidate<R>>)
            }
        }
    }

    fn trace_resolution(&self, requested: TypeKey, outcome: &'static str, matches: usize) {
        if self.config.trace_resolution {
            tracing::trace!(
                requested_type = requested.name(),
                outcome,
                matches,
                "validator resolved"
            );
        }
    }

    /// Declared types with a registered validator, in registration order.
    pub fn registered_types(&self) -> Vec<TypeKey> {
        self.entries.load().keys().copied().collect()
    }

    /// Removes the validator for exactly `T`. Returns true if one was removed.
    ///
    /// Compatibility relations that target `T` stay declared and resolve
    /// again once `T` is re-registered.
    pub fn unregister<T: ?Sized + 'static>(&self) -> bool {
        let key = TypeKey::of::<T>();
        let _guard = self.build_lock.lock();
        let current = self.entries.load_full();
        if !current.contains_key(&key) {
            return false;
        }
        let mut next = Entries::clone(&current);
        next.shift_remove(&key);
        self.entries.store(Arc::new(next));
        tracing::debug!(declared_type = key.name(), "object validator unregistered");
        true
    }

    // ------------------------------------------------------------------------
    // Object validation
    // ------------------------------------------------------------------------

    /// Runs every validator that applies to `instance`.
    pub fn validate<T: ?Sized + 'static>(&self, instance: &T) -> Vec<ValidationError> {
        self.resolve::<T>()
            .map(|validator| validator.validate_object(instance))
            .unwrap_or_default()
    }

    /// Validates the context's instance, appending every violation to `results`.
    ///
    /// When the context names a member only that member runs. Returns true
    /// iff there were no violations, including when nothing resolves.
    pub fn try_validate_object<T: ?Sized + 'static>(
        &self,
        ctx: &ValidationContext<'_, T>,
        results: &mut Vec<ValidationError>,
    ) -> bool {
        let Some(validator) = self.resolve::<T>() else {
            return true;
        };
        let errors = match ctx.member_name() {
            Some(member) => validator.validate_members(ctx.instance(), &[member]),
            None => validator.validate_object(ctx.instance()),
        };
        let valid = errors.is_empty();
        results.extend(errors);
        valid
    }

    /// Validates the context's instance, failing on the first violation.
    ///
    /// Only the first violation is reported; the rest are discarded.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFault`] carrying the first violation.
    pub fn validate_object<T: ?Sized + 'static>(
        &self,
        ctx: &ValidationContext<'_, T>,
    ) -> Result<(), ValidationFault> {
        let mut results = Vec::new();
        if self.try_validate_object(ctx, &mut results) {
            return Ok(());
        }
        match first_violation(results, ctx.declared_type()) {
            Some(error) => Err(ValidationFault::new(error)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Property validation
    // ------------------------------------------------------------------------

    /// Validates a bare value against the context's member.
    ///
    /// `None` is the null value. Returns `Ok(true)` iff there were no
    /// violations.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::MissingMemberName`] if the context names no member.
    pub fn try_validate_property<T, V>(
        &self,
        ctx: &ValidationContext<'_, T>,
        value: Option<&V>,
        results: &mut Vec<ValidationError>,
    ) -> Result<bool, ContractError>
    where
        T: ?Sized + 'static,
        V: Any,
    {
        self.try_validate_property_any(ctx, value.map(|v| v as &dyn Any), results)
    }

    /// Validates an untyped value against the context's member.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::MissingMemberName`] if the context names no member.
    pub fn try_validate_property_any<T: ?Sized + 'static>(
        &self,
        ctx: &ValidationContext<'_, T>,
        value: Option<&dyn Any>,
        results: &mut Vec<ValidationError>,
    ) -> Result<bool, ContractError> {
        let member = ctx
            .member_name()
            .ok_or(ContractError::MissingMemberName {
                declared_type: ctx.declared_type().name(),
            })?;
        let Some(validator) = self.resolve::<T>() else {
            return Ok(true);
        };
        let errors = validator.validate_property(member, value);
        let valid = errors.is_empty();
        results.extend(errors);
        Ok(valid)
    }

    /// Validates a bare value against the context's member, failing on the
    /// first violation.
    ///
    /// # Errors
    ///
    /// - [`Error::Contract`] if the context names no member
    /// - [`Error::Fault`] carrying the first violation and the `Debug`
    ///   rendering of `value`
    pub fn validate_property<T, V>(
        &self,
        ctx: &ValidationContext<'_, T>,
        value: Option<&V>,
    ) -> Result<(), Error>
    where
        T: ?Sized + 'static,
        V: Any + Debug,
    {
        let mut results = Vec::new();
        if self.try_validate_property(ctx, value, &mut results)? {
            return Ok(());
        }
        let Some(error) = first_violation(results, ctx.declared_type()) else {
            return Ok(());
        };
        let fault = match value {
            Some(value) => ValidationFault::new(error).with_value(format!("{value:?}")),
            None => ValidationFault::new(error),
        };
        Err(fault.into())
    }
}

fn first_violation(results: Vec<ValidationError>, declared_type: TypeKey) -> Option<ValidationError> {
    let discarded = results.len().saturating_sub(1);
    if discarded > 0 {
        tracing::debug!(
            declared_type = declared_type.name(),
            discarded,
            "reporting first violation only"
        );
    }
    results.into_iter().next()
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relations = self.relations.load();
        f.debug_struct("ValidatorRegistry")
            .field("registered", &self.registered_types())
            .field(
                "relations",
                &relations
                    .iter()
                    .map(|(requested, targets)| {
                        (*requested, targets.iter().map(|r| r.target).collect::<Vec<_>>())
                    })
                    .collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================

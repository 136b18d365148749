//! Prelude module for convenient imports.
//!
//! Provides a single `use keel_validator::prelude::*;` import that brings in
//! the registry, the commonly needed traits and types, and every built-in
//! rule.
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::prelude::*;
//!
//! let even = Specification::new(|n: &i32| n % 2 == 0);
//! let small = even.and(|n: &i32| *n < 10);
//! assert!(small.is_satisfied_by(&4));
//! assert!(!small.is_satisfied_by(&12));
//! ```

// ============================================================================
// FOUNDATION: Core traits and outcomes
// ============================================================================

pub use crate::foundation::{
    PerInstance, Property, PropertyValue, Rule, SequenceValue, TextValue, TypeKey,
    ValidationError, ValidationResult,
};

// ============================================================================
// SPECIFICATIONS
// ============================================================================

pub use crate::specification::{IntoSpecification, Specification};

// ============================================================================
// RULES: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::rules::*;

// ============================================================================
// VALIDATORS AND DISPATCH
// ============================================================================

pub use crate::context::ValidationContext;
pub use crate::registry::ValidatorRegistry;
pub use crate::validator::{ObjectValidate, ObjectValidator, PropertyValidator};

// ============================================================================
// AGGREGATION
// ============================================================================

pub use crate::aggregator::{ErrorContainer, ErrorEvent, ValidationState};

// ============================================================================
// ERRORS AND CONFIGURATION
// ============================================================================

pub use crate::config::RegistryConfig;
pub use crate::error::{ConfigError, ContractError, Error, ValidationFault};

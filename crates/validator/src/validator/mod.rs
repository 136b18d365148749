//! Property, object and composite validators
//!
//! - [`PropertyValidator`]: ordered rules for one property
//! - [`ObjectValidator`]: every property validator for one declared type
//! - [`Projected`] and [`CompositeValidator`]: built by the registry when a
//!   requested type resolves through compatibility relations

pub mod composite;
pub mod object;
pub mod property;

pub use composite::{CompositeValidator, Projected};
pub use object::{AnyObjectValidator, ObjectValidate, ObjectValidator};
pub use property::{INVALID_VALUE_TYPE, PropertyValidator, VALUE_CANNOT_BE_NULL};

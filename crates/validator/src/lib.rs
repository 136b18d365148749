//! # keel-validator
//!
//! A declarative validation engine: composable specifications, per-property
//! rule pipelines, a type-dispatched validator registry and per-object error
//! aggregation.
//!
//! ## Quick Start
//!
//! ```rust
//! use keel_validator::prelude::*;
//!
//! struct Booking {
//!     guest: String,
//!     nights: u32,
//!     start: u32,
//!     end: u32,
//! }
//!
//! let registry = ValidatorRegistry::new();
//! let booking = registry.for_type::<Booking>();
//! booking.property("Guest", |b: &Booking| &b.guest)?.apply(required());
//! booking.property("Nights", |b: &Booking| &b.nights)?.apply(range(1, 30)?);
//! booking
//!     .property("Start", |b: &Booking| &b.start)?
//!     .apply_per_instance(less_than("End", |b: &Booking| &b.end));
//!
//! let invalid = Booking { guest: String::new(), nights: 0, start: 9, end: 3 };
//! let errors = registry.validate(&invalid);
//! assert_eq!(errors.len(), 3);
//! assert_eq!(errors[2].member_names.as_slice(), ["Start", "End"]);
//! # Ok::<(), keel_validator::error::ConfigError>(())
//! ```
//!
//! ## Layers
//!
//! - [`specification`]: AND/OR/NOT over predicates, short-circuiting
//! - [`rules`]: built-in leaf and cross-property rules
//! - [`validator`]: property and object validators
//! - [`registry`]: declared type → validator, with covariant resolution
//! - [`aggregator`]: per-object error bookkeeping with change events
//!
//! Custom text rules are one [`text_rule!`] invocation away; anything else
//! implements [`Rule`](foundation::Rule) directly.

// ValidationFault carries a whole ValidationError; the throwing family
// returns it by value on purpose.
#![allow(clippy::result_large_err)]
// Accessor and binder closures are spelled out as trait objects.
#![allow(clippy::type_complexity)]

pub mod aggregator;
pub mod config;
pub mod context;
pub mod error;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod specification;
pub mod validator;

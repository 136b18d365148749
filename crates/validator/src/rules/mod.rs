//! Built-in rules
//!
//! Every rule implements [`Rule`](crate::foundation::Rule) and accepts a
//! custom message through `with_message`. In a custom message the token
//! `{name}` expands to the property name.
//!
//! # Categories
//!
//! - **Presence**: [`Required`]
//! - **Text**: [`StringLength`], [`MatchesRegex`], [`Email`], [`Url`], [`Phone`], [`CreditCard`]
//! - **Numeric**: [`Range`], [`NullableRange`]
//! - **Collection**: [`Size`]
//! - **Cross-property**: [`Comparison`]
//! - **Predicate**: [`Satisfies`]
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::foundation::{Property, Rule};
//! use keel_validator::rules::*;
//!
//! let name = Some("Ada".to_owned());
//! assert!(required().evaluate(&Property::new("Name", &name)).is_success());
//! assert!(string_length(1, 2).unwrap().evaluate(&Property::new("Name", &name)).is_failure());
//! ```

pub mod comparison;
pub mod length;
pub mod pattern;
pub mod range;
pub mod required;
pub mod satisfies;
pub mod size;

pub use comparison::{
    Binding, Comparison, equal_to, greater_or_equal, greater_than, less_or_equal, less_than,
    not_equal_to,
};
pub use length::{LengthMode, StringLength, max_length, string_length};
pub use pattern::{
    CreditCard, Email, MatchesRegex, Phone, Url, credit_card, email, matches_regex, phone, url,
};
pub use range::{NullableRange, Range, nullable_range, range};
pub use required::{Required, required};
pub use satisfies::{Satisfies, satisfies};
pub use size::{Size, size};

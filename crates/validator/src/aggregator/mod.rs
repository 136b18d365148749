//! Error aggregation for observable objects
//!
//! [`MultiValueMap`] is the storage, [`ErrorContainer`] adds the filing and
//! notification rules, and [`ValidationState`] drives a container from a
//! [`ValidatorRegistry`](crate::registry::ValidatorRegistry).

pub mod container;
pub mod multimap;
pub mod state;

pub use container::{ErrorContainer, ErrorEvent};
pub use multimap::MultiValueMap;
pub use state::ValidationState;

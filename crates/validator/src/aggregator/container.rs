//! Per-object error bookkeeping with change notification

use std::fmt;

use indexmap::IndexSet;

use crate::aggregator::MultiValueMap;
use crate::foundation::ValidationError;

/// A change an [`ErrorContainer`] reports to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEvent {
    /// The violations filed under `property` changed.
    ErrorsChanged {
        /// The property whose violations changed
        property: String,
    },
    /// The container went from valid to invalid or back.
    ValidityChanged {
        /// Whether any violation is filed now
        has_errors: bool,
    },
}

type Subscriber = Box<dyn Fn(&ErrorEvent) + Send + Sync>;

/// Violations of one object, filed by property name.
///
/// A violation naming several properties is filed under each of them.
///
/// # Examples
///
/// ```rust
/// use keel_validator::aggregator::ErrorContainer;
/// use keel_validator::foundation::ValidationError;
///
/// let mut errors = ErrorContainer::new();
/// errors.apply_object_results(vec![
///     ValidationError::new("less_than", "End must be less than Start.", "End").with_member("Start"),
/// ]);
/// assert_eq!(errors.errors_for("End").len(), 1);
/// assert_eq!(errors.errors_for("Start").len(), 1);
///
/// errors.apply_object_results(Vec::new());
/// assert!(errors.is_valid());
/// ```
#[derive(Default)]
pub struct ErrorContainer {
    errors: MultiValueMap<String, ValidationError>,
    subscribers: Vec<Subscriber>,
}

impl ErrorContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for every [`ErrorEvent`].
    pub fn subscribe(&mut self, subscriber: impl Fn(&ErrorEvent) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Replaces every violation with the results of a full-object pass.
    ///
    /// Every property that had or now has violations is reported as changed.
    pub fn apply_object_results(&mut self, results: impl IntoIterator<Item = ValidationError>) {
        let had_errors = self.has_errors();
        let mut touched: IndexSet<String> = self.errors.keys().cloned().collect();

        self.errors.clear();
        for error in results {
            for member in &error.member_names {
                self.errors.add(member.to_string(), error.clone());
            }
        }
        touched.extend(self.errors.keys().cloned());

        for property in touched {
            self.notify(&ErrorEvent::ErrorsChanged { property });
        }
        self.notify_validity(had_errors);
    }

    /// Files the results of a single-property pass.
    ///
    /// Clean results remove the property and notify only if it had
    /// violations. Failing results replace its violations and always notify.
    pub fn apply_property_results(
        &mut self,
        property: &str,
        results: impl IntoIterator<Item = ValidationError>,
    ) {
        self.set_range(property, results);
    }

    /// Replaces the violations filed under `property`.
    ///
    /// An empty set removes the property.
    pub fn set_range(&mut self, property: &str, results: impl IntoIterator<Item = ValidationError>) {
        let had_errors = self.has_errors();
        let results: Vec<ValidationError> = results.into_iter().collect();
        let changed = if results.is_empty() {
            self.errors.remove(property).is_some()
        } else {
            self.errors.set_range(property.to_owned(), results);
            true
        };
        if changed {
            self.notify(&ErrorEvent::ErrorsChanged {
                property: property.to_owned(),
            });
        }
        self.notify_validity(had_errors);
    }

    /// Removes the violations filed under `property`.
    pub fn remove(&mut self, property: &str) {
        self.set_range(property, Vec::new());
    }

    /// Removes every violation, reporting each property that had some.
    pub fn clear(&mut self) {
        self.apply_object_results(Vec::new());
    }

    /// Violations filed under `property`.
    pub fn errors_for(&self, property: &str) -> &[ValidationError] {
        self.errors.get(property)
    }

    /// Every filed violation, by property.
    pub fn errors(&self) -> &MultiValueMap<String, ValidationError> {
        &self.errors
    }

    /// Returns true if any violation is filed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if no violation is filed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn notify(&self, event: &ErrorEvent) {
        tracing::trace!(?event, "error container changed");
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }

    fn notify_validity(&self, had_errors: bool) {
        let has_errors = self.has_errors();
        if has_errors != had_errors {
            self.notify(&ErrorEvent::ValidityChanged { has_errors });
        }
    }
}

impl fmt::Debug for ErrorContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContainer")
            .field("errors", &self.errors)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

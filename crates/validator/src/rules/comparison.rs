//! Cross-property comparison rule
//!
//! A [`Comparison`] is declared once on one property and compares its value
//! with a sibling property of the same object. The sibling is read through
//! an accessor closure shared by every bound copy of the rule.
//!
//! The rule only has an opinion once it is bound to an instance. Unbound, for
//! example when a bare value is validated with no owning object, it always
//! succeeds.
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::foundation::{PerInstance, Property, Rule};
//! use keel_validator::rules::less_than;
//!
//! struct Window {
//!     start: u32,
//!     end: u32,
//! }
//!
//! let rule = less_than("Start", |w: &Window| &w.start);
//! let window = Window { start: 5, end: 7 };
//!
//! let bound = rule.per_instance(Some(&window));
//! let error = bound.evaluate(&Property::new("End", &window.end)).into_error().unwrap();
//! assert_eq!(error.member_names.as_slice(), ["End", "Start"]);
//!
//! // Unbound evaluation has nothing to compare against.
//! assert!(rule.evaluate(&Property::new("End", &window.end)).is_success());
//! ```

use crate::foundation::{
    PerInstance, Property, Rule, Specialized, ValidationError, ValidationResult,
};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Accessor<T, V> = Arc<dyn Fn(&T) -> &V + Send + Sync>;
type Predicate<V> = Arc<dyn Fn(&V, &V) -> bool + Send + Sync>;
type Formatter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

// ============================================================================
// BINDING
// ============================================================================

/// Whether a comparison is attached to an instance.
pub enum Binding<'a, T: ?Sized> {
    /// Reusable form held by a property validator.
    Unbound,
    /// Transient form bound to one object for one pass.
    Bound(&'a T),
}

impl<T: ?Sized> Clone for Binding<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Binding<'_, T> {}

impl<T: ?Sized> fmt::Debug for Binding<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => f.write_str("Unbound"),
            Self::Bound(_) => f.write_str("Bound"),
        }
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

struct ComparisonCore<T: ?Sized, V: ?Sized> {
    code: Cow<'static, str>,
    other: Cow<'static, str>,
    accessor: Accessor<T, V>,
    predicate: Predicate<V>,
    formatter: Formatter,
    message: Option<Cow<'static, str>>,
}

impl<T: ?Sized, V: ?Sized> Clone for ComparisonCore<T, V> {
    fn clone(&self) -> Self {
        Self {
            code: self.code.clone(),
            other: self.other.clone(),
            accessor: Arc::clone(&self.accessor),
            predicate: Arc::clone(&self.predicate),
            formatter: Arc::clone(&self.formatter),
            message: self.message.clone(),
        }
    }
}

/// Compares a property with a sibling property of the same object.
///
/// `predicate(value, other)` must hold for the property to be valid. A
/// failure names this property first and the sibling second.
pub struct Comparison<'b, T: ?Sized, V: ?Sized> {
    core: Arc<ComparisonCore<T, V>>,
    binding: Binding<'b, T>,
}

impl<T: ?Sized + 'static, V: ?Sized + 'static> Comparison<'static, T, V> {
    /// The code carried by violations of rules built with [`Comparison::new`].
    pub const CODE: &'static str = "compare";

    /// Creates an unbound comparison.
    ///
    /// - `other`: the sibling property's name, used in messages and member names
    /// - `accessor`: reads the sibling value from the owning object
    /// - `predicate`: `predicate(value, other_value)` holds when valid
    /// - `formatter`: builds the default message from `(name, other)`
    pub fn new<A, P, F>(
        other: impl Into<Cow<'static, str>>,
        accessor: A,
        predicate: P,
        formatter: F,
    ) -> Self
    where
        A: Fn(&T) -> &V + Send + Sync + 'static,
        P: Fn(&V, &V) -> bool + Send + Sync + 'static,
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        Self::with_code(Self::CODE, other, accessor, predicate, formatter)
    }

    fn with_code<A, P, F>(
        code: &'static str,
        other: impl Into<Cow<'static, str>>,
        accessor: A,
        predicate: P,
        formatter: F,
    ) -> Self
    where
        A: Fn(&T) -> &V + Send + Sync + 'static,
        P: Fn(&V, &V) -> bool + Send + Sync + 'static,
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(ComparisonCore {
                code: Cow::Borrowed(code),
                other: other.into(),
                accessor: Arc::new(accessor),
                predicate: Arc::new(predicate),
                formatter: Arc::new(formatter),
                message: None,
            }),
            binding: Binding::Unbound,
        }
    }

    /// Overrides the default message.
    ///
    /// `{name}` expands to this property's name and `{other}` to the sibling's.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        Arc::make_mut(&mut self.core).message = Some(message.into());
        self
    }
}

impl<'b, T: ?Sized, V: ?Sized> Comparison<'b, T, V> {
    /// The sibling property's name.
    pub fn other_name(&self) -> &str {
        &self.core.other
    }

    /// The current binding.
    pub fn binding(&self) -> Binding<'b, T> {
        self.binding
    }

    /// Returns true if bound to an instance.
    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::Bound(_))
    }

    /// A copy sharing this rule's accessor and formatter, bound to `instance`.
    pub fn bind<'a>(&self, instance: &'a T) -> Comparison<'a, T, V> {
        Comparison {
            core: Arc::clone(&self.core),
            binding: Binding::Bound(instance),
        }
    }

    fn message(&self, name: &str) -> String {
        let other = self.core.other.as_ref();
        match &self.core.message {
            Some(template) => template.replace("{name}", name).replace("{other}", other),
            None => (self.core.formatter)(name, other),
        }
    }
}

impl<T: ?Sized, V: ?Sized> Clone for Comparison<'_, T, V> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            binding: self.binding,
        }
    }
}

impl<T: ?Sized, V: ?Sized> fmt::Debug for Comparison<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparison")
            .field("code", &self.core.code)
            .field("other", &self.core.other)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + Sync, V: ?Sized> Rule<V> for Comparison<'_, T, V> {
    fn evaluate(&self, property: &Property<'_, V>) -> ValidationResult {
        let Binding::Bound(instance) = self.binding else {
            return ValidationResult::Success;
        };

        let other = Property::new(&self.core.other, (self.core.accessor)(instance));
        if (self.core.predicate)(property.value(), other.value()) {
            return ValidationResult::Success;
        }

        let name = property.name();
        ValidationResult::failure(
            ValidationError::new(self.core.code.clone(), self.message(name), name.to_owned())
                .with_member(other.name().to_owned()),
        )
    }
}

impl<T: ?Sized + Sync, V: ?Sized> PerInstance<T, V> for Comparison<'_, T, V> {
    fn per_instance<'a>(&'a self, instance: Option<&'a T>) -> Specialized<'a, V> {
        match instance {
            Some(instance) => Specialized::Bound(Box::new(self.bind(instance))),
            None => Specialized::Unbound(self),
        }
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

macro_rules! comparison_constructors {
    ($(
        $(#[$meta:meta])*
        $factory:ident, $bound:ident, $op:tt, $phrase:literal;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $factory<T, V, A>(
                other: impl Into<Cow<'static, str>>,
                accessor: A,
            ) -> Comparison<'static, T, V>
            where
                T: ?Sized + 'static,
                V: $bound + ?Sized + 'static,
                A: Fn(&T) -> &V + Send + Sync + 'static,
            {
                Comparison::with_code(
                    stringify!($factory),
                    other,
                    accessor,
                    |value: &V, other: &V| value $op other,
                    |name: &str, other: &str| format!(concat!("{} must be ", $phrase, " {}."), name, other),
                )
            }
        )*
    };
}

comparison_constructors! {
    /// The property must equal the sibling property.
    equal_to, PartialEq, ==, "equal to";
    /// The property must differ from the sibling property.
    not_equal_to, PartialEq, !=, "different from";
    /// The property must be less than the sibling property.
    less_than, PartialOrd, <, "less than";
    /// The property must be less than or equal to the sibling property.
    less_or_equal, PartialOrd, <=, "less than or equal to";
    /// The property must be greater than the sibling property.
    greater_than, PartialOrd, >, "greater than";
    /// The property must be greater than or equal to the sibling property.
    greater_or_equal, PartialOrd, >=, "greater than or equal to";
}

// ============================================================================
// TESTS
// ============================================================================

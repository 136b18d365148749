//! Specification algebra - composable boolean predicates
//!
//! A [`Specification`] is an immutable predicate tree over `T`. Leaves wrap a
//! closure; inner nodes combine sub-specifications with AND, OR and NOT.
//! Nodes are reference-counted, so cloning and combining never copy the
//! predicates themselves.
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::specification::Specification;
//!
//! let positive = Specification::new(|n: &i32| *n > 0);
//! let small = positive.and(|n: &i32| *n < 100);
//! let odd_or_zero = Specification::new(|n: &i32| n % 2 != 0).or(|n: &i32| *n == 0);
//!
//! assert!(small.is_satisfied_by(&42));
//! assert!(!small.is_satisfied_by(&142));
//! assert!(odd_or_zero.is_satisfied_by(&0));
//! assert!(small.not().is_satisfied_by(&-1));
//! ```

use std::fmt;
use std::sync::Arc;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

enum Node<T: ?Sized> {
    Leaf(Predicate<T>),
    And(Specification<T>, Specification<T>),
    Or(Specification<T>, Specification<T>),
    Not(Specification<T>),
}

/// An immutable, shareable predicate over `T`.
pub struct Specification<T: ?Sized> {
    node: Arc<Node<T>>,
}

impl<T: ?Sized> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: ?Sized + 'static> Specification<T> {
    /// Wraps a predicate as a leaf.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(Node::Leaf(Box::new(predicate)))
    }

    /// A leaf satisfied by every value.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_: &T| true)
    }

    /// A leaf satisfied by no value.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_: &T| false)
    }

    fn from_node(node: Node<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Evaluates the predicate tree.
    ///
    /// `And` skips its right operand when the left one is false and `Or`
    /// skips it when the left one is true.
    pub fn is_satisfied_by(&self, item: &T) -> bool {
        match &*self.node {
            Node::Leaf(predicate) => predicate(item),
            Node::And(left, right) => left.is_satisfied_by(item) && right.is_satisfied_by(item),
            Node::Or(left, right) => left.is_satisfied_by(item) || right.is_satisfied_by(item),
            Node::Not(inner) => !inner.is_satisfied_by(item),
        }
    }

    /// Conjunction with another specification or a raw predicate.
    #[must_use = "combinators return a new specification"]
    pub fn and(&self, other: impl IntoSpecification<T>) -> Self {
        Self::from_node(Node::And(self.clone(), other.into_specification()))
    }

    /// Disjunction with another specification or a raw predicate.
    #[must_use = "combinators return a new specification"]
    pub fn or(&self, other: impl IntoSpecification<T>) -> Self {
        Self::from_node(Node::Or(self.clone(), other.into_specification()))
    }

    /// Negation.
    #[must_use = "combinators return a new specification"]
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        Self::from_node(Node::Not(self.clone()))
    }

    /// Conjunction of every specification. Empty input is always satisfied.
    pub fn all<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        specs
            .into_iter()
            .reduce(|acc, next| acc.and(next))
            .unwrap_or_else(Self::always)
    }

    /// Disjunction of every specification. Empty input is never satisfied.
    pub fn any<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        specs
            .into_iter()
            .reduce(|acc, next| acc.or(next))
            .unwrap_or_else(Self::never)
    }
}

impl<T: ?Sized> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Leaf(_) => f.write_str("Leaf"),
            Node::And(left, right) => write!(f, "And({left:?}, {right:?})"),
            Node::Or(left, right) => write!(f, "Or({left:?}, {right:?})"),
            Node::Not(inner) => write!(f, "Not({inner:?})"),
        }
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Anything that can act as a [`Specification`] operand.
///
/// Implemented for specifications themselves and for plain predicate
/// closures, which become leaves.
pub trait IntoSpecification<T: ?Sized> {
    /// Performs the conversion.
    fn into_specification(self) -> Specification<T>;
}

impl<T: ?Sized> IntoSpecification<T> for Specification<T> {
    fn into_specification(self) -> Specification<T> {
        self
    }
}

impl<T, F> IntoSpecification<T> for F
where
    T: ?Sized + 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn into_specification(self) -> Specification<T> {
        Specification::new(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

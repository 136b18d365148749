//! Property values and the capabilities rules need from them
//!
//! Rules never see a concrete field type directly. They see a
//! [`Property`] and ask the value for the one capability they care about:
//!
//! - [`PropertyValue`]: nullability and emptiness (used by `Required` and the
//!   untyped entry point).
//! - [`TextValue`]: a string view (length and pattern rules).
//! - [`SequenceValue`]: an element count (size rules).
//!
//! `Option<T>` models a nullable property throughout: `None` is null.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

// ============================================================================
// PROPERTY
// ============================================================================

/// An immutable `(name, value)` pair handed to a rule.
pub struct Property<'a, V: ?Sized> {
    name: &'a str,
    value: &'a V,
}

impl<'a, V: ?Sized> Property<'a, V> {
    /// Pairs a property name with a borrowed value.
    pub fn new(name: &'a str, value: &'a V) -> Self {
        Self { name, value }
    }

    /// The declared property name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The current value.
    pub fn value(&self) -> &'a V {
        self.value
    }
}

impl<V: ?Sized> Clone for Property<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for Property<'_, V> {}

impl<V: fmt::Debug + ?Sized> fmt::Debug for Property<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

// ============================================================================
// PROPERTY VALUE
// ============================================================================

/// A type that can be declared as a validated property.
///
/// The defaults describe a non-nullable value that is never blank. `Option<T>`
/// overrides them to become the nullable form of `T`, and `String` reports
/// itself blank when empty.
///
/// Implement this (usually with an empty body) for your own value types.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::PropertyValue;
///
/// #[derive(Clone)]
/// struct Money(i64);
///
/// impl PropertyValue for Money {}
///
/// assert!(!Money::NULLABLE);
/// assert!(<Option<Money>>::NULLABLE);
/// ```
pub trait PropertyValue: Any + Clone + Send + Sync {
    /// Whether the type has a null value.
    const NULLABLE: bool = false;

    /// Returns true for the null value.
    fn is_null(&self) -> bool {
        false
    }

    /// Returns true for an empty string.
    fn is_blank(&self) -> bool {
        false
    }

    /// The null value of this type, if it has one.
    fn null() -> Option<Self> {
        None
    }

    /// Recovers a typed value from an untyped one.
    ///
    /// Returns `None` when the run-time type is incompatible.
    fn from_any(value: &dyn Any) -> Option<Cow<'_, Self>> {
        value.downcast_ref::<Self>().map(Cow::Borrowed)
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    const NULLABLE: bool = true;

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn is_blank(&self) -> bool {
        self.as_ref().is_some_and(PropertyValue::is_blank)
    }

    fn null() -> Option<Self> {
        Some(None)
    }

    /// Accepts either an `Option<T>` or a bare `T`.
    fn from_any(value: &dyn Any) -> Option<Cow<'_, Self>> {
        if let Some(option) = value.downcast_ref::<Self>() {
            return Some(Cow::Borrowed(option));
        }
        T::from_any(value).map(|inner| Cow::Owned(Some(inner.into_owned())))
    }
}

impl PropertyValue for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl PropertyValue for Box<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl PropertyValue for Cow<'static, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl PropertyValue for &'static str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! plain_property_values {
    ($($ty:ty),* $(,)?) => {
        $(impl PropertyValue for $ty {})*
    };
}

plain_property_values!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl<T: Clone + Send + Sync + 'static> PropertyValue for Vec<T> {}
impl<T: Clone + Send + Sync + 'static> PropertyValue for VecDeque<T> {}
impl<T: Clone + Send + Sync + 'static> PropertyValue for BTreeSet<T> {}
impl<K, V> PropertyValue for BTreeMap<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
}
impl<T, S> PropertyValue for HashSet<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
}
impl<K, V, S> PropertyValue for HashMap<K, V, S>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
}

// ============================================================================
// TEXT VALUE
// ============================================================================

/// A value with a string view.
///
/// `None` means the value is null; text rules treat null as valid.
pub trait TextValue {
    /// The text, or `None` when null.
    fn as_text(&self) -> Option<&str>;
}

impl TextValue for str {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for String {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl TextValue for Box<str> {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for Cow<'_, str> {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: TextValue + ?Sized> TextValue for &T {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

impl<T: TextValue> TextValue for Option<T> {
    #[inline]
    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(TextValue::as_text)
    }
}

// ============================================================================
// SEQUENCE VALUE
// ============================================================================

/// A value with an element count.
///
/// `None` means the sequence is null; size rules treat null as valid.
pub trait SequenceValue {
    /// The number of elements, or `None` when null.
    fn element_count(&self) -> Option<usize>;
}

macro_rules! sequence_values {
    ($(impl<$($gen:ident),*> for $ty:ty;)*) => {
        $(
            impl<$($gen),*> SequenceValue for $ty {
                #[inline]
                fn element_count(&self) -> Option<usize> {
                    Some(self.len())
                }
            }
        )*
    };
}

sequence_values! {
    impl<T> for [T];
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<T> for BTreeSet<T>;
    impl<K, V> for BTreeMap<K, V>;
    impl<T, S> for HashSet<T, S>;
    impl<K, V, S> for HashMap<K, V, S>;
}

impl<T, const N: usize> SequenceValue for [T; N] {
    #[inline]
    fn element_count(&self) -> Option<usize> {
        Some(N)
    }
}

impl<S: SequenceValue> SequenceValue for Option<S> {
    #[inline]
    fn element_count(&self) -> Option<usize> {
        self.as_ref().and_then(SequenceValue::element_count)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Per-call validation context

use std::borrow::Cow;
use std::fmt;

use crate::foundation::TypeKey;

/// What is being validated: the instance, its declared type, and optionally
/// the one member a pass is scoped to.
///
/// # Examples
///
/// ```rust
/// use keel_validator::context::ValidationContext;
/// use keel_validator::foundation::TypeKey;
///
/// struct Order {
///     total: u32,
/// }
///
/// let order = Order { total: 3 };
/// let ctx = ValidationContext::new(&order).with_member("Total");
/// assert_eq!(ctx.declared_type(), TypeKey::of::<Order>());
/// assert_eq!(ctx.member_name(), Some("Total"));
/// assert_eq!(ctx.display_name(), Some("Total"));
/// ```
pub struct ValidationContext<'a, T: ?Sized> {
    instance: &'a T,
    declared_type: TypeKey,
    member_name: Option<Cow<'a, str>>,
    display_name: Option<Cow<'a, str>>,
}

impl<'a, T: ?Sized + 'static> ValidationContext<'a, T> {
    /// Creates a context for a full-object pass over `instance`.
    pub fn new(instance: &'a T) -> Self {
        Self {
            instance,
            declared_type: TypeKey::of::<T>(),
            member_name: None,
            display_name: None,
        }
    }
}

impl<'a, T: ?Sized> ValidationContext<'a, T> {
    /// Scopes the pass to one member.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<Cow<'a, str>>) -> Self {
        self.member_name = Some(name.into());
        self
    }

    /// Sets the name shown to users for the member.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<Cow<'a, str>>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The instance under validation.
    pub fn instance(&self) -> &'a T {
        self.instance
    }

    /// The static type of the instance.
    pub fn declared_type(&self) -> TypeKey {
        self.declared_type
    }

    /// The member the pass is scoped to, if any.
    pub fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    /// The display name, falling back to the member name.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().or_else(|| self.member_name())
    }
}

impl<T: ?Sized> Clone for ValidationContext<'_, T> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance,
            declared_type: self.declared_type,
            member_name: self.member_name.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ValidationContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("declared_type", &self.declared_type)
            .field("member_name", &self.member_name)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_object_context_has_no_member() {
        let value = 7_u8;
        let ctx = ValidationContext::new(&value);
        assert_eq!(ctx.member_name(), None);
        assert_eq!(ctx.display_name(), None);
        assert_eq!(*ctx.instance(), 7);
    }

    #[test]
    fn test_display_name_overrides_member() {
        let value = String::from("x");
        let ctx = ValidationContext::new(&value)
            .with_member("FirstName")
            .with_display_name("First name");
        assert_eq!(ctx.member_name(), Some("FirstName"));
        assert_eq!(ctx.display_name(), Some("First name"));
        assert_eq!(ctx.declared_type(), TypeKey::of::<String>());
    }
}

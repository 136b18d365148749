//! Macros for creating rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`text_rule!`]: Create a text format rule (struct + `with_message` + `Rule` impl)
//!
//! # Examples
//!
//! ```rust
//! use keel_validator::text_rule;
//! use keel_validator::foundation::{Property, Rule};
//!
//! text_rule! {
//!     /// Accepts lowercase ASCII only.
//!     pub Lowercase {};
//!     code: "lowercase";
//!     accept(self, text) { text.chars().all(|c| c.is_ascii_lowercase()) }
//!     message(self, name) { format!("{name} must be lowercase.") }
//! }
//!
//! let rule = Lowercase::new();
//! assert!(rule.evaluate(&Property::new("Slug", "abc")).is_success());
//! assert!(rule.evaluate(&Property::new("Slug", "")).is_success());
//! assert!(rule.evaluate(&Property::new("Slug", "Abc")).is_failure());
//! ```

// ============================================================================
// TEXT RULE MACRO
// ============================================================================

/// Creates a complete text format rule.
///
/// The generated rule accepts any [`TextValue`](crate::foundation::TextValue).
/// Null and empty values always pass; compose with `required()` to make the
/// property mandatory. `#[derive(Debug, Clone)]` is always applied.
///
/// # Variants
///
/// **Unit rule** (auto `new()`):
/// ```rust,ignore
/// text_rule! {
///     pub Lowercase {};
///     code: "lowercase";
///     accept(self, text) { text.chars().all(char::is_lowercase) }
///     message(self, name) { format!("{name} must be lowercase.") }
/// }
/// ```
///
/// **Struct with fields** (constructor written by hand, must set `message: None`):
/// ```rust,ignore
/// text_rule! {
///     pub Prefixed { prefix: String };
///     code: "prefix";
///     accept(self, text) { text.starts_with(&self.prefix) }
///     message(self, name) { format!("{name} must start with {}.", self.prefix) }
///     params(self) { vec![("prefix", self.prefix.clone())] }
/// }
/// ```
#[macro_export]
macro_rules! text_rule {
    // ── Variant 1: Unit rule, auto new ──────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident {};
        code: $code:literal;
        accept($self_:ident, $text:ident) $accept:block
        message($self2:ident, $mname:ident) $message:block
    ) => {
        $crate::text_rule! {
            $(#[$meta])*
            $vis $name {};
            code: $code;
            accept($self_, $text) $accept
            message($self2, $mname) $message
            params(self) { ::std::vec::Vec::new() }
        }

        impl $name {
            /// Creates the rule with its default message.
            #[must_use]
            pub fn new() -> Self {
                Self { message: ::std::option::Option::None }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };

    // ── Variant 2: Struct with fields, no params ────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        code: $code:literal;
        accept($self_:ident, $text:ident) $accept:block
        message($self2:ident, $mname:ident) $message:block
    ) => {
        $crate::text_rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ };
            code: $code;
            accept($self_, $text) $accept
            message($self2, $mname) $message
            params(self) { ::std::vec::Vec::new() }
        }
    };

    // ── Variant 3: Full form ────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),* $(,)? };
        code: $code:literal;
        accept($self_:ident, $text:ident) $accept:block
        message($self2:ident, $mname:ident) $message:block
        params($self3:ident) $params:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $fty,)*
            message: ::std::option::Option<::std::borrow::Cow<'static, str>>,
        }

        impl $name {
            /// The code carried by this rule's violations.
            pub const CODE: &'static str = $code;

            /// Overrides the default message. `{name}` expands to the property name.
            #[must_use = "builder methods must be chained or built"]
            pub fn with_message(
                mut self,
                message: impl ::std::convert::Into<::std::borrow::Cow<'static, str>>,
            ) -> Self {
                self.message = ::std::option::Option::Some(message.into());
                self
            }

            #[allow(unused_variables)]
            fn accepts(&$self_, $text: &str) -> bool $accept

            #[allow(unused_variables)]
            fn default_message(&$self2, $mname: &str) -> ::std::string::String $message

            #[allow(unused_variables)]
            fn params(&$self3) -> ::std::vec::Vec<(&'static str, ::std::string::String)> $params
        }

        impl<V> $crate::foundation::Rule<V> for $name
        where
            V: $crate::foundation::TextValue + ?Sized,
        {
            fn evaluate(
                &self,
                property: &$crate::foundation::Property<'_, V>,
            ) -> $crate::foundation::ValidationResult {
                match property.value().as_text() {
                    ::std::option::Option::Some(text) if !text.is_empty() && !self.accepts(text) => {
                        let name = property.name();
                        let message = $crate::foundation::render_message(
                            self.message.as_deref(),
                            name,
                            || self.default_message(name),
                        );
                        let error = self.params().into_iter().fold(
                            $crate::foundation::ValidationError::new($code, message, name.to_owned()),
                            |error, (key, value)| error.with_param(key, value),
                        );
                        $crate::foundation::ValidationResult::failure(error)
                    }
                    _ => $crate::foundation::ValidationResult::Success,
                }
            }
        }
    };
}

// ============================================================================
// TESTS
// ============================================================================

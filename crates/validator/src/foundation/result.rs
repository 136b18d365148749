//! Validation outcomes
//!
//! A rule evaluation produces a [`ValidationResult`]: either the
//! allocation-free [`ValidationResult::Success`] sentinel or a
//! [`ValidationResult::Failure`] carrying a [`ValidationError`].
//!
//! All string fields use `Cow<'static, str>` so static codes and messages
//! never allocate.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Ordered list of the properties a violation names.
///
/// Almost every violation names one or two properties, so two slots live inline.
pub type MemberNames = SmallVec<[Cow<'static, str>; 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single violation produced by a rule.
///
/// A violation always names at least one property. Cross-property rules name
/// every property involved, in the order the rule declares them.
///
/// # Examples
///
/// ```rust
/// use keel_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("range", "Age must be between 0 and 130.", "Age")
///     .with_param("min", "0")
///     .with_param("max", "130");
///
/// assert_eq!(error.member_names.as_slice(), ["Age"]);
/// assert_eq!(error.param("max"), Some("130"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "required", "string_length", "range"
    pub code: Cow<'static, str>,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Names of the properties this violation concerns. Never empty.
    pub member_names: MemberNames,

    /// Parameters for message templating, in insertion order.
    #[serde(serialize_with = "serialize_params")]
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a violation naming one property.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        member: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut member_names = MemberNames::new();
        member_names.push(member.into());
        Self {
            code: code.into(),
            message: message.into(),
            member_names,
            params: Vec::new(),
        }
    }

    /// Appends another property name. Duplicates are ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_member(mut self, member: impl Into<Cow<'static, str>>) -> Self {
        let member = member.into();
        if !self.member_names.contains(&member) {
            self.member_names.push(member);
        }
        self
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The first (primary) property name.
    #[must_use]
    pub fn primary_member(&self) -> &str {
        self.member_names.first().map_or("", AsRef::as_ref)
    }

    /// Returns true if this violation names `member`.
    #[must_use]
    pub fn names(&self, member: &str) -> bool {
        self.member_names.iter().any(|m| m.as_ref() == member)
    }

    /// Converts the violation to a JSON value.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn serialize_params<S>(
    params: &[(Cow<'static, str>, Cow<'static, str>)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.member_names.join(", "), self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Outcome of evaluating one rule against one property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use = "validation result must be checked"]
pub enum ValidationResult {
    /// The rule holds.
    #[default]
    Success,
    /// The rule is violated.
    Failure(ValidationError),
}

impl ValidationResult {
    /// Wraps a violation.
    pub fn failure(error: ValidationError) -> Self {
        Self::Failure(error)
    }

    /// Returns true for [`ValidationResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true for [`ValidationResult::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrows the violation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Success => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Extracts the violation, if any.
    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        match self {
            Self::Success => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Converts to a `Result`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(error) => Err(error),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(error) => Self::Failure(error),
        }
    }
}

// ============================================================================
// MESSAGE TEMPLATES
// ============================================================================

/// Picks the custom message if one is set, otherwise builds the default.
///
/// The token `{name}` in a custom message expands to the property name.
#[doc(hidden)]
pub fn render_message(
    custom: Option<&str>,
    name: &str,
    default: impl FnOnce() -> String,
) -> String {
    match custom {
        Some(template) => template.replace("{name}", name),
        None => default(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("required", "The Name field is required.", "Name");
        assert_eq!(error.code, "required");
        assert_eq!(error.primary_member(), "Name");
        assert!(matches!(error.code, Cow::Borrowed(_)));
    }

    #[test]
    fn test_with_member_keeps_order_and_dedupes() {
        let error = ValidationError::new("compare", "End must be less than Start.", "End")
            .with_member("Start")
            .with_member("End");
        assert_eq!(error.member_names.as_slice(), ["End", "Start"]);
        assert!(error.names("Start"));
        assert!(!error.names("Middle"));
    }

    #[test]
    fn test_params() {
        let error = ValidationError::new("range", "out of range", "Age")
            .with_param("min", "0")
            .with_param("max", "10");
        assert_eq!(error.param("min"), Some("0"));
        assert_eq!(error.param("missing"), None);
    }

    #[test]
    fn test_json_shape() {
        let error = ValidationError::new("size", "too many", "Tags").with_param("max", "3");
        let json = error.to_json_value();
        assert_eq!(json["code"], "size");
        assert_eq!(json["member_names"][0], "Tags");
        assert_eq!(json["params"]["max"], "3");
    }

    #[test]
    fn test_result_conversions() {
        let ok: ValidationResult = Ok(()).into();
        assert!(ok.is_success());
        assert!(ok.error().is_none());

        let err = ValidationResult::failure(ValidationError::new("x", "y", "Z"));
        assert!(err.is_failure());
        assert_eq!(err.clone().into_error().map(|e| e.code), Some("x".into()));
        assert!(err.into_result().is_err());
    }

    #[test]
    fn test_render_message() {
        assert_eq!(
            render_message(Some("{name} is bad"), "Email", || unreachable!()),
            "Email is bad"
        );
        assert_eq!(
            render_message(None, "Email", || "default".to_owned()),
            "default"
        );
    }
}

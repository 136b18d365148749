//! Error types for configuration and invocation faults
//!
//! Validation failures are data ([`ValidationError`]), never an `Err` of the
//! non-throwing API. The types here cover the cases where validation cannot
//! be configured or cannot start, plus the fault raised by the throwing
//! family.
use crate::foundation::ValidationError;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for the throwing validation family
pub type Result<T> = std::result::Result<T, Error>;

/// A validator was configured incorrectly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Property names must be non-empty
    #[error("Property name must not be empty on '{declared_type}'")]
    EmptyPropertyName {
        /// The declared type the property was added to
        declared_type: &'static str,
    },

    /// The same property name was declared twice with different value types
    #[error(
        "Property '{property}' on '{declared_type}' is declared as '{existing}', requested as '{requested}'"
    )]
    PropertyTypeConflict {
        /// The declared type
        declared_type: &'static str,
        /// The property name
        property: String,
        /// The value type of the first declaration
        existing: &'static str,
        /// The value type of the conflicting declaration
        requested: &'static str,
    },

    /// A bounded rule was built with `max < min`
    #[error("Invalid bounds for '{rule}': min {min} exceeds max {max}")]
    InvalidBounds {
        /// The rule code
        rule: &'static str,
        /// The lower bound, rendered
        min: String,
        /// The upper bound, rendered
        max: String,
    },

    /// A regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern source
        pattern: String,
        /// The compiler's message
        reason: String,
    },
}

impl ConfigError {
    /// Wraps a regex compilation failure.
    pub fn invalid_pattern(pattern: &str, error: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: error.to_string(),
        }
    }
}

/// Validation could not start because the call was malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// An untyped instance did not have the validator's declared type
    #[error("Expected an instance of '{expected}'")]
    InstanceTypeMismatch {
        /// The declared type of the validator
        expected: &'static str,
    },

    /// A property-scoped operation was called without a member name
    #[error("A member name is required to validate a property of '{declared_type}'")]
    MissingMemberName {
        /// The declared type of the context
        declared_type: &'static str,
    },
}

/// The first violation surfaced by the throwing validation family
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ValidationFault {
    /// The violation
    pub error: ValidationError,
    /// Debug rendering of the offending value, when one was supplied
    pub value: Option<String>,
}

impl ValidationFault {
    /// Creates a fault with no attached value.
    pub fn new(error: ValidationError) -> Self {
        Self { error, value: None }
    }

    /// Attaches the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Comprehensive error type for the throwing validation family
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration fault
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input-contract fault
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// A validation rule failed
    #[error(transparent)]
    Fault(#[from] ValidationFault),
}

impl Error {
    /// The violation, if this is a validation fault.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Fault(fault) => Some(&fault.error),
            Self::Config(_) | Self::Contract(_) => None,
        }
    }
}

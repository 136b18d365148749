//! Registry configuration
//!
//! Hosts usually load this from JSON alongside the rest of their settings:
//!
//! ```rust
//! use keel_validator::config::RegistryConfig;
//!
//! let config: RegistryConfig =
//!     serde_json::from_str(r#"{ "null_value_message": "{name} is missing" }"#).unwrap();
//! assert_eq!(config.null_value_message, "{name} is missing");
//! assert!(config.trace_resolution);
//! ```

use serde::{Deserialize, Serialize};

/// Messages and switches shared by every validator a registry creates.
///
/// The token `{name}` in a message expands to the property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Message for a null value given to a non-nullable property.
    pub null_value_message: String,
    /// Message for a value whose run-time type does not match the property.
    pub invalid_type_message: String,
    /// Emit `trace` events for every resolution.
    pub trace_resolution: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            null_value_message: "The {name} field cannot be null.".to_owned(),
            invalid_type_message: "The value for {name} has an invalid type.".to_owned(),
            trace_resolution: true,
        }
    }
}

impl RegistryConfig {
    /// Renders the null-value message for `name`.
    pub fn null_value(&self, name: &str) -> String {
        self.null_value_message.replace("{name}", name)
    }

    /// Renders the invalid-type message for `name`.
    pub fn invalid_type(&self, name: &str) -> String {
        self.invalid_type_message.replace("{name}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_render() {
        let config = RegistryConfig::default();
        assert_eq!(config.null_value("Age"), "The Age field cannot be null.");
        assert_eq!(config.invalid_type("Age"), "The value for Age has an invalid type.");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RegistryConfig =
            serde_json::from_value(serde_json::json!({ "trace_resolution": false })).unwrap();
        assert!(!config.trace_resolution);
        assert_eq!(config.null_value_message, RegistryConfig::default().null_value_message);
    }
}

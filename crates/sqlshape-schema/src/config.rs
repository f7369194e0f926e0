//! Type resolution configuration.

use serde::Deserialize;
use sqlshape_core::{Result, SchemaError};

/// Settings that steer how declared column types map to cast kinds.
///
/// Passed explicitly to every resolution call; there is no process-wide
/// instance. Deserializes from the generator's settings document:
///
/// ```
/// use sqlshape_schema::TypeConfig;
///
/// let config = TypeConfig::from_json(r#"{ "typeBigIntAsString": false }"#).unwrap();
/// assert!(!config.type_bigint_as_string);
/// assert!(config.type_tinyint_one_as_boolean);
/// assert_eq!(config.default_json_type, "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeConfig {
    /// Read `bigint` columns as text unless annotated with `@bigint`.
    #[serde(rename = "typeBigIntAsString")]
    pub type_bigint_as_string: bool,
    /// Read `tinyint(1)` columns as booleans.
    #[serde(rename = "typeTinyIntOneAsBoolean")]
    pub type_tinyint_one_as_boolean: bool,
    /// Semantic type of `json` columns without a `@json(...)` directive.
    pub default_json_type: String,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            type_bigint_as_string: true,
            type_tinyint_one_as_boolean: true,
            default_json_type: "unknown".to_string(),
        }
    }
}

impl TypeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bigint_as_string(mut self, enabled: bool) -> Self {
        self.type_bigint_as_string = enabled;
        self
    }

    pub fn tinyint_one_as_boolean(mut self, enabled: bool) -> Self {
        self.type_tinyint_one_as_boolean = enabled;
        self
    }

    pub fn default_json_type(mut self, ty: impl Into<String>) -> Self {
        self.default_json_type = ty.into();
        self
    }

    /// Parse a JSON settings document. Missing keys keep their defaults;
    /// unknown keys are ignored.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| SchemaError::new(format!("Invalid type configuration: {}", e)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TypeConfig::default();
        assert!(config.type_bigint_as_string);
        assert!(config.type_tinyint_one_as_boolean);
        assert_eq!(config.default_json_type, "unknown");
    }

    #[test]
    fn test_builder() {
        let config = TypeConfig::new()
            .bigint_as_string(false)
            .tinyint_one_as_boolean(false)
            .default_json_type("JsonValue");
        assert!(!config.type_bigint_as_string);
        assert!(!config.type_tinyint_one_as_boolean);
        assert_eq!(config.default_json_type, "JsonValue");
    }

    #[test]
    fn test_from_json_full() {
        let config = TypeConfig::from_json(
            r#"{
                "typeBigIntAsString": false,
                "typeTinyIntOneAsBoolean": false,
                "defaultJsonType": "any",
                "outputDir": "./src/db"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            TypeConfig::new()
                .bigint_as_string(false)
                .tinyint_one_as_boolean(false)
                .default_json_type("any")
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = TypeConfig::from_json(r#"{ "typeBigIntAsString": "yes" }"#).unwrap_err();
        assert!(err.to_string().starts_with("Schema error: Invalid type configuration"));
    }
}

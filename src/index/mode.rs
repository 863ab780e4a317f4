// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Indexing mode and key derivation.
//!
//! The mode is decided once from the first dataset element. Every later item
//! goes through [`IndexMode::key_of`], which both checks the item against the
//! mode and yields its normalized search key.

use serde_json::Value;

use super::error::{IndexError, IndexResult};

/// How items are turned into search keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexMode {
    /// Items are strings and are their own key.
    Plain,

    /// Items are JSON objects keyed by a string field.
    Keyed {
        /// Name of the field holding the key.
        field: String,
    },
}

impl IndexMode {
    /// Detects the mode from the first element of a dataset.
    ///
    /// `key_field` is ignored for string datasets and required for object
    /// datasets.
    pub fn detect(first: &Value, key_field: Option<&str>) -> IndexResult<Self> {
        match first {
            Value::String(_) => Ok(IndexMode::Plain),
            Value::Object(_) => match key_field {
                Some(field) if !field.is_empty() => Ok(IndexMode::Keyed {
                    field: field.to_string(),
                }),
                _ => Err(IndexError::Configuration(
                    "missing index field, specify a property to index on".to_string(),
                )),
            },
            other => Err(IndexError::UnsupportedType {
                expected: "string or object".to_string(),
                found: type_name(other).to_string(),
            }),
        }
    }

    /// Derives the lowercased search key of `item`.
    ///
    /// Fails when the item does not match the mode, when a keyed item lacks
    /// the field, or when the field does not hold a string.
    pub fn key_of(&self, item: &Value) -> IndexResult<String> {
        match (self, item) {
            (IndexMode::Plain, Value::String(key)) => Ok(normalize(key)),
            (IndexMode::Keyed { field }, Value::Object(map)) => match map.get(field) {
                Some(Value::String(key)) => Ok(normalize(key)),
                Some(other) => Err(IndexError::UnsupportedType {
                    expected: format!("string value for '{field}'"),
                    found: type_name(other).to_string(),
                }),
                None => Err(IndexError::MissingKeyField {
                    field: field.clone(),
                }),
            },
            (mode, other) => Err(IndexError::UnsupportedType {
                expected: mode.expected().to_string(),
                found: type_name(other).to_string(),
            }),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            IndexMode::Plain => "string",
            IndexMode::Keyed { .. } => "object",
        }
    }
}

/// Case-folds a key or query term.
///
/// Each character is folded on its own, without context rules such as the
/// Greek final sigma, so the folded form of a prefix is always a prefix of
/// the folded key.
pub fn normalize(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// JSON type name used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_detect_plain_ignores_field() {
        assert_eq!(IndexMode::detect(&json!("x"), Some("name")).unwrap(), IndexMode::Plain);
        assert_eq!(IndexMode::detect(&json!("x"), None).unwrap(), IndexMode::Plain);
    }

    #[test]
    fn test_detect_keyed_requires_field() {
        assert_eq!(
            IndexMode::detect(&json!({"name": "Tom"}), Some("name")).unwrap(),
            IndexMode::Keyed { field: "name".to_string() }
        );
        assert!(matches!(
            IndexMode::detect(&json!({"name": "Tom"}), None),
            Err(IndexError::Configuration(_))
        ));
        assert!(matches!(
            IndexMode::detect(&json!({"name": "Tom"}), Some("")),
            Err(IndexError::Configuration(_))
        ));
    }

    #[test_case(json!(null), "null" ; "null")]
    #[test_case(json!(42), "number" ; "number")]
    #[test_case(json!(true), "boolean" ; "boolean")]
    #[test_case(json!(["a"]), "array" ; "array")]
    fn test_detect_rejects_unsupported(first: Value, found: &str) {
        match IndexMode::detect(&first, Some("name")) {
            Err(IndexError::UnsupportedType { found: actual, .. }) => assert_eq!(actual, found),
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_key_of_lowercases() {
        assert_eq!(IndexMode::Plain.key_of(&json!("ÄPFEL")).unwrap(), "äpfel");

        let keyed = IndexMode::Keyed { field: "name".to_string() };
        assert_eq!(keyed.key_of(&json!({"name": "Tomas", "age": 3})).unwrap(), "tomas");
    }

    #[test]
    fn test_normalize_ignores_final_sigma_context() {
        assert_eq!(normalize("ΟΔΟΣ"), "οδοσ");
        assert!(normalize("Οδοστρωτήρας").starts_with(&normalize("ΟΔΟΣ")));
    }

    #[test]
    fn test_key_of_rejects_mismatches() {
        let keyed = IndexMode::Keyed { field: "name".to_string() };

        assert_eq!(
            keyed.key_of(&json!({"title": "x"})),
            Err(IndexError::MissingKeyField { field: "name".to_string() })
        );
        assert!(matches!(
            keyed.key_of(&json!({"name": 7})),
            Err(IndexError::UnsupportedType { .. })
        ));
        assert!(matches!(
            keyed.key_of(&json!("plain")),
            Err(IndexError::UnsupportedType { .. })
        ));
        assert!(matches!(
            IndexMode::Plain.key_of(&json!({"name": "x"})),
            Err(IndexError::UnsupportedType { .. })
        ));
    }
}

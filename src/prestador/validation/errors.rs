//! Validation error types

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for validation
pub type ValidationResult = Result<(), ValidationError>;

/// A single field-level validation failure.
///
/// Serializes as `{value?, msg, param?}`: `param` carries the field name,
/// `value` the offending input when one was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    pub msg: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    /// A failure on a named field
    pub fn field(param: &str, value: Option<Value>, msg: impl Into<String>) -> Self {
        Self {
            value,
            msg: msg.into(),
            param: Some(param.to_string()),
        }
    }

    /// A bare message with no field attribution
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            value: None,
            msg: msg.into(),
            param: None,
        }
    }
}

/// Validation outcome failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// One or more field rules failed; carries the full ordered list
    #[error("validation rejected with {} error(s)", .0.len())]
    Rejected(Vec<FieldError>),

    /// A store query inside a rule failed; not a field error
    #[error("validation aborted by store failure: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_error_serialization() {
        let err = FieldError::field("cnpj", Some(json!("123")), "invalid CNPJ length");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["param"], "cnpj");
        assert_eq!(json["value"], "123");
        assert_eq!(json["msg"], "invalid CNPJ length");
    }

    #[test]
    fn test_field_error_omits_absent_parts() {
        let err = FieldError::message("store lock poisoned");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["msg"], "store lock poisoned");
        assert!(json.get("param").is_none());
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_store_failure_is_not_a_rejection() {
        let err = ValidationError::from(StoreError::LockPoisoned);
        assert!(matches!(err, ValidationError::Store(_)));
    }
}

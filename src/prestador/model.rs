//! Prestador record model
//!
//! Records are schema-less JSON objects persisted verbatim. The validated
//! core is exposed as a typed read view; any additional fields ride along
//! untouched.

use serde_json::Value;

use crate::store::ID_FIELD;

/// Collection holding prestador records
pub const COLLECTION: &str = "prestadores";

/// Field names of the validated core
pub mod fields {
    /// 14-character national business tax identifier, unique
    pub const CNPJ: &str = "cnpj";
    /// Registered legal name, default sort and search key
    pub const RAZAO_SOCIAL: &str = "razao_social";
    /// Fiscal activity code
    pub const CNAE_FISCAL: &str = "cnae_fiscal";
    /// Optional activity start date, YYYY-MM-DD
    pub const DATA_INICIO_ATIVIDADE: &str = "data_inicio_atividade";
}

/// Typed read view over a candidate document.
///
/// Accessors return `None` for absent fields and for values of the wrong
/// type; validation decides what that means per rule.
#[derive(Debug, Clone, Copy)]
pub struct PrestadorFields<'a> {
    document: &'a Value,
}

impl<'a> PrestadorFields<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    /// The raw document backing this view
    pub fn document(&self) -> &'a Value {
        self.document
    }

    /// `cnpj` as a string, if present and a string
    pub fn cnpj(&self) -> Option<&'a str> {
        self.document.get(fields::CNPJ).and_then(Value::as_str)
    }

    /// `cnpj` trimmed, empty when absent (form semantics)
    pub fn cnpj_trimmed(&self) -> &'a str {
        self.cnpj().unwrap_or("").trim()
    }

    /// `razao_social` as a string, if present and a string
    pub fn razao_social(&self) -> Option<&'a str> {
        self.document
            .get(fields::RAZAO_SOCIAL)
            .and_then(Value::as_str)
    }

    /// `razao_social` trimmed, empty when absent (form semantics)
    pub fn razao_social_trimmed(&self) -> &'a str {
        self.razao_social().unwrap_or("").trim()
    }

    /// Raw `cnae_fiscal` value, if present
    pub fn cnae_fiscal(&self) -> Option<&'a Value> {
        self.document.get(fields::CNAE_FISCAL)
    }

    /// Raw `data_inicio_atividade` value, if present
    pub fn data_inicio_atividade(&self) -> Option<&'a Value> {
        self.document.get(fields::DATA_INICIO_ATIVIDADE)
    }
}

/// Extracts the document id from an update body.
///
/// Returns the id (when present as a string) and the body with the id key
/// removed; the id is only ever a match key, never part of the persisted
/// update.
pub fn strip_id(mut body: Value) -> (Option<String>, Value) {
    let id = match body.as_object_mut() {
        Some(obj) => obj
            .remove(ID_FIELD)
            .and_then(|v| v.as_str().map(str::to_string)),
        None => None,
    };
    (id, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_read_typed_core() {
        let doc = json!({
            "cnpj": "12345678000100",
            "razao_social": "Alfa Servicos",
            "cnae_fiscal": 6201500,
            "data_inicio_atividade": "2020-01-15",
            "extra": {"anything": true}
        });
        let view = PrestadorFields::new(&doc);

        assert_eq!(view.cnpj(), Some("12345678000100"));
        assert_eq!(view.razao_social(), Some("Alfa Servicos"));
        assert_eq!(view.cnae_fiscal(), Some(&json!(6201500)));
        assert_eq!(view.data_inicio_atividade(), Some(&json!("2020-01-15")));
    }

    #[test]
    fn test_accessors_none_for_wrong_type() {
        let doc = json!({"cnpj": 12345678000100u64, "razao_social": ["x"]});
        let view = PrestadorFields::new(&doc);

        assert_eq!(view.cnpj(), None);
        assert_eq!(view.razao_social(), None);
    }

    #[test]
    fn test_trimmed_accessors_default_to_empty() {
        let doc = json!({"cnpj": "  12345678000100  "});
        let view = PrestadorFields::new(&doc);

        assert_eq!(view.cnpj_trimmed(), "12345678000100");
        assert_eq!(view.razao_social_trimmed(), "");
    }

    #[test]
    fn test_strip_id_removes_match_key() {
        let body = json!({"_id": "abc", "razao_social": "Alfa"});
        let (id, body) = strip_id(body);

        assert_eq!(id.as_deref(), Some("abc"));
        assert!(body.get("_id").is_none());
        assert_eq!(body["razao_social"], "Alfa");
    }

    #[test]
    fn test_strip_id_without_id() {
        let (id, body) = strip_id(json!({"razao_social": "Alfa"}));
        assert!(id.is_none());
        assert_eq!(body["razao_social"], "Alfa");
    }

    #[test]
    fn test_strip_id_non_object_body() {
        let (id, body) = strip_id(json!("scalar"));
        assert!(id.is_none());
        assert_eq!(body, json!("scalar"));
    }
}

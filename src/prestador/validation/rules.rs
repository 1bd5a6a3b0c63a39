//! Field validation rules
//!
//! One struct per rule, in the order the engine runs them. Missing values
//! fail every rule that inspects them (form semantics), so a record without
//! a `cnpj` collects both the required and the length error.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::prestador::model::{fields, PrestadorFields, COLLECTION};
use crate::store::{DocumentStore, Filter, StoreResult, ID_FIELD};

use super::errors::FieldError;

/// Required `cnpj` length in characters
pub const CNPJ_LEN: usize = 14;

/// `razao_social` length bounds in characters
pub const RAZAO_SOCIAL_MIN_LEN: usize = 3;
pub const RAZAO_SOCIAL_MAX_LEN: usize = 100;

/// A single validation rule.
///
/// Rules are pure unless they need the store; the store seam is part of the
/// contract so that store-reading rules are not a structural special case.
/// A `StoreError` aborts validation; it is never a field error.
pub trait ValidationRule: Send + Sync {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        own_id: Option<&str>,
        store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>>;
}

/// Clones the raw value of a field for error reporting
fn raw(record: &PrestadorFields<'_>, field: &str) -> Option<Value> {
    record.document().get(field).cloned()
}

/// `cnpj` must be non-empty after trimming
pub struct CnpjRequired;

impl ValidationRule for CnpjRequired {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if record.cnpj_trimmed().is_empty() {
            return Ok(Some(FieldError::field(
                fields::CNPJ,
                raw(record, fields::CNPJ),
                "CNPJ is required",
            )));
        }
        Ok(None)
    }
}

/// Trimmed `cnpj` must be exactly 14 characters
pub struct CnpjLength;

impl ValidationRule for CnpjLength {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if record.cnpj_trimmed().chars().count() != CNPJ_LEN {
            return Ok(Some(FieldError::field(
                fields::CNPJ,
                raw(record, fields::CNPJ),
                "invalid CNPJ length",
            )));
        }
        Ok(None)
    }
}

/// `cnpj` must be unique across all other records.
///
/// The only store-reading rule. A record found with the candidate value is a
/// conflict unless it is the candidate's own record (update keeping its
/// unchanged CNPJ).
pub struct CnpjUnique;

impl ValidationRule for CnpjUnique {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        own_id: Option<&str>,
        store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        let cnpj = record.cnpj_trimmed();
        if cnpj.is_empty() {
            // Nothing to look up; the required rule already fired
            return Ok(None);
        }

        let filter = Filter::eq(fields::CNPJ, Value::String(cnpj.to_string()));
        let matches = store.find(COLLECTION, &filter, None)?;

        let conflict = matches.iter().any(|doc| {
            let found_id = doc.get(ID_FIELD).and_then(Value::as_str);
            match own_id {
                None => true,
                Some(own) => found_id != Some(own),
            }
        });

        if conflict {
            return Ok(Some(FieldError::field(
                fields::CNPJ,
                raw(record, fields::CNPJ),
                format!("CNPJ {} already registered", cnpj),
            )));
        }
        Ok(None)
    }
}

/// `razao_social` must be non-empty after trimming
pub struct RazaoSocialRequired;

impl ValidationRule for RazaoSocialRequired {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if record.razao_social_trimmed().is_empty() {
            return Ok(Some(FieldError::field(
                fields::RAZAO_SOCIAL,
                raw(record, fields::RAZAO_SOCIAL),
                "company name is required",
            )));
        }
        Ok(None)
    }
}

/// `razao_social` may contain Unicode letters, digits, `.`, `/` and spaces
pub struct RazaoSocialCharset {
    pattern: Regex,
}

impl RazaoSocialCharset {
    pub fn new() -> Self {
        Self {
            // \p{M} keeps combining accents valid alongside their letters
            pattern: Regex::new(r"^[\p{L}\p{M}\p{N}./ ]+$").expect("valid charset pattern"),
        }
    }
}

impl Default for RazaoSocialCharset {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for RazaoSocialCharset {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if !self.pattern.is_match(record.razao_social_trimmed()) {
            return Ok(Some(FieldError::field(
                fields::RAZAO_SOCIAL,
                raw(record, fields::RAZAO_SOCIAL),
                "invalid characters in company name",
            )));
        }
        Ok(None)
    }
}

/// Trimmed `razao_social` must be at least 3 characters
pub struct RazaoSocialMinLength;

impl ValidationRule for RazaoSocialMinLength {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if record.razao_social_trimmed().chars().count() < RAZAO_SOCIAL_MIN_LEN {
            return Ok(Some(FieldError::field(
                fields::RAZAO_SOCIAL,
                raw(record, fields::RAZAO_SOCIAL),
                "company name is too short",
            )));
        }
        Ok(None)
    }
}

/// Trimmed `razao_social` must be at most 100 characters
pub struct RazaoSocialMaxLength;

impl ValidationRule for RazaoSocialMaxLength {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        if record.razao_social_trimmed().chars().count() > RAZAO_SOCIAL_MAX_LEN {
            return Ok(Some(FieldError::field(
                fields::RAZAO_SOCIAL,
                raw(record, fields::RAZAO_SOCIAL),
                "company name is too long",
            )));
        }
        Ok(None)
    }
}

/// `cnae_fiscal` is required and must be a number or a numeric string
pub struct CnaeFiscalNumeric {
    pattern: Regex,
}

impl CnaeFiscalNumeric {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("valid numeric pattern"),
        }
    }

    fn is_numeric(&self, value: &Value) -> bool {
        match value {
            Value::Number(_) => true,
            Value::String(s) => self.pattern.is_match(s),
            _ => false,
        }
    }
}

impl Default for CnaeFiscalNumeric {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for CnaeFiscalNumeric {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        let numeric = record
            .cnae_fiscal()
            .map(|v| self.is_numeric(v))
            .unwrap_or(false);

        if !numeric {
            return Ok(Some(FieldError::field(
                fields::CNAE_FISCAL,
                raw(record, fields::CNAE_FISCAL),
                "CNAE must be a number",
            )));
        }
        Ok(None)
    }
}

/// `data_inicio_atividade`, when present and non-null, must be YYYY-MM-DD
pub struct DataInicioAtividadeFormat;

impl DataInicioAtividadeFormat {
    fn is_valid_date(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                // Round-trip comparison rejects unpadded variants like 2020-1-5
                Ok(date) => date.format("%Y-%m-%d").to_string() == *s,
                Err(_) => false,
            },
            _ => false,
        }
    }
}

impl ValidationRule for DataInicioAtividadeFormat {
    fn check(
        &self,
        record: &PrestadorFields<'_>,
        _own_id: Option<&str>,
        _store: &dyn DocumentStore,
    ) -> StoreResult<Option<FieldError>> {
        let valid = record
            .data_inicio_atividade()
            .map(Self::is_valid_date)
            .unwrap_or(true);

        if !valid {
            return Ok(Some(FieldError::field(
                fields::DATA_INICIO_ATIVIDADE,
                raw(record, fields::DATA_INICIO_ATIVIDADE),
                "invalid date, expected format YYYY-MM-DD",
            )));
        }
        Ok(None)
    }
}

//! Validation engine
//!
//! Runs every rule in order against a candidate document and collects all
//! failures; validation never short-circuits on a field error. A store
//! failure inside a rule aborts the run instead.

use serde_json::Value;

use crate::prestador::model::PrestadorFields;
use crate::store::DocumentStore;

use super::errors::{ValidationError, ValidationResult};
use super::rules::{
    CnaeFiscalNumeric, CnpjLength, CnpjRequired, CnpjUnique, DataInicioAtividadeFormat,
    RazaoSocialCharset, RazaoSocialMaxLength, RazaoSocialMinLength, RazaoSocialRequired,
    ValidationRule,
};

/// The validation engine: an ordered rule list over a store seam
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// The standard prestador rule set, in reporting order
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Box::new(CnpjRequired),
                Box::new(CnpjLength),
                Box::new(CnpjUnique),
                Box::new(RazaoSocialRequired),
                Box::new(RazaoSocialCharset::new()),
                Box::new(RazaoSocialMinLength),
                Box::new(RazaoSocialMaxLength),
                Box::new(CnaeFiscalNumeric::new()),
                Box::new(DataInicioAtividadeFormat),
            ],
        }
    }

    /// Validates a candidate document.
    ///
    /// `own_id` is the record's own id for updates (its own unchanged CNPJ
    /// is not a conflict); `None` for creates.
    ///
    /// # Errors
    ///
    /// - `ValidationError::Rejected` with every failed rule, in rule order
    /// - `ValidationError::Store` if a store-reading rule could not query
    pub fn validate(
        &self,
        document: &Value,
        own_id: Option<&str>,
        store: &dyn DocumentStore,
    ) -> ValidationResult {
        let record = PrestadorFields::new(document);

        let mut errors = Vec::new();
        for rule in &self.rules {
            if let Some(err) = rule.check(&record, own_id, store)? {
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Rejected(errors))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::standard()
    }
}

//! # Prestador domain
//!
//! The service-provider record collection: typed field access over
//! schema-less documents plus the validation pipeline applied before
//! persistence.

pub mod model;
pub mod validation;

pub use model::{strip_id, PrestadorFields, COLLECTION};
pub use validation::{FieldError, ValidationError, ValidationRule, Validator};

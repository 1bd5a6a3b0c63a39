//! # Validation Engine
//!
//! Ordered, polymorphic set of field rules applied to a candidate record
//! before persistence. Every rule runs; all failures are collected in rule
//! order. Rules are either pure or store-reading (the CNPJ uniqueness rule
//! queries the collection through the same trait seam as any other rule).

pub mod engine;
pub mod errors;
pub mod rules;

pub use engine::Validator;
pub use errors::{FieldError, ValidationError, ValidationResult};
pub use rules::ValidationRule;

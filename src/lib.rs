//! prestadores-api - REST API for service-provider (prestador) records
//!
//! A single-collection document API: schema-less records validated by an
//! ordered rule pipeline (including a store-backed CNPJ uniqueness check)
//! before persistence.

pub mod api;
pub mod cli;
pub mod config;
pub mod observability;
pub mod prestador;
pub mod store;

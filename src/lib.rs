//! BigDataCorp API Client Library
//!
//! Lookup of person (CPF) and company (CNPJ) records across the datasets of
//! the BigDataCorp "BigBoost" enrichment API, plus per-dataset usage reports.
//!
//! # Modules
//!
//! - `classification`: Status envelope inspection and error-range mapping.
//! - `client`: `DatasetClient`, the retrying lookup and usage client.
//! - `config`: Configuration management.
//! - `datasets`: Person and company dataset registries.
//! - `errors`: Error handling types.
//! - `models`: Request and usage data models.

pub mod classification;
pub mod client;
pub mod config;
pub mod datasets;
pub mod errors;
pub mod models;

pub use classification::ClassificationMode;
pub use client::DatasetClient;
pub use config::Config;
pub use datasets::EntityType;
pub use errors::BigDataError;
pub use models::UsageRecord;

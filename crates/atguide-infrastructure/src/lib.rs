//! Infrastructure layer for ATGuide.
//!
//! Provides the JSON-file catalog repository and the configuration
//! service consumed by the application layer.

pub mod config_service;
pub mod json_catalog_repository;

pub use crate::config_service::ConfigService;
pub use crate::json_catalog_repository::JsonCatalogRepository;

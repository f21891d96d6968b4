//! Catalog domain: token vocabularies, item records, structural
//! filtering, and audit tooling.

pub mod filter;
pub mod model;
pub mod repository;
pub mod validate;

pub use filter::{VisibleSubset, filter_catalog};
pub use model::{
    AppliedFilters, CatalogItem, InstallType, Platform, PurchaseOption, ToolFunction,
};
pub use repository::CatalogRepository;

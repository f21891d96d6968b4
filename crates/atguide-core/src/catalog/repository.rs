//! Catalog repository trait.

use async_trait::async_trait;

use super::model::CatalogItem;
use crate::error::Result;

/// Repository trait for the tool catalog source.
///
/// Implementations read the catalog fresh on every call; the request path
/// relies on that to pick up catalog edits without an invalidation
/// protocol.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Loads every catalog item in source order.
    async fn load_all(&self) -> Result<Vec<CatalogItem>>;
}

//! JSON-file backed catalog repository.
//!
//! Reads the catalog fresh on every call. There is no caching layer, so
//! catalog edits are picked up immediately at the cost of repeated parse
//! overhead (acceptable for catalogs in the low thousands of items).

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use atguide_core::catalog::{CatalogItem, CatalogRepository};
use atguide_core::error::{AtguideError, Result};

/// Catalog repository reading a `catalog.json` file.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    /// Creates a repository for the given catalog file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The catalog file path this repository reads.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn load_all(&self) -> Result<Vec<CatalogItem>> {
        let raw = fs::read_to_string(&self.path).await.map_err(|err| {
            AtguideError::catalog(format!(
                "failed to read catalog at {}: {err}",
                self.path.display()
            ))
        })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&raw).map_err(|err| {
            AtguideError::catalog(format!(
                "failed to parse catalog at {}: {err}",
                self.path.display()
            ))
        })?;

        debug!(count = items.len(), "catalog loaded");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atguide_core::catalog::Platform;
    use std::io::Write;

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write catalog");
        file
    }

    #[tokio::test]
    async fn test_loads_catalog_in_source_order() {
        let file = write_catalog(
            r#"[
                {"id": "b", "name": "Second", "supportedPlatforms": ["ios"]},
                {"id": "a", "name": "First"}
            ]"#,
        );
        let repo = JsonCatalogRepository::new(file.path());
        let items = repo.load_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "b");
        assert_eq!(items[0].supported_platforms, vec![Platform::Ios]);
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_error() {
        let repo = JsonCatalogRepository::new("/nonexistent/catalog.json");
        let err = repo.load_all().await.unwrap_err();
        assert!(err.is_catalog());
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_catalog_error() {
        let file = write_catalog(r#"{"not": "an array"#);
        let repo = JsonCatalogRepository::new(file.path());
        let err = repo.load_all().await.unwrap_err();
        assert!(err.is_catalog());
    }
}

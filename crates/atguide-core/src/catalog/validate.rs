//! Catalog consistency audit.
//!
//! Operational tooling that checks a loaded catalog for identity problems:
//! entries without an id, duplicate ids, and name+company pairs that map
//! to more than one distinct id. The name+company pair is a secondary key
//! only; it is never trusted as a primary key by the request path.

use std::collections::BTreeMap;

use super::model::CatalogItem;

/// A name+company pair that resolves to more than one catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCompanyCluster {
    pub name: String,
    pub company: String,
    pub ids: Vec<String>,
}

/// Findings from a catalog audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogAudit {
    /// Number of entries with a missing or blank id.
    pub blank_id_count: usize,
    /// Ids that appear on more than one entry, sorted.
    pub duplicate_ids: Vec<String>,
    /// Name+company pairs shared by entries with distinct ids.
    pub conflicting_clusters: Vec<NameCompanyCluster>,
}

impl CatalogAudit {
    /// True when the audit found any problem.
    pub fn has_findings(&self) -> bool {
        self.blank_id_count > 0
            || !self.duplicate_ids.is_empty()
            || !self.conflicting_clusters.is_empty()
    }
}

/// Audits `items` for identity problems. Ids and secondary keys are
/// compared after trimming and lowercasing.
pub fn audit_catalog(items: &[CatalogItem]) -> CatalogAudit {
    let mut id_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut clusters: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    let mut blank_id_count = 0;

    for item in items {
        let id = item.id.trim().to_lowercase();
        if id.is_empty() {
            blank_id_count += 1;
        } else {
            *id_counts.entry(id.clone()).or_insert(0) += 1;
        }

        let name = item.name.trim().to_lowercase();
        let company = item.company.trim().to_lowercase();
        if !name.is_empty() && !company.is_empty() && !id.is_empty() {
            let ids = clusters.entry((name, company)).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    let duplicate_ids = id_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();

    let conflicting_clusters = clusters
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((name, company), ids)| NameCompanyCluster { name, company, ids })
        .collect();

    CatalogAudit {
        blank_id_count,
        duplicate_ids,
        conflicting_clusters,
    }
}

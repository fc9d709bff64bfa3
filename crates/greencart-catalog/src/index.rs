//! Catalog index: id and category lookup with substitution groups

use std::collections::{BTreeSet, HashMap};

use crate::product::CatalogRecord;

/// Immutable index over the product catalog.
///
/// Besides exact-category membership, the index carries *substitution
/// groups*: sets of categories whose members are considered functional
/// substitutes for each other (protein sources, dairy and plant milks,
/// ...). Groups are supplied at build time by the catalog collaborator.
///
/// Safe to share across threads behind an `Arc`; never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_id: HashMap<String, CatalogRecord>,
    by_category: HashMap<String, Vec<String>>,
    groups: Vec<BTreeSet<String>>,
}

impl CatalogIndex {
    /// Builds an index from catalog records.
    pub fn new(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_category: HashMap<String, Vec<String>> = HashMap::new();

        for record in records {
            by_category
                .entry(normalize(&record.category))
                .or_default()
                .push(record.id.clone());
            by_id.insert(record.id.clone(), record);
        }

        CatalogIndex {
            by_id,
            by_category,
            groups: Vec::new(),
        }
    }

    /// Declares a set of categories whose products substitute for each
    /// other across category boundaries.
    pub fn with_substitution_group<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        self.groups
            .push(categories.into_iter().map(|c| normalize(c.as_ref())).collect());
        self
    }

    /// Looks up a catalog record by product id.
    pub fn product(&self, id: &str) -> Option<&CatalogRecord> {
        self.by_id.get(id)
    }

    /// Returns the ids sharing the given category.
    pub fn category_members(&self, category: &str) -> &[String] {
        self.by_category
            .get(&normalize(category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns every record eligible as a substitute for the given
    /// category: same-category members plus members of every substitution
    /// group containing it, deduplicated, in insertion order.
    pub fn substitution_pool(&self, category: &str) -> Vec<&CatalogRecord> {
        let normalized = normalize(category);

        let mut id_lists: Vec<&[String]> = vec![self.category_members(category)];
        for group in &self.groups {
            if group.contains(&normalized) {
                for member in group {
                    if *member != normalized {
                        if let Some(ids) = self.by_category.get(member) {
                            id_lists.push(ids.as_slice());
                        }
                    }
                }
            }
        }

        let mut seen = BTreeSet::new();
        let mut pool = Vec::new();
        for ids in id_lists {
            for id in ids {
                if seen.insert(id.as_str()) {
                    if let Some(record) = self.by_id.get(id) {
                        pool.push(record);
                    }
                }
            }
        }

        pool
    }

    /// Returns the number of indexed products.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns whether the index holds no products.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_ascii_lowercase()
}

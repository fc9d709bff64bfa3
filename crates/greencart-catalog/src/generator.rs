//! Candidate generation: filter, rank, and memoize swap candidates

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use greencart_core::{FootprintStore, ShopperConstraints, SwapCandidate};

use crate::index::CatalogIndex;
use crate::product::CatalogRecord;
use crate::similarity::cosine_similarity;

/// Finds ranked substitute candidates for a product under hard
/// constraints.
///
/// Results are memoized per (product id, constraints hash). Cache entries
/// are pure derived data: they may be evicted at any time, and concurrent
/// lookups that race on a miss simply rebuild the same list. The full
/// ranked list is cached; `max_results` truncation happens on the way out.
#[derive(Debug)]
pub struct CandidateGenerator {
    index: Arc<CatalogIndex>,
    store: Arc<FootprintStore>,
    cache: RwLock<HashMap<(String, u64), Arc<[SwapCandidate]>>>,
}

impl CandidateGenerator {
    pub fn new(index: Arc<CatalogIndex>, store: Arc<FootprintStore>) -> Self {
        CandidateGenerator {
            index,
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the catalog index this generator searches.
    #[inline]
    pub fn catalog(&self) -> &CatalogIndex {
        &self.index
    }

    /// Returns up to `max_results` candidates for the given product,
    /// ranked by similarity (ties: larger emissions delta, then lower
    /// price delta).
    ///
    /// An unknown product id or a fully filtered pool yields an empty
    /// list: a valid "no viable substitute" outcome, not an error.
    pub fn find_candidates(
        &self,
        product_id: &str,
        constraints: &ShopperConstraints,
        max_results: usize,
    ) -> Vec<SwapCandidate> {
        let key = (product_id.to_string(), constraints.cache_key());

        if let Some(ranked) = self.read_cache().get(&key) {
            return ranked.iter().take(max_results).cloned().collect();
        }

        let ranked: Arc<[SwapCandidate]> = self.build_candidates(product_id, constraints).into();
        let result = ranked.iter().take(max_results).cloned().collect();
        self.write_cache().insert(key, ranked);
        result
    }

    /// Drops all memoized candidate lists.
    pub fn clear_cache(&self) {
        self.write_cache().clear();
    }

    // Cache entries are pure derived data; a poisoned guard is still usable.
    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<(String, u64), Arc<[SwapCandidate]>>> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<(String, u64), Arc<[SwapCandidate]>>> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }

    fn build_candidates(
        &self,
        product_id: &str,
        constraints: &ShopperConstraints,
    ) -> Vec<SwapCandidate> {
        let Some(source) = self.index.product(product_id) else {
            return Vec::new();
        };
        let Ok((source_footprint, _)) = self.store.resolve(&source.id, &source.category) else {
            return Vec::new();
        };

        let mut candidates: Vec<SwapCandidate> = self
            .index
            .substitution_pool(&source.category)
            .into_iter()
            .filter(|record| record.id != source.id)
            .filter(|record| passes_filters(record, source, constraints))
            .filter_map(|record| {
                let (footprint, _) = self.store.resolve(&record.id, &record.category).ok()?;
                Some(SwapCandidate {
                    source_product_id: source.id.clone(),
                    target_product_id: record.id.clone(),
                    emissions_delta: source_footprint.mean() - footprint.mean(),
                    price_delta: record.price - source.price,
                    similarity: cosine_similarity(&source.features, &record.features),
                    category: record.category.clone(),
                    target_footprint: footprint,
                    target_price: record.price,
                    target_brand: record.brand.clone(),
                    target_dietary_flags: record.dietary_flags.clone(),
                    target_allergens: record.allergens.clone(),
                    target_health: record.health_score,
                    brand_change: record.brand != source.brand,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| b.emissions_delta.total_cmp(&a.emissions_delta))
                .then_with(|| a.price_delta.total_cmp(&b.price_delta))
        });

        candidates
    }
}

fn passes_filters(
    record: &CatalogRecord,
    source: &CatalogRecord,
    constraints: &ShopperConstraints,
) -> bool {
    if constraints.vegetarian && !record.is_vegetarian() {
        return false;
    }
    if constraints.vegan && (!record.is_vegetarian() || record.allergens.contains("dairy")) {
        return false;
    }
    if record
        .allergens
        .iter()
        .any(|allergen| constraints.allergens.contains(allergen))
    {
        return false;
    }
    if constraints.brand_locked && record.brand != source.brand {
        return false;
    }
    if let Some(cap) = constraints.max_unit_price {
        if record.price > cap {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{default_feature_vector, FeatureVec};
    use greencart_core::{DietFlag, Footprint};
    use std::collections::BTreeSet;

    fn record(
        id: &str,
        category: &str,
        price: f64,
        vegetarian: bool,
        allergens: &[&str],
    ) -> CatalogRecord {
        let mut flags = BTreeSet::new();
        if vegetarian {
            flags.insert(DietFlag::Vegetarian);
        }
        CatalogRecord {
            id: id.into(),
            name: id.into(),
            brand: None,
            category: category.into(),
            price,
            dietary_flags: flags,
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
            health_score: 0.5,
            features: FeatureVec::new(),
        }
    }

    fn generator() -> CandidateGenerator {
        let store = Arc::new(
            FootprintStore::from_entries(
                [
                    ("beef_001", Footprint::of(60.0, 225.0)),
                    ("chicken_001", Footprint::of(6.9, 4.0)),
                    ("tofu_001", Footprint::of(2.0, 0.25)),
                    ("almond_milk_001", Footprint::of(0.7, 0.04)),
                ],
                Some(Footprint::DEFAULT_FALLBACK),
            )
            .unwrap(),
        );

        let mut records = vec![
            record("beef_001", "Beef", 8.99, false, &[]),
            record("chicken_001", "Chicken", 6.99, false, &[]),
            record("tofu_001", "Tofu", 3.99, true, &["soy"]),
            record("almond_milk_001", "Plant Milk", 4.99, true, &["nuts"]),
        ];
        for r in &mut records {
            let (fp, _) = store.resolve(&r.id, &r.category).unwrap();
            r.features = default_feature_vector(r, fp);
        }

        let index = CatalogIndex::new(records)
            .with_substitution_group(["Beef", "Chicken", "Tofu"]);
        CandidateGenerator::new(Arc::new(index), store)
    }

    #[test]
    fn test_candidates_exclude_source_and_respect_limit() {
        let generator = generator();
        let candidates =
            generator.find_candidates("beef_001", &ShopperConstraints::none(), 1);
        assert_eq!(candidates.len(), 1);
        assert_ne!(candidates[0].target_product_id, "beef_001");
    }

    #[test]
    fn test_vegetarian_filter_is_hard() {
        let generator = generator();
        let mut constraints = ShopperConstraints::none();
        constraints.vegetarian = true;

        let candidates = generator.find_candidates("beef_001", &constraints, 10);
        assert!(candidates.iter().all(|c| c.target_product_id == "tofu_001"));
        assert!(!candidates.is_empty());
    }

    #[test]
    fn test_allergen_filter_is_hard() {
        let generator = generator();
        let mut constraints = ShopperConstraints::none();
        constraints.allergens.insert("soy".to_string());

        let candidates = generator.find_candidates("beef_001", &constraints, 10);
        assert!(candidates
            .iter()
            .all(|c| !c.target_allergens.contains("soy")));
    }

    #[test]
    fn test_unknown_product_yields_empty() {
        let generator = generator();
        assert!(generator
            .find_candidates("nope", &ShopperConstraints::none(), 10)
            .is_empty());
    }

    #[test]
    fn test_cache_returns_identical_results() {
        let generator = generator();
        let constraints = ShopperConstraints::none();
        let first = generator.find_candidates("beef_001", &constraints, 10);
        let second = generator.find_candidates("beef_001", &constraints, 10);
        assert_eq!(first, second);

        generator.clear_cache();
        let third = generator.find_candidates("beef_001", &constraints, 10);
        assert_eq!(first, third);
    }
}

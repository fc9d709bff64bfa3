//! Shopper constraints applied during candidate generation and search

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Hard constraints a shopper imposes on substitutions.
///
/// Candidate-level filters (diet, allergens, brand lock, unit price cap)
/// are enforced by the candidate generator; `max_price_delta` is a
/// basket-level drift bound enforced by the optimizer and, when set,
/// overrides the configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShopperConstraints {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    /// Allergens that must not appear anywhere in the basket.
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    /// When true, substitutes must keep the source product's brand.
    #[serde(default)]
    pub brand_locked: bool,
    /// Optional per-unit price ceiling on substitutes.
    #[serde(default)]
    pub max_unit_price: Option<f64>,
    /// Optional override of the configured basket price drift bound.
    #[serde(default)]
    pub max_price_delta: Option<f64>,
}

impl ShopperConstraints {
    /// Unconstrained search.
    pub fn none() -> Self {
        Self::default()
    }

    /// Stable hash used to key the candidate generator's memo cache.
    ///
    /// Float fields are hashed by bit pattern; NaN never occurs because
    /// constraint values come from validated configuration.
    pub fn cache_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.vegetarian.hash(&mut hasher);
        self.vegan.hash(&mut hasher);
        self.allergens.hash(&mut hasher);
        self.brand_locked.hash(&mut hasher);
        self.max_unit_price.map(f64::to_bits).hash(&mut hasher);
        self.max_price_delta.map(f64::to_bits).hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_distinguishes_constraints() {
        let base = ShopperConstraints::none();
        let mut veg = ShopperConstraints::none();
        veg.vegetarian = true;
        let mut nutfree = ShopperConstraints::none();
        nutfree.allergens.insert("nuts".to_string());

        assert_eq!(base.cache_key(), ShopperConstraints::none().cache_key());
        assert_ne!(base.cache_key(), veg.cache_key());
        assert_ne!(veg.cache_key(), nutfree.cache_key());
    }

    #[test]
    fn test_cache_key_sees_price_fields() {
        let mut capped = ShopperConstraints::none();
        capped.max_unit_price = Some(5.0);
        assert_ne!(capped.cache_key(), ShopperConstraints::none().cache_key());
    }
}

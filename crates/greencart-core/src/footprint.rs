//! Footprint - Emissions factors with uncertainty, and the store that owns them

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GreenCartError, Result};

/// An emissions factor attached to a product or category.
///
/// `mean` is kg CO2e per unit quantity; `variance` captures the spread of
/// the underlying life-cycle assessment data. Both are non-negative once a
/// footprint has passed through [`FootprintStore`] loading.
///
/// # Examples
///
/// ```
/// use greencart_core::Footprint;
///
/// let beef = Footprint::of(60.0, 225.0);
/// assert_eq!(beef.mean(), 60.0);
/// assert_eq!(beef.std_dev(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Footprint {
    mean: f64,
    variance: f64,
}

impl Footprint {
    /// The zero footprint.
    pub const ZERO: Footprint = Footprint {
        mean: 0.0,
        variance: 0.0,
    };

    /// Conservative mid-range fallback applied to products the store
    /// cannot resolve.
    pub const DEFAULT_FALLBACK: Footprint = Footprint {
        mean: 5.0,
        variance: 2.0,
    };

    /// Creates a new footprint with the given mean and variance.
    #[inline]
    pub const fn of(mean: f64, variance: f64) -> Self {
        Footprint { mean, variance }
    }

    /// Returns the mean emissions factor.
    #[inline]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the variance of the emissions factor.
    #[inline]
    pub const fn variance(&self) -> f64 {
        self.variance
    }

    /// Returns the standard deviation of the emissions factor.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    fn validate(&self, key: &str) -> Result<()> {
        if self.mean < 0.0 || !self.mean.is_finite() {
            return Err(GreenCartError::Config(format!(
                "footprint '{key}' has invalid mean {}",
                self.mean
            )));
        }
        if self.variance < 0.0 || !self.variance.is_finite() {
            return Err(GreenCartError::Config(format!(
                "footprint '{key}' has invalid variance {}",
                self.variance
            )));
        }
        Ok(())
    }
}

/// How a product's footprint was resolved during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintSource {
    /// Matched the product id directly.
    Product,
    /// Fell back to the product's category.
    Category,
    /// Fell back to the store-wide default factor.
    Default,
}

/// A read-only table of emissions factors keyed by product id or category.
///
/// Loaded once per process and shared across requests; never mutated after
/// construction, so concurrent readers need no locking. Keys are
/// normalized (trimmed, lowercased) on insert and lookup.
#[derive(Debug, Clone, Default)]
pub struct FootprintStore {
    by_key: HashMap<String, Footprint>,
    default: Option<Footprint>,
}

impl FootprintStore {
    /// Builds a store from `(key, footprint)` entries and an optional
    /// default fallback.
    ///
    /// # Errors
    ///
    /// Returns [`GreenCartError::Config`] if any factor is negative or
    /// non-finite.
    pub fn from_entries<I, K>(entries: I, default: Option<Footprint>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Footprint)>,
        K: AsRef<str>,
    {
        let mut by_key = HashMap::new();
        for (key, footprint) in entries {
            let key = key.as_ref();
            footprint.validate(key)?;
            by_key.insert(normalize_key(key), footprint);
        }
        if let Some(fallback) = &default {
            fallback.validate("<default>")?;
        }
        Ok(FootprintStore { by_key, default })
    }

    /// Looks up a footprint by exact (normalized) key.
    pub fn get(&self, key: &str) -> Option<Footprint> {
        self.by_key.get(&normalize_key(key)).copied()
    }

    /// Resolves a product's footprint: product id, then category, then the
    /// store default.
    ///
    /// # Errors
    ///
    /// Returns [`GreenCartError::UnresolvableProduct`] when nothing matches
    /// and no default was loaded.
    pub fn resolve(&self, product_id: &str, category: &str) -> Result<(Footprint, FootprintSource)> {
        if let Some(footprint) = self.get(product_id) {
            return Ok((footprint, FootprintSource::Product));
        }
        if !category.is_empty() {
            if let Some(footprint) = self.get(category) {
                return Ok((footprint, FootprintSource::Category));
            }
        }
        self.default
            .map(|footprint| (footprint, FootprintSource::Default))
            .ok_or_else(|| GreenCartError::UnresolvableProduct(product_id.to_string()))
    }

    /// Returns the default fallback footprint, if one was loaded.
    #[inline]
    pub fn default_fallback(&self) -> Option<Footprint> {
        self.default
    }

    /// Returns the number of keyed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns whether the store has no keyed entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FootprintStore {
        FootprintStore::from_entries(
            [
                ("beef_001", Footprint::of(60.0, 225.0)),
                ("Beef", Footprint::of(27.0, 25.0)),
            ],
            Some(Footprint::DEFAULT_FALLBACK),
        )
        .unwrap()
    }

    #[test]
    fn test_resolution_order() {
        let store = store();

        let (fp, source) = store.resolve("beef_001", "Beef").unwrap();
        assert_eq!(fp.mean(), 60.0);
        assert_eq!(source, FootprintSource::Product);

        let (fp, source) = store.resolve("beef_999", "Beef").unwrap();
        assert_eq!(fp.mean(), 27.0);
        assert_eq!(source, FootprintSource::Category);

        let (fp, source) = store.resolve("mystery", "Unknown").unwrap();
        assert_eq!(fp, Footprint::DEFAULT_FALLBACK);
        assert_eq!(source, FootprintSource::Default);
    }

    #[test]
    fn test_key_normalization() {
        let store = store();
        assert_eq!(store.get("  BEEF  ").unwrap().mean(), 27.0);
    }

    #[test]
    fn test_unresolvable_without_default() {
        let store =
            FootprintStore::from_entries([("beef", Footprint::of(27.0, 25.0))], None).unwrap();
        let err = store.resolve("mystery", "Unknown").unwrap_err();
        assert!(matches!(err, GreenCartError::UnresolvableProduct(_)));
    }

    #[test]
    fn test_negative_factor_rejected() {
        let err = FootprintStore::from_entries([("bad", Footprint::of(-1.0, 0.0))], None)
            .unwrap_err();
        assert!(matches!(err, GreenCartError::Config(_)));
    }
}

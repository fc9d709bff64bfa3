//! Emissions aggregation with uncertainty propagation
//!
//! Line items are assumed statistically independent, so basket variance is
//! the plain sum of per-item variances scaled by quantity squared. This is
//! a stated simplification of the underlying assessment data, not a claim
//! of accuracy.

use serde::Serialize;

use crate::basket::Basket;
use crate::error::{GreenCartError, Result};
use crate::footprint::{FootprintSource, FootprintStore};

/// Per-item contribution to the basket total, with resolution provenance.
///
/// A `Default` source marks degraded confidence: the product matched
/// neither its id nor its category and fell back to the store-wide factor.
#[derive(Debug, Clone, Serialize)]
pub struct ItemEmissions {
    pub product_id: String,
    pub emissions: f64,
    pub variance: f64,
    pub source: FootprintSource,
}

/// Total basket emissions with propagated uncertainty.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionsEstimate {
    pub mean: f64,
    pub variance: f64,
    pub items: Vec<ItemEmissions>,
}

impl EmissionsEstimate {
    /// Standard deviation of the basket total.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Computes total mean emissions and variance for a basket.
///
/// mean = Σ(factor_mean × quantity), variance = Σ(factor_variance × quantity²).
/// Every item is resolved through the store (product id → category →
/// default); items the store cannot place at all only fail when no default
/// was loaded.
///
/// # Errors
///
/// - [`GreenCartError::InvalidLineItem`] for any quantity ≤ 0 (the caller
///   decides whether to drop the item or abort).
/// - [`GreenCartError::UnresolvableProduct`] when resolution dead-ends.
pub fn aggregate(basket: &Basket, store: &FootprintStore) -> Result<EmissionsEstimate> {
    let mut mean = 0.0;
    let mut variance = 0.0;
    let mut items = Vec::with_capacity(basket.len());

    for item in basket.items() {
        if item.quantity <= 0.0 || !item.quantity.is_finite() {
            return Err(GreenCartError::InvalidLineItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }

        let (footprint, source) = store.resolve(&item.product_id, &item.category)?;
        let item_mean = footprint.mean() * item.quantity;
        let item_variance = footprint.variance() * item.quantity * item.quantity;

        mean += item_mean;
        variance += item_variance;
        items.push(ItemEmissions {
            product_id: item.product_id.clone(),
            emissions: item_mean,
            variance: item_variance,
            source,
        });
    }

    Ok(EmissionsEstimate {
        mean,
        variance,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::LineItem;
    use crate::footprint::Footprint;

    fn store() -> FootprintStore {
        FootprintStore::from_entries(
            [
                ("beef_001", Footprint::of(60.0, 225.0)),
                ("chicken_001", Footprint::of(6.9, 4.0)),
            ],
            Some(Footprint::DEFAULT_FALLBACK),
        )
        .unwrap()
    }

    #[test]
    fn test_mean_and_variance_propagation() {
        let basket = Basket::from_items(vec![
            LineItem::new("beef_001", 2.0, 8.99),
            LineItem::new("chicken_001", 1.0, 6.99),
        ]);

        let estimate = aggregate(&basket, &store()).unwrap();

        assert!((estimate.mean - (60.0 * 2.0 + 6.9)).abs() < 1e-9);
        assert!((estimate.variance - (225.0 * 4.0 + 4.0)).abs() < 1e-9);
        assert_eq!(estimate.items.len(), 2);
        assert_eq!(estimate.items[0].source, FootprintSource::Product);
    }

    #[test]
    fn test_fallback_is_visible_in_attribution() {
        let basket = Basket::from_items(vec![LineItem::new("mystery", 1.0, 1.0)]);
        let estimate = aggregate(&basket, &store()).unwrap();

        assert_eq!(estimate.items[0].source, FootprintSource::Default);
        assert!((estimate.mean - Footprint::DEFAULT_FALLBACK.mean()).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let basket = Basket::from_items(vec![LineItem::new("beef_001", 0.0, 8.99)]);
        let err = aggregate(&basket, &store()).unwrap_err();
        assert!(matches!(err, GreenCartError::InvalidLineItem { .. }));
    }

    #[test]
    fn test_empty_basket_is_zero() {
        let estimate = aggregate(&Basket::default(), &store()).unwrap();
        assert_eq!(estimate.mean, 0.0);
        assert_eq!(estimate.variance, 0.0);
    }
}

//! Basket and line-item types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::footprint::FootprintStore;

/// Dietary tags a product may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietFlag {
    Vegetarian,
    Vegan,
}

/// A single basket position: one product and its purchase quantity.
///
/// Emissions fields are optional because items arrive un-enriched from the
/// outside world; [`Basket::enriched`] joins them to the footprint store.
/// The optimizer requires enriched items as a precondition and never
/// performs the join itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub dietary_flags: BTreeSet<DietFlag>,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default)]
    pub emissions_mean: Option<f64>,
    #[serde(default)]
    pub emissions_variance: Option<f64>,
    #[serde(default = "default_health")]
    pub health_score: f64,
}

fn default_health() -> f64 {
    0.5
}

impl LineItem {
    /// Creates a bare line item; enrichment fills the remaining fields.
    pub fn new(product_id: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
            unit_price,
            category: String::new(),
            brand: None,
            dietary_flags: BTreeSet::new(),
            allergens: BTreeSet::new(),
            emissions_mean: None,
            emissions_variance: None,
            health_score: default_health(),
        }
    }

    /// Total price of this position.
    #[inline]
    pub fn line_cost(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// True when the item carries at least the vegetarian tag.
    #[inline]
    pub fn is_vegetarian(&self) -> bool {
        self.dietary_flags.contains(&DietFlag::Vegetarian)
            || self.dietary_flags.contains(&DietFlag::Vegan)
    }

    /// True when emissions data has been attached.
    #[inline]
    pub fn is_enriched(&self) -> bool {
        self.emissions_mean.is_some() && self.emissions_variance.is_some()
    }
}

/// An ordered sequence of line items.
///
/// Order is preserved for stable output only; it carries no scoring
/// semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    /// Creates a basket from line items, preserving their order.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Basket { items }
    }

    /// Returns the line items in input order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consumes the basket, yielding its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Returns the number of line items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the basket holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total basket cost: Σ unit_price × quantity.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(LineItem::line_cost).sum()
    }

    /// Mean line-item health score; 0.5 for an empty basket.
    pub fn mean_health(&self) -> f64 {
        if self.items.is_empty() {
            return 0.5;
        }
        self.items.iter().map(|i| i.health_score).sum::<f64>() / self.items.len() as f64
    }

    /// Returns a copy of this basket with every item's emissions fields
    /// filled from the store (product id, then category, then default).
    ///
    /// Items that already carry emissions data are left untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::GreenCartError::UnresolvableProduct`] when an
    /// item cannot be resolved and the store has no default.
    pub fn enriched(&self, store: &FootprintStore) -> Result<Basket> {
        let mut items = self.items.clone();
        for item in &mut items {
            if item.is_enriched() {
                continue;
            }
            let (footprint, _) = store.resolve(&item.product_id, &item.category)?;
            item.emissions_mean = Some(footprint.mean());
            item.emissions_variance = Some(footprint.variance());
        }
        Ok(Basket { items })
    }
}

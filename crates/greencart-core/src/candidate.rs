//! Swap candidates proposed by the candidate generator

use std::collections::BTreeSet;

use serde::Serialize;

use crate::basket::DietFlag;
use crate::footprint::Footprint;

/// A proposed single-item substitution, annotated with everything the
/// optimizer needs to build and check a successor basket without further
/// catalog lookups.
///
/// Deltas are per-unit factors: `emissions_delta` is source − target
/// (positive = improvement), `price_delta` is target − source.
/// Generated fresh per optimization call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapCandidate {
    pub source_product_id: String,
    pub target_product_id: String,
    pub emissions_delta: f64,
    pub price_delta: f64,
    /// Normalized similarity to the source product, in [0, 1].
    pub similarity: f64,
    pub category: String,
    pub target_footprint: Footprint,
    pub target_price: f64,
    pub target_brand: Option<String>,
    pub target_dietary_flags: BTreeSet<DietFlag>,
    pub target_allergens: BTreeSet<String>,
    pub target_health: f64,
    pub brand_change: bool,
}

impl SwapCandidate {
    /// True when the substitution lowers per-unit emissions.
    #[inline]
    pub fn is_improvement(&self) -> bool {
        self.emissions_delta > 0.0
    }

    /// True when the target carries at least the vegetarian tag.
    #[inline]
    pub fn target_is_vegetarian(&self) -> bool {
        self.target_dietary_flags.contains(&DietFlag::Vegetarian)
            || self.target_dietary_flags.contains(&DietFlag::Vegan)
    }
}

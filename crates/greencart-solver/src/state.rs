//! Beam search node: one candidate basket and its score

use greencart_core::{Footprint, LineItem, SwapCandidate};

use crate::objective::{score, ObjectiveWeights};

/// A candidate basket inside the beam.
///
/// Each state owns an independent copy of its item list: constructing a
/// child copies the parent's items and replaces exactly one, so mutating
/// one state can never be visible through another. States are destroyed
/// when pruned out of the beam.
#[derive(Debug, Clone)]
pub struct BasketState {
    items: Vec<LineItem>,
    similarity: Vec<f64>,
    score: f64,
}

impl BasketState {
    /// Creates the root state from the original basket (every position at
    /// similarity 1.0).
    pub fn root(items: Vec<LineItem>, weights: &ObjectiveWeights) -> Self {
        let similarity = vec![1.0; items.len()];
        let score = score(&items, &similarity, weights);
        BasketState {
            items,
            similarity,
            score,
        }
    }

    /// Creates a successor with `position` substituted by the candidate's
    /// target product. The parent is left untouched.
    pub fn child(
        &self,
        position: usize,
        candidate: &SwapCandidate,
        weights: &ObjectiveWeights,
    ) -> Self {
        let mut items = self.items.clone();
        items[position] = swapped_item(&items[position], candidate);

        let mut similarity = self.similarity.clone();
        similarity[position] = candidate.similarity;

        let score = score(&items, &similarity, weights);
        BasketState {
            items,
            similarity,
            score,
        }
    }

    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Per-position similarity to the original basket.
    #[inline]
    pub fn similarity(&self) -> &[f64] {
        &self.similarity
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Total basket cost of this state.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(LineItem::line_cost).sum()
    }
}

/// Builds the replacement line item for a swap, carrying the candidate's
/// full target data and the original purchase quantity.
pub(crate) fn swapped_item(original: &LineItem, candidate: &SwapCandidate) -> LineItem {
    LineItem {
        product_id: candidate.target_product_id.clone(),
        quantity: original.quantity,
        unit_price: candidate.target_price,
        category: candidate.category.clone(),
        brand: candidate.target_brand.clone(),
        dietary_flags: candidate.target_dietary_flags.clone(),
        allergens: candidate.target_allergens.clone(),
        emissions_mean: Some(candidate.target_footprint.mean()),
        emissions_variance: Some(candidate.target_footprint.variance()),
        health_score: candidate.target_health,
    }
}

/// Reconstructs the swap that turned `original` into `replacement` at one
/// basket position, from the two items and the state's recorded
/// similarity.
pub(crate) fn diffed_candidate(
    original: &LineItem,
    replacement: &LineItem,
    similarity: f64,
) -> SwapCandidate {
    SwapCandidate {
        source_product_id: original.product_id.clone(),
        target_product_id: replacement.product_id.clone(),
        emissions_delta: original.emissions_mean.unwrap_or(0.0)
            - replacement.emissions_mean.unwrap_or(0.0),
        price_delta: replacement.unit_price - original.unit_price,
        similarity,
        category: replacement.category.clone(),
        target_footprint: Footprint::of(
            replacement.emissions_mean.unwrap_or(0.0),
            replacement.emissions_variance.unwrap_or(0.0),
        ),
        target_price: replacement.unit_price,
        target_brand: replacement.brand.clone(),
        target_dietary_flags: replacement.dietary_flags.clone(),
        target_allergens: replacement.allergens.clone(),
        target_health: replacement.health_score,
        brand_change: replacement.brand != original.brand,
    }
}

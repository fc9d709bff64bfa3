//! The multi-objective function guiding the beam search

use greencart_config::WeightsConfig;
use greencart_core::LineItem;

/// Non-negative weights for the objective terms.
///
/// Defaults favour emissions, with cost as a mild tiebreaker,
/// dissimilarity discouraging drift from the shopper's own choices, and
/// health discouraging nutritionally regressive swaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveWeights {
    pub emissions: f64,
    pub cost: f64,
    pub dissimilarity: f64,
    pub health: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            emissions: 1.0,
            cost: 0.1,
            dissimilarity: 0.5,
            health: 0.3,
        }
    }
}

impl From<&WeightsConfig> for ObjectiveWeights {
    fn from(config: &WeightsConfig) -> Self {
        ObjectiveWeights {
            emissions: config.emissions,
            cost: config.cost,
            dissimilarity: config.dissimilarity,
            health: config.health,
        }
    }
}

/// Scores a candidate basket: J(B') = α·E(B') + β·C(B') + γ·D(B, B') + δ·(1 − H(B')).
///
/// Lower is better. `similarity_to_original` holds, per position, the
/// similarity between the item now at that position and the item the
/// shopper originally chose (1.0 where unchanged); D is the whole-basket
/// average of (1 - similarity). J is not normalized across basket sizes;
/// only comparisons within one optimization run are meaningful.
pub fn score(items: &[LineItem], similarity_to_original: &[f64], weights: &ObjectiveWeights) -> f64 {
    let emissions: f64 = items
        .iter()
        .map(|item| item.emissions_mean.unwrap_or(0.0) * item.quantity)
        .sum();
    let cost: f64 = items.iter().map(LineItem::line_cost).sum();

    let (dissimilarity, health) = if items.is_empty() {
        (0.0, 0.5)
    } else {
        let dissimilarity = similarity_to_original
            .iter()
            .map(|sim| 1.0 - sim)
            .sum::<f64>()
            / items.len() as f64;
        let health =
            items.iter().map(|item| item.health_score).sum::<f64>() / items.len() as f64;
        (dissimilarity, health)
    };

    weights.emissions * emissions
        + weights.cost * cost
        + weights.dissimilarity * dissimilarity
        + weights.health * (1.0 - health)
}

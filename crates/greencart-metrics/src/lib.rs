//! GreenCart Metrics - Decision-facing numbers derived from analysis output
//!
//! Pure functions over already-computed upstream results. Nothing here
//! raises for degenerate inputs: zero baskets, zero baseline emissions and
//! non-positive reductions all map to documented sentinel values so a
//! report can always be rendered.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use greencart_behavior::AcceptanceRecord;
use greencart_core::Basket;

/// Supported confidence levels for the risk-adjusted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    P90,
    #[default]
    P95,
    P99,
}

impl Confidence {
    /// Standard normal quantile for this level.
    #[inline]
    pub const fn z(&self) -> f64 {
        match self {
            Confidence::P90 => 1.645,
            Confidence::P95 => 1.96,
            Confidence::P99 => 2.576,
        }
    }

    /// Maps a numeric level to the nearest supported value; anything
    /// unsupported defaults to 0.95.
    pub fn from_level(level: f64) -> Self {
        if (level - 0.90).abs() < 1e-9 {
            Confidence::P90
        } else if (level - 0.99).abs() < 1e-9 {
            Confidence::P99
        } else {
            Confidence::P95
        }
    }
}

/// Per-product purchase frequencies; products missing from the table
/// default to 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrequencyTable(HashMap<String, f64>);

impl FrequencyTable {
    pub fn new(frequencies: HashMap<String, f64>) -> Self {
        FrequencyTable(frequencies)
    }

    #[inline]
    pub fn frequency(&self, product_id: &str) -> f64 {
        self.0.get(product_id).copied().unwrap_or(1.0)
    }
}

impl FromIterator<(String, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        FrequencyTable(iter.into_iter().collect())
    }
}

/// The emissions left on the table by the as-is basket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpportunityGap {
    pub gap: f64,
    /// Gap as a fraction of baseline; 0 when the baseline is 0.
    pub ratio: f64,
}

/// Opportunity gap between baseline and optimized emissions.
pub fn opportunity_gap(baseline_emissions: f64, optimized_emissions: f64) -> OpportunityGap {
    let gap = baseline_emissions - optimized_emissions;
    let ratio = if baseline_emissions > 0.0 {
        gap / baseline_emissions
    } else {
        0.0
    };
    OpportunityGap { gap, ratio }
}

/// Hypothetical savings discounted by predicted adoption:
/// Σ probability × emissions delta over the proposed swaps.
pub fn behavior_adjusted_savings(records: &[AcceptanceRecord]) -> f64 {
    records
        .iter()
        .map(|record| record.probability * record.features.emissions_delta)
        .sum()
}

/// Upper confidence bound on emissions accounting for data uncertainty:
/// mean + z × √variance.
///
/// # Examples
///
/// ```
/// use greencart_metrics::{risk_adjusted_score, Confidence};
///
/// let score = risk_adjusted_score(50.0, 25.0, Confidence::P95);
/// assert!((score - 59.8).abs() < 0.01);
/// ```
pub fn risk_adjusted_score(mean: f64, variance: f64, confidence: Confidence) -> f64 {
    mean + confidence.z() * variance.max(0.0).sqrt()
}

/// Marginal monetary cost per unit of emissions avoided.
///
/// `f64::INFINITY` when the emissions reduction is not positive: the
/// "undefined" sentinel, never a division by zero.
pub fn abatement_cost(
    baseline_cost: f64,
    optimized_cost: f64,
    baseline_emissions: f64,
    optimized_emissions: f64,
) -> f64 {
    let reduction = baseline_emissions - optimized_emissions;
    if reduction <= 0.0 {
        return f64::INFINITY;
    }
    (optimized_cost - baseline_cost) / reduction
}

/// Projects basket emissions over recurring purchases:
/// Σ frequency × item emissions. Un-enriched items contribute 0.
pub fn recurring_projection(basket: &Basket, frequencies: &FrequencyTable) -> f64 {
    basket
        .items()
        .iter()
        .map(|item| {
            frequencies.frequency(&item.product_id)
                * item.emissions_mean.unwrap_or(0.0)
                * item.quantity
        })
        .sum()
}

/// Rescales emissions to [0, 1] against a reference range; 0 when the
/// range is degenerate.
pub fn normalize_emissions(emissions: f64, reference_min: f64, reference_max: f64) -> f64 {
    if reference_max <= reference_min {
        return 0.0;
    }
    ((emissions - reference_min) / (reference_max - reference_min)).clamp(0.0, 1.0)
}

/// Composite carbon/health score:
/// λ × (1 − normalized emissions) + (1 − λ) × health.
pub fn composite_score(normalized_emissions: f64, health_score: f64, lambda: f64) -> f64 {
    let lambda = lambda.clamp(0.0, 1.0);
    lambda * (1.0 - normalized_emissions) + (1.0 - lambda) * health_score
}

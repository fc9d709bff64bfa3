//! The serializable analysis report

use serde::Serialize;

use greencart_core::{Basket, ItemEmissions};

/// One proposed swap with its predicted adoption probability.
#[derive(Debug, Clone, Serialize)]
pub struct SwapReport {
    pub position: usize,
    pub source_product_id: String,
    pub target_product_id: String,
    /// Per-unit emissions factor delta, source − target.
    pub emissions_delta: f64,
    /// Per-unit price delta, target − source.
    pub price_delta: f64,
    pub similarity: f64,
    pub acceptance_probability: f64,
}

/// Everything `analyze` derives for one basket.
///
/// All numerics are plain floats; probabilities are in [0, 1]. The report
/// always renders: degenerate inputs surface as sentinel values
/// (`abatement_cost` is `None` when no emissions were avoided), never as
/// errors.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub baseline_emissions: f64,
    pub baseline_variance: f64,
    pub baseline_cost: f64,
    /// Per-item emissions with resolution provenance; `default` entries
    /// mark degraded confidence.
    pub attribution: Vec<ItemEmissions>,
    /// Upper confidence bound on baseline emissions.
    pub risk_adjusted_score: f64,

    pub optimized_basket: Basket,
    pub optimized_emissions: f64,
    pub optimized_variance: f64,
    pub optimized_cost: f64,

    pub opportunity_gap: f64,
    pub opportunity_gap_ratio: f64,
    pub behavior_adjusted_savings: f64,
    /// Cost per unit of emissions avoided; `None` when undefined.
    pub abatement_cost: Option<f64>,
    /// Projected recurring emissions of the as-is basket.
    pub recurring_projection: f64,
    /// Composite carbon/health score of the optimized basket.
    pub composite_score: f64,

    pub swaps: Vec<SwapReport>,
    /// Mean acceptance probability over proposed swaps; 0 with no swaps.
    pub average_acceptance: f64,
}

//! Feature extraction for acceptance prediction

use serde::{Deserialize, Serialize};

use greencart_core::SwapCandidate;

/// How a swap suggestion is framed to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFraming {
    /// Plain numbers ("saves 4.2 kg CO2e").
    Numeric,
    /// Narrative, conversational phrasing.
    #[default]
    Conversational,
    /// Comparison against peer shoppers.
    SocialComparison,
}

/// Shopper history and disposition relevant to acceptance.
///
/// Never mutated by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// Fraction of past suggestions this shopper accepted.
    pub prior_acceptance_rate: f64,
    /// Self-reported or inferred sustainability affinity, in [0, 1].
    pub sustainability_affinity: f64,
}

impl Default for UserContext {
    fn default() -> Self {
        UserContext {
            prior_acceptance_rate: 0.3,
            sustainability_affinity: 0.5,
        }
    }
}

/// The feature vector both acceptance strategies consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapFeatures {
    pub price_delta: f64,
    pub emissions_delta: f64,
    pub similarity: f64,
    pub brand_change: bool,
    pub prior_acceptance_rate: f64,
    pub sustainability_affinity: f64,
    pub framing: MessageFraming,
}

impl SwapFeatures {
    /// Assembles the feature vector for a candidate swap.
    pub fn from_swap(swap: &SwapCandidate, user: &UserContext, framing: MessageFraming) -> Self {
        SwapFeatures {
            price_delta: swap.price_delta,
            emissions_delta: swap.emissions_delta,
            similarity: swap.similarity,
            brand_change: swap.brand_change,
            prior_acceptance_rate: user.prior_acceptance_rate,
            sustainability_affinity: user.sustainability_affinity,
            framing,
        }
    }

    /// Flattens to the numeric layout trained classifiers are calibrated
    /// against: price delta, emissions delta, similarity, brand change,
    /// prior acceptance rate, sustainability affinity, then one-hot
    /// conversational and social-comparison indicators.
    pub fn to_vector(&self) -> [f64; 8] {
        [
            self.price_delta,
            self.emissions_delta,
            self.similarity,
            if self.brand_change { 1.0 } else { 0.0 },
            self.prior_acceptance_rate,
            self.sustainability_affinity,
            if self.framing == MessageFraming::Conversational {
                1.0
            } else {
                0.0
            },
            if self.framing == MessageFraming::SocialComparison {
                1.0
            } else {
                0.0
            },
        ]
    }
}

//! Logistic classifier honouring the trained-model runtime contract

use serde::{Deserialize, Serialize};

use crate::features::SwapFeatures;
use crate::model::AcceptanceClassifier;

/// A calibrated logistic regression over [`SwapFeatures::to_vector`].
///
/// Coefficients are produced by an external training pipeline and loaded
/// through serde; only the runtime contract lives here. Missing trailing
/// weights are treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticAcceptance {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticAcceptance {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        LogisticAcceptance { weights, bias }
    }
}

impl AcceptanceClassifier for LogisticAcceptance {
    fn predict_probability(&self, features: &SwapFeatures) -> f64 {
        let x = features.to_vector();
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(x.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        sigmoid(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::MessageFraming;

    fn features(emissions_delta: f64) -> SwapFeatures {
        SwapFeatures {
            price_delta: 0.5,
            emissions_delta,
            similarity: 0.7,
            brand_change: false,
            prior_acceptance_rate: 0.3,
            sustainability_affinity: 0.5,
            framing: MessageFraming::Conversational,
        }
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(-50.0) < 1e-9);
        assert!(sigmoid(50.0) > 1.0 - 1e-9);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_positive_emissions_weight_is_monotone() {
        let model = LogisticAcceptance::new(vec![0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], -1.0);

        let low = model.predict_probability(&features(0.0));
        let high = model.predict_probability(&features(5.0));
        assert!(low < high);
        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
    }

    #[test]
    fn test_short_weight_vector_ignores_missing_features() {
        let truncated = LogisticAcceptance::new(vec![0.1], 0.0);
        let full = LogisticAcceptance::new(vec![0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0);

        let f = features(3.0);
        assert_eq!(
            truncated.predict_probability(&f),
            full.predict_probability(&f)
        );
    }
}

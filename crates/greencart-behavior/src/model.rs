//! The acceptance model: one `predict` contract, two strategies

use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::features::SwapFeatures;
use crate::heuristic::HeuristicAcceptance;

/// Runtime contract of a trained acceptance classifier.
///
/// Implementations must be pure with respect to the feature vector and
/// produce calibrated probabilities; the model wrapper clamps to [0, 1]
/// regardless.
pub trait AcceptanceClassifier: Debug + Send + Sync {
    fn predict_probability(&self, features: &SwapFeatures) -> f64;
}

/// Acceptance prediction, polymorphic over the serving strategy.
///
/// Constructed from an optional trained classifier; absence selects the
/// heuristic fallback locally, so a missing model never surfaces to
/// callers.
#[derive(Debug, Clone)]
pub enum AcceptanceModel {
    Trained(Arc<dyn AcceptanceClassifier>),
    Heuristic(HeuristicAcceptance),
}

impl AcceptanceModel {
    /// Selects the trained strategy when a classifier is supplied, the
    /// heuristic otherwise.
    pub fn from_classifier(classifier: Option<Arc<dyn AcceptanceClassifier>>) -> Self {
        match classifier {
            Some(classifier) => AcceptanceModel::Trained(classifier),
            None => AcceptanceModel::Heuristic(HeuristicAcceptance),
        }
    }

    /// The heuristic fallback strategy.
    pub fn heuristic() -> Self {
        AcceptanceModel::Heuristic(HeuristicAcceptance)
    }

    /// Predicts the probability that a shopper accepts the swap described
    /// by `features`. Always in [0, 1]; never mutates anything.
    pub fn predict(&self, features: &SwapFeatures) -> f64 {
        let raw = match self {
            AcceptanceModel::Trained(classifier) => classifier.predict_probability(features),
            AcceptanceModel::Heuristic(heuristic) => heuristic.predict(features),
        };
        let probability = if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 };

        debug!(
            event = "acceptance_prediction",
            strategy = self.strategy_name(),
            emissions_delta = features.emissions_delta,
            price_delta = features.price_delta,
            probability,
        );

        probability
    }

    fn strategy_name(&self) -> &'static str {
        match self {
            AcceptanceModel::Trained(_) => "trained",
            AcceptanceModel::Heuristic(_) => "heuristic",
        }
    }
}

impl Default for AcceptanceModel {
    fn default() -> Self {
        AcceptanceModel::heuristic()
    }
}

/// A swap's predicted adoption, kept alongside the features that produced
/// it. Ephemeral; computed per report.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptanceRecord {
    pub features: SwapFeatures,
    pub probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::MessageFraming;

    #[derive(Debug)]
    struct ConstantClassifier(f64);

    impl AcceptanceClassifier for ConstantClassifier {
        fn predict_probability(&self, _features: &SwapFeatures) -> f64 {
            self.0
        }
    }

    fn features() -> SwapFeatures {
        SwapFeatures {
            price_delta: 0.0,
            emissions_delta: 3.0,
            similarity: 0.8,
            brand_change: false,
            prior_acceptance_rate: 0.3,
            sustainability_affinity: 0.5,
            framing: MessageFraming::Conversational,
        }
    }

    #[test]
    fn test_missing_classifier_falls_back() {
        let model = AcceptanceModel::from_classifier(None);
        assert!(matches!(model, AcceptanceModel::Heuristic(_)));

        let p = model.predict(&features());
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_trained_strategy_served_through_same_contract() {
        let model = AcceptanceModel::from_classifier(Some(Arc::new(ConstantClassifier(0.42))));
        assert_eq!(model.predict(&features()), 0.42);
    }

    #[test]
    fn test_out_of_range_classifier_output_clamped() {
        let model = AcceptanceModel::from_classifier(Some(Arc::new(ConstantClassifier(1.7))));
        assert_eq!(model.predict(&features()), 1.0);

        let model = AcceptanceModel::from_classifier(Some(Arc::new(ConstantClassifier(-0.2))));
        assert_eq!(model.predict(&features()), 0.0);
    }

    #[test]
    fn test_non_finite_classifier_output_is_zero() {
        let model = AcceptanceModel::from_classifier(Some(Arc::new(ConstantClassifier(f64::NAN))));
        assert_eq!(model.predict(&features()), 0.0);
    }
}

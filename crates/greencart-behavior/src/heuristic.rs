//! Deterministic fallback acceptance heuristic

use crate::features::{MessageFraming, SwapFeatures};

/// Base acceptance rate under plain numeric framing.
pub const NUMERIC_BASE_RATE: f64 = 0.17;

/// Additive bump for narrative (conversational) framing.
pub const NARRATIVE_BUMP: f64 = 0.19;

/// Additive bump for social-comparison framing.
pub const SOCIAL_COMPARISON_BUMP: f64 = 0.12;

/// Multiplier applied when the swap costs more than the original.
const PRICE_INCREASE_PENALTY: f64 = 0.8;

/// Multiplier applied when the swap changes brand.
const BRAND_CHANGE_PENALTY: f64 = 0.95;

/// Heuristic acceptance model used when no trained classifier is
/// available.
///
/// Monotonically non-decreasing in `emissions_delta` and `similarity`;
/// the framing contribution is a fixed additive bump on the numeric base
/// rate. Output is clamped to [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAcceptance;

impl HeuristicAcceptance {
    pub fn predict(&self, features: &SwapFeatures) -> f64 {
        let mut p = NUMERIC_BASE_RATE
            + match features.framing {
                MessageFraming::Numeric => 0.0,
                MessageFraming::Conversational => NARRATIVE_BUMP,
                MessageFraming::SocialComparison => SOCIAL_COMPARISON_BUMP,
            };

        p += 0.15 * features.similarity.clamp(0.0, 1.0);
        p += 0.02 * features.emissions_delta.clamp(0.0, 10.0);

        if features.price_delta > 0.0 {
            p *= PRICE_INCREASE_PENALTY;
        }
        if features.brand_change {
            p *= BRAND_CHANGE_PENALTY;
        }

        // Blend toward the shopper's own history, then scale by affinity
        // (0.5 affinity is neutral).
        p = 0.7 * p + 0.3 * features.prior_acceptance_rate.clamp(0.0, 1.0);
        p *= 0.8 + 0.4 * features.sustainability_affinity.clamp(0.0, 1.0);

        p.clamp(0.0, 1.0)
    }
}

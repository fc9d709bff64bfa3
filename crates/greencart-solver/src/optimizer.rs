//! Beam-search basket optimization under hard constraints

use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, info};

use greencart_catalog::CandidateGenerator;
use greencart_config::EngineConfig;
use greencart_core::{
    Basket, GreenCartError, LineItem, Result, ShopperConstraints, SwapCandidate,
};

use crate::beam::Beam;
use crate::deadline::Deadline;
use crate::objective::ObjectiveWeights;
use crate::state::{diffed_candidate, swapped_item, BasketState};

/// Scores within this tolerance of the baseline count as "no improvement".
const SCORE_TOLERANCE: f64 = 1e-9;

/// A swap the optimizer applied, anchored to its basket position.
#[derive(Debug, Clone)]
pub struct AppliedSwap {
    pub position: usize,
    pub candidate: SwapCandidate,
}

/// Outcome of one optimization call. Immutable once produced.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// The best basket found (the input basket when nothing improved).
    pub basket: Basket,
    /// Applied swaps relative to the input basket, in position order.
    pub swaps: Vec<AppliedSwap>,
    /// Objective score of `basket`.
    pub score: f64,
    /// Objective score of the unmodified input basket.
    pub baseline_score: f64,
}

impl OptimizationResult {
    /// True when the optimizer found no viable improvement.
    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.swaps.is_empty()
    }
}

/// Replays applied swaps onto a basket, item by item.
///
/// Applying a result's swaps to the basket it was computed from
/// reproduces the result's optimized basket exactly.
pub fn apply_swaps(basket: &Basket, swaps: &[AppliedSwap]) -> Basket {
    let mut items = basket.items().to_vec();
    for swap in swaps {
        if let Some(item) = items.get_mut(swap.position) {
            *item = swapped_item(item, &swap.candidate);
        }
    }
    Basket::from_items(items)
}

/// Beam search over sequential single-item substitutions.
///
/// Positions are visited in original input order; candidates are
/// generated for the original product at each position. Every surviving
/// successor is scored with the weighted objective and the beam keeps the
/// K best of the merged current states and successors. The unmodified
/// original is not privileged in the working beam, but the no-swap basket
/// remains a valid outcome whenever nothing improves on it.
///
/// Line items must arrive enriched (emissions attached); the optimizer
/// never joins the footprint store implicitly.
#[derive(Debug)]
pub struct BasketOptimizer {
    generator: Arc<CandidateGenerator>,
    weights: ObjectiveWeights,
    beam_width: usize,
    max_candidates: usize,
    max_price_delta: f64,
    time_limit: Option<Duration>,
}

impl BasketOptimizer {
    /// Creates an optimizer with default weights, beam width 10, 10
    /// candidates per position, and a 3% price drift bound.
    pub fn new(generator: Arc<CandidateGenerator>) -> Self {
        BasketOptimizer {
            generator,
            weights: ObjectiveWeights::default(),
            beam_width: 10,
            max_candidates: 10,
            max_price_delta: 0.03,
            time_limit: None,
        }
    }

    /// Builds an optimizer from engine configuration.
    pub fn from_config(generator: Arc<CandidateGenerator>, config: &EngineConfig) -> Self {
        BasketOptimizer {
            generator,
            weights: (&config.weights).into(),
            beam_width: config.beam_width,
            max_candidates: config.max_candidates,
            max_price_delta: config.max_price_delta,
            time_limit: config.time_limit(),
        }
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the beam width K.
    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width.max(1);
        self
    }

    /// Sets the maximum candidates considered per basket position.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    /// Sets the basket price drift bound.
    pub fn with_max_price_delta(mut self, max_price_delta: f64) -> Self {
        self.max_price_delta = max_price_delta;
        self
    }

    /// Bounds optimization wall-clock time; checked between basket
    /// positions only.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Runs the beam search and returns the best basket found.
    ///
    /// A run where no candidate ever survives constraint filtering
    /// returns the original basket with zero swaps: a valid "no
    /// improvement found" outcome, not an error.
    ///
    /// # Errors
    ///
    /// - [`GreenCartError::InvalidLineItem`] for any quantity ≤ 0.
    /// - [`GreenCartError::UnresolvableProduct`] for items missing
    ///   emissions enrichment.
    pub fn optimize(
        &self,
        basket: &Basket,
        constraints: &ShopperConstraints,
    ) -> Result<OptimizationResult> {
        self.validate(basket)?;

        let original_items = basket.items().to_vec();
        let original_cost = basket.total_cost();
        let max_price_delta = constraints.max_price_delta.unwrap_or(self.max_price_delta);

        let root = BasketState::root(original_items.clone(), &self.weights);
        let baseline_score = root.score();
        let mut beam = Beam::new(self.beam_width, root);

        info!(
            event = "optimize_start",
            positions = basket.len(),
            beam_width = self.beam_width,
            baseline_score,
        );

        let deadline = self.time_limit.map(Deadline::after);
        let mut positions_visited = 0usize;

        for position in 0..original_items.len() {
            if let Some(deadline) = &deadline {
                if deadline.is_exceeded() {
                    debug!(
                        event = "deadline_exceeded",
                        position,
                        elapsed_ms = deadline.elapsed().as_millis() as u64,
                    );
                    break;
                }
            }

            let candidates = self.generator.find_candidates(
                &original_items[position].product_id,
                constraints,
                self.max_candidates,
            );
            positions_visited += 1;

            if candidates.is_empty() {
                debug!(event = "position", position, candidates = 0usize);
                continue;
            }

            let successors: Vec<BasketState> = beam
                .states()
                .par_iter()
                .flat_map_iter(|state| {
                    candidates.iter().filter_map(|candidate| {
                        if successor_satisfies(
                            state,
                            position,
                            candidate,
                            constraints,
                            original_cost,
                            max_price_delta,
                        ) {
                            Some(state.child(position, candidate, &self.weights))
                        } else {
                            None
                        }
                    })
                })
                .collect();

            debug!(
                event = "position",
                position,
                candidates = candidates.len(),
                survivors = successors.len(),
                best_score = beam.best().score(),
            );

            beam.merge_and_prune(successors);
        }

        let best = beam.into_best();
        let result = if best.score() > baseline_score + SCORE_TOLERANCE {
            OptimizationResult {
                basket: basket.clone(),
                swaps: Vec::new(),
                score: baseline_score,
                baseline_score,
            }
        } else {
            let swaps = diff_swaps(&original_items, &best);
            let score = best.score();
            OptimizationResult {
                basket: Basket::from_items(best.into_items()),
                swaps,
                score,
                baseline_score,
            }
        };

        info!(
            event = "optimize_end",
            positions_visited,
            swaps = result.swaps.len(),
            score = result.score,
            baseline_score,
        );

        Ok(result)
    }

    fn validate(&self, basket: &Basket) -> Result<()> {
        for item in basket.items() {
            if item.quantity <= 0.0 || !item.quantity.is_finite() {
                return Err(GreenCartError::InvalidLineItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                });
            }
            if !item.is_enriched() {
                return Err(GreenCartError::UnresolvableProduct(item.product_id.clone()));
            }
        }
        Ok(())
    }
}

/// Basket-level hard constraint check for one candidate successor,
/// evaluated without materializing the successor. Rejected successors are
/// never scored and never enter the beam.
fn successor_satisfies(
    state: &BasketState,
    position: usize,
    candidate: &SwapCandidate,
    constraints: &ShopperConstraints,
    original_cost: f64,
    max_price_delta: f64,
) -> bool {
    let replaced = &state.items()[position];
    let successor_cost =
        state.total_cost() - replaced.line_cost() + candidate.target_price * replaced.quantity;

    // Drift is measured against the original basket; skipped when the
    // original cost is zero.
    if original_cost > 0.0
        && (successor_cost - original_cost).abs() / original_cost > max_price_delta
    {
        return false;
    }

    let diet_required = constraints.vegetarian || constraints.vegan;
    for (index, item) in state.items().iter().enumerate() {
        let (vegetarian, allergens) = if index == position {
            (
                candidate.target_is_vegetarian(),
                &candidate.target_allergens,
            )
        } else {
            (item.is_vegetarian(), &item.allergens)
        };

        if diet_required && !vegetarian {
            return false;
        }
        if constraints.vegan && allergens.contains("dairy") {
            return false;
        }
        if allergens
            .iter()
            .any(|allergen| constraints.allergens.contains(allergen))
        {
            return false;
        }
    }

    true
}

/// Reconstructs applied swaps by diffing product ids position-by-position
/// against the original items.
fn diff_swaps(original_items: &[LineItem], best: &BasketState) -> Vec<AppliedSwap> {
    original_items
        .iter()
        .zip(best.items())
        .enumerate()
        .filter(|(_, (original, replacement))| original.product_id != replacement.product_id)
        .map(|(position, (original, replacement))| AppliedSwap {
            position,
            candidate: diffed_candidate(original, replacement, best.similarity()[position]),
        })
        .collect()
}

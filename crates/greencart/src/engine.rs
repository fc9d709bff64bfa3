//! The composed analysis engine

use std::sync::Arc;

use tracing::info;

use greencart_behavior::{
    AcceptanceClassifier, AcceptanceModel, AcceptanceRecord, LogisticAcceptance, MessageFraming,
    SwapFeatures, UserContext,
};
use greencart_catalog::{CandidateGenerator, CatalogIndex};
use greencart_config::{AcceptanceStrategyConfig, EngineConfig, FramingConfig};
use greencart_core::{
    aggregate, Basket, FootprintStore, GreenCartError, Result, ShopperConstraints,
};
use greencart_metrics as metrics;
use greencart_metrics::{Confidence, FrequencyTable};
use greencart_solver::BasketOptimizer;

use crate::report::{AnalysisReport, SwapReport};

/// Orchestrates one basket analysis: enrichment, aggregation, beam-search
/// optimization, acceptance prediction, and derived metrics.
///
/// The footprint store and catalog are injected explicitly and shared
/// read-only across requests; each `analyze` call owns all of its
/// intermediate state, so concurrent calls need no locking.
#[derive(Debug)]
pub struct Engine {
    store: Arc<FootprintStore>,
    catalog: Arc<CatalogIndex>,
    optimizer: BasketOptimizer,
    acceptance: AcceptanceModel,
    framing: MessageFraming,
    frequencies: FrequencyTable,
    config: EngineConfig,
}

impl Engine {
    /// Builds an engine from its injected collaborators and a validated
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GreenCartError::Config`] when the configuration fails
    /// validation.
    pub fn new(
        store: Arc<FootprintStore>,
        catalog: Arc<CatalogIndex>,
        config: EngineConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|err| GreenCartError::Config(err.to_string()))?;

        let generator = Arc::new(CandidateGenerator::new(catalog.clone(), store.clone()));
        let optimizer = BasketOptimizer::from_config(generator, &config);

        let acceptance = match &config.acceptance.strategy {
            AcceptanceStrategyConfig::Heuristic => AcceptanceModel::heuristic(),
            AcceptanceStrategyConfig::Logistic(coefficients) => {
                AcceptanceModel::from_classifier(Some(Arc::new(LogisticAcceptance::new(
                    coefficients.weights.clone(),
                    coefficients.bias,
                ))))
            }
        };

        let framing = match config.acceptance.framing {
            FramingConfig::Numeric => MessageFraming::Numeric,
            FramingConfig::Conversational => MessageFraming::Conversational,
            FramingConfig::SocialComparison => MessageFraming::SocialComparison,
        };

        Ok(Engine {
            store,
            catalog,
            optimizer,
            acceptance,
            framing,
            frequencies: FrequencyTable::default(),
            config,
        })
    }

    /// Replaces the acceptance strategy with an externally trained
    /// classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn AcceptanceClassifier>) -> Self {
        self.acceptance = AcceptanceModel::from_classifier(Some(classifier));
        self
    }

    /// Supplies per-product purchase frequencies for the recurring
    /// projection.
    pub fn with_frequencies(mut self, frequencies: FrequencyTable) -> Self {
        self.frequencies = frequencies;
        self
    }

    /// Analyzes a basket end to end.
    ///
    /// The basket may arrive un-enriched; items are joined to the catalog
    /// and footprint store first. A basket no item of which resolves
    /// beyond the default factor still completes, with the degraded
    /// confidence visible in the report's attribution.
    ///
    /// # Errors
    ///
    /// Propagates the optimizer's and aggregator's eager validation
    /// ([`GreenCartError::InvalidLineItem`],
    /// [`GreenCartError::UnresolvableProduct`]).
    pub fn analyze(
        &self,
        basket: &Basket,
        constraints: &ShopperConstraints,
        user: &UserContext,
    ) -> Result<AnalysisReport> {
        info!(event = "analysis_start", items = basket.len());

        let enriched = self.enrich(basket)?;
        let baseline = aggregate(&enriched, &self.store)?;
        let baseline_cost = enriched.total_cost();

        let optimization = self.optimizer.optimize(&enriched, constraints)?;
        let optimized = aggregate(&optimization.basket, &self.store)?;
        let optimized_cost = optimization.basket.total_cost();

        let records: Vec<AcceptanceRecord> = optimization
            .swaps
            .iter()
            .map(|swap| {
                let features = SwapFeatures::from_swap(&swap.candidate, user, self.framing);
                AcceptanceRecord {
                    features,
                    probability: self.acceptance.predict(&features),
                }
            })
            .collect();

        let gap = metrics::opportunity_gap(baseline.mean, optimized.mean);
        let savings = metrics::behavior_adjusted_savings(&records);
        let risk_adjusted = metrics::risk_adjusted_score(
            baseline.mean,
            baseline.variance,
            Confidence::from_level(self.config.metrics.confidence_level),
        );
        let abatement = metrics::abatement_cost(
            baseline_cost,
            optimized_cost,
            baseline.mean,
            optimized.mean,
        );
        let recurring = metrics::recurring_projection(&enriched, &self.frequencies);
        let composite = metrics::composite_score(
            metrics::normalize_emissions(
                optimized.mean,
                self.config.metrics.reference_emissions_min,
                self.config.metrics.reference_emissions_max,
            ),
            optimization.basket.mean_health(),
            self.config.metrics.lambda,
        );

        let average_acceptance = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.probability).sum::<f64>() / records.len() as f64
        };

        let swaps: Vec<SwapReport> = optimization
            .swaps
            .iter()
            .zip(&records)
            .map(|(swap, record)| SwapReport {
                position: swap.position,
                source_product_id: swap.candidate.source_product_id.clone(),
                target_product_id: swap.candidate.target_product_id.clone(),
                emissions_delta: swap.candidate.emissions_delta,
                price_delta: swap.candidate.price_delta,
                similarity: swap.candidate.similarity,
                acceptance_probability: record.probability,
            })
            .collect();

        info!(
            event = "analysis_end",
            baseline_emissions = baseline.mean,
            optimized_emissions = optimized.mean,
            swaps = swaps.len(),
            opportunity_gap = gap.gap,
        );

        Ok(AnalysisReport {
            baseline_emissions: baseline.mean,
            baseline_variance: baseline.variance,
            baseline_cost,
            attribution: baseline.items,
            risk_adjusted_score: risk_adjusted,
            optimized_basket: optimization.basket,
            optimized_emissions: optimized.mean,
            optimized_variance: optimized.variance,
            optimized_cost,
            opportunity_gap: gap.gap,
            opportunity_gap_ratio: gap.ratio,
            behavior_adjusted_savings: savings,
            abatement_cost: abatement.is_finite().then_some(abatement),
            recurring_projection: recurring,
            composite_score: composite,
            swaps,
            average_acceptance,
        })
    }

    /// Joins items to the catalog and the footprint store. Category,
    /// brand, and tags are filled only when unset; the health score always
    /// follows the catalog record; emissions already attached by the
    /// caller are kept.
    fn enrich(&self, basket: &Basket) -> Result<Basket> {
        let mut items = basket.items().to_vec();
        for item in &mut items {
            if let Some(record) = self.catalog.product(&item.product_id) {
                if item.category.is_empty() {
                    item.category = record.category.clone();
                }
                if item.brand.is_none() {
                    item.brand = record.brand.clone();
                }
                if item.dietary_flags.is_empty() {
                    item.dietary_flags = record.dietary_flags.clone();
                }
                if item.allergens.is_empty() {
                    item.allergens = record.allergens.clone();
                }
                item.health_score = record.health_score;
            }
        }
        Basket::from_items(items).enriched(&self.store)
    }
}

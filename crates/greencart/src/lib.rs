//! GreenCart - Basket-level emissions scoring and substitution search
//!
//! GreenCart scores the greenhouse-gas footprint of a shopping basket and
//! searches for lower-footprint substitutions under cost, dietary, and
//! allergen constraints:
//! - Emissions aggregation with uncertainty propagation
//! - Constrained multi-objective beam search over single-item swaps
//! - Acceptance-probability modelling of proposed swaps
//! - Decision metrics: opportunity gap, behavior-adjusted savings,
//!   risk-adjusted score, abatement cost, recurring projection, composite
//!   carbon/health score
//!
//! The [`Engine`] wires the pieces together behind a single
//! [`Engine::analyze`] entry point.

pub mod engine;
pub mod report;

pub use engine::Engine;
pub use report::{AnalysisReport, SwapReport};

pub use greencart_behavior::{
    AcceptanceClassifier, AcceptanceModel, AcceptanceRecord, HeuristicAcceptance,
    LogisticAcceptance, MessageFraming, SwapFeatures, UserContext,
};
pub use greencart_catalog::{
    cosine_similarity, default_feature_vector, CandidateGenerator, CatalogIndex, CatalogRecord,
    FeatureVec,
};
pub use greencart_config::{
    AcceptanceConfig, AcceptanceStrategyConfig, ConfigError, EngineConfig, FramingConfig,
    LogisticConfig, MetricsConfig, TerminationConfig, WeightsConfig,
};
pub use greencart_core::{
    aggregate, Basket, DietFlag, EmissionsEstimate, Footprint, FootprintSource, FootprintStore,
    GreenCartError, ItemEmissions, LineItem, Result, ShopperConstraints, SwapCandidate,
};
pub use greencart_metrics::{
    abatement_cost, behavior_adjusted_savings, composite_score, normalize_emissions,
    opportunity_gap, recurring_projection, risk_adjusted_score, Confidence, FrequencyTable,
    OpportunityGap,
};
pub use greencart_solver::{
    apply_swaps, AppliedSwap, BasketOptimizer, ObjectiveWeights, OptimizationResult,
};

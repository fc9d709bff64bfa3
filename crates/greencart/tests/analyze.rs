//! End-to-end analysis tests over the synthetic fixture catalog.

use std::sync::Arc;

use greencart::{
    AcceptanceClassifier, Engine, EngineConfig, FrequencyTable, ShopperConstraints, SwapFeatures,
    UserContext,
};
use greencart_test::{fixture_basket, fixture_catalog, fixture_store};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn engine(config: EngineConfig) -> Engine {
    let store = fixture_store();
    let catalog = fixture_catalog(&store);
    Engine::new(store, catalog, config).unwrap()
}

#[test]
fn test_beef_basket_analysis() {
    init_tracing();
    let engine = engine(EngineConfig::new().with_beam_width(5).with_max_price_delta(1.0));
    let basket = fixture_basket(&[("beef_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    assert!((report.baseline_emissions - 60.0).abs() < 1e-9);
    assert!((report.baseline_variance - 225.0).abs() < 1e-9);
    assert!(report.opportunity_gap > 0.0);
    assert!(report.opportunity_gap_ratio > 0.0 && report.opportunity_gap_ratio <= 1.0);
    assert_eq!(report.swaps.len(), 1);
    assert!(report.optimized_emissions < report.baseline_emissions);

    // Substitutes here are all cheaper than beef, so abatement is defined
    // and negative (saving money per kg avoided).
    let abatement = report.abatement_cost.unwrap();
    assert!(abatement.is_finite());
    assert!(abatement < 0.0);

    for swap in &report.swaps {
        assert!((0.0..=1.0).contains(&swap.acceptance_probability));
    }
    assert!((0.0..=1.0).contains(&report.average_acceptance));
    assert!(report.average_acceptance > 0.0);
}

#[test]
fn test_savings_bounded_by_raw_deltas() {
    let engine = engine(EngineConfig::new().with_max_price_delta(1.0));
    let basket = fixture_basket(&[("beef_001", 1.0), ("milk_001", 1.0), ("pork_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    let raw: f64 = report.swaps.iter().map(|s| s.emissions_delta).sum();
    assert!(report.behavior_adjusted_savings <= raw + 1e-9);
}

#[test]
fn test_zero_price_delta_yields_no_swaps() {
    let engine = engine(EngineConfig::new());
    let basket = fixture_basket(&[("beef_001", 1.0)]);
    let mut constraints = ShopperConstraints::none();
    constraints.max_price_delta = Some(0.0);

    let report = engine
        .analyze(&basket, &constraints, &UserContext::default())
        .unwrap();

    assert!(report.swaps.is_empty());
    assert_eq!(report.opportunity_gap, 0.0);
    assert_eq!(report.abatement_cost, None);
    assert_eq!(report.average_acceptance, 0.0);
    assert_eq!(report.optimized_cost, report.baseline_cost);
}

#[test]
fn test_unknown_products_complete_with_default_attribution() {
    init_tracing();
    let engine = engine(EngineConfig::new());
    let basket = greencart::Basket::from_items(vec![
        greencart::LineItem::new("mystery_123", 2.0, 3.50),
        greencart::LineItem::new("mystery_456", 1.0, 1.25),
    ]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    assert!(report.baseline_emissions > 0.0);
    assert!(report
        .attribution
        .iter()
        .all(|item| item.source == greencart::FootprintSource::Default));
    assert!(report.swaps.is_empty());
}

#[test]
fn test_vegan_constraint_end_to_end() {
    let engine = engine(EngineConfig::new().with_max_price_delta(0.2));
    let basket = fixture_basket(&[("milk_001", 1.0)]);
    let mut constraints = ShopperConstraints::none();
    constraints.vegan = true;

    let report = engine
        .analyze(&basket, &constraints, &UserContext::default())
        .unwrap();

    assert_eq!(report.swaps.len(), 1);
    for item in report.optimized_basket.items() {
        assert!(!item.allergens.contains("dairy"));
    }
    assert!(report.optimized_emissions < report.baseline_emissions);
}

#[test]
fn test_risk_adjusted_score_exceeds_mean() {
    let engine = engine(EngineConfig::new());
    let basket = fixture_basket(&[("beef_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    // 60 + 1.96 × 15 at the default 0.95 level.
    assert!((report.risk_adjusted_score - 89.4).abs() < 0.01);
}

#[test]
fn test_recurring_projection_uses_frequency_table() {
    let frequencies: FrequencyTable = [("milk_001".to_string(), 52.0)].into_iter().collect();
    let engine = engine(EngineConfig::new()).with_frequencies(frequencies);
    let basket = fixture_basket(&[("milk_001", 1.0), ("beans_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    assert!((report.recurring_projection - (52.0 * 3.2 + 1.0 * 0.9)).abs() < 1e-9);
}

#[test]
fn test_logistic_strategy_from_config() {
    let config = EngineConfig::from_toml_str(
        r#"
        max_price_delta = 1.0

        [acceptance.strategy]
        type = "logistic"
        weights = [-0.05, 0.3, 0.5, -0.1, 0.4, 0.3, 0.15, 0.1]
        bias = -1.2
    "#,
    )
    .unwrap();
    let engine = engine(config);
    let basket = fixture_basket(&[("beef_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    assert!(!report.swaps.is_empty());
    for swap in &report.swaps {
        assert!((0.0..=1.0).contains(&swap.acceptance_probability));
    }
}

#[test]
fn test_external_classifier_override() {
    #[derive(Debug)]
    struct Always(f64);
    impl AcceptanceClassifier for Always {
        fn predict_probability(&self, _features: &SwapFeatures) -> f64 {
            self.0
        }
    }

    let engine = engine(EngineConfig::new().with_max_price_delta(1.0))
        .with_classifier(Arc::new(Always(0.75)));
    let basket = fixture_basket(&[("beef_001", 1.0)]);

    let report = engine
        .analyze(&basket, &ShopperConstraints::none(), &UserContext::default())
        .unwrap();

    assert!(!report.swaps.is_empty());
    assert!(report
        .swaps
        .iter()
        .all(|swap| swap.acceptance_probability == 0.75));
}

#[test]
fn test_report_serializes_to_json() {
    let engine = engine(EngineConfig::new());
    let basket = fixture_basket(&[("beef_001", 1.0)]);
    let mut constraints = ShopperConstraints::none();
    constraints.max_price_delta = Some(0.0);

    let report = engine
        .analyze(&basket, &constraints, &UserContext::default())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["abatement_cost"], serde_json::Value::Null);
    assert!(json["baseline_emissions"].as_f64().unwrap() > 0.0);
    assert!(json["swaps"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let store = fixture_store();
    let catalog = fixture_catalog(&store);
    let config = EngineConfig::new().with_beam_width(0);

    let err = Engine::new(store, catalog, config).unwrap_err();
    assert!(matches!(err, greencart::GreenCartError::Config(_)));
}

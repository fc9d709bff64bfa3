use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        beam_width = 5
        max_candidates = 8
        max_price_delta = 0.05

        [weights]
        emissions = 2.0
        cost = 0.2

        [termination]
        millis_spent_limit = 250

        [acceptance]
        framing = "numeric"
        [acceptance.strategy]
        type = "logistic"
        weights = [0.0, 0.4]
        bias = -0.8
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.beam_width, 5);
    assert_eq!(config.max_candidates, 8);
    assert_eq!(config.max_price_delta, 0.05);
    assert_eq!(config.weights.emissions, 2.0);
    assert_eq!(config.weights.cost, 0.2);
    assert_eq!(config.weights.dissimilarity, 0.5);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    assert_eq!(config.acceptance.framing, FramingConfig::Numeric);
    assert!(matches!(
        config.acceptance.strategy,
        AcceptanceStrategyConfig::Logistic(_)
    ));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        beam_width: 3
        weights:
          emissions: 1.5
        metrics:
          lambda: 0.7
          confidence_level: 0.99
        acceptance:
          framing: social_comparison
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.beam_width, 3);
    assert_eq!(config.weights.emissions, 1.5);
    assert_eq!(config.metrics.lambda, 0.7);
    assert_eq!(config.metrics.confidence_level, 0.99);
    assert_eq!(config.acceptance.framing, FramingConfig::SocialComparison);
}

#[test]
fn test_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config.beam_width, 10);
    assert_eq!(config.max_candidates, 10);
    assert_eq!(config.max_price_delta, 0.03);
    assert_eq!(config.weights.emissions, 1.0);
    assert_eq!(config.weights.health, 0.3);
    assert_eq!(config.metrics.lambda, 0.5);
    assert!(config.time_limit().is_none());
    assert!(matches!(
        config.acceptance.strategy,
        AcceptanceStrategyConfig::Heuristic
    ));
    config.validate().unwrap();
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_beam_width(4)
        .with_max_price_delta(0.1)
        .with_time_limit_millis(500);

    assert_eq!(config.beam_width, 4);
    assert_eq!(config.max_price_delta, 0.1);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(500)));
}

#[test]
fn test_validation_rejects_zero_beam() {
    let config = EngineConfig::new().with_beam_width(0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(msg)) if msg.contains("beam_width")
    ));
}

#[test]
fn test_validation_rejects_negative_weight() {
    let mut config = EngineConfig::new();
    config.weights.cost = -0.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(msg)) if msg.contains("weights.cost")
    ));
}

#[test]
fn test_validation_rejects_bad_lambda() {
    let mut config = EngineConfig::new();
    config.metrics.lambda = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(msg)) if msg.contains("lambda")
    ));
}

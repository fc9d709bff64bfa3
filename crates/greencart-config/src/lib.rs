//! Configuration system for GreenCart.
//!
//! Load engine configuration from TOML or YAML files to control beam
//! search, objective weights, acceptance strategy, and metric parameters
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use greencart_config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     beam_width = 5
//!     max_price_delta = 0.05
//!
//!     [weights]
//!     emissions = 1.0
//!     cost = 0.1
//!
//!     [acceptance]
//!     framing = "conversational"
//!     [acceptance.strategy]
//!     type = "logistic"
//!     weights = [0.0, 0.4, 0.3, -0.1, 0.2, 0.2, 0.1, 0.05]
//!     bias = -0.8
//! "#).unwrap();
//!
//! assert_eq!(config.beam_width, 5);
//! config.validate().unwrap();
//! ```
//!
//! Use defaults when a file is missing:
//!
//! ```
//! use greencart_config::EngineConfig;
//!
//! let config = EngineConfig::load("engine.toml").unwrap_or_default();
//! assert_eq!(config.beam_width, 10);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Beam width K: candidate basket states retained between steps.
    #[serde(default = "default_beam_width")]
    pub beam_width: usize,

    /// Maximum substitute candidates considered per basket position.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Allowed basket cost drift as a fraction of the original cost.
    #[serde(default = "default_max_price_delta")]
    pub max_price_delta: f64,

    /// Objective function weights.
    #[serde(default)]
    pub weights: WeightsConfig,

    /// Acceptance model configuration.
    #[serde(default)]
    pub acceptance: AcceptanceConfig,

    /// Metric parameters.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Optional wall-clock bound on the optimizer.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

fn default_beam_width() -> usize {
    10
}

fn default_max_candidates() -> usize {
    10
}

fn default_max_price_delta() -> f64 {
    0.03
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            beam_width: default_beam_width(),
            max_candidates: default_max_candidates(),
            max_price_delta: default_max_price_delta(),
            weights: WeightsConfig::default(),
            acceptance: AcceptanceConfig::default(),
            metrics: MetricsConfig::default(),
            termination: None,
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the beam width.
    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width;
        self
    }

    /// Sets the basket price drift bound.
    pub fn with_max_price_delta(mut self, max_price_delta: f64) -> Self {
        self.max_price_delta = max_price_delta;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: WeightsConfig) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the optimizer time limit.
    pub fn with_time_limit_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
        });
        self
    }

    /// Returns the optimizer time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beam_width == 0 {
            return Err(ConfigError::Invalid("beam_width must be at least 1".into()));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid(
                "max_candidates must be at least 1".into(),
            ));
        }
        if !self.max_price_delta.is_finite() || self.max_price_delta < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_price_delta must be a non-negative fraction, got {}",
                self.max_price_delta
            )));
        }
        self.weights.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

/// Objective function weights (all non-negative).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeightsConfig {
    #[serde(default = "default_weight_emissions")]
    pub emissions: f64,
    #[serde(default = "default_weight_cost")]
    pub cost: f64,
    #[serde(default = "default_weight_dissimilarity")]
    pub dissimilarity: f64,
    #[serde(default = "default_weight_health")]
    pub health: f64,
}

fn default_weight_emissions() -> f64 {
    1.0
}

fn default_weight_cost() -> f64 {
    0.1
}

fn default_weight_dissimilarity() -> f64 {
    0.5
}

fn default_weight_health() -> f64 {
    0.3
}

impl Default for WeightsConfig {
    fn default() -> Self {
        WeightsConfig {
            emissions: default_weight_emissions(),
            cost: default_weight_cost(),
            dissimilarity: default_weight_dissimilarity(),
            health: default_weight_health(),
        }
    }
}

impl WeightsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("weights.emissions", self.emissions),
            ("weights.cost", self.cost),
            ("weights.dissimilarity", self.dissimilarity),
            ("weights.health", self.health),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Acceptance model configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AcceptanceConfig {
    /// Serving strategy; the heuristic fallback when absent.
    #[serde(default)]
    pub strategy: AcceptanceStrategyConfig,

    /// How suggestions are framed to the shopper.
    #[serde(default)]
    pub framing: FramingConfig,
}

/// Acceptance serving strategy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptanceStrategyConfig {
    /// Deterministic fallback heuristic.
    #[default]
    Heuristic,

    /// Calibrated logistic coefficients produced by an external training
    /// pipeline.
    Logistic(LogisticConfig),
}

/// Coefficients for the logistic acceptance strategy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LogisticConfig {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Message framing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingConfig {
    Numeric,
    #[default]
    Conversational,
    SocialComparison,
}

/// Metric parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsConfig {
    /// Carbon-vs-health weight λ in the composite score.
    #[serde(default = "default_lambda")]
    pub lambda: f64,

    /// Confidence level for the risk-adjusted score; unsupported values
    /// fall back to 0.95 at use sites.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Reference range for emissions normalization.
    #[serde(default)]
    pub reference_emissions_min: f64,
    #[serde(default = "default_reference_emissions_max")]
    pub reference_emissions_max: f64,
}

fn default_lambda() -> f64 {
    0.5
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_reference_emissions_max() -> f64 {
    100.0
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            lambda: default_lambda(),
            confidence_level: default_confidence_level(),
            reference_emissions_min: 0.0,
            reference_emissions_max: default_reference_emissions_max(),
        }
    }
}

impl MetricsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.lambda) {
            return Err(ConfigError::Invalid(format!(
                "metrics.lambda must be in [0, 1], got {}",
                self.lambda
            )));
        }
        if self.reference_emissions_max < self.reference_emissions_min {
            return Err(ConfigError::Invalid(
                "metrics.reference_emissions_max must not be below reference_emissions_min".into(),
            ));
        }
        Ok(())
    }
}

/// Optimizer termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum milliseconds to spend optimizing.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.millis_spent_limit.map(Duration::from_millis)
    }
}

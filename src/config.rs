//! Solver configuration.
//!
//! Each stage has its own parameter block; [`HybridConfig`] groups them with
//! the run-wide seed and time limit. All blocks deserialize from TOML with
//! per-field defaults, so a partial file is valid:
//!
//! ```
//! use u_hybrid_vrptw::config::HybridConfig;
//!
//! let config = HybridConfig::from_toml_str(r#"
//!     seed = 7
//!
//!     [aco]
//!     n_ants = 20
//!
//!     [tabu]
//!     tabu_tenure = 5
//! "#).unwrap();
//!
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.aco.n_ants, 20);
//! assert_eq!(config.aco.alpha, 1.0);
//! assert_eq!(config.ga.population_size, 50);
//! assert_eq!(config.tabu.tabu_tenure, 5);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ant colony construction parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Solutions built per round.
    pub n_ants: usize,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Inverse-distance exponent.
    pub beta: f64,
    /// Evaporation rate in `[0, 1]`.
    pub rho: f64,
    /// Number of rounds.
    pub iterations: usize,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            iterations: 5,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per round.
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the pheromone and distance exponents.
    pub fn with_weights(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the number of rounds.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_ants == 0 || self.iterations == 0 {
            return Err(invalid("aco: n_ants and iterations must be positive"));
        }
        if !(self.alpha >= 0.0 && self.beta >= 0.0) {
            return Err(invalid("aco: alpha and beta must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(invalid("aco: rho must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Genetic refinement parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Number of generations.
    pub generations: usize,
    /// Probability of applying swap mutation to a child.
    pub mutation_rate: f64,
    /// Individuals copied unchanged into the next generation (at least the
    /// best-known one is always kept).
    pub elitism_size: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            mutation_rate: 0.1,
            elitism_size: 1,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elitism_size(mut self, n: usize) -> Self {
        self.elitism_size = n;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(invalid("ga: population_size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("ga: mutation_rate must lie in [0, 1]"));
        }
        if self.elitism_size > self.population_size {
            return Err(invalid("ga: elitism_size exceeds population_size"));
        }
        Ok(())
    }
}

/// Tabu search parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Number of search steps.
    pub max_steps: usize,
    /// Capacity of the tabu list.
    pub tabu_tenure: usize,
    /// Move attempts per step.
    pub neighborhood_size: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_steps: 50,
            tabu_tenure: 10,
            neighborhood_size: 50,
        }
    }
}

impl TabuConfig {
    /// Sets the number of steps.
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, n: usize) -> Self {
        self.tabu_tenure = n;
        self
    }

    /// Sets the number of move attempts per step.
    pub fn with_neighborhood_size(mut self, n: usize) -> Self {
        self.neighborhood_size = n;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tabu_tenure == 0 {
            return Err(invalid("tabu: tabu_tenure must be positive"));
        }
        Ok(())
    }
}

/// Configuration of the full three-stage pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Construction stage.
    pub aco: AcoConfig,
    /// Refinement stage.
    pub ga: GaConfig,
    /// Local-search stage.
    pub tabu: TabuConfig,
    /// Random seed (None draws one from entropy).
    pub seed: Option<u64>,
    /// Wall-clock limit for the whole solve, in seconds.
    pub time_limit_secs: Option<f64>,
}

impl HybridConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Sets the construction parameters.
    pub fn with_aco(mut self, aco: AcoConfig) -> Self {
        self.aco = aco;
        self
    }

    /// Sets the refinement parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the local-search parameters.
    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = Some(limit.as_secs_f64());
        self
    }

    /// The wall-clock limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }

    /// Validates every stage block.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aco.validate()?;
        self.ga.validate()?;
        self.tabu.validate()?;
        if let Some(secs) = self.time_limit_secs {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(invalid(
                    "time_limit_secs must be a non-negative number of representable size",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HybridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aco.n_ants, 10);
        assert_eq!(config.aco.beta, 2.0);
        assert_eq!(config.ga.elitism_size, 1);
        assert_eq!(config.tabu.neighborhood_size, 50);
        assert!(config.time_limit().is_none());
    }

    #[test]
    fn test_builders() {
        let config = HybridConfig::default()
            .with_aco(AcoConfig::default().with_n_ants(3).with_rho(0.5))
            .with_ga(GaConfig::default().with_generations(7))
            .with_tabu(TabuConfig::default().with_max_steps(9))
            .with_seed(11)
            .with_time_limit(Duration::from_millis(1500));
        assert_eq!(config.aco.n_ants, 3);
        assert_eq!(config.aco.rho, 0.5);
        assert_eq!(config.ga.generations, 7);
        assert_eq!(config.tabu.max_steps, 9);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = HybridConfig::from_toml_str("").expect("valid");
        assert_eq!(config, HybridConfig::default());
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let err = HybridConfig::from_toml_str("[aco]\nrho = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = HybridConfig::from_toml_str("[ga]\npopulation_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = HybridConfig::from_toml_str("[aco\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = HybridConfig::load("/nonexistent/hybrid.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_oversized_time_limit_rejected() {
        let config = HybridConfig {
            time_limit_secs: Some(1e30),
            ..HybridConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.time_limit().is_none());

        let err = HybridConfig::from_toml_str("time_limit_secs = 1e30\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_or_nan_time_limit_rejected() {
        for secs in [-1.0, f64::NAN, f64::INFINITY] {
            let config = HybridConfig {
                time_limit_secs: Some(secs),
                ..HybridConfig::default()
            };
            assert!(config.validate().is_err());
            assert!(config.time_limit().is_none());
        }
    }

    #[test]
    fn test_validate_ranges() {
        assert!(AcoConfig::default().with_n_ants(0).validate().is_err());
        assert!(AcoConfig::default().with_weights(-1.0, 2.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(1.1).validate().is_err());
        assert!(GaConfig::default()
            .with_population_size(2)
            .with_elitism_size(3)
            .validate()
            .is_err());
        assert!(TabuConfig::default().with_tabu_tenure(0).validate().is_err());
    }
}

//! Resampling configuration

use crate::constants::{DEFAULT_K_NEIGHBORS, DEFAULT_RANDOM_STATE};
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// What to do when the minority class is too small for `k_neighbors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NeighborPolicy {
    /// Fail with `InsufficientSamples`
    #[default]
    Strict,
    /// Use `n_minority - 1` neighbours; a lone minority row is duplicated
    Shrink,
}

/// Which members of a Tomek link are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TomekStrategy {
    /// Only the majority-class member
    #[default]
    Majority,
    /// Both members
    All,
}

/// Configuration for the combined SMOTE + Tomek resampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResamplerConfig {
    /// Neighbours used for synthetic interpolation
    pub k_neighbors: usize,

    /// Seed for synthetic sample generation
    pub random_state: u64,

    pub neighbor_policy: NeighborPolicy,

    pub tomek_strategy: TomekStrategy,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            random_state: DEFAULT_RANDOM_STATE,
            neighbor_policy: NeighborPolicy::Strict,
            tomek_strategy: TomekStrategy::Majority,
        }
    }
}

impl ResamplerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject settings the samplers cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.k_neighbors == 0 {
            return Err(PipelineError::ConfigError(
                "k_neighbors must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder method to set the neighbour count
    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    /// Builder method to set the random seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Builder method to set the neighbour policy
    pub fn with_neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = policy;
        self
    }

    /// Builder method to set the Tomek removal strategy
    pub fn with_tomek_strategy(mut self, strategy: TomekStrategy) -> Self {
        self.tomek_strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResamplerConfig::default();
        assert_eq!(config.k_neighbors, 5);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.neighbor_policy, NeighborPolicy::Strict);
        assert_eq!(config.tomek_strategy, TomekStrategy::Majority);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ResamplerConfig::new()
            .with_k_neighbors(3)
            .with_random_state(7)
            .with_neighbor_policy(NeighborPolicy::Shrink)
            .with_tomek_strategy(TomekStrategy::All);

        assert_eq!(config.k_neighbors, 3);
        assert_eq!(config.random_state, 7);
        assert!(config.validate().is_ok());
        assert_eq!(config.neighbor_policy, NeighborPolicy::Shrink);
        assert_eq!(config.tomek_strategy, TomekStrategy::All);
    }

    #[test]
    fn test_zero_neighbors_rejected() {
        let config = ResamplerConfig::new().with_k_neighbors(0);
        assert_eq!(config.k_neighbors, 0);
        assert!(matches!(config.validate(), Err(PipelineError::ConfigError(_))));
    }

    #[test]
    fn test_policy_serialize() {
        let json = serde_json::to_string(&NeighborPolicy::Shrink).unwrap();
        assert_eq!(json, "\"Shrink\"");
    }
}

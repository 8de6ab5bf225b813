//! Configuration for the pricing environment.
//!
//! Controls market size, episode horizon, action bounds, cost and demand
//! distributions, and the allocation rule applied at clearing time.

use crate::error::EnvError;
use crate::sampling::{CostDistribution, DemandDistribution};

/// Policy applied to out-of-bounds action values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsPolicy {
    /// Clamp out-of-bounds prices to the nearest bound (documented
    /// normalization, not a failure).
    #[default]
    Clip,
    /// Reject out-of-bounds prices with [`EnvError::ActionOutOfBounds`].
    Reject,
}

/// Rule used to split demand among the minimum-price agents.
///
/// Tie-break is by allocation split, never by random selection, so a fixed
/// action vector always produces the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocationRule {
    /// Demand divided equally among all agents at the clearing price.
    #[default]
    EqualSplit,
    /// Extension hook: split in proportion to per-winner weights. Only
    /// minimum-price agents transact and all carry the same weight, so this
    /// currently coincides with [`AllocationRule::EqualSplit`].
    Proportional,
}

/// Configuration for the pricing environment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvConfig {
    /// Number of agents (firms) N. Must be at least 2.
    pub n_agents: usize,
    /// Episode horizon T (number of rounds). Must be at least 1.
    pub horizon: u32,
    /// Length of the rolling history window exposed in observations.
    pub window_size: usize,
    /// Lower action bound. Must be finite and non-negative.
    pub price_min: f64,
    /// Upper action bound. Must be finite and exceed `price_min`.
    pub price_max: f64,
    /// Per-episode unit cost draws.
    pub cost_distribution: CostDistribution,
    /// Per-round total demand draws.
    pub demand_distribution: DemandDistribution,
    /// How out-of-bounds actions are handled.
    pub bounds_policy: BoundsPolicy,
    /// How demand is split among minimum-price agents.
    pub allocation_rule: AllocationRule,
}

impl EnvConfig {
    /// Number of features encoding the agent itself: own cost, round progress.
    pub const AGENT_FEATURE_DIM: usize = 2;

    /// Number of features encoding one committed round in the window:
    /// clearing price, own demand share, won flag.
    pub const ROUND_FEATURE_DIM: usize = 3;

    /// Observation dimension per agent: own features + window round features.
    pub fn observation_dim(&self) -> usize {
        Self::AGENT_FEATURE_DIM + self.window_size * Self::ROUND_FEATURE_DIM
    }

    /// Dimension of the global state vector (for centralized critics):
    /// all agent costs plus full per-round price/allocation vectors.
    pub fn global_state_dim(&self) -> usize {
        self.n_agents + self.window_size * (2 * self.n_agents + 1)
    }

    /// Checks every configured bound, returning the first violation.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.n_agents < 2 {
            return Err(invalid(format!(
                "n_agents must be at least 2, got {}",
                self.n_agents
            )));
        }
        if self.horizon < 1 {
            return Err(invalid("horizon must be at least 1".into()));
        }
        if self.window_size < 1 {
            return Err(invalid("window_size must be at least 1".into()));
        }
        if !self.price_min.is_finite() || !self.price_max.is_finite() {
            return Err(invalid(format!(
                "price bounds must be finite, got [{}, {}]",
                self.price_min, self.price_max
            )));
        }
        if self.price_min < 0.0 {
            return Err(invalid(format!(
                "price_min must be non-negative, got {}",
                self.price_min
            )));
        }
        if self.price_min >= self.price_max {
            return Err(invalid(format!(
                "price_min must be below price_max, got [{}, {}]",
                self.price_min, self.price_max
            )));
        }
        self.cost_distribution.validate(self.n_agents)?;
        self.demand_distribution.validate()?;
        Ok(())
    }
}

fn invalid(reason: String) -> EnvError {
    EnvError::InvalidConfig { reason }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            n_agents: 2,
            horizon: 100,
            window_size: 5,
            price_min: 1.0,
            price_max: 10.0,
            cost_distribution: CostDistribution::Shared(2.0),
            demand_distribution: DemandDistribution::Fixed(10.0),
            bounds_policy: BoundsPolicy::Clip,
            allocation_rule: AllocationRule::EqualSplit,
        }
    }
}

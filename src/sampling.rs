//! Cost and demand distributions.
//!
//! All draws go through the `StdRng` owned by the environment, never a
//! thread-local generator, so a seed fixes the entire episode.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::EnvError;

/// Per-episode unit cost draws, one cost per agent.
///
/// Costs are fixed for the lifetime of an episode and resampled (where
/// stochastic) at each `reset()`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostDistribution {
    /// Explicit cost per agent. The vector length must equal `n_agents`.
    Fixed(Vec<f64>),
    /// The same cost for every agent.
    Shared(f64),
    /// Costs drawn iid from `U[low, high]` per agent per episode.
    Uniform { low: f64, high: f64 },
    /// Costs drawn iid from `N(mean, std_dev)` per agent per episode,
    /// truncated at zero.
    Normal { mean: f64, std_dev: f64 },
}

impl CostDistribution {
    /// Draws one cost per agent.
    pub fn sample(&self, rng: &mut StdRng, n_agents: usize) -> Result<Vec<f64>, EnvError> {
        match self {
            CostDistribution::Fixed(costs) => Ok(costs.clone()),
            CostDistribution::Shared(cost) => Ok(vec![*cost; n_agents]),
            CostDistribution::Uniform { low, high } => {
                Ok((0..n_agents).map(|_| rng.gen_range(*low..=*high)).collect())
            }
            CostDistribution::Normal { mean, std_dev } => {
                let normal = Normal::new(*mean, *std_dev).map_err(|e| {
                    EnvError::InvalidConfig {
                        reason: format!("cost distribution: {e}"),
                    }
                })?;
                Ok((0..n_agents).map(|_| normal.sample(rng).max(0.0)).collect())
            }
        }
    }

    /// Checks distribution parameters against the configured agent count.
    pub fn validate(&self, n_agents: usize) -> Result<(), EnvError> {
        match self {
            CostDistribution::Fixed(costs) => {
                if costs.len() != n_agents {
                    return Err(EnvError::InvalidConfig {
                        reason: format!(
                            "fixed cost vector has {} entries for {} agents",
                            costs.len(),
                            n_agents
                        ),
                    });
                }
                if let Some(c) = costs.iter().find(|c| !c.is_finite() || **c < 0.0) {
                    return Err(EnvError::InvalidConfig {
                        reason: format!("costs must be finite and non-negative, got {c}"),
                    });
                }
                Ok(())
            }
            CostDistribution::Shared(cost) => {
                if !cost.is_finite() || *cost < 0.0 {
                    return Err(EnvError::InvalidConfig {
                        reason: format!("shared cost must be finite and non-negative, got {cost}"),
                    });
                }
                Ok(())
            }
            CostDistribution::Uniform { low, high } => validate_uniform("cost", *low, *high),
            CostDistribution::Normal { mean, std_dev } => validate_normal("cost", *mean, *std_dev),
        }
    }
}

/// Per-round total demand draws.
///
/// A non-positive draw is surfaced by the clearing step as
/// [`EnvError::InvalidDemand`]; sampling returns the raw value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DemandDistribution {
    /// Constant demand every round.
    Fixed(f64),
    /// Demand drawn from `U[low, high]` each round.
    Uniform { low: f64, high: f64 },
    /// Demand drawn from `N(mean, std_dev)` each round, untruncated.
    Normal { mean: f64, std_dev: f64 },
}

impl DemandDistribution {
    /// Draws the total demand for one round.
    pub fn sample(&self, rng: &mut StdRng) -> Result<f64, EnvError> {
        match self {
            DemandDistribution::Fixed(demand) => Ok(*demand),
            DemandDistribution::Uniform { low, high } => Ok(rng.gen_range(*low..=*high)),
            DemandDistribution::Normal { mean, std_dev } => {
                let normal = Normal::new(*mean, *std_dev).map_err(|e| {
                    EnvError::InvalidConfig {
                        reason: format!("demand distribution: {e}"),
                    }
                })?;
                Ok(normal.sample(rng))
            }
        }
    }

    /// Checks distribution parameters.
    pub fn validate(&self) -> Result<(), EnvError> {
        match self {
            DemandDistribution::Fixed(demand) => {
                if !demand.is_finite() || *demand <= 0.0 {
                    return Err(EnvError::InvalidConfig {
                        reason: format!("fixed demand must be strictly positive, got {demand}"),
                    });
                }
                Ok(())
            }
            DemandDistribution::Uniform { low, high } => {
                validate_uniform("demand", *low, *high)?;
                if *low <= 0.0 {
                    return Err(EnvError::InvalidConfig {
                        reason: format!("uniform demand lower bound must be positive, got {low}"),
                    });
                }
                Ok(())
            }
            DemandDistribution::Normal { mean, std_dev } => {
                validate_normal("demand", *mean, *std_dev)
            }
        }
    }
}

fn validate_uniform(what: &str, low: f64, high: f64) -> Result<(), EnvError> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(EnvError::InvalidConfig {
            reason: format!("{what} range [{low}, {high}] is not a valid interval"),
        });
    }
    Ok(())
}

fn validate_normal(what: &str, mean: f64, std_dev: f64) -> Result<(), EnvError> {
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(EnvError::InvalidConfig {
            reason: format!("{what} normal parameters ({mean}, {std_dev}) are invalid"),
        });
    }
    Ok(())
}

//! Undercutting heuristic policy.
//!
//! The classic Bertrand-competition baseline: shave the last clearing
//! price by a fixed step until the floor is reached.

use super::trait_::PricingPolicy;
use crate::config::EnvConfig;

/// Prices one step below the most recent clearing price.
///
/// Each agent reads the newest committed clearing price out of its own
/// observation and bids `max(price_min, clearing_price - step)`. With no
/// history in the window (the opening round) the policy bids `price_max`.
/// A zero-padded window slot is indistinguishable from a zero clearing
/// price, so with `price_min == 0` the policy treats a cleared-at-zero
/// market as an opening round.
pub struct UndercutPolicy {
    config: EnvConfig,
    step: f64,
}

impl UndercutPolicy {
    /// Creates a new undercut policy with the given price step.
    pub fn new(config: EnvConfig, step: f64) -> Self {
        Self { config, step }
    }
}

impl PricingPolicy for UndercutPolicy {
    fn select_prices(&mut self, observations: &[Vec<f64>]) -> Vec<f64> {
        // Observation layout: [cost_norm, t_norm] ++ newest round first,
        // so the newest clearing price sits right after the agent features.
        let cp_index = EnvConfig::AGENT_FEATURE_DIM;
        observations
            .iter()
            .map(|obs| {
                let last_price = obs
                    .get(cp_index)
                    .map(|norm| norm * self.config.price_max)
                    .unwrap_or(0.0);
                if last_price == 0.0 {
                    self.config.price_max
                } else {
                    (last_price - self.step).max(self.config.price_min)
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "undercut"
    }
}

//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::PricingPolicy;
use crate::config::EnvConfig;

/// Uniformly random price selection.
///
/// Each agent independently draws a price from `U[price_min, price_max]`.
/// Used for sanity checks and as a lower-bound baseline. The policy owns a
/// seeded generator so evaluation runs stay reproducible.
pub struct RandomPolicy {
    price_min: f64,
    price_max: f64,
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy over the configured price bounds.
    pub fn new(config: &EnvConfig, seed: u64) -> Self {
        Self {
            price_min: config.price_min,
            price_max: config.price_max,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PricingPolicy for RandomPolicy {
    fn select_prices(&mut self, observations: &[Vec<f64>]) -> Vec<f64> {
        (0..observations.len())
            .map(|_| self.rng.gen_range(self.price_min..=self.price_max))
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

//! Evaluation metrics for baseline policies.
//!
//! Runs full episodes against a policy and aggregates market-level
//! statistics. The mean price-cost margin is the collusion signal this
//! environment exists to study: it stays near zero under competitive play
//! and widens when agents sustain supra-competitive prices.

use std::collections::HashMap;
use std::fmt;

use crate::environment::Environment;
use crate::error::EnvError;
use crate::policy::PricingPolicy;
use crate::AgentId;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    /// Mean clearing price across all rounds of all episodes.
    pub mean_clearing_price: f64,
    /// Mean per-round margin between the clearing price and the lowest
    /// unit cost in the market.
    pub mean_margin: f64,
    /// Mean episode profit per agent, indexed by agent id.
    pub mean_profit_per_agent: Vec<f64>,
    /// Mean total episode profit summed over agents.
    pub mean_total_profit: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and aggregates the results.
    ///
    /// # Arguments
    ///
    /// * `env` - The environment to evaluate in (reset per episode)
    /// * `policy` - The policy to evaluate
    /// * `n_episodes` - Number of episodes to run
    pub fn evaluate(
        env: &mut Environment,
        policy: &mut dyn PricingPolicy,
        n_episodes: usize,
    ) -> Result<Self, EnvError> {
        let n_agents = env.config().n_agents;
        let mut price_sum = 0.0;
        let mut margin_sum = 0.0;
        let mut rounds = 0u64;
        let mut profit_sums = vec![0.0; n_agents];

        for _ in 0..n_episodes {
            let mut obs = env.reset()?;
            let min_cost = env.costs().iter().copied().fold(f64::INFINITY, f64::min);

            loop {
                let prices = policy.select_prices(&obs);
                let actions: HashMap<AgentId, f64> =
                    prices.iter().copied().enumerate().collect();
                let result = env.step(&actions)?;

                price_sum += result.info.clearing_price;
                margin_sum += result.info.clearing_price - min_cost;
                rounds += 1;
                for (agent, reward) in result.rewards.iter().enumerate() {
                    profit_sums[agent] += reward;
                }

                obs = result.observations;
                if result.done {
                    break;
                }
            }
        }

        let rounds = rounds.max(1) as f64;
        let episodes = n_episodes.max(1) as f64;
        Ok(Self {
            mean_clearing_price: price_sum / rounds,
            mean_margin: margin_sum / rounds,
            mean_profit_per_agent: profit_sums.iter().map(|p| p / episodes).collect(),
            mean_total_profit: profit_sums.iter().sum::<f64>() / episodes,
            n_episodes,
        })
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean clearing price:   {:.3}",
            self.mean_clearing_price
        )?;
        writeln!(f, "  Mean price-cost margin: {:.3}", self.mean_margin)?;
        writeln!(f, "  Mean total profit:     {:.2}", self.mean_total_profit)?;
        for (agent, profit) in self.mean_profit_per_agent.iter().enumerate() {
            writeln!(f, "  Mean profit, agent {}:  {:.2}", agent, profit)?;
        }
        Ok(())
    }
}

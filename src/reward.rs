//! Profit-based rewards from a clearing outcome.

use crate::clearing::ClearingOutcome;
use crate::AgentId;

/// Computes per-agent rewards.
///
/// A winner earns `(clearing_price - cost) * allocation`; every other
/// agent earns zero. Lowering the price grows the allocation but shrinks
/// the per-unit margin, which is the trade-off the game studies. Negative
/// margins pass through untouched: pricing below cost is a legal,
/// loss-making action.
pub struct RewardComputer;

impl RewardComputer {
    /// Reward for a single agent.
    pub fn reward(agent: AgentId, outcome: &ClearingOutcome, cost: f64) -> f64 {
        let allocation = outcome.allocations[agent];
        if allocation == 0.0 {
            return 0.0;
        }
        (outcome.clearing_price - cost) * allocation
    }

    /// Rewards for all agents, indexed by agent id.
    pub fn rewards_all(outcome: &ClearingOutcome, costs: &[f64]) -> Vec<f64> {
        costs
            .iter()
            .enumerate()
            .map(|(agent, &cost)| Self::reward(agent, outcome, cost))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(clearing_price: f64, allocations: Vec<f64>, demand: f64) -> ClearingOutcome {
        let winners = allocations
            .iter()
            .enumerate()
            .filter(|(_, a)| **a > 0.0)
            .map(|(id, _)| id)
            .collect();
        ClearingOutcome {
            clearing_price,
            winners,
            allocations,
            demand,
        }
    }

    #[test]
    fn winner_earns_margin_times_allocation() {
        let out = outcome(5.0, vec![10.0, 0.0], 10.0);
        assert_eq!(RewardComputer::reward(0, &out, 2.0), 30.0);
    }

    #[test]
    fn loser_earns_zero() {
        let out = outcome(5.0, vec![10.0, 0.0], 10.0);
        assert_eq!(RewardComputer::reward(1, &out, 2.0), 0.0);
    }

    #[test]
    fn tied_winners_use_their_own_cost() {
        // N=2, D=10, both at 5.0, costs 2.0 and 3.0
        let out = outcome(5.0, vec![5.0, 5.0], 10.0);
        let rewards = RewardComputer::rewards_all(&out, &[2.0, 3.0]);
        assert_eq!(rewards, vec![15.0, 10.0]);
    }

    #[test]
    fn below_cost_price_yields_negative_reward() {
        let out = outcome(2.0, vec![10.0, 0.0], 10.0);
        assert_eq!(RewardComputer::reward(0, &out, 3.0), -10.0);
    }

    #[test]
    fn sole_winner_scenario() {
        // N=3, prices {4, 6, 6}, D=9: agent 0 takes all 9 units at 4.0
        let out = outcome(4.0, vec![9.0, 0.0, 0.0], 9.0);
        let rewards = RewardComputer::rewards_all(&out, &[2.0, 2.0, 2.0]);
        assert_eq!(rewards, vec![18.0, 0.0, 0.0]);
    }
}

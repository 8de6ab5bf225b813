//! Market clearing: minimum-price winner selection and demand allocation.

use crate::config::AllocationRule;
use crate::error::EnvError;
use crate::AgentId;

/// The outcome of clearing one round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClearingOutcome {
    /// The minimum submitted price.
    pub clearing_price: f64,
    /// Agents at the clearing price, ascending by id.
    pub winners: Vec<AgentId>,
    /// Quantity allocated to each agent, indexed by agent id. Zero for
    /// every agent above the clearing price.
    pub allocations: Vec<f64>,
    /// Total demand for the round.
    pub demand: f64,
}

/// Determines winners and allocates demand for a round.
pub struct ClearingEngine;

impl ClearingEngine {
    /// Clears the market for one round.
    ///
    /// Winners are the agents whose validated price equals the exact
    /// minimum of `prices` (no floating tolerance). Demand is split among
    /// them per the allocation rule; the last winner absorbs the
    /// floating-point remainder of the split so the winner allocations
    /// always sum to `demand` exactly.
    ///
    /// `prices` must already be validated: dense, finite, in bounds.
    pub fn clear(
        prices: &[f64],
        demand: f64,
        rule: AllocationRule,
    ) -> Result<ClearingOutcome, EnvError> {
        if demand <= 0.0 || !demand.is_finite() {
            return Err(EnvError::InvalidDemand { demand });
        }

        let clearing_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let winners: Vec<AgentId> = prices
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == clearing_price)
            .map(|(id, _)| id)
            .collect();

        let mut allocations = vec![0.0; prices.len()];
        match rule {
            // Proportional weights are identical at the clearing price, so
            // both rules currently produce the same split.
            AllocationRule::EqualSplit | AllocationRule::Proportional => {
                let share = demand / winners.len() as f64;
                for &id in &winners {
                    allocations[id] = share;
                }
                if let Some(&last) = winners.last() {
                    allocations[last] = demand - share * (winners.len() - 1) as f64;
                }
            }
        }

        Ok(ClearingOutcome {
            clearing_price,
            winners,
            allocations,
            demand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(prices: &[f64], demand: f64) -> ClearingOutcome {
        ClearingEngine::clear(prices, demand, AllocationRule::EqualSplit).unwrap()
    }

    #[test]
    fn sole_winner_takes_all_demand() {
        let outcome = clear(&[4.0, 6.0, 6.0], 9.0);
        assert_eq!(outcome.clearing_price, 4.0);
        assert_eq!(outcome.winners, vec![0]);
        assert_eq!(outcome.allocations, vec![9.0, 0.0, 0.0]);
    }

    #[test]
    fn tie_splits_demand_equally() {
        let outcome = clear(&[5.0, 5.0], 10.0);
        assert_eq!(outcome.clearing_price, 5.0);
        assert_eq!(outcome.winners, vec![0, 1]);
        assert_eq!(outcome.allocations, vec![5.0, 5.0]);
    }

    #[test]
    fn all_equal_prices_split_n_ways() {
        let outcome = clear(&[3.0, 3.0, 3.0, 3.0], 8.0);
        assert_eq!(outcome.winners, vec![0, 1, 2, 3]);
        assert_eq!(outcome.allocations, vec![2.0; 4]);
    }

    #[test]
    fn winner_allocations_sum_to_demand_exactly() {
        // 10 / 3 is not representable; the last winner absorbs the remainder
        let outcome = clear(&[2.0, 2.0, 2.0, 7.0], 10.0);
        let total: f64 = outcome.winners.iter().map(|&id| outcome.allocations[id]).sum();
        assert_eq!(total, 10.0);
        assert_eq!(outcome.allocations[3], 0.0);
    }

    #[test]
    fn losers_allocate_zero() {
        let outcome = clear(&[5.0, 4.0, 6.0], 12.0);
        assert_eq!(outcome.winners, vec![1]);
        assert_eq!(outcome.allocations[0], 0.0);
        assert_eq!(outcome.allocations[2], 0.0);
    }

    #[test]
    fn exact_equality_no_tolerance() {
        // 4.0 + 1e-12 is a distinct price, not a tie
        let outcome = clear(&[4.0, 4.0 + 1e-12], 10.0);
        assert_eq!(outcome.winners, vec![0]);
        assert_eq!(outcome.allocations, vec![10.0, 0.0]);
    }

    #[test]
    fn proportional_rule_matches_equal_split() {
        let equal = clear(&[5.0, 5.0, 8.0], 9.0);
        let proportional =
            ClearingEngine::clear(&[5.0, 5.0, 8.0], 9.0, AllocationRule::Proportional).unwrap();
        assert_eq!(equal, proportional);
    }

    #[test]
    fn non_positive_demand_is_fatal() {
        for demand in [0.0, -1.0] {
            assert_eq!(
                ClearingEngine::clear(&[5.0, 6.0], demand, AllocationRule::EqualSplit).unwrap_err(),
                EnvError::InvalidDemand { demand }
            );
        }
    }

    #[test]
    fn deterministic_for_fixed_prices() {
        let a = clear(&[5.0, 5.0, 7.0], 10.0);
        let b = clear(&[5.0, 5.0, 7.0], 10.0);
        assert_eq!(a, b);
    }
}

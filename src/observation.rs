//! Observation encoding.
//!
//! Builds per-agent observation vectors from the shared rolling history.
//! Observations are a pure read of committed rounds: no randomness, and no
//! information about the round currently being played.

use crate::config::EnvConfig;
use crate::state::MarketState;
use crate::AgentId;

/// Builds observation vectors for agents.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds the observation vector for one agent.
    ///
    /// The observation is a flat `Vec<f64>` with structure:
    /// ```text
    /// [own_cost_norm, t_norm] ++ [round_1(3)] ++ ... ++ [round_W(3)]
    /// ```
    /// where each round slot holds `[clearing_price_norm, own_share,
    /// won_flag]`, ordered newest first. Rounds not yet played are
    /// zero-padded.
    ///
    /// Prices are normalized by `price_max`, the own share by the round's
    /// demand, and the round counter by the horizon.
    pub fn build(
        agent: AgentId,
        state: &MarketState,
        costs: &[f64],
        config: &EnvConfig,
    ) -> Vec<f64> {
        let mut obs = Vec::with_capacity(config.observation_dim());
        obs.push(costs[agent] / config.price_max);
        obs.push(state.t() as f64 / config.horizon as f64);

        let mut slots = 0;
        for record in state.newest_first().take(config.window_size) {
            obs.push(record.clearing_price / config.price_max);
            obs.push(record.allocations[agent] / record.demand);
            obs.push(if record.allocations[agent] > 0.0 { 1.0 } else { 0.0 });
            slots += 1;
        }
        for _ in slots..config.window_size {
            obs.extend([0.0; EnvConfig::ROUND_FEATURE_DIM]);
        }

        obs
    }

    /// Builds observations for all agents, indexed by agent id.
    pub fn build_all(state: &MarketState, costs: &[f64], config: &EnvConfig) -> Vec<Vec<f64>> {
        (0..config.n_agents)
            .map(|agent| Self::build(agent, state, costs, config))
            .collect()
    }

    /// Builds the global state vector (for a centralized critic).
    ///
    /// Concatenates every agent's cost followed by the full price and
    /// allocation vectors plus the clearing price of each round in the
    /// window, newest first, zero-padded to `window_size` slots.
    pub fn build_global_state(state: &MarketState, costs: &[f64], config: &EnvConfig) -> Vec<f64> {
        let mut global = Vec::with_capacity(config.global_state_dim());
        for &cost in costs {
            global.push(cost / config.price_max);
        }

        let round_dim = 2 * config.n_agents + 1;
        let mut slots = 0;
        for record in state.newest_first().take(config.window_size) {
            global.extend(record.prices.iter().map(|p| p / config.price_max));
            global.extend(record.allocations.iter().map(|a| a / record.demand));
            global.push(record.clearing_price / config.price_max);
            slots += 1;
        }
        for _ in slots..config.window_size {
            global.extend(std::iter::repeat(0.0).take(round_dim));
        }

        global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RoundRecord;

    fn config() -> EnvConfig {
        EnvConfig {
            window_size: 2,
            ..EnvConfig::default()
        }
    }

    fn state_with_round(cfg: &EnvConfig) -> MarketState {
        let mut state = MarketState::new(cfg.window_size);
        state.push(RoundRecord {
            round: 0,
            prices: vec![5.0, 8.0],
            allocations: vec![10.0, 0.0],
            demand: 10.0,
            clearing_price: 5.0,
            winners: vec![0],
        });
        state
    }

    #[test]
    fn observation_has_configured_dim() {
        let cfg = config();
        let state = state_with_round(&cfg);
        let obs = ObservationBuilder::build(0, &state, &[2.0, 3.0], &cfg);
        assert_eq!(obs.len(), cfg.observation_dim());
    }

    #[test]
    fn empty_history_is_zero_padded() {
        let cfg = config();
        let state = MarketState::new(cfg.window_size);
        let obs = ObservationBuilder::build(0, &state, &[2.0, 3.0], &cfg);
        assert_eq!(obs[0], 2.0 / 10.0); // own cost
        assert_eq!(obs[1], 0.0); // t = 0
        assert!(obs[2..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn newest_round_comes_first() {
        let cfg = config();
        let mut state = state_with_round(&cfg);
        state.push(RoundRecord {
            round: 1,
            prices: vec![7.0, 4.0],
            allocations: vec![0.0, 10.0],
            demand: 10.0,
            clearing_price: 4.0,
            winners: vec![1],
        });
        let obs = ObservationBuilder::build(0, &state, &[2.0, 3.0], &cfg);
        // First slot is round 1 (lost), second is round 0 (won)
        assert_eq!(obs[2], 4.0 / 10.0);
        assert_eq!(obs[3], 0.0);
        assert_eq!(obs[4], 0.0);
        assert_eq!(obs[5], 5.0 / 10.0);
        assert_eq!(obs[6], 1.0);
        assert_eq!(obs[7], 1.0);
    }

    #[test]
    fn observations_are_agent_specific() {
        let cfg = config();
        let state = state_with_round(&cfg);
        let all = ObservationBuilder::build_all(&state, &[2.0, 3.0], &cfg);
        assert_eq!(all.len(), 2);
        // winner's share is 1, loser's 0
        assert_eq!(all[0][3], 1.0);
        assert_eq!(all[1][3], 0.0);
        // own cost differs
        assert!(all[0][0] != all[1][0]);
    }

    #[test]
    fn deterministic_given_state() {
        let cfg = config();
        let state = state_with_round(&cfg);
        let a = ObservationBuilder::build(1, &state, &[2.0, 3.0], &cfg);
        let b = ObservationBuilder::build(1, &state, &[2.0, 3.0], &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn global_state_has_configured_dim() {
        let cfg = config();
        let state = state_with_round(&cfg);
        let global = ObservationBuilder::build_global_state(&state, &[2.0, 3.0], &cfg);
        assert_eq!(global.len(), cfg.global_state_dim());
    }
}

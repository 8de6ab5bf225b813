//! The environment orchestrator and episode state machine.
//!
//! One `step()` call runs a full round: validate all actions, draw demand,
//! clear the market, compute rewards, commit the round, and return the new
//! observations. The round commit is atomic: any error aborts the call
//! before the history, round counter, or phase change.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action::ActionValidator;
use crate::clearing::ClearingEngine;
use crate::config::EnvConfig;
use crate::error::EnvError;
use crate::observation::ObservationBuilder;
use crate::reward::RewardComputer;
use crate::state::{MarketState, RoundRecord};
use crate::{generate_id, AgentId, Id};

/// Phase of the episode lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpisodePhase {
    /// Constructed but never reset.
    Uninitialized,
    /// Reset, no round played yet.
    Ready,
    /// Mid-episode.
    Running,
    /// Horizon reached; only `reset()` is valid.
    Done,
}

impl fmt::Display for EpisodePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodePhase::Uninitialized => write!(f, "uninitialized"),
            EpisodePhase::Ready => write!(f, "ready"),
            EpisodePhase::Running => write!(f, "running"),
            EpisodePhase::Done => write!(f, "done"),
        }
    }
}

/// Round-level diagnostics returned alongside observations and rewards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    /// Identifier of the episode this round belongs to.
    pub episode_id: Id,
    /// Index of the round that was just played (0-based).
    pub round: u32,
    /// The minimum submitted price.
    pub clearing_price: f64,
    /// Agents at the clearing price, ascending.
    pub winners: Vec<AgentId>,
    /// Total demand for the round.
    pub demand: f64,
}

/// Result of a single environment step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Per-agent observations after the round, indexed by agent id.
    pub observations: Vec<Vec<f64>>,
    /// Per-agent rewards for the round, indexed by agent id.
    pub rewards: Vec<f64>,
    /// Whether the episode horizon has been reached. The horizon is shared,
    /// so the flag is identical for every agent.
    pub done: bool,
    /// Round diagnostics.
    pub info: StepInfo,
}

impl StepResult {
    /// The shared done flag mirrored per agent.
    pub fn done_flags(&self) -> Vec<bool> {
        vec![self.done; self.observations.len()]
    }
}

/// The Minimum Price Markov Game environment.
///
/// Owns the market state, the per-episode costs, and the random number
/// generator; agents and the training loop interact exclusively through
/// [`Environment::reset`] and [`Environment::step`].
///
/// # Lifecycle
///
/// 1. Construct with [`Environment::new`] (validates the configuration).
/// 2. Call [`Environment::reset`] to start an episode.
/// 3. Call [`Environment::step`] with one price per agent until `done`.
/// 4. Reset again for the next episode.
#[derive(Debug)]
pub struct Environment {
    config: EnvConfig,
    market: MarketState,
    costs: Vec<f64>,
    rng: StdRng,
    phase: EpisodePhase,
    episode_id: Id,
    next_seed: u64,
}

impl Environment {
    /// Creates a new environment with the given configuration and base
    /// seed. Episode k of a freshly constructed environment uses seed
    /// `seed + k`, so runs with the same seed replay identically.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            market: MarketState::new(config.window_size),
            costs: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            phase: EpisodePhase::Uninitialized,
            episode_id: generate_id(),
            next_seed: seed,
            config,
        })
    }

    /// Starts a new episode using the next seed in the sequence.
    pub fn reset(&mut self) -> Result<Vec<Vec<f64>>, EnvError> {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.reset_with_seed(seed)
    }

    /// Starts a new episode from an explicit seed.
    ///
    /// Reseeds the generator, redraws per-episode costs, clears the round
    /// history, and returns the initial observations. Calling twice with
    /// the same seed yields identical initial observations.
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Vec<Vec<f64>>, EnvError> {
        self.rng = StdRng::seed_from_u64(seed);
        self.costs = self
            .config
            .cost_distribution
            .sample(&mut self.rng, self.config.n_agents)?;
        self.market.clear();
        self.episode_id = generate_id();
        self.phase = EpisodePhase::Ready;
        debug!(
            "episode {} reset: seed={}, costs={:?}",
            self.episode_id, seed, self.costs
        );
        Ok(ObservationBuilder::build_all(
            &self.market,
            &self.costs,
            &self.config,
        ))
    }

    /// Plays one round.
    ///
    /// `actions` must contain exactly one raw price per registered agent.
    /// Validation, the demand draw, clearing, and rewards all complete
    /// before the round is committed; on any error nothing is committed
    /// and the environment stays steppable.
    pub fn step(&mut self, actions: &HashMap<AgentId, f64>) -> Result<StepResult, EnvError> {
        match self.phase {
            EpisodePhase::Ready | EpisodePhase::Running => {}
            phase => return Err(EnvError::InvalidEpisodeState { phase }),
        }

        // Action errors must not consume randomness, so validate first.
        let prices = ActionValidator::validate_all(actions, &self.config)?;
        let demand = self.config.demand_distribution.sample(&mut self.rng)?;
        let outcome = ClearingEngine::clear(&prices, demand, self.config.allocation_rule)?;
        let rewards = RewardComputer::rewards_all(&outcome, &self.costs);

        // Commit point: everything below is infallible.
        let round = self.market.t();
        self.market.push(RoundRecord {
            round,
            prices,
            allocations: outcome.allocations.clone(),
            demand,
            clearing_price: outcome.clearing_price,
            winners: outcome.winners.clone(),
        });
        self.phase = if self.market.t() >= self.config.horizon {
            EpisodePhase::Done
        } else {
            EpisodePhase::Running
        };
        trace!(
            "episode {} round {}: clearing price {:.4}, winners {:?}, demand {:.4}",
            self.episode_id,
            round,
            outcome.clearing_price,
            outcome.winners,
            demand
        );

        Ok(StepResult {
            observations: ObservationBuilder::build_all(&self.market, &self.costs, &self.config),
            rewards,
            done: self.phase == EpisodePhase::Done,
            info: StepInfo {
                episode_id: self.episode_id.clone(),
                round,
                clearing_price: outcome.clearing_price,
                winners: outcome.winners,
                demand,
            },
        })
    }

    /// Current episode phase.
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Number of committed rounds in the current episode.
    pub fn t(&self) -> u32 {
        self.market.t()
    }

    /// Per-episode unit costs, indexed by agent id. Empty before the
    /// first reset.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Read access to the shared market state.
    pub fn market_state(&self) -> &MarketState {
        &self.market
    }

    /// The environment configuration.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Identifier of the current episode. Regenerated at every reset.
    pub fn episode_id(&self) -> &str {
        &self.episode_id
    }

    /// The global state vector for the current market state (for
    /// centralized critics).
    pub fn global_state(&self) -> Vec<f64> {
        ObservationBuilder::build_global_state(&self.market, &self.costs, &self.config)
    }
}

//! mpmg - Minimum Price Markov Game
//!
//! A repeated multi-agent pricing game for multi-agent reinforcement
//! learning research. N firms simultaneously submit a price each round;
//! the market clears at the minimum submitted price, demand is split among
//! the minimum-price firms, and each firm earns a profit-based reward.
//!
//! The crate provides the simulation engine only: state representation,
//! action validation, market clearing, reward computation, and the episode
//! state machine, plus baseline (non-learning) policies and an evaluation
//! harness. Learning algorithms consume the environment through
//! [`Environment::reset`] / [`Environment::step`].

pub mod action;
pub mod clearing;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod sampling;
pub mod state;

pub use action::ActionValidator;
pub use clearing::{ClearingEngine, ClearingOutcome};
pub use config::{AllocationRule, BoundsPolicy, EnvConfig};
pub use environment::{Environment, EpisodePhase, StepInfo, StepResult};
pub use error::EnvError;
pub use metrics::EvaluationMetrics;
pub use observation::ObservationBuilder;
pub use policy::{PricingPolicy, RandomPolicy, UndercutPolicy};
pub use reward::RewardComputer;
pub use sampling::{CostDistribution, DemandDistribution};
pub use state::{MarketState, RoundRecord};

/// Index identifying an agent (firm) within an episode: `0..n_agents`.
pub type AgentId = usize;

/// Identifier type used for episodes and other simulation artifacts.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}

//! Error taxonomy for the environment.
//!
//! Every variant is fatal for the call that produced it and is surfaced to
//! the caller unretried. A failed `step()` commits nothing: the round
//! history, the round counter, and the episode phase are left untouched.

use thiserror::Error;

use crate::environment::EpisodePhase;
use crate::AgentId;

/// Errors raised by the environment and its components.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvError {
    /// An agent submitted a non-finite price (NaN or infinite).
    #[error("agent {agent} submitted a non-finite price ({value})")]
    InvalidAction { agent: AgentId, value: f64 },

    /// An agent submitted a price outside the action bounds while the
    /// environment runs the `Reject` bounds policy. Under `Clip` the value
    /// is silently clamped instead.
    #[error("agent {agent} submitted price {value} outside bounds [{min}, {max}]")]
    ActionOutOfBounds {
        agent: AgentId,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The action set contains an id not registered in this episode.
    #[error("action submitted for unknown agent {agent}")]
    UnknownAgent { agent: AgentId },

    /// One or more registered agents did not submit an action.
    #[error("missing actions for agents {missing:?}")]
    IncompleteActionSet { missing: Vec<AgentId> },

    /// The demand draw for the round was not strictly positive.
    #[error("demand must be strictly positive, got {demand}")]
    InvalidDemand { demand: f64 },

    /// `step()` was called before `reset()` or after the episode ended.
    #[error("step() called in {phase} phase; call reset() first")]
    InvalidEpisodeState { phase: EpisodePhase },

    /// The configuration was rejected at construction time.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_agent() {
        let err = EnvError::InvalidAction {
            agent: 3,
            value: f64::NAN,
        };
        assert!(err.to_string().contains("agent 3"));

        let err = EnvError::IncompleteActionSet { missing: vec![1, 4] };
        assert!(err.to_string().contains("[1, 4]"));
    }

    #[test]
    fn episode_state_message_points_to_reset() {
        let err = EnvError::InvalidEpisodeState {
            phase: EpisodePhase::Done,
        };
        assert!(err.to_string().contains("reset()"));
    }
}

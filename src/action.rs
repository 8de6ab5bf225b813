//! Action validation at the environment boundary.
//!
//! Raw policy outputs are coerced into finite in-bounds prices before any
//! internal use. Non-finite values are always fatal; out-of-bounds values
//! are clamped or rejected depending on the configured bounds policy.

use std::collections::HashMap;

use crate::config::{BoundsPolicy, EnvConfig};
use crate::error::EnvError;
use crate::AgentId;

/// Validates and normalizes submitted prices.
pub struct ActionValidator;

impl ActionValidator {
    /// Validates a single raw price for one agent.
    ///
    /// A price at exactly `price_min` or `price_max` passes through
    /// unmodified under either bounds policy.
    pub fn validate(agent: AgentId, raw: f64, config: &EnvConfig) -> Result<f64, EnvError> {
        if !raw.is_finite() {
            return Err(EnvError::InvalidAction { agent, value: raw });
        }
        if raw < config.price_min || raw > config.price_max {
            return match config.bounds_policy {
                BoundsPolicy::Clip => Ok(raw.clamp(config.price_min, config.price_max)),
                BoundsPolicy::Reject => Err(EnvError::ActionOutOfBounds {
                    agent,
                    value: raw,
                    min: config.price_min,
                    max: config.price_max,
                }),
            };
        }
        Ok(raw)
    }

    /// Validates a full round of actions.
    ///
    /// Every registered agent `0..n_agents` must appear exactly once in the
    /// mapping; ids outside that range are rejected. Returns the validated
    /// prices as a dense vector indexed by agent id.
    pub fn validate_all(
        actions: &HashMap<AgentId, f64>,
        config: &EnvConfig,
    ) -> Result<Vec<f64>, EnvError> {
        if let Some(agent) = actions.keys().find(|id| **id >= config.n_agents) {
            return Err(EnvError::UnknownAgent { agent: *agent });
        }

        let mut missing: Vec<AgentId> = (0..config.n_agents)
            .filter(|id| !actions.contains_key(id))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(EnvError::IncompleteActionSet { missing });
        }

        (0..config.n_agents)
            .map(|id| Self::validate(id, actions[&id], config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: BoundsPolicy) -> EnvConfig {
        EnvConfig {
            bounds_policy: policy,
            ..EnvConfig::default()
        }
    }

    #[test]
    fn in_bounds_price_passes_through() {
        let cfg = config(BoundsPolicy::Clip);
        assert_eq!(ActionValidator::validate(0, 5.0, &cfg).unwrap(), 5.0);
    }

    #[test]
    fn boundary_prices_unmodified() {
        let cfg = config(BoundsPolicy::Clip);
        assert_eq!(ActionValidator::validate(0, 1.0, &cfg).unwrap(), 1.0);
        assert_eq!(ActionValidator::validate(0, 10.0, &cfg).unwrap(), 10.0);
    }

    #[test]
    fn clip_clamps_to_nearest_bound() {
        let cfg = config(BoundsPolicy::Clip);
        assert_eq!(ActionValidator::validate(0, 0.5, &cfg).unwrap(), 1.0);
        assert_eq!(ActionValidator::validate(0, 42.0, &cfg).unwrap(), 10.0);
    }

    #[test]
    fn reject_errors_on_out_of_bounds() {
        let cfg = config(BoundsPolicy::Reject);
        let err = ActionValidator::validate(1, 42.0, &cfg).unwrap_err();
        assert_eq!(
            err,
            EnvError::ActionOutOfBounds {
                agent: 1,
                value: 42.0,
                min: 1.0,
                max: 10.0,
            }
        );
    }

    #[test]
    fn nan_is_fatal_under_both_policies() {
        for policy in [BoundsPolicy::Clip, BoundsPolicy::Reject] {
            let cfg = config(policy);
            assert!(matches!(
                ActionValidator::validate(2, f64::NAN, &cfg),
                Err(EnvError::InvalidAction { agent: 2, .. })
            ));
        }
    }

    #[test]
    fn infinity_is_fatal_even_under_clip() {
        let cfg = config(BoundsPolicy::Clip);
        assert!(ActionValidator::validate(0, f64::INFINITY, &cfg).is_err());
        assert!(ActionValidator::validate(0, f64::NEG_INFINITY, &cfg).is_err());
    }

    #[test]
    fn validate_all_returns_dense_prices() {
        let cfg = config(BoundsPolicy::Clip);
        let actions = HashMap::from([(1, 7.0), (0, 3.0)]);
        assert_eq!(
            ActionValidator::validate_all(&actions, &cfg).unwrap(),
            vec![3.0, 7.0]
        );
    }

    #[test]
    fn validate_all_reports_missing_agents_sorted() {
        let cfg = EnvConfig {
            n_agents: 4,
            ..config(BoundsPolicy::Clip)
        };
        let actions = HashMap::from([(2, 5.0)]);
        let err = ActionValidator::validate_all(&actions, &cfg).unwrap_err();
        assert_eq!(
            err,
            EnvError::IncompleteActionSet {
                missing: vec![0, 1, 3]
            }
        );
    }

    #[test]
    fn validate_all_rejects_unknown_agent() {
        let cfg = config(BoundsPolicy::Clip);
        let actions = HashMap::from([(0, 5.0), (1, 5.0), (9, 5.0)]);
        assert_eq!(
            ActionValidator::validate_all(&actions, &cfg).unwrap_err(),
            EnvError::UnknownAgent { agent: 9 }
        );
    }
}

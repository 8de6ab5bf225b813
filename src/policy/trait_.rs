//! Policy trait for the pricing environment.

/// A policy that selects one price per agent based on observations.
///
/// Prices are raw actions: the environment validates and (under the `Clip`
/// bounds policy) normalizes them at the boundary, so a policy is free to
/// emit values outside the configured bounds.
pub trait PricingPolicy: Send + Sync {
    /// Selects one price per agent given their observations.
    ///
    /// # Arguments
    ///
    /// * `observations` - Per-agent observation vectors (from
    ///   [`ObservationBuilder`](crate::observation::ObservationBuilder))
    ///
    /// # Returns
    ///
    /// A vector of prices, one per agent, in agent-id order.
    fn select_prices(&mut self, observations: &[Vec<f64>]) -> Vec<f64>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}

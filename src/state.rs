//! The shared Markov state: a rolling window of committed rounds.

use std::collections::VecDeque;

use crate::AgentId;

/// One committed round of play.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// Round index at which this record was committed.
    pub round: u32,
    /// Validated price submitted by each agent, indexed by agent id.
    pub prices: Vec<f64>,
    /// Quantity allocated to each agent, indexed by agent id.
    pub allocations: Vec<f64>,
    /// Total demand for the round.
    pub demand: f64,
    /// The minimum submitted price.
    pub clearing_price: f64,
    /// Agents at the clearing price, ascending.
    pub winners: Vec<AgentId>,
}

/// The mutable market state, exclusively owned by the environment.
///
/// Holds a FIFO rolling window of the most recent [`RoundRecord`]s and the
/// current round counter. `push` is the only way a round enters the
/// history; the oldest record is evicted once the window is full.
#[derive(Debug, Clone)]
pub struct MarketState {
    history: VecDeque<RoundRecord>,
    window_size: usize,
    t: u32,
}

impl MarketState {
    /// Creates an empty state with the given window length.
    pub fn new(window_size: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(window_size),
            window_size,
            t: 0,
        }
    }

    /// Commits a round: appends the record and advances the round counter,
    /// evicting the oldest record if the window would overflow.
    pub fn push(&mut self, record: RoundRecord) {
        if self.history.len() == self.window_size {
            self.history.pop_front();
        }
        self.history.push_back(record);
        self.t += 1;
    }

    /// Clears the history and round counter for a new episode.
    pub fn clear(&mut self) {
        self.history.clear();
        self.t = 0;
    }

    /// Current round index (number of committed rounds).
    pub fn t(&self) -> u32 {
        self.t
    }

    /// Configured window length.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of records currently held (at most `window_size`).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True before the first round is committed.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Records from newest to oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = &RoundRecord> {
        self.history.iter().rev()
    }

    /// The most recently committed round, if any.
    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.history.back()
    }
}

use std::fmt::Debug;
use std::hash::Hash;

use crate::Agent;

/// A turn-based game with any number of agents.
///
/// Agents move in a fixed rotation starting from agent 0, the protagonist
/// whose utility the search maximizes. The trait only describes the rules;
/// states are plain values and [`Game::apply`] always produces a new one.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., board and agent positions)
    type State: Clone + Send;

    /// A single agent's move
    type Action: Clone + Copy + Send + Eq + Hash + Debug;

    /// Number of agents taking turns, always at least one
    fn num_agents(&self) -> usize;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns the legal actions of `agent` in enumeration order.
    ///
    /// The order is authoritative: searchers break ties in favour of the
    /// earliest action.
    fn legal_actions(&self, state: &Self::State, agent: Agent) -> Vec<Self::Action>;

    /// Applies `agent`'s action, returning a new state (immutable operation)
    fn apply(&self, state: &Self::State, agent: Agent, action: Self::Action) -> Self::State;

    /// Returns true if the protagonist has won
    fn is_win(&self, state: &Self::State) -> bool;

    /// Returns true if the protagonist has lost
    fn is_lose(&self, state: &Self::State) -> bool;

    /// Returns true if the game has been decided either way
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.is_win(state) || self.is_lose(state)
    }
}

/// A game that keeps a running score for the protagonist.
///
/// Only evaluation functions read the score; the search engine never does.
pub trait Scored: Game {
    fn score(&self, state: &Self::State) -> f64;
}

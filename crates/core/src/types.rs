//! Turn bookkeeping types.
//!
//! Searchers never store whose turn it is in the state. They count plies
//! from the root and derive the agent to move from the ply:
//! - [`Ply`]: number of individual agent moves since the root
//! - [`Agent`]: `ply % num_agents`
//! - [`Role`]: what the searcher does at that agent's nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an agent in `[0, num_agents)`.
///
/// Agent 0 is the protagonist and always maximizes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agent(pub usize);

impl Agent {
    /// The maximizing agent.
    pub const PROTAGONIST: Self = Self(0);

    /// Get the underlying index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Check if this is agent 0.
    pub fn is_protagonist(self) -> bool {
        self.0 == 0
    }

    /// The role this agent plays under the given opponent model.
    pub fn role(self, opponents: OpponentModel) -> Role {
        if self.is_protagonist() {
            return Role::Maximizer;
        }
        match opponents {
            OpponentModel::Adversarial => Role::Minimizer,
            OpponentModel::Chance => Role::Chance,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of individual agent moves made since the search root.
///
/// One round is `num_agents` plies.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ply(pub usize);

impl Ply {
    /// The search root.
    pub const ROOT: Self = Self(0);

    /// Ply at which a search of `depth` rounds stops, or `None` if it does
    /// not fit in a `usize`.
    pub fn horizon(depth: usize, num_agents: usize) -> Option<Self> {
        depth.checked_mul(num_agents).map(Self)
    }

    /// Get the underlying count.
    pub fn get(self) -> usize {
        self.0
    }

    /// The following ply.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The agent to move at this ply.
    pub fn agent(self, num_agents: usize) -> Agent {
        Agent(self.0 % num_agents)
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a searcher computes at an agent's nodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    /// Takes the maximum child value.
    Maximizer,
    /// Takes the minimum child value.
    Minimizer,
    /// Takes the mean child value, every action equally likely.
    Chance,
}

/// How non-protagonist agents are assumed to act.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OpponentModel {
    /// Optimal play against the protagonist.
    #[default]
    Adversarial,
    /// Uniformly random play.
    Chance,
}

//! Turn and terminal policy shared by every searcher.

use adversary_core::{AdversaryError, Agent, Game, Ply, Result};

use crate::config::SearchConfig;

/// Decides where a traversal stops and whose turn it is.
///
/// Built once per search from the game's agent count and the configured
/// depth; a pure function of `(state, ply)` afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnPolicy {
    num_agents: usize,
    horizon: Ply,
}

impl TurnPolicy {
    /// Create the policy for searching `config.depth` rounds of `game`.
    ///
    /// # Errors
    /// - `NoAgents` if the game reports zero agents
    /// - `InvalidDepth` if the horizon in plies overflows
    pub fn new<G: Game>(game: &G, config: &SearchConfig) -> Result<Self> {
        let num_agents = game.num_agents();
        if num_agents == 0 {
            return Err(AdversaryError::NoAgents);
        }
        let horizon = Ply::horizon(config.depth, num_agents).ok_or(AdversaryError::InvalidDepth(config.depth))?;
        Ok(Self { num_agents, horizon })
    }

    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Ply at which the depth limit is reached.
    pub fn horizon(&self) -> Ply {
        self.horizon
    }

    /// True if the game is decided or the depth limit is reached.
    ///
    /// Must be checked before generating successors at `ply`.
    pub fn is_terminal<G: Game>(&self, game: &G, state: &G::State, ply: Ply) -> bool {
        game.is_win(state) || game.is_lose(state) || ply == self.horizon
    }

    /// The agent to move at `ply`.
    pub fn agent(&self, ply: Ply) -> Agent {
        ply.agent(self.num_agents)
    }

    /// Legal actions of the agent to move at `ply`.
    ///
    /// # Errors
    /// Returns `NoLegalActions` if the game offers no move in a state the
    /// policy considers non-terminal. That is a broken game contract.
    pub fn legal_actions<G: Game>(&self, game: &G, state: &G::State, ply: Ply) -> Result<Vec<G::Action>> {
        let agent = self.agent(ply);
        let actions = game.legal_actions(state, agent);
        if actions.is_empty() {
            return Err(AdversaryError::NoLegalActions { agent, ply });
        }
        Ok(actions)
    }
}

//! Plain minimax search.
//!
//! Every agent other than the protagonist is assumed to play the move that
//! is worst for the protagonist. The whole tree down to the depth limit is
//! visited; see [`crate::AlphaBeta`] for the pruned equivalent.

use adversary_core::{AdversaryError, Game, OpponentModel, Ply, Result, Role};
use tracing::debug;

use crate::{
    config::SearchConfig,
    evaluator::Evaluator,
    search::{Search, SearchResult, SearchStats, Valuation},
    turn::TurnPolicy,
};

/// Minimax searcher.
pub struct Minimax<E> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> Minimax<E> {
    /// Create a new minimax searcher.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    fn value<G>(&self, game: &G, state: &G::State, ply: Ply, turns: &TurnPolicy, stats: &mut SearchStats) -> Result<f64>
    where
        G: Game,
        E: Evaluator<G>,
    {
        stats.visit(ply);
        if turns.is_terminal(game, state, ply) {
            return Ok(self.evaluator.evaluate(game, state));
        }

        let agent = turns.agent(ply);
        let actions = turns.legal_actions(game, state, ply)?;
        let mut values = Vec::with_capacity(actions.len());
        for action in actions {
            let successor = game.apply(state, agent, action);
            values.push(self.value(game, &successor, ply.next(), turns, stats)?);
        }

        let best = match agent.role(OpponentModel::Adversarial) {
            Role::Maximizer => values.into_iter().reduce(f64::max),
            _ => values.into_iter().reduce(f64::min),
        };
        best.ok_or(AdversaryError::NoLegalActions { agent, ply })
    }
}

impl<G, E> Search<G> for Minimax<E>
where
    G: Game,
    E: Evaluator<G>,
{
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        let turns = TurnPolicy::new(game, &self.config)?;
        let mut stats = SearchStats::default();
        stats.visit(Ply::ROOT);

        if turns.is_terminal(game, state, Ply::ROOT) {
            let valuation = Valuation::leaf(self.evaluator.evaluate(game, state));
            return Ok(SearchResult::new(valuation, stats));
        }

        let agent = turns.agent(Ply::ROOT);
        let mut best: Option<Valuation<G::Action>> = None;
        for action in turns.legal_actions(game, state, Ply::ROOT)? {
            let successor = game.apply(state, agent, action);
            let value = self.value(game, &successor, Ply::ROOT.next(), &turns, &mut stats)?;
            // Strict comparison keeps the first action reaching the maximum
            if best.map_or(true, |b| value > b.value) {
                best = Some(Valuation {
                    value,
                    action: Some(action),
                });
            }
        }

        let best = best.ok_or(AdversaryError::NoLegalActions {
            agent,
            ply: Ply::ROOT,
        })?;
        debug!(
            algorithm = "minimax",
            value = best.value,
            nodes = stats.nodes,
            deepest_ply = stats.deepest_ply.get(),
            "search complete"
        );
        Ok(SearchResult::new(best, stats))
    }
}

//! Expectimax search.
//!
//! The protagonist maximizes; every other agent is a chance node that picks
//! each of its legal actions with equal probability. Values are therefore
//! expectations rather than guarantees.

use adversary_core::{Game, OpponentModel, Ply, Result, Role};
use tracing::debug;

use crate::{
    config::SearchConfig,
    evaluator::Evaluator,
    search::{Search, SearchResult, SearchStats, Valuation},
    turn::TurnPolicy,
};

/// Expectimax searcher.
pub struct Expectimax<E> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> Expectimax<E> {
    /// Create a new expectimax searcher.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    fn value<G>(
        &self,
        game: &G,
        state: &G::State,
        ply: Ply,
        turns: &TurnPolicy,
        stats: &mut SearchStats,
    ) -> Result<Valuation<G::Action>>
    where
        G: Game,
        E: Evaluator<G>,
    {
        stats.visit(ply);
        if turns.is_terminal(game, state, ply) {
            return Ok(Valuation::leaf(self.evaluator.evaluate(game, state)));
        }

        let agent = turns.agent(ply);
        let actions = turns.legal_actions(game, state, ply)?;
        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let successor = game.apply(state, agent, action);
            let child = self.value(game, &successor, ply.next(), turns, stats)?;
            children.push((action, child.value));
        }

        Ok(match agent.role(OpponentModel::Chance) {
            Role::Maximizer => {
                let mut best = Valuation::leaf(-self.config.score_bound);
                for (i, (action, value)) in children.into_iter().enumerate() {
                    // The first child always seeds best, even below the bound
                    if i == 0 || value > best.value {
                        best = Valuation {
                            value,
                            action: Some(action),
                        };
                    }
                }
                best
            }
            _ => {
                let total: f64 = children.iter().map(|(_, value)| value).sum();
                Valuation::leaf(total / children.len() as f64)
            }
        })
    }
}

impl<G, E> Search<G> for Expectimax<E>
where
    G: Game,
    E: Evaluator<G>,
{
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        let turns = TurnPolicy::new(game, &self.config)?;
        let mut stats = SearchStats::default();

        let best = self.value(game, state, Ply::ROOT, &turns, &mut stats)?;
        debug!(
            algorithm = "expectimax",
            value = best.value,
            nodes = stats.nodes,
            deepest_ply = stats.deepest_ply.get(),
            "search complete"
        );
        Ok(SearchResult::new(best, stats))
    }
}

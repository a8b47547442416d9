//! Minimax with alpha-beta pruning.
//!
//! Reports the same root value as [`crate::Minimax`] while skipping
//! subtrees that cannot change it.
//!
//! Cutoffs fire only on a strict violation of the opposite bound
//! (`best > beta` at max nodes, `best < alpha` at min nodes). A child whose
//! value exactly equals the bound is still searched past, which keeps the
//! first-best action the same one minimax reports.
//!
//! The score bound only opens the root window. Every node's best value is
//! seeded from its first child, so max nodes always carry an action.

use adversary_core::{Game, OpponentModel, Ply, Result, Role};
use tracing::{debug, trace};

use crate::{
    config::SearchConfig,
    evaluator::Evaluator,
    search::{Search, SearchResult, SearchStats, Valuation},
    turn::TurnPolicy,
};

/// Alpha-beta searcher.
pub struct AlphaBeta<E> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> AlphaBeta<E> {
    /// Create a new alpha-beta searcher.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    #[allow(clippy::too_many_arguments)]
    fn value<G>(
        &self,
        game: &G,
        state: &G::State,
        ply: Ply,
        alpha: f64,
        beta: f64,
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

        match turns.agent(ply).role(OpponentModel::Adversarial) {
            Role::Maximizer => self.max_value(game, state, ply, alpha, beta, turns, stats),
            _ => self.min_value(game, state, ply, alpha, beta, turns, stats),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn max_value<G>(
        &self,
        game: &G,
        state: &G::State,
        ply: Ply,
        mut alpha: f64,
        beta: f64,
        turns: &TurnPolicy,
        stats: &mut SearchStats,
    ) -> Result<Valuation<G::Action>>
    where
        G: Game,
        E: Evaluator<G>,
    {
        let agent = turns.agent(ply);
        let mut best = Valuation::leaf(-self.config.score_bound);

        for (i, action) in turns.legal_actions(game, state, ply)?.into_iter().enumerate() {
            let successor = game.apply(state, agent, action);
            let child = self.value(game, &successor, ply.next(), alpha, beta, turns, stats)?;
            // The first child always seeds best, even below the bound
            if i == 0 || child.value > best.value {
                best = Valuation {
                    value: child.value,
                    action: Some(action),
                };
            }
            if best.value > beta {
                stats.cutoffs += 1;
                trace!(ply = ply.get(), value = best.value, beta, "beta cutoff");
                return Ok(best);
            }
            alpha = alpha.max(best.value);
        }
        Ok(best)
    }

    #[allow(clippy::too_many_arguments)]
    fn min_value<G>(
        &self,
        game: &G,
        state: &G::State,
        ply: Ply,
        alpha: f64,
        mut beta: f64,
        turns: &TurnPolicy,
        stats: &mut SearchStats,
    ) -> Result<Valuation<G::Action>>
    where
        G: Game,
        E: Evaluator<G>,
    {
        let agent = turns.agent(ply);
        let mut best = Valuation::leaf(self.config.score_bound);

        for (i, action) in turns.legal_actions(game, state, ply)?.into_iter().enumerate() {
            let successor = game.apply(state, agent, action);
            let child = self.value(game, &successor, ply.next(), alpha, beta, turns, stats)?;
            if i == 0 || child.value < best.value {
                best = Valuation::leaf(child.value);
            }
            if best.value < alpha {
                stats.cutoffs += 1;
                trace!(ply = ply.get(), value = best.value, alpha, "alpha cutoff");
                return Ok(best);
            }
            beta = beta.min(best.value);
        }
        Ok(best)
    }
}

impl<G, E> Search<G> for AlphaBeta<E>
where
    G: Game,
    E: Evaluator<G>,
{
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        let turns = TurnPolicy::new(game, &self.config)?;
        let mut stats = SearchStats::default();
        let bound = self.config.score_bound;

        let best = self.value(game, state, Ply::ROOT, -bound, bound, &turns, &mut stats)?;
        debug!(
            algorithm = "alphabeta",
            value = best.value,
            nodes = stats.nodes,
            deepest_ply = stats.deepest_ply.get(),
            cutoffs = stats.cutoffs,
            "search complete"
        );
        Ok(SearchResult::new(best, stats))
    }
}

//! Common search surface.
//!
//! Every strategy returns the same shape: a value paired with an optional
//! action. Only decision points that belong to the protagonist carry an
//! action; chance nodes, minimizing nodes and terminal states carry `None`.

use adversary_core::{AdversaryError, Game, Ply, Result};
use serde::{Deserialize, Serialize};

use crate::{
    alphabeta::AlphaBeta, config::Algorithm, config::SearchConfig, evaluator::Evaluator,
    expectimax::Expectimax, minimax::Minimax,
};

/// A node's value with the action that achieves it, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Valuation<A> {
    pub value: f64,
    pub action: Option<A>,
}

impl<A> Valuation<A> {
    /// A value with no associated action.
    pub fn leaf(value: f64) -> Self {
        Self { value, action: None }
    }
}

/// Work counters for a single search.
///
/// Threaded by `&mut` through one traversal; never read by the search
/// itself, so they cannot influence results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of states visited, root included.
    pub nodes: u64,

    /// Deepest ply reached.
    pub deepest_ply: Ply,

    /// Number of alpha-beta cutoffs.
    pub cutoffs: u64,
}

impl SearchStats {
    /// Record a visit to a state at `ply`.
    pub fn visit(&mut self, ply: Ply) {
        self.nodes += 1;
        if ply > self.deepest_ply {
            self.deepest_ply = ply;
        }
    }
}

/// Result of a search from a root state.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    /// Root value from the protagonist's perspective.
    pub value: f64,

    /// Chosen protagonist action. `None` when the root is already terminal.
    pub action: Option<A>,

    /// Work done by the search.
    pub stats: SearchStats,
}

impl<A> SearchResult<A> {
    pub(crate) fn new(valuation: Valuation<A>, stats: SearchStats) -> Self {
        Self {
            value: valuation.value,
            action: valuation.action,
            stats,
        }
    }
}

/// A fixed-depth game-tree search strategy.
pub trait Search<G: Game> {
    /// Short strategy name for logs and reports.
    fn name(&self) -> &'static str;

    /// Search from `state`, where agent 0 is to move.
    fn search(&self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>>;

    /// Pick the protagonist's action from `state`.
    ///
    /// # Errors
    /// Returns `NoDecision` if `state` is already terminal, plus any error
    /// raised by [`Search::search`].
    fn select_action(&self, game: &G, state: &G::State) -> Result<G::Action> {
        self.search(game, state)?.action.ok_or(AdversaryError::NoDecision)
    }
}

impl Algorithm {
    /// Build a boxed searcher for this algorithm.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn searcher<G, E>(self, config: SearchConfig, evaluator: E) -> Result<Box<dyn Search<G> + Send + Sync>>
    where
        G: Game + 'static,
        E: Evaluator<G> + Send + Sync + 'static,
    {
        Ok(match self {
            Algorithm::Minimax => Box::new(Minimax::new(config, evaluator)?),
            Algorithm::AlphaBeta => Box::new(AlphaBeta::new(config, evaluator)?),
            Algorithm::Expectimax => Box::new(Expectimax::new(config, evaluator)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameTree, Node, TreeEvaluator};

    #[test]
    fn test_stats_track_deepest_ply() {
        let mut stats = SearchStats::default();
        stats.visit(Ply(0));
        stats.visit(Ply(3));
        stats.visit(Ply(1));
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.deepest_ply, Ply(3));
    }

    #[test]
    fn test_boxed_searchers_agree_on_deterministic_tree() {
        let tree = GameTree::new(
            2,
            Node::branch(
                0.0,
                vec![
                    Node::branch(0.0, vec![Node::leaf(3.0), Node::leaf(7.0)]),
                    Node::branch(0.0, vec![Node::leaf(6.0), Node::leaf(6.0)]),
                ],
            ),
        );

        let mut values = Vec::new();
        for algorithm in Algorithm::ALL {
            let searcher = algorithm
                .searcher::<GameTree, _>(SearchConfig::with_depth(1), TreeEvaluator)
                .unwrap();
            assert_eq!(searcher.name(), algorithm.name());
            let result = searcher.search(&tree, &tree.root()).unwrap();
            values.push((algorithm, result.value, result.action));
        }

        assert_eq!(values[0].1, 6.0);
        assert_eq!(values[1].1, 6.0);
        assert_eq!(values[0].2, values[1].2);
        // Both branches average to 5 and 6
        assert_eq!(values[2].1, 6.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let result = Algorithm::AlphaBeta.searcher::<GameTree, _>(SearchConfig::with_depth(0), TreeEvaluator);
        assert!(matches!(result, Err(AdversaryError::InvalidDepth(0))));
    }

    #[test]
    fn test_select_action_on_terminal_root() {
        let tree = GameTree::new(2, Node::lose(-10.0));
        let searcher = Minimax::new(SearchConfig::default(), TreeEvaluator).unwrap();
        assert_eq!(
            searcher.select_action(&tree, &tree.root()),
            Err(AdversaryError::NoDecision)
        );
    }
}

//! Evaluation abstraction for search.
//!
//! Searchers call an `Evaluator` on every state where the traversal stops,
//! whether because the game was decided or because the depth limit was hit.
//! Evaluators are injected as typed values when a searcher is built.

use adversary_core::{Game, Scored};

/// Trait for scoring game states.
///
/// Contract:
/// - higher is better for the protagonist (agent 0)
/// - total: defined on every state the search can reach
/// - pure: no memory between calls
/// - bounded strictly inside the configured score bound
pub trait Evaluator<G: Game> {
    fn evaluate(&self, game: &G, state: &G::State) -> f64;
}

impl<G: Game, E: Evaluator<G> + ?Sized> Evaluator<G> for &E {
    fn evaluate(&self, game: &G, state: &G::State) -> f64 {
        (**self).evaluate(game, state)
    }
}

/// Evaluator returning the game's running score.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluator;

impl<G: Scored> Evaluator<G> for ScoreEvaluator {
    fn evaluate(&self, game: &G, state: &G::State) -> f64 {
        game.score(state)
    }
}

/// Evaluator backed by a closure.
#[derive(Clone, Copy)]
pub struct FnEvaluator<F>(F);

impl<G, F> Evaluator<G> for FnEvaluator<F>
where
    G: Game,
    F: Fn(&G, &G::State) -> f64,
{
    fn evaluate(&self, game: &G, state: &G::State) -> f64 {
        (self.0)(game, state)
    }
}

/// Wrap a closure as an evaluator.
///
/// # Example
/// ```
/// use adversary_search::evaluator::{from_fn, Evaluator};
/// use adversary_search::games::{GameTree, Node, TreePosition};
///
/// let tree = GameTree::new(1, Node::branch(0.0, vec![Node::leaf(4.0)]));
/// let twice = from_fn(|tree: &GameTree, state: &TreePosition| 2.0 * tree.value(state));
/// assert_eq!(twice.evaluate(&tree, &tree.root()), 0.0);
/// ```
pub fn from_fn<F>(f: F) -> FnEvaluator<F> {
    FnEvaluator(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Pursuit, PursuitState, SMALL_LAYOUT};
    use adversary_core::Agent;

    #[test]
    fn test_score_evaluator_reads_score() {
        let game: Pursuit = SMALL_LAYOUT.parse().unwrap();
        let state = game.initial_state();
        assert_eq!(ScoreEvaluator.evaluate(&game, &state), 0.0);

        // Every protagonist move costs one point
        let action = game.legal_actions(&state, Agent::PROTAGONIST)[0];
        let next = game.apply(&state, Agent::PROTAGONIST, action);
        assert_eq!(ScoreEvaluator.evaluate(&game, &next), game.score(&next));
    }

    #[test]
    fn test_fn_evaluator() {
        let game: Pursuit = SMALL_LAYOUT.parse().unwrap();
        let state = game.initial_state();
        let constant = from_fn(|_: &Pursuit, _: &PursuitState| 7.5);
        assert_eq!(constant.evaluate(&game, &state), 7.5);
    }

    #[test]
    fn test_reference_evaluator() {
        let game: Pursuit = SMALL_LAYOUT.parse().unwrap();
        let state = game.initial_state();
        let by_ref = &ScoreEvaluator;
        assert_eq!(by_ref.evaluate(&game, &state), 0.0);
    }
}

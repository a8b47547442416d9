//! Hand-checked search scenarios.
//!
//! Each test builds a small position whose answer can be worked out on
//! paper and checks every strategy against it.

use adversary_core::{AdversaryError, Agent, Game, Ply};
use adversary_search::{
    games::{Direction, GameTree, Node, Pursuit, PursuitEvaluator, TreeAction, TreeEvaluator, OPEN_LAYOUT, SMALL_LAYOUT},
    Algorithm, AlphaBeta, Expectimax, Minimax, Search, SearchConfig,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn searcher(algorithm: Algorithm, depth: usize) -> Box<dyn Search<GameTree> + Send + Sync> {
    algorithm.searcher(SearchConfig::with_depth(depth), TreeEvaluator).unwrap()
}

/// Left holds the adversary to 3 but averages 4; right risks 1 for an
/// average of 5.
fn safe_or_risky() -> GameTree {
    GameTree::new(
        2,
        Node::branch(
            0.0,
            vec![
                Node::branch(0.0, vec![Node::leaf(3.0), Node::leaf(5.0)]),
                Node::branch(0.0, vec![Node::leaf(1.0), Node::leaf(9.0)]),
            ],
        ),
    )
}

/// A single line of play `length` moves long with the given leaf value.
fn chain(length: usize, value: f64) -> Node {
    (0..length).fold(Node::leaf(value), |node, i| Node::branch(i as f64, vec![node]))
}

// =============================================================================
// Opponent models
// =============================================================================

#[test]
fn test_adversarial_strategies_play_safe() {
    let tree = safe_or_risky();
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let result = searcher(algorithm, 1).search(&tree, &tree.root()).unwrap();
        assert_eq!(result.value, 3.0, "{}", algorithm);
        assert_eq!(result.action, Some(TreeAction(0)), "{}", algorithm);
    }
}

#[test]
fn test_expectimax_plays_the_odds() {
    let tree = safe_or_risky();
    let result = searcher(Algorithm::Expectimax, 1).search(&tree, &tree.root()).unwrap();
    assert_eq!(result.value, 5.0);
    assert_eq!(result.action, Some(TreeAction(1)));
}

// =============================================================================
// Terminal states and depth accounting
// =============================================================================

#[test]
fn test_terminal_root_short_circuits() {
    for root in [Node::win(250.0), Node::lose(-250.0)] {
        let tree = GameTree::new(3, root);
        let expected = tree.value(&tree.root());
        for algorithm in Algorithm::ALL {
            let searcher = searcher(algorithm, 2);
            let result = searcher.search(&tree, &tree.root()).unwrap();
            assert_eq!(result.value, expected);
            assert_eq!(result.action, None);
            assert_eq!(result.stats.nodes, 1);
            assert_eq!(searcher.select_action(&tree, &tree.root()), Err(AdversaryError::NoDecision));
        }
    }
}

#[test]
fn test_win_below_horizon_stops_search() {
    // The win at ply 1 is evaluated directly; its subtree does not exist
    let tree = GameTree::new(2, Node::branch(0.0, vec![Node::win(80.0), chain(3, 10.0)]));
    for algorithm in Algorithm::ALL {
        let result = searcher(algorithm, 2).search(&tree, &tree.root()).unwrap();
        assert_eq!(result.value, 80.0, "{}", algorithm);
        assert_eq!(result.action, Some(TreeAction(0)), "{}", algorithm);
    }
}

#[test]
fn test_two_rounds_of_two_agents_reach_ply_four() {
    // The chain continues past the horizon: estimates at ply 4 are used
    let tree = GameTree::new(2, chain(6, -7.0));
    for algorithm in Algorithm::ALL {
        let result = searcher(algorithm, 2).search(&tree, &tree.root()).unwrap();
        assert_eq!(result.stats.deepest_ply, Ply(4), "{}", algorithm);
        assert_eq!(result.stats.nodes, 5, "{}", algorithm);
        // Estimate stored four levels above the leaf
        assert_eq!(result.value, 1.0, "{}", algorithm);
    }
}

#[test]
fn test_ties_keep_first_action() {
    let tree = GameTree::new(
        2,
        Node::branch(
            0.0,
            vec![
                Node::branch(0.0, vec![Node::leaf(2.0)]),
                Node::branch(0.0, vec![Node::leaf(2.0)]),
                Node::branch(0.0, vec![Node::leaf(2.0)]),
            ],
        ),
    );
    for algorithm in Algorithm::ALL {
        let result = searcher(algorithm, 1).search(&tree, &tree.root()).unwrap();
        assert_eq!(result.action, Some(TreeAction(0)), "{}", algorithm);
    }
}

#[test]
fn test_broken_game_reports_missing_actions() {
    // An open position with no children above the horizon
    let tree = GameTree::new(2, Node::branch(0.0, vec![Node::branch(0.0, vec![Node::leaf(1.0)]), Node::leaf(4.0)]));
    for algorithm in Algorithm::ALL {
        let err = searcher(algorithm, 1).search(&tree, &tree.root()).unwrap_err();
        assert_eq!(err, AdversaryError::NoLegalActions { agent: Agent(1), ply: Ply(1) }, "{}", algorithm);
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_configuration() {
    assert_eq!(
        Minimax::new(SearchConfig::with_depth(0), TreeEvaluator).err(),
        Some(AdversaryError::InvalidDepth(0))
    );

    let mut config = SearchConfig::default();
    config.score_bound = f64::NAN;
    assert!(matches!(AlphaBeta::new(config, TreeEvaluator), Err(AdversaryError::InvalidBound(_))));

    assert_eq!(
        "monte-carlo".parse::<Algorithm>(),
        Err(AdversaryError::UnknownAlgorithm("monte-carlo".to_string()))
    );
    assert_eq!(
        "clever".parse::<PursuitEvaluator>(),
        Err(AdversaryError::UnknownEvaluation("clever".to_string()))
    );
}

#[test]
fn test_evaluations_beyond_bound_still_pick_an_action() {
    let tree = GameTree::new(
        2,
        Node::branch(
            0.0,
            vec![
                Node::branch(0.0, vec![Node::leaf(-50.0), Node::leaf(-40.0)]),
                Node::branch(0.0, vec![Node::leaf(-70.0)]),
            ],
        ),
    );
    let mut config = SearchConfig::with_depth(1);
    config.score_bound = 10.0;

    for (algorithm, expected) in [
        (Algorithm::Minimax, -50.0),
        (Algorithm::AlphaBeta, -50.0),
        (Algorithm::Expectimax, -45.0),
    ] {
        let searcher = algorithm.searcher::<GameTree, _>(config.clone(), TreeEvaluator).unwrap();
        let result = searcher.search(&tree, &tree.root()).unwrap();
        assert_eq!(result.value, expected, "{}", algorithm);
        assert_eq!(result.action, Some(TreeAction(0)), "{}", algorithm);
        assert_eq!(searcher.select_action(&tree, &tree.root()), Ok(TreeAction(0)));
    }
}

#[test]
fn test_overflowing_depth_rejected() {
    let tree = safe_or_risky();
    for algorithm in Algorithm::ALL {
        let err = searcher(algorithm, usize::MAX).search(&tree, &tree.root()).unwrap_err();
        assert_eq!(err, AdversaryError::InvalidDepth(usize::MAX), "{}", algorithm);
    }
}

#[test]
fn test_zero_agent_game_rejected() {
    let tree = GameTree::new(0, Node::branch(0.0, vec![Node::leaf(1.0)]));
    let result = Expectimax::new(SearchConfig::default(), TreeEvaluator)
        .unwrap()
        .search(&tree, &tree.root());
    assert_eq!(result, Err(AdversaryError::NoAgents));
}

// =============================================================================
// Pursuit
// =============================================================================

#[test]
fn test_pursuit_alphabeta_matches_minimax() {
    for layout in [SMALL_LAYOUT, OPEN_LAYOUT] {
        let game: Pursuit = layout.parse().unwrap();
        let state = game.initial_state();
        for evaluator in [PursuitEvaluator::Score, PursuitEvaluator::Heuristic] {
            let config = SearchConfig::with_depth(2);
            let mm = Minimax::new(config.clone(), evaluator).unwrap().search(&game, &state).unwrap();
            let ab = AlphaBeta::new(config, evaluator).unwrap().search(&game, &state).unwrap();

            assert_eq!(mm.value, ab.value);
            assert_eq!(mm.action, ab.action);
            assert!(ab.stats.nodes <= mm.stats.nodes);
        }
    }
}

#[test]
fn test_pursuit_escapes_adjacent_ghost() {
    // Stepping east walks into the ghost; anything else survives the round
    let game: Pursuit = "%%%%%%\n%  G.%\n%P%%%%\n%%%%%%".parse().unwrap();
    let mut state = game.initial_state();
    state = game.apply(&state, Agent(0), Direction::North);
    state = game.apply(&state, Agent(1), Direction::West);

    let searcher = AlphaBeta::new(SearchConfig::with_depth(1), PursuitEvaluator::Score).unwrap();
    let action = searcher.select_action(&game, &state).unwrap();
    assert_ne!(action, Direction::East);
}

#[test]
fn test_pursuit_games_only_play_legal_moves() {
    for algorithm in Algorithm::ALL {
        let game: Pursuit = SMALL_LAYOUT.parse().unwrap();
        let searcher = algorithm
            .searcher::<Pursuit, _>(SearchConfig::with_depth(2), PursuitEvaluator::Heuristic)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = game.initial_state();

        for _ in 0..40 {
            if game.is_terminal(&state) {
                break;
            }
            let action = searcher.select_action(&game, &state).unwrap();
            assert!(game.legal_actions(&state, Agent::PROTAGONIST).contains(&action));
            state = game.apply(&state, Agent::PROTAGONIST, action);

            for ghost in 1..game.num_agents() {
                if game.is_terminal(&state) {
                    break;
                }
                let moves = game.legal_actions(&state, Agent(ghost));
                let &step = moves.choose(&mut rng).unwrap();
                state = game.apply(&state, Agent(ghost), step);
            }
        }
    }
}

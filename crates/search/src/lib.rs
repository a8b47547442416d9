//! Fixed-depth adversarial search for multi-agent games.
//!
//! This crate searches any game implementing `adversary_core::Game` from the
//! point of view of agent 0, the protagonist. All other agents are either
//! adversaries or chance nodes depending on the strategy.
//!
//! # Strategies
//!
//! - **Minimax**: every other agent minimizes the protagonist's value
//! - **Alpha-beta**: minimax with pruning; same value, less work
//! - **Expectimax**: every other agent picks uniformly at random
//!
//! Depth is counted in rounds: with `n` agents, a search of depth `d` stops
//! after `d * n` moves, or earlier when the game is won or lost.
//!
//! # Example
//!
//! ```
//! use adversary_search::{AlphaBeta, Search, SearchConfig};
//! use adversary_search::games::{Pursuit, PursuitEvaluator, SMALL_LAYOUT};
//! use adversary_core::Game;
//!
//! let game: Pursuit = SMALL_LAYOUT.parse().unwrap();
//! let state = game.initial_state();
//!
//! let searcher = AlphaBeta::new(SearchConfig::with_depth(2), PursuitEvaluator::Score).unwrap();
//! let result = searcher.search(&game, &state).unwrap();
//! println!("Best action: {:?}", result.action);
//! println!("Root value: {}", result.value);
//! println!("Visited {} states", result.stats.nodes);
//! ```

pub mod alphabeta;
pub mod config;
pub mod evaluator;
pub mod expectimax;
pub mod games;
pub mod minimax;
pub mod search;
pub mod turn;

pub use alphabeta::AlphaBeta;
pub use config::{Algorithm, SearchConfig};
pub use evaluator::{Evaluator, FnEvaluator, ScoreEvaluator};
pub use expectimax::Expectimax;
pub use minimax::Minimax;
pub use search::{Search, SearchResult, SearchStats, Valuation};
pub use turn::TurnPolicy;

//! Games the searchers are exercised on.
//!
//! [`GameTree`] spells out a tree node by node, which makes search results
//! easy to check by hand. [`Pursuit`] is a grid chase game with any number
//! of ghosts.

pub mod pursuit;
pub mod tree;

pub use pursuit::{Direction, Ghost, Layout, Outcome, Position, Pursuit, PursuitEvaluator, PursuitState, OPEN_LAYOUT, SMALL_LAYOUT};
pub use tree::{GameTree, Node, TreeAction, TreeEvaluator, TreePosition};

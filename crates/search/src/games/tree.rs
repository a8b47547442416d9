//! Explicit game trees for exercising searchers.
//!
//! Every node stores the value an evaluator sees when the search stops
//! there: the payoff at a leaf, or a heuristic estimate at an inner node cut
//! off by the depth limit. Nodes can also be marked won or lost, which ends
//! the search regardless of depth.

use adversary_core::{Agent, Game};
use rand::Rng;

use crate::evaluator::Evaluator;

/// Tree description used to build a [`GameTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Undecided position with no moves below it.
    Leaf(f64),
    /// Position won by the protagonist.
    Win(f64),
    /// Position lost by the protagonist.
    Lose(f64),
    /// Position with one child per legal action, in action order.
    Branch { estimate: f64, children: Vec<Node> },
}

impl Node {
    pub fn leaf(value: f64) -> Self {
        Node::Leaf(value)
    }

    pub fn win(value: f64) -> Self {
        Node::Win(value)
    }

    pub fn lose(value: f64) -> Self {
        Node::Lose(value)
    }

    pub fn branch(estimate: f64, children: Vec<Node>) -> Self {
        Node::Branch { estimate, children }
    }
}

/// Position in a [`GameTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TreePosition(usize);

/// Index of the child to move to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TreeAction(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Status {
    Open,
    Won,
    Lost,
}

#[derive(Clone, Debug)]
struct Slot {
    value: f64,
    status: Status,
    children: Vec<usize>,
}

/// A game whose positions are the nodes of a fixed tree.
///
/// Agents take turns in rotation; the tree itself does not care who moves,
/// every agent chooses among the same children.
#[derive(Clone, Debug)]
pub struct GameTree {
    num_agents: usize,
    slots: Vec<Slot>,
}

impl GameTree {
    /// Flatten `root` into a tree played by `num_agents` agents.
    pub fn new(num_agents: usize, root: Node) -> Self {
        let mut slots = Vec::new();
        Self::flatten(root, &mut slots);
        Self { num_agents, slots }
    }

    fn flatten(node: Node, slots: &mut Vec<Slot>) -> usize {
        let id = slots.len();
        let (value, status, children) = match node {
            Node::Leaf(value) => (value, Status::Open, Vec::new()),
            Node::Win(value) => (value, Status::Won, Vec::new()),
            Node::Lose(value) => (value, Status::Lost, Vec::new()),
            Node::Branch { estimate, children } => (estimate, Status::Open, children),
        };
        slots.push(Slot {
            value,
            status,
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            let child_id = Self::flatten(child, slots);
            slots[id].children.push(child_id);
        }
        id
    }

    /// Generate a random tree whose open leaves all sit exactly `plies`
    /// moves below the root.
    ///
    /// Inner nodes get between 1 and `max_branching` children and an
    /// integer estimate; roughly one inner node in ten is replaced by a won
    /// or lost position. All values are integers in `[-100, 100]`.
    pub fn random<R: Rng>(num_agents: usize, plies: usize, max_branching: usize, rng: &mut R) -> Self {
        Self::new(num_agents, Self::random_node(plies, max_branching.max(1), true, rng))
    }

    fn random_node<R: Rng>(plies: usize, max_branching: usize, root: bool, rng: &mut R) -> Node {
        let value = rng.gen_range(-100..=100) as f64;
        if plies == 0 {
            return Node::leaf(value);
        }
        if !root && rng.gen_bool(0.1) {
            return if rng.gen_bool(0.5) { Node::win(value) } else { Node::lose(value) };
        }
        let width = rng.gen_range(1..=max_branching);
        let children = (0..width)
            .map(|_| Self::random_node(plies - 1, max_branching, false, rng))
            .collect();
        Node::branch(value, children)
    }

    /// The root position.
    pub fn root(&self) -> TreePosition {
        TreePosition(0)
    }

    /// The child reached by taking action `index`, if it exists.
    pub fn child(&self, position: &TreePosition, index: usize) -> Option<TreePosition> {
        self.slots[position.0].children.get(index).copied().map(TreePosition)
    }

    /// Value stored at `position`.
    pub fn value(&self, position: &TreePosition) -> f64 {
        self.slots[position.0].value
    }

    /// Total number of positions in the tree.
    pub fn num_positions(&self) -> usize {
        self.slots.len()
    }
}

impl Game for GameTree {
    type State = TreePosition;
    type Action = TreeAction;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn initial_state(&self) -> Self::State {
        self.root()
    }

    fn legal_actions(&self, state: &Self::State, _agent: Agent) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        (0..self.slots[state.0].children.len()).map(TreeAction).collect()
    }

    fn apply(&self, state: &Self::State, _agent: Agent, action: Self::Action) -> Self::State {
        TreePosition(self.slots[state.0].children[action.0])
    }

    fn is_win(&self, state: &Self::State) -> bool {
        self.slots[state.0].status == Status::Won
    }

    fn is_lose(&self, state: &Self::State) -> bool {
        self.slots[state.0].status == Status::Lost
    }
}

/// Evaluator reading the value stored on each tree node.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeEvaluator;

impl Evaluator<GameTree> for TreeEvaluator {
    fn evaluate(&self, game: &GameTree, state: &TreePosition) -> f64 {
        game.value(state)
    }
}

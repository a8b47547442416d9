//! Pursuit games between a searching protagonist and random ghosts.

use adversary_core::{AdversaryError, Agent, Game, Result};
use adversary_search::{
    games::{Direction, Outcome, Pursuit},
    Search,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Won,
    Lost,
    /// Move limit reached first.
    Unfinished,
}

/// A complete game trajectory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed driving the ghosts.
    pub seed: u64,

    /// Protagonist moves in order.
    pub moves: Vec<Direction>,

    pub outcome: GameOutcome,

    /// Final game score.
    pub score: f64,

    /// States visited by all searches in the game.
    pub nodes: u64,

    /// Alpha-beta cutoffs over all searches in the game.
    pub cutoffs: u64,
}

/// Aggregate results over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub unfinished: usize,
    pub average_score: f64,
    pub average_moves: f64,
    pub nodes_per_move: f64,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let count = |outcome: GameOutcome| records.iter().filter(|r| r.outcome == outcome).count();
        let games = records.len();
        let moves: usize = records.iter().map(|r| r.moves.len()).sum();
        let nodes: u64 = records.iter().map(|r| r.nodes).sum();

        Self {
            games,
            wins: count(GameOutcome::Won),
            losses: count(GameOutcome::Lost),
            unfinished: count(GameOutcome::Unfinished),
            average_score: records.iter().map(|r| r.score).sum::<f64>() / games as f64,
            average_moves: moves as f64 / games as f64,
            nodes_per_move: if moves == 0 { 0.0 } else { nodes as f64 / moves as f64 },
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Play one game: the protagonist moves with `searcher`, every ghost picks
/// a legal move uniformly at random.
///
/// # Errors
/// Propagates any search error.
pub fn play_game<S>(game: &Pursuit, searcher: &S, seed: u64, max_moves: usize) -> Result<GameRecord>
where
    S: Search<Pursuit> + ?Sized,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.initial_state();
    let mut moves = Vec::new();
    let mut nodes = 0;
    let mut cutoffs = 0;

    'game: while moves.len() < max_moves && !game.is_terminal(&state) {
        let result = searcher.search(game, &state)?;
        nodes += result.stats.nodes;
        cutoffs += result.stats.cutoffs;
        let action = result.action.ok_or(AdversaryError::NoDecision)?;
        state = game.apply(&state, Agent::PROTAGONIST, action);
        moves.push(action);

        for ghost in 1..game.num_agents() {
            if game.is_terminal(&state) {
                break 'game;
            }
            let agent = Agent(ghost);
            let options = game.legal_actions(&state, agent);
            if let Some(&step) = options.choose(&mut rng) {
                state = game.apply(&state, agent, step);
            }
        }
        debug!(seed, turn = moves.len(), %action, score = state.score(), "turn played");
    }

    let outcome = match state.outcome() {
        Some(Outcome::Won) => GameOutcome::Won,
        Some(Outcome::Lost) => GameOutcome::Lost,
        None => GameOutcome::Unfinished,
    };
    info!(seed, ?outcome, score = state.score(), moves = moves.len(), "game finished");

    Ok(GameRecord {
        seed,
        moves,
        outcome,
        score: state.score(),
        nodes,
        cutoffs,
    })
}

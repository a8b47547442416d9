//! Pursuit: a small grid chase game with any number of ghosts.
//!
//! The protagonist (agent 0) collects food while ghosts (agents 1..) chase
//! it. Eating every pellet wins; sharing a cell with a ghost loses, unless
//! the ghost is scared after the protagonist picked up a capsule, in which
//! case the ghost is eaten and sent back to its starting cell.
//!
//! Layouts are plain text grids:
//! ```text
//! %%%%%%%%%%
//! %P.  .  G%
//! % %% %%% %
//! %.  o   .%
//! %%%%%%%%%%
//! ```
//! `%` wall, `.` food, `o` capsule, `P` protagonist, `G` ghost.

use adversary_core::{AdversaryError, Agent, Game, Result, Scored};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::evaluator::Evaluator;

/// Points lost on every protagonist move.
pub const TIME_PENALTY: f64 = 1.0;

/// Points for eating a pellet.
pub const FOOD_REWARD: f64 = 10.0;

/// Points for eating the last pellet.
pub const WIN_REWARD: f64 = 500.0;

/// Points lost when caught.
pub const LOSE_PENALTY: f64 = 500.0;

/// Points for eating a scared ghost.
pub const GHOST_REWARD: f64 = 200.0;

/// Ghost moves a capsule keeps ghosts scared for.
pub const SCARED_TIME: u32 = 40;

/// Heuristic value of standing next to a dangerous ghost.
pub const DANGER: f64 = -500_000.0;

/// One ghost guarding a corridor.
pub const SMALL_LAYOUT: &str = "\
%%%%%%%%%%
%P.  .  G%
% %% %%% %
%.  o   .%
%%%%%%%%%%";

/// Two ghosts in an open room.
pub const OPEN_LAYOUT: &str = "\
%%%%%%%%%
%P  .  G%
%  . .  %
%G  .  o%
%%%%%%%%%";

/// A move on the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Moves that change position, in enumeration order.
    pub const MOVES: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };
        f.write_str(name)
    }
}

/// Grid cell, `y` growing downwards.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring cell in `direction`, if it is not off the grid's
    /// top or left edge.
    fn step(self, direction: Direction) -> Option<Position> {
        let Position { x, y } = self;
        match direction {
            Direction::North => y.checked_sub(1).map(|y| Position { x, y }),
            Direction::South => Some(Position { x, y: y + 1 }),
            Direction::East => Some(Position { x: x + 1, y }),
            Direction::West => x.checked_sub(1).map(|x| Position { x, y }),
            Direction::Stop => Some(self),
        }
    }
}

/// Static part of a pursuit game: walls and starting positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    protagonist: Position,
    ghosts: Vec<Position>,
}

impl Layout {
    /// Look up a built-in layout.
    ///
    /// # Errors
    /// Returns `InvalidLayout` for unknown names.
    pub fn named(name: &str) -> Result<Self> {
        match name {
            "small" => SMALL_LAYOUT.parse(),
            "open" => OPEN_LAYOUT.parse(),
            _ => Err(AdversaryError::InvalidLayout(format!("no built-in layout named '{}'", name))),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_ghosts(&self) -> usize {
        self.ghosts.len()
    }

    /// True for walls and for cells outside the grid.
    pub fn is_wall(&self, position: Position) -> bool {
        if position.x >= self.width || position.y >= self.height {
            return true;
        }
        self.walls[self.index(position)]
    }

    fn index(&self, position: Position) -> usize {
        position.y * self.width + position.x
    }

    /// Non-stop moves that do not run into a wall, in enumeration order.
    fn open_moves(&self, from: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::MOVES
            .into_iter()
            .filter(move |&d| from.step(d).is_some_and(|to| !self.is_wall(to)))
    }
}

impl FromStr for Layout {
    type Err = AdversaryError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.lines().map(str::trim_end).filter(|line| !line.is_empty()).collect();
        if rows.is_empty() {
            return Err(AdversaryError::InvalidLayout("layout is empty".to_string()));
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = Vec::with_capacity(width * height);
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut protagonist = None;
        let mut ghosts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(AdversaryError::InvalidLayout(format!(
                    "row {} has width {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, cell) in row.chars().enumerate() {
                let position = Position::new(x, y);
                walls.push(cell == '%');
                match cell {
                    '%' | ' ' => {}
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'G' => ghosts.push(position),
                    'P' => {
                        if protagonist.replace(position).is_some() {
                            return Err(AdversaryError::InvalidLayout(
                                "more than one protagonist".to_string(),
                            ));
                        }
                    }
                    other => {
                        return Err(AdversaryError::InvalidLayout(format!(
                            "unexpected character '{}' at ({}, {})",
                            other, x, y
                        )))
                    }
                }
            }
        }

        let protagonist =
            protagonist.ok_or_else(|| AdversaryError::InvalidLayout("no protagonist".to_string()))?;
        if food.is_empty() {
            return Err(AdversaryError::InvalidLayout("layout has no food".to_string()));
        }

        Ok(Self {
            width,
            height,
            walls,
            food,
            capsules,
            protagonist,
            ghosts,
        })
    }
}

/// A ghost's position and remaining scared time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ghost {
    pub position: Position,
    pub scared: u32,
}

impl Ghost {
    pub fn is_scared(&self) -> bool {
        self.scared > 0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won,
    Lost,
}

/// Dynamic part of a pursuit game.
#[derive(Clone, Debug, PartialEq)]
pub struct PursuitState {
    protagonist: Position,
    ghosts: Vec<Ghost>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    score: f64,
    outcome: Option<Outcome>,
}

impl PursuitState {
    pub fn protagonist(&self) -> Position {
        self.protagonist
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    /// Remaining pellets.
    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

/// The pursuit game for a fixed layout.
#[derive(Clone, Debug)]
pub struct Pursuit {
    layout: Arc<Layout>,
}

impl Pursuit {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout: Arc::new(layout),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Draw `state` on the layout grid. Scared ghosts are shown as `g`.
    pub fn render(&self, state: &PursuitState) -> String {
        let layout = &self.layout;
        let mut grid: Vec<Vec<char>> = (0..layout.height)
            .map(|y| {
                (0..layout.width)
                    .map(|x| if layout.is_wall(Position::new(x, y)) { '%' } else { ' ' })
                    .collect()
            })
            .collect();

        for food in &state.food {
            grid[food.y][food.x] = '.';
        }
        for capsule in &state.capsules {
            grid[capsule.y][capsule.x] = 'o';
        }
        grid[state.protagonist.y][state.protagonist.x] = 'P';
        for ghost in &state.ghosts {
            grid[ghost.position.y][ghost.position.x] = if ghost.is_scared() { 'g' } else { 'G' };
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn move_protagonist(&self, state: &mut PursuitState, direction: Direction) {
        if let Some(to) = state.protagonist.step(direction) {
            state.protagonist = to;
        }
        state.score -= TIME_PENALTY;

        let here = state.protagonist;
        if let Some(i) = state.food.iter().position(|&f| f == here) {
            state.food.remove(i);
            state.score += FOOD_REWARD;
            if state.food.is_empty() {
                state.score += WIN_REWARD;
                state.outcome = Some(Outcome::Won);
                return;
            }
        }
        if let Some(i) = state.capsules.iter().position(|&c| c == here) {
            state.capsules.remove(i);
            for ghost in &mut state.ghosts {
                ghost.scared = SCARED_TIME;
            }
        }

        for index in 0..state.ghosts.len() {
            self.resolve_collision(state, index);
            if state.outcome.is_some() {
                return;
            }
        }
    }

    fn move_ghost(&self, state: &mut PursuitState, index: usize, direction: Direction) {
        let ghost = &mut state.ghosts[index];
        if let Some(to) = ghost.position.step(direction) {
            ghost.position = to;
        }
        ghost.scared = ghost.scared.saturating_sub(1);
        self.resolve_collision(state, index);
    }

    fn resolve_collision(&self, state: &mut PursuitState, index: usize) {
        let ghost = &mut state.ghosts[index];
        if ghost.position != state.protagonist {
            return;
        }
        if ghost.is_scared() {
            state.score += GHOST_REWARD;
            ghost.position = self.layout.ghosts[index];
            ghost.scared = 0;
        } else {
            state.score -= LOSE_PENALTY;
            state.outcome = Some(Outcome::Lost);
        }
    }
}

impl FromStr for Pursuit {
    type Err = AdversaryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(s.parse()?))
    }
}

impl Game for Pursuit {
    type State = PursuitState;
    type Action = Direction;

    fn num_agents(&self) -> usize {
        1 + self.layout.ghosts.len()
    }

    fn initial_state(&self) -> Self::State {
        PursuitState {
            protagonist: self.layout.protagonist,
            ghosts: self
                .layout
                .ghosts
                .iter()
                .map(|&position| Ghost { position, scared: 0 })
                .collect(),
            food: self.layout.food.clone(),
            capsules: self.layout.capsules.clone(),
            score: 0.0,
            outcome: None,
        }
    }

    fn legal_actions(&self, state: &Self::State, agent: Agent) -> Vec<Self::Action> {
        if state.outcome.is_some() {
            return Vec::new();
        }
        if agent.is_protagonist() {
            let mut actions: Vec<Direction> = self.layout.open_moves(state.protagonist).collect();
            actions.push(Direction::Stop);
            return actions;
        }
        match state.ghosts.get(agent.index() - 1) {
            Some(ghost) => {
                let actions: Vec<Direction> = self.layout.open_moves(ghost.position).collect();
                if actions.is_empty() {
                    vec![Direction::Stop]
                } else {
                    actions
                }
            }
            None => Vec::new(),
        }
    }

    fn apply(&self, state: &Self::State, agent: Agent, action: Self::Action) -> Self::State {
        let mut next = state.clone();
        if agent.is_protagonist() {
            self.move_protagonist(&mut next, action);
        } else {
            self.move_ghost(&mut next, agent.index() - 1, action);
        }
        next
    }

    fn is_win(&self, state: &Self::State) -> bool {
        state.outcome == Some(Outcome::Won)
    }

    fn is_lose(&self, state: &Self::State) -> bool {
        state.outcome == Some(Outcome::Lost)
    }
}

impl Scored for Pursuit {
    fn score(&self, state: &Self::State) -> f64 {
        state.score
    }
}

/// Evaluation functions for pursuit, selectable by name.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PursuitEvaluator {
    /// The game score alone.
    #[default]
    Score,
    /// Score adjusted for the protagonist's surroundings:
    /// 1. chase the most scared ghost if any ghost is scared
    /// 2. otherwise head for the nearest capsule
    /// 3. otherwise avoid ghosts closer than two cells
    /// 4. otherwise add the distance to the nearest pellet
    Heuristic,
}

impl PursuitEvaluator {
    pub fn name(self) -> &'static str {
        match self {
            PursuitEvaluator::Score => "score",
            PursuitEvaluator::Heuristic => "heuristic",
        }
    }

    fn heuristic(state: &PursuitState) -> f64 {
        let here = state.protagonist;
        let score = state.score;

        let mut most_scared: Option<&Ghost> = None;
        for ghost in state.ghosts.iter().filter(|g| g.is_scared()) {
            if most_scared.map_or(true, |best| ghost.scared > best.scared) {
                most_scared = Some(ghost);
            }
        }
        if let Some(ghost) = most_scared {
            return score + ghost.scared as f64 / (here.manhattan(ghost.position) as f64 + 1.0);
        }

        if let Some(capsule) = state.capsules.iter().map(|&c| here.manhattan(c)).min() {
            return score - capsule as f64;
        }

        let nearest_ghost = state.ghosts.iter().map(|g| here.manhattan(g.position)).min();
        if nearest_ghost.is_some_and(|d| d < 2) {
            return DANGER;
        }

        match state.food.iter().map(|&f| here.manhattan(f)).min() {
            Some(food) if food >= 1 => score + food as f64,
            _ => score,
        }
    }
}

impl fmt::Display for PursuitEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PursuitEvaluator {
    type Err = AdversaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(PursuitEvaluator::Score),
            "heuristic" | "better" => Ok(PursuitEvaluator::Heuristic),
            _ => Err(AdversaryError::UnknownEvaluation(s.to_string())),
        }
    }
}

impl Evaluator<Pursuit> for PursuitEvaluator {
    fn evaluate(&self, game: &Pursuit, state: &PursuitState) -> f64 {
        match self {
            PursuitEvaluator::Score => game.score(state),
            PursuitEvaluator::Heuristic => Self::heuristic(state),
        }
    }
}

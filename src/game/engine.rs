use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use super::{
    action::Direction,
    config::{EngineConfig, GREEN_COUNT, INITIAL_SNAKE_LENGTH},
    error::{EngineError, EngineResult},
    placement,
    state::{Board, CollisionType, Position, Snake, Snapshot},
    vision::HeadVision,
};

/// Upper bound on whole-walk restarts when placing the initial snake
pub const MAX_SNAKE_PLACEMENT_ATTEMPTS: usize = 10_000;

/// What a single tick did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Plain move, length unchanged
    Moved,
    /// Head landed on a growth item
    AteGreen,
    /// Head landed on the shrink item
    AteRed,
    /// Head ran into a wall or the body; the game is over
    Collided(CollisionType),
    /// Shrink item eaten by a one-cell snake; the game is over
    Starved,
    /// The game was already over, nothing changed
    Halted,
}

impl StepOutcome {
    /// True for the outcomes that end the game on this tick
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepOutcome::Collided(_) | StepOutcome::Starved)
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub outcome: StepOutcome,
    /// Board as it stands after the tick
    pub snapshot: Snapshot,
}

/// The simulation engine: owns the board and the random source feeding
/// every placement decision.
pub struct SimulationEngine<R = StdRng> {
    rng: R,
    board: Option<Board>,
}

impl SimulationEngine<StdRng> {
    /// Engine seeded from `config.seed` (or entropy) with a fresh board
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Self::new(rng);
        engine.initialize(config.grid_size)?;
        Ok(engine)
    }

    /// Uninitialized engine with a deterministic random source
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Create an engine around the given random source; call
    /// [`initialize`](Self::initialize) or [`load`](Self::load) before use.
    pub fn new(rng: R) -> Self {
        Self { rng, board: None }
    }

    /// Replace the board with a freshly randomized one
    #[instrument(skip(self))]
    pub fn initialize(&mut self, grid_size: usize) -> EngineResult<Snapshot> {
        let board = new_board(&mut self.rng, grid_size)?;
        debug!(
            head = ?board.snake().head(),
            direction = %board.head_direction(),
            greens = ?board.greens(),
            red = ?board.red(),
            "board initialized"
        );
        let snapshot = board.snapshot();
        self.board = Some(board);
        Ok(snapshot)
    }

    /// Install a board built elsewhere, e.g. with [`Board::from_parts`]
    pub fn load(&mut self, board: Board) {
        self.board = Some(board);
    }

    pub fn board(&self) -> EngineResult<&Board> {
        self.board.as_ref().ok_or(EngineError::NotInitialized)
    }

    pub fn snapshot(&self) -> EngineResult<Snapshot> {
        self.board().map(Board::snapshot)
    }

    pub fn head_vision(&self) -> EngineResult<HeadVision> {
        self.board().map(HeadVision::look)
    }

    /// Request a new travel direction.
    ///
    /// Turning straight into the neck is silently refused, as is any request
    /// once the game is over. Returns whether the heading changed.
    pub fn set_direction(&mut self, direction: Direction) -> EngineResult<bool> {
        let board = self.board.as_mut().ok_or(EngineError::NotInitialized)?;
        if board.game_over || board.snake.neck_direction() == Some(direction) {
            trace!(%direction, "direction request ignored");
            return Ok(false);
        }
        board.snake.direction = direction;
        Ok(true)
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> EngineResult<StepResult> {
        let board = self.board.as_mut().ok_or(EngineError::NotInitialized)?;
        let outcome = apply_tick(board, &mut self.rng);

        trace!(?outcome, len = board.snake.len(), "tick");
        if outcome.is_fatal() {
            info!(?outcome, length = board.snake.len(), "game over");
        }

        Ok(StepResult {
            outcome,
            snapshot: board.snapshot(),
        })
    }
}

/// The transition function. Exactly one branch mutates the board.
fn apply_tick<R: Rng>(board: &mut Board, rng: &mut R) -> StepOutcome {
    if board.game_over {
        return StepOutcome::Halted;
    }

    let len = board.snake.len();
    let next = board.snake.head().moved_in_direction(board.snake.direction);

    if !board.is_in_bounds(next) {
        board.game_over = true;
        return StepOutcome::Collided(CollisionType::Wall);
    }
    if board.snake.occupies(next) {
        board.game_over = true;
        return StepOutcome::Collided(CollisionType::SelfCollision);
    }

    if let Some(idx) = board.greens.iter().position(|&g| g == next) {
        board.greens.remove(idx);
        board.snake.advance(next, len);
        if let Some(cell) = free_cell(board, rng) {
            board.greens.push(cell);
        }
        return StepOutcome::AteGreen;
    }

    if board.red == Some(next) {
        if len == 1 {
            board.game_over = true;
            return StepOutcome::Starved;
        }
        board.red = None;
        board.snake.advance(next, len - 2);
        board.red = free_cell(board, rng);
        return StepOutcome::AteRed;
    }

    board.snake.advance(next, len - 1);
    StepOutcome::Moved
}

/// Random cell free of the snake and every item, if any is left
fn free_cell<R: Rng>(board: &Board, rng: &mut R) -> Option<Position> {
    let occupied = board.occupied_cells();
    if occupied.len() >= board.cell_count() {
        return None;
    }
    placement::sample_excluding(rng, board.grid_size, &occupied)
}

fn new_board<R: Rng>(rng: &mut R, grid_size: usize) -> EngineResult<Board> {
    EngineConfig::new(grid_size).validate()?;

    let mut greens = Vec::with_capacity(GREEN_COUNT);
    for _ in 0..GREEN_COUNT {
        let green = placement::sample_excluding(rng, grid_size, &greens)
            .ok_or(EngineError::GridTooSmall { grid_size })?;
        greens.push(green);
    }
    let red = placement::sample_excluding(rng, grid_size, &greens)
        .ok_or(EngineError::GridTooSmall { grid_size })?;

    let mut items = greens.clone();
    items.push(red);
    let body = place_snake(rng, grid_size, &items)?;
    let direction = initial_heading(rng, grid_size, &body)?;

    Board::from_parts(grid_size, body, greens, Some(red), direction)
}

/// Randomized self-avoiding walk of [`INITIAL_SNAKE_LENGTH`] cells that
/// misses every item.
fn place_snake<R: Rng>(rng: &mut R, grid_size: usize, items: &[Position]) -> EngineResult<Vec<Position>> {
    for _ in 0..MAX_SNAKE_PLACEMENT_ATTEMPTS {
        let Some(body) = random_walk(rng, grid_size, INITIAL_SNAKE_LENGTH) else {
            continue;
        };
        if body.iter().all(|cell| !items.contains(cell)) {
            return Ok(body);
        }
    }
    Err(EngineError::PlacementExhausted {
        attempts: MAX_SNAKE_PLACEMENT_ATTEMPTS,
    })
}

/// `None` when the walk boxes itself in before reaching `length`
fn random_walk<R: Rng>(rng: &mut R, grid_size: usize, length: usize) -> Option<Vec<Position>> {
    let mut body = Vec::with_capacity(length);
    body.push(placement::random_cell(rng, grid_size));

    while body.len() < length {
        let end = body[body.len() - 1];
        let steps: Vec<Position> = Direction::ALL
            .iter()
            .map(|&dir| end.moved_in_direction(dir))
            .filter(|cell| cell.is_within(grid_size) && !body.contains(cell))
            .collect();
        body.push(*steps.choose(rng)?);
    }
    Some(body)
}

/// Face away from the neck; if that is blocked, try each direction once in
/// random order.
fn initial_heading<R: Rng>(rng: &mut R, grid_size: usize, body: &[Position]) -> EngineResult<Direction> {
    let snake = Snake::new(body.to_vec(), Direction::Up);
    let head = snake.head();
    let is_clear = |dir: Direction| {
        let next = head.moved_in_direction(dir);
        next.is_within(grid_size) && !snake.occupies(next)
    };

    if let Some(dir) = snake.neck_direction().map(Direction::opposite) {
        if is_clear(dir) {
            return Ok(dir);
        }
    }

    let mut candidates = Direction::ALL;
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .find(|&dir| is_clear(dir))
        .ok_or(EngineError::NoValidHeading)
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::{check_grid_size, GREEN_COUNT};
use super::error::{EngineError, EngineResult};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether the position lies on a `grid_size × grid_size` grid
    pub fn is_within(&self, grid_size: usize) -> bool {
        let inside = |c: i32| usize::try_from(c).is_ok_and(|c| c < grid_size);
        inside(self.x) && inside(self.y)
    }

    /// Direction of the unit step from `self` to `other`, if they are adjacent
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the head travels on the next tick
    pub direction: Direction,
}

impl Snake {
    pub fn new(body: Vec<Position>, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Direction from the head to the segment behind it; `None` for a lone head
    pub fn neck_direction(&self) -> Option<Direction> {
        match self.body.as_slice() {
            [head, neck, ..] => head.direction_to(*neck),
            _ => None,
        }
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, keeping `keep` of the old segments behind it
    pub fn advance(&mut self, new_head: Position, keep: usize) {
        self.body.truncate(keep);
        self.body.insert(0, new_head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true on a valid board)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete board state, owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub(crate) grid_size: usize,
    pub(crate) snake: Snake,
    pub(crate) greens: Vec<Position>,
    pub(crate) red: Option<Position>,
    pub(crate) game_over: bool,
}

impl Board {
    /// Build a running board from explicit parts, checking every invariant.
    pub fn from_parts(
        grid_size: usize,
        snake: Vec<Position>,
        greens: Vec<Position>,
        red: Option<Position>,
        head_direction: Direction,
    ) -> EngineResult<Self> {
        let board = Self {
            grid_size,
            snake: Snake::new(snake, head_direction),
            greens,
            red,
            game_over: false,
        };
        board.check_invariants()?;
        Ok(board)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn greens(&self) -> &[Position] {
        &self.greens
    }

    pub fn red(&self) -> Option<Position> {
        self.red
    }

    pub fn head_direction(&self) -> Direction {
        self.snake.direction
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Every cell currently holding the snake or an item
    pub fn occupied_cells(&self) -> Vec<Position> {
        let mut cells = self.snake.body.clone();
        cells.extend(self.greens.iter().copied());
        cells.extend(self.red);
        cells
    }

    /// Owned, read-only copy of the board for callers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            greens: self.greens.clone(),
            red: self.red,
            head_direction: self.snake.direction,
            game_over: self.game_over,
        }
    }

    /// Verify the board invariants, reporting the first violation found
    pub fn check_invariants(&self) -> EngineResult<()> {
        let invalid = |msg: String| Err(EngineError::InvalidBoard(msg));

        check_grid_size(self.grid_size)?;
        if self.snake.is_empty() {
            return invalid("snake has no segments".into());
        }
        if self.greens.len() > GREEN_COUNT {
            return invalid(format!("{} growth items on the board", self.greens.len()));
        }

        let mut seen = HashSet::new();
        for &pos in &self.snake.body {
            if !self.is_in_bounds(pos) {
                return invalid(format!("snake segment {pos:?} is off the grid"));
            }
            if !seen.insert(pos) {
                return invalid(format!("snake overlaps itself at {pos:?}"));
            }
        }
        for pair in self.snake.body.windows(2) {
            if pair[0].direction_to(pair[1]).is_none() {
                return invalid(format!("snake segments {:?} and {:?} are not adjacent", pair[0], pair[1]));
            }
        }
        for &pos in self.greens.iter().chain(self.red.iter()) {
            if !self.is_in_bounds(pos) {
                return invalid(format!("item {pos:?} is off the grid"));
            }
            if !seen.insert(pos) {
                return invalid(format!("item {pos:?} shares a cell"));
            }
        }
        Ok(())
    }
}

/// Read-only view of the board handed to presentation and agent layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Body segments, head first
    pub snake: Vec<Position>,
    pub greens: Vec<Position>,
    pub red: Option<Position>,
    pub head_direction: Direction,
    pub game_over: bool,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }
}

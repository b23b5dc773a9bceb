//! What the snake "sees": the four straight lines of cells leaving the head.

use std::fmt;

use serde::Serialize;

use super::action::Direction;
use super::state::{Board, Position};

/// Content of a single cell along a line of sight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sight {
    Empty,
    Snake,
    Green,
    Red,
    Wall,
}

impl Sight {
    pub fn symbol(self) -> char {
        match self {
            Sight::Empty => '0',
            Sight::Snake => 'S',
            Sight::Green => 'G',
            Sight::Red => 'R',
            Sight::Wall => 'W',
        }
    }
}

/// Lines of sight from the head, ordered up, right, down, left.
///
/// Each line lists the cells from the one next to the head outwards and
/// always ends with [`Sight::Wall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadVision {
    pub lines: [Vec<Sight>; 4],
}

impl HeadVision {
    pub fn look(board: &Board) -> Self {
        let head = board.snake().head();
        Self {
            lines: Direction::ALL.map(|dir| line_of_sight(board, head, dir)),
        }
    }

    /// Line of sight in one direction
    pub fn toward(&self, direction: Direction) -> &[Sight] {
        let idx = match direction {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        };
        &self.lines[idx]
    }

    /// Line rendered as symbols, nearest cell first
    pub fn line_string(&self, direction: Direction) -> String {
        self.toward(direction).iter().map(|s| s.symbol()).collect()
    }
}

fn line_of_sight(board: &Board, from: Position, direction: Direction) -> Vec<Sight> {
    let mut line = Vec::new();
    let mut pos = from.moved_in_direction(direction);
    while board.is_in_bounds(pos) {
        let sight = if board.is_occupied_by_snake(pos) {
            Sight::Snake
        } else if board.greens().contains(&pos) {
            Sight::Green
        } else if board.red() == Some(pos) {
            Sight::Red
        } else {
            Sight::Empty
        };
        line.push(sight);
        pos = pos.moved_in_direction(direction);
    }
    line.push(Sight::Wall);
    line
}

/// Cross layout: the up line above the head, left and right on the head's
/// row, the down line below.
impl fmt::Display for HeadVision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let up = self.line_string(Direction::Up);
        let left: String = self.line_string(Direction::Left).chars().rev().collect();
        let right = self.line_string(Direction::Right);
        let down = self.line_string(Direction::Down);
        let pad = " ".repeat(left.chars().count());

        for c in up.chars().rev() {
            writeln!(f, "{pad}{c}")?;
        }
        writeln!(f, "{left}H{right}")?;
        for c in down.chars() {
            writeln!(f, "{pad}{c}")?;
        }
        Ok(())
    }
}

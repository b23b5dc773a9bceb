use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Smallest grid that fits a 3-cell snake next to three distinct items
pub const MIN_GRID_SIZE: usize = 3;

/// Largest supported grid; coordinates and cell counts stay well inside `i32`
pub const MAX_GRID_SIZE: usize = 4096;

/// Length of the snake right after initialization
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Number of growth items kept on the board
pub const GREEN_COUNT: usize = 2;

/// Configuration for the simulation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Seed for the engine's random source; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Smallest playable grid
    pub fn tiny() -> Self {
        Self::new(MIN_GRID_SIZE)
    }

    pub fn validate(&self) -> EngineResult<()> {
        check_grid_size(self.grid_size)
    }
}

/// Grid side must lie in `MIN_GRID_SIZE..=MAX_GRID_SIZE`
pub(crate) fn check_grid_size(grid_size: usize) -> EngineResult<()> {
    if grid_size < MIN_GRID_SIZE {
        return Err(EngineError::GridTooSmall { grid_size });
    }
    if grid_size > MAX_GRID_SIZE {
        return Err(EngineError::GridTooLarge { grid_size });
    }
    Ok(())
}

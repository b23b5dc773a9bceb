use thiserror::Error;

/// Caller contract violations reported by the engine.
///
/// Gameplay outcomes (collisions, a full board, a refused turn) are never
/// errors; they show up in the board state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("engine used before initialize() was called")]
    NotInitialized,

    #[error("grid size {grid_size} is too small, need at least {min}", min = super::config::MIN_GRID_SIZE)]
    GridTooSmall { grid_size: usize },

    #[error("grid size {grid_size} is too large, at most {max} is supported", max = super::config::MAX_GRID_SIZE)]
    GridTooLarge { grid_size: usize },

    #[error("could not place the initial snake after {attempts} attempts")]
    PlacementExhausted { attempts: usize },

    #[error("no direction lets the initial snake move without colliding")]
    NoValidHeading,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

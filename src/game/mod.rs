//! Core snake simulation.
//!
//! Board state, random placement and the per-tick transition function, with
//! no I/O or rendering dependencies. Callers drive the engine and read
//! [`Snapshot`]s back.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod placement;
pub mod state;
pub mod vision;

// Re-export commonly used types
pub use action::Direction;
pub use config::EngineConfig;
pub use engine::{SimulationEngine, StepOutcome, StepResult};
pub use error::{EngineError, EngineResult};
pub use state::{Board, CollisionType, Position, Snake, Snapshot};
pub use vision::{HeadVision, Sight};

//! Slither - a grid snake simulation engine
//!
//! This library provides:
//! - Core simulation: board state, placement and the tick transition (game module)
//! - A headless, stdin-driven driver with step and auto pacing (modes module)
//! - Command parsing for the driver (input module)
//! - Per-game counters (metrics module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;

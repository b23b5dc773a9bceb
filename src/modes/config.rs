//! Driver-side configuration and the on-disk config document.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::EngineConfig;

/// Slowest allowed speed multiplier
pub const MIN_SPEED: f64 = 0.25;
/// Fastest allowed speed multiplier
pub const MAX_SPEED: f64 = 8.0;
/// Factor applied per slower/faster command
pub const SPEED_STEP: f64 = 1.5;

/// Pacing and output options for the headless driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Ticks per second in auto mode at speed 1.0
    pub base_tick_rate: f64,
    /// Multiplier on `base_tick_rate`, kept within [`MIN_SPEED`, `MAX_SPEED`]
    pub speed_multiplier: f64,
    /// Start in step mode (tick only on `next`) instead of auto mode
    pub step_mode: bool,
    /// Attach the head vision to every printed snapshot
    pub show_vision: bool,
    /// Stop after this many ticks of a single game
    pub max_ticks: Option<u32>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_tick_rate: 20.0,
            speed_multiplier: 1.0,
            step_mode: true,
            show_vision: false,
            max_ticks: None,
        }
    }
}

impl DriverConfig {
    /// Time between two auto-mode ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / (self.base_tick_rate * self.speed_multiplier))
    }

    pub fn slower(&mut self) {
        self.speed_multiplier = (self.speed_multiplier / SPEED_STEP).max(MIN_SPEED);
    }

    pub fn faster(&mut self) {
        self.speed_multiplier = (self.speed_multiplier * SPEED_STEP).min(MAX_SPEED);
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_tick_rate.is_finite() && self.base_tick_rate > 0.0) {
            bail!("base_tick_rate must be positive, got {}", self.base_tick_rate);
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed_multiplier) {
            bail!(
                "speed_multiplier must be within [{MIN_SPEED}, {MAX_SPEED}], got {}",
                self.speed_multiplier
            );
        }
        Ok(())
    }
}

/// Everything the `slither` binary can read from a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub driver: DriverConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate().context("Invalid engine config")?;
        self.driver.validate().context("Invalid driver config")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_pacing() {
        let config = DriverConfig::default();
        assert!(config.step_mode);
        assert_eq!(config.tick_period(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut config = DriverConfig::default();
        for _ in 0..20 {
            config.faster();
        }
        assert_eq!(config.speed_multiplier, MAX_SPEED);

        for _ in 0..20 {
            config.slower();
        }
        assert_eq!(config.speed_multiplier, MIN_SPEED);
    }

    #[test]
    fn test_validate_rejects_bad_speed() {
        let config = DriverConfig {
            speed_multiplier: 100.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"engine": {{"grid_size": 12, "seed": 5}}, "driver": {{"step_mode": false}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.engine, EngineConfig::new(12).with_seed(5));
        assert!(!config.driver.step_mode);
        assert_eq!(config.driver.base_tick_rate, 20.0);
    }

    #[test]
    fn test_load_rejects_small_grid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"engine": {{"grid_size": 2}}}}"#).unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/slither.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

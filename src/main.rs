use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use slither_engine::modes::{AppConfig, PlayMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slither")]
#[command(version, about = "Headless driver for the slither snake engine")]
struct Cli {
    /// Pacing mode at start-up (toggle later with `m`)
    #[arg(long)]
    mode: Option<Mode>,

    /// Grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for the engine's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Auto-mode speed multiplier (0.25 to 8.0)
    #[arg(long)]
    speed: Option<f64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u32>,

    /// Attach the head vision to every printed snapshot
    #[arg(long)]
    vision: bool,

    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Tick only on `next`
    Step,
    /// Tick on a timer
    Auto,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.driver.step_mode = matches!(mode, Mode::Step);
        }
        if let Some(grid_size) = self.grid_size {
            config.engine.grid_size = grid_size;
        }
        if let Some(seed) = self.seed {
            config.engine.seed = Some(seed);
        }
        if let Some(speed) = self.speed {
            config.driver.speed_multiplier = speed;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.driver.max_ticks = Some(max_ticks);
        }
        config.driver.show_vision |= self.vision;

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries one JSON snapshot per line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    tracing::debug!(?config, "starting");

    let mut play_mode = PlayMode::new(&config.engine, config.driver, std::io::stdout())?;
    play_mode.run().await?;

    Ok(())
}

//! Headless driver: reads commands from stdin, paces ticks and prints one
//! JSON line per snapshot on the given writer.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{Direction, EngineConfig, SimulationEngine, Snapshot, StepOutcome};
use crate::input::{Command, InputHandler};
use crate::metrics::{format_duration, GameMetrics};
use crate::modes::DriverConfig;

/// One line of driver output
#[derive(Debug, Serialize)]
struct Frame<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<StepOutcome>,
    snapshot: &'a Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    vision: Option<Vec<String>>,
}

pub struct PlayMode<W: Write> {
    engine: SimulationEngine,
    grid_size: usize,
    config: DriverConfig,
    metrics: GameMetrics,
    input_handler: InputHandler,
    out: W,
    paused: bool,
    should_quit: bool,
}

impl<W: Write> PlayMode<W> {
    pub fn new(engine_config: &EngineConfig, config: DriverConfig, out: W) -> Result<Self> {
        let engine =
            SimulationEngine::from_config(engine_config).context("Failed to initialize engine")?;
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(engine.snapshot()?.len());

        Ok(Self {
            engine,
            grid_size: engine_config.grid_size,
            config,
            metrics,
            input_handler: InputHandler::new(),
            out,
            paused: false,
            should_quit: false,
        })
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut input_closed = false;
        let mut tick_timer = interval(self.config.tick_period());

        self.emit(None)?;

        loop {
            let period = self.config.tick_period();

            tokio::select! {
                // Commands from stdin
                line = lines.next_line(), if !input_closed => {
                    match line.context("Failed to read command")? {
                        Some(line) => {
                            let command = self.input_handler.handle_line(&line);
                            self.handle_command(command)?;
                        }
                        None => {
                            debug!("input closed");
                            input_closed = true;
                        }
                    }
                }

                // Auto-mode tick
                _ = tick_timer.tick(), if self.auto_running() => {
                    self.tick()?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if period != self.config.tick_period() {
                tick_timer = interval(self.config.tick_period());
            }
            if input_closed && !self.auto_running() {
                self.should_quit = true;
            }
            if self.should_quit {
                break;
            }
        }

        self.metrics.update();
        info!(
            games = self.metrics.games_played,
            best_length = self.metrics.best_length,
            last_game = %self.metrics.format_time(),
            session = %format_duration(self.metrics.session_time()),
            "session finished"
        );
        Ok(())
    }

    /// Apply one command; returns `false` once the driver should stop
    pub fn handle_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Turn(direction) => {
                if !self.engine.set_direction(direction)? {
                    debug!(%direction, "turn refused");
                }
            }
            Command::Next => self.tick()?,
            Command::ToggleMode => {
                self.config.step_mode = !self.config.step_mode;
                info!(step_mode = self.config.step_mode, "mode changed");
            }
            Command::Pause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "pause toggled");
            }
            Command::Slower => {
                self.config.slower();
                info!(speed = self.config.speed_multiplier, "speed changed");
            }
            Command::Faster => {
                self.config.faster();
                info!(speed = self.config.speed_multiplier, "speed changed");
            }
            Command::Restart => self.restart()?,
            Command::Show => self.emit(None)?,
            Command::Quit => self.should_quit = true,
            Command::None => warn!("unrecognized command"),
        }
        Ok(!self.should_quit)
    }

    /// Advance the engine one tick and print the result
    pub fn tick(&mut self) -> Result<()> {
        let result = self.engine.step()?;
        self.metrics.record(result.outcome, result.snapshot.len());

        if self.config.show_vision {
            debug!("\n{}", self.engine.head_vision()?);
        }
        self.write_frame(Some(result.outcome), &result.snapshot)?;

        if let Some(limit) = self.config.max_ticks {
            if self.metrics.ticks >= limit && !result.snapshot.game_over {
                info!(limit, "tick limit reached");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    pub fn restart(&mut self) -> Result<()> {
        let snapshot = self.engine.initialize(self.grid_size)?;
        self.metrics.on_game_start(snapshot.len());
        info!("game restarted");
        self.emit(None)
    }

    /// Auto mode ticks only while unpaused and the game is still running
    fn auto_running(&self) -> bool {
        !self.config.step_mode
            && !self.paused
            && self
                .engine
                .snapshot()
                .map(|snap| !snap.game_over)
                .unwrap_or(false)
    }

    fn emit(&mut self, outcome: Option<StepOutcome>) -> Result<()> {
        let snapshot = self.engine.snapshot()?;
        self.write_frame(outcome, &snapshot)
    }

    fn write_frame(&mut self, outcome: Option<StepOutcome>, snapshot: &Snapshot) -> Result<()> {
        let vision = if self.config.show_vision {
            let vision = self.engine.head_vision()?;
            Some(
                Direction::ALL
                    .iter()
                    .map(|&dir| vision.line_string(dir))
                    .collect(),
            )
        } else {
            None
        };
        let frame = Frame {
            outcome,
            snapshot,
            vision,
        };
        serde_json::to_writer(&mut self.out, &frame).context("Failed to serialize snapshot")?;
        writeln!(self.out).context("Failed to write snapshot")?;
        self.out.flush().context("Failed to flush output")?;
        Ok(())
    }
}

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::game::StepOutcome;

/// Counters for the current game plus a few totals kept across restarts
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    #[serde(skip)]
    pub session_start: Instant,
    #[serde(skip)]
    pub start_time: Instant,
    #[serde(skip)]
    pub elapsed_time: Duration,
    pub ticks: u32,
    pub greens_eaten: u32,
    pub reds_eaten: u32,
    pub max_length: usize,
    pub best_length: usize,
    pub games_played: u32,
    /// Whether a game is in progress; the game clock only runs while it is
    #[serde(skip)]
    in_game: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            session_start: now,
            start_time: now,
            elapsed_time: Duration::ZERO,
            ticks: 0,
            greens_eaten: 0,
            reds_eaten: 0,
            max_length: 0,
            best_length: 0,
            games_played: 0,
            in_game: false,
        }
    }

    /// Refresh the game clock; frozen once the game is over
    pub fn update(&mut self) {
        if self.in_game {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    /// Wall-clock time since the metrics were created, restarts included
    pub fn session_time(&self) -> Duration {
        self.session_start.elapsed()
    }

    pub fn on_game_start(&mut self, length: usize) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.greens_eaten = 0;
        self.reds_eaten = 0;
        self.max_length = length;
        self.in_game = true;
    }

    /// Fold one tick into the counters; `length` is the snake length after it
    pub fn record(&mut self, outcome: StepOutcome, length: usize) {
        if outcome == StepOutcome::Halted {
            return;
        }
        self.ticks += 1;
        match outcome {
            StepOutcome::AteGreen => self.greens_eaten += 1,
            StepOutcome::AteRed => self.reds_eaten += 1,
            _ => {}
        }
        self.max_length = self.max_length.max(length);
        if outcome.is_fatal() {
            self.on_game_over();
        }
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.in_game = false;
        self.games_played += 1;
        if self.max_length > self.best_length {
            self.best_length = self.max_length;
        }
    }

    /// Game clock as `MM:SS`
    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

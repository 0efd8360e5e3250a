use std::time::{Duration, Instant};

/// Score display model: what the header shows next to the board
pub struct GameMetrics {
    /// Score of the current game, pushed by the mode on every change
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    /// Time spent running, excluding pauses
    pub elapsed_time: Duration,
    last_update: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            games_played: 0,
            elapsed_time: Duration::ZERO,
            last_update: None,
        }
    }

    /// Advance the clock; only time spent while `running` counts
    pub fn update(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            if let Some(last) = self.last_update {
                self.elapsed_time += now - last;
            }
            self.last_update = Some(now);
        } else {
            self.last_update = None;
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn on_game_start(&mut self) {
        self.score = 0;
        self.elapsed_time = Duration::ZERO;
        self.last_update = None;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.score = final_score;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

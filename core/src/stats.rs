use serde::{Deserialize, Serialize};

/// Running win/loss counters, updated once per finished game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub attempts: u32,
    pub wins: u32,
    pub losses: u32,
}

impl Statistics {
    pub fn record(&mut self, won: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if won {
            self.wins = self.wins.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }
    }

    /// A record is consistent when every attempt ended in exactly one win or loss.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.attempts) == u64::from(self.wins) + u64::from(self.losses)
    }

    /// Wins over attempts as a whole percentage, rounding halves up.
    pub fn win_rate_percent(&self) -> u32 {
        if self.attempts == 0 {
            return 0;
        }
        let wins = u64::from(self.wins);
        let attempts = u64::from(self.attempts);
        ((wins * 200 + attempts) / (attempts * 2)) as u32
    }
}

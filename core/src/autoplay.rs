use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Timings for animated placements and auto-play pacing.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoPlayConfig {
    /// Pause between two automatic placements.
    pub step_delay: Duration,
    /// What `step_delay` drops to after a speed-up.
    pub min_step_delay: Duration,
    /// Tile travelling from the tray to its cell.
    pub fly_duration: Duration,
    /// Cell flipping over; the letter appears halfway through.
    pub flip_duration: Duration,
    /// Factor applied to the animation speed by a speed-up.
    pub speed_up_multiplier: u32,
}

impl Default for AutoPlayConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(200),
            min_step_delay: Duration::from_millis(10),
            fly_duration: Duration::from_millis(400),
            flip_duration: Duration::from_millis(400),
            speed_up_multiplier: 4,
        }
    }
}

/// State of one auto-play run. Dropped when the run stops, so every run starts from the configured
/// defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoPlay {
    next_index: CellIndex,
    step_delay: Duration,
    speed_multiplier: u32,
    sped_up: bool,
}

impl AutoPlay {
    pub fn new(config: &AutoPlayConfig) -> Self {
        Self {
            next_index: 0,
            step_delay: config.step_delay,
            speed_multiplier: 1,
            sped_up: false,
        }
    }

    /// Cells before this index are not considered for the next placement.
    pub fn next_index(&self) -> CellIndex {
        self.next_index
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn speed_multiplier(&self) -> u32 {
        self.speed_multiplier
    }

    pub fn is_sped_up(&self) -> bool {
        self.sped_up
    }

    /// One-shot: returns `false` and changes nothing if this run was already sped up.
    pub fn speed_up(&mut self, config: &AutoPlayConfig) -> bool {
        if self.sped_up {
            return false;
        }
        self.step_delay = self.step_delay.min(config.min_step_delay);
        self.speed_multiplier = self
            .speed_multiplier
            .saturating_mul(config.speed_up_multiplier.max(1));
        self.sped_up = true;
        true
    }

    pub fn fly_duration(&self, config: &AutoPlayConfig) -> Duration {
        config.fly_duration / self.speed_multiplier
    }

    pub fn flip_half_duration(&self, config: &AutoPlayConfig) -> Duration {
        config.flip_duration / self.speed_multiplier.saturating_mul(2)
    }

    pub(crate) fn placed_at(&mut self, index: CellIndex) {
        self.next_index = index.saturating_add(1);
    }
}

#![no_std]

extern crate alloc;

use bitflags::bitflags;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

pub use autoplay::*;
pub use board::*;
pub use engine::*;
pub use error::*;
pub use scanner::*;
pub use stats::*;
pub use supply::*;
pub use tile::*;
pub use types::*;

mod autoplay;
mod board;
mod engine;
mod error;
mod scanner;
mod stats;
mod supply;
mod tile;
mod types;

/// Letters that end the game when they line up.
pub type TargetWord = SmallVec<[Letter; 4]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub target_word: TargetWord,
    pub auto_play: AutoPlayConfig,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 5;
    pub const MAX_SIDE: Coord = 20;

    pub fn new(size: Coord2, target_word: &str) -> Result<Self> {
        let (rows, cols) = size;
        if !(1..=Self::MAX_SIDE).contains(&rows) || !(1..=Self::MAX_SIDE).contains(&cols) {
            return Err(GameError::InvalidConfig);
        }
        if mult(rows, cols) < 2 {
            return Err(GameError::InvalidConfig);
        }

        let target_word = target_word
            .chars()
            .map(Letter::try_from)
            .collect::<Result<TargetWord>>()?;
        if target_word.is_empty() {
            return Err(GameError::InvalidConfig);
        }

        Ok(Self {
            size,
            target_word,
            auto_play: AutoPlayConfig::default(),
        })
    }

    pub fn square(side: Coord) -> Result<Self> {
        Self::new((side, side), "FOX")
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: (Self::DEFAULT_SIZE, Self::DEFAULT_SIZE),
            target_word: smallvec![Letter::F, Letter::O, Letter::X],
            auto_play: AutoPlayConfig::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    Placed,
    Won,
    Lost,
}

impl PlacementOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What happened during one step of timed work, and when the next step is due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Set once a placement has been evaluated.
    pub outcome: Option<PlacementOutcome>,
    /// Call [`GameSession::advance`] again after this long; `None` means nothing is scheduled.
    pub wake_after: Option<Duration>,
}

impl Advance {
    pub const IDLE: Self = Self {
        outcome: None,
        wake_after: None,
    };

    pub const fn wake(after: Duration) -> Self {
        Self {
            outcome: None,
            wake_after: Some(after),
        }
    }

    pub const fn is_idle(&self) -> bool {
        self.wake_after.is_none()
    }
}

bitflags! {
    /// Which controls the UI should currently offer.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Controls: u8 {
        const PLACE     = 1;
        const AUTO_PLAY = 1 << 1;
        const SPEED_UP  = 1 << 2;
        const RESTART   = 1 << 3;
    }
}

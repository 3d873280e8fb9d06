use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// A letter that can be drawn onto a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    F,
    O,
    X,
}

impl Letter {
    /// The alphabet tiles are drawn from, uniformly.
    pub const ALL: [Letter; 3] = [Letter::F, Letter::O, Letter::X];

    pub const fn as_char(self) -> char {
        use Letter::*;
        match self {
            F => 'F',
            O => 'O',
            X => 'X',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        use Letter::*;
        match c {
            'F' => Some(F),
            'O' => Some(O),
            'X' => Some(X),
            _ => None,
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self> {
        Self::from_char(c).ok_or(GameError::InvalidLetter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Content of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(Letter),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn letter(self) -> Option<Letter> {
        match self {
            Self::Empty => None,
            Self::Filled(letter) => Some(letter),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Stable handle of a tile within one supply, used by the UI to say which tile was dragged or clicked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: Letter,
}

pub trait SupplyGenerator {
    fn generate(self, count: CellCount) -> TileSupply;
}

/// Pending tiles in draw order. Every tile leaves the supply exactly once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileSupply {
    tiles: VecDeque<Tile>,
}

impl TileSupply {
    pub fn from_letters(letters: impl IntoIterator<Item = Letter>) -> Self {
        let tiles = letters
            .into_iter()
            .zip(0..)
            .map(|(letter, id)| Tile {
                id: TileId(id),
                letter,
            })
            .collect();
        Self { tiles }
    }

    /// Parses a string of `F`/`O`/`X` characters, one tile each.
    pub fn parse(letters: &str) -> Result<Self> {
        let letters = letters
            .chars()
            .map(Letter::try_from)
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        Ok(Self::from_letters(letters))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    pub fn get(&self, id: TileId) -> Result<Tile> {
        self.tiles
            .iter()
            .find(|tile| tile.id == id)
            .copied()
            .ok_or(GameError::UnknownTile)
    }

    pub fn first(&self) -> Result<Tile> {
        self.tiles
            .front()
            .copied()
            .ok_or(GameError::TileSupplyExhausted)
    }

    pub fn take(&mut self, id: TileId) -> Result<Tile> {
        let position = self
            .tiles
            .iter()
            .position(|tile| tile.id == id)
            .ok_or(GameError::UnknownTile)?;
        self.tiles.remove(position).ok_or(GameError::UnknownTile)
    }

    pub fn take_first(&mut self) -> Result<Tile> {
        self.tiles
            .pop_front()
            .ok_or(GameError::TileSupplyExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_keep_draw_order_and_ids() {
        let supply = TileSupply::parse("FOXF").unwrap();

        let letters: alloc::string::String =
            supply.iter().map(|tile| tile.letter.as_char()).collect();
        assert_eq!(letters, "FOXF");
        assert_eq!(supply.get(TileId(2)).unwrap().letter, Letter::X);
    }

    #[test]
    fn each_tile_is_consumed_once() {
        let mut supply = TileSupply::parse("FOX").unwrap();

        assert_eq!(supply.take(TileId(1)).unwrap().letter, Letter::O);
        assert_eq!(supply.take(TileId(1)).unwrap_err(), GameError::UnknownTile);
        assert_eq!(supply.take_first().unwrap().id, TileId(0));
        assert_eq!(supply.take_first().unwrap().id, TileId(2));
        assert_eq!(supply.take_first().unwrap_err(), GameError::TileSupplyExhausted);
        assert!(supply.is_empty());
    }

    #[test]
    fn parse_rejects_other_letters() {
        assert_eq!(TileSupply::parse("FOY").unwrap_err(), GameError::InvalidLetter);
    }
}

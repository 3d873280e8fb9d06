use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell already holds a letter")]
    CellOccupied,
    #[error("Cell index out of range")]
    IndexOutOfRange,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyEnded,
    #[error("No tiles left to place")]
    TileSupplyExhausted,
    #[error("Tile is not part of the current supply")]
    UnknownTile,
    #[error("A placement is still being animated")]
    PlacementInFlight,
    #[error("Not allowed while auto-play is running")]
    AutoPlayRunning,
    #[error("Not a tile letter")]
    InvalidLetter,
    #[error("Invalid game configuration")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;

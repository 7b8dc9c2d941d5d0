use thiserror::Error;

use crate::game::board::tile::TileKey;

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed word list entry on line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("duplicate word id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("two tiles placed on cell ({row}, {col})")]
    DuplicatePosition { row: i32, col: i32 },

    #[error("no tile with key {0}")]
    UnknownTile(TileKey),

    #[error("tile {0} is already matched or awaiting removal")]
    TileUnavailable(TileKey),

    #[error("tiles are not awaiting removal")]
    NotPending,

    #[error("a match is still awaiting removal")]
    MatchPending,

    #[error("requested {requested} words but only {available} are available")]
    NotEnoughWords { requested: usize, available: usize },

    #[error("{tiles} tiles do not fit on a board of {cells} cells")]
    BoardTooSmall { tiles: usize, cells: usize },

    #[error(transparent)]
    WordSource(#[from] WordSourceError),
}

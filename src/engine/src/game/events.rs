use crate::game::board::path::Path;
use crate::game::board::tile::TileKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    /// Different ids, or two tiles of the same role.
    Mismatch,
    /// A valid pair with no route between them.
    Blocked,
}

/// Notifications for progress tracking. Emitted by the board in the order they happen.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    MatchSucceeded {
        first: TileKey,
        second: TileKey,
        path: Path,
    },
    MatchFailed {
        first: TileKey,
        second: TileKey,
        reason: FailReason,
    },
    HintUsed {
        first: TileKey,
        second: TileKey,
    },
    ShuffleUsed {
        automatic: bool,
    },
}

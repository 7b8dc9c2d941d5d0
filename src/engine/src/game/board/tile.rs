use core::fmt;

use crate::game::grid::Position;

/// Index of a tile in its board's tile list. Stable for the lifetime of the board.
pub type TileKey = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Word,
    Meaning,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Word => write!(f, "word"),
            Role::Meaning => write!(f, "meaning"),
        }
    }
}

/// One half of a word/meaning pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub position: Position,
    pub matched: bool,
}

impl Tile {
    pub fn new(id: impl Into<String>, role: Role, text: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            role,
            text: text.into(),
            position,
            matched: false,
        }
    }

    /// Same pairing key, different role.
    pub fn pairs_with(&self, other: &Tile) -> bool {
        self.id == other.id && self.role != other.role
    }
}

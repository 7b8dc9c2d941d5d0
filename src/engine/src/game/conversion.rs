use crate::game::board::path::Path;
use crate::game::board::tile::{Role, Tile};
use crate::game::board::Board;
use crate::game::grid::Position;
use crate::game::layout::Layout;
use crate::game::scoring::Scorer;
use serde::{Deserialize, Serialize};

// Plain data handed to whatever draws the board.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializablePosition {
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableTile {
    pub key: usize,
    pub id: String,
    pub role: String,
    pub text: String,
    pub position: SerializablePosition,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializablePath {
    /// Board-space waypoints; the border shows up as negative or out-of-range indices.
    pub points: Vec<SerializablePosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<SerializableTile>,
    pub selected: Option<usize>,
    pub last_path: Option<SerializablePath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub best_combo: u32,
    pub matches: u32,
    pub mistakes: u32,
    pub hints_remaining: u32,
    pub shuffles_remaining: u32,
}

impl From<Position> for SerializablePosition {
    fn from(position: Position) -> Self {
        Self {
            row: position.row,
            col: position.col,
        }
    }
}

impl From<&SerializablePosition> for Position {
    fn from(position: &SerializablePosition) -> Self {
        Position::new(position.row, position.col)
    }
}

impl From<(usize, &Tile)> for SerializableTile {
    fn from((key, tile): (usize, &Tile)) -> Self {
        Self {
            key,
            id: tile.id.clone(),
            role: tile.role.to_string(),
            text: tile.text.clone(),
            position: tile.position.into(),
            matched: tile.matched,
        }
    }
}

impl TryFrom<&SerializableTile> for Tile {
    type Error = String;

    fn try_from(tile: &SerializableTile) -> Result<Self, Self::Error> {
        let role = match tile.role.as_str() {
            "word" => Role::Word,
            "meaning" => Role::Meaning,
            other => return Err(format!("unknown tile role: {}", other)),
        };
        Ok(Tile {
            id: tile.id.clone(),
            role,
            text: tile.text.clone(),
            position: (&tile.position).into(),
            matched: tile.matched,
        })
    }
}

impl From<&Path> for SerializablePath {
    fn from(path: &Path) -> Self {
        Self {
            points: path.board_points().into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Layout> for SerializableLayout {
    fn from(layout: Layout) -> Self {
        Self {
            rows: layout.rows,
            cols: layout.cols,
            cell_size: layout.cell_size,
        }
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            rows: board.rows(),
            cols: board.cols(),
            tiles: board.tiles().iter().enumerate().map(Into::into).collect(),
            selected: board.selected(),
            last_path: board.last_path().map(Into::into),
        }
    }
}

impl From<&Scorer> for ScoreSummary {
    fn from(scorer: &Scorer) -> Self {
        Self {
            score: scorer.score(),
            best_combo: scorer.best_combo(),
            matches: scorer.matches(),
            mistakes: scorer.mistakes(),
            hints_remaining: scorer.hints_remaining(),
            shuffles_remaining: scorer.shuffles_remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::create_test_board;

    #[test]
    fn test_snapshot_includes_last_path_in_board_space() {
        let mut board = create_test_board(3, 3, &[("a", (0, 0), (0, 2)), ("b", (0, 1), (2, 1))]);
        assert!(board.attempt_match(0, 1).unwrap().is_success());

        let snapshot = BoardSnapshot::from(&board);
        assert_eq!(snapshot.tiles.len(), 4);
        assert_eq!(snapshot.tiles[2].role, "word");

        let path = snapshot.last_path.unwrap();
        assert_eq!(path.points.first(), Some(&SerializablePosition { row: 0, col: 0 }));
        assert_eq!(path.points.last(), Some(&SerializablePosition { row: 0, col: 2 }));
        assert!(path.points.iter().any(|p| p.row < 0));
    }

    #[test]
    fn test_tile_json_round_trip() {
        let board = create_test_board(2, 2, &[("a", (0, 0), (1, 1))]);
        let snapshot = BoardSnapshot::from(&board);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: BoardSnapshot = serde_json::from_str(&json).unwrap();
        let tile = Tile::try_from(&parsed.tiles[1]).unwrap();
        assert_eq!(&tile, board.tile(1).unwrap());
    }
}

#[cfg(test)]
pub mod test_utils {
    use crate::game::board::path::Path;
    use crate::game::board::tile::{Role, Tile};
    use crate::game::board::Board;
    use crate::game::grid::{GridModel, Position};
    use crate::word_source::WordEntry;

    /// Board-space positions from `(row, col)` tuples.
    pub fn positions(cells: &[(i32, i32)]) -> Vec<Position> {
        cells.iter().map(|&(row, col)| Position::new(row, col)).collect()
    }

    /// Grid from one string per board row, `#` for blocked and `.` for free.
    pub fn grid_from_rows(rows: &[&str]) -> GridModel {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let occupied = rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|(_, c)| *c == '#')
                .map(move |(col, _)| Position::new(row as i32, col as i32))
        });
        GridModel::new(height, width, occupied)
    }

    /// Checks the connector invariants: right endpoints, axis-aligned segments,
    /// no repeated points, free corners and free cells along every segment.
    pub fn assert_valid_path(grid: &GridModel, path: &Path, from: Position, to: Position) {
        assert!((2..=4).contains(&path.points().len()), "bad length: {:?}", path);
        assert_eq!(path.start().to_board(), from);
        assert_eq!(path.end().to_board(), to);

        for corner in path.corners() {
            assert!(grid.is_free(*corner), "corner {} is blocked", corner);
        }
        for segment in path.points().windows(2) {
            let (a, b) = (segment[0], segment[1]);
            assert_ne!(a, b, "repeated point in {:?}", path);
            assert!(
                (a.row == b.row) ^ (a.col == b.col),
                "segment {} -> {} is not axis aligned",
                a,
                b
            );
            let cells: Vec<_> = if a.row == b.row {
                (a.col.min(b.col) + 1..a.col.max(b.col))
                    .map(|col| crate::game::grid::GridPoint::new(a.row, col))
                    .collect()
            } else {
                (a.row.min(b.row) + 1..a.row.max(b.row))
                    .map(|row| crate::game::grid::GridPoint::new(row, a.col))
                    .collect()
            };
            for cell in cells {
                assert!(grid.is_free(cell), "cell {} on {:?} is blocked", cell, path);
            }
        }
    }

    /// Word/meaning tile pair for `id` at the given cells.
    pub fn tile_pair(id: &str, word: (i32, i32), meaning: (i32, i32)) -> [Tile; 2] {
        [
            Tile::new(id, Role::Word, format!("{}-word", id), Position::new(word.0, word.1)),
            Tile::new(id, Role::Meaning, format!("{}-meaning", id), Position::new(meaning.0, meaning.1)),
        ]
    }

    /// Board built from explicit pairs: `(id, word cell, meaning cell)`.
    pub fn create_test_board(rows: usize, cols: usize, pairs: &[(&str, (i32, i32), (i32, i32))]) -> Board {
        let tiles = pairs
            .iter()
            .flat_map(|(id, word, meaning)| tile_pair(id, *word, *meaning))
            .collect();
        Board::new(rows, cols, tiles).unwrap()
    }

    pub fn create_test_entries(count: usize) -> Vec<WordEntry> {
        let words = [
            ("apple", "manzana"),
            ("dog", "perro"),
            ("cat", "gato"),
            ("house", "casa"),
            ("water", "agua"),
            ("book", "libro"),
            ("tree", "arbol"),
            ("sun", "sol"),
            ("moon", "luna"),
            ("bread", "pan"),
            ("milk", "leche"),
            ("door", "puerta"),
            ("window", "ventana"),
            ("river", "rio"),
            ("city", "ciudad"),
            ("road", "camino"),
        ];
        (0..count)
            .map(|i| {
                let (word, meaning) = words[i % words.len()];
                WordEntry {
                    id: format!("w{}", i),
                    word: word.to_string(),
                    meaning: meaning.to_string(),
                }
            })
            .collect()
    }
}

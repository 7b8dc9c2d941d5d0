use core::fmt;

use tracing::warn;

use crate::error::GameError;

/// Width of the free margin around the visible board. Paths may route through it.
pub const BORDER_SIZE: usize = 2;

/// A cell in board space. Rows and columns are signed because path waypoints
/// translated back from the padded grid may lie in the border, left of or above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

/// A cell in padded space, i.e. an index into the occupancy matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift into padded space. `None` if the cell lies beyond the border margin.
    pub fn to_padded(self) -> Option<GridPoint> {
        let row = usize::try_from(self.row.checked_add(BORDER_SIZE as i32)?).ok()?;
        let col = usize::try_from(self.col.checked_add(BORDER_SIZE as i32)?).ok()?;
        Some(GridPoint { row, col })
    }
}

impl GridPoint {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn to_board(self) -> Position {
        Position {
            row: self.row as i32 - BORDER_SIZE as i32,
            col: self.col as i32 - BORDER_SIZE as i32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Free,
    Blocked,
}

/// Occupancy matrix over the board plus its border. Dimensions are fixed at
/// construction; changing the board size means building a new model.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    cells: Vec<Occupancy>,
}

impl GridModel {
    pub fn new<I>(rows: usize, cols: usize, occupied: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let padded_rows = rows + 2 * BORDER_SIZE;
        let padded_cols = cols + 2 * BORDER_SIZE;
        let mut grid = Self {
            rows,
            cols,
            cells: vec![Occupancy::Free; padded_rows * padded_cols],
        };
        for position in occupied {
            if grid.set_occupancy(position, true).is_err() {
                warn!("Ignoring occupied cell {} outside {}x{} board", position, rows, cols);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn padded_rows(&self) -> usize {
        self.rows + 2 * BORDER_SIZE
    }

    pub fn padded_cols(&self) -> usize {
        self.cols + 2 * BORDER_SIZE
    }

    /// Whether `position` lies on the visible board.
    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as usize) < self.rows
            && (position.col as usize) < self.cols
    }

    pub fn set_occupancy(&mut self, position: Position, blocked: bool) -> Result<(), GameError> {
        if !self.contains(position) {
            return Err(GameError::OutOfBounds {
                row: position.row,
                col: position.col,
            });
        }
        let point = position.to_padded().ok_or(GameError::OutOfBounds {
            row: position.row,
            col: position.col,
        })?;
        let idx = self.index(point);
        self.cells[idx] = if blocked {
            Occupancy::Blocked
        } else {
            Occupancy::Free
        };
        Ok(())
    }

    /// State of a padded cell, `None` outside the matrix.
    pub fn occupancy(&self, point: GridPoint) -> Option<Occupancy> {
        if point.row >= self.padded_rows() || point.col >= self.padded_cols() {
            return None;
        }
        Some(self.cells[self.index(point)])
    }

    /// Cells outside the padded matrix are never free.
    pub fn is_free(&self, point: GridPoint) -> bool {
        self.occupancy(point) == Some(Occupancy::Free)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        position
            .to_padded()
            .and_then(|p| self.occupancy(p))
            .map_or(false, |o| o == Occupancy::Blocked)
    }

    #[cfg(test)]
    pub(crate) fn set_padded(&mut self, point: GridPoint, occupancy: Occupancy) {
        let idx = self.index(point);
        self.cells[idx] = occupancy;
    }

    fn index(&self, point: GridPoint) -> usize {
        point.row * self.padded_cols() + point.col
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.padded_rows() {
            for col in 0..self.padded_cols() {
                match self.cells[self.index(GridPoint { row, col })] {
                    Occupancy::Free => write!(f, ".")?,
                    Occupancy::Blocked => write!(f, "#")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_marks_occupied_cells() {
        let grid = GridModel::new(3, 4, vec![Position::new(0, 0), Position::new(2, 3)]);

        assert_eq!(grid.padded_rows(), 3 + 2 * BORDER_SIZE);
        assert_eq!(grid.padded_cols(), 4 + 2 * BORDER_SIZE);
        assert!(grid.is_blocked(Position::new(0, 0)));
        assert!(grid.is_blocked(Position::new(2, 3)));
        assert!(!grid.is_blocked(Position::new(1, 1)));
    }

    #[test]
    fn test_border_is_always_free() {
        let all: Vec<Position> = (0..3)
            .flat_map(|r| (0..3).map(move |c| Position::new(r, c)))
            .collect();
        let grid = GridModel::new(3, 3, all);

        for row in 0..grid.padded_rows() {
            for col in 0..grid.padded_cols() {
                let point = GridPoint::new(row, col);
                let on_board = grid.contains(point.to_board());
                assert_eq!(grid.is_free(point), !on_board, "cell {}", point);
            }
        }
    }

    #[test]
    fn test_set_occupancy_is_idempotent() {
        let mut grid = GridModel::new(4, 4, vec![]);
        grid.set_occupancy(Position::new(1, 2), true).unwrap();
        let once = grid.clone();
        grid.set_occupancy(Position::new(1, 2), true).unwrap();
        assert_eq!(grid, once);

        grid.set_occupancy(Position::new(1, 2), false).unwrap();
        let freed = grid.clone();
        grid.set_occupancy(Position::new(1, 2), false).unwrap();
        assert_eq!(grid, freed);
        assert!(!grid.is_blocked(Position::new(1, 2)));
    }

    #[test]
    fn test_set_occupancy_out_of_bounds() {
        let mut grid = GridModel::new(2, 2, vec![]);
        let before = grid.clone();

        for position in [Position::new(-1, 0), Position::new(0, 2), Position::new(2, 0)] {
            let result = grid.set_occupancy(position, true);
            assert!(matches!(result, Err(GameError::OutOfBounds { .. })));
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_cells_outside_matrix_are_not_free() {
        let grid = GridModel::new(2, 2, vec![]);
        assert!(!grid.is_free(GridPoint::new(grid.padded_rows(), 0)));
        assert!(!grid.is_free(GridPoint::new(0, grid.padded_cols())));
        assert_eq!(grid.occupancy(GridPoint::new(99, 99)), None);
    }

    #[test]
    fn test_coordinate_translation() {
        let position = Position::new(0, 3);
        let point = position.to_padded().unwrap();
        assert_eq!(point, GridPoint::new(BORDER_SIZE, 3 + BORDER_SIZE));
        assert_eq!(point.to_board(), position);

        assert_eq!(GridPoint::new(0, 0).to_board(), Position::new(-2, -2));
        assert_eq!(Position::new(-3, 0).to_padded(), None);
    }

    #[test]
    fn test_extreme_coordinates_are_off_board() {
        let mut grid = GridModel::new(3, 3, vec![]);

        assert_eq!(Position::new(i32::MAX, 0).to_padded(), None);
        assert_eq!(Position::new(0, i32::MAX).to_padded(), None);
        assert!(!grid.is_blocked(Position::new(i32::MAX, 0)));
        assert!(!grid.is_blocked(Position::new(i32::MIN, i32::MAX)));
        assert!(matches!(
            grid.set_occupancy(Position::new(i32::MAX, i32::MAX), true),
            Err(GameError::OutOfBounds { .. })
        ));
    }
}

use crate::game::grid::{GridPoint, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    Straight,
    OneCorner,
    TwoCorner,
}

/// Connector between two tiles as padded-space waypoints: 2, 3 or 4 points,
/// each consecutive pair sharing a row or a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<GridPoint>,
}

impl Path {
    /// Only the path finder builds connectors, always with 2 to 4 points.
    pub(crate) fn new(points: Vec<GridPoint>) -> Self {
        debug_assert!(
            (2..=4).contains(&points.len()),
            "path needs 2 to 4 points, got {}",
            points.len()
        );
        Self { points }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn kind(&self) -> PathKind {
        match self.points.len() {
            2 => PathKind::Straight,
            3 => PathKind::OneCorner,
            _ => PathKind::TwoCorner,
        }
    }

    pub fn start(&self) -> GridPoint {
        self.points[0]
    }

    pub fn end(&self) -> GridPoint {
        self.points[self.points.len() - 1]
    }

    pub fn corners(&self) -> &[GridPoint] {
        &self.points[1..self.points.len() - 1]
    }

    /// Waypoints shifted back to board space. Points in the border come out negative
    /// or past the last row/column.
    pub fn board_points(&self) -> Vec<Position> {
        self.points.iter().map(|p| p.to_board()).collect()
    }

    pub fn reversed(&self) -> Path {
        Path {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Number of cells walked from start to end.
    pub fn length(&self) -> usize {
        self.points
            .windows(2)
            .map(|w| w[0].row.abs_diff(w[1].row) + w[0].col.abs_diff(w[1].col))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_corners() {
        let path = Path::new(vec![
            GridPoint::new(2, 2),
            GridPoint::new(5, 2),
            GridPoint::new(5, 4),
            GridPoint::new(4, 4),
        ]);
        assert_eq!(path.kind(), PathKind::TwoCorner);
        assert_eq!(path.corners(), &[GridPoint::new(5, 2), GridPoint::new(5, 4)]);
        assert_eq!(path.length(), 3 + 2 + 1);
        assert_eq!(
            path.board_points(),
            vec![
                Position::new(0, 0),
                Position::new(3, 0),
                Position::new(3, 2),
                Position::new(2, 2),
            ]
        );
        assert_eq!(path.reversed().start(), GridPoint::new(4, 4));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "path needs 2 to 4 points")]
    fn test_new_rejects_single_point() {
        Path::new(vec![GridPoint::new(2, 2)]);
    }
}

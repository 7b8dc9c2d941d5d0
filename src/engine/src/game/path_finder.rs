//! Orthogonal connectivity search over the padded occupancy grid.
//!
//! Two tiles connect when a route made of at most three straight segments (two turns)
//! joins them through free cells. Routes are tried from simplest to most complex and the
//! first one found is returned, so the drawn connector is always the simplest available.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::game::board::path::Path;
use crate::game::board::tile::{Tile, TileKey};
use crate::game::grid::{GridModel, GridPoint, Position};

/// A pair of tiles that can be matched right now, with the connector joining them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectablePair {
    pub first: TileKey,
    pub second: TileKey,
    pub path: Path,
}

pub struct PathFinder<'a> {
    grid: &'a GridModel,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a GridModel) -> Self {
        Self { grid }
    }

    /// Connector between two board cells, or `None` if no route with at most two turns
    /// exists. Endpoints are never checked for occupancy. Cells off the board yield `None`.
    pub fn find_path(&self, from: Position, to: Position) -> Option<Path> {
        if !self.grid.contains(from) || !self.grid.contains(to) {
            warn!("Path requested between {} and {} outside the board", from, to);
            return None;
        }
        if from == to {
            return None;
        }
        let a = from.to_padded()?;
        let b = to.to_padded()?;

        let path = self
            .straight(a, b)
            .or_else(|| self.one_corner(a, b))
            .or_else(|| self.two_corners(a, b));

        match &path {
            Some(p) => debug!("Connected {} -> {} with {:?} path", from, to, p.kind()),
            None => debug!("No path between {} and {}", from, to),
        }
        path
    }

    /// Randomly ordered scan for any matchable pair among `tiles`. Which pair is returned
    /// varies between calls, whether one is returned does not.
    pub fn find_connectable_pair<'t, I, R>(&self, tiles: I, rng: &mut R) -> Option<ConnectablePair>
    where
        I: IntoIterator<Item = (TileKey, &'t Tile)>,
        R: Rng + ?Sized,
    {
        let mut candidates: Vec<(TileKey, &Tile)> = tiles.into_iter().collect();
        candidates.shuffle(rng);
        self.scan_pairs(&candidates)
    }

    pub fn has_any_possible_match<'t, I>(&self, tiles: I) -> bool
    where
        I: IntoIterator<Item = (TileKey, &'t Tile)>,
    {
        let candidates: Vec<(TileKey, &Tile)> = tiles.into_iter().collect();
        self.scan_pairs(&candidates).is_some()
    }

    fn scan_pairs(&self, candidates: &[(TileKey, &Tile)]) -> Option<ConnectablePair> {
        for (i, (first_key, first)) in candidates.iter().enumerate() {
            for (second_key, second) in &candidates[i + 1..] {
                if !first.pairs_with(second) {
                    continue;
                }
                if let Some(path) = self.find_path(first.position, second.position) {
                    return Some(ConnectablePair {
                        first: *first_key,
                        second: *second_key,
                        path,
                    });
                }
            }
        }
        None
    }

    fn straight(&self, a: GridPoint, b: GridPoint) -> Option<Path> {
        if self.line_is_clear(a, b) {
            Some(Path::new(vec![a, b]))
        } else {
            None
        }
    }

    fn one_corner(&self, a: GridPoint, b: GridPoint) -> Option<Path> {
        let candidates = [GridPoint::new(a.row, b.col), GridPoint::new(b.row, a.col)];
        candidates
            .into_iter()
            .filter(|corner| *corner != a && *corner != b)
            .find(|corner| {
                self.grid.is_free(*corner)
                    && self.line_is_clear(a, *corner)
                    && self.line_is_clear(*corner, b)
            })
            .map(|corner| Path::new(vec![a, corner, b]))
    }

    fn two_corners(&self, a: GridPoint, b: GridPoint) -> Option<Path> {
        // Bridge rows only make sense when the endpoints sit in different columns,
        // otherwise both corners coincide. Same for bridge columns.
        if a.col != b.col {
            for row in 0..self.grid.padded_rows() {
                if row == a.row || row == b.row {
                    continue;
                }
                let first = GridPoint::new(row, a.col);
                let second = GridPoint::new(row, b.col);
                if self.bridge_is_clear(a, first, second, b) {
                    return Some(Path::new(vec![a, first, second, b]));
                }
            }
        }
        if a.row != b.row {
            for col in 0..self.grid.padded_cols() {
                if col == a.col || col == b.col {
                    continue;
                }
                let first = GridPoint::new(a.row, col);
                let second = GridPoint::new(b.row, col);
                if self.bridge_is_clear(a, first, second, b) {
                    return Some(Path::new(vec![a, first, second, b]));
                }
            }
        }
        None
    }

    fn bridge_is_clear(&self, a: GridPoint, first: GridPoint, second: GridPoint, b: GridPoint) -> bool {
        self.grid.is_free(first)
            && self.grid.is_free(second)
            && self.line_is_clear(a, first)
            && self.line_is_clear(first, second)
            && self.line_is_clear(second, b)
    }

    /// Every cell strictly between `from` and `to` is free. False unless the two
    /// points share a row or a column.
    fn line_is_clear(&self, from: GridPoint, to: GridPoint) -> bool {
        if from.row == to.row {
            let (lo, hi) = (from.col.min(to.col), from.col.max(to.col));
            (lo + 1..hi).all(|col| self.grid.is_free(GridPoint::new(from.row, col)))
        } else if from.col == to.col {
            let (lo, hi) = (from.row.min(to.row), from.row.max(to.row));
            (lo + 1..hi).all(|row| self.grid.is_free(GridPoint::new(row, from.col)))
        } else {
            false
        }
    }
}

use core::fmt;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::game::events::{FailReason, GameEvent};
use crate::game::grid::{GridModel, Position};
use crate::game::path_finder::{ConnectablePair, PathFinder};
use crate::word_source::WordEntry;

pub mod path;
pub mod tile;

use path::Path;
use tile::{Role, Tile, TileKey};

const DEFAULT_MAX_AUTO_SHUFFLES: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Success(Path),
    Mismatch,
    /// The tiles form a pair but nothing connects them.
    Blocked,
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Selected(TileKey),
    Deselected(TileKey),
    Attempted {
        first: TileKey,
        second: TileKey,
        result: MatchResult,
    },
    /// Click on a matched tile or one whose removal is still pending.
    Ignored,
}

/// Where the board stands after a match has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    InPlay,
    /// No pair was connectable so the remaining tiles were rearranged.
    Reshuffled,
    Cleared,
    /// No rearrangement within the attempt limit produced a connectable pair.
    Stuck,
}

/// The board controller: owns the tiles, the occupancy grid and the selection.
///
/// A successful match does not free the tiles' cells right away. Both tiles become pending
/// until [`Board::complete_match`] is called (after the removal animation), and pending
/// tiles are excluded from selection, hints and further attempts in the meantime.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    grid: GridModel,
    selected: Option<TileKey>,
    pending: Vec<(TileKey, TileKey)>,
    last_path: Option<Path>,
    events: Vec<GameEvent>,
    max_auto_shuffles: u32,
}

impl Board {
    pub fn new(rows: usize, cols: usize, tiles: Vec<Tile>) -> Result<Self, GameError> {
        let cells = rows * cols;
        if tiles.len() > cells {
            return Err(GameError::BoardTooSmall {
                tiles: tiles.len(),
                cells,
            });
        }

        let mut taken = HashSet::new();
        for tile in &tiles {
            let position = tile.position;
            if position.row < 0
                || position.col < 0
                || position.row as usize >= rows
                || position.col as usize >= cols
            {
                return Err(GameError::OutOfBounds {
                    row: position.row,
                    col: position.col,
                });
            }
            if !taken.insert(position) {
                return Err(GameError::DuplicatePosition {
                    row: position.row,
                    col: position.col,
                });
            }
        }

        let grid = GridModel::new(
            rows,
            cols,
            tiles.iter().filter(|t| !t.matched).map(|t| t.position),
        );

        Ok(Self {
            rows,
            cols,
            tiles,
            grid,
            selected: None,
            pending: Vec::new(),
            last_path: None,
            events: Vec::new(),
            max_auto_shuffles: DEFAULT_MAX_AUTO_SHUFFLES,
        })
    }

    /// Places a word tile and a meaning tile for every entry on random cells.
    pub fn deal<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        entries: &[WordEntry],
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let needed = entries.len() * 2;
        if needed > rows * cols {
            return Err(GameError::BoardTooSmall {
                tiles: needed,
                cells: rows * cols,
            });
        }

        let mut cells: Vec<Position> = (0..rows as i32)
            .flat_map(|row| (0..cols as i32).map(move |col| Position::new(row, col)))
            .collect();
        cells.shuffle(rng);

        let tiles = entries
            .iter()
            .flat_map(|entry| {
                [
                    (entry.id.clone(), Role::Word, entry.word.clone()),
                    (entry.id.clone(), Role::Meaning, entry.meaning.clone()),
                ]
            })
            .zip(cells)
            .map(|((id, role, text), position)| Tile::new(id, role, text, position))
            .collect();

        info!("Dealt {} pairs on a {}x{} board", entries.len(), rows, cols);
        Self::new(rows, cols, tiles)
    }

    pub fn with_max_auto_shuffles(mut self, max_auto_shuffles: u32) -> Self {
        self.max_auto_shuffles = max_auto_shuffles;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, key: TileKey) -> Option<&Tile> {
        self.tiles.get(key)
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn selected(&self) -> Option<TileKey> {
        self.selected
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    /// Tiles not yet matched, pending ones included.
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| !t.matched).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }

    pub fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(&self.grid)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Click handling. The first click selects, clicking the selection again clears it and
    /// a click on a second tile attempts the match.
    pub fn select(&mut self, key: TileKey) -> Result<SelectionOutcome, GameError> {
        if key >= self.tiles.len() {
            return Err(GameError::UnknownTile(key));
        }
        if !self.is_available(key) {
            debug!("Ignoring click on unavailable tile {}", key);
            return Ok(SelectionOutcome::Ignored);
        }

        match self.selected.take() {
            None => {
                self.selected = Some(key);
                Ok(SelectionOutcome::Selected(key))
            }
            Some(first) if first == key => Ok(SelectionOutcome::Deselected(key)),
            Some(first) => {
                let result = self.attempt_match(first, key)?;
                Ok(SelectionOutcome::Attempted {
                    first,
                    second: key,
                    result,
                })
            }
        }
    }

    /// Checks a pair and routes a connector between them. On success both tiles
    /// become pending; their cells stay blocked until [`Board::complete_match`].
    pub fn attempt_match(&mut self, first: TileKey, second: TileKey) -> Result<MatchResult, GameError> {
        let a = self.available_tile(first)?;
        let b = self.available_tile(second)?;

        let result = if !a.pairs_with(b) || first == second {
            MatchResult::Mismatch
        } else {
            match self.path_finder().find_path(a.position, b.position) {
                Some(path) => MatchResult::Success(path),
                None => MatchResult::Blocked,
            }
        };

        match &result {
            MatchResult::Success(path) => {
                debug!("Matched tiles {} and {} ({:?})", first, second, path.kind());
                self.pending.push((first, second));
                if self.selected.is_some_and(|key| key == first || key == second) {
                    self.selected = None;
                }
                self.last_path = Some(path.clone());
                self.events.push(GameEvent::MatchSucceeded {
                    first,
                    second,
                    path: path.clone(),
                });
            }
            MatchResult::Mismatch => self.fail(first, second, FailReason::Mismatch),
            MatchResult::Blocked => self.fail(first, second, FailReason::Blocked),
        }
        Ok(result)
    }

    /// Removes a pending pair from the grid. Runs exactly once per successful match, and
    /// when nothing else is pending, checks whether play can continue and reshuffles if not.
    pub fn complete_match<R: Rng + ?Sized>(
        &mut self,
        first: TileKey,
        second: TileKey,
        rng: &mut R,
    ) -> Result<BoardState, GameError> {
        let idx = self
            .pending
            .iter()
            .position(|&(a, b)| (a, b) == (first, second) || (b, a) == (first, second))
            .ok_or(GameError::NotPending)?;
        self.pending.remove(idx);

        for key in [first, second] {
            let tile = &mut self.tiles[key];
            tile.matched = true;
            self.grid.set_occupancy(tile.position, false)?;
        }

        if self.is_cleared() {
            info!("Board cleared");
            return Ok(BoardState::Cleared);
        }
        if self.has_pending() || self.has_any_possible_match() {
            return Ok(BoardState::InPlay);
        }
        Ok(self.auto_reshuffle(rng))
    }

    pub fn has_any_possible_match(&self) -> bool {
        self.path_finder().has_any_possible_match(self.available_tiles())
    }

    /// A connectable pair for hinting, chosen at random among those available.
    pub fn hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ConnectablePair> {
        let pair = self
            .path_finder()
            .find_connectable_pair(self.available_tiles(), rng)?;
        self.events.push(GameEvent::HintUsed {
            first: pair.first,
            second: pair.second,
        });
        Some(pair)
    }

    /// Rearranges the unmatched tiles over the cells they currently occupy.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.has_pending() {
            return Err(GameError::MatchPending);
        }
        self.shuffle_positions(rng);
        self.events.push(GameEvent::ShuffleUsed { automatic: false });
        info!("Reshuffled {} tiles", self.remaining());
        Ok(())
    }

    fn auto_reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BoardState {
        for attempt in 1..=self.max_auto_shuffles {
            self.shuffle_positions(rng);
            if self.has_any_possible_match() {
                info!("No moves left, reshuffled after {} attempt(s)", attempt);
                self.events.push(GameEvent::ShuffleUsed { automatic: true });
                return BoardState::Reshuffled;
            }
        }
        warn!(
            "No connectable pair after {} reshuffles with {} tiles left",
            self.max_auto_shuffles,
            self.remaining()
        );
        BoardState::Stuck
    }

    fn shuffle_positions<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let keys: Vec<TileKey> = (0..self.tiles.len()).filter(|&k| !self.tiles[k].matched).collect();
        let mut positions: Vec<Position> = keys.iter().map(|&k| self.tiles[k].position).collect();
        positions.shuffle(rng);

        for (key, position) in keys.into_iter().zip(positions) {
            self.tiles[key].position = position;
        }
        self.selected = None;
        self.grid = GridModel::new(
            self.rows,
            self.cols,
            self.tiles.iter().filter(|t| !t.matched).map(|t| t.position),
        );
    }

    fn fail(&mut self, first: TileKey, second: TileKey, reason: FailReason) {
        debug!("Tiles {} and {} did not match: {:?}", first, second, reason);
        self.events.push(GameEvent::MatchFailed {
            first,
            second,
            reason,
        });
    }

    fn is_pending(&self, key: TileKey) -> bool {
        self.pending.iter().any(|&(a, b)| a == key || b == key)
    }

    fn is_available(&self, key: TileKey) -> bool {
        self.tiles.get(key).map_or(false, |t| !t.matched) && !self.is_pending(key)
    }

    fn available_tile(&self, key: TileKey) -> Result<&Tile, GameError> {
        let tile = self.tiles.get(key).ok_or(GameError::UnknownTile(key))?;
        if !self.is_available(key) {
            warn!("Rejected match attempt on unavailable tile {}", key);
            return Err(GameError::TileUnavailable(key));
        }
        Ok(tile)
    }

    fn available_tiles(&self) -> impl Iterator<Item = (TileKey, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(key, _)| self.is_available(*key))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let here = Position::new(row, col);
                match self.tiles.iter().find(|t| !t.matched && t.position == here) {
                    Some(tile) if tile.role == Role::Word => write!(f, " {:>3}W", tile.id)?,
                    Some(tile) => write!(f, " {:>3}M", tile.id)?,
                    None => write!(f, "    .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

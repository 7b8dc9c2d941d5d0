pub mod board;
pub mod conversion;
pub mod events;
pub mod grid;
pub mod layout;
pub mod path_finder;
pub mod scoring;

pub use board::{Board, BoardState, MatchResult, SelectionOutcome};
pub use conversion::*;
pub use events::{FailReason, GameEvent};
pub use grid::{GridModel, GridPoint, Position, BORDER_SIZE};
pub use layout::{AdaptiveLayout, Container, Layout, LayoutFitter};
pub use path_finder::{ConnectablePair, PathFinder};
pub use scoring::Scorer;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use board::tile::TileKey;

/// Everything one player's game needs: the board, its layout, progress and the
/// random source used for shuffles and hints. Board events are applied to the scorer
/// as they happen and queued for the caller.
pub struct GameSession {
    board: Board,
    layout: AdaptiveLayout,
    scorer: Scorer,
    rng: StdRng,
    config: GameConfig,
    round: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(board: Board, layout: AdaptiveLayout, config: GameConfig, rng: StdRng) -> Self {
        let scorer = Scorer::new(config.hint_limit, config.shuffle_limit);
        Self {
            board,
            layout,
            scorer,
            rng,
            config,
            round: 1,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> Layout {
        self.layout.layout()
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn click(&mut self, key: TileKey) -> Result<SelectionOutcome, GameError> {
        let outcome = self.board.select(key);
        self.sync_events();
        outcome
    }

    pub fn attempt_match(&mut self, first: TileKey, second: TileKey) -> Result<MatchResult, GameError> {
        let result = self.board.attempt_match(first, second);
        self.sync_events();
        result
    }

    /// Call once the removal animation for a successful match has finished.
    pub fn complete_match(&mut self, first: TileKey, second: TileKey) -> Result<BoardState, GameError> {
        let state = self.board.complete_match(first, second, &mut self.rng);
        self.sync_events();
        state
    }

    /// `None` when the hint allowance is spent or nothing is connectable.
    pub fn hint(&mut self) -> Option<ConnectablePair> {
        if !self.scorer.can_hint() {
            debug!("Hint refused, none remaining");
            return None;
        }
        let pair = self.board.hint(&mut self.rng);
        self.sync_events();
        pair
    }

    /// Manual reshuffle. `Ok(false)` when the shuffle allowance is spent.
    pub fn shuffle(&mut self) -> Result<bool, GameError> {
        if !self.scorer.can_shuffle() {
            debug!("Shuffle refused, none remaining");
            return Ok(false);
        }
        self.board.reshuffle(&mut self.rng)?;
        self.sync_events();
        Ok(true)
    }

    pub fn resize(&mut self, container: Container) -> Option<Layout> {
        self.layout.resize(container)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(&self.board)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swaps in a freshly dealt board for the next round and resets progress.
    pub(crate) fn begin_round(&mut self, board: Board) {
        self.board = board;
        self.layout.lock();
        self.scorer = Scorer::new(self.config.hint_limit, self.config.shuffle_limit);
        self.round += 1;
        info!("Starting round {} with {} tiles", self.round, self.board.tiles().len());
    }

    pub(crate) fn layout_mut(&mut self) -> &mut AdaptiveLayout {
        &mut self.layout
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn sync_events(&mut self) {
        let events = self.board.drain_events();
        self.scorer.apply_all(&events);
        self.events.extend(events);
    }
}

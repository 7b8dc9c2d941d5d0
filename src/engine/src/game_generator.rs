use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_seeder::Seeder;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{AdaptiveLayout, Board, Container, GameSession, Layout, LayoutFitter};
use crate::word_source::{WordEntry, WordSource};

/// Builds sessions and rounds: fetches vocabulary, fits the layout and deals a board
/// with at least one connectable pair.
pub struct GameGenerator<S: WordSource> {
    source: S,
    config: GameConfig,
}

impl<S: WordSource> GameGenerator<S> {
    pub fn new(source: S, config: GameConfig) -> Self {
        Self { source, config }
    }

    /// A new session whose deals and shuffles are fully determined by `seed`.
    pub fn new_session(&self, seed: &str, container: Container) -> Result<GameSession, GameError> {
        let mut rng = StdRng::from_seed(self.create_seed(seed));
        let entries = self.fetch_entries()?;

        let fitter = LayoutFitter::new(self.config.layout.clone());
        let mut layout = AdaptiveLayout::new(fitter, entries.len() * 2, container);
        let board = self.deal_playable(layout.layout(), &entries, &mut rng)?;
        layout.lock();

        info!(
            "Created session '{}' with {} pairs on {}x{} at {}px",
            seed,
            entries.len(),
            layout.layout().rows,
            layout.layout().cols,
            layout.layout().cell_size
        );
        Ok(GameSession::new(board, layout, self.config.clone(), rng))
    }

    /// Deals the next round into an existing session, refitting the layout first.
    pub fn next_round(&self, session: &mut GameSession) -> Result<(), GameError> {
        let entries = self.fetch_entries()?;
        let layout = session.layout_mut().start_round(entries.len() * 2);
        let board = self.deal_playable(layout, &entries, session.rng_mut())?;
        session.begin_round(board);
        Ok(())
    }

    fn fetch_entries(&self) -> Result<Vec<WordEntry>, GameError> {
        let requested = self.config.pair_count;
        let entries = self.source.fetch(requested)?;
        if entries.is_empty() {
            return Err(GameError::NotEnoughWords {
                requested,
                available: 0,
            });
        }
        if entries.len() < requested {
            warn!("Requested {} pairs, word source only has {}", requested, entries.len());
        }
        Ok(entries)
    }

    /// Re-deals until some pair is connectable. Gives up after the configured number of
    /// attempts and returns the last deal, which can still be shuffled by hand.
    fn deal_playable(&self, layout: Layout, entries: &[WordEntry], rng: &mut StdRng) -> Result<Board, GameError> {
        let attempts = self.config.max_auto_shuffles.max(1);
        let mut board = Board::deal(layout.rows, layout.cols, entries, rng)?;
        for attempt in 1..attempts {
            if board.has_any_possible_match() {
                break;
            }
            warn!("Deal {} has no connectable pair, dealing again", attempt);
            board = Board::deal(layout.rows, layout.cols, entries, rng)?;
        }
        Ok(board.with_max_auto_shuffles(self.config.max_auto_shuffles))
    }

    fn create_seed(&self, seed: &str) -> [u8; 32] {
        Seeder::from(format!("pairlink:{}", seed)).make_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::create_test_entries;
    use crate::word_source::StaticWordSource;

    fn generator(pairs: usize) -> GameGenerator<StaticWordSource> {
        let config = GameConfig {
            pair_count: pairs,
            ..GameConfig::default()
        };
        GameGenerator::new(StaticWordSource::from(create_test_entries(16)), config)
    }

    #[test]
    fn test_new_session_deals_a_playable_board() {
        let session = generator(10)
            .new_session("2024-01-01", Container::new(800.0, 600.0))
            .unwrap();

        let layout = session.layout();
        assert!(layout.capacity() >= 20);
        assert_eq!(session.board().tiles().len(), 20);
        assert_eq!(session.board().rows(), layout.rows);
        assert!(session.board().has_any_possible_match());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let container = Container::new(800.0, 600.0);
        let first = generator(8).new_session("seed", container).unwrap();
        let second = generator(8).new_session("seed", container).unwrap();
        let other = generator(8).new_session("other seed", container).unwrap();

        assert_eq!(first.board().tiles(), second.board().tiles());
        assert_ne!(first.board().tiles(), other.board().tiles());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let generator = GameGenerator::new(StaticWordSource::default(), GameConfig::default());
        let result = generator.new_session("seed", Container::new(800.0, 600.0));

        assert!(matches!(result, Err(GameError::NotEnoughWords { available: 0, .. })));
    }

    #[test]
    fn test_next_round_resets_progress() {
        let generator = generator(6);
        let mut session = generator.new_session("rounds", Container::new(800.0, 600.0)).unwrap();
        let pair = session.hint().unwrap();
        session.attempt_match(pair.first, pair.second).unwrap();
        session.complete_match(pair.first, pair.second).unwrap();
        assert!(session.scorer().score() > 0);

        generator.next_round(&mut session).unwrap();
        assert_eq!(session.round(), 2);
        assert_eq!(session.scorer().score(), 0);
        assert!(session.board().tiles().iter().all(|t| !t.matched));
    }
}

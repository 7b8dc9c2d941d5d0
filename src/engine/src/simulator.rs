use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::game::{BoardSnapshot, BoardState, ConnectablePair, GameSession, ScoreSummary, SerializableLayout};

/// How a simulated round went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub cleared: bool,
    pub stuck: bool,
    pub moves: u32,
    pub layout: SerializableLayout,
    pub score: ScoreSummary,
    pub board: BoardSnapshot,
}

/// Plays the current round to the end the way a player would: click both tiles of a
/// connectable pair, wait out the removal animation, then let the board settle.
/// Uses hints while they last and searches on its own afterwards.
pub async fn play_round(session: &mut GameSession, delay: Duration) -> Result<RoundReport, GameError> {
    // player's own search, kept apart from the session rng so hints stay reproducible
    let mut search_rng = StdRng::seed_from_u64(u64::from(session.round()));
    let mut moves = 0;
    let mut stuck = false;

    while !session.board().is_cleared() {
        let Some(pair) = next_pair(session, &mut search_rng) else {
            if session.shuffle()? {
                continue;
            }
            warn!("No moves and no shuffles left in round {}", session.round());
            stuck = true;
            break;
        };

        session.click(pair.first)?;
        session.click(pair.second)?;
        moves += 1;
        tokio::time::sleep(delay).await;

        match session.complete_match(pair.first, pair.second)? {
            BoardState::Stuck if !session.shuffle()? => {
                warn!("Board stuck after {} moves", moves);
                stuck = true;
                break;
            }
            state => debug!("Move {} left the board {:?}", moves, state),
        }
    }

    let report = RoundReport {
        round: session.round(),
        cleared: session.board().is_cleared(),
        stuck,
        moves,
        layout: session.layout().into(),
        score: session.scorer().into(),
        board: session.snapshot(),
    };
    info!(
        "Round {} finished: cleared={} moves={} score={}",
        report.round, report.cleared, report.moves, report.score.score
    );
    Ok(report)
}

fn next_pair(session: &mut GameSession, rng: &mut StdRng) -> Option<ConnectablePair> {
    if let Some(pair) = session.hint() {
        return Some(pair);
    }
    let board = session.board();
    board
        .path_finder()
        .find_connectable_pair(board.tiles().iter().enumerate().filter(|(_, t)| !t.matched), rng)
}

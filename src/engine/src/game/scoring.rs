use crate::game::events::GameEvent;

const POINTS_PER_MATCH: u32 = 10;

/// Round progress derived from board events: score, combo and the hint and
/// shuffle allowances.
#[derive(Clone, Debug, PartialEq)]
pub struct Scorer {
    score: u32,
    combo: u32,
    best_combo: u32,
    matches: u32,
    mistakes: u32,
    hints_remaining: u32,
    shuffles_remaining: u32,
}

impl Scorer {
    pub fn new(hint_limit: u32, shuffle_limit: u32) -> Self {
        Self {
            score: 0,
            combo: 0,
            best_combo: 0,
            matches: 0,
            mistakes: 0,
            hints_remaining: hint_limit,
            shuffles_remaining: shuffle_limit,
        }
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MatchSucceeded { .. } => {
                self.combo += 1;
                self.best_combo = self.best_combo.max(self.combo);
                self.matches += 1;
                self.score += POINTS_PER_MATCH * self.combo;
            }
            GameEvent::MatchFailed { .. } => {
                self.combo = 0;
                self.mistakes += 1;
            }
            GameEvent::HintUsed { .. } => {
                self.hints_remaining = self.hints_remaining.saturating_sub(1);
            }
            // automatic reshuffles are free
            GameEvent::ShuffleUsed { automatic } => {
                if !automatic {
                    self.shuffles_remaining = self.shuffles_remaining.saturating_sub(1);
                }
            }
        }
    }

    pub fn apply_all<'a, I: IntoIterator<Item = &'a GameEvent>>(&mut self, events: I) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn shuffles_remaining(&self) -> u32 {
        self.shuffles_remaining
    }

    pub fn can_hint(&self) -> bool {
        self.hints_remaining > 0
    }

    pub fn can_shuffle(&self) -> bool {
        self.shuffles_remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::path::Path;
    use crate::game::events::FailReason;
    use crate::game::grid::GridPoint;

    fn success() -> GameEvent {
        GameEvent::MatchSucceeded {
            first: 0,
            second: 1,
            path: Path::new(vec![GridPoint::new(2, 2), GridPoint::new(2, 3)]),
        }
    }

    fn failure() -> GameEvent {
        GameEvent::MatchFailed {
            first: 0,
            second: 2,
            reason: FailReason::Mismatch,
        }
    }

    #[test]
    fn test_combo_multiplies_points() {
        let mut scorer = Scorer::new(3, 3);
        scorer.apply_all(&[success(), success(), success()]);

        assert_eq!(scorer.score(), 10 + 20 + 30);
        assert_eq!(scorer.combo(), 3);
        assert_eq!(scorer.matches(), 3);
    }

    #[test]
    fn test_failure_resets_combo() {
        let mut scorer = Scorer::new(3, 3);
        scorer.apply_all(&[success(), success(), failure(), success()]);

        assert_eq!(scorer.score(), 10 + 20 + 10);
        assert_eq!(scorer.best_combo(), 2);
        assert_eq!(scorer.mistakes(), 1);
    }

    #[test]
    fn test_hint_and_shuffle_allowances() {
        let mut scorer = Scorer::new(1, 1);
        scorer.apply(&GameEvent::ShuffleUsed { automatic: true });
        assert!(scorer.can_shuffle());

        scorer.apply(&GameEvent::ShuffleUsed { automatic: false });
        scorer.apply(&GameEvent::HintUsed { first: 0, second: 1 });
        scorer.apply(&GameEvent::HintUsed { first: 0, second: 1 });

        assert!(!scorer.can_shuffle());
        assert!(!scorer.can_hint());
        assert_eq!(scorer.hints_remaining(), 0);
    }
}

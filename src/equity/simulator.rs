use super::tie::TieRule;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::error::EngineError;
use crate::evaluation::strength::Strength;
use crate::Equity;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// trials per unit of parallel work; cancellation is polled between chunks
const CHUNK: usize = 1_024;

/// Monte Carlo showdown sampler.
///
/// Each trial rebuilds the undealt deck from the known cards, runs out the
/// board, deals every opponent a random holding, and compares Strengths.
/// Trials are partitioned into chunks across rayon workers; each chunk owns
/// a SmallRng seeded from the base seed and the chunk index, so concurrent
/// streams stay uncorrelated without any shared RNG state.
#[derive(Debug, Clone)]
pub struct Simulator {
    opponents: usize,
    trials: usize,
    tie: TieRule,
    seed: u64,
    cancel: Arc<AtomicBool>,
}

impl Simulator {
    pub fn new(opponents: usize, trials: usize) -> Self {
        Self {
            opponents,
            trials,
            tie: TieRule::default(),
            seed: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn tie(mut self, tie: TieRule) -> Self {
        self.tie = tie;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    pub fn cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// hero win rate over sampled showdowns, in [0, 1].
    ///
    /// A run cancelled mid-flight reports the completed portion of its
    /// trials; one cancelled before any chunk finishes is Interrupted
    /// rather than a zero-trial estimate.
    pub fn estimate(&self, hole: Hole, board: Hand) -> Result<Equity, EngineError> {
        self.validate(hole, board)?;
        let chunks = self.trials.div_ceil(CHUNK);
        let (wins, done) = (0..chunks)
            .into_par_iter()
            .map(|i| {
                if self.cancel.load(std::sync::atomic::Ordering::Relaxed) {
                    return (0.0, 0usize);
                }
                let rng = &mut SmallRng::seed_from_u64(Self::stream(self.seed, i as u64));
                let n = CHUNK.min(self.trials - i * CHUNK);
                let wins = (0..n).map(|_| self.trial(hole, board, rng)).sum::<f64>();
                (wins, n)
            })
            .reduce(|| (0.0, 0), |(w1, n1), (w2, n2)| (w1 + w2, n1 + n2));
        if done == 0 {
            return Err(EngineError::Interrupted);
        }
        log::trace!("equity {} ~ {} over {} trials", hole, board, done);
        Ok(wins / done as f64)
    }

    /// one showdown. deals the rest of the board and every opponent,
    /// then scores hero against the field.
    fn trial(&self, hole: Hole, board: Hand, rng: &mut SmallRng) -> f64 {
        let hole = Hand::from(hole);
        let known = Hand::add(hole, board);
        let mut deck = Deck::without(known);
        let board = Hand::add(board, deck.deal(5 - board.size(), rng));
        let hero = Strength::from(Hand::add(hole, board));
        let mut ties = 0;
        for _ in 0..self.opponents {
            let villain = Strength::from(Hand::add(deck.deal(2, rng), board));
            match hero.cmp(&villain) {
                Ordering::Less => return 0.0,
                Ordering::Equal => ties += 1,
                Ordering::Greater => {}
            }
        }
        self.tie.score(ties)
    }

    fn validate(&self, hole: Hole, board: Hand) -> Result<(), EngineError> {
        if self.opponents == 0 || self.trials == 0 {
            return Err(EngineError::InvalidGameState(
                "simulator needs at least one opponent and one trial".to_string(),
            ));
        }
        Street::try_from(board.size()).map_err(EngineError::InvalidGameState)?;
        let hole = Hand::from(hole);
        if hole.intersects(&board) {
            return Err(EngineError::InsufficientDeck(format!(
                "hole {} overlaps board {}",
                hole, board
            )));
        }
        let known = hole.size() + board.size();
        let needed = (5 - board.size()) + 2 * self.opponents;
        if 52 - known < needed {
            return Err(EngineError::InsufficientDeck(format!(
                "{} cards known, {} more needed",
                known, needed
            )));
        }
        Ok(())
    }

    /// splitmix-style stream derivation: one independent seed per chunk
    pub(crate) fn stream(seed: u64, index: u64) -> u64 {
        let mut z = seed
            .wrapping_add(0x9E3779B97F4A7C15)
            .wrapping_add(index.wrapping_mul(0xBF58476D1CE4E5B9));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(s: &str) -> Hole {
        Hole::try_from(s).unwrap()
    }

    #[test]
    fn equity_stays_in_bounds() {
        let sim = Simulator::new(3, 2_000).seed(7);
        let eq = sim.estimate(hole("As Kh"), Hand::empty()).unwrap();
        assert!((0.0..=1.0).contains(&eq));
    }

    #[test]
    fn pocket_aces_beat_seven_deuce() {
        let sim = Simulator::new(1, 5_000).seed(11);
        let aces = sim.estimate(hole("As Ah"), Hand::empty()).unwrap();
        let trash = sim.estimate(hole("7d 2c"), Hand::empty()).unwrap();
        assert!(aces > trash + 0.05);
    }

    #[test]
    fn pocket_aces_heads_up_equity() {
        let sim = Simulator::new(1, 10_000).seed(13);
        let eq = sim.estimate(hole("As Ah"), Hand::empty()).unwrap();
        assert!((eq - 0.85).abs() < 0.03, "unexpected AA equity {}", eq);
    }

    #[test]
    fn rejects_hole_board_overlap() {
        let sim = Simulator::new(1, 100);
        let board = Hand::try_from("As Kd Qc").unwrap();
        assert!(matches!(
            sim.estimate(hole("As Ah"), board),
            Err(EngineError::InsufficientDeck(_))
        ));
    }

    #[test]
    fn rejects_oversubscribed_deck() {
        // 2 + 0 known, 5 board + 48 opponent cards > 50 remaining
        let sim = Simulator::new(24, 100);
        assert!(matches!(
            sim.estimate(hole("As Ah"), Hand::empty()),
            Err(EngineError::InsufficientDeck(_))
        ));
    }

    #[test]
    fn rejects_malformed_board() {
        let sim = Simulator::new(1, 100);
        let board = Hand::try_from("As Kd").unwrap();
        assert!(matches!(
            sim.estimate(hole("Qs Qh"), board),
            Err(EngineError::InvalidGameState(_))
        ));
    }

    #[test]
    fn split_rule_raises_tied_equity() {
        // board plays for everyone: every trial is an n-way chop
        let board = Hand::try_from("As Ks Qs Js Ts").unwrap();
        let wins_only = Simulator::new(1, 500).seed(3);
        let split = Simulator::new(1, 500).seed(3).tie(TieRule::Split);
        let lo = wins_only.estimate(hole("2c 2d"), board).unwrap();
        let hi = split.estimate(hole("2c 2d"), board).unwrap();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 0.5);
    }

    #[test]
    fn cancelled_before_any_trial_is_interrupted() {
        let cancel = Arc::new(AtomicBool::new(true));
        let sim = Simulator::new(1, 5_000).cancel(cancel);
        assert!(matches!(
            sim.estimate(hole("As Ah"), Hand::empty()),
            Err(EngineError::Interrupted)
        ));
    }

    #[test]
    fn deck_integrity_across_trials() {
        use rand::SeedableRng;
        let rng = &mut SmallRng::seed_from_u64(17);
        let known = Hand::try_from("As Ah Kd Qc 2s").unwrap();
        for _ in 0..10_000 {
            let mut deck = Deck::without(known);
            let dealt = deck.deal(6, rng);
            assert!(!dealt.intersects(&known));
            assert_eq!(dealt.size(), 6);
        }
    }
}

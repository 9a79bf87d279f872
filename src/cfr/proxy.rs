use super::state::GameState;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::equity::simulator::Simulator;
use crate::error::EngineError;
use serde::Deserialize;
use serde::Serialize;

/// Hand strength proxy backing counterfactual utilities.
///
/// Heuristic is a closed-form estimate from hole-card shape and board
/// interaction, cheap enough to run inside a training loop. MonteCarlo
/// substitutes a reduced-trial equity sample for better calibration at
/// the cost of throughput.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrengthModel {
    #[default]
    Heuristic,
    MonteCarlo {
        trials: usize,
    },
}

impl StrengthModel {
    /// Monte Carlo proxy at the reduced default trial count
    pub fn sampled() -> Self {
        Self::MonteCarlo {
            trials: crate::STRENGTH_TRIALS,
        }
    }

    /// strength in [0, 1] for hero at this decision point
    pub fn strength(&self, state: &GameState, seed: u64) -> Result<f64, EngineError> {
        match self {
            Self::Heuristic => Ok(Self::heuristic(state)),
            Self::MonteCarlo { trials } => Simulator::new(state.players - 1, *trials)
                .seed(seed)
                .estimate(state.hole, state.board),
        }
    }

    /// normalized high-card value plus bonuses for pairs, suitedness,
    /// connectedness, board pairing, and flush draws. capped at 1.
    fn heuristic(state: &GameState) -> f64 {
        let cards = Vec::<Card>::from(Hand::from(state.hole));
        let (a, b) = (cards[0], cards[1]);
        let value = |c: Card| (u8::from(c.rank()) + 2) as f64 / 14.0;
        let mut strength = (value(a) + value(b)) / 2.0;
        if a.rank() == b.rank() {
            strength += 0.25 + u8::from(a.rank()) as f64 * 0.02;
        }
        if a.suit() == b.suit() {
            strength += 0.05;
            if state.board.of(&a.suit()).size() >= 2 {
                strength += 0.08;
            }
        }
        if (u8::from(a.rank()) as i8 - u8::from(b.rank()) as i8).abs() == 1 {
            strength += 0.03;
        }
        for card in &cards {
            if state.board.into_iter().any(|c| c.rank() == card.rank()) {
                strength += 0.15;
            }
        }
        strength.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hole::Hole;
    use crate::cards::street::Street;
    use crate::cfr::state::Table;
    use crate::Arbitrary;

    fn state(hole: &str, board: &str) -> GameState {
        let board = Hand::try_from(board).unwrap();
        GameState {
            street: Street::try_from(board.size()).unwrap(),
            hole: Hole::try_from(hole).unwrap(),
            board,
            pot: 100.0,
            stack: 900.0,
            to_call: 0.0,
            players: 2,
            position: 0,
            table: Table::Cash,
        }
    }

    #[test]
    fn heuristic_stays_in_unit_interval() {
        for _ in 0..500 {
            let state = GameState::random();
            let s = StrengthModel::Heuristic.strength(&state, 0).unwrap();
            assert!((0.0..=1.0).contains(&s), "{} for {}", s, state);
        }
    }

    #[test]
    fn aces_outrank_seven_deuce() {
        let aces = StrengthModel::Heuristic
            .strength(&state("As Ah", ""), 0)
            .unwrap();
        let trash = StrengthModel::Heuristic
            .strength(&state("7d 2c", ""), 0)
            .unwrap();
        assert!(aces > trash + 0.3);
    }

    #[test]
    fn pairing_the_board_helps() {
        let paired = StrengthModel::Heuristic
            .strength(&state("As Kh", "Ad 7c 2s"), 0)
            .unwrap();
        let whiffed = StrengthModel::Heuristic
            .strength(&state("As Kh", "Jd 7c 2s"), 0)
            .unwrap();
        assert!(paired > whiffed);
    }

    #[test]
    fn monte_carlo_model_is_seed_deterministic() {
        let state = state("Qs Qh", "2c 7d Jh");
        let model = StrengthModel::MonteCarlo { trials: 512 };
        assert_eq!(
            model.strength(&state, 42).unwrap(),
            model.strength(&state, 42).unwrap()
        );
    }
}

use super::recommendation::Advice;
use super::recommendation::Recommendation;
use crate::cfr::action::Action;
use crate::cfr::policy::Policy;
use crate::cfr::state::GameState;
use crate::cfr::state::Table;
use crate::error::EngineError;
use crate::Chips;
use crate::Equity;
use serde::Deserialize;
use serde::Serialize;

/// large value bets commit this fraction of the pot
const LARGE_BET: f64 = 0.75;
/// medium value bets commit this fraction of the pot
const MEDIUM_BET: f64 = 0.5;
/// equity floor for a large value bet
const BET_LARGE_ABOVE: f64 = 0.70;
/// equity floor for a medium value bet
const BET_MEDIUM_ABOVE: f64 = 0.50;
/// equity floor for continuing at all
const CONTINUE_ABOVE: f64 = 0.30;
/// tournaments tighten every threshold by this much
const TOURNAMENT_SHADE: f64 = 0.05;

/// How the engine turns an equity estimate and a learned strategy into
/// a single advised line.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DecisionPolicy {
    /// fixed equity thresholds select a bet tier
    #[default]
    ThresholdHeuristic,
    /// the mode of the average CFR strategy selects the line
    CfrArgmax,
}

impl DecisionPolicy {
    /// synthesize a recommendation. the state must already be validated.
    pub fn decide(
        &self,
        state: &GameState,
        equity: Equity,
        average: &Policy,
    ) -> Result<Recommendation, EngineError> {
        let (advice, size, reasoning) = match self {
            Self::ThresholdHeuristic => Self::threshold(state, equity),
            Self::CfrArgmax => Self::argmax(state, average)?,
        };
        Ok(Recommendation {
            advice,
            size,
            win_probability: equity * 100.0,
            expected_value: equity * state.pot - (1.0 - equity) * size,
            risk_level: advice.risk(),
            confidence: (50.0 + equity * 50.0).min(95.0),
            reasoning,
        })
    }

    fn threshold(state: &GameState, equity: Equity) -> (Advice, Chips, String) {
        let shade = match state.table {
            Table::Cash => 0.0,
            Table::Tournament => TOURNAMENT_SHADE,
        };
        if equity > BET_LARGE_ABOVE + shade {
            (
                Advice::BetLarge,
                state.pot * LARGE_BET,
                format!(
                    "{:.0}% equity clears the large-bet threshold on the {}",
                    equity * 100.0,
                    state.street
                ),
            )
        } else if equity > BET_MEDIUM_ABOVE + shade {
            (
                Advice::BetMedium,
                state.pot * MEDIUM_BET,
                format!("{:.0}% equity supports a value bet", equity * 100.0),
            )
        } else if equity > CONTINUE_ABOVE + shade {
            if state.to_call > 0.0 {
                (
                    Advice::Call,
                    state.to_call,
                    format!("{:.0}% equity, enough to continue", equity * 100.0),
                )
            } else {
                (
                    Advice::Check,
                    0.0,
                    format!(
                        "{:.0}% equity, keeping the pot controlled",
                        equity * 100.0
                    ),
                )
            }
        } else {
            (
                Advice::Fold,
                0.0,
                format!("{:.0}% equity is not enough to continue", equity * 100.0),
            )
        }
    }

    fn argmax(
        state: &GameState,
        average: &Policy,
    ) -> Result<(Advice, Chips, String), EngineError> {
        let (action, prob) = average.argmax().ok_or(EngineError::NoLegalActions)?;
        let (advice, size) = match action {
            Action::Fold => (Advice::Fold, 0.0),
            Action::Check => (Advice::Check, 0.0),
            Action::Call => (Advice::Call, state.to_call),
            Action::Bet => (Advice::BetMedium, state.pot * MEDIUM_BET),
            Action::Raise => (Advice::BetLarge, state.pot * LARGE_BET),
            Action::AllIn => (Advice::AllIn, state.stack),
        };
        let reasoning = format!("average strategy favors {} at {:.2}", action, prob);
        Ok((advice, size, reasoning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hand::Hand;
    use crate::cards::hole::Hole;
    use crate::cards::street::Street;

    fn state(to_call: Chips) -> GameState {
        GameState {
            street: Street::Flop,
            hole: Hole::try_from("As Kh").unwrap(),
            board: Hand::try_from("7c 8d 2h").unwrap(),
            pot: 100.0,
            stack: 900.0,
            to_call,
            players: 3,
            position: 1,
            table: Table::Cash,
        }
    }

    fn decide(equity: Equity, to_call: Chips) -> Recommendation {
        let state = state(to_call);
        let average = Policy::uniform(&state.legal());
        DecisionPolicy::ThresholdHeuristic
            .decide(&state, equity, &average)
            .unwrap()
    }

    #[test]
    fn strong_equity_bets_large() {
        let rec = decide(0.80, 0.0);
        assert_eq!(rec.advice, Advice::BetLarge);
        assert_eq!(rec.size, 75.0);
        assert_eq!(rec.risk_level, 40.0);
        assert_eq!(rec.win_probability, 80.0);
    }

    #[test]
    fn medium_equity_bets_half_pot() {
        let rec = decide(0.60, 0.0);
        assert_eq!(rec.advice, Advice::BetMedium);
        assert_eq!(rec.size, 50.0);
        assert_eq!(rec.risk_level, 50.0);
    }

    #[test]
    fn marginal_equity_checks_or_calls() {
        assert_eq!(decide(0.40, 0.0).advice, Advice::Check);
        let calling = decide(0.40, 25.0);
        assert_eq!(calling.advice, Advice::Call);
        assert_eq!(calling.size, 25.0);
    }

    #[test]
    fn weak_equity_folds_for_free() {
        let rec = decide(0.20, 25.0);
        assert_eq!(rec.advice, Advice::Fold);
        assert_eq!(rec.size, 0.0);
        assert_eq!(rec.risk_level, 0.0);
        assert_eq!(rec.expected_value, 20.0);
    }

    #[test]
    fn confidence_is_capped() {
        assert_eq!(decide(0.99, 0.0).confidence, 95.0);
        assert_eq!(decide(0.50, 0.0).confidence, 75.0);
    }

    #[test]
    fn tournaments_tighten_thresholds() {
        let mut state = state(0.0);
        state.table = Table::Tournament;
        let average = Policy::uniform(&state.legal());
        let rec = DecisionPolicy::ThresholdHeuristic
            .decide(&state, 0.72, &average)
            .unwrap();
        assert_eq!(rec.advice, Advice::BetMedium);
    }

    #[test]
    fn argmax_follows_the_learned_strategy() {
        let state = state(0.0);
        let average: Policy = [
            (Action::Fold, 0.1),
            (Action::Check, 0.2),
            (Action::Bet, 0.7),
        ]
        .into_iter()
        .collect();
        let rec = DecisionPolicy::CfrArgmax
            .decide(&state, 0.55, &average)
            .unwrap();
        assert_eq!(rec.advice, Advice::BetMedium);
        assert_eq!(rec.size, 50.0);
    }

    #[test]
    fn expected_value_nets_cost_against_equity() {
        let rec = decide(0.60, 0.0);
        // 0.6 * 100 - 0.4 * 50
        assert_eq!(rec.expected_value, 40.0);
    }
}

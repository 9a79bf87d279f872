use super::action::Action;
use super::policy::Policy;
use crate::Probability;
use crate::Utility;
use crate::NORMALIZATION_EPSILON;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-info-set learning state: cumulative counterfactual regret per
/// action and the reach-weighted strategy sum whose normalization is
/// the average strategy.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Strategy {
    regrets: BTreeMap<Action, Utility>,
    weights: BTreeMap<Action, Probability>,
}

impl Strategy {
    /// current strategy via regret matching. each action's mass is its
    /// positive regret share; with no positive regret anywhere the
    /// strategy falls back to uniform over the legal actions.
    pub fn matched(&self, legal: &[Action]) -> Policy {
        let positive = legal
            .iter()
            .map(|a| (*a, self.regret(a).max(0.0)))
            .collect::<BTreeMap<Action, Utility>>();
        let total = positive.values().sum::<Utility>();
        if total > 0.0 {
            positive.into_iter().map(|(a, r)| (a, r / total)).collect()
        } else {
            Policy::uniform(legal)
        }
    }

    /// time-averaged strategy. unvisited nodes average to uniform.
    pub fn average(&self, legal: &[Action]) -> Policy {
        let total = legal
            .iter()
            .map(|a| self.weight(a))
            .sum::<Probability>();
        if total > NORMALIZATION_EPSILON {
            legal
                .iter()
                .map(|a| (*a, self.weight(a) / total))
                .collect()
        } else {
            Policy::uniform(legal)
        }
    }

    /// accumulate a regret delta. plus-variant clips the running
    /// total at zero after each update.
    pub fn add_regret(&mut self, action: Action, delta: Utility, plus: bool) {
        let regret = self.regrets.entry(action).or_insert(0.0);
        *regret += delta;
        if plus {
            *regret = regret.max(0.0);
        }
    }

    /// fold this iteration's action probability into the strategy sum,
    /// weighted by hero's reach probability.
    pub fn accumulate(&mut self, action: Action, prob: Probability, reach: Probability) {
        *self.weights.entry(action).or_insert(0.0) += reach * prob;
    }

    pub fn regret(&self, action: &Action) -> Utility {
        self.regrets.get(action).copied().unwrap_or(0.0)
    }
    fn weight(&self, action: &Action) -> Probability {
        self.weights.get(action).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NORMALIZATION_EPSILON;

    const LEGAL: [Action; 3] = [Action::Fold, Action::Check, Action::Bet];

    #[test]
    fn matching_normalizes_positive_regrets() {
        let mut strategy = Strategy::default();
        strategy.add_regret(Action::Check, 3.0, false);
        strategy.add_regret(Action::Bet, 1.0, false);
        strategy.add_regret(Action::Fold, -5.0, false);
        let policy = strategy.matched(&LEGAL);
        assert_eq!(policy.prob(&Action::Check), 0.75);
        assert_eq!(policy.prob(&Action::Bet), 0.25);
        assert_eq!(policy.prob(&Action::Fold), 0.0);
    }

    #[test]
    fn all_negative_regret_falls_back_to_uniform() {
        let mut strategy = Strategy::default();
        for action in LEGAL {
            strategy.add_regret(action, -1.0, false);
        }
        let policy = strategy.matched(&LEGAL);
        for action in LEGAL {
            assert!((policy.prob(&action) - 1.0 / 3.0).abs() < NORMALIZATION_EPSILON);
        }
    }

    #[test]
    fn zero_delta_leaves_the_policy_fixed() {
        let mut strategy = Strategy::default();
        strategy.add_regret(Action::Check, 2.0, false);
        let before = strategy.matched(&LEGAL);
        for action in LEGAL {
            strategy.add_regret(action, 0.0, false);
        }
        assert_eq!(before, strategy.matched(&LEGAL));
    }

    #[test]
    fn plus_variant_clips_at_zero() {
        let mut strategy = Strategy::default();
        strategy.add_regret(Action::Fold, -10.0, true);
        assert_eq!(strategy.regret(&Action::Fold), 0.0);
        strategy.add_regret(Action::Fold, 1.0, true);
        assert_eq!(strategy.regret(&Action::Fold), 1.0);
    }

    #[test]
    fn vanilla_variant_remembers_negative_regret() {
        let mut strategy = Strategy::default();
        strategy.add_regret(Action::Fold, -10.0, false);
        strategy.add_regret(Action::Fold, 1.0, false);
        assert_eq!(strategy.regret(&Action::Fold), -9.0);
    }

    #[test]
    fn average_weighs_by_reach() {
        let mut strategy = Strategy::default();
        strategy.accumulate(Action::Check, 0.5, 1.0);
        strategy.accumulate(Action::Bet, 0.5, 1.0);
        strategy.accumulate(Action::Check, 1.0, 0.5);
        let policy = strategy.average(&LEGAL);
        assert!((policy.prob(&Action::Check) - 2.0 / 3.0).abs() < NORMALIZATION_EPSILON);
        assert!((policy.prob(&Action::Bet) - 1.0 / 3.0).abs() < NORMALIZATION_EPSILON);
    }

    #[test]
    fn unvisited_average_is_uniform() {
        let policy = Strategy::default().average(&LEGAL);
        for action in LEGAL {
            assert!((policy.prob(&action) - 1.0 / 3.0).abs() < NORMALIZATION_EPSILON);
        }
    }
}

use super::action::Action;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A probability distribution over the actions at one decision point.
/// Always normalized by construction.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy(BTreeMap<Action, Probability>);

impl Policy {
    pub fn uniform(actions: &[Action]) -> Self {
        let p = 1.0 / actions.len() as Probability;
        Self(actions.iter().map(|a| (*a, p)).collect())
    }

    pub fn prob(&self, action: &Action) -> Probability {
        self.0.get(action).copied().unwrap_or(0.0)
    }

    /// most probable action. ties break toward the earlier Action variant.
    pub fn argmax(&self) -> Option<(Action, Probability)> {
        self.0
            .iter()
            .fold(None, |best: Option<(Action, Probability)>, (a, p)| {
                match best {
                    Some((_, q)) if q >= *p => best,
                    _ => Some((*a, *p)),
                }
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, &Probability)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Action, Probability)> for Policy {
    fn from_iter<T: IntoIterator<Item = (Action, Probability)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (action, prob) in &self.0 {
            write!(f, "{}: {:.3} ", action, prob)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NORMALIZATION_EPSILON;

    #[test]
    fn uniform_sums_to_one() {
        let legal = [Action::Fold, Action::Check, Action::Bet];
        let sum: f64 = Policy::uniform(&legal).iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < NORMALIZATION_EPSILON);
    }

    #[test]
    fn argmax_finds_the_mode() {
        let policy: Policy = [(Action::Fold, 0.2), (Action::Call, 0.8)]
            .into_iter()
            .collect();
        assert_eq!(policy.argmax(), Some((Action::Call, 0.8)));
    }

    #[test]
    fn absent_actions_have_zero_mass() {
        let policy = Policy::uniform(&[Action::Fold]);
        assert_eq!(policy.prob(&Action::AllIn), 0.0);
    }
}

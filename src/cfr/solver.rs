use super::action::Action;
use super::bucket::Bucket;
use super::policy::Policy;
use super::proxy::StrengthModel;
use super::state::GameState;
use super::store::Store;
use crate::error::EngineError;
use crate::Probability;
use crate::Utility;
use std::collections::BTreeMap;

/// passive lines realize less of the pot than aggressive ones
const CALL_SCALE: f64 = 0.4;
const BET_SCALE: f64 = 0.8;
const RAISE_SCALE: f64 = 1.0;

/// Result of one regret-matching step at one decision point.
pub struct Update {
    /// the strategy that was in force for this iteration
    pub policy: Policy,
    /// expected utility of the node under that strategy
    pub utility: Utility,
    /// sum of absolute regret deltas, a per-node convergence signal
    pub convergence: Utility,
}

/// Single-node CFR learner.
///
/// Rather than walking a full game tree, each update scores every legal
/// action against a strength proxy at the observed snapshot, folds the
/// regret deltas into the bucket's info set, and accumulates the current
/// strategy weighted by reach. The whole step holds one slot mutex, so
/// regret and strategy-sum updates land atomically per bucket.
pub struct Solver<'a> {
    store: &'a Store,
    model: StrengthModel,
    plus: bool,
}

impl<'a> Solver<'a> {
    pub fn new(store: &'a Store, model: StrengthModel, plus: bool) -> Self {
        Self { store, model, plus }
    }

    /// one regret-matching iteration. a state that fails validation
    /// leaves the store untouched.
    pub fn update(
        &self,
        state: &GameState,
        reach: Probability,
        stream: u64,
    ) -> Result<Update, EngineError> {
        state.validate()?;
        let legal = state.legal();
        if legal.is_empty() {
            return Err(EngineError::NoLegalActions);
        }
        let strength = self.model.strength(state, stream)?;
        let utilities = legal
            .iter()
            .map(|a| (*a, Self::utility(state, a, strength)))
            .collect::<BTreeMap<Action, Utility>>();
        let slot = self.store.get_or_create(Bucket::from(state));
        let mut info = slot.lock();
        let policy = info.strategy().matched(&legal);
        let node = legal
            .iter()
            .map(|a| policy.prob(a) * utilities[a])
            .sum::<Utility>();
        let mut convergence = 0.0;
        for action in &legal {
            let delta = utilities[action] - node;
            convergence += delta.abs();
            info.strategy_mut().add_regret(*action, delta, self.plus);
        }
        for action in &legal {
            info.strategy_mut()
                .accumulate(*action, policy.prob(action), reach);
        }
        info.witness(convergence);
        log::trace!(
            "update {} strength {:.3} node {:.3} drift {:.3}",
            Bucket::from(state),
            strength,
            node,
            convergence
        );
        Ok(Update {
            policy,
            utility: node,
            convergence,
        })
    }

    /// counterfactual value of one action at this snapshot. folding
    /// forfeits nothing and wins nothing; committing lines scale the
    /// pot (or stack, for a shove) by strength and table shape.
    fn utility(state: &GameState, action: &Action, strength: f64) -> Utility {
        let base = match action {
            Action::Fold => return 0.0,
            Action::Check => state.pot * CALL_SCALE * strength,
            Action::Call => state.pot * CALL_SCALE * strength * Self::price(state),
            Action::Bet => state.pot * BET_SCALE * strength,
            Action::Raise => state.pot * RAISE_SCALE * strength,
            Action::AllIn => state.stack * strength,
        };
        base * Self::seat(state) * Self::pressure(state) * Self::field(state)
    }

    /// later seats act on more information
    fn seat(state: &GameState) -> f64 {
        match state.position {
            0..=2 => 0.9,
            3..=5 => 1.0,
            _ => 1.1,
        }
    }

    /// committed pots reward continuing; nondecreasing in pot/stack
    fn pressure(state: &GameState) -> f64 {
        let ratio = if state.stack > 0.0 {
            (state.pot / state.stack).min(3.0)
        } else {
            3.0
        };
        0.8 + ratio / 3.0 * 0.4
    }

    /// short-handed fields let hero realize more equity
    fn field(state: &GameState) -> f64 {
        1.0 + (10.0 - state.players as f64).max(0.0) * 0.02
    }

    /// fraction of the pot kept after paying the price of a call.
    /// only evaluated when a call is legal, so the denominator is positive.
    fn price(state: &GameState) -> f64 {
        1.0 - state.to_call / (state.pot + state.to_call)
    }
}

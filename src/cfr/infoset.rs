use super::strategy::Strategy;
use crate::Utility;
use serde::Deserialize;
use serde::Serialize;

/// Everything the engine has learned about one abstraction bucket.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InfoSet {
    strategy: Strategy,
    visits: u64,
    /// cumulative absolute regret delta across all updates
    drift: Utility,
}

impl InfoSet {
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
    pub fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    /// record one completed update and its regret movement
    pub fn witness(&mut self, drift: Utility) {
        self.visits += 1;
        self.drift += drift;
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }
    pub fn drift(&self) -> Utility {
        self.drift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn witnessing_accumulates() {
        let mut info = InfoSet::default();
        info.witness(1.5);
        info.witness(0.5);
        assert_eq!(info.visits(), 2);
        assert_eq!(info.drift(), 2.0);
    }
}

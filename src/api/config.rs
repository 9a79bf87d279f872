use crate::cfr::proxy::StrengthModel;
use crate::equity::tie::TieRule;
use crate::error::EngineError;
use crate::recommend::policy::DecisionPolicy;
use crate::EQUITY_TRIALS;
use serde::Deserialize;
use serde::Serialize;

/// Engine construction parameters. Every field has a default, so a
/// partial JSON document configures only what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo trials per equity estimate
    pub trials: usize,
    /// worker threads for simulation and training
    pub threads: usize,
    /// base RNG seed; all sampling streams derive from it
    pub seed: u64,
    pub tie: TieRule,
    /// strength proxy used inside CFR updates
    pub model: StrengthModel,
    /// clip cumulative regrets at zero after each update
    pub cfr_plus: bool,
    /// info-set capacity; None keeps every bucket resident
    pub capacity: Option<usize>,
    pub policy: DecisionPolicy,
    /// equity cache entries kept before a flush
    pub cache: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trials: EQUITY_TRIALS,
            threads: num_cpus::get(),
            seed: 0,
            tie: TieRule::default(),
            model: StrengthModel::default(),
            cfr_plus: false,
            capacity: None,
            policy: DecisionPolicy::default(),
            cache: 4_096,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Serialization(e.to_string()))
    }
}

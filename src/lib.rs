pub mod api;
pub mod cards;
pub mod cfr;
pub mod equity;
pub mod error;
pub mod evaluation;
pub mod recommend;

/// Expected values, regrets, and payoffs.
pub type Utility = f64;
/// Strategy weights and reach probabilities.
pub type Probability = f64;
/// Showdown win rates in [0, 1].
pub type Equity = f64;
/// Pot sizes, stack sizes, and bet amounts.
pub type Chips = f64;

/// Default Monte Carlo trial count for a full equity estimate.
pub const EQUITY_TRIALS: usize = 10_000;
/// Reduced trial count when equity backs a single CFR utility estimate.
pub const STRENGTH_TRIALS: usize = 512;
/// Number of card-abstraction buckets in the information-set key.
pub const CARD_BUCKETS: u64 = 64;
/// Number of pot-to-stack ratio buckets in the information-set key.
pub const POT_BUCKETS: usize = 5;
/// Number of position buckets (early, middle, late).
pub const POSITION_BUCKETS: usize = 3;
/// Tolerance for strategy normalization checks.
pub const NORMALIZATION_EPSILON: f64 = 1e-9;

/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

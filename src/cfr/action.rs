use serde::Deserialize;
use serde::Serialize;

/// The abstract action space. Sizing is resolved downstream by the
/// recommendation layer; regret and strategy accumulation work over
/// these discrete labels.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl Action {
    pub const fn all() -> &'static [Self; 6] {
        &[
            Self::Fold,
            Self::Check,
            Self::Call,
            Self::Bet,
            Self::Raise,
            Self::AllIn,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
            Self::Raise => write!(f, "raise"),
            Self::AllIn => write!(f, "allin"),
        }
    }
}

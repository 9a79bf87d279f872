use crate::Chips;
use serde::Serialize;

/// Concrete advised line, with bet tiers resolved to pot fractions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    Fold,
    Check,
    Call,
    BetMedium,
    BetLarge,
    AllIn,
}

impl Advice {
    /// advisory risk score, 0-100. folding risks nothing; shoving
    /// risks the stack.
    pub fn risk(&self) -> f64 {
        match self {
            Self::Fold => 0.0,
            Self::Check | Self::Call => 60.0,
            Self::BetMedium => 50.0,
            Self::BetLarge => 40.0,
            Self::AllIn => 80.0,
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::BetMedium => write!(f, "bet_medium"),
            Self::BetLarge => write!(f, "bet_large"),
            Self::AllIn => write!(f, "all_in"),
        }
    }
}

/// A fully synthesized recommendation for one decision point.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub advice: Advice,
    /// chips to commit. zero for fold and check.
    pub size: Chips,
    /// estimated win percentage, 0-100
    pub win_probability: f64,
    /// pot equity won minus the committed amount lost, in chips
    pub expected_value: f64,
    pub risk_level: f64,
    /// 50-95, scaled with equity
    pub confidence: f64,
    pub reasoning: String,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {:.0} (win {:.1}% ev {:+.1} risk {:.0} conf {:.0}): {}",
            self.advice,
            self.size,
            self.win_probability,
            self.expected_value,
            self.risk_level,
            self.confidence,
            self.reasoning
        )
    }
}

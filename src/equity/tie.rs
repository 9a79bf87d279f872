use serde::Deserialize;
use serde::Serialize;

/// How a showdown tie counts toward hero equity.
///
/// The reference behavior scores any tie as a non-win. Split instead
/// awards 1/(1+ties) of a win when hero is tied but not beaten.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TieRule {
    #[default]
    WinsOnly,
    Split,
}

impl TieRule {
    /// score a trial in which hero was not beaten outright
    pub fn score(&self, ties: usize) -> f64 {
        match self {
            Self::WinsOnly => {
                if ties == 0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Split => 1.0 / (1 + ties) as f64,
        }
    }
}

/// Failure taxonomy for the engine core.
///
/// Malformed input fails fast with a typed error rather than a sentinel
/// value; silently returning zero equity or a default strength would mask
/// bugs in upstream state extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// malformed card input to the evaluator (duplicates, wrong count)
    InvalidHand(String),
    /// equity simulator asked to deal more cards than remain undealt
    InsufficientDeck(String),
    /// a GameState violating its invariants
    InvalidGameState(String),
    /// no legal action enumerable; unreachable given state invariants
    NoLegalActions,
    /// strategy export or import failed to round-trip through JSON
    Serialization(String),
    /// cancelled before any work completed; no estimate to report
    Interrupted,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidHand(why) => write!(f, "invalid hand: {}", why),
            Self::InsufficientDeck(why) => write!(f, "insufficient deck: {}", why),
            Self::InvalidGameState(why) => write!(f, "invalid game state: {}", why),
            Self::NoLegalActions => write!(f, "no legal actions"),
            Self::Serialization(why) => write!(f, "serialization: {}", why),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for EngineError {}

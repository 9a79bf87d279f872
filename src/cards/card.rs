use super::rank::Rank;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;

/// A single card in the 52-card domain. Immutable value type,
/// hashable, totally ordered by rank then suit.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
///
/// each card maps to its position in a sorted deck 0-51.
/// Ts -> 35
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52);
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism
///
/// each card is a single bit in the 52-bit universe.
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self::from(n.trailing_zeros() as u8)
    }
}

/// str isomorphism, e.g. "Ah", "Tc"
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.len() != 2 {
            return Err(format!("invalid card str: {}", s));
        }
        Ok(Self {
            rank: Rank::try_from(&s[0..1])?,
            suit: Suit::try_from(&s[1..2])?,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl crate::Arbitrary for Card {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::rng().random_range(0..52u8))
    }
}

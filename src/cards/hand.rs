use super::card::Card;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;

/// Hand represents an unordered set of Cards as a 52-bit bitstring.
/// One word per Hand independent of size, no heap allocation, and
/// set operations (union, complement, projection) become bitwise ops.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Hand(u64);

impl Hand {
    pub fn empty() -> Self {
        Self(0)
    }

    /// disjoint union. panics on overlap, which would mean a duplicated card.
    pub fn add(lhs: Self, rhs: Self) -> Self {
        assert!(lhs.0 & rhs.0 == 0);
        Self(lhs.0 | rhs.0)
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }
    pub fn complement(&self) -> Self {
        Self(self.0 ^ Self::mask())
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// project onto a single suit
    pub fn of(&self, suit: &Suit) -> Self {
        Self(self.0 & u64::from(*suit))
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// empty a hand from low to high
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.size() == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

impl From<Card> for Hand {
    fn from(c: Card) -> Self {
        Self(u64::from(c))
    }
}

/// Vec<Card> isomorphism (up to permutation; always comes out sorted)
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.into_iter().collect()
    }
}
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0u64, |a, b| a | b))
    }
}

/// one-way conversion to the 13-bit rank mask.
/// collapses the four suit lanes of each rank nibble into one bit.
impl From<Hand> for u16 {
    fn from(h: Hand) -> Self {
        let mut x = h.0;
        x |= x >> 1;
        x |= x >> 2;
        x &= 0x1111111111111;
        (0..13).fold(0u16, |acc, i| acc | (((x >> (i * 4)) & 1) as u16) << i)
    }
}

/// str isomorphism, whitespace separated: "As Kh 7c"
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in Vec::<Card>::from(*self) {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl crate::Arbitrary for Hand {
    fn random() -> Self {
        use rand::Rng;
        Self(rand::rng().random::<u64>() & Self::mask())
    }
}

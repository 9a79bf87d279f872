use crate::cards::rank::Rank;

/// Tie-breaking kicker ranks as a 13-bit rank mask.
///
/// Comparing two Kickers as integers compares kickers high-to-low, since
/// higher set bits dominate. Suits are irrelevant for kickers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Kickers(u16);

impl Kickers {
    pub fn none() -> Self {
        Self(0)
    }
}

/// u16 isomorphism
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

/// Vec<Rank> isomorphism
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13)
            .rev()
            .filter(|i| k.0 & (1 << i) != 0)
            .map(|i| Rank::from(i as u8))
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

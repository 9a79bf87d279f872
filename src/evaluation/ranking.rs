use crate::cards::rank::Rank;

/// A hand's category with its defining ranks. Ordered weakest to strongest;
/// ties within a category fall through to kicker comparison.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 0 kickers
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    /// rank-mask of the ranks a kicker may come from, excluding
    /// the ranks the category itself consumed.
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => !(u16::from(hi) | u16::from(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::FourOAK(hi) => !u16::from(hi),
            _ => 0,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "HighCard      {}", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {}", r),
            Ranking::TwoPair(a, b) => write!(f, "TwoPair       {}{}", a, b),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind  {}", r),
            Ranking::Straight(r) => write!(f, "Straight      {}", r),
            Ranking::Flush(r) => write!(f, "Flush         {}", r),
            Ranking::FullHouse(a, b) => write!(f, "FullHouse     {}{}", a, b),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind   {}", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ordering() {
        assert!(Ranking::StraightFlush(Rank::Five) > Ranking::FourOAK(Rank::Ace));
        assert!(Ranking::FourOAK(Rank::Two) > Ranking::FullHouse(Rank::Ace, Rank::King));
        assert!(Ranking::FullHouse(Rank::Two, Rank::Three) > Ranking::Flush(Rank::Ace));
        assert!(Ranking::Flush(Rank::Seven) > Ranking::Straight(Rank::Ace));
        assert!(Ranking::Straight(Rank::Five) > Ranking::ThreeOAK(Rank::Ace));
        assert!(Ranking::ThreeOAK(Rank::Two) > Ranking::TwoPair(Rank::Ace, Rank::King));
        assert!(Ranking::TwoPair(Rank::Three, Rank::Two) > Ranking::OnePair(Rank::Ace));
        assert!(Ranking::OnePair(Rank::Two) > Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn ties_break_by_defining_rank() {
        assert!(Ranking::OnePair(Rank::King) > Ranking::OnePair(Rank::Queen));
        assert!(
            Ranking::TwoPair(Rank::Ace, Rank::Three) > Ranking::TwoPair(Rank::King, Rank::Queen)
        );
    }
}

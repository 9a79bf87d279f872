use super::kicks::Kickers;
use super::ranking::Ranking;
use crate::cards::hand::Hand;
use crate::cards::rank::Rank;
use crate::cards::suit::Suit;

/// ace plays low in the five-high straight
const WHEEL: u16 = 0b1000000001111;

/// Searches a Hand bitset for its best five-card interpretation.
///
/// Categories are probed strongest-first, so the first hit is the hand's
/// Ranking. Works on any 5-7 card Hand directly; no need to enumerate
/// five-card subsets because each probe already considers every subset
/// that could form its category.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}

impl Evaluator {
    pub fn ranking(&self) -> Ranking {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.four_oak())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.three_oak())
            .or_else(|| self.two_pair())
            .or_else(|| self.one_pair())
            .or_else(|| self.high_card())
            .expect("at least one card in hand")
    }

    /// the n highest ranks not consumed by the category itself
    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        match ranking.n_kickers() {
            0 => Kickers::none(),
            n => {
                let mut bits = u16::from(self.0) & ranking.mask();
                while bits.count_ones() as usize > n {
                    bits &= bits - 1;
                }
                Kickers::from(bits)
            }
        }
    }

    fn high_card(&self) -> Option<Ranking> {
        self.rank_of_n(1, None).map(Ranking::HighCard)
    }
    fn one_pair(&self) -> Option<Ranking> {
        self.rank_of_n(2, None).map(Ranking::OnePair)
    }
    fn two_pair(&self) -> Option<Ranking> {
        self.rank_of_n(2, None).and_then(|hi| {
            self.rank_of_n(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
        })
    }
    fn three_oak(&self) -> Option<Ranking> {
        self.rank_of_n(3, None).map(Ranking::ThreeOAK)
    }
    fn straight(&self) -> Option<Ranking> {
        Self::straightness(u16::from(self.0)).map(Ranking::Straight)
    }
    fn flush(&self) -> Option<Ranking> {
        self.flush_suit()
            .map(|suit| Rank::from(u16::from(self.0.of(&suit))))
            .map(Ranking::Flush)
    }
    fn full_house(&self) -> Option<Ranking> {
        self.rank_of_n(3, None).and_then(|triple| {
            self.rank_of_n(2, Some(triple))
                .map(|pair| Ranking::FullHouse(triple, pair))
        })
    }
    fn four_oak(&self) -> Option<Ranking> {
        self.rank_of_n(4, None).map(Ranking::FourOAK)
    }
    fn straight_flush(&self) -> Option<Ranking> {
        self.flush_suit()
            .and_then(|suit| Self::straightness(u16::from(self.0.of(&suit))))
            .map(Ranking::StraightFlush)
    }

    /// how many cards of this rank the hand holds
    fn count(&self, rank: Rank) -> usize {
        let nibble = u64::from(self.0) >> (u8::from(rank) * 4);
        (nibble & 0xF).count_ones() as usize
    }

    /// highest rank held at least n times, optionally skipping one rank
    fn rank_of_n(&self, n: usize, skip: Option<Rank>) -> Option<Rank> {
        Rank::all()
            .iter()
            .rev()
            .filter(|r| Some(**r) != skip)
            .find(|r| self.count(**r) >= n)
            .copied()
    }

    /// suit holding five or more cards, if any
    fn flush_suit(&self) -> Option<Suit> {
        Suit::all()
            .iter()
            .find(|suit| self.0.of(suit).size() >= 5)
            .copied()
    }

    /// five consecutive set bits in a rank mask, wheel included
    fn straightness(ranks: u16) -> Option<Rank> {
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL & ranks == WHEEL {
            Some(Rank::Five)
        } else {
            None
        }
    }
}

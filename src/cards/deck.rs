use super::card::Card;
use super::hand::Hand;
use rand::rngs::SmallRng;
use rand::Rng;

/// The undealt remainder of the 52-card universe. Constructed fresh per
/// simulation trial from the set of known cards; consumed by dealing.
///
/// The deck never owns random state. Every draw takes the caller's RNG so
/// concurrent workers keep independent, uncorrelated streams.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl Deck {
    pub fn new() -> Self {
        Self(Hand::from((1u64 << 52) - 1))
    }

    /// the deck left over after excluding every known card
    pub fn without(known: Hand) -> Self {
        Self(known.complement())
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }

    /// remove and return a uniformly random remaining card
    pub fn draw(&mut self, rng: &mut SmallRng) -> Card {
        assert!(self.0.size() > 0);
        let i = rng.random_range(0..self.0.size());
        let mut bits = u64::from(self.0);
        for _ in 0..i {
            bits &= bits - 1;
        }
        let card = Card::from(bits.trailing_zeros() as u8);
        self.0.remove(card);
        card
    }

    /// remove and return n random cards as a Hand
    pub fn deal(&mut self, n: usize, rng: &mut SmallRng) -> Hand {
        (0..n)
            .map(|_| self.draw(rng))
            .map(Hand::from)
            .fold(Hand::empty(), Hand::add)
    }
}

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

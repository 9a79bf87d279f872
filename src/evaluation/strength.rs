use super::evaluator::Evaluator;
use super::kicks::Kickers;
use super::ranking::Ranking;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::error::EngineError;

/// A hand's comparable showdown value: category first, kickers second.
///
/// The derived total order satisfies the poker ordering: any straight flush
/// beats any four of a kind, which beats any full house, and so on down to
/// high card, with kickers breaking ties inside a category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// validated entry point for caller-supplied card slices.
    /// pure and total over well-formed 5-7 card input; duplicates or a
    /// count outside 5..=7 are InvalidHand.
    pub fn evaluate(cards: &[Card]) -> Result<Self, EngineError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EngineError::InvalidHand(format!(
                "expected 5 to 7 cards, got {}",
                cards.len()
            )));
        }
        let mut hand = Hand::empty();
        for card in cards {
            if hand.contains(card) {
                return Err(EngineError::InvalidHand(format!("duplicate card {}", card)));
            }
            hand = Hand::add(hand, Hand::from(*card));
        }
        Ok(Self::from(hand))
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        let evaluator = Evaluator::from(hand);
        let ranking = evaluator.ranking();
        let kickers = evaluator.kickers(ranking);
        Self { ranking, kickers }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}", self.ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    #[test]
    fn four_oak_beats_any_full_house() {
        assert!(strength("2s 2h 2d 2c 3s") > strength("As Ah Ad Kc Ks"));
    }

    #[test]
    fn full_house_beats_any_flush() {
        assert!(strength("2s 2h 2d 3c 3s") > strength("As Ks Qs Js 9s"));
    }

    #[test]
    fn kickers_break_category_ties() {
        assert!(strength("As Ah Kd Qc Js") > strength("Ad Ac Kh Qs Ts"));
    }

    #[test]
    fn ordering_is_antisymmetric() {
        let a = strength("As Ah Kd Qc Js");
        let b = strength("Ks Kh Ad Qc Js");
        assert!(!(a > b && b > a));
        assert!(a == a);
    }

    #[test]
    fn rejects_wrong_count() {
        let cards: Vec<Card> = Vec::from(Hand::try_from("As Kh").unwrap());
        assert!(matches!(
            Strength::evaluate(&cards),
            Err(EngineError::InvalidHand(_))
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let card = Card::try_from("As").unwrap();
        let mut cards: Vec<Card> = Vec::from(Hand::try_from("Kh Qd Jc 9s").unwrap());
        cards.push(card);
        cards.push(card);
        assert!(matches!(
            Strength::evaluate(&cards),
            Err(EngineError::InvalidHand(_))
        ));
    }
}

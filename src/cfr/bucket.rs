use super::state::GameState;
use crate::cards::street::Street;
use crate::CARD_BUCKETS;
use crate::POSITION_BUCKETS;
use crate::POT_BUCKETS;

/// Abstraction key grouping strategically similar decision points.
///
/// Coordinates are the street, a coarse seat class, a pot-to-stack
/// pressure band, and a hash class over the visible cards. The mapping
/// is pure: two states with equal coordinates share one info set.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Bucket {
    pub street: Street,
    pub position: usize,
    pub pot: usize,
    pub cards: usize,
}

impl From<&GameState> for Bucket {
    fn from(state: &GameState) -> Self {
        Self {
            street: state.street,
            position: state.position % POSITION_BUCKETS,
            pot: Self::pressure(state),
            cards: Self::texture(state),
        }
    }
}

impl Bucket {
    /// pot-to-stack ratio clamped to 3.0, quantized in fifths, then
    /// folded modulo the band count, so the band cycles at each whole
    /// ratio. an empty stack lands in the deepest band.
    fn pressure(state: &GameState) -> usize {
        let ratio = if state.stack > 0.0 {
            (state.pot / state.stack).min(3.0)
        } else {
            3.0
        };
        ((ratio * POT_BUCKETS as f64) as usize).min(POT_BUCKETS * 3 - 1) % POT_BUCKETS
    }

    /// FNV-style fold over the visible cards
    fn texture(state: &GameState) -> usize {
        let mut hash = 0u64;
        for card in state.known() {
            hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
            hash ^= (u8::from(card.rank()) as u64) << 8 | u8::from(card.suit()) as u64;
        }
        (hash % CARD_BUCKETS) as usize
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.street, self.position, self.pot, self.cards
        )
    }
}

impl TryFrom<&str> for Bucket {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut parts = s.split('_');
        let street = parts.next().ok_or_else(|| format!("empty bucket: {}", s))?;
        let street = Street::try_from(street)?;
        let mut field = || {
            parts
                .next()
                .and_then(|p| p.parse::<usize>().ok())
                .ok_or_else(|| format!("malformed bucket: {}", s))
        };
        Ok(Self {
            street,
            position: field()?,
            pot: field()?,
            cards: field()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn identical_states_share_a_bucket() {
        let state = GameState::random();
        assert_eq!(Bucket::from(&state), Bucket::from(&state.clone()));
    }

    #[test]
    fn coordinates_stay_in_range() {
        for _ in 0..200 {
            let bucket = Bucket::from(&GameState::random());
            assert!(bucket.position < POSITION_BUCKETS);
            assert!(bucket.pot < POT_BUCKETS);
            assert!(bucket.cards < CARD_BUCKETS as usize);
        }
    }

    #[test]
    fn pressure_bands_follow_the_ratio() {
        let mut state = GameState::random();
        state.stack = 1_000.0;
        let band = |pot: f64, state: &mut GameState| {
            state.pot = pot;
            Bucket::from(&*state).pot
        };
        assert_eq!(band(10.0, &mut state), 0);
        assert_eq!(band(500.0, &mut state), 2);
        assert_eq!(band(900.0, &mut state), 4);
        // the band cycles at each whole pot-to-stack ratio
        assert_eq!(band(1_000.0, &mut state), 0);
        // the clamp pins everything past ratio 3.0 to the deepest band
        assert_eq!(band(3_000.0, &mut state), 4);
    }

    #[test]
    fn display_round_trips() {
        let bucket = Bucket::from(&GameState::random());
        let text = bucket.to_string();
        assert_eq!(Bucket::try_from(text.as_str()).unwrap(), bucket);
    }
}

use serde::Deserialize;
use serde::Serialize;

/// betting round. the board holds a fixed number of cards on each street.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    Pref = 0,
    Flop = 1,
    Turn = 2,
    Rive = 3,
}

impl Street {
    pub const fn all() -> &'static [Self; 4] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    /// board cards visible on this street
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
}

/// board-size isomorphism: 0, 3, 4, or 5 visible cards
impl TryFrom<usize> for Street {
    type Error = String;
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Self::Pref),
            3 => Ok(Self::Flop),
            4 => Ok(Self::Turn),
            5 => Ok(Self::Rive),
            _ => Err(format!("no street shows {} board cards", n)),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}

impl TryFrom<&str> for Street {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "preflop" => Ok(Self::Pref),
            "flop" => Ok(Self::Flop),
            "turn" => Ok(Self::Turn),
            "river" => Ok(Self::Rive),
            _ => Err(format!("invalid street str: {}", s)),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..4) {
            0 => Self::Pref,
            1 => Self::Flop,
            2 => Self::Turn,
            _ => Self::Rive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_size_round_trip() {
        for street in Street::all() {
            assert_eq!(*street, Street::try_from(street.n_observed()).unwrap());
        }
    }

    #[test]
    fn rejects_impossible_board_sizes() {
        assert!(Street::try_from(1).is_err());
        assert!(Street::try_from(2).is_err());
        assert!(Street::try_from(6).is_err());
    }
}

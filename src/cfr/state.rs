use super::action::Action;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::error::EngineError;
use crate::Arbitrary;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Table format. Tournaments shade the advisory layer toward survival
/// but do not change the abstraction key.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Table {
    #[default]
    Cash,
    Tournament,
}

/// One decision point from hero's perspective.
///
/// This is a flat snapshot rather than a full game tree node. The solver
/// never walks descendants; counterfactual values come from a strength
/// proxy evaluated at this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub street: Street,
    pub hole: Hole,
    pub board: Hand,
    pub pot: Chips,
    pub stack: Chips,
    pub to_call: Chips,
    pub players: usize,
    pub position: usize,
    pub table: Table,
}

impl GameState {
    /// every card hero can see
    pub fn known(&self) -> Hand {
        Hand::add(Hand::from(self.hole), self.board)
    }

    /// actions available at this node. Fold is always legal. checking
    /// requires nothing owed; calling and raising require something owed
    /// and a stack that covers the call.
    pub fn legal(&self) -> Vec<Action> {
        let mut actions = vec![Action::Fold];
        if self.to_call <= 0.0 {
            actions.push(Action::Check);
            if self.stack > 0.0 {
                actions.push(Action::Bet);
            }
        } else if self.stack >= self.to_call {
            actions.push(Action::Call);
            if self.stack > self.to_call {
                actions.push(Action::Raise);
            }
        }
        if self.stack > 0.0 {
            actions.push(Action::AllIn);
        }
        actions
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.pot.is_finite() && self.stack.is_finite() && self.to_call.is_finite()) {
            return Err(EngineError::InvalidGameState(
                "non-finite chip amount".to_string(),
            ));
        }
        if self.pot < 0.0 || self.stack < 0.0 || self.to_call < 0.0 {
            return Err(EngineError::InvalidGameState(
                "negative chip amount".to_string(),
            ));
        }
        // 23 two-card holdings plus a full board exhaust the deck
        if !(2..=23).contains(&self.players) {
            return Err(EngineError::InvalidGameState(format!(
                "{} players at the table",
                self.players
            )));
        }
        if self.position >= self.players {
            return Err(EngineError::InvalidGameState(format!(
                "position {} with {} players",
                self.position, self.players
            )));
        }
        let street = Street::try_from(self.board.size()).map_err(EngineError::InvalidGameState)?;
        if street != self.street {
            return Err(EngineError::InvalidGameState(format!(
                "{} cards on board during the {}",
                self.board.size(),
                self.street
            )));
        }
        if Hand::from(self.hole).intersects(&self.board) {
            return Err(EngineError::InvalidGameState(format!(
                "hole {} overlaps board {}",
                self.hole, self.board
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}] pot {:.0} stack {:.0} owe {:.0} seat {}/{}",
            self.street,
            self.hole,
            self.board,
            self.pot,
            self.stack,
            self.to_call,
            self.position,
            self.players
        )
    }
}

impl Arbitrary for GameState {
    fn random() -> Self {
        use rand::rngs::SmallRng;
        use rand::Rng;
        use rand::SeedableRng;
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        let street = Street::random();
        let mut deck = Deck::new();
        let hole = Hole::from(deck.deal(2, &mut rng));
        let board = deck.deal(street.n_observed(), &mut rng);
        let players = rng.random_range(2..=9);
        let pot = rng.random_range(10..200) as Chips;
        Self {
            street,
            hole,
            board,
            pot,
            stack: rng.random_range(100..2_000) as Chips,
            to_call: if rng.random::<bool>() { 0.0 } else { pot / 4.0 },
            players,
            position: rng.random_range(0..players),
            table: Table::Cash,
        }
    }
}

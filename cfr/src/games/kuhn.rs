use std::fmt::Display;

use anyhow::ensure;
use itertools::Itertools;
use rand::{
    seq::SliceRandom,
    Rng,
};

use super::{
    Game,
    PlayerId,
};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(pub u8);

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum KuhnAction {
    Pass,
    Bet,
}

impl KuhnAction {
    const VALUES: [KuhnAction; 2] = [KuhnAction::Pass, KuhnAction::Bet];

    pub fn symbol(&self) -> char {
        match self {
            KuhnAction::Pass => 'p',
            KuhnAction::Bet => 'b',
        }
    }
}

impl Display for KuhnAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KuhnInfoSet {
    pub card: Card,
    pub history: Vec<KuhnAction>,
}

impl Display for KuhnInfoSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card: {} | History: ", self.card)?;
        if self.history.is_empty() {
            write!(f, "(Start)")
        } else {
            write!(f, "{}", self.history.iter().map(|a| a.symbol()).join(""))
        }
    }
}

/// Kuhn poker over a deck of `deck_size` cards ranked `1..=deck_size`.
/// Both players ante one chip, a bet is one more chip.
#[derive(Debug, Clone)]
pub struct Kuhn {
    deck_size: u8,
}

impl Default for Kuhn {
    fn default() -> Self {
        Self {
            deck_size: 3,
        }
    }
}

impl Kuhn {
    pub fn new(deck_size: u8) -> anyhow::Result<Self> {
        ensure!(deck_size >= 2, "Kuhn poker needs at least 2 cards, got {}", deck_size);
        Ok(Self {
            deck_size,
        })
    }

    fn deck(&self) -> Vec<Card> {
        (1..=self.deck_size).map(Card).collect()
    }
}

impl Game for Kuhn {
    type Private = Card;
    type Action = KuhnAction;
    type Key = KuhnInfoSet;

    fn deal<R: Rng>(&self, rng: &mut R) -> [Card; 2] {
        let mut cards = self.deck();
        cards.shuffle(rng);
        [cards[0], cards[1]]
    }

    fn chance_outcomes(&self) -> Vec<([Card; 2], f64)> {
        let deck = self.deck();
        let n = deck.len() as f64;
        let prob = 1.0 / (n * (n - 1.0));
        deck.iter()
            .cartesian_product(deck.iter())
            .filter(|(a, b)| a != b)
            .map(|(a, b)| ([*a, *b], prob))
            .collect()
    }

    fn legal_actions(&self, _history: &[KuhnAction]) -> Vec<KuhnAction> {
        KuhnAction::VALUES.to_vec()
    }

    fn is_terminal(&self, history: &[KuhnAction]) -> bool {
        matches!(
            history,
            [_, .., KuhnAction::Pass] | [.., KuhnAction::Bet, KuhnAction::Bet]
        )
    }

    fn terminal_utility(&self, privates: &[Card; 2], history: &[KuhnAction]) -> f64 {
        let player = PlayerId::to_act(history.len());
        let higher = privates[player.index()] > privates[player.opponent().index()];
        match history {
            [.., KuhnAction::Bet, KuhnAction::Bet] => {
                if higher {
                    2.0
                } else {
                    -2.0
                }
            }
            [KuhnAction::Pass, KuhnAction::Pass] => {
                if higher {
                    1.0
                } else {
                    -1.0
                }
            }
            // opponent folded
            [_, .., KuhnAction::Pass] => 1.0,
            _ => unreachable!("{:?} is not a terminal history", history),
        }
    }

    fn info_set_key(&self, card: Card, history: &[KuhnAction]) -> KuhnInfoSet {
        KuhnInfoSet {
            card,
            history: history.to_vec(),
        }
    }

    fn describe_info_set(&self, key: &KuhnInfoSet) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use more_asserts::assert_lt;
    use rand::SeedableRng;
    use wyhash::WyRng;

    use super::*;

    const P: KuhnAction = KuhnAction::Pass;
    const B: KuhnAction = KuhnAction::Bet;

    fn all_histories() -> Vec<Vec<KuhnAction>> {
        vec![
            vec![],
            vec![P],
            vec![B],
            vec![P, P],
            vec![P, B],
            vec![B, P],
            vec![B, B],
            vec![P, B, P],
            vec![P, B, B],
        ]
    }

    #[test]
    fn test_terminal_histories() {
        let game = Kuhn::default();
        let terminals: Vec<_> =
            all_histories().into_iter().filter(|h| game.is_terminal(h)).collect();
        assert_eq!(
            vec![vec![P, P], vec![B, P], vec![B, B], vec![P, B, P], vec![P, B, B]],
            terminals
        );
    }

    #[test]
    fn test_payoffs() {
        let game = Kuhn::default();
        let high_first = [Card(3), Card(1)];
        let low_first = [Card(1), Card(3)];

        // showdown after two passes, player 0 to act
        assert_eq!(1.0, game.terminal_utility(&high_first, &[P, P]));
        assert_eq!(-1.0, game.terminal_utility(&low_first, &[P, P]));

        // player 1 folded to a bet, player 0 to act
        assert_eq!(1.0, game.terminal_utility(&low_first, &[B, P]));

        // player 0 folded to a bet, player 1 to act
        assert_eq!(1.0, game.terminal_utility(&high_first, &[P, B, P]));

        // called bets, player 0 to act
        assert_eq!(2.0, game.terminal_utility(&high_first, &[B, B]));
        assert_eq!(-2.0, game.terminal_utility(&low_first, &[B, B]));

        // called bets, player 1 to act
        assert_eq!(-2.0, game.terminal_utility(&high_first, &[P, B, B]));
        assert_eq!(2.0, game.terminal_utility(&low_first, &[P, B, B]));
    }

    #[test]
    fn test_info_set_keys_are_unique() {
        let game = Kuhn::default();
        let mut keys = HashSet::new();
        let mut pairs = 0;
        for card in game.deck() {
            for history in all_histories().iter().filter(|h| !game.is_terminal(h)) {
                keys.insert(game.info_set_key(card, history));
                assert_eq!(game.info_set_key(card, history), game.info_set_key(card, history));
                pairs += 1;
            }
        }
        assert_eq!(12, pairs);
        assert_eq!(pairs, keys.len());
    }

    #[test]
    fn test_chance_outcomes() {
        let game = Kuhn::default();
        let outcomes = game.chance_outcomes();
        assert_eq!(6, outcomes.len());
        let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
        assert_lt!((total - 1.0).abs(), 1e-12);
        assert!(outcomes.iter().all(|(cards, _)| cards[0] != cards[1]));
    }

    #[test]
    fn test_deal_draws_without_replacement() {
        let game = Kuhn::default();
        let mut rng = WyRng::seed_from_u64(7);
        for _ in 0..100 {
            let cards = game.deal(&mut rng);
            assert_ne!(cards[0], cards[1]);
            assert!(game.deck().contains(&cards[0]));
            assert!(game.deck().contains(&cards[1]));
        }
    }

    #[test]
    fn test_rejects_tiny_deck() {
        assert!(Kuhn::new(1).is_err());
        assert!(Kuhn::new(0).is_err());
        assert!(Kuhn::new(13).is_ok());
    }

    #[test]
    fn test_describe() {
        let game = Kuhn::default();
        let start = game.info_set_key(Card(2), &[]);
        assert_eq!("Card: 2 | History: (Start)", game.describe_info_set(&start));
        let facing_bet = game.info_set_key(Card(3), &[P, B]);
        assert_eq!("Card: 3 | History: pb", game.describe_info_set(&facing_bet));
    }
}

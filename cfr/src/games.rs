use std::{
    fmt::{
        Debug,
        Display,
    },
    hash::Hash,
};

use rand::Rng;

pub mod dudo;
pub mod kuhn;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayerId {
    Player0,
    Player1,
}

impl PlayerId {
    /// Player 0 acts on even-length histories, player 1 on odd-length ones.
    pub fn to_act(history_len: usize) -> PlayerId {
        if history_len % 2 == 0 {
            PlayerId::Player0
        } else {
            PlayerId::Player1
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PlayerId::Player0 => 0,
            PlayerId::Player1 => 1,
        }
    }

    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::Player0 => PlayerId::Player1,
            PlayerId::Player1 => PlayerId::Player0,
        }
    }
}

/// Rules of a two-player zero-sum game with sequential actions.
///
/// Chance only acts once, before the first action, by dealing each player a
/// private outcome. Everything after that is a public history of actions, so
/// every method here is a pure function of the deal and the history.
pub trait Game {
    type Private: Copy + Debug;
    type Action: Copy + Eq + Debug + Display;
    type Key: Clone + Debug + Hash + Eq + Ord;

    fn deal<R: Rng>(&self, rng: &mut R) -> [Self::Private; 2];

    /// Every possible deal with its probability.
    fn chance_outcomes(&self) -> Vec<([Self::Private; 2], f64)>;

    fn legal_actions(&self, history: &[Self::Action]) -> Vec<Self::Action>;

    fn is_terminal(&self, history: &[Self::Action]) -> bool;

    /// Payoff of a terminal history, seen from the player who would act next
    /// (the parity of `history.len()`).
    fn terminal_utility(&self, privates: &[Self::Private; 2], history: &[Self::Action]) -> f64;

    fn info_set_key(&self, private: Self::Private, history: &[Self::Action]) -> Self::Key;

    fn describe_info_set(&self, key: &Self::Key) -> String;
}

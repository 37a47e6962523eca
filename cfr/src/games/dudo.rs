use std::fmt::Display;

use anyhow::{
    bail,
    ensure,
};
use itertools::Itertools;
use more_asserts::debug_assert_lt;
use rand::Rng;

use super::Game;

/// Dice in play during the last round: one per player.
const DICE_IN_PLAY: u8 = 2;

/// Widest claim table the key packing supports.
const MAX_CLAIMS: usize = 32;

/// A claim that at least `count` dice show `rank`. Rank 1 is wild.
///
/// `index` is the claim's position in the game's claim table, which is also
/// its strength: a later claim must have a strictly larger index.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Claim {
    pub index: usize,
    pub count: u8,
    pub rank: u8,
}

impl Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.count, self.rank)
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum DudoAction {
    Claim(Claim),
    Dudo,
}

impl Display for DudoAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DudoAction::Claim(c) => write!(f, "{}", c),
            DudoAction::Dudo => write!(f, "Dudo"),
        }
    }
}

/// The last round of Dudo: each player rolls a single die, then players
/// alternate raising claims about both dice until one of them calls "Dudo".
///
/// Information sets are keyed by a packed integer. With `N` claims in the
/// table, bit `a` (`0 <= a < N`) is set when claim `a` appears in the history
/// and the acting player's roll is stored from bit `N` upwards:
///
/// ```text
/// key = roll << N | claimed_mask
/// ```
///
/// Claims in a history are strictly increasing, so the set of claimed bits
/// determines the history.
#[derive(Debug, Clone)]
pub struct Dudo {
    sides: u8,
    claims: Vec<Claim>,
}

impl Default for Dudo {
    fn default() -> Self {
        Self {
            sides: 6,
            claims: Self::standard_claims(6),
        }
    }
}

impl Dudo {
    /// Standard claim ordering: for each count, ranks `2..=sides` then the
    /// wild `1`.
    pub fn new(sides: u8) -> anyhow::Result<Self> {
        ensure!((2..=6).contains(&sides), "a die needs 2..=6 sides, got {}", sides);
        Ok(Self {
            sides,
            claims: Self::standard_claims(sides),
        })
    }

    /// Builds a game from an explicit `(count, rank)` claim table, weakest
    /// claim first.
    pub fn with_claims(sides: u8, table: &[(u8, u8)]) -> anyhow::Result<Self> {
        ensure!((2..=6).contains(&sides), "a die needs 2..=6 sides, got {}", sides);
        ensure!(!table.is_empty(), "claim table is empty");
        ensure!(
            table.len() <= MAX_CLAIMS,
            "claim table has {} claims, at most {} are supported",
            table.len(),
            MAX_CLAIMS
        );

        let mut claims = Vec::with_capacity(table.len());
        for (index, &(count, rank)) in table.iter().enumerate() {
            if !(1..=DICE_IN_PLAY).contains(&count) {
                bail!(
                    "claim #{} ({}x{}): count must be in 1..={}",
                    index,
                    count,
                    rank,
                    DICE_IN_PLAY
                );
            }
            if !(1..=sides).contains(&rank) {
                bail!("claim #{} ({}x{}): rank must be in 1..={}", index, count, rank, sides);
            }
            if claims.iter().any(|c: &Claim| c.count == count && c.rank == rank) {
                bail!("claim #{} ({}x{}) appears twice", index, count, rank);
            }
            claims.push(Claim {
                index,
                count,
                rank,
            });
        }
        Ok(Self {
            sides,
            claims,
        })
    }

    fn standard_claims(sides: u8) -> Vec<Claim> {
        (1..=DICE_IN_PLAY)
            .flat_map(|count| (2..=sides).chain(1..=1).map(move |rank| (count, rank)))
            .enumerate()
            .map(|(index, (count, rank))| Claim {
                index,
                count,
                rank,
            })
            .collect()
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    fn last_claim(history: &[DudoAction]) -> Option<Claim> {
        history.iter().rev().find_map(|a| match a {
            DudoAction::Claim(c) => Some(*c),
            DudoAction::Dudo => None,
        })
    }

    fn count_matches(rolls: &[u8; 2], rank: u8) -> u8 {
        rolls.iter().filter(|&&d| d == rank || d == 1).count() as u8
    }
}

impl Game for Dudo {
    type Private = u8;
    type Action = DudoAction;
    type Key = u64;

    fn deal<R: Rng>(&self, rng: &mut R) -> [u8; 2] {
        [rng.gen_range(1..=self.sides), rng.gen_range(1..=self.sides)]
    }

    fn chance_outcomes(&self) -> Vec<([u8; 2], f64)> {
        let prob = 1.0 / (self.sides as f64 * self.sides as f64);
        (1..=self.sides)
            .cartesian_product(1..=self.sides)
            .map(|(a, b)| ([a, b], prob))
            .collect()
    }

    fn legal_actions(&self, history: &[DudoAction]) -> Vec<DudoAction> {
        let first = match Self::last_claim(history) {
            Some(c) => c.index + 1,
            None => 0,
        };
        let mut actions: Vec<DudoAction> =
            self.claims[first..].iter().map(|c| DudoAction::Claim(*c)).collect();
        if !history.is_empty() {
            actions.push(DudoAction::Dudo);
        }
        actions
    }

    fn is_terminal(&self, history: &[DudoAction]) -> bool {
        history.last() == Some(&DudoAction::Dudo)
    }

    fn terminal_utility(&self, rolls: &[u8; 2], history: &[DudoAction]) -> f64 {
        // The challenged claim was made two plies before the player to act,
        // so the claimant is the player to act.
        let claim = match history {
            [.., DudoAction::Claim(c), DudoAction::Dudo] => *c,
            _ => unreachable!("{:?} is not a terminal history", history),
        };
        if Self::count_matches(rolls, claim.rank) >= claim.count {
            1.0
        } else {
            -1.0
        }
    }

    fn info_set_key(&self, roll: u8, history: &[DudoAction]) -> u64 {
        let mut key = roll as u64;
        let mut mask = 0u64;
        for action in history {
            if let DudoAction::Claim(c) = action {
                debug_assert_lt!(c.index, self.claims.len());
                mask |= 1u64 << c.index;
            }
        }
        key <<= self.claims.len();
        key | mask
    }

    fn describe_info_set(&self, key: &u64) -> String {
        let width = self.claims.len();
        let roll = key >> width;
        let history = self
            .claims
            .iter()
            .filter(|c| (key >> c.index) & 1 == 1)
            .map(|c| format!("{}*{}", c.count, c.rank))
            .join(",");
        if history.is_empty() {
            format!("Roll: {} | History: (Start)", roll)
        } else {
            format!("Roll: {} | History: {}", roll, history)
        }
    }
}

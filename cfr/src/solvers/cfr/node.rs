use std::fmt::Display;

use crate::{
    games::Game,
    regret,
};

/// Accumulated regrets and strategy mass of one information set.
pub struct Node<G>
where
    G: Game,
{
    regret_sum: Vec<f64>,
    strategy_sum: Vec<f64>,

    actions: Vec<G::Action>,
}

impl<G> Node<G>
where
    G: Game,
{
    pub fn new(actions: Vec<G::Action>) -> Self {
        Self {
            regret_sum: vec![0.0; actions.len()],
            strategy_sum: vec![0.0; actions.len()],

            actions,
        }
    }

    pub fn get_actions(&self) -> &[G::Action] {
        &self.actions
    }

    pub fn regret_sum(&self) -> &[f64] {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &[f64] {
        &self.strategy_sum
    }

    /// Computes the current strategy and adds it to the strategy sum,
    /// weighted by the acting player's reach probability.
    pub fn regret_matching(&mut self, realization_weight: f64) -> Vec<f64> {
        let strategy = regret::regret_matching(&self.regret_sum);
        regret::accumulate(&mut self.strategy_sum, &strategy, realization_weight);
        strategy
    }

    pub fn add_regret_sum(&mut self, action_index: usize, regret: f64, opponent_prob: f64) {
        self.regret_sum[action_index] += opponent_prob * regret;
    }

    pub fn to_average_strategy(&self) -> Vec<f64> {
        regret::normalize(&self.strategy_sum)
    }
}

impl<G> Display for Node<G>
where
    G: Game,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let avg_strategy = self.to_average_strategy();

        write!(f, "Avg Strategy[")?;
        for (i, act) in self.actions.iter().enumerate() {
            write!(f, "{}: {:.03}, ", act, avg_strategy[i])?;
        }
        write!(f, "]")?;

        write!(f, " Regret[")?;
        for (i, regret) in self.regret_sum.iter().enumerate() {
            write!(f, "{}: {:.03}, ", self.actions[i], regret)?;
        }
        write!(f, "]")
    }
}

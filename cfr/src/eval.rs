use log::debug;

use crate::{
    games::{
        Game,
        PlayerId,
    },
    profile::StrategyProfile,
};

/// Exact expected payoff to player 0 when both players follow `profile`.
///
/// Information sets missing from the profile are played uniformly.
pub fn expected_value<G: Game>(game: &G, profile: &StrategyProfile<G>) -> f64 {
    let mut history = vec![];
    let value: f64 = game
        .chance_outcomes()
        .iter()
        .map(|(privates, prob)| prob * walk(game, profile, privates, &mut history))
        .sum();
    debug!("expected value of the profile: {}", value);
    value
}

// Value of `history` for the player to act there.
fn walk<G: Game>(
    game: &G,
    profile: &StrategyProfile<G>,
    privates: &[G::Private; 2],
    history: &mut Vec<G::Action>,
) -> f64 {
    if game.is_terminal(history) {
        return game.terminal_utility(privates, history);
    }

    let player = PlayerId::to_act(history.len());
    let key = game.info_set_key(privates[player.index()], history);
    let actions = game.legal_actions(history);
    let strategy = match profile.get(&key) {
        Some(entry) => {
            debug_assert_eq!(entry.actions, actions);
            entry.probabilities.clone()
        }
        None => vec![1.0 / actions.len() as f64; actions.len()],
    };

    let mut value = 0.0;
    for (act, prob) in actions.iter().zip(strategy) {
        if prob == 0.0 {
            continue;
        }
        history.push(*act);
        value -= prob * walk(game, profile, privates, history);
        history.pop();
    }
    value
}

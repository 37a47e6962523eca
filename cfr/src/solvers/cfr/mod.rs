pub mod node;

use std::{
    collections::HashMap,
    path::PathBuf,
    time::{
        Duration,
        Instant,
    },
};

use anyhow::ensure;
use clap::{
    Args,
    ValueHint,
};
use log::{
    debug,
    info,
    log_enabled,
    Level,
};
use more_asserts::assert_gt;
use rand::SeedableRng;
use wyhash::WyRng;

use crate::{
    games::{
        Game,
        PlayerId,
    },
    profile::StrategyProfile,
};
use node::Node;

#[derive(Args)]
pub struct TrainingArgs {
    #[clap(long, short, value_parser, default_value_t = 1000)]
    pub iterations: usize,

    #[clap(long, short, value_parser, default_value_t = 42)]
    pub seed: u64,

    /// Where to write the average strategy report.
    #[clap(long, short, value_parser, value_hint(ValueHint::FilePath))]
    pub output: Option<PathBuf>,
}

/// Chance-sampling CFR.
///
/// Every iteration deals private information once and then walks the whole
/// action tree below that deal.
pub struct Trainer<G>
where
    G: Game,
{
    game: G,
    nodes: HashMap<G::Key, Node<G>>,
    rng: WyRng,
}

impl<G> Trainer<G>
where
    G: Game,
{
    pub fn new(game: G, seed: u64) -> Self {
        Trainer {
            game,
            nodes: HashMap::new(),
            rng: WyRng::seed_from_u64(seed),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn nodes(&self) -> &HashMap<G::Key, Node<G>> {
        &self.nodes
    }

    pub fn node(&self, info_set: &G::Key) -> Option<&Node<G>> {
        self.nodes.get(info_set)
    }

    /// Returns the utility of `history` for the player to act there.
    ///
    /// `history` is pushed to and popped from while descending, and is back to
    /// its original length whenever this returns.
    pub fn cfr(
        &mut self,
        privates: &[G::Private; 2],
        history: &mut Vec<G::Action>,
        actions_prob: [f64; 2],
    ) -> f64 {
        if self.game.is_terminal(history) {
            return self.game.terminal_utility(privates, history);
        }

        let player = PlayerId::to_act(history.len());
        let opponent = player.opponent();

        let info_set = self.game.info_set_key(privates[player.index()], history);
        let game = &self.game;
        let node = self.nodes.entry(info_set.clone()).or_insert_with(|| {
            let actions = game.legal_actions(history);
            debug!("new info set {:?}: {} actions", info_set, actions.len());
            Node::new(actions)
        });

        let actions = node.get_actions().to_vec();
        assert_gt!(actions.len(), 0);

        let realization_weight = actions_prob[player.index()];
        let strategy = node.regret_matching(realization_weight);

        let mut node_util = 0.0;
        let mut action_utils = vec![0.0; actions.len()];
        for (i, act) in actions.iter().enumerate() {
            let mut next_actions_prob = actions_prob;
            next_actions_prob[player.index()] *= strategy[i];

            history.push(*act);
            // The child's utility is seen from the opponent's side.
            action_utils[i] = -self.cfr(privates, history, next_actions_prob);
            history.pop();

            node_util += strategy[i] * action_utils[i];
        }

        let opponent_prob = actions_prob[opponent.index()];
        let node = self.nodes.get_mut(&info_set).expect("info set is inserted above");
        for (i, action_util) in action_utils.iter().enumerate() {
            node.add_regret_sum(i, action_util - node_util, opponent_prob);
        }

        node_util
    }

    /// Runs `iterations` tree walks and returns the average value of the game
    /// for player 0 over them.
    pub fn train(&mut self, iterations: usize) -> anyhow::Result<f64> {
        ensure!(iterations > 0, "the number of iterations must be positive");

        let mut util = 0.0;
        let mut history = Vec::new();
        let mut timer = Instant::now();
        for i in 0..iterations {
            let privates = self.game.deal(&mut self.rng);
            util += self.cfr(&privates, &mut history, [1.0, 1.0]);
            debug_assert!(history.is_empty());

            if timer.elapsed() > Duration::from_secs(5) {
                info!(
                    "epoch {:10}: average game value: {}, # of infoset: {}",
                    i,
                    util / (i + 1) as f64,
                    self.nodes.len()
                );
                timer = Instant::now();
            }
        }
        let game_value = util / iterations as f64;
        info!("Training has finished");

        if log_enabled!(Level::Debug) {
            let mut nodes: Vec<_> = self.nodes.iter().collect();
            nodes.sort_by(|a, b| a.0.cmp(b.0));
            for (info_set, node) in nodes {
                debug!("    {}: {}", self.game.describe_info_set(info_set), node);
            }
        }
        info!("# of infoset: {}", self.nodes.len());
        info!("Average game value: {}", game_value);

        Ok(game_value)
    }

    pub fn average_strategy(&self) -> StrategyProfile<G> {
        StrategyProfile::from_nodes(&self.nodes)
    }
}

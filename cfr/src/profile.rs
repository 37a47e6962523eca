use std::collections::HashMap;

use crate::{
    games::Game,
    solvers::cfr::node::Node,
};

/// Average strategy at one information set.
pub struct InfoSetStrategy<G>
where
    G: Game,
{
    pub key: G::Key,
    pub actions: Vec<G::Action>,
    pub probabilities: Vec<f64>,
}

/// Average strategies of every information set, sorted by key.
pub struct StrategyProfile<G>
where
    G: Game,
{
    entries: Vec<InfoSetStrategy<G>>,
}

impl<G> StrategyProfile<G>
where
    G: Game,
{
    pub fn from_nodes(nodes: &HashMap<G::Key, Node<G>>) -> Self {
        let mut entries: Vec<InfoSetStrategy<G>> = nodes
            .iter()
            .map(|(key, node)| InfoSetStrategy {
                key: key.clone(),
                actions: node.get_actions().to_vec(),
                probabilities: node.to_average_strategy(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Self {
            entries,
        }
    }

    pub fn entries(&self) -> &[InfoSetStrategy<G>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &G::Key) -> Option<&InfoSetStrategy<G>> {
        self.entries.binary_search_by(|e| e.key.cmp(key)).ok().map(|i| &self.entries[i])
    }

    pub fn probability(&self, key: &G::Key, action: G::Action) -> Option<f64> {
        let entry = self.get(key)?;
        let index = entry.actions.iter().position(|a| *a == action)?;
        Some(entry.probabilities[index])
    }
}

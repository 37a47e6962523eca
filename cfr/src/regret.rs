use more_asserts::debug_assert_ge;

/// Regret matching: plays each action in proportion to its positive
/// cumulative regret, or uniformly when no action has positive regret.
pub fn regret_matching(regret_sum: &[f64]) -> Vec<f64> {
    let actions_len = regret_sum.len();
    let normalizing_sum: f64 = regret_sum.iter().map(|r| r.max(0.0)).sum();
    if normalizing_sum > 0.0 {
        regret_sum.iter().map(|r| r.max(0.0) / normalizing_sum).collect()
    } else {
        vec![1.0 / actions_len as f64; actions_len]
    }
}

/// Adds `weight * strategy` into `strategy_sum`. `weight` is the acting
/// player's own reach probability.
pub fn accumulate(strategy_sum: &mut [f64], strategy: &[f64], weight: f64) {
    debug_assert_eq!(strategy_sum.len(), strategy.len());
    debug_assert_ge!(weight, 0.0);
    for (sum, prob) in strategy_sum.iter_mut().zip(strategy) {
        debug_assert_ge!(*prob, 0.0);
        *sum += weight * prob;
    }
}

/// Normalizes accumulated strategy mass into a distribution. An all-zero sum
/// degrades to uniform.
pub fn normalize(strategy_sum: &[f64]) -> Vec<f64> {
    let actions_len = strategy_sum.len();
    let normalizing_sum: f64 = strategy_sum.iter().sum();
    if normalizing_sum > 0.0 {
        strategy_sum.iter().map(|s| s / normalizing_sum).collect()
    } else {
        vec![1.0 / actions_len as f64; actions_len]
    }
}

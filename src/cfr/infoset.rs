//! Information sets and the table that holds them.
//!
//! An [`InfoSet`] accumulates, per legal action:
//! - **Regret sum**: cumulative counterfactual regret (signed, never clamped)
//! - **Strategy sum**: cumulative reach-weighted strategy (non-negative)
//!
//! The action set is fixed when the info set is created; regrets and
//! strategy sums are parallel vectors indexed like the action list, so their
//! key set always equals the action set.
//!
//! [`InfoSetTable`] is owned by a single solver and mutated sequentially,
//! one traversal at a time, so it needs no locking.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cfr::action::Action;
use crate::cfr::error::SolverError;

/// Per-decision-point regret and strategy accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoSet {
    key: String,
    actions: Vec<Action>,
    regret_sum: Vec<f64>,
    strategy_sum: Vec<f64>,
}

impl InfoSet {
    /// Create an info set with zeroed accumulators.
    pub fn new(key: impl Into<String>, actions: Vec<Action>) -> Self {
        let n = actions.len();
        Self {
            key: key.into(),
            actions,
            regret_sum: vec![0.0; n],
            strategy_sum: vec![0.0; n],
        }
    }

    /// Information-set key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The fixed action set, in the order the rules produced it.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Cumulative regrets, indexed like [`actions`](Self::actions).
    pub fn regret_sum(&self) -> &[f64] {
        &self.regret_sum
    }

    /// Cumulative strategy weights, indexed like [`actions`](Self::actions).
    pub fn strategy_sum(&self) -> &[f64] {
        &self.strategy_sum
    }

    /// Index of an action in the action set.
    pub fn action_index(&self, action: &Action) -> Option<usize> {
        self.actions.iter().position(|a| a == action)
    }

    /// Current strategy by regret matching.
    ///
    /// Proportional to positive regrets; uniform when no regret is positive.
    pub fn current_strategy(&self) -> Vec<f64> {
        let positive: Vec<f64> = self.regret_sum.iter().map(|&r| r.max(0.0)).collect();
        let sum: f64 = positive.iter().sum();

        if sum > 0.0 {
            positive.iter().map(|&x| x / sum).collect()
        } else {
            self.uniform()
        }
    }

    /// Average strategy: normalized strategy sums, uniform when all are zero.
    ///
    /// This, not the current strategy, approximates the equilibrium.
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&x| x / total).collect()
        } else {
            self.uniform()
        }
    }

    /// Average strategy keyed by action key.
    pub fn average_strategy_map(&self) -> BTreeMap<String, f64> {
        self.actions
            .iter()
            .map(Action::key)
            .zip(self.average_strategy())
            .collect()
    }

    /// Accumulate regret for one action.
    #[inline]
    pub fn add_to_regret_sum(&mut self, index: usize, delta: f64) {
        self.regret_sum[index] += delta;
    }

    /// Accumulate strategy weight for one action.
    #[inline]
    pub fn add_to_strategy_sum(&mut self, index: usize, delta: f64) {
        self.strategy_sum[index] += delta;
    }

    /// Accumulate regret deltas for every action.
    pub fn add_regrets(&mut self, deltas: &[f64]) {
        debug_assert_eq!(deltas.len(), self.regret_sum.len());
        for (sum, &delta) in self.regret_sum.iter_mut().zip(deltas) {
            *sum += delta;
        }
    }

    /// Accumulate `weight * strategy` into the strategy sums.
    pub fn add_strategy(&mut self, strategy: &[f64], weight: f64) {
        debug_assert_eq!(strategy.len(), self.strategy_sum.len());
        for (sum, &prob) in self.strategy_sum.iter_mut().zip(strategy) {
            *sum += prob * weight;
        }
    }

    fn uniform(&self) -> Vec<f64> {
        let n = self.actions.len();
        if n == 0 {
            return Vec::new();
        }
        vec![1.0 / n as f64; n]
    }
}

/// One row of a strategy report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRecord {
    /// Information-set key.
    pub key: String,
    /// Action keys.
    pub actions: Vec<String>,
    /// Average strategy, aligned with `actions`.
    pub average: Vec<f64>,
}

/// Snapshot of average strategies, for measuring drift between two points
/// of a training run.
#[derive(Debug, Clone, Default)]
pub struct StrategySnapshot {
    strategies: FxHashMap<String, Vec<f64>>,
}

impl StrategySnapshot {
    /// Number of info sets captured.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// All info sets of one training run, keyed by information-set key.
#[derive(Debug, Clone, Default)]
pub struct InfoSetTable {
    sets: FxHashMap<String, InfoSet>,
}

impl InfoSetTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Fetch the info set for `key`, creating it from `actions` on first
    /// visit.
    ///
    /// Creation rejects `Unknown` actions; later visits must offer the same
    /// actions in the same order.
    pub fn get_or_create(
        &mut self,
        key: &str,
        actions: &[Action],
    ) -> Result<&mut InfoSet, SolverError> {
        if !self.sets.contains_key(key) {
            if let Some(bad) = actions.iter().find(|a| !a.is_valid()) {
                return Err(SolverError::InvalidAction(bad.key()));
            }
            self.sets
                .insert(key.to_string(), InfoSet::new(key, actions.to_vec()));
        }

        let info_set = self
            .sets
            .get_mut(key)
            .ok_or_else(|| SolverError::InvalidAction(key.to_string()))?;

        if info_set.actions() != actions {
            return Err(SolverError::ActionSetMismatch {
                key: key.to_string(),
                expected: info_set.num_actions(),
                found: actions.len(),
            });
        }
        Ok(info_set)
    }

    /// Get an info set.
    pub fn get(&self, key: &str) -> Option<&InfoSet> {
        self.sets.get(key)
    }

    /// Get an info set mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut InfoSet> {
        self.sets.get_mut(key)
    }

    /// Check if an info set exists.
    pub fn contains(&self, key: &str) -> bool {
        self.sets.contains_key(key)
    }

    /// Number of info sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate over all info sets (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &InfoSet> {
        self.sets.values()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sets.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Average strategy for `key`, if the info set exists.
    pub fn average_strategy(&self, key: &str) -> Option<Vec<f64>> {
        self.sets.get(key).map(InfoSet::average_strategy)
    }

    /// Clear all stored data.
    pub fn clear(&mut self) {
        self.sets.clear();
    }

    /// Key-sorted average strategies of every info set.
    pub fn report(&self) -> Vec<StrategyRecord> {
        let mut records: Vec<StrategyRecord> = self
            .sets
            .values()
            .map(|set| StrategyRecord {
                key: set.key().to_string(),
                actions: set.actions().iter().map(Action::key).collect(),
                average: set.average_strategy(),
            })
            .collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        records
    }

    /// Capture the current average strategies.
    pub fn snapshot(&self) -> StrategySnapshot {
        StrategySnapshot {
            strategies: self
                .sets
                .iter()
                .map(|(key, set)| (key.clone(), set.average_strategy()))
                .collect(),
        }
    }

    /// Mean L1 change of the average strategy since `snapshot`.
    ///
    /// Info sets created after the snapshot are compared against uniform.
    /// Each info set contributes at most 2.0. Returns infinity when there is
    /// nothing to compare.
    pub fn drift(&self, snapshot: &StrategySnapshot) -> f64 {
        if self.sets.is_empty() {
            return f64::INFINITY;
        }

        let total: f64 = self
            .sets
            .iter()
            .map(|(key, set)| {
                let current = set.average_strategy();
                let before = snapshot
                    .strategies
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| set.uniform());
                current
                    .iter()
                    .zip(before.iter())
                    .map(|(&new, &old)| (new - old).abs())
                    .sum::<f64>()
            })
            .sum();

        total / self.sets.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn two_actions() -> Vec<Action> {
        vec![Action::check(0), Action::bet(0, 1.0)]
    }

    fn three_actions() -> Vec<Action> {
        vec![Action::fold(1), Action::call(1), Action::raise(1, 2.0)]
    }

    fn assert_distribution(probs: &[f64]) {
        assert!(probs.iter().all(|&p| p >= 0.0), "negative probability in {:?}", probs);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum {} != 1", sum);
    }

    #[test]
    fn test_regret_matching_uniform_when_zero() {
        let set = InfoSet::new("k", three_actions());
        let strategy = set.current_strategy();
        assert_distribution(&strategy);
        assert!(strategy.iter().all(|&p| (p - 1.0 / 3.0).abs() < EPS));
    }

    #[test]
    fn test_regret_matching_uniform_when_all_negative() {
        let mut set = InfoSet::new("k", three_actions());
        set.add_regrets(&[-1.0, -5.0, -0.1]);
        let strategy = set.current_strategy();
        assert_distribution(&strategy);
        assert!(strategy.iter().all(|&p| (p - 1.0 / 3.0).abs() < EPS));
    }

    #[test]
    fn test_regret_matching_proportional() {
        let mut set = InfoSet::new("k", three_actions());
        set.add_regrets(&[3.0, -2.0, 1.0]);
        let strategy = set.current_strategy();
        assert_distribution(&strategy);
        assert!((strategy[0] - 0.75).abs() < EPS);
        assert_eq!(strategy[1], 0.0);
        assert!((strategy[2] - 0.25).abs() < EPS);
    }

    #[test]
    fn test_regret_matching_many_configurations() {
        let mut set = InfoSet::new("k", three_actions());
        let deltas = [0.7, -1.3, 2.9, -0.4, 0.0, -3.3, 1.1];
        for (i, &d) in deltas.iter().cycle().take(60).enumerate() {
            set.add_to_regret_sum(i % 3, d * (i as f64 - 20.0));
            assert_distribution(&set.current_strategy());
        }
    }

    #[test]
    fn test_regret_can_recover() {
        let mut set = InfoSet::new("k", two_actions());
        set.add_to_regret_sum(1, -4.0);
        assert_eq!(set.regret_sum()[1], -4.0);
        set.add_to_regret_sum(1, 6.0);
        assert_eq!(set.current_strategy(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_average_strategy() {
        let mut set = InfoSet::new("k", three_actions());
        assert_distribution(&set.average_strategy());

        set.add_strategy(&[0.5, 0.5, 0.0], 2.0);
        set.add_to_strategy_sum(2, 2.0);
        let avg = set.average_strategy();
        assert_distribution(&avg);
        // Sums are [1, 1, 2].
        assert!((avg[0] - 0.25).abs() < EPS);
        assert!((avg[1] - 0.25).abs() < EPS);
        assert!((avg[2] - 0.5).abs() < EPS);

        let map = set.average_strategy_map();
        assert!((map["P1:Raise:2.00"] - 0.5).abs() < EPS);
    }

    #[test]
    fn test_table_creates_lazily() {
        let mut table = InfoSetTable::new();
        assert!(!table.contains("a"));
        table.get_or_create("a", &two_actions()).unwrap().add_to_regret_sum(0, 1.0);
        let set = table.get_or_create("a", &two_actions()).unwrap();
        assert_eq!(set.regret_sum()[0], 1.0);
        assert_eq!(set.action_index(&Action::bet(0, 1.0)), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_rejects_changed_action_set() {
        let mut table = InfoSetTable::new();
        table.get_or_create("a", &two_actions()).unwrap();
        match table.get_or_create("a", &three_actions()) {
            Err(SolverError::ActionSetMismatch { expected, found, .. }) => {
                assert_eq!((expected, found), (2, 3));
            }
            other => panic!("expected mismatch, got {:?}", other.map(|s| s.key().to_string())),
        }
    }

    #[test]
    fn test_table_rejects_same_count_different_actions() {
        let mut table = InfoSetTable::new();
        table.get_or_create("a", &two_actions()).unwrap();
        let facing_bet = vec![Action::fold(0), Action::call(0)];
        match table.get_or_create("a", &facing_bet) {
            Err(SolverError::ActionSetMismatch { key, expected, found }) => {
                assert_eq!(key, "a");
                assert_eq!((expected, found), (2, 2));
            }
            other => panic!("expected mismatch, got {:?}", other.map(|s| s.key().to_string())),
        }
        assert_eq!(table.get("a").unwrap().actions(), two_actions().as_slice());
    }

    #[test]
    fn test_table_rejects_unknown_actions() {
        let mut table = InfoSetTable::new();
        let actions = vec![Action::check(0), Action::parse("P0:Dance")];
        assert!(matches!(
            table.get_or_create("a", &actions),
            Err(SolverError::InvalidAction(_))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_drift() {
        let mut table = InfoSetTable::new();
        table.get_or_create("a", &two_actions()).unwrap().add_strategy(&[1.0, 0.0], 1.0);
        let snapshot = table.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(table.drift(&snapshot), 0.0);

        table.get_or_create("a", &two_actions()).unwrap().add_strategy(&[0.0, 1.0], 1.0);
        // [1, 0] -> [0.5, 0.5]
        assert!((table.drift(&snapshot) - 1.0).abs() < EPS);

        assert_eq!(InfoSetTable::new().drift(&snapshot), f64::INFINITY);
    }

    #[test]
    fn test_report_sorted() {
        let mut table = InfoSetTable::new();
        table.get_or_create("b", &two_actions()).unwrap();
        table.get_or_create("a", &three_actions()).unwrap();
        let report = table.report();
        assert_eq!(report[0].key, "a");
        assert_eq!(report[1].actions, vec!["P0:Check", "P0:Bet:1.00"]);
        assert_eq!(table.keys(), vec!["a", "b"]);
    }
}

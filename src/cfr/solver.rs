//! Counterfactual Regret Minimization (CFR) solver.
//!
//! This module implements two traversal estimators over the same info-set
//! table:
//! - **Vanilla**: chance sampled uniformly (no importance weighting), the
//!   target player explores every action, opponents are sampled from their
//!   current strategy
//! - **Outcome sampling**: one trajectory per iteration, chance and opponent
//!   probabilities folded into the reach and sample weights, epsilon
//!   exploration on the target player's own nodes
//!
//! The solver is generic over any game that implements the `Game` trait.
//! Each iteration targets one player, rotating round-robin on the global
//! iteration counter.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfr::config::{CFRConfig, CFRStats, TraversalMode};
use crate::cfr::error::SolverError;
use crate::cfr::game::Game;
use crate::cfr::history::History;
use crate::cfr::infoset::{InfoSetTable, StrategyRecord};

/// The main CFR solver.
///
/// This struct owns the game rules, the info-set table and the random
/// source. The table is mutated by one traversal at a time.
///
/// # Type Parameters
/// - `G`: The game type implementing the `Game` trait
///
/// # Example
/// ```
/// use cfr_poker::cfr::{CFRConfig, CFRSolver, Game};
/// use cfr_poker::games::kuhn::KuhnPoker;
///
/// let game = KuhnPoker::new();
/// let root = game.initial_history();
/// let mut solver = CFRSolver::new(game, CFRConfig::default().with_seed(1)).unwrap();
///
/// let stats = solver.train(1_000, &root).unwrap();
/// assert_eq!(stats.iterations, 1_000);
/// assert_eq!(solver.num_info_sets(), 12);
/// ```
pub struct CFRSolver<G: Game> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: CFRConfig,

    /// Regrets and strategy sums per information set.
    table: InfoSetTable,

    /// Iterations completed, across all `train` calls.
    iteration: u64,

    /// Statistics tracking.
    stats: CFRStats,

    /// Random number generator.
    rng: StdRng,
}

impl<G: Game> CFRSolver<G> {
    /// Create a new CFR solver for the given game.
    ///
    /// # Arguments
    /// * `game` - The game to solve
    /// * `config` - Configuration options for the solver
    pub fn new(game: G, config: CFRConfig) -> Result<Self, SolverError> {
        Self::with_capacity(game, config, 0)
    }

    /// Create a solver with a pre-allocated info-set table.
    ///
    /// Use this when you have an estimate of how many info sets the game has
    /// to avoid reallocations during training.
    pub fn with_capacity(game: G, config: CFRConfig, capacity: usize) -> Result<Self, SolverError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            game,
            config,
            table: InfoSetTable::with_capacity(capacity),
            iteration: 0,
            stats: CFRStats::new(),
            rng,
        })
    }

    /// Player targeted by the next iteration.
    pub fn next_traverser(&self) -> usize {
        let players = self.game.num_players().max(1) as u64;
        (self.iteration % players) as usize
    }

    /// Run a single iteration from a fresh copy of `root`.
    ///
    /// Returns the traversal value for the targeted player.
    pub fn run_iteration(&mut self, root: &History) -> Result<f64, SolverError> {
        let traverser = self.next_traverser();
        self.iteration += 1;

        let history = root.clone();
        let value = match self.config.mode {
            TraversalMode::Vanilla => self.vanilla_traverse(&history, traverser, 1.0)?,
            TraversalMode::OutcomeSampling => {
                self.outcome_traverse(&history, traverser, 1.0, 1.0, 1.0)?.0
            }
        };

        self.stats.last_value = value;
        Ok(value)
    }

    /// Train the solver for a specified number of iterations.
    ///
    /// There is no convergence check; the first error aborts the run.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `root` - History every iteration starts from
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, iterations: u64, root: &History) -> Result<&CFRStats, SolverError> {
        self.train_with_callback(iterations, root, 0, |_, _| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `root` - History every iteration starts from
    /// * `callback_interval` - How often to call the callback (0 = never)
    /// * `callback` - Function called every `callback_interval` iterations
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        root: &History,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&CFRStats, SolverError>
    where
        F: FnMut(&CFRStats, &InfoSetTable),
    {
        log::info!(
            "training {} iterations ({:?}, starting at iteration {})",
            iterations,
            self.config.mode,
            self.iteration
        );

        let start_time = Instant::now();
        let elapsed_before = self.stats.elapsed_seconds;

        for i in 0..iterations {
            self.run_iteration(root)?;

            if callback_interval > 0 && (i + 1) % callback_interval == 0 {
                self.refresh_stats(elapsed_before, start_time);
                callback(&self.stats, &self.table);
            }
        }

        self.refresh_stats(elapsed_before, start_time);
        log::info!(
            "finished: {} iterations, {} info sets, {:.0} it/s",
            self.stats.iterations,
            self.stats.info_sets,
            self.stats.iterations_per_second
        );

        Ok(&self.stats)
    }

    fn refresh_stats(&mut self, elapsed_before: f64, start_time: Instant) {
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.table.len();
        self.stats.elapsed_seconds = elapsed_before + start_time.elapsed().as_secs_f64();
        self.stats.update_rate();
    }

    /// Vanilla traversal.
    ///
    /// Chance picks one deal uniformly and its value is used unweighted. The
    /// traverser's nodes are expanded full-width and updated; opponents are
    /// sampled and never mutated. `reach_own` only matters when the average
    /// strategy is reach-weighted.
    fn vanilla_traverse(
        &mut self,
        history: &History,
        traverser: usize,
        reach_own: f64,
    ) -> Result<f64, SolverError> {
        if self.game.is_terminal(history) {
            return self.terminal_value(history, traverser);
        }

        if !history.has_dealt() {
            let (deal, _) = self.sample_deal(history)?;
            return self.vanilla_traverse(&deal, traverser, reach_own);
        }

        let player = self.game.current_player(history);
        let actions = self.game.available_actions(history);
        if actions.is_empty() {
            return Ok(0.0);
        }

        let key = self.game.info_set_key(history, player);
        let strategy = self.table.get_or_create(&key, &actions)?.current_strategy();

        if player != traverser {
            let index = self.sample_index(&strategy);
            let next = self.game.apply_action(history, &actions[index]);
            return self.vanilla_traverse(&next, traverser, reach_own);
        }

        let mut action_values = Vec::with_capacity(actions.len());
        for (action, &prob) in actions.iter().zip(&strategy) {
            let next = self.game.apply_action(history, action);
            action_values.push(self.vanilla_traverse(&next, traverser, reach_own * prob)?);
        }

        let node_value: f64 = strategy
            .iter()
            .zip(&action_values)
            .map(|(&s, &v)| s * v)
            .sum();

        let regrets: Vec<f64> = action_values.iter().map(|&v| v - node_value).collect();
        let weight = if self.config.reach_weighted_average {
            reach_own
        } else {
            1.0
        };

        let info_set = self.table.get_or_create(&key, &actions)?;
        info_set.add_regrets(&regrets);
        info_set.add_strategy(&strategy, weight);

        Ok(node_value)
    }

    /// Outcome-sampling traversal.
    ///
    /// Returns `(value, tail)`: the sampled terminal utility divided by the
    /// probability of sampling the whole trajectory, and the probability of
    /// reaching that terminal from this node under the current strategies.
    /// `reach_opp` carries chance and opponent reach; `sample` is the
    /// probability of having sampled the path so far.
    fn outcome_traverse(
        &mut self,
        history: &History,
        traverser: usize,
        reach_own: f64,
        reach_opp: f64,
        sample: f64,
    ) -> Result<(f64, f64), SolverError> {
        if self.game.is_terminal(history) {
            let utility = self.terminal_value(history, traverser)?;
            return Ok((utility / sample, 1.0));
        }

        if !history.has_dealt() {
            let (deal, prob) = self.sample_deal(history)?;
            return self.outcome_traverse(&deal, traverser, reach_own, reach_opp * prob, sample * prob);
        }

        let player = self.game.current_player(history);
        let actions = self.game.available_actions(history);
        if actions.is_empty() {
            return Ok((0.0, 1.0));
        }

        let key = self.game.info_set_key(history, player);
        let strategy = self.table.get_or_create(&key, &actions)?.current_strategy();

        if player != traverser {
            let index = self.sample_index(&strategy);
            let prob = strategy[index];
            let next = self.game.apply_action(history, &actions[index]);
            let (value, tail) = self.outcome_traverse(
                &next,
                traverser,
                reach_own,
                reach_opp * prob,
                sample * prob,
            )?;
            return Ok((value, tail * prob));
        }

        let epsilon = self.config.exploration;
        let uniform = 1.0 / actions.len() as f64;
        let policy: Vec<f64> = strategy
            .iter()
            .map(|&p| epsilon * uniform + (1.0 - epsilon) * p)
            .collect();

        let index = self.sample_index(&policy);
        let next = self.game.apply_action(history, &actions[index]);
        let (value, tail) = self.outcome_traverse(
            &next,
            traverser,
            reach_own * strategy[index],
            reach_opp,
            sample * policy[index],
        )?;

        // Sampled action: W * (pi(z|ha) - pi(z|h)). Others: -W * pi(z|h).
        let weighted = value * reach_opp;
        let sampled = strategy[index];
        let info_set = self.table.get_or_create(&key, &actions)?;
        for i in 0..strategy.len() {
            let regret = if i == index {
                weighted * tail * (1.0 - sampled)
            } else {
                -weighted * tail * sampled
            };
            info_set.add_to_regret_sum(i, regret);
        }
        info_set.add_strategy(&strategy, reach_own / sample);

        Ok((value, tail * strategy[index]))
    }

    fn terminal_value(&self, history: &History, player: usize) -> Result<f64, SolverError> {
        let utility = self.game.terminal_utility(history)?;
        utility.get(player).copied().ok_or_else(|| {
            SolverError::InvalidGame(format!(
                "terminal utility has {} entries, player {} has none",
                utility.len(),
                player
            ))
        })
    }

    /// Expand a chance node and pick one deal uniformly.
    ///
    /// Returns the deal and its sampling probability.
    fn sample_deal(&mut self, history: &History) -> Result<(History, f64), SolverError> {
        let mut deals = self.game.generate_all_deals(history)?;
        if deals.is_empty() {
            return Err(SolverError::NoDeals);
        }

        let count = deals.len();
        let index = self.rng.gen_range(0..count);
        Ok((deals.swap_remove(index), 1.0 / count as f64))
    }

    /// Sample an index according to a probability distribution.
    fn sample_index(&mut self, probs: &[f64]) -> usize {
        let r: f64 = self.rng.gen();
        let mut cumsum = 0.0;

        for (i, &prob) in probs.iter().enumerate() {
            cumsum += prob;
            if r < cumsum {
                return i;
            }
        }

        // Rounding left r past the total: take the last action that can
        // actually be played.
        probs
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(probs.len().saturating_sub(1))
    }

    /// Expected payoff per player when everyone follows the average
    /// strategy.
    ///
    /// Enumerates every deal and every action exactly. Unvisited info sets
    /// play uniformly. The table is not modified.
    pub fn expected_values(&self, root: &History) -> Result<Vec<f64>, SolverError> {
        let players = self.game.num_players();

        if self.game.is_terminal(root) {
            return self.game.terminal_utility(root);
        }

        if !root.has_dealt() {
            let deals = self.game.generate_all_deals(root)?;
            if deals.is_empty() {
                return Err(SolverError::NoDeals);
            }
            log::debug!("evaluating {} deals", deals.len());

            let mut total = vec![0.0; players];
            for deal in &deals {
                for (sum, value) in total.iter_mut().zip(self.expected_values(deal)?) {
                    *sum += value;
                }
            }
            let count = deals.len() as f64;
            return Ok(total.into_iter().map(|v| v / count).collect());
        }

        let actions = self.game.available_actions(root);
        if actions.is_empty() {
            return Ok(vec![0.0; players]);
        }

        let player = self.game.current_player(root);
        let key = self.game.info_set_key(root, player);
        let strategy = match self.table.get(&key) {
            Some(info_set) if info_set.actions() == actions.as_slice() => {
                info_set.average_strategy()
            }
            Some(info_set) => {
                return Err(SolverError::ActionSetMismatch {
                    key,
                    expected: info_set.num_actions(),
                    found: actions.len(),
                })
            }
            None => vec![1.0 / actions.len() as f64; actions.len()],
        };

        let mut total = vec![0.0; players];
        for (action, &prob) in actions.iter().zip(&strategy) {
            if prob == 0.0 {
                continue;
            }
            let next = self.game.apply_action(root, action);
            for (sum, value) in total.iter_mut().zip(self.expected_values(&next)?) {
                *sum += prob * value;
            }
        }
        Ok(total)
    }

    /// Get the current strategy (regret matching) for an information set.
    pub fn get_current_strategy(&self, info_key: &str) -> Option<Vec<f64>> {
        self.table.get(info_key).map(|set| set.current_strategy())
    }

    /// Get the average strategy for an information set.
    ///
    /// This returns the time-averaged strategy which converges to Nash equilibrium.
    pub fn get_average_strategy(&self, info_key: &str) -> Option<Vec<f64>> {
        self.table.average_strategy(info_key)
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get the number of information sets discovered.
    pub fn num_info_sets(&self) -> usize {
        self.table.len()
    }

    /// Get current statistics.
    pub fn stats(&self) -> &CFRStats {
        &self.stats
    }

    /// Get reference to the info-set table for analysis.
    pub fn table(&self) -> &InfoSetTable {
        &self.table
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &CFRConfig {
        &self.config
    }

    /// Get all information set keys discovered during training, sorted.
    pub fn info_set_keys(&self) -> Vec<String> {
        self.table.keys()
    }

    /// Key-sorted average strategies of every info set.
    pub fn report(&self) -> Vec<StrategyRecord> {
        self.table.report()
    }

    /// Reset the solver to initial state. The random source keeps its
    /// position.
    pub fn reset(&mut self) {
        self.table.clear();
        self.iteration = 0;
        self.stats = CFRStats::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::action::Action;
    use crate::cfr::config::ConfigError;
    use crate::eval::{Card, Suit};
    use crate::games::kuhn::KuhnPoker;

    /// Dealt, never terminal, no legal actions.
    struct DeadEnd;

    impl Game for DeadEnd {
        fn num_players(&self) -> usize {
            2
        }

        fn available_actions(&self, _history: &History) -> Vec<Action> {
            Vec::new()
        }

        fn is_terminal(&self, _history: &History) -> bool {
            false
        }

        fn terminal_utility(&self, _history: &History) -> Result<Vec<f64>, SolverError> {
            Ok(vec![0.0, 0.0])
        }

        fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
            let mut deal = history.clone();
            deal.deal_card(0, Card::new(2, Suit::Club));
            Ok(vec![deal])
        }
    }

    /// Offers an unparseable action at the first decision.
    struct Garbled;

    impl Game for Garbled {
        fn num_players(&self) -> usize {
            1
        }

        fn available_actions(&self, _history: &History) -> Vec<Action> {
            vec![Action::check(0), Action::parse("P0:Juggle")]
        }

        fn is_terminal(&self, history: &History) -> bool {
            history.player_actions().count() > 0
        }

        fn terminal_utility(&self, _history: &History) -> Result<Vec<f64>, SolverError> {
            Ok(vec![1.0])
        }

        fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
            let mut deal = history.clone();
            deal.add_action(Action::deal());
            Ok(vec![deal])
        }
    }

    /// Chance node with nothing to deal.
    struct EmptyDeck;

    impl Game for EmptyDeck {
        fn num_players(&self) -> usize {
            2
        }

        fn available_actions(&self, _history: &History) -> Vec<Action> {
            Vec::new()
        }

        fn is_terminal(&self, _history: &History) -> bool {
            false
        }

        fn terminal_utility(&self, _history: &History) -> Result<Vec<f64>, SolverError> {
            Ok(vec![0.0, 0.0])
        }

        fn generate_all_deals(&self, _history: &History) -> Result<Vec<History>, SolverError> {
            Ok(Vec::new())
        }
    }

    fn kuhn_solver(config: CFRConfig) -> (CFRSolver<KuhnPoker>, History) {
        let game = KuhnPoker::new();
        let root = game.initial_history();
        (CFRSolver::new(game, config).unwrap(), root)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CFRConfig::default();
        config.exploration = 1.5;
        assert!(matches!(
            CFRSolver::new(KuhnPoker::new(), config),
            Err(SolverError::Config(ConfigError::InvalidExploration(_)))
        ));
    }

    #[test]
    fn test_dead_end_is_zero_without_mutation() {
        for config in [CFRConfig::vanilla(), CFRConfig::outcome_sampling()] {
            let mut solver = CFRSolver::new(DeadEnd, config.with_seed(3)).unwrap();
            let value = solver.run_iteration(&History::new()).unwrap();
            assert_eq!(value, 0.0);
            assert_eq!(solver.num_info_sets(), 0);
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        let mut solver = CFRSolver::new(Garbled, CFRConfig::default().with_seed(3)).unwrap();
        let err = solver.train(1, &History::new()).unwrap_err();
        assert!(matches!(err, SolverError::InvalidAction(_)));
    }

    #[test]
    fn test_empty_chance_node_fails() {
        let mut solver = CFRSolver::new(EmptyDeck, CFRConfig::default().with_seed(3)).unwrap();
        assert!(matches!(
            solver.train(1, &History::new()),
            Err(SolverError::NoDeals)
        ));
        assert!(matches!(
            solver.expected_values(&History::new()),
            Err(SolverError::NoDeals)
        ));
    }

    #[test]
    fn test_chance_sampling_is_uniform() {
        let (mut solver, root) = kuhn_solver(CFRConfig::default().with_seed(17));
        let deals = solver.game().generate_all_deals(&root).unwrap();
        assert_eq!(deals.len(), 6);

        let samples = 60_000;
        let mut counts = vec![0usize; deals.len()];
        for _ in 0..samples {
            let (deal, prob) = solver.sample_deal(&root).unwrap();
            assert!((prob - 1.0 / 6.0).abs() < 1e-12);
            let index = deals.iter().position(|d| *d == deal).unwrap();
            counts[index] += 1;
        }

        for count in counts {
            let freq = count as f64 / samples as f64;
            assert!((freq - 1.0 / 6.0).abs() < 0.01, "deal frequency {}", freq);
        }
    }

    #[test]
    fn test_sample_index_skips_impossible_tail() {
        let (mut solver, _) = kuhn_solver(CFRConfig::default().with_seed(5));
        for _ in 0..1_000 {
            let index = solver.sample_index(&[0.25, 0.75, 0.0]);
            assert!(index < 2);
        }
        assert_eq!(solver.sample_index(&[0.0, 0.0]), 1);
    }

    #[test]
    fn test_round_robin_continues_across_calls() {
        let (mut solver, root) = kuhn_solver(CFRConfig::default().with_seed(9));
        assert_eq!(solver.next_traverser(), 0);
        solver.train(3, &root).unwrap();
        assert_eq!(solver.iteration(), 3);
        assert_eq!(solver.next_traverser(), 1);
        solver.train(2, &root).unwrap();
        assert_eq!(solver.stats().iterations, 5);
        assert_eq!(solver.next_traverser(), 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |mode| {
            let (mut solver, root) = kuhn_solver(CFRConfig::default().with_mode(mode).with_seed(21));
            solver.train(2_000, &root).unwrap();
            serde_json::to_string(&solver.report()).unwrap()
        };
        assert_eq!(run(TraversalMode::Vanilla), run(TraversalMode::Vanilla));
        assert_eq!(
            run(TraversalMode::OutcomeSampling),
            run(TraversalMode::OutcomeSampling)
        );
    }

    #[test]
    fn test_callback_interval() {
        let (mut solver, root) = kuhn_solver(CFRConfig::default().with_seed(2));
        let mut seen = Vec::new();
        solver
            .train_with_callback(100, &root, 25, |stats, table| {
                seen.push((stats.iterations, table.len()));
            })
            .unwrap();
        assert_eq!(
            seen.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![25, 50, 75, 100]
        );
        assert!(seen.iter().all(|(_, sets)| *sets > 0));
    }

    #[test]
    fn test_expected_values_read_only_and_zero_sum() {
        let (mut solver, root) = kuhn_solver(CFRConfig::default().with_seed(4));
        let untrained = solver.expected_values(&root).unwrap();
        assert_eq!(solver.num_info_sets(), 0);
        assert!((untrained[0] + untrained[1]).abs() < 1e-12);

        solver.train(500, &root).unwrap();
        let before = solver.num_info_sets();
        let trained = solver.expected_values(&root).unwrap();
        assert_eq!(solver.num_info_sets(), before);
        assert!((trained[0] + trained[1]).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_sampling_kuhn() {
        let (mut solver, root) = kuhn_solver(CFRConfig::outcome_sampling().with_seed(8));
        solver.train(50_000, &root).unwrap();
        assert_eq!(solver.num_info_sets(), 12);

        for record in solver.report() {
            let sum: f64 = record.average.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", record.key, sum);
            assert!(record.average.iter().all(|&p| p >= 0.0));
        }

        // A king facing a bet always wins by calling.
        let key = KuhnPoker::info_set_key_for(13, &[Action::bet(0, 1.0)]);
        let strategy = solver.table().get(&key).unwrap().average_strategy_map();
        let call = strategy["P1:Call"];
        assert!(call > 0.8, "king call probability {}", call);
    }

    #[test]
    fn test_outcome_sampling_kuhn_reaches_game_value() {
        let (mut solver, root) = kuhn_solver(CFRConfig::outcome_sampling().with_seed(11));
        solver.train(400_000, &root).unwrap();

        // A jack facing a bet loses 2 by calling and 1 by folding.
        let key = KuhnPoker::info_set_key_for(11, &[Action::bet(0, 1.0)]);
        let strategy = solver.table().get(&key).unwrap().average_strategy_map();
        let fold = strategy["P1:Fold"];
        assert!(fold > 0.9, "jack fold probability {}", fold);

        let ev = solver.expected_values(&root).unwrap();
        assert!(
            (ev[0] + 1.0 / 18.0).abs() < 0.015,
            "P0 value {} instead of -1/18",
            ev[0]
        );
    }

    /// Reports one payoff for a two-player game.
    struct ShortUtility;

    impl Game for ShortUtility {
        fn num_players(&self) -> usize {
            2
        }

        fn available_actions(&self, _history: &History) -> Vec<Action> {
            vec![Action::check(0)]
        }

        fn is_terminal(&self, history: &History) -> bool {
            history.player_actions().count() > 0
        }

        fn terminal_utility(&self, _history: &History) -> Result<Vec<f64>, SolverError> {
            Ok(vec![1.0])
        }

        fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
            let mut deal = history.clone();
            deal.add_action(Action::deal());
            Ok(vec![deal])
        }
    }

    #[test]
    fn test_short_utility_vector_rejected() {
        for config in [CFRConfig::vanilla(), CFRConfig::outcome_sampling()] {
            let mut solver = CFRSolver::new(ShortUtility, config.with_seed(2)).unwrap();
            // Iteration 0 targets player 0, who has a payoff.
            solver.run_iteration(&History::new()).unwrap();
            assert!(matches!(
                solver.run_iteration(&History::new()),
                Err(SolverError::InvalidGame(_))
            ));
        }
    }

    #[test]
    fn test_reset() {
        let (mut solver, root) = kuhn_solver(CFRConfig::default().with_seed(6));
        solver.train(10, &root).unwrap();
        solver.reset();
        assert_eq!(solver.iteration(), 0);
        assert_eq!(solver.num_info_sets(), 0);
        assert!(solver.info_set_keys().is_empty());
    }
}

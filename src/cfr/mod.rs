//! CFR (Counterfactual Regret Minimization) Solver Module.
//!
//! This module provides a generic implementation of CFR and outcome-sampling
//! MCCFR for computing Nash equilibrium strategies in imperfect-information
//! card games.
//!
//! # Overview
//!
//! CFR is an iterative algorithm that converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each decision point
//! 2. Updating strategies to minimize regret over time
//! 3. Averaging strategies across iterations to converge to equilibrium
//!
//! # Building Blocks
//!
//! - [`Action`]: tagged player or chance action with a canonical text key
//! - [`History`]: one path through the game tree, copied on every branch
//! - [`Game`]: the rules (legal actions, turn order, payoffs, chance expansion)
//! - [`InfoSet`]: regret and strategy accumulators for one decision point
//! - [`CFRSolver`]: the traversal and training loop
//!
//! # Example
//!
//! ```
//! use cfr_poker::cfr::{CFRConfig, CFRSolver, Game};
//! use cfr_poker::games::kuhn::KuhnPoker;
//!
//! let game = KuhnPoker::new();
//! let root = game.initial_history();
//! let mut solver = CFRSolver::new(game, CFRConfig::default().with_seed(3)).unwrap();
//!
//! let stats = solver.train(5_000, &root).unwrap();
//! println!("Trained {} info sets in {:.2}s", stats.info_sets, stats.elapsed_seconds);
//!
//! for record in solver.report() {
//!     println!("{} {:?}", record.key, record.average);
//! }
//! ```
//!
//! # Theory
//!
//! **Regret**: The difference between the value of an action and the value of the current strategy.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: Set strategy proportional to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! **Convergence**: Average regret decreases as O(1/sqrt(T)), and the average strategy
//! converges to Nash equilibrium.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Lanctot, M., et al. "Monte Carlo Sampling for Regret Minimization in Extensive Games" (2009)

pub mod action;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod infoset;
pub mod solver;

// Re-export main types for convenient access
pub use action::{Action, ActionKind};
pub use config::{CFRConfig, CFRStats, ConfigError, TraversalMode};
pub use error::SolverError;
pub use game::Game;
pub use history::{BettingRound, History};
pub use infoset::{InfoSet, InfoSetTable, StrategyRecord, StrategySnapshot};
pub use solver::CFRSolver;

//! # CFR Poker
//!
//! Counterfactual Regret Minimization (CFR) and outcome-sampling MCCFR for
//! imperfect-information card games, with a poker hand evaluator for
//! showdowns.
//!
//! ## Features
//!
//! - **Generic CFR Engine**: Works with any game implementing the `Game` trait
//! - **Two Estimators**: Vanilla (full-width traverser, sampled chance and
//!   opponents) and outcome-sampling MCCFR
//! - **Hand Evaluation**: Bitmask 5-card ranking plus a precomputed 7-card
//!   lookup table with a binary file format
//! - **Reference Games**: Kuhn Poker, matching pennies, heads-up hold'em
//! - **Exact Evaluation**: Expected payoffs of the average strategy
//!
//! ## Quick Start
//!
//! ```
//! use cfr_poker::cfr::{CFRConfig, CFRSolver, Game};
//! use cfr_poker::games::kuhn::KuhnPoker;
//!
//! // 1. Pick a game and its root history
//! let game = KuhnPoker::new();
//! let root = game.initial_history();
//!
//! // 2. Create a solver
//! let mut solver = CFRSolver::new(game, CFRConfig::default().with_seed(42)).unwrap();
//!
//! // 3. Train
//! solver.train(10_000, &root).unwrap();
//!
//! // 4. Read strategies and values
//! let ev = solver.expected_values(&root).unwrap();
//! assert!((ev[0] + ev[1]).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Core CFR algorithm and solver
//! - [`eval`]: Cards and hand evaluation
//! - [`games`]: Game implementations (Kuhn Poker, etc.)
//! - [`telemetry`]: Metric sinks for training runs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CFR Solver (Generic)                       │
//! │  - Regret matching        - Vanilla / outcome sampling          │
//! │  - InfoSet table          - Exact expected values               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │  Kuhn   │         │ Matching  │         │  Hold'em  │──▶ Evaluator
//!    │  Poker  │         │  Pennies  │         │ showdown  │    (bitmask / table)
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// CFR (Counterfactual Regret Minimization) solver module.
///
/// This is the core module containing the generic CFR algorithm.
pub mod cfr;

/// Cards, hand ranks and evaluators.
pub mod eval;

/// Game implementations module.
///
/// Contains reference games for testing and validation.
pub mod games;

pub mod telemetry;

// Re-export commonly used types at crate root for convenience
pub use cfr::{Action, CFRConfig, CFRSolver, CFRStats, Game, History, SolverError};
pub use eval::{Card, EvalError, Evaluator, HandRank};

//! Game implementations for the CFR solver.
//!
//! This module contains implementations of games that can be solved
//! using the generic CFR solver. These serve as:
//!
//! 1. **Validation**: Games with known Nash equilibria (Kuhn Poker, matching
//!    pennies) verify that the CFR implementation is correct.
//!
//! 2. **Examples**: Demonstrate how to implement the `Game` trait for new games.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker - a 3-card poker game with known Nash equilibrium
//! - [`pennies`]: Biased matching pennies - one-shot, mixed equilibrium at 40% heads
//! - [`holdem`]: Heads-up single-round hold'em over a reduced deck, showdown
//!   through any hand evaluator
//!
//! ## Adding New Games
//!
//! To add a new game:
//!
//! 1. Create a new module under `src/games/`
//! 2. Implement the `Game` trait over `History`
//! 3. Expand the chance node in `generate_all_deals`, recording `Deal` actions
//! 4. Add tests that verify expected behavior
//!
//! See the [`kuhn`] module for a complete example.

pub mod holdem;
pub mod kuhn;
pub mod pennies;

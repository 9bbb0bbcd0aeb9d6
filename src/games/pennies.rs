//! Biased matching pennies.
//!
//! A one-shot, zero-sum toy game used to check that the solver converges to
//! a known mixed equilibrium. Player 0 picks heads or tails, then player 1
//! picks without seeing that choice. Heads is played as `Bet`, tails as
//! `Check`.
//!
//! ## Payoffs to player 0
//!
//! | P0 \ P1 | Heads | Tails |
//! |---------|-------|-------|
//! | Heads   | +2    | -1    |
//! | Tails   | -1    | +1    |
//!
//! ## Equilibrium
//!
//! Both players play heads with probability 0.4; the game value for player
//! 0 is 0.2.

use crate::cfr::action::{Action, ActionKind};
use crate::cfr::error::SolverError;
use crate::cfr::game::Game;
use crate::cfr::history::History;

/// Equilibrium probability of heads, for both players.
pub const EQUILIBRIUM_HEADS: f64 = 0.4;

/// Game value for player 0.
pub const GAME_VALUE: f64 = 0.2;

/// Biased matching pennies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingPennies;

impl MatchingPennies {
    /// Create the game.
    pub fn new() -> Self {
        Self
    }

    /// Heads for `player`.
    pub fn heads(player: usize) -> Action {
        Action::bet(player, 1.0)
    }

    /// Tails for `player`.
    pub fn tails(player: usize) -> Action {
        Action::check(player)
    }

    fn is_heads(action: &Action) -> bool {
        action.kind() == ActionKind::Bet
    }
}

impl Game for MatchingPennies {
    fn num_players(&self) -> usize {
        2
    }

    fn current_player(&self, history: &History) -> usize {
        history.player_actions().count() % 2
    }

    fn available_actions(&self, history: &History) -> Vec<Action> {
        if !history.has_dealt() || self.is_terminal(history) {
            return Vec::new();
        }
        let player = self.current_player(history);
        vec![Self::heads(player), Self::tails(player)]
    }

    fn is_terminal(&self, history: &History) -> bool {
        history.player_actions().count() >= 2
    }

    fn terminal_utility(&self, history: &History) -> Result<Vec<f64>, SolverError> {
        let moves: Vec<bool> = history.player_actions().map(Self::is_heads).collect();
        let p0 = match moves.as_slice() {
            [true, true] => 2.0,
            [false, false] => 1.0,
            [_, _] => -1.0,
            _ => 0.0,
        };
        Ok(vec![p0, -p0])
    }

    /// Nothing is dealt; the single outcome just marks the chance event.
    fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
        let mut deal = history.clone();
        deal.add_action(Action::deal());
        Ok(vec![deal])
    }

    /// Moves are simultaneous in effect: other players' choices are masked.
    fn info_set_key(&self, history: &History, player: usize) -> String {
        let visible: Vec<String> = history
            .actions()
            .iter()
            .map(|action| match action.player() {
                Some(p) if p != player => format!("P{}:?", p),
                _ => action.key(),
            })
            .collect();
        format!("P{}|{}", player, visible.join(","))
    }
}

//! Game trait definition for the CFR solver.
//!
//! Any game that implements the `Game` trait can be solved with CFR.
//! The solver only ever talks to the rules through this trait; the rules
//! own legal-action generation, turn order, terminal detection, payoffs
//! and chance-node expansion.

use crate::cfr::action::Action;
use crate::cfr::error::SolverError;
use crate::cfr::history::History;

/// The rules of a finite, perfect-recall extensive-form game.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     fn num_players(&self) -> usize { 2 }
///     // ... implement required methods
/// }
/// ```
pub trait Game: Send + Sync {
    /// Get the total number of players in the game.
    fn num_players(&self) -> usize;

    /// Create the root history a training run starts from.
    fn initial_history(&self) -> History {
        History::new()
    }

    /// Get the index of the player who should act.
    fn current_player(&self, history: &History) -> usize {
        history.current_player()
    }

    /// Get the ordered list of legal actions for the player to act.
    ///
    /// An empty list at a non-terminal node is a dead end: the solver
    /// values it at 0 and stops there.
    fn available_actions(&self, history: &History) -> Vec<Action>;

    /// Apply an action, returning the child history.
    ///
    /// The parent is never modified. The default appends the action; rules
    /// with rounds or explicit turn tracking override this to advance them.
    fn apply_action(&self, history: &History, action: &Action) -> History {
        let mut next = history.clone();
        next.add_action(action.clone());
        next
    }

    /// Check if the history is terminal (game over).
    fn is_terminal(&self, history: &History) -> bool;

    /// Per-player payoffs at a terminal history.
    ///
    /// Expected to sum to zero across seats, though the solver does not
    /// rely on it. Showdown games resolve hands through an evaluator here,
    /// so evaluator failures surface from this call.
    fn terminal_utility(&self, history: &History) -> Result<Vec<f64>, SolverError>;

    /// Expand the chance node: one history per possible deal, each already
    /// extended with its cards and the matching `Deal` actions.
    fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError>;

    /// Information-set key for `player`.
    ///
    /// Defaults to the history's own key (own cards plus every public
    /// action). Override this when some moves are not public.
    fn info_set_key(&self, history: &History, player: usize) -> String {
        history.info_set_key(player)
    }
}

//! Kuhn Poker implementation for CFR validation.
//!
//! Kuhn Poker is a simplified poker game used to validate CFR implementations
//! because it has a known, mathematically proven Nash equilibrium.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack, Queen, King (ranks 11-13 of one suit)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Player 0 acts first: Check or Bet (1 chip)
//! - Player 1 responds based on P0's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! P0 (first to act)
//! ├── Check
//! │   └── P1
//! │       ├── Check → Showdown (pot = 2)
//! │       └── Bet
//! │           └── P0
//! │               ├── Fold → P1 wins (pot = 3)
//! │               └── Call → Showdown (pot = 4)
//! └── Bet
//!     └── P1
//!         ├── Fold → P0 wins (pot = 3)
//!         └── Call → Showdown (pot = 4)
//! ```
//!
//! ## Known Nash Equilibrium
//!
//! A one-parameter family, α ∈ [0, 1/3]:
//! - **P0 with Jack**: Bet with probability α
//! - **P0 with Queen**: Always Check; call a bet with probability α + 1/3
//! - **P0 with King**: Bet with probability 3α
//! - **P1 facing Bet**: Jack always Folds, Queen Calls 1/3, King always Calls
//! - **P1 facing Check**: Jack Bets 1/3, Queen always Checks, King always Bets
//!
//! **Expected Value**: P0 EV = -1/18 ≈ -0.0556

use crate::cfr::action::{Action, ActionKind};
use crate::cfr::error::SolverError;
use crate::cfr::game::Game;
use crate::cfr::history::History;
use crate::eval::{Card, Suit};

/// Ranks of the three cards.
pub const JACK: u8 = 11;
/// Queen.
pub const QUEEN: u8 = 12;
/// King.
pub const KING: u8 = 13;

const ANTE: f64 = 1.0;
const BET: f64 = 1.0;

/// Kuhn Poker game.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }

    /// The three-card deck.
    pub fn deck() -> [Card; 3] {
        [JACK, QUEEN, KING].map(|rank| Card::new(rank, Suit::Spade))
    }

    /// Get card name for display.
    pub fn card_name(rank: u8) -> &'static str {
        match rank {
            JACK => "Jack",
            QUEEN => "Queen",
            KING => "King",
            _ => "Unknown",
        }
    }

    /// Information-set key of the player to act holding `rank` after
    /// `moves`.
    pub fn info_set_key_for(rank: u8, moves: &[Action]) -> String {
        let game = Self;
        let player = moves.len() % 2;
        let mut history = History::new();
        for seat in 0..2 {
            // Opponent card is irrelevant to the key; pick any other card.
            let card = if seat == player {
                rank
            } else if rank == JACK {
                QUEEN
            } else {
                JACK
            };
            history.deal_card(seat, Card::new(card, Suit::Spade));
        }
        for action in moves {
            history = game.apply_action(&history, action);
        }
        game.info_set_key(&history, player)
    }

    fn moves(history: &History) -> Vec<ActionKind> {
        history.player_actions().map(Action::kind).collect()
    }
}

impl Game for KuhnPoker {
    fn num_players(&self) -> usize {
        2
    }

    fn current_player(&self, history: &History) -> usize {
        history.player_actions().count() % 2
    }

    fn available_actions(&self, history: &History) -> Vec<Action> {
        if !history.has_dealt() {
            return Vec::new();
        }

        let player = self.current_player(history);
        match Self::moves(history).as_slice() {
            [] | [ActionKind::Check] => vec![Action::check(player), Action::bet(player, BET)],
            [ActionKind::Bet] | [ActionKind::Check, ActionKind::Bet] => {
                vec![Action::fold(player), Action::call(player)]
            }
            _ => Vec::new(),
        }
    }

    fn is_terminal(&self, history: &History) -> bool {
        use ActionKind::*;
        matches!(
            Self::moves(history).as_slice(),
            [Check, Check] | [Bet, Fold] | [Bet, Call] | [Check, Bet, Fold] | [Check, Bet, Call]
        )
    }

    fn terminal_utility(&self, history: &History) -> Result<Vec<f64>, SolverError> {
        let mut committed = [ANTE, ANTE];
        for action in history.player_actions() {
            let Some(player) = action.player() else {
                continue;
            };
            match action.kind() {
                ActionKind::Bet => committed[player] += action.amount(),
                ActionKind::Call => committed[player] = committed[1 - player],
                ActionKind::Fold => {
                    let winner = 1 - player;
                    let mut payoff = vec![0.0; 2];
                    payoff[winner] = committed[player];
                    payoff[player] = -committed[player];
                    return Ok(payoff);
                }
                _ => {}
            }
        }

        let p0 = history.hand(0).first().map(Card::rank).unwrap_or(0);
        let p1 = history.hand(1).first().map(Card::rank).unwrap_or(0);
        let (winner, loser) = if p0 > p1 { (0, 1) } else { (1, 0) };

        let mut payoff = vec![0.0; 2];
        payoff[winner] = committed[loser];
        payoff[loser] = -committed[loser];
        Ok(payoff)
    }

    fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
        let deck = Self::deck();
        let mut deals = Vec::with_capacity(6);
        for (i, &first) in deck.iter().enumerate() {
            for (j, &second) in deck.iter().enumerate() {
                if i == j {
                    continue;
                }
                let mut deal = history.clone();
                deal.deal_card(0, first);
                deal.deal_card(1, second);
                deals.push(deal);
            }
        }
        log::debug!("kuhn chance node: {} deals", deals.len());
        Ok(deals)
    }
}

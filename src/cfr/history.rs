//! Game history: one path through the game tree.
//!
//! A `History` owns everything on its path (actions, private cards, board),
//! so `clone()` is a full deep copy. The solver branches by cloning; sibling
//! branches never share mutable state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::cfr::action::Action;
use crate::eval::Card;

/// Betting round for community-card games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BettingRound {
    /// Before any board card is shown.
    #[default]
    PreFlop,
    /// Three board cards shown.
    Flop,
    /// Four board cards shown.
    Turn,
    /// All five board cards shown.
    River,
    /// Betting closed; hands are revealed.
    Showdown,
}

impl BettingRound {
    /// Number of board cards visible to the players in this round.
    pub fn visible_board_cards(&self) -> usize {
        match self {
            BettingRound::PreFlop => 0,
            BettingRound::Flop => 3,
            BettingRound::Turn => 4,
            BettingRound::River | BettingRound::Showdown => 5,
        }
    }

    /// The round that follows this one.
    pub fn next(&self) -> Option<BettingRound> {
        match self {
            BettingRound::PreFlop => Some(BettingRound::Flop),
            BettingRound::Flop => Some(BettingRound::Turn),
            BettingRound::Turn => Some(BettingRound::River),
            BettingRound::River => Some(BettingRound::Showdown),
            BettingRound::Showdown => None,
        }
    }
}

impl fmt::Display for BettingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BettingRound::PreFlop => "preflop",
            BettingRound::Flop => "flop",
            BettingRound::Turn => "turn",
            BettingRound::River => "river",
            BettingRound::Showdown => "showdown",
        };
        write!(f, "{}", name)
    }
}

/// Record of the actions and cards along one path of the game tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Player and chance actions, in order.
    actions: Vec<Action>,
    /// Private cards per player (append-only).
    hole_cards: BTreeMap<usize, Vec<Card>>,
    /// Shared board cards, in deal order.
    community: Vec<Card>,
    /// Current betting round.
    round: BettingRound,
    /// Player to act.
    current_player: usize,
    /// Set once any chance action has been recorded.
    dealt: bool,
}

impl History {
    /// Create an empty root history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn add_action(&mut self, action: Action) {
        if action.is_chance() {
            self.dealt = true;
        }
        self.actions.push(action);
    }

    /// Give a player a private card.
    pub fn add_card(&mut self, player: usize, card: Card) {
        self.hole_cards.entry(player).or_default().push(card);
    }

    /// Give a player a private card and record the deal.
    pub fn deal_card(&mut self, player: usize, card: Card) {
        self.add_card(player, card);
        self.add_action(Action::deal());
    }

    /// Add a board card and record the deal.
    pub fn deal_community(&mut self, card: Card) {
        self.community.push(card);
        self.add_action(Action::deal());
    }

    /// All actions so far.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Player actions only, skipping chance events.
    pub fn player_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| !a.is_chance())
    }

    /// The most recent player action.
    pub fn last_player_action(&self) -> Option<&Action> {
        self.actions.iter().rev().find(|a| !a.is_chance())
    }

    /// A player's private cards.
    pub fn hand(&self, player: usize) -> &[Card] {
        self.hole_cards.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All board cards, including ones not yet revealed.
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// Board cards revealed in the current round.
    pub fn visible_community(&self) -> &[Card] {
        let n = self.round.visible_board_cards().min(self.community.len());
        &self.community[..n]
    }

    /// Current betting round.
    pub fn round(&self) -> BettingRound {
        self.round
    }

    /// Move to a betting round.
    pub fn set_round(&mut self, round: BettingRound) {
        self.round = round;
    }

    /// Player to act.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Set the player to act.
    pub fn set_current_player(&mut self, player: usize) {
        self.current_player = player;
    }

    /// Whether the chance event has been resolved on this path.
    #[inline]
    pub fn has_dealt(&self) -> bool {
        self.dealt
    }

    /// Information-set key for `player`: their own cards, the visible board
    /// and the full public action sequence. Other players' cards never
    /// appear.
    pub fn info_set_key(&self, player: usize) -> String {
        let mut hand = self.hand(player).to_vec();
        hand.sort_by(Card::canonical_cmp);
        let hand: Vec<String> = hand.iter().map(|c| c.to_string()).collect();
        let board: Vec<String> = self.visible_community().iter().map(|c| c.to_string()).collect();
        let actions: Vec<String> = self.actions.iter().map(|a| a.key()).collect();

        format!("{}|{}|{}", hand.join("-"), board.join("-"), actions.join(","))
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actions: Vec<String> = self.actions.iter().map(|a| a.key()).collect();
        write!(f, "[{}] {}", self.round, actions.join(","))?;
        for (player, cards) in &self.hole_cards {
            write!(f, " P{}:{:?}", player, cards)?;
        }
        if !self.community.is_empty() {
            write!(f, " board:{:?}", self.community)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Suit;

    fn dealt_history() -> History {
        let mut history = History::new();
        history.deal_card(0, Card::new(13, Suit::Spade));
        history.deal_card(1, Card::new(11, Suit::Spade));
        history
    }

    #[test]
    fn test_deal_marks_history() {
        let mut history = History::new();
        assert!(!history.has_dealt());
        history.add_action(Action::check(0));
        assert!(!history.has_dealt());
        history.add_action(Action::deal());
        assert!(history.has_dealt());
    }

    #[test]
    fn test_copy_independence() {
        let original = dealt_history();
        let mut left = original.clone();
        let mut right = original.clone();

        left.add_action(Action::check(0));
        left.add_card(0, Card::new(2, Suit::Club));
        right.add_action(Action::bet(0, 1.0));
        right.set_current_player(1);

        assert_eq!(original.actions().len(), 2);
        assert_eq!(original.hand(0).len(), 1);
        assert_eq!(original.current_player(), 0);

        assert_eq!(left.last_player_action(), Some(&Action::check(0)));
        assert_eq!(right.last_player_action(), Some(&Action::bet(0, 1.0)));
        assert_eq!(left.hand(0).len(), 2);
        assert_eq!(right.hand(0).len(), 1);
    }

    #[test]
    fn test_info_set_key_hides_opponent_cards() {
        let mut history = dealt_history();
        history.add_action(Action::check(0));

        let p0 = history.info_set_key(0);
        let p1 = history.info_set_key(1);
        assert_eq!(p0, "13S||Deal,Deal,P0:Check");
        assert_eq!(p1, "11S||Deal,Deal,P0:Check");
    }

    #[test]
    fn test_board_visibility_follows_round() {
        let mut history = dealt_history();
        for rank in [2, 3, 4, 5, 6] {
            history.deal_community(Card::new(rank, Suit::Heart));
        }
        assert!(history.visible_community().is_empty());
        assert!(!history.info_set_key(0).contains("2H"));

        history.set_round(BettingRound::Flop);
        assert_eq!(history.visible_community().len(), 3);
        assert!(history.info_set_key(0).contains("2H-3H-4H"));
        assert!(!history.info_set_key(0).contains("5H"));

        history.set_round(BettingRound::River);
        assert_eq!(history.visible_community().len(), 5);
    }

    #[test]
    fn test_hand_order_does_not_split_keys() {
        let mut a = History::new();
        a.deal_card(0, Card::new(14, Suit::Heart));
        a.deal_card(0, Card::new(2, Suit::Club));
        let mut b = History::new();
        b.deal_card(0, Card::new(2, Suit::Club));
        b.deal_card(0, Card::new(14, Suit::Heart));
        assert_eq!(a.info_set_key(0), b.info_set_key(0));
    }

    #[test]
    fn test_round_progression() {
        let mut round = BettingRound::PreFlop;
        let mut seen = vec![round];
        while let Some(next) = round.next() {
            seen.push(next);
            round = next;
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(round, BettingRound::Showdown);
    }
}

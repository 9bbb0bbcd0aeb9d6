//! Heads-up hold'em with a single betting round.
//!
//! Each player antes and receives two hole cards; five board cards are dealt
//! face down at the same chance node. One betting round follows:
//!
//! ```text
//! P0: Check | Bet
//!   Check → P1: Check (showdown) | Bet
//!   Bet   → Fold | Call (showdown) | Raise (while raises remain)
//! ```
//!
//! The board stays hidden from information-set keys during betting and is
//! revealed when betting closes. Showdowns compare hole cards plus board
//! through any [`Evaluator`], so a precomputed table can stand in for the
//! bitmask evaluator.
//!
//! Every chance node expands to every possible deal, so the deck must be
//! small: a 9-card deck gives C(9,2)·C(7,2)·C(5,5) = 756 deals.

use rustc_hash::FxHashSet;
use std::cmp::Ordering;

use crate::cfr::action::{Action, ActionKind};
use crate::cfr::error::SolverError;
use crate::cfr::game::Game;
use crate::cfr::history::{BettingRound, History};
use crate::eval::{Card, Evaluator};

/// Hole cards per player.
pub const HOLE_CARDS: usize = 2;

/// Board cards.
pub const BOARD_CARDS: usize = 5;

/// Largest chance-node expansion accepted at construction.
pub const MAX_DEALS: u64 = 50_000;

const MIN_DECK: usize = 2 * HOLE_CARDS + BOARD_CARDS;

/// Heads-up single-round hold'em over a configurable deck.
#[derive(Debug, Clone)]
pub struct HeadsUpHoldem<E: Evaluator> {
    evaluator: E,
    deck: Vec<Card>,
    ante: f64,
    bet_size: f64,
    max_raises: usize,
}

impl<E: Evaluator> HeadsUpHoldem<E> {
    /// Create the game over `deck` with antes of 1, bets of 1 and one raise.
    ///
    /// Fails on duplicate cards, on a deck too small to deal a hand, or on a
    /// deck whose deal count exceeds [`MAX_DEALS`].
    pub fn new(evaluator: E, deck: Vec<Card>) -> Result<Self, SolverError> {
        let mut seen = FxHashSet::default();
        if let Some(&dup) = deck.iter().find(|&&card| !seen.insert(card)) {
            return Err(SolverError::InvalidGame(format!("duplicate card {}", dup)));
        }

        if deck.len() < MIN_DECK {
            return Err(SolverError::InvalidGame(format!(
                "deck has {} cards, need at least {}",
                deck.len(),
                MIN_DECK
            )));
        }

        let deals = Self::deal_count(deck.len());
        if deals > MAX_DEALS {
            return Err(SolverError::InvalidGame(format!(
                "{}-card deck expands to {} deals (limit {})",
                deck.len(),
                deals,
                MAX_DEALS
            )));
        }

        Ok(Self {
            evaluator,
            deck,
            ante: 1.0,
            bet_size: 1.0,
            max_raises: 1,
        })
    }

    /// Builder method: set the bet and raise size.
    pub fn with_bet_size(mut self, bet_size: f64) -> Self {
        self.bet_size = bet_size;
        self
    }

    /// Builder method: set how many raises a betting round allows.
    pub fn with_max_raises(mut self, max_raises: usize) -> Self {
        self.max_raises = max_raises;
        self
    }

    /// The deck deals are drawn from.
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The showdown evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Number of distinct deals from a deck of `deck_size` cards.
    pub fn deal_count(deck_size: usize) -> u64 {
        let rest = deck_size.saturating_sub(HOLE_CARDS);
        let board = rest.saturating_sub(HOLE_CARDS);
        choose(deck_size, HOLE_CARDS)
            .saturating_mul(choose(rest, HOLE_CARDS))
            .saturating_mul(choose(board, BOARD_CARDS))
    }

    fn raises(history: &History) -> usize {
        history
            .player_actions()
            .filter(|a| a.kind() == ActionKind::Raise)
            .count()
    }

    fn betting_closed(history: &History) -> bool {
        let mut moves = history.player_actions().map(Action::kind);
        match history.last_player_action().map(Action::kind) {
            Some(ActionKind::Fold) | Some(ActionKind::Call) => true,
            Some(ActionKind::Check) => {
                moves.next() == Some(ActionKind::Check) && moves.next() == Some(ActionKind::Check)
            }
            _ => false,
        }
    }

    fn committed(&self, history: &History) -> ([f64; 2], Option<usize>) {
        let mut committed = [self.ante, self.ante];
        for action in history.player_actions() {
            let Some(player) = action.player().filter(|&p| p < 2) else {
                continue;
            };
            let other = 1 - player;
            match action.kind() {
                ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn => {
                    committed[player] = committed[other] + action.amount();
                }
                ActionKind::Call => committed[player] = committed[other],
                ActionKind::Fold => return (committed, Some(player)),
                _ => {}
            }
        }
        (committed, None)
    }

    fn showdown_hand(history: &History, player: usize) -> Vec<Card> {
        let mut cards = history.hand(player).to_vec();
        cards.extend_from_slice(history.community());
        cards
    }
}

impl<E: Evaluator> Game for HeadsUpHoldem<E> {
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
        match history.last_player_action().map(Action::kind) {
            None | Some(ActionKind::Check) => {
                vec![Action::check(player), Action::bet(player, self.bet_size)]
            }
            Some(ActionKind::Bet) | Some(ActionKind::Raise) => {
                let mut actions = vec![Action::fold(player), Action::call(player)];
                if Self::raises(history) < self.max_raises {
                    actions.push(Action::raise(player, self.bet_size));
                }
                actions
            }
            _ => Vec::new(),
        }
    }

    /// Closing the betting reveals the board.
    fn apply_action(&self, history: &History, action: &Action) -> History {
        let mut next = history.clone();
        next.add_action(action.clone());
        if Self::betting_closed(&next) && action.kind() != ActionKind::Fold {
            next.set_round(BettingRound::Showdown);
        }
        next.set_current_player(self.current_player(&next));
        next
    }

    fn is_terminal(&self, history: &History) -> bool {
        Self::betting_closed(history)
    }

    fn terminal_utility(&self, history: &History) -> Result<Vec<f64>, SolverError> {
        let (committed, folder) = self.committed(history);

        let winner = match folder {
            Some(player) => Some(1 - player),
            None => {
                let first = Self::showdown_hand(history, 0);
                let second = Self::showdown_hand(history, 1);
                match self.evaluator.compare(&first, &second)? {
                    Ordering::Greater => Some(0),
                    Ordering::Less => Some(1),
                    Ordering::Equal => None,
                }
            }
        };

        let mut payoff = vec![0.0; 2];
        if let Some(winner) = winner {
            let loser = 1 - winner;
            payoff[winner] = committed[loser];
            payoff[loser] = -committed[loser];
        }
        Ok(payoff)
    }

    fn generate_all_deals(&self, history: &History) -> Result<Vec<History>, SolverError> {
        let mut deals = Vec::with_capacity(Self::deal_count(self.deck.len()) as usize);

        for first in combinations(&self.deck, HOLE_CARDS) {
            let rest = without(&self.deck, &first);
            for second in combinations(&rest, HOLE_CARDS) {
                let remaining = without(&rest, &second);
                for board in combinations(&remaining, BOARD_CARDS) {
                    let mut deal = history.clone();
                    for &card in &first {
                        deal.deal_card(0, card);
                    }
                    for &card in &second {
                        deal.deal_card(1, card);
                    }
                    for &card in &board {
                        deal.deal_community(card);
                    }
                    deals.push(deal);
                }
            }
        }

        if deals.is_empty() {
            return Err(SolverError::NoDeals);
        }
        log::debug!("hold'em chance node: {} deals", deals.len());
        Ok(deals)
    }
}

fn choose(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i + 1) as u64)
}

fn without(cards: &[Card], removed: &[Card]) -> Vec<Card> {
    cards.iter().filter(|c| !removed.contains(c)).copied().collect()
}

/// All `k`-card subsets, in deck order.
fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    fn fill(cards: &[Card], k: usize, start: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..cards.len() {
            if cards.len() - i < k - current.len() {
                break;
            }
            current.push(cards[i]);
            fill(cards, k, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    fill(cards, k, 0, &mut Vec::with_capacity(k), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::{CFRConfig, CFRSolver};
    use crate::eval::{BitmaskEvaluator, EvalError, HandTable};

    const DECK: &str = "10S JS QS KS AS 10H JH 9C 2D";

    fn deck() -> Vec<Card> {
        Card::parse_many(DECK).unwrap()
    }

    fn manual_deal(p0: &str, p1: &str, board: &str) -> History {
        let mut history = History::new();
        for card in Card::parse_many(p0).unwrap() {
            history.deal_card(0, card);
        }
        for card in Card::parse_many(p1).unwrap() {
            history.deal_card(1, card);
        }
        for card in Card::parse_many(board).unwrap() {
            history.deal_community(card);
        }
        history
    }

    fn play<E: Evaluator>(game: &HeadsUpHoldem<E>, mut history: History, moves: &[Action]) -> History {
        for action in moves {
            history = game.apply_action(&history, action);
        }
        history
    }

    #[test]
    fn test_construction_checks() {
        assert!(HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).is_ok());

        let short = deck()[..8].to_vec();
        assert!(matches!(
            HeadsUpHoldem::new(BitmaskEvaluator::new(), short),
            Err(SolverError::InvalidGame(_))
        ));

        let mut dup = deck();
        dup.push(dup[0]);
        assert!(matches!(
            HeadsUpHoldem::new(BitmaskEvaluator::new(), dup),
            Err(SolverError::InvalidGame(_))
        ));

        assert!(matches!(
            HeadsUpHoldem::new(BitmaskEvaluator::new(), Card::deck()),
            Err(SolverError::InvalidGame(_))
        ));
    }

    #[test]
    fn test_deal_expansion() {
        let game = HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).unwrap();
        assert_eq!(HeadsUpHoldem::<BitmaskEvaluator>::deal_count(9), 756);
        assert_eq!(HeadsUpHoldem::<BitmaskEvaluator>::deal_count(10), 7_560);

        let deals = game.generate_all_deals(&game.initial_history()).unwrap();
        assert_eq!(deals.len(), 756);
        for deal in &deals {
            assert!(deal.has_dealt());
            assert_eq!(deal.hand(0).len(), 2);
            assert_eq!(deal.hand(1).len(), 2);
            assert_eq!(deal.community().len(), 5);
            assert!(deal.visible_community().is_empty());

            let mut all: Vec<Card> = deal.hand(0).to_vec();
            all.extend_from_slice(deal.hand(1));
            all.extend_from_slice(deal.community());
            let unique: FxHashSet<Card> = all.iter().copied().collect();
            assert_eq!(unique.len(), 9);
        }
    }

    #[test]
    fn test_betting_sequence() {
        let game = HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).unwrap();
        let history = manual_deal("14S 13S", "10H 11H", "10S 11S 12S 9C 2D");

        assert_eq!(
            game.available_actions(&history),
            vec![Action::check(0), Action::bet(0, 1.0)]
        );

        let history = play(&game, history, &[Action::bet(0, 1.0)]);
        assert_eq!(game.current_player(&history), 1);
        assert_eq!(
            game.available_actions(&history),
            vec![Action::fold(1), Action::call(1), Action::raise(1, 1.0)]
        );

        let history = play(&game, history, &[Action::raise(1, 1.0)]);
        assert_eq!(
            game.available_actions(&history),
            vec![Action::fold(0), Action::call(0)]
        );
        assert!(!game.is_terminal(&history));

        let closed = play(&game, history, &[Action::call(0)]);
        assert!(game.is_terminal(&closed));
        assert_eq!(closed.round(), BettingRound::Showdown);
        assert!(game.available_actions(&closed).is_empty());
    }

    #[test]
    fn test_payoffs() {
        let game = HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).unwrap();
        // P0 makes a royal flush, P1 two pair.
        let history = manual_deal("14S 13S", "10H 11H", "10S 11S 12S 9C 2D");

        let checked = play(&game, history.clone(), &[Action::check(0), Action::check(1)]);
        assert_eq!(game.terminal_utility(&checked).unwrap(), vec![1.0, -1.0]);

        let called = play(&game, history.clone(), &[Action::bet(0, 1.0), Action::call(1)]);
        assert_eq!(game.terminal_utility(&called).unwrap(), vec![2.0, -2.0]);

        let folded = play(
            &game,
            history,
            &[Action::bet(0, 1.0), Action::raise(1, 1.0), Action::fold(0)],
        );
        assert!(game.is_terminal(&folded));
        assert_eq!(game.terminal_utility(&folded).unwrap(), vec![-2.0, 2.0]);

        // Broadway on the board plays for both.
        let split = manual_deal("2D 3H", "2C 3S", "10S 11H 12D 13C 14S");
        let split = play(&game, split, &[Action::check(0), Action::check(1)]);
        assert_eq!(game.terminal_utility(&split).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_board_hidden_until_showdown() {
        let game = HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).unwrap();
        let history = manual_deal("14S 13S", "10H 11H", "10S 11S 12S 9C 2D");
        let history = play(&game, history, &[Action::check(0)]);

        let key = game.info_set_key(&history, 1);
        assert!(key.starts_with("10H-11H||"), "{}", key);
        assert!(!key.contains("14S") && !key.contains("12S"));

        let closed = play(&game, history, &[Action::check(1)]);
        let key = game.info_set_key(&closed, 0);
        assert!(key.starts_with("13S-14S|10S-11S-12S-9C-2D|"), "{}", key);
    }

    #[test]
    fn test_table_matches_bitmask() {
        let table = HandTable::build(&deck()).unwrap();
        let by_table = HeadsUpHoldem::new(table, deck()).unwrap();
        let by_mask = HeadsUpHoldem::new(BitmaskEvaluator::new(), deck()).unwrap();

        let line = [Action::check(0), Action::check(1)];
        for deal in by_mask.generate_all_deals(&History::new()).unwrap() {
            let done = play(&by_mask, deal, &line);
            assert_eq!(
                by_table.terminal_utility(&done).unwrap(),
                by_mask.terminal_utility(&done).unwrap(),
                "{}",
                done
            );
        }
    }

    #[test]
    fn test_missing_table_entry_aborts_training() {
        let game = HeadsUpHoldem::new(HandTable::new(), deck()).unwrap();
        let root = game.initial_history();
        let mut solver = CFRSolver::new(game, CFRConfig::default().with_seed(5)).unwrap();

        match solver.train(10, &root) {
            Err(SolverError::Eval(EvalError::MissingEntry(_))) => {}
            other => panic!("expected a missing entry, got {:?}", other.map(|s| s.iterations)),
        }
    }

    #[test]
    fn test_short_training_run() {
        let table = HandTable::build(&deck()).unwrap();
        let game = HeadsUpHoldem::new(table, deck()).unwrap();
        let root = game.initial_history();
        let mut solver = CFRSolver::new(game, CFRConfig::default().with_seed(99)).unwrap();

        solver.train(2_000, &root).unwrap();
        assert!(solver.num_info_sets() > 0);
        for record in solver.report() {
            let sum: f64 = record.average.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{}", record.key);
            assert!(record.key.contains("||"), "board leaked into {}", record.key);
        }

        let ev = solver.expected_values(&root).unwrap();
        assert!((ev[0] + ev[1]).abs() < 1e-9);
    }
}

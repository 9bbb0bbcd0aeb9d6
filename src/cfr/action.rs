//! Actions recorded in a game history.
//!
//! An action is a tagged value: the acting player (none for chance events),
//! a closed [`ActionKind`], and an amount for the kinds that carry one.
//! Every action round-trips through a canonical textual key:
//!
//! ```text
//! P0:Check        player 0 checks
//! P1:Bet:2.00     player 1 bets 2
//! Deal            chance event (no player prefix)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Open the betting (amount).
    Bet,
    /// Match the outstanding bet.
    Call,
    /// Raise over a bet (amount).
    Raise,
    /// Give up the pot.
    Fold,
    /// Pass without betting.
    Check,
    /// Commit the whole stack (amount).
    AllIn,
    /// Chance event (cards dealt).
    Deal,
    /// Anything that failed to parse. Never valid in a strategy.
    Unknown,
}

impl ActionKind {
    /// Name used in the textual key.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Bet => "Bet",
            ActionKind::Call => "Call",
            ActionKind::Raise => "Raise",
            ActionKind::Fold => "Fold",
            ActionKind::Check => "Check",
            ActionKind::AllIn => "AllIn",
            ActionKind::Deal => "Deal",
            ActionKind::Unknown => "Unknown",
        }
    }

    /// Parse a kind name. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Bet" => ActionKind::Bet,
            "Call" => ActionKind::Call,
            "Raise" => ActionKind::Raise,
            "Fold" => ActionKind::Fold,
            "Check" => ActionKind::Check,
            "AllIn" => ActionKind::AllIn,
            "Deal" => ActionKind::Deal,
            _ => ActionKind::Unknown,
        }
    }

    /// Bet, Raise and AllIn carry an amount.
    #[inline]
    pub fn takes_amount(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }

    /// Whether this kind is a chance event rather than a player decision.
    #[inline]
    pub fn is_chance(&self) -> bool {
        matches!(self, ActionKind::Deal)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single action in a game history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    player: Option<usize>,
    kind: ActionKind,
    amount: Option<f64>,
}

impl Action {
    /// A player action without an amount (Check, Call, Fold).
    pub fn new(player: usize, kind: ActionKind) -> Self {
        debug_assert!(!kind.takes_amount(), "{} requires an amount", kind);
        Self {
            player: Some(player),
            kind,
            amount: None,
        }
    }

    /// A player action carrying an amount (Bet, Raise, AllIn).
    pub fn with_amount(player: usize, kind: ActionKind, amount: f64) -> Self {
        debug_assert!(kind.takes_amount(), "{} does not carry an amount", kind);
        debug_assert!(amount > 0.0, "amount must be positive");
        Self {
            player: Some(player),
            kind,
            amount: Some(amount),
        }
    }

    /// Check.
    pub fn check(player: usize) -> Self {
        Self::new(player, ActionKind::Check)
    }

    /// Call.
    pub fn call(player: usize) -> Self {
        Self::new(player, ActionKind::Call)
    }

    /// Fold.
    pub fn fold(player: usize) -> Self {
        Self::new(player, ActionKind::Fold)
    }

    /// Bet `amount`.
    pub fn bet(player: usize, amount: f64) -> Self {
        Self::with_amount(player, ActionKind::Bet, amount)
    }

    /// Raise by `amount`.
    pub fn raise(player: usize, amount: f64) -> Self {
        Self::with_amount(player, ActionKind::Raise, amount)
    }

    /// All-in for `amount`.
    pub fn all_in(player: usize, amount: f64) -> Self {
        Self::with_amount(player, ActionKind::AllIn, amount)
    }

    /// Chance event: one card dealt.
    pub fn deal() -> Self {
        Self {
            player: None,
            kind: ActionKind::Deal,
            amount: None,
        }
    }

    /// Acting player, `None` for chance events.
    pub fn player(&self) -> Option<usize> {
        self.player
    }

    /// Action kind.
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Amount, 0.0 when the kind carries none.
    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Whether this is a chance event.
    #[inline]
    pub fn is_chance(&self) -> bool {
        self.kind.is_chance()
    }

    /// `Unknown` actions are never usable in a strategy.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.kind != ActionKind::Unknown
    }

    /// Canonical textual key: `P<player>:<Kind>[:<amount>]`, or a bare
    /// `<Kind>` for chance events.
    pub fn key(&self) -> String {
        let mut key = match self.player {
            Some(p) => format!("P{}:{}", p, self.kind.name()),
            None => self.kind.name().to_string(),
        };
        if let Some(amount) = self.amount {
            key.push_str(&format!(":{:.2}", amount));
        }
        key
    }

    /// Parse a textual key. This never fails: an unrecognized kind or a
    /// malformed player prefix yields `Unknown`, and a malformed amount
    /// yields 0.0.
    pub fn parse(key: &str) -> Self {
        let parts: Vec<&str> = key.trim().split(':').collect();

        let (player, kind_name, rest) = match parts.as_slice() {
            [kind] => (None, *kind, &[][..]),
            [prefix, kind, rest @ ..] => match prefix.strip_prefix('P').map(str::parse::<usize>) {
                Some(Ok(p)) => (Some(p), *kind, rest),
                _ => {
                    return Self {
                        player: None,
                        kind: ActionKind::Unknown,
                        amount: None,
                    }
                }
            },
            [] => (None, "", &[][..]),
        };

        let kind = ActionKind::from_name(kind_name);
        let amount = if kind.takes_amount() {
            Some(
                rest.first()
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or(0.0),
            )
        } else {
            None
        };

        Self {
            player,
            kind,
            amount,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys() {
        assert_eq!(Action::check(0).key(), "P0:Check");
        assert_eq!(Action::bet(1, 2.0).key(), "P1:Bet:2.00");
        assert_eq!(Action::raise(0, 0.5).key(), "P0:Raise:0.50");
        assert_eq!(Action::deal().key(), "Deal");
    }

    #[test]
    fn test_parse_round_trip() {
        for action in [
            Action::check(0),
            Action::call(1),
            Action::fold(3),
            Action::bet(0, 1.0),
            Action::raise(1, 4.25),
            Action::all_in(2, 100.0),
            Action::deal(),
        ] {
            assert_eq!(Action::parse(&action.key()), action);
        }
    }

    #[test]
    fn test_parse_chance() {
        let action = Action::parse("Deal");
        assert_eq!(action.player(), None);
        assert!(action.is_chance());
        assert!(action.is_valid());
    }

    #[test]
    fn test_malformed_amount_defaults_to_zero() {
        let action = Action::parse("P0:Bet:lots");
        assert_eq!(action.kind(), ActionKind::Bet);
        assert_eq!(action.player(), Some(0));
        assert_eq!(action.amount(), 0.0);

        let missing = Action::parse("P1:Raise");
        assert_eq!(missing.amount(), 0.0);
        assert_eq!(missing.key(), "P1:Raise:0.00");
    }

    #[test]
    fn test_unknown_is_invalid() {
        assert_eq!(Action::parse("P0:Dance").kind(), ActionKind::Unknown);
        assert_eq!(Action::parse("Px:Bet:1").kind(), ActionKind::Unknown);
        assert_eq!(Action::parse("").kind(), ActionKind::Unknown);
        assert!(!Action::parse("P0:Dance").is_valid());
    }

    #[test]
    fn test_amount_ignored_for_plain_kinds() {
        let action = Action::parse("P0:Check:3.00");
        assert_eq!(action, Action::check(0));
    }
}

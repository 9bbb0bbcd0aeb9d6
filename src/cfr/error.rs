//! Errors raised while training.

use thiserror::Error;

use crate::cfr::config::ConfigError;
use crate::eval::EvalError;

/// Errors that abort a training run or an evaluation pass.
///
/// There is no retry: the first failure propagates out of `train`.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Showdown evaluation failed (invalid card, missing table entry).
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// A chance node expanded to no outcomes.
    #[error("chance node produced no deals")]
    NoDeals,

    /// A decision node offered an action that cannot be part of a strategy.
    #[error("invalid action at decision node: {0}")]
    InvalidAction(String),

    /// An information set was reached with a different action set than it
    /// was created with.
    #[error("info set {key} has {expected} actions but {found} were offered")]
    ActionSetMismatch {
        /// Information-set key.
        key: String,
        /// Actions at creation.
        expected: usize,
        /// Actions offered now.
        found: usize,
    },

    /// Game rules were built with unusable parameters.
    #[error("invalid game setup: {0}")]
    InvalidGame(String),

    /// Invalid solver configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

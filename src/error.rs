//! Request-boundary errors.
//!
//! The tracker itself never fails: damage clamps, heals always apply and
//! empty undo/redo stacks are no-ops. Everything here comes from decoding a
//! request into a call on the tracker.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("missing {0} parameter")]
    MissingParam(&'static str),

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("invalid amount: {0} (expected a positive number of at most 5 digits)")]
    InvalidAmount(String),

    #[error("invalid keypad digit: {0}")]
    InvalidDigit(String),

    #[error("invalid keypad buffer: {0}")]
    InvalidBuffer(String),

    #[error("unknown keypad mode: {0}")]
    UnknownMode(String),

    #[error("unknown keypad action: {0}")]
    UnknownAction(String),

    #[error("state serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
